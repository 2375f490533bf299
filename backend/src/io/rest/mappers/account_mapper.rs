use shared::{LoginResponse, RegisterRequest, RegisterResponse, UpdateDjProfileRequest};

use crate::domain::commands::accounts::{LoginResult, RegisterCommand, RegisterResult};
use crate::domain::commands::profiles::UpdateDjProfileCommand;

pub struct AccountMapper;

impl AccountMapper {
    pub fn to_register_command(request: RegisterRequest) -> RegisterCommand {
        RegisterCommand {
            email: request.email,
            password: request.password,
            confirm: request.confirm,
            role: request.role,
            first_name: request.first_name,
            last_name: request.last_name,
            national_id: request.national_id,
            district: request.district,
            province: request.province,
            department: request.department,
            company: request.company,
            address: request.address,
            tax_id: request.tax_id,
        }
    }

    pub fn to_register_response(result: RegisterResult) -> RegisterResponse {
        RegisterResponse {
            user_id: result.credential.uid,
            success_message: result.success_message,
        }
    }

    pub fn to_login_response(result: LoginResult) -> LoginResponse {
        LoginResponse {
            token: result.credential.token,
            user_id: result.credential.uid,
            landing_route: result.landing_route,
            profile: result.profile,
        }
    }

    pub fn to_update_profile_command(request: UpdateDjProfileRequest) -> UpdateDjProfileCommand {
        UpdateDjProfileCommand {
            stage_name: request.stage_name,
            description: request.description,
            genres: request.genres,
            rider: request.rider,
        }
    }
}
