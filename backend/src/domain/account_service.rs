//! Account service: registration, login and sessions.
//!
//! ## Business Rules
//!
//! - Email, password and confirmation are required; the confirmation must match
//! - Each role stores its own registration fields in `users/{uid}`
//! - DJs get an empty calendar and agenda on registration
//! - Login lands on the route of the user's role, `/home` without a profile

use log::{error, info, warn};
use shared::UserRole;
use std::sync::Arc;

use crate::domain::commands::accounts::{LoginResult, RegisterCommand, RegisterResult};
use crate::domain::models::{AccountError, ProfileError, ScheduleError};
use crate::domain::profile_service::ProfileService;
use crate::domain::schedule_service::ScheduleService;
use crate::storage::records::UserRecord;
use crate::storage::{AccountStore, AuthError, Credential, StoreError};

const FALLBACK_LANDING_ROUTE: &str = "/home";

#[derive(Clone)]
pub struct AccountService {
    accounts: Arc<dyn AccountStore>,
    profiles: ProfileService,
    schedule: ScheduleService,
}

impl AccountService {
    pub fn new(accounts: Arc<dyn AccountStore>, profiles: ProfileService, schedule: ScheduleService) -> Self {
        Self {
            accounts,
            profiles,
            schedule,
        }
    }

    pub async fn register(&self, command: RegisterCommand) -> Result<RegisterResult, AccountError> {
        info!("Registering {} as {:?}", command.email, command.role);

        if command.email.trim().is_empty() || command.password.is_empty() || command.confirm.is_empty() {
            return Err(AccountError::MissingFields);
        }
        if command.password != command.confirm {
            return Err(AccountError::PasswordMismatch);
        }

        let credential = self
            .accounts
            .register(&command.email, &command.password)
            .await
            .map_err(|e| {
                warn!("Registration of {} failed: {}", command.email, e);
                AccountError::register(e)
            })?;

        let record = registration_record(&credential.email, &command);
        self.profiles
            .create_profile(&credential.uid, &record)
            .await
            .map_err(|e| self.storage_failure(&credential, e))?;

        if command.role == UserRole::Dj {
            self.schedule.provision(&credential.uid).await.map_err(|e| match e {
                ScheduleError::Store(store) => AccountError::Store(store),
                other => AccountError::Store(StoreError::Unavailable(other.to_string())),
            })?;
        }

        info!("Registered user {}", credential.uid);
        Ok(RegisterResult {
            credential,
            success_message: "User registered successfully!".to_string(),
        })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AccountError> {
        info!("Login attempt for {}", email);
        if email.trim().is_empty() || password.is_empty() {
            return Err(AccountError::MissingFields);
        }

        let credential = self.accounts.login(email, password).await.map_err(|e| {
            warn!("Login for {} failed: {}", email, e);
            AccountError::login(e)
        })?;

        let profile = match self.profiles.profile_by_email(&credential.email).await {
            Ok(profile) => profile,
            Err(ProfileError::Store(e)) => return Err(AccountError::Store(e)),
            Err(e) => {
                warn!("No usable profile for {}: {}", credential.email, e);
                None
            }
        };
        let landing_route = profile
            .as_ref()
            .map(|p| p.role.landing_route())
            .unwrap_or(FALLBACK_LANDING_ROUTE)
            .to_string();

        Ok(LoginResult {
            credential,
            profile,
            landing_route,
        })
    }

    pub async fn logout(&self, token: &str) -> Result<(), AccountError> {
        self.accounts.logout(token).await.map_err(AccountError::login)
    }

    /// Resolve a bearer token to its session
    pub async fn authenticate(&self, token: &str) -> Result<Credential, AuthError> {
        self.accounts
            .current_session(token)
            .await?
            .ok_or(AuthError::InvalidSession)
    }

    fn storage_failure(&self, credential: &Credential, error: ProfileError) -> AccountError {
        error!("Failed to store profile for {}: {}", credential.uid, error);
        match error {
            ProfileError::Store(e) => AccountError::Store(e),
            other => AccountError::Store(StoreError::Unavailable(other.to_string())),
        }
    }
}

/// Profile fields kept for each role at registration
fn registration_record(email: &str, command: &RegisterCommand) -> UserRecord {
    let mut record = UserRecord::new(email, command.role);
    match command.role {
        UserRole::Dj | UserRole::Client => {
            record.nombre = command.first_name.clone();
            record.apellido = command.last_name.clone();
            record.dni = command.national_id.clone();
            record.distrito = command.district.clone();
            record.provincia = command.province.clone();
            record.departamento = command.department.clone();
        }
        UserRole::Promoter => {
            record.empresa = command.company.clone();
            record.direccion = command.address.clone();
            record.ruc = command.tax_id.clone();
        }
    }
    record
}
