//! Translation of domain errors into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use shared::ErrorResponse;

use crate::domain::models::{
    AccountError, BookingDetailError, PackageError, ProfileError, RequestError, ScheduleError,
};
use crate::domain::SessionError;
use crate::storage::{AuthError, StoreError};

/// An error response: status code plus the message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Please sign in to continue.")
    }

    fn internal(source: &dyn std::fmt::Display, message: String) -> Self {
        error!("Request failed: {}", source);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::internal(&e, "Something went wrong. Please try again.".to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Unknown(_) => ApiError::internal(&e, "Something went wrong. Please try again.".to_string()),
            _ => ApiError::unauthorized(),
        }
    }
}

impl From<ScheduleError> for ApiError {
    fn from(e: ScheduleError) -> Self {
        let status = match &e {
            ScheduleError::InvalidDate(_) => StatusCode::BAD_REQUEST,
            ScheduleError::Session(SessionError::ReadOnly) => StatusCode::FORBIDDEN,
            ScheduleError::Session(SessionError::Detail(BookingDetailError::NotFound(_))) => StatusCode::NOT_FOUND,
            ScheduleError::Session(SessionError::Detail(_)) => StatusCode::BAD_REQUEST,
            ScheduleError::Store(source) => return ApiError::internal(source, e.to_string()),
        };
        ApiError::new(status, e.to_string())
    }
}

impl From<AccountError> for ApiError {
    fn from(e: AccountError) -> Self {
        let status = match &e {
            AccountError::MissingFields | AccountError::PasswordMismatch => StatusCode::BAD_REQUEST,
            AccountError::Auth { source, .. } => match source {
                AuthError::WrongCredential | AuthError::NotRegistered | AuthError::InvalidSession => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::InvalidIdentifier | AuthError::WeakCredential => StatusCode::BAD_REQUEST,
                AuthError::AlreadyRegistered => StatusCode::CONFLICT,
                AuthError::Unknown(_) => return ApiError::internal(source, e.to_string()),
            },
            AccountError::Store(source) => return ApiError::internal(source, e.to_string()),
        };
        ApiError::new(status, e.to_string())
    }
}

impl From<ProfileError> for ApiError {
    fn from(e: ProfileError) -> Self {
        let status = match &e {
            ProfileError::NotFound(_) => StatusCode::NOT_FOUND,
            ProfileError::NotADj => StatusCode::FORBIDDEN,
            ProfileError::Store(source) => return ApiError::internal(source, e.to_string()),
        };
        ApiError::new(status, e.to_string())
    }
}

impl From<PackageError> for ApiError {
    fn from(e: PackageError) -> Self {
        let status = match &e {
            PackageError::NotFound(_) => StatusCode::NOT_FOUND,
            PackageError::EmptyTitle => StatusCode::BAD_REQUEST,
            PackageError::Store(source) => return ApiError::internal(source, e.to_string()),
        };
        ApiError::new(status, e.to_string())
    }
}

impl From<RequestError> for ApiError {
    fn from(e: RequestError) -> Self {
        let status = match &e {
            RequestError::MissingFields => StatusCode::BAD_REQUEST,
            RequestError::UnknownDj(_) => StatusCode::NOT_FOUND,
            RequestError::Store(source) => return ApiError::internal(source, e.to_string()),
        };
        ApiError::new(status, e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::AvailabilityState;

    #[test]
    fn test_schedule_error_statuses() {
        let read_only = ApiError::from(ScheduleError::Session(SessionError::ReadOnly));
        assert_eq!(read_only.status, StatusCode::FORBIDDEN);

        let missing = ApiError::from(ScheduleError::Session(SessionError::Detail(
            BookingDetailError::NotFound("2024-1-1".to_string()),
        )));
        assert_eq!(missing.status, StatusCode::NOT_FOUND);

        let not_bookable = ApiError::from(ScheduleError::Session(SessionError::Detail(
            BookingDetailError::NotBookable {
                date_key: "2024-1-1".to_string(),
                state: AvailabilityState::Available,
            },
        )));
        assert_eq!(not_bookable.status, StatusCode::BAD_REQUEST);

        let store = ApiError::from(ScheduleError::Store(StoreError::Unavailable("disk".to_string())));
        assert_eq!(store.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(store.message, "Could not save your calendar. Please try again.");
    }

    #[test]
    fn test_account_error_statuses() {
        let duplicate = ApiError::from(AccountError::register(AuthError::AlreadyRegistered));
        assert_eq!(duplicate.status, StatusCode::CONFLICT);
        assert_eq!(duplicate.message, "The email is already registered.");

        let wrong = ApiError::from(AccountError::login(AuthError::WrongCredential));
        assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong.message, "Incorrect password.");

        let mismatch = ApiError::from(AccountError::PasswordMismatch);
        assert_eq!(mismatch.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_store_errors_hide_details() {
        let error = ApiError::from(StoreError::Unavailable("/var/data is read-only".to_string()));
        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!error.message.contains("/var/data"));
    }
}
