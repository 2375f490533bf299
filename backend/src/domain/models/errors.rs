//! Service-level error enums. Store failures keep their source for logging
//! but display the generic retry message shown to users.

use crate::domain::session::SessionError;
use crate::storage::{AuthError, AuthFlow, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("Could not save your calendar. Please try again.")]
    Store(#[from] StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Please fill in all fields.")]
    MissingFields,
    #[error("Password and confirmation must match.")]
    PasswordMismatch,
    #[error("{}", auth_message(.flow, .source))]
    Auth { flow: AuthFlow, source: AuthError },
    #[error("Something went wrong. Please try again.")]
    Store(#[from] StoreError),
}

fn auth_message(flow: &AuthFlow, source: &AuthError) -> &'static str {
    source.user_message(*flow)
}

impl AccountError {
    pub fn login(source: AuthError) -> Self {
        AccountError::Auth {
            flow: AuthFlow::Login,
            source,
        }
    }

    pub fn register(source: AuthError) -> Self {
        AccountError::Auth {
            flow: AuthFlow::Register,
            source,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Profile not found: {0}")]
    NotFound(String),
    #[error("Only DJ accounts have a DJ profile")]
    NotADj,
    #[error("Error saving. Please try again.")]
    Store(#[from] StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("Package {0} not found")]
    NotFound(usize),
    #[error("Package title cannot be empty")]
    EmptyTitle,
    #[error("Could not save your packages. Please try again.")]
    Store(#[from] StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Please fill in all required fields.")]
    MissingFields,
    #[error("Could not identify the DJ.")]
    UnknownDj(String),
    #[error("Error sending the request. Please try again.")]
    Store(#[from] StoreError),
}
