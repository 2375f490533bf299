//! Error types raised by the storage collaborators.

/// Failure while reading or writing documents
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid document path segment: {0:?}")]
    InvalidKey(String),
    #[error("Document {collection}/{key} is malformed: {reason}")]
    Malformed {
        collection: String,
        key: String,
        reason: String,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Which screen an authentication error is reported on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlow {
    Login,
    Register,
}

/// Failure reported by the account store
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Wrong password")]
    WrongCredential,
    #[error("Account is not registered")]
    NotRegistered,
    #[error("Email address is not valid")]
    InvalidIdentifier,
    #[error("Email address is already registered")]
    AlreadyRegistered,
    #[error("Password is too weak")]
    WeakCredential,
    #[error("Session is not valid")]
    InvalidSession,
    #[error("Authentication failed: {0}")]
    Unknown(String),
}

impl AuthError {
    /// Message shown to the user. Each flow only distinguishes the reasons
    /// it knows about and falls back to its generic message otherwise.
    pub fn user_message(&self, flow: AuthFlow) -> &'static str {
        match (flow, self) {
            (AuthFlow::Login, AuthError::WrongCredential) => "Incorrect password.",
            (AuthFlow::Login, AuthError::NotRegistered) => "The user is not registered.",
            (AuthFlow::Login, AuthError::InvalidIdentifier) => "The email is not valid.",
            (AuthFlow::Login, _) => "Error signing in. Please try again.",
            (AuthFlow::Register, AuthError::AlreadyRegistered) => "The email is already registered.",
            (AuthFlow::Register, AuthError::InvalidIdentifier) => "The email is not valid.",
            (AuthFlow::Register, AuthError::WeakCredential) => {
                "The password must be at least 6 characters."
            }
            (AuthFlow::Register, _) => "Error registering user. Try different details.",
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(error: StoreError) -> Self {
        AuthError::Unknown(error.to_string())
    }
}
