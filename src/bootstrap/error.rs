use std::error::Error;
use std::fmt;

use crate::app::AppError;
use crate::auth::AuthError;
use crate::config::ConfigError;
use crate::firestore::FirestoreError;

pub type BootstrapResult<T> = Result<T, BootstrapError>;

/// Failures of the start-up sequence. None of them is retried; callers are expected
/// to treat them as fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapError {
    /// A configuration field is missing or malformed. No backend call was made.
    Configuration(ConfigError),
    /// The backend refused to register the application.
    Initialization(AppError),
    /// A client factory could not bind its configuration.
    Client { client: &'static str, message: String },
}

impl BootstrapError {
    pub fn client(client: &'static str, message: impl Into<String>) -> Self {
        BootstrapError::Client {
            client,
            message: message.into(),
        }
    }
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapError::Configuration(err) => write!(f, "{err}"),
            BootstrapError::Initialization(err) => {
                write!(f, "Firebase app initialization failed: {err}")
            }
            BootstrapError::Client { client, message } => {
                write!(f, "Unable to create {client} client: {message}")
            }
        }
    }
}

impl Error for BootstrapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BootstrapError::Configuration(err) => Some(err),
            BootstrapError::Initialization(err) => Some(err),
            BootstrapError::Client { .. } => None,
        }
    }
}

impl From<ConfigError> for BootstrapError {
    fn from(err: ConfigError) -> Self {
        BootstrapError::Configuration(err)
    }
}

impl From<AppError> for BootstrapError {
    fn from(err: AppError) -> Self {
        BootstrapError::Initialization(err)
    }
}

impl From<AuthError> for BootstrapError {
    fn from(err: AuthError) -> Self {
        BootstrapError::client("auth", err.to_string())
    }
}

impl From<FirestoreError> for BootstrapError {
    fn from(err: FirestoreError) -> Self {
        BootstrapError::client("firestore", err.to_string())
    }
}
