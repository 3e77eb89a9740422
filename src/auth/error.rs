use crate::app::AppError;
use std::fmt;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    App(AppError),
    InvalidCredential(String),
    /// Raised when the identity service cannot be reached. Building an [`Auth`](super::Auth)
    /// never performs I/O, so this only surfaces from operations that talk to the network.
    Unavailable(String),
    /// A configured service endpoint is not a usable absolute URL.
    InvalidEndpoint(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::App(err) => write!(f, "{}", err),
            AuthError::InvalidCredential(message) => write!(f, "Invalid credential: {message}"),
            AuthError::Unavailable(message) => write!(f, "Auth service unavailable: {message}"),
            AuthError::InvalidEndpoint(message) => write!(f, "Invalid endpoint: {message}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<AppError> for AuthError {
    fn from(error: AppError) -> Self {
        AuthError::App(error)
    }
}
