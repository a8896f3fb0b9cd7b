//! Error types for the UserManager CLI

use thiserror::Error;

use crate::tasks::TaskKind;

/// Result type alias for UserManager operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Task(#[from] TaskError),

    /// Terminal failure event of a background task, shown verbatim
    #[error("{0}")]
    TaskFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// No bearer token could be obtained. Network failure, bad credentials
    /// and server errors on the token endpoint all collapse into this.
    #[error("Auth Failed. Check credentials.")]
    AuthFailed,

    #[error("Request rejected: the access token was not accepted")]
    Unauthorized,

    #[error("Access denied. The worker application lacks permission for this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration and profile errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse profile file: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save profile file: {0}")]
    SaveError(String),

    #[error("Profile '{0}' not found. Run `usermanager profile list` to see saved profiles.")]
    ProfileNotFound(String),

    #[error(
        "Missing {0}. Pass it as a flag, set the environment variable, or select a saved --profile."
    )]
    MissingCredential(&'static str),

    #[error("Credential vault error: {0}")]
    Vault(String),
}

impl From<keyring::Error> for ConfigError {
    fn from(err: keyring::Error) -> Self {
        ConfigError::Vault(err.to_string())
    }
}

/// Task dispatch errors
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("A {0} task is already running")]
    Busy(TaskKind),
}
