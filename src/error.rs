use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to read {path}: {message}")]
    IoError { path: String, message: String },

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("Unknown role: {0}")]
    InvalidRole(String),

    #[error("Unknown tier: {0}")]
    InvalidTier(String),

    #[error("No participants found in {0}")]
    NoParticipants(String),
}
