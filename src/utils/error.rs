use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackupError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Backup service call {operation} failed: {message}")]
    RemoteError { operation: String, message: String },

    #[error("Malformed event: {message}")]
    EventError { message: String },
}

impl BackupError {
    pub fn remote(operation: &str, err: impl std::fmt::Display) -> Self {
        BackupError::RemoteError {
            operation: operation.to_string(),
            message: err.to_string(),
        }
    }

    /// Configuration problems stop the process at cold start; everything else
    /// is absorbed by the handler and only logged.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            BackupError::MissingConfigError { .. }
                | BackupError::InvalidConfigValueError { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BackupError>;
