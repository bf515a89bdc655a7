#[cfg(feature = "cli")]
pub mod cli;
pub mod lambda;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use lambda::{tracing_enabled_from_env, HandlerConfig, SERVICE_NAME};

use crate::domain::model::BackupNotification;
use crate::utils::error::{BackupError, Result};
use std::fs;
use std::path::Path;

/// Loads a notification saved to disk, e.g. from an EventBridge archive.
pub fn load_event_file(path: &Path) -> Result<serde_json::Value> {
    let raw = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    // Fail early on files that can never dispatch.
    serde_json::from_value::<BackupNotification>(value.clone()).map_err(|e| {
        BackupError::EventError {
            message: format!("{}: {}", path.display(), e),
        }
    })?;
    Ok(value)
}
