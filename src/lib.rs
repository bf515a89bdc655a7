pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{AwsBackupService, DryRunBackupService};
pub use config::{HandlerConfig, SERVICE_NAME};
pub use crate::core::handler::BackupEventHandler;
pub use domain::model::{BackupNotification, DispatchOutcome, HandlerResponse};
pub use domain::ports::BackupService;
pub use utils::error::{BackupError, Result};
