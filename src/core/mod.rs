pub mod handler;

pub use crate::domain::model::{BackupNotification, DispatchOutcome, HandlerResponse};
pub use crate::domain::ports::BackupService;
pub use crate::utils::error::Result;
