use crate::domain::model::{CopyJobDetails, CopyJobRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The three AWS Backup operations the handler consumes.
#[async_trait]
pub trait BackupService: Send + Sync {
    /// Returns the id of the started copy job.
    async fn start_copy_job(&self, request: &CopyJobRequest) -> Result<String>;
    async fn describe_copy_job(&self, copy_job_id: &str) -> Result<CopyJobDetails>;
    async fn delete_recovery_point(&self, backup_vault: &str, recovery_point_arn: &str)
        -> Result<()>;
}
