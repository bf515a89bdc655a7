use crate::domain::model::{CopyJobDetails, CopyJobRequest};
use crate::domain::ports::BackupService;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Logs the calls the handler would make without touching AWS.
///
/// Copy-job lookups cannot be answered offline. Describe returns the source
/// set with `with_source`, or placeholder ARNs derived from the job id.
#[derive(Debug, Default)]
pub struct DryRunBackupService {
    calls: AtomicUsize,
    source_vault_arn: Option<String>,
    source_recovery_point_arn: Option<String>,
}

impl DryRunBackupService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(
        mut self,
        vault_arn: Option<String>,
        recovery_point_arn: Option<String>,
    ) -> Self {
        self.source_vault_arn = vault_arn;
        self.source_recovery_point_arn = recovery_point_arn;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl BackupService for DryRunBackupService {
    async fn start_copy_job(&self, request: &CopyJobRequest) -> Result<String> {
        let n = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(
            recovery_point_arn = %request.recovery_point_arn,
            source_vault = %request.source_vault,
            destination_vault_arn = %request.destination_vault_arn,
            iam_role_arn = %request.iam_role_arn,
            idempotency_token = %request.idempotency_token,
            lifecycle = ?request.lifecycle,
            "🔍 DRY RUN: StartCopyJob"
        );
        Ok(format!("dry-run-copy-job-{}", n))
    }

    async fn describe_copy_job(&self, copy_job_id: &str) -> Result<CopyJobDetails> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        tracing::info!(copy_job_id, "🔍 DRY RUN: DescribeCopyJob");
        Ok(CopyJobDetails {
            source_vault_arn: self
                .source_vault_arn
                .clone()
                .unwrap_or_else(|| format!("dry-run-source-vault-of-{}", copy_job_id)),
            source_recovery_point_arn: self
                .source_recovery_point_arn
                .clone()
                .unwrap_or_else(|| format!("dry-run-recovery-point-of-{}", copy_job_id)),
        })
    }

    async fn delete_recovery_point(
        &self,
        backup_vault: &str,
        recovery_point_arn: &str,
    ) -> Result<()> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        tracing::info!(
            backup_vault,
            recovery_point_arn,
            "🔍 DRY RUN: DeleteRecoveryPoint"
        );
        Ok(())
    }
}
