use crate::domain::model::{vault_name_from_arn, CopyJobDetails, CopyJobRequest};
use crate::domain::ports::BackupService;
use crate::utils::error::{BackupError, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_backup::config::Region;
use aws_sdk_backup::error::DisplayErrorContext;
use aws_sdk_backup::types::Lifecycle;
use aws_sdk_backup::Client as BackupClient;

/// `BackupService` backed by the AWS Backup API.
#[derive(Debug, Clone)]
pub struct AwsBackupService {
    client: BackupClient,
}

impl AwsBackupService {
    pub fn new(client: BackupClient) -> Self {
        Self { client }
    }

    pub async fn from_region(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self::new(BackupClient::new(&config))
    }
}

#[async_trait]
impl BackupService for AwsBackupService {
    async fn start_copy_job(&self, request: &CopyJobRequest) -> Result<String> {
        let lifecycle = request.lifecycle.map(|l| {
            Lifecycle::builder()
                .set_move_to_cold_storage_after_days(l.move_to_cold_storage_after_days)
                .set_delete_after_days(l.delete_after_days)
                .build()
        });

        let output = self
            .client
            .start_copy_job()
            .recovery_point_arn(&request.recovery_point_arn)
            .source_backup_vault_name(vault_name_from_arn(&request.source_vault))
            .destination_backup_vault_arn(&request.destination_vault_arn)
            .iam_role_arn(&request.iam_role_arn)
            .idempotency_token(&request.idempotency_token)
            .set_lifecycle(lifecycle)
            .send()
            .await
            .map_err(|e| BackupError::remote("StartCopyJob", DisplayErrorContext(&e)))?;

        Ok(output.copy_job_id().unwrap_or_default().to_string())
    }

    async fn describe_copy_job(&self, copy_job_id: &str) -> Result<CopyJobDetails> {
        let output = self
            .client
            .describe_copy_job()
            .copy_job_id(copy_job_id)
            .send()
            .await
            .map_err(|e| BackupError::remote("DescribeCopyJob", DisplayErrorContext(&e)))?;

        let copy_job = output
            .copy_job()
            .ok_or_else(|| BackupError::remote("DescribeCopyJob", "response has no CopyJob"))?;

        let source_vault_arn = copy_job.source_backup_vault_arn().ok_or_else(|| {
            BackupError::remote("DescribeCopyJob", "CopyJob has no SourceBackupVaultArn")
        })?;
        let source_recovery_point_arn = copy_job.source_recovery_point_arn().ok_or_else(|| {
            BackupError::remote("DescribeCopyJob", "CopyJob has no SourceRecoveryPointArn")
        })?;

        Ok(CopyJobDetails {
            source_vault_arn: source_vault_arn.to_string(),
            source_recovery_point_arn: source_recovery_point_arn.to_string(),
        })
    }

    async fn delete_recovery_point(
        &self,
        backup_vault: &str,
        recovery_point_arn: &str,
    ) -> Result<()> {
        self.client
            .delete_recovery_point()
            .backup_vault_name(vault_name_from_arn(backup_vault))
            .recovery_point_arn(recovery_point_arn)
            .send()
            .await
            .map_err(|e| BackupError::remote("DeleteRecoveryPoint", DisplayErrorContext(&e)))?;
        Ok(())
    }
}
