use crate::config::HandlerConfig;
use crate::core::BackupService;
use crate::domain::model::{
    is_rds_resource, BackupNotification, CopyJobRequest, DispatchOutcome, HandlerResponse,
    NotificationKind,
};
use serde::Deserialize;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Reacts to AWS Backup job notifications: copies completed RDS recovery
/// points to the target vault and removes the source once the copy is done.
///
/// Remote failures never surface as a failed invocation. Every path returns
/// `{"statusCode": 200}` and failures are only visible in the logs.
pub struct BackupEventHandler<B: BackupService> {
    service: B,
    config: HandlerConfig,
}

impl<B: BackupService> BackupEventHandler<B> {
    pub fn new(service: B, config: HandlerConfig) -> Self {
        Self { service, config }
    }

    pub fn service(&self) -> &B {
        &self.service
    }

    pub async fn handle(&self, payload: &serde_json::Value) -> HandlerResponse {
        match BackupNotification::deserialize(payload) {
            Ok(notification) => {
                let outcome = self.dispatch(&notification).await;
                debug!(?outcome, "Dispatch finished");
            }
            Err(e) => {
                error!("❌ Ignoring unparseable event: {}", e);
            }
        }
        HandlerResponse::ok()
    }

    pub async fn dispatch(&self, notification: &BackupNotification) -> DispatchOutcome {
        match notification.kind() {
            NotificationKind::BackupJobCompleted => self.on_backup_job_completed(notification).await,
            NotificationKind::CopyJobCompleted => {
                let Some(copy_job_id) = notification.detail.copy_job_id.as_deref() else {
                    return malformed(notification, "detail.copyJobId is missing");
                };
                info!("House keeping after Copy Job: {}", copy_job_id);
                self.delete_recovery_point(copy_job_id).await
            }
            NotificationKind::Other => {
                debug!(
                    detail_type = %notification.detail_type,
                    state = ?notification.detail.state,
                    "No action for event"
                );
                DispatchOutcome::Ignored
            }
        }
    }

    async fn on_backup_job_completed(&self, notification: &BackupNotification) -> DispatchOutcome {
        let Some(resource_arn) = notification.detail.resource_arn.as_deref() else {
            return malformed(notification, "detail.resourceArn is missing");
        };

        if !is_rds_resource(resource_arn) {
            debug!("Skipping non-RDS resource: {}", resource_arn);
            return DispatchOutcome::CopySkipped {
                resource_arn: resource_arn.to_string(),
            };
        }

        let Some(recovery_point_arn) = notification.resources.first() else {
            return malformed(notification, "resources is empty");
        };
        let Some(source_vault_arn) = notification.detail.backup_vault_arn.as_deref() else {
            return malformed(notification, "detail.backupVaultArn is missing");
        };

        info!(
            "Starting cross account copy for recovery point {}",
            notification.event_id()
        );
        match self
            .copy_recovery_point(
                recovery_point_arn,
                source_vault_arn,
                &self.config.target_vault_arn,
            )
            .await
        {
            Some(copy_job_id) => {
                info!("Copy Job started: {}", copy_job_id);
                DispatchOutcome::CopyStarted { copy_job_id }
            }
            None => DispatchOutcome::CopyNotStarted,
        }
    }

    /// Starts a copy job with a fresh idempotency token. `None` means no job
    /// was created; the reason has already been logged.
    #[tracing::instrument(skip(self))]
    pub async fn copy_recovery_point(
        &self,
        recovery_point_arn: &str,
        source_vault_arn: &str,
        destination_vault_arn: &str,
    ) -> Option<String> {
        let request = CopyJobRequest {
            recovery_point_arn: recovery_point_arn.to_string(),
            source_vault: source_vault_arn.to_string(),
            destination_vault_arn: destination_vault_arn.to_string(),
            iam_role_arn: self.config.iam_role_arn.clone(),
            idempotency_token: new_idempotency_token(),
            lifecycle: self.config.lifecycle(),
        };

        match self.service.start_copy_job(&request).await {
            Ok(copy_job_id) if !copy_job_id.is_empty() => Some(copy_job_id),
            Ok(_) => {
                warn!("Copy job request accepted without a copy job id");
                None
            }
            Err(e) => {
                error!("❌ {}", e);
                None
            }
        }
    }

    /// Deletes the source recovery point of a finished copy job. A failed
    /// lookup aborts; a failed delete is only recorded.
    #[tracing::instrument(skip(self))]
    pub async fn delete_recovery_point(&self, copy_job_id: &str) -> DispatchOutcome {
        let copy_job = match self.service.describe_copy_job(copy_job_id).await {
            Ok(details) => details,
            Err(e) => {
                error!("❌ {}", e);
                return DispatchOutcome::CleanupLookupFailed;
            }
        };

        info!(
            "Deleting duplicate backup: {}",
            copy_job.source_recovery_point_arn
        );
        match self
            .service
            .delete_recovery_point(
                &copy_job.source_vault_arn,
                &copy_job.source_recovery_point_arn,
            )
            .await
        {
            Ok(()) => DispatchOutcome::CleanedUp {
                recovery_point_arn: copy_job.source_recovery_point_arn,
            },
            Err(e) => {
                error!("❌ {}", e);
                DispatchOutcome::CleanupDeleteFailed {
                    recovery_point_arn: copy_job.source_recovery_point_arn,
                }
            }
        }
    }
}

pub fn new_idempotency_token() -> String {
    Uuid::new_v4().to_string()
}

fn malformed(notification: &BackupNotification, reason: &str) -> DispatchOutcome {
    warn!(
        event_id = notification.event_id(),
        "Skipping malformed {} event: {}", notification.detail_type, reason
    );
    DispatchOutcome::Malformed {
        reason: reason.to_string(),
    }
}
