use serde::{Deserialize, Serialize};

pub const BACKUP_JOB_STATE_CHANGE: &str = "Backup Job State Change";
pub const COPY_JOB_STATE_CHANGE: &str = "Copy Job State Change";
pub const STATE_COMPLETED: &str = "COMPLETED";

/// EventBridge notification emitted by AWS Backup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupNotification {
    #[serde(rename = "detail-type")]
    pub detail_type: String,
    #[serde(default)]
    pub detail: EventDetail,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetail {
    pub state: Option<String>,
    pub resource_arn: Option<String>,
    pub backup_vault_arn: Option<String>,
    pub copy_job_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    BackupJobCompleted,
    CopyJobCompleted,
    Other,
}

impl BackupNotification {
    pub fn kind(&self) -> NotificationKind {
        if self.detail.state.as_deref() != Some(STATE_COMPLETED) {
            return NotificationKind::Other;
        }
        match self.detail_type.as_str() {
            BACKUP_JOB_STATE_CHANGE => NotificationKind::BackupJobCompleted,
            COPY_JOB_STATE_CHANGE => NotificationKind::CopyJobCompleted,
            _ => NotificationKind::Other,
        }
    }

    pub fn event_id(&self) -> &str {
        self.id.as_deref().unwrap_or("<unknown>")
    }
}

/// Lifecycle applied to the copied recovery point. `None` on either side
/// means no transition of that kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyLifecycle {
    pub move_to_cold_storage_after_days: Option<i64>,
    pub delete_after_days: Option<i64>,
}

impl CopyLifecycle {
    /// Zero days is the service's "no constraint"; it is never sent.
    pub fn from_days(cold_storage_after_days: i64, delete_after_days: i64) -> Option<Self> {
        let lifecycle = Self {
            move_to_cold_storage_after_days: Some(cold_storage_after_days).filter(|d| *d > 0),
            delete_after_days: Some(delete_after_days).filter(|d| *d > 0),
        };
        if lifecycle == Self::default() {
            None
        } else {
            Some(lifecycle)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyJobRequest {
    pub recovery_point_arn: String,
    pub source_vault: String,
    pub destination_vault_arn: String,
    pub iam_role_arn: String,
    pub idempotency_token: String,
    pub lifecycle: Option<CopyLifecycle>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyJobDetails {
    pub source_vault_arn: String,
    pub source_recovery_point_arn: String,
}

/// What a single dispatch did. Every variant still yields a 200 response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    CopyStarted { copy_job_id: String },
    CopyNotStarted,
    CopySkipped { resource_arn: String },
    CleanedUp { recovery_point_arn: String },
    CleanupLookupFailed,
    CleanupDeleteFailed { recovery_point_arn: String },
    Malformed { reason: String },
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl HandlerResponse {
    pub fn ok() -> Self {
        Self { status_code: 200 }
    }
}

/// Third colon-delimited segment of an ARN, i.e. the AWS service.
pub fn arn_service(arn: &str) -> Option<&str> {
    arn.split(':').nth(2)
}

pub fn is_rds_resource(arn: &str) -> bool {
    arn_service(arn) == Some("rds")
}

/// `arn:aws:backup:<region>:<account>:backup-vault:<name>` -> `<name>`.
/// Anything that is not a vault ARN is assumed to already be a name.
pub fn vault_name_from_arn(vault: &str) -> &str {
    match vault.split_once(":backup-vault:") {
        Some((_, name)) if vault.starts_with("arn:") => name,
        _ => vault,
    }
}
