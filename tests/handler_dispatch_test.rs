use async_trait::async_trait;
use cross_account_backup::domain::model::{CopyJobDetails, CopyJobRequest};
use cross_account_backup::{
    BackupError, BackupEventHandler, BackupNotification, BackupService, DispatchOutcome,
    HandlerConfig, HandlerResponse, Result,
};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;

const TARGET_VAULT: &str = "arn:aws:backup:eu-west-2:444455556666:backup-vault:central";
const SOURCE_VAULT: &str = "arn:aws:backup:eu-west-2:111122223333:backup-vault:Default";
const IAM_ROLE: &str = "arn:aws:iam::111122223333:role/backup-copy";
const RDS_DB: &str = "arn:aws:rds:eu-west-2:111122223333:db:orders";
const RECOVERY_POINT: &str = "arn:aws:rds:eu-west-2:111122223333:snapshot:awsbackup:job-1234";

#[derive(Debug, Clone, PartialEq)]
enum Call {
    StartCopyJob(CopyJobRequest),
    DescribeCopyJob(String),
    DeleteRecoveryPoint { vault: String, recovery_point_arn: String },
}

#[derive(Clone, Default)]
struct RecordingBackup {
    calls: Arc<Mutex<Vec<Call>>>,
    fail_start: bool,
    fail_describe: bool,
    fail_delete: bool,
}

impl RecordingBackup {
    async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl BackupService for RecordingBackup {
    async fn start_copy_job(&self, request: &CopyJobRequest) -> Result<String> {
        let mut calls = self.calls.lock().await;
        calls.push(Call::StartCopyJob(request.clone()));
        if self.fail_start {
            return Err(BackupError::remote("StartCopyJob", "AccessDeniedException"));
        }
        Ok(format!("copy-job-{}", calls.len()))
    }

    async fn describe_copy_job(&self, copy_job_id: &str) -> Result<CopyJobDetails> {
        self.calls
            .lock()
            .await
            .push(Call::DescribeCopyJob(copy_job_id.to_string()));
        if self.fail_describe {
            return Err(BackupError::remote("DescribeCopyJob", "ResourceNotFoundException"));
        }
        Ok(CopyJobDetails {
            source_vault_arn: SOURCE_VAULT.to_string(),
            source_recovery_point_arn: RECOVERY_POINT.to_string(),
        })
    }

    async fn delete_recovery_point(&self, backup_vault: &str, recovery_point_arn: &str) -> Result<()> {
        self.calls.lock().await.push(Call::DeleteRecoveryPoint {
            vault: backup_vault.to_string(),
            recovery_point_arn: recovery_point_arn.to_string(),
        });
        if self.fail_delete {
            return Err(BackupError::remote("DeleteRecoveryPoint", "InvalidRequestException"));
        }
        Ok(())
    }
}

fn test_config() -> HandlerConfig {
    HandlerConfig {
        region: "eu-west-2".to_string(),
        target_vault_arn: TARGET_VAULT.to_string(),
        iam_role_arn: IAM_ROLE.to_string(),
        tracing_enabled: false,
        cold_storage_after_days: 0,
        delete_after_days: 0,
    }
}

fn handler(backup: &RecordingBackup) -> BackupEventHandler<RecordingBackup> {
    BackupEventHandler::new(backup.clone(), test_config())
}

fn backup_job_event(resource_arn: &str) -> serde_json::Value {
    json!({
        "version": "0",
        "id": "b1c2d3e4-0000-1111-2222-333344445555",
        "detail-type": "Backup Job State Change",
        "source": "aws.backup",
        "region": "eu-west-2",
        "resources": [RECOVERY_POINT, "arn:aws:rds:eu-west-2:111122223333:snapshot:other"],
        "detail": {
            "backupJobId": "job-1234",
            "state": "COMPLETED",
            "resourceArn": resource_arn,
            "backupVaultArn": SOURCE_VAULT,
            "resourceType": "RDS"
        }
    })
}

fn copy_job_event(state: &str) -> serde_json::Value {
    json!({
        "id": "c1",
        "detail-type": "Copy Job State Change",
        "source": "aws.backup",
        "resources": [],
        "detail": { "state": state, "copyJobId": "copy-42" }
    })
}

#[tokio::test]
async fn test_rds_backup_completed_starts_one_copy_job() {
    let backup = RecordingBackup::default();
    let response = handler(&backup).handle(&backup_job_event(RDS_DB)).await;

    assert_eq!(response, HandlerResponse { status_code: 200 });
    let calls = backup.calls().await;
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        Call::StartCopyJob(request) => {
            assert_eq!(request.recovery_point_arn, RECOVERY_POINT);
            assert_eq!(request.source_vault, SOURCE_VAULT);
            assert_eq!(request.destination_vault_arn, TARGET_VAULT);
            assert_eq!(request.iam_role_arn, IAM_ROLE);
            assert_eq!(request.lifecycle, None);
            assert!(!request.idempotency_token.is_empty());
        }
        other => panic!("unexpected call: {:?}", other),
    }
}

#[tokio::test]
async fn test_dispatch_reports_started_copy_job_id() {
    let backup = RecordingBackup::default();
    let event: BackupNotification = serde_json::from_value(backup_job_event(RDS_DB)).unwrap();

    let outcome = handler(&backup).dispatch(&event).await;
    assert_eq!(
        outcome,
        DispatchOutcome::CopyStarted {
            copy_job_id: "copy-job-1".to_string()
        }
    );
}

#[tokio::test]
async fn test_non_rds_backup_is_skipped() {
    let backup = RecordingBackup::default();
    let h = handler(&backup);

    for resource in [
        "arn:aws:ec2:eu-west-2:111122223333:volume/vol-0abc",
        "arn:aws:dynamodb:eu-west-2:111122223333:table/orders",
        "arn:aws:elasticfilesystem:eu-west-2:111122223333:file-system/fs-1",
    ] {
        let event: BackupNotification = serde_json::from_value(backup_job_event(resource)).unwrap();
        assert_eq!(
            h.dispatch(&event).await,
            DispatchOutcome::CopySkipped {
                resource_arn: resource.to_string()
            }
        );
        assert_eq!(h.handle(&backup_job_event(resource)).await, HandlerResponse::ok());
    }

    assert!(backup.calls().await.is_empty());
}

#[tokio::test]
async fn test_failed_copy_start_still_succeeds() {
    let backup = RecordingBackup {
        fail_start: true,
        ..Default::default()
    };
    let h = handler(&backup);
    let event: BackupNotification = serde_json::from_value(backup_job_event(RDS_DB)).unwrap();

    assert_eq!(h.dispatch(&event).await, DispatchOutcome::CopyNotStarted);
    assert_eq!(h.handle(&backup_job_event(RDS_DB)).await, HandlerResponse::ok());
    assert_eq!(backup.calls().await.len(), 2);
}

#[tokio::test]
async fn test_idempotency_token_differs_per_copy() {
    let backup = RecordingBackup::default();
    let h = handler(&backup);

    h.handle(&backup_job_event(RDS_DB)).await;
    h.handle(&backup_job_event(RDS_DB)).await;
    h.copy_recovery_point(RECOVERY_POINT, SOURCE_VAULT, TARGET_VAULT).await;

    let tokens: Vec<String> = backup
        .calls()
        .await
        .into_iter()
        .filter_map(|call| match call {
            Call::StartCopyJob(request) => Some(request.idempotency_token),
            _ => None,
        })
        .collect();
    assert_eq!(tokens.len(), 3);
    assert_ne!(tokens[0], tokens[1]);
    assert_ne!(tokens[1], tokens[2]);
    assert_ne!(tokens[0], tokens[2]);
}

#[tokio::test]
async fn test_configured_lifecycle_is_sent() {
    let backup = RecordingBackup::default();
    let config = HandlerConfig {
        cold_storage_after_days: 30,
        delete_after_days: 365,
        ..test_config()
    };
    let h = BackupEventHandler::new(backup.clone(), config);

    h.handle(&backup_job_event(RDS_DB)).await;

    match &backup.calls().await[0] {
        Call::StartCopyJob(request) => {
            let lifecycle = request.lifecycle.expect("lifecycle should be set");
            assert_eq!(lifecycle.move_to_cold_storage_after_days, Some(30));
            assert_eq!(lifecycle.delete_after_days, Some(365));
        }
        other => panic!("unexpected call: {:?}", other),
    }
}

#[tokio::test]
async fn test_copy_completed_describes_then_deletes_source() {
    let backup = RecordingBackup::default();
    let response = handler(&backup).handle(&copy_job_event("COMPLETED")).await;

    assert_eq!(response, HandlerResponse::ok());
    assert_eq!(
        backup.calls().await,
        vec![
            Call::DescribeCopyJob("copy-42".to_string()),
            Call::DeleteRecoveryPoint {
                vault: SOURCE_VAULT.to_string(),
                recovery_point_arn: RECOVERY_POINT.to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_describe_failure_skips_delete() {
    let backup = RecordingBackup {
        fail_describe: true,
        ..Default::default()
    };
    let h = handler(&backup);

    assert_eq!(
        h.delete_recovery_point("copy-42").await,
        DispatchOutcome::CleanupLookupFailed
    );
    assert_eq!(h.handle(&copy_job_event("COMPLETED")).await, HandlerResponse::ok());

    let calls = backup.calls().await;
    assert!(calls
        .iter()
        .all(|call| matches!(call, Call::DescribeCopyJob(_))));
}

#[tokio::test]
async fn test_delete_failure_still_succeeds() {
    let backup = RecordingBackup {
        fail_delete: true,
        ..Default::default()
    };
    let h = handler(&backup);

    assert_eq!(
        h.delete_recovery_point("copy-42").await,
        DispatchOutcome::CleanupDeleteFailed {
            recovery_point_arn: RECOVERY_POINT.to_string()
        }
    );
    assert_eq!(h.handle(&copy_job_event("COMPLETED")).await, HandlerResponse::ok());
    assert_eq!(backup.calls().await.len(), 4);
}

#[tokio::test]
async fn test_unrecognized_events_make_no_calls() {
    let backup = RecordingBackup::default();
    let h = handler(&backup);

    let mut running_backup = backup_job_event(RDS_DB);
    running_backup["detail"]["state"] = json!("RUNNING");

    let events = vec![
        copy_job_event("RUNNING"),
        copy_job_event("FAILED"),
        running_backup,
        json!({"detail-type": "Restore Job State Change", "detail": {"state": "COMPLETED"}}),
        json!({"detail-type": "Recovery Point State Change", "detail": {"state": "COMPLETED"}}),
        json!({"detail-type": "Copy Job State Change"}),
    ];

    for event in &events {
        assert_eq!(h.handle(event).await, HandlerResponse::ok());
    }
    assert!(backup.calls().await.is_empty());
}

#[tokio::test]
async fn test_malformed_events_make_no_calls() {
    let backup = RecordingBackup::default();
    let h = handler(&backup);

    let mut no_resources = backup_job_event(RDS_DB);
    no_resources["resources"] = json!([]);
    let mut no_vault = backup_job_event(RDS_DB);
    no_vault["detail"]
        .as_object_mut()
        .unwrap()
        .remove("backupVaultArn");
    let no_copy_job_id = json!({
        "detail-type": "Copy Job State Change",
        "detail": {"state": "COMPLETED"}
    });

    for event in [&no_resources, &no_vault, &no_copy_job_id] {
        let notification: BackupNotification = serde_json::from_value(event.clone()).unwrap();
        assert!(matches!(
            h.dispatch(&notification).await,
            DispatchOutcome::Malformed { .. }
        ));
        assert_eq!(h.handle(event).await, HandlerResponse::ok());
    }

    // not even a notification
    assert_eq!(h.handle(&json!({"hello": "world"})).await, HandlerResponse::ok());
    assert_eq!(h.handle(&json!([1, 2, 3])).await, HandlerResponse::ok());

    assert!(backup.calls().await.is_empty());
}

#[tokio::test]
async fn test_response_serializes_as_status_code() {
    let backup = RecordingBackup::default();
    let response = handler(&backup).handle(&copy_job_event("COMPLETED")).await;
    assert_eq!(serde_json::to_value(response).unwrap(), json!({"statusCode": 200}));
}
