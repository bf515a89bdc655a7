use crate::domain::model::CopyLifecycle;
use crate::utils::error::{BackupError, Result};
use crate::utils::validation::Validate;
use std::env;

pub const SERVICE_NAME: &str = "cross-account-backup-mgmt";

/// Process-wide settings, read once per execution environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    pub region: String,
    pub target_vault_arn: String,
    pub iam_role_arn: String,
    pub tracing_enabled: bool,
    pub cold_storage_after_days: i64,
    pub delete_after_days: i64,
}

impl HandlerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| BackupError::MissingConfigError {
                field: key.to_string(),
            })
        };

        Ok(Self {
            region: required("AWS_REGION")?,
            target_vault_arn: required("TARGET_VAULT_ARN")?,
            iam_role_arn: required("IAM_ROLE_ARN")?,
            tracing_enabled: tracing_enabled_from(&lookup),
            cold_storage_after_days: parse_days(&lookup, "COPY_COLD_STORAGE_AFTER_DAYS")?,
            delete_after_days: parse_days(&lookup, "COPY_DELETE_AFTER_DAYS")?,
        })
    }

    pub fn lifecycle(&self) -> Option<CopyLifecycle> {
        CopyLifecycle::from_days(self.cold_storage_after_days, self.delete_after_days)
    }
}

/// Reads only `ENABLE_XRAY`, so logging can start before the rest of the
/// configuration is loaded.
pub fn tracing_enabled_from_env() -> bool {
    tracing_enabled_from(&|key: &str| env::var(key).ok())
}

fn tracing_enabled_from<F>(lookup: &F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup("ENABLE_XRAY")
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

fn parse_days<F>(lookup: &F, key: &str) -> Result<i64>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(0),
        Some(raw) if raw.trim().is_empty() => Ok(0),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| BackupError::InvalidConfigValueError {
                field: key.to_string(),
                value: raw.clone(),
                reason: format!("Expected a whole number of days: {}", e),
            }),
    }
}

impl Validate for HandlerConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_aws_region("region", &self.region)?;
        validate_arn_service("target_vault_arn", &self.target_vault_arn, "backup")?;
        validate_arn_service("iam_role_arn", &self.iam_role_arn, "iam")?;
        validate_range("cold_storage_after_days", self.cold_storage_after_days, 0, 36500)?;
        validate_range("delete_after_days", self.delete_after_days, 0, 36500)?;

        tracing::info!("✅ Handler configuration validation passed");
        Ok(())
    }
}
