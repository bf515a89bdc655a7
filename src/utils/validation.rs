use crate::domain::model::arn_service;
use crate::utils::error::{BackupError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BackupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(BackupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(BackupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}

/// Checks that `arn` starts with `arn:` and names the expected service.
pub fn validate_arn_service(field_name: &str, arn: &str, service: &str) -> Result<()> {
    validate_non_empty_string(field_name, arn)?;

    if !arn.starts_with("arn:") {
        return Err(BackupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: arn.to_string(),
            reason: "Value must be an ARN (arn:partition:service:...)".to_string(),
        });
    }

    match arn_service(arn) {
        Some(found) if found == service => Ok(()),
        found => Err(BackupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: arn.to_string(),
            reason: format!(
                "Expected a {} ARN, got service '{}'",
                service,
                found.unwrap_or_default()
            ),
        }),
    }
}
