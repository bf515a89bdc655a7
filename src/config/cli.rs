use clap::Parser;
use std::path::PathBuf;

/// Replays a saved AWS Backup notification through the handler.
#[derive(Debug, Clone, Parser)]
#[command(name = "cross-account-backup")]
#[command(about = "Replay AWS Backup events through the cross-account copy handler")]
pub struct CliConfig {
    /// Path to the event JSON (as delivered by EventBridge)
    #[arg(short, long)]
    pub event: PathBuf,

    /// Log the backup calls instead of sending them to AWS
    #[arg(long)]
    pub dry_run: bool,

    /// Source vault ARN reported by dry-run copy job lookups
    #[arg(long, requires = "dry_run")]
    pub source_vault: Option<String>,

    /// Source recovery point ARN reported by dry-run copy job lookups
    #[arg(long, requires = "dry_run")]
    pub source_recovery_point: Option<String>,

    /// Override TARGET_VAULT_ARN
    #[arg(long)]
    pub target_vault_arn: Option<String>,

    /// Override IAM_ROLE_ARN
    #[arg(long)]
    pub iam_role_arn: Option<String>,

    /// Override AWS_REGION
    #[arg(long)]
    pub region: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Command line overrides take precedence over the environment.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.lookup_with(key, |k| std::env::var(k).ok())
    }

    pub fn lookup_with<F>(&self, key: &str, env: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let overridden = match key {
            "TARGET_VAULT_ARN" => self.target_vault_arn.clone(),
            "IAM_ROLE_ARN" => self.iam_role_arn.clone(),
            "AWS_REGION" => self.region.clone(),
            _ => None,
        };
        overridden.or_else(|| env(key))
    }
}
