// Adapters layer: concrete BackupService implementations.

pub mod aws_backup;
pub mod dry_run;

pub use aws_backup::AwsBackupService;
pub use dry_run::DryRunBackupService;
