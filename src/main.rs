use anyhow::Context;
use clap::Parser;
use cross_account_backup::config::load_event_file;
use cross_account_backup::utils::{logger, validation::Validate};
use cross_account_backup::{
    AwsBackupService, BackupEventHandler, BackupService, CliConfig, DryRunBackupService,
    HandlerConfig, SERVICE_NAME,
};
use tracing::Instrument;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting {} local replay", SERVICE_NAME);
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match HandlerConfig::from_lookup(|key| cli.lookup(key)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e);
            eprintln!("💡 Set AWS_REGION, TARGET_VAULT_ARN and IAM_ROLE_ARN or pass the matching flags");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let event = load_event_file(&cli.event)
        .with_context(|| format!("failed to load event from {}", cli.event.display()))?;

    let response = if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no AWS Backup calls will be made");
        let service = DryRunBackupService::new()
            .with_source(cli.source_vault.clone(), cli.source_recovery_point.clone());
        replay(service, config, &event).await
    } else {
        let service = AwsBackupService::from_region(&config.region).await;
        replay(service, config, &event).await
    };

    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

async fn replay<B: BackupService>(
    service: B,
    config: HandlerConfig,
    event: &serde_json::Value,
) -> cross_account_backup::HandlerResponse {
    let handler = BackupEventHandler::new(service, config);
    let span = tracing::info_span!("replay", service = SERVICE_NAME);
    let response = handler.handle(event).instrument(span).await;
    tracing::info!("✅ Event processed (statusCode {})", response.status_code);
    response
}
