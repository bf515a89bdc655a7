#[cfg(feature = "lambda")]
use cross_account_backup::config::tracing_enabled_from_env;
#[cfg(feature = "lambda")]
use cross_account_backup::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use cross_account_backup::{
    AwsBackupService, BackupEventHandler, HandlerConfig, HandlerResponse, SERVICE_NAME,
};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use tracing::Instrument;

#[cfg(feature = "lambda")]
async fn function_handler(
    event: LambdaEvent<serde_json::Value>,
    handler: &BackupEventHandler<AwsBackupService>,
) -> Result<HandlerResponse, Error> {
    let span = tracing::info_span!(
        "lambda_handler",
        service = SERVICE_NAME,
        request_id = %event.context.request_id,
        function_arn = %event.context.invoked_function_arn,
    );

    Ok(handler.handle(&event.payload).instrument(span).await)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger(tracing_enabled_from_env());

    // Configuration errors fail the cold start; nothing else fails an invocation.
    let config = HandlerConfig::from_env()
        .and_then(|config| config.validate().map(|()| config))
        .map_err(|e| {
            tracing::error!("❌ Configuration failed: {}", e);
            Box::new(e) as Box<dyn std::error::Error + Send + Sync>
        })?;

    let service = AwsBackupService::from_region(&config.region).await;
    let handler = BackupEventHandler::new(service, config);

    tracing::info!("Starting {} Lambda function", SERVICE_NAME);
    run(service_fn(|event| function_handler(event, &handler))).await
}
