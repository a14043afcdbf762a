//! Image resize function entrypoint
//!
//! Wires the batch handler to the platform dispatch loop.
//!
//! Environment variables:
//! - DESTINATION_BUCKET: bucket resized images are written to (required)
//! - TARGET_WIDTH: output width in pixels (default: 300)
//! - JPEG_QUALITY: output JPEG quality 0-100 (default: 50)
//! - FAIL_FAST: abort the invocation on the first failing record (default: false)
//! - AWS_REGION / S3_ENDPOINT: storage connection settings

use image_resize::{
    NotificationBatch, ResizeConfig, ResizeHandler, ResizeResponse, S3ObjectStore, StorageConfig,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("image_resize=info".parse().expect("valid directive")),
        )
        .with_target(false)
        .without_time()
        .init();

    // Missing destination bucket fails the invocation before any I/O
    let config = ResizeConfig::from_env()?;
    info!(
        destination_bucket = %config.destination_bucket,
        target_width = config.target_width,
        jpeg_quality = config.jpeg_quality,
        fail_fast = config.fail_fast,
        "Configuration loaded"
    );

    let store = S3ObjectStore::connect(&StorageConfig::from_env()).await;
    let fail_fast = config.fail_fast;
    let handler = Arc::new(ResizeHandler::new(config, store));

    run(service_fn(move |event: LambdaEvent<NotificationBatch>| {
        let handler = handler.clone();
        async move {
            let report = handler.handle(event.payload).await?;
            Ok::<_, Error>(ResizeResponse::from_report(report, fail_fast))
        }
    }))
    .await
}
