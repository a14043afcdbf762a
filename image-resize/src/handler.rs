//! Batch handler for object-storage change notifications
//!
//! For each record in the batch: fetch the source object, transcode it,
//! and write the result to the destination bucket under the same key.
//! Records are processed strictly in order and independently of each
//! other.
//!
//! Failure handling has two modes. The default records each record's
//! outcome and reports a summary. With `fail_fast` set, the first failure
//! aborts the whole invocation and no partial result is reported, which
//! reproduces the legacy behavior.

use crate::config::ResizeConfig;
use crate::error::{ResizeError, Result};
use crate::event::{NotificationBatch, NotificationRecord, ObjectNotification};
use crate::processor::{ImageProcessor, TranscodeConfig};
use crate::storage::ObjectStore;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Summary reported when every record in the batch succeeded
pub const SUCCESS_STATUS: &str = "Resize successful";

/// Per-record outcome
#[derive(Debug, Serialize)]
pub struct RecordOutcome {
    /// Source bucket, when the record named one
    pub bucket: String,
    /// Object key, when the record named one
    pub key: String,
    /// Error message for a failed record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Output width for a succeeded record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Output height for a succeeded record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl RecordOutcome {
    fn success(notification: &ObjectNotification, width: u32, height: u32) -> Self {
        Self {
            bucket: notification.bucket.clone(),
            key: notification.key.clone(),
            error: None,
            width: Some(width),
            height: Some(height),
        }
    }

    fn failure(bucket: String, key: String, error: &ResizeError) -> Self {
        Self {
            bucket,
            key,
            error: Some(error.to_string()),
            width: None,
            height: None,
        }
    }
}

/// Serialized invocation result
///
/// The default mode returns the full structured report. Fail-fast mode
/// returns the bare summary string, matching the legacy pipeline's
/// return value exactly.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ResizeResponse {
    Status(String),
    Report(ResizeReport),
}

impl ResizeResponse {
    /// Shape a report for the invoking platform
    pub fn from_report(report: ResizeReport, fail_fast: bool) -> Self {
        if fail_fast {
            Self::Status(report.status)
        } else {
            Self::Report(report)
        }
    }
}

/// Invocation result: per-record outcomes plus a summary line
#[derive(Debug, Serialize)]
pub struct ResizeReport {
    /// `"Resize successful"` when everything succeeded, otherwise
    /// `"N succeeded, M failed"`
    pub status: String,
    pub succeeded: usize,
    pub failed: usize,
    pub outcomes: Vec<RecordOutcome>,
}

impl ResizeReport {
    fn from_outcomes(outcomes: Vec<RecordOutcome>) -> Self {
        let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
        let succeeded = outcomes.len() - failed;
        let status = if failed == 0 {
            SUCCESS_STATUS.to_string()
        } else {
            format!("{succeeded} succeeded, {failed} failed")
        };
        Self {
            status,
            succeeded,
            failed,
            outcomes,
        }
    }
}

/// Image transcode handler
pub struct ResizeHandler<S> {
    store: S,
    processor: Arc<ImageProcessor>,
    config: ResizeConfig,
}

impl<S: ObjectStore> ResizeHandler<S> {
    /// Create a handler with the given configuration and storage backend
    pub fn new(config: ResizeConfig, store: S) -> Self {
        let processor = Arc::new(ImageProcessor::new(TranscodeConfig {
            target_width: config.target_width,
            jpeg_quality: config.jpeg_quality,
        }));
        Self {
            store,
            processor,
            config,
        }
    }

    /// Process one notification batch
    ///
    /// Returns `Err` only for a first failure in fail-fast mode; otherwise
    /// failures are captured in the report. An empty batch succeeds
    /// without touching storage.
    pub async fn handle(&self, batch: NotificationBatch) -> Result<ResizeReport> {
        let mut outcomes = Vec::with_capacity(batch.records.len());

        for record in &batch.records {
            let notification = match ObjectNotification::try_from(record) {
                Ok(notification) => notification,
                Err(e) => {
                    if self.config.fail_fast {
                        return Err(e);
                    }
                    warn!(error = %e, "Skipping invalid notification record");
                    let (bucket, key) = raw_location(record);
                    outcomes.push(RecordOutcome::failure(bucket, key, &e));
                    continue;
                }
            };

            match self.process_one(&notification).await {
                Ok((width, height)) => {
                    info!(
                        bucket = %notification.bucket,
                        key = %notification.key,
                        destination = %self.config.destination_bucket,
                        width,
                        height,
                        "Resized object"
                    );
                    outcomes.push(RecordOutcome::success(&notification, width, height));
                }
                Err(e) => {
                    if self.config.fail_fast {
                        return Err(e);
                    }
                    warn!(
                        bucket = %notification.bucket,
                        key = %notification.key,
                        error = %e,
                        "Failed to resize object"
                    );
                    outcomes.push(RecordOutcome::failure(
                        notification.bucket.clone(),
                        notification.key.clone(),
                        &e,
                    ));
                }
            }
        }

        Ok(ResizeReport::from_outcomes(outcomes))
    }

    /// Fetch, transcode and write a single object
    ///
    /// The destination key is always the source key; only the bucket
    /// changes.
    async fn process_one(&self, notification: &ObjectNotification) -> Result<(u32, u32)> {
        let encoded = self
            .store
            .get(
                &notification.bucket,
                &notification.key,
                notification.size as usize,
            )
            .await?;

        let result = self.processor.clone().transcode_async(encoded).await?;

        self.store
            .put(
                &self.config.destination_bucket,
                &notification.key,
                result.data,
                "image/jpeg",
            )
            .await?;

        Ok((result.width, result.height))
    }
}

/// Best-effort source location for reporting on records that failed
/// validation
fn raw_location(record: &NotificationRecord) -> (String, String) {
    (
        record.s3.bucket.name.clone().unwrap_or_default(),
        record.s3.object.key.clone().unwrap_or_default(),
    )
}
