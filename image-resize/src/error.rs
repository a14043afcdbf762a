//! Error types for the image-resize function

use thiserror::Error;

/// Result type for image-resize operations
pub type Result<T> = std::result::Result<T, ResizeError>;

/// Everything that can go wrong while processing a notification batch.
///
/// Each variant maps to one step of the pipeline, so a failed invocation
/// names the step that broke, not just that something did.
#[derive(Error, Debug)]
pub enum ResizeError {
    /// Required configuration missing or unusable
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Notification record missing a required field
    #[error("Invalid notification record: {0}")]
    InvalidRecord(String),

    /// Storage read failed
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Buffer did not decode as a supported image format
    #[error("Decode failed: {0}")]
    Decode(String),

    /// JPEG encoding failed
    #[error("Encode failed: {0}")]
    Encode(String),

    /// Storage write failed
    #[error("Write failed: {0}")]
    Write(String),

    /// Blocking transcode task panicked
    #[error("Transcode task failed: {0}")]
    Task(String),
}
