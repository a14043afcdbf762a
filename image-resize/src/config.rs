//! Configuration for the image-resize function
//!
//! The destination bucket has no usable default and must be provided.
//! Everything else falls back to the reference pipeline settings:
//! 300 pixels wide, JPEG quality 50, per-record error isolation.

use crate::error::{ResizeError, Result};

/// Default target width in pixels
pub const DEFAULT_TARGET_WIDTH: u32 = 300;
/// Default JPEG quality (0-100)
pub const DEFAULT_JPEG_QUALITY: u8 = 50;

/// Handler configuration
#[derive(Clone, Debug)]
pub struct ResizeConfig {
    /// Bucket resized images are written to
    pub destination_bucket: String,
    /// Fixed output width; height is derived from the source aspect ratio
    pub target_width: u32,
    /// JPEG quality for the re-encoded output (0-100)
    pub jpeg_quality: u8,
    /// Abort the whole invocation on the first failing record instead of
    /// recording per-record outcomes. Reproduces the legacy all-or-nothing
    /// behavior for compatibility testing.
    pub fail_fast: bool,
}

impl ResizeConfig {
    /// Create a configuration with default pipeline settings
    pub fn new(destination_bucket: impl Into<String>) -> Result<Self> {
        let config = Self {
            destination_bucket: destination_bucket.into(),
            target_width: DEFAULT_TARGET_WIDTH,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            fail_fast: false,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    ///
    /// - `DESTINATION_BUCKET`: required, non-empty
    /// - `TARGET_WIDTH`: optional, default 300
    /// - `JPEG_QUALITY`: optional, default 50
    /// - `FAIL_FAST`: optional, default false
    pub fn from_env() -> Result<Self> {
        let destination_bucket = std::env::var("DESTINATION_BUCKET")
            .map_err(|_| ResizeError::Configuration("DESTINATION_BUCKET not set".to_string()))?;

        let target_width = parse_var("TARGET_WIDTH", DEFAULT_TARGET_WIDTH)?;
        let jpeg_quality = parse_var("JPEG_QUALITY", DEFAULT_JPEG_QUALITY)?;
        let fail_fast = parse_var("FAIL_FAST", false)?;

        let config = Self {
            destination_bucket,
            target_width,
            jpeg_quality,
            fail_fast,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.destination_bucket.trim().is_empty() {
            return Err(ResizeError::Configuration(
                "destination bucket must not be empty".to_string(),
            ));
        }
        if self.target_width == 0 {
            return Err(ResizeError::Configuration(
                "target width must be at least 1".to_string(),
            ));
        }
        if self.jpeg_quality > 100 {
            return Err(ResizeError::Configuration(format!(
                "JPEG quality must be 0-100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ResizeError::Configuration(format!("invalid value for {name}: {raw}"))),
        Err(_) => Ok(default),
    }
}
