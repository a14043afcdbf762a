//! Transcode pipeline: decode, resize, re-encode
//!
//! Decodes an in-memory buffer with format auto-detection, resizes to a
//! fixed target width while preserving aspect ratio, and encodes the
//! result as JPEG. Resampling uses the Lanczos3 kernel.
//!
//! Uses `spawn_blocking` for the CPU-intensive work to avoid blocking the
//! async runtime.

use crate::config::{DEFAULT_JPEG_QUALITY, DEFAULT_TARGET_WIDTH};
use crate::error::{ResizeError, Result};
use bytes::Bytes;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageOutputFormat};
use std::io::Cursor;
use std::sync::Arc;
use tracing::debug;

/// Configuration for the transcode pipeline
#[derive(Clone, Debug)]
pub struct TranscodeConfig {
    /// Fixed output width in pixels
    pub target_width: u32,
    /// JPEG quality (0-100)
    pub jpeg_quality: u8,
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self {
            target_width: DEFAULT_TARGET_WIDTH,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Result of one transcode
#[derive(Debug)]
pub struct TranscodeResult {
    /// The resized image data as JPEG
    pub data: Bytes,
    /// Width of the output
    pub width: u32,
    /// Height of the output
    pub height: u32,
}

/// Image transcode processor
pub struct ImageProcessor {
    config: TranscodeConfig,
}

impl ImageProcessor {
    /// Create a new processor with the given configuration
    pub fn new(config: TranscodeConfig) -> Self {
        Self { config }
    }

    /// Create a processor with default configuration
    pub fn with_defaults() -> Self {
        Self::new(TranscodeConfig::default())
    }

    /// Transcode the given encoded image data (blocking version)
    ///
    /// **Note:** This method performs CPU-intensive operations and should
    /// not be called directly from async code. Use `transcode_async` instead.
    pub fn transcode(&self, encoded: &[u8]) -> Result<TranscodeResult> {
        let img =
            image::load_from_memory(encoded).map_err(|e| ResizeError::Decode(e.to_string()))?;

        let (orig_w, orig_h) = img.dimensions();
        debug!(
            original_width = orig_w,
            original_height = orig_h,
            "Decoded source image"
        );

        let (new_w, new_h) = self.scaled_dimensions(orig_w, orig_h);

        // Fixed-width resize; the source is scaled up or down as needed
        let resized = img.resize_exact(new_w, new_h, FilterType::Lanczos3);

        let data = self.encode_jpeg(&resized)?;

        debug!(
            width = new_w,
            height = new_h,
            size = data.len(),
            "Transcode complete"
        );

        Ok(TranscodeResult {
            data,
            width: new_w,
            height: new_h,
        })
    }

    /// Transcode asynchronously on the blocking thread pool
    ///
    /// Offloads the CPU-intensive decode/resize/encode to a dedicated
    /// thread, preventing the async runtime from being blocked.
    pub async fn transcode_async(self: Arc<Self>, encoded: Bytes) -> Result<TranscodeResult> {
        let processor = self.clone();

        tokio::task::spawn_blocking(move || processor.transcode(&encoded))
            .await
            .map_err(|e| ResizeError::Task(format!("transcode task panicked: {e}")))?
    }

    /// Output dimensions: fixed target width, height scaled proportionally
    fn scaled_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        let target = self.config.target_width;
        let ratio = f64::from(target) / f64::from(width);
        let scaled = (f64::from(height) * ratio).round() as u32;
        (target, scaled.max(1))
    }

    /// Encode image as JPEG
    fn encode_jpeg(&self, img: &DynamicImage) -> Result<Bytes> {
        let mut buf = Vec::new();
        let mut cursor = Cursor::new(&mut buf);

        img.write_to(&mut cursor, ImageOutputFormat::Jpeg(self.config.jpeg_quality))
            .map_err(|e| ResizeError::Encode(e.to_string()))?;

        Ok(Bytes::from(buf))
    }
}
