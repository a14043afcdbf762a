//! Image resize example function
//!
//! Triggered by object-storage change events. For each notification in a
//! batch, fetches the source object, decodes it, resizes to a fixed
//! width preserving aspect ratio, re-encodes as JPEG and writes the
//! result to a configured destination bucket under the same key.

pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod processor;
pub mod storage;

// Public re-exports
pub use config::ResizeConfig;
pub use error::{ResizeError, Result};
pub use event::{NotificationBatch, ObjectNotification};
pub use handler::{RecordOutcome, ResizeHandler, ResizeReport, ResizeResponse, SUCCESS_STATUS};
pub use processor::{ImageProcessor, TranscodeConfig, TranscodeResult};
pub use storage::{ObjectStore, S3ObjectStore, StorageConfig};
