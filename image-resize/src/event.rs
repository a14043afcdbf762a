//! Typed notification payload for object-storage change events
//!
//! The wire format follows the S3 notification shape: a `Records` array
//! where each record carries the bucket name, object key and declared
//! byte size. Every wire field is optional; [`ObjectNotification`]
//! validates a record into the required fields on receipt.

use crate::error::{ResizeError, Result};
use serde::Deserialize;

/// One invocation's batch of object-storage change events
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NotificationBatch {
    #[serde(rename = "Records", default)]
    pub records: Vec<NotificationRecord>,
}

/// A single change-event record as delivered on the wire
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NotificationRecord {
    #[serde(default)]
    pub s3: StorageEntity,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct StorageEntity {
    #[serde(default)]
    pub bucket: BucketRecord,
    #[serde(default)]
    pub object: ObjectRecord,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct BucketRecord {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ObjectRecord {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub size: Option<i64>,
}

/// A validated change-event record
///
/// Required fields: source bucket and object key, both non-empty.
/// Optional: declared byte size (defaults to 0, used only as a buffer
/// capacity hint); a negative size is rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectNotification {
    /// Source bucket the object was written to
    pub bucket: String,
    /// Object key, reused unchanged as the destination key
    pub key: String,
    /// Declared size of the object in bytes
    pub size: u64,
}

impl TryFrom<&NotificationRecord> for ObjectNotification {
    type Error = ResizeError;

    fn try_from(record: &NotificationRecord) -> Result<Self> {
        let bucket = record
            .s3
            .bucket
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ResizeError::InvalidRecord("missing source bucket name".to_string()))?;

        let key = record
            .s3
            .object
            .key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ResizeError::InvalidRecord("missing object key".to_string()))?;

        let declared = record.s3.object.size.unwrap_or(0);
        let size = u64::try_from(declared).map_err(|_| {
            ResizeError::InvalidRecord(format!("negative object size {declared} for {key}"))
        })?;

        Ok(Self {
            bucket: bucket.to_string(),
            key: key.to_string(),
            size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(bucket: Option<&str>, key: Option<&str>, size: Option<i64>) -> NotificationRecord {
        NotificationRecord {
            s3: StorageEntity {
                bucket: BucketRecord {
                    name: bucket.map(str::to_string),
                },
                object: ObjectRecord {
                    key: key.map(str::to_string),
                    size,
                },
            },
        }
    }

    #[test]
    fn test_valid_record() {
        let notification =
            ObjectNotification::try_from(&record(Some("src"), Some("cat.png"), Some(40000)))
                .unwrap();
        assert_eq!(notification.bucket, "src");
        assert_eq!(notification.key, "cat.png");
        assert_eq!(notification.size, 40000);
    }

    #[test]
    fn test_missing_bucket_rejected() {
        let err = ObjectNotification::try_from(&record(None, Some("cat.png"), Some(1))).unwrap_err();
        assert!(matches!(err, ResizeError::InvalidRecord(_)));
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = ObjectNotification::try_from(&record(Some("src"), Some(""), Some(1))).unwrap_err();
        assert!(matches!(err, ResizeError::InvalidRecord(_)));
    }

    #[test]
    fn test_negative_size_rejected() {
        let err =
            ObjectNotification::try_from(&record(Some("src"), Some("cat.png"), Some(-1)))
                .unwrap_err();
        assert!(matches!(err, ResizeError::InvalidRecord(_)));
    }

    #[test]
    fn test_missing_size_defaults_to_zero() {
        let notification =
            ObjectNotification::try_from(&record(Some("src"), Some("cat.png"), None)).unwrap();
        assert_eq!(notification.size, 0);
    }

    #[test]
    fn test_parses_s3_notification_json() {
        let payload = r#"{
            "Records": [
                {
                    "eventVersion": "2.1",
                    "eventSource": "aws:s3",
                    "eventName": "ObjectCreated:Put",
                    "s3": {
                        "s3SchemaVersion": "1.0",
                        "bucket": { "name": "src", "arn": "arn:aws:s3:::src" },
                        "object": { "key": "cat.png", "size": 40000, "eTag": "d41d8cd9" }
                    }
                }
            ]
        }"#;

        let batch: NotificationBatch = serde_json::from_str(payload).unwrap();
        assert_eq!(batch.records.len(), 1);
        let notification = ObjectNotification::try_from(&batch.records[0]).unwrap();
        assert_eq!(notification.bucket, "src");
        assert_eq!(notification.key, "cat.png");
        assert_eq!(notification.size, 40000);
    }
}
