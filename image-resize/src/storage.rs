//! Object storage access
//!
//! The handler talks to storage through the [`ObjectStore`] trait so the
//! batch pipeline can be tested against an in-memory double. The real
//! implementation wraps the AWS S3 client.

use crate::error::{ResizeError, Result};
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use tracing::debug;

/// Byte-oriented get/put by bucket and key
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the full object into memory
    ///
    /// `size_hint` is the declared object size from the notification and
    /// is used to pre-size the read buffer.
    async fn get(&self, bucket: &str, key: &str, size_hint: usize) -> Result<Bytes>;

    /// Write the object, overwriting any existing value at the key
    async fn put(&self, bucket: &str, key: &str, data: Bytes, content_type: &str) -> Result<()>;
}

// Lets callers share one store between the handler and other owners.
#[async_trait]
impl<T: ObjectStore + ?Sized> ObjectStore for std::sync::Arc<T> {
    async fn get(&self, bucket: &str, key: &str, size_hint: usize) -> Result<Bytes> {
        (**self).get(bucket, key, size_hint).await
    }

    async fn put(&self, bucket: &str, key: &str, data: Bytes, content_type: &str) -> Result<()> {
        (**self).put(bucket, key, data, content_type).await
    }
}

/// Connection settings for the S3 client
#[derive(Clone, Debug, Default)]
pub struct StorageConfig {
    /// AWS region; falls back to the SDK's default chain when unset
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible storage (MinIO, LocalStack)
    pub endpoint: Option<String>,
}

impl StorageConfig {
    /// Load connection settings from `AWS_REGION` / `S3_ENDPOINT`
    pub fn from_env() -> Self {
        Self {
            region: std::env::var("AWS_REGION").ok(),
            endpoint: std::env::var("S3_ENDPOINT").ok(),
        }
    }
}

/// S3-backed object store
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    /// Wrap an existing S3 client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build an S3 client from the default credential chain
    ///
    /// Region and endpoint come from `config`; credentials come from the
    /// environment the platform provides to the function.
    pub async fn connect(config: &StorageConfig) -> Self {
        use aws_sdk_s3::config::Region;

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }

        // Custom endpoint for S3-compatible storage like MinIO
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let aws_config = loader.load().await;
        Self::new(Client::new(&aws_config))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get(&self, bucket: &str, key: &str, size_hint: usize) -> Result<Bytes> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| ResizeError::Fetch(format!("{bucket}/{key}: {e}")))?;

        let mut buf = Vec::with_capacity(size_hint);
        let mut body = response.body;
        while let Some(chunk) = body
            .try_next()
            .await
            .map_err(|e| ResizeError::Fetch(format!("{bucket}/{key}: {e}")))?
        {
            buf.extend_from_slice(&chunk);
        }

        debug!(bucket = %bucket, key = %key, size = buf.len(), "Fetched object");
        Ok(Bytes::from(buf))
    }

    async fn put(&self, bucket: &str, key: &str, data: Bytes, content_type: &str) -> Result<()> {
        let size = data.len();
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| ResizeError::Write(format!("{bucket}/{key}: {e}")))?;

        debug!(bucket = %bucket, key = %key, size = size, "Wrote object");
        Ok(())
    }
}
