use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload of '{key}' failed: {message}")]
    Upload { key: String, message: String },
}

/// Durable home for compiled artifacts. Returns a retrieval URL per upload.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn upload(&self, key: &str, bytes: Vec<u8>) -> Result<String, StorageError>;
}

/// S3 / MinIO backed store. URLs are path-style: `<public_base_url>/<bucket>/<key>`.
pub struct S3ArtifactStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3ArtifactStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String, public_base_url: String) -> Self {
        Self {
            client,
            bucket,
            public_base_url,
        }
    }

    fn object_url(&self, key: &str) -> String {
        object_url(&self.public_base_url, &self.bucket, key)
    }
}

#[async_trait]
impl ArtifactStore for S3ArtifactStore {
    async fn upload(&self, key: &str, bytes: Vec<u8>) -> Result<String, StorageError> {
        let size = bytes.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type("application/pdf")
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::Upload {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        info!("Uploaded {} ({} bytes) to bucket {}", key, size, self.bucket);
        Ok(self.object_url(key))
    }
}

fn object_url(base: &str, bucket: &str, key: &str) -> String {
    format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        bucket,
        key.trim_start_matches('/')
    )
}
