//! S3-backed artifact store
//!
//! Uploads go to a versioned bucket; the returned version id is passed
//! to the template as a parameter so Lambda picks up the exact build.

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use cumulus_cloud::{ArtifactStore, CloudError, Result};

pub struct AwsArtifactStore {
    client: aws_sdk_s3::Client,
}

impl AwsArtifactStore {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_s3::Client::new(config),
        }
    }
}

#[async_trait]
impl ArtifactStore for AwsArtifactStore {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<String> {
        tracing::info!(%bucket, %key, bytes = body.len(), "uploading artifact");

        let resp = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| CloudError::ArtifactStore(format!("{}", DisplayErrorContext(e))))?;

        resp.version_id()
            .map(str::to_string)
            .ok_or_else(|| {
                CloudError::ArtifactStore(format!(
                    "bucket {bucket} returned no version id; is versioning enabled?"
                ))
            })
    }
}
