//! AWS backends for Cumulus
//!
//! Implements [`cumulus_cloud::StackService`] over CloudFormation and
//! [`cumulus_cloud::ArtifactStore`] over versioned S3 buckets.

pub mod artifact_store;
pub mod stack_service;

pub use artifact_store::AwsArtifactStore;
pub use stack_service::AwsStackService;

use aws_config::Region;

/// Load shared AWS configuration for a region. Credentials come from
/// the default provider chain (environment, profile, instance role).
pub async fn load_config(region: &str) -> aws_config::SdkConfig {
    aws_config::from_env()
        .region(Region::new(region.to_string()))
        .load()
        .await
}
