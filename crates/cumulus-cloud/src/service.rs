//! Provisioning service and artifact store traits
//!
//! The AWS implementations live in `cumulus-cloud-aws`; tests use
//! in-memory fakes.

use crate::error::Result;
use crate::model::{ChangeSetInfo, CreateChangeSet, StackSummary};
use async_trait::async_trait;

/// The remote provisioning service: stack enumeration plus the
/// change-set lifecycle operations.
#[async_trait]
pub trait StackService: Send + Sync {
    /// Enumerate all stacks visible in the account/region scope.
    async fn list_stacks(&self) -> Result<Vec<StackSummary>>;

    /// Submit a change set. Returns the service-assigned change set id.
    async fn create_change_set(&self, request: &CreateChangeSet) -> Result<String>;

    /// Fetch the current description of a change set.
    async fn describe_change_set(
        &self,
        stack_name: &str,
        change_set_name: &str,
    ) -> Result<ChangeSetInfo>;

    /// Apply a change set that has reached `CREATE_COMPLETE`.
    async fn execute_change_set(&self, stack_name: &str, change_set_name: &str) -> Result<()>;
}

/// Versioned content store for build artifacts.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Upload an object and return its version identifier.
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<String>;
}
