//! Cumulus deployment core
//!
//! This crate owns the change-set based deployment lifecycle: which
//! change-set type to submit, how change sets are named, how hook
//! parameters are assembled, and the bounded wait for change-set
//! readiness. The provisioning service itself is behind the
//! [`StackService`] trait so the whole lifecycle is testable without
//! touching AWS.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 cumulus CLI                   │
//! │         (deploy / template / stacks)          │
//! └──────────────────┬───────────────────────────┘
//!                    │
//! ┌──────────────────▼───────────────────────────┐
//! │               cumulus-cloud                   │
//! │  StackModule registry ──▶ Deployer            │
//! │  trait StackService / trait ArtifactStore     │
//! └──────────────────┬───────────────────────────┘
//!                    │
//!         ┌──────────▼──────────┐
//!         │  cumulus-cloud-aws  │
//!         │ (CloudFormation/S3) │
//!         └─────────────────────┘
//! ```

pub mod deploy;
pub mod error;
pub mod model;
pub mod module;
pub mod service;

// Re-exports
pub use deploy::{DeployOutcome, Deployer, WaitConfig};
pub use error::{CloudError, Result};
pub use model::{
    ChangeSetInfo, ChangeSetStatus, ChangeSetType, CreateChangeSet, DeployParameter,
    ResourceChange, StackStatus, StackSummary, CAPABILITY_NAMED_IAM,
};
pub use module::{DeployContext, StackModule, StackRegistry};
pub use service::{ArtifactStore, StackService};
