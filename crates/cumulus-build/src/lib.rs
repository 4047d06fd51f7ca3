//! Cumulus artifact preparation
//!
//! Pre-deploy hooks shell out to the component's own build tooling
//! (yarn, gradle) and then load the produced archive for upload to the
//! artifacts bucket.

pub mod artifact;
pub mod error;
pub mod runner;

pub use artifact::read_artifact;
pub use error::{BuildError, Result};
pub use runner::{run_command, run_commands};
