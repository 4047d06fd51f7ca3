//! Stack modules and the explicit registry
//!
//! Each deployable stack is a [`StackModule`]: a template-producing
//! function plus three optional lifecycle hooks. Modules are selected
//! through a [`StackRegistry`] built at startup, not resolved at runtime
//! by name.

use crate::error::Result;
use crate::model::DeployParameter;
use crate::service::ArtifactStore;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Account/region scope a deployment runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployContext {
    pub region: String,
    pub account: String,
    pub stack_name: String,
}

impl DeployContext {
    pub fn new(
        region: impl Into<String>,
        account: impl Into<String>,
        stack_name: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            account: account.into(),
            stack_name: stack_name.into(),
        }
    }
}

/// A deployable stack: template body plus optional lifecycle hooks.
///
/// Hooks couple to the driver only through the ordered parameter lists
/// they return; the driver concatenates them in invocation order
/// (pre-deploy first, then deploy) before submission.
#[async_trait]
pub trait StackModule: Send + Sync {
    /// Registry key, also used as the stack name.
    fn name(&self) -> &str;

    /// Serialize the stack's resource graph to the document body.
    fn template_body(&self) -> Result<String>;

    /// Run local build commands. A non-zero exit fails the whole
    /// deployment with that exit code before anything is submitted.
    async fn pre_deploy(&self, _ctx: &DeployContext) -> Result<Vec<DeployParameter>> {
        Ok(Vec::new())
    }

    /// Upload build artifacts and return their location references.
    async fn deploy(
        &self,
        _ctx: &DeployContext,
        _store: &dyn ArtifactStore,
    ) -> Result<Vec<DeployParameter>> {
        Ok(Vec::new())
    }

    /// Runs after the submission flow completes.
    async fn post_deploy(&self, _ctx: &DeployContext) -> Result<()> {
        Ok(())
    }
}

/// Lookup table from stack name to module.
#[derive(Default)]
pub struct StackRegistry {
    modules: BTreeMap<String, Box<dyn StackModule>>,
}

impl StackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, module: Box<dyn StackModule>) {
        self.modules.insert(module.name().to_string(), module);
    }

    pub fn get(&self, name: &str) -> Option<&dyn StackModule> {
        self.modules.get(name).map(Box::as_ref)
    }

    /// Registered stack names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.modules.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy(&'static str);

    #[async_trait]
    impl StackModule for Dummy {
        fn name(&self) -> &str {
            self.0
        }

        fn template_body(&self) -> Result<String> {
            Ok(String::new())
        }
    }

    #[test]
    fn registry_lookup_and_names() {
        let mut registry = StackRegistry::new();
        registry.register(Box::new(Dummy("root")));
        registry.register(Box::new(Dummy("apidevices")));

        assert!(registry.get("root").is_some());
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.names(), vec!["apidevices", "root"]);
    }
}
