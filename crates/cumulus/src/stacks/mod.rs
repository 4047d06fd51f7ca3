//! Registered stack modules
//!
//! Stacks are registered here explicitly; the deploy command looks them
//! up by name. Each module owns its template builder and, where the
//! stack ships code, the pre-deploy/deploy hooks that build and upload
//! its artifacts.

pub mod devices_api;
pub mod push_notifications;
pub mod root;

use cumulus_build::BuildError;
use cumulus_cloud::{CloudError, DeployContext, StackRegistry};
use cumulus_template::TemplateError;

pub fn registry() -> StackRegistry {
    let mut registry = StackRegistry::new();
    registry.register(Box::new(root::RootStack));
    registry.register(Box::new(push_notifications::PushNotificationsStack));
    registry.register(Box::new(devices_api::DevicesApiStack));
    registry
}

/// Name of the versioned bucket the root stack provisions for build
/// artifacts.
pub(crate) fn artifacts_bucket(ctx: &DeployContext) -> String {
    format!("artifacts-{}-{}", ctx.region, ctx.account)
}

pub(crate) fn template_err(err: TemplateError) -> CloudError {
    CloudError::Template(err.to_string())
}

pub(crate) fn build_err(err: BuildError) -> CloudError {
    match err {
        BuildError::CommandFailed { command, code } => CloudError::CommandExit { command, code },
        BuildError::CommandKilled { command } => CloudError::CommandExit { command, code: 1 },
        BuildError::ArtifactNotFound(path) => {
            CloudError::ArtifactNotFound(path.display().to_string())
        }
        BuildError::Io(err) => CloudError::Io(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_stacks_are_registered() {
        let registry = registry();
        assert_eq!(
            registry.names(),
            vec!["apidevices", "pushnotifications", "root"]
        );
    }

    #[test]
    fn every_registered_template_serializes() {
        let registry = registry();
        for name in registry.names() {
            let body = registry
                .get(name)
                .unwrap()
                .template_body()
                .unwrap_or_else(|e| panic!("stack {name} failed to serialize: {e}"));
            assert!(body.contains("Resources"), "{name} has no resources");
        }
    }

    #[test]
    fn artifacts_bucket_is_scoped_by_region_and_account() {
        let ctx = DeployContext::new("eu-west-1", "123456789012", "root");
        assert_eq!(
            artifacts_bucket(&ctx),
            "artifacts-eu-west-1-123456789012"
        );
    }
}
