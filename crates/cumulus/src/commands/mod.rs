pub mod deploy;
pub mod stacks;
pub mod template;

use anyhow::Context;
use cumulus_cloud::{CloudError, StackRegistry};

pub(crate) fn lookup<'a>(
    registry: &'a StackRegistry,
    stack: &str,
) -> anyhow::Result<&'a dyn cumulus_cloud::StackModule> {
    registry
        .get(stack)
        .ok_or_else(|| CloudError::StackNotRegistered(stack.to_string()))
        .with_context(|| format!("available stacks: {}", registry.names().join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stacks::registry;

    #[test]
    fn unknown_stack_is_a_registration_error() {
        let registry = registry();
        let err = lookup(&registry, "nonexistent").err().unwrap();

        assert!(matches!(
            err.downcast_ref::<CloudError>(),
            Some(CloudError::StackNotRegistered(name)) if name == "nonexistent"
        ));
        let rendered = format!("{err:#}");
        assert!(rendered.contains("unknown stack 'nonexistent'"));
        assert!(rendered.contains("available stacks: apidevices, pushnotifications, root"));
    }

    #[test]
    fn registered_stack_resolves() {
        let registry = registry();
        assert_eq!(lookup(&registry, "root").unwrap().name(), "root");
    }
}
