//! Change-set deployment driver
//!
//! The lifecycle, in order: run the module's pre-deploy and deploy hooks
//! (concatenating their parameter lists), look up whether the target
//! stack already exists, submit a change set of the appropriate type,
//! report its description, and, when execution was requested, wait for
//! the change set to become ready and apply it. Any failure aborts the
//! run; rollback is the provisioning service's own responsibility.

use crate::error::{CloudError, Result};
use crate::model::{
    ChangeSetInfo, ChangeSetStatus, ChangeSetType, CreateChangeSet, DeployParameter, StackStatus,
    StackSummary, CAPABILITY_NAMED_IAM,
};
use crate::module::{DeployContext, StackModule};
use crate::service::{ArtifactStore, StackService};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Bound on the wait for change-set creation.
#[derive(Debug, Clone)]
pub struct WaitConfig {
    pub poll_interval: Duration,
    pub max_wait: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            max_wait: Duration::from_secs(600),
        }
    }
}

/// What a deployment run produced.
#[derive(Debug, Clone)]
pub struct DeployOutcome {
    pub stack_name: String,
    pub change_set_name: String,
    pub change_set_type: ChangeSetType,
    pub parameters: Vec<DeployParameter>,
    pub description: ChangeSetInfo,
    pub executed: bool,
}

/// Derive a per-submission unique change-set name from the stack name
/// and the submission timestamp.
pub fn change_set_name(stack_name: &str, submitted_at: DateTime<Utc>) -> String {
    format!("{}-{}", stack_name, submitted_at.timestamp())
}

/// Pick the change-set type for the target stack.
///
/// A stack stuck in `REVIEW_IN_PROGRESS` cannot be updated normally, so
/// it counts as absent and a fresh `CREATE` is submitted. The orphaned
/// review stack is left in place.
pub fn change_set_type(existing: Option<&StackSummary>) -> ChangeSetType {
    match existing {
        Some(stack) if stack.status == StackStatus::ReviewInProgress => {
            tracing::warn!(
                stack = %stack.name,
                "stack is in review; treating it as absent and creating fresh"
            );
            ChangeSetType::Create
        }
        Some(_) => ChangeSetType::Update,
        None => ChangeSetType::Create,
    }
}

pub struct Deployer<'a> {
    service: &'a dyn StackService,
    store: &'a dyn ArtifactStore,
    wait: WaitConfig,
}

impl<'a> Deployer<'a> {
    pub fn new(service: &'a dyn StackService, store: &'a dyn ArtifactStore) -> Self {
        Self {
            service,
            store,
            wait: WaitConfig::default(),
        }
    }

    pub fn with_wait(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }

    /// Run the full deployment lifecycle for one stack module.
    pub async fn deploy(
        &self,
        module: &dyn StackModule,
        ctx: &DeployContext,
        execute: bool,
    ) -> Result<DeployOutcome> {
        let template_body = module.template_body()?;

        tracing::info!(stack = %ctx.stack_name, "running pre-deploy hook");
        let mut parameters = module.pre_deploy(ctx).await?;

        tracing::info!(stack = %ctx.stack_name, "running deploy hook");
        parameters.extend(module.deploy(ctx, self.store).await?);

        tracing::info!(stack = %ctx.stack_name, "looking for existing stack");
        let stacks = self.service.list_stacks().await?;
        let existing = stacks.iter().find(|s| s.name == ctx.stack_name);
        let change_set_type = change_set_type(existing);

        let name = change_set_name(&ctx.stack_name, Utc::now());
        tracing::info!(
            change_set = %name,
            kind = %change_set_type,
            "creating change set"
        );
        self.service
            .create_change_set(&CreateChangeSet {
                stack_name: ctx.stack_name.clone(),
                change_set_name: name.clone(),
                change_set_type,
                template_body,
                parameters: parameters.clone(),
                capabilities: vec![CAPABILITY_NAMED_IAM.to_string()],
            })
            .await?;

        let mut description = self
            .service
            .describe_change_set(&ctx.stack_name, &name)
            .await?;

        let mut executed = false;
        if execute {
            tracing::info!(change_set = %name, "waiting for change set creation");
            description = self.wait_until_ready(&ctx.stack_name, &name).await?;

            tracing::info!(change_set = %name, "executing change set");
            self.service
                .execute_change_set(&ctx.stack_name, &name)
                .await?;
            executed = true;
        }

        module.post_deploy(ctx).await?;

        Ok(DeployOutcome {
            stack_name: ctx.stack_name.clone(),
            change_set_name: name,
            change_set_type,
            parameters,
            description,
            executed,
        })
    }

    /// Poll until the change set reaches `CREATE_COMPLETE`, up to the
    /// configured bound.
    async fn wait_until_ready(
        &self,
        stack_name: &str,
        change_set_name: &str,
    ) -> Result<ChangeSetInfo> {
        let started = Instant::now();
        loop {
            let info = self
                .service
                .describe_change_set(stack_name, change_set_name)
                .await?;
            match info.status {
                ChangeSetStatus::CreateComplete => return Ok(info),
                ChangeSetStatus::Failed => {
                    return Err(CloudError::ChangeSetFailed {
                        name: change_set_name.to_string(),
                        reason: info
                            .status_reason
                            .unwrap_or_else(|| "no reason reported".to_string()),
                    })
                }
                _ => {}
            }

            if started.elapsed() >= self.wait.max_wait {
                return Err(CloudError::WaitTimeout {
                    name: change_set_name.to_string(),
                    elapsed: started.elapsed(),
                });
            }
            sleep(self.wait.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeService {
        stacks: Vec<StackSummary>,
        created: Mutex<Vec<CreateChangeSet>>,
        executed: Mutex<Vec<String>>,
        // statuses returned by successive describe calls; the last one
        // repeats once exhausted
        describe_statuses: Vec<ChangeSetStatus>,
        describe_calls: Mutex<usize>,
    }

    impl FakeService {
        fn with_stacks(stacks: Vec<StackSummary>) -> Self {
            Self {
                stacks,
                describe_statuses: vec![ChangeSetStatus::CreateComplete],
                ..Default::default()
            }
        }

        fn with_describe_sequence(mut self, statuses: Vec<ChangeSetStatus>) -> Self {
            self.describe_statuses = statuses;
            self
        }

        fn created_requests(&self) -> Vec<CreateChangeSet> {
            self.created.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StackService for FakeService {
        async fn list_stacks(&self) -> Result<Vec<StackSummary>> {
            Ok(self.stacks.clone())
        }

        async fn create_change_set(&self, request: &CreateChangeSet) -> Result<String> {
            self.created.lock().unwrap().push(request.clone());
            Ok(format!("arn:fake:{}", request.change_set_name))
        }

        async fn describe_change_set(
            &self,
            stack_name: &str,
            change_set_name: &str,
        ) -> Result<ChangeSetInfo> {
            let mut calls = self.describe_calls.lock().unwrap();
            let status = self
                .describe_statuses
                .get(*calls)
                .or_else(|| self.describe_statuses.last())
                .copied()
                .unwrap_or(ChangeSetStatus::CreateComplete);
            *calls += 1;
            Ok(ChangeSetInfo {
                change_set_name: change_set_name.to_string(),
                stack_name: stack_name.to_string(),
                status,
                status_reason: None,
                changes: Vec::new(),
            })
        }

        async fn execute_change_set(
            &self,
            _stack_name: &str,
            change_set_name: &str,
        ) -> Result<()> {
            self.executed.lock().unwrap().push(change_set_name.to_string());
            Ok(())
        }
    }

    struct FakeStore;

    #[async_trait]
    impl ArtifactStore for FakeStore {
        async fn put_object(&self, _bucket: &str, _key: &str, _body: Vec<u8>) -> Result<String> {
            Ok("fake-version".to_string())
        }
    }

    struct PlainModule;

    #[async_trait]
    impl StackModule for PlainModule {
        fn name(&self) -> &str {
            "Foo"
        }

        fn template_body(&self) -> Result<String> {
            Ok("Resources: {}\n".to_string())
        }
    }

    /// Module whose hooks return distinguishable parameters.
    struct HookedModule;

    #[async_trait]
    impl StackModule for HookedModule {
        fn name(&self) -> &str {
            "Foo"
        }

        fn template_body(&self) -> Result<String> {
            Ok("Resources: {}\n".to_string())
        }

        async fn pre_deploy(&self, _ctx: &DeployContext) -> Result<Vec<DeployParameter>> {
            Ok(vec![
                DeployParameter::new("PreA", "1"),
                DeployParameter::new("PreB", "2"),
            ])
        }

        async fn deploy(
            &self,
            _ctx: &DeployContext,
            store: &dyn ArtifactStore,
        ) -> Result<Vec<DeployParameter>> {
            let version = store.put_object("bucket", "key.zip", vec![0u8]).await?;
            Ok(vec![DeployParameter::new("ArtifactVersion", version)])
        }
    }

    struct FailingPreDeploy;

    #[async_trait]
    impl StackModule for FailingPreDeploy {
        fn name(&self) -> &str {
            "Foo"
        }

        fn template_body(&self) -> Result<String> {
            Ok(String::new())
        }

        async fn pre_deploy(&self, _ctx: &DeployContext) -> Result<Vec<DeployParameter>> {
            Err(CloudError::CommandExit {
                command: "yarn build".to_string(),
                code: 2,
            })
        }
    }

    fn ctx() -> DeployContext {
        DeployContext::new("eu-west-1", "123456789012", "Foo")
    }

    fn fast_wait() -> WaitConfig {
        WaitConfig {
            poll_interval: Duration::from_millis(1),
            max_wait: Duration::from_millis(50),
        }
    }

    #[tokio::test]
    async fn absent_stack_gets_create_change_set() {
        let service = FakeService::with_stacks(vec![StackSummary::new(
            "Bar",
            StackStatus::CreateComplete,
        )]);
        let deployer = Deployer::new(&service, &FakeStore);

        let outcome = deployer.deploy(&PlainModule, &ctx(), false).await.unwrap();

        assert_eq!(outcome.change_set_type, ChangeSetType::Create);
        let created = service.created_requests();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].change_set_type, ChangeSetType::Create);
    }

    #[tokio::test]
    async fn existing_stack_gets_update_change_set() {
        let service = FakeService::with_stacks(vec![StackSummary::new(
            "Foo",
            StackStatus::UpdateComplete,
        )]);
        let deployer = Deployer::new(&service, &FakeStore);

        let outcome = deployer.deploy(&PlainModule, &ctx(), false).await.unwrap();

        assert_eq!(outcome.change_set_type, ChangeSetType::Update);
    }

    #[tokio::test]
    async fn stack_in_review_is_treated_as_absent() {
        let service = FakeService::with_stacks(vec![StackSummary::new(
            "Foo",
            StackStatus::ReviewInProgress,
        )]);
        let deployer = Deployer::new(&service, &FakeStore);

        let outcome = deployer.deploy(&PlainModule, &ctx(), false).await.unwrap();

        assert_eq!(outcome.change_set_type, ChangeSetType::Create);
    }

    #[tokio::test]
    async fn change_set_name_is_stack_plus_timestamp() {
        let service = FakeService::with_stacks(Vec::new());
        let deployer = Deployer::new(&service, &FakeStore);

        let outcome = deployer.deploy(&PlainModule, &ctx(), false).await.unwrap();

        let suffix = outcome
            .change_set_name
            .strip_prefix("Foo-")
            .expect("name should start with the stack name");
        assert!(suffix.parse::<u64>().is_ok(), "suffix is a unix timestamp");
    }

    #[test]
    fn submissions_at_different_times_get_distinct_names() {
        let t1 = Utc.timestamp_opt(1_560_000_000, 0).unwrap();
        let t2 = Utc.timestamp_opt(1_560_000_001, 0).unwrap();
        assert_ne!(change_set_name("Foo", t1), change_set_name("Foo", t2));
        assert_eq!(change_set_name("Foo", t1), "Foo-1560000000");
    }

    #[tokio::test]
    async fn parameters_concatenate_in_hook_order() {
        let service = FakeService::with_stacks(Vec::new());
        let deployer = Deployer::new(&service, &FakeStore);

        deployer.deploy(&HookedModule, &ctx(), false).await.unwrap();

        let created = service.created_requests();
        assert_eq!(
            created[0].parameters,
            vec![
                DeployParameter::new("PreA", "1"),
                DeployParameter::new("PreB", "2"),
                DeployParameter::new("ArtifactVersion", "fake-version"),
            ]
        );
        assert_eq!(
            created[0].capabilities,
            vec![CAPABILITY_NAMED_IAM.to_string()]
        );
    }

    #[tokio::test]
    async fn failed_pre_deploy_submits_nothing() {
        let service = FakeService::with_stacks(Vec::new());
        let deployer = Deployer::new(&service, &FakeStore);

        let err = deployer
            .deploy(&FailingPreDeploy, &ctx(), false)
            .await
            .unwrap_err();

        assert_eq!(err.exit_code(), Some(2));
        assert!(service.created_requests().is_empty());
    }

    #[tokio::test]
    async fn execute_waits_for_ready_then_applies() {
        let service = FakeService::with_stacks(Vec::new()).with_describe_sequence(vec![
            // first describe is the report after creation
            ChangeSetStatus::CreateInProgress,
            // waiter polls
            ChangeSetStatus::CreateInProgress,
            ChangeSetStatus::CreateComplete,
        ]);
        let deployer = Deployer::new(&service, &FakeStore).with_wait(fast_wait());

        let outcome = deployer.deploy(&PlainModule, &ctx(), true).await.unwrap();

        assert!(outcome.executed);
        assert_eq!(outcome.description.status, ChangeSetStatus::CreateComplete);
        assert_eq!(
            *service.executed.lock().unwrap(),
            vec![outcome.change_set_name.clone()]
        );
    }

    #[tokio::test]
    async fn wait_times_out_when_never_ready() {
        let service = FakeService::with_stacks(Vec::new())
            .with_describe_sequence(vec![ChangeSetStatus::CreateInProgress]);
        let deployer = Deployer::new(&service, &FakeStore).with_wait(fast_wait());

        let err = deployer.deploy(&PlainModule, &ctx(), true).await.unwrap_err();

        assert!(matches!(err, CloudError::WaitTimeout { .. }));
        assert!(service.executed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_change_set_aborts_execution() {
        let service = FakeService::with_stacks(Vec::new()).with_describe_sequence(vec![
            ChangeSetStatus::CreateInProgress,
            ChangeSetStatus::Failed,
        ]);
        let deployer = Deployer::new(&service, &FakeStore).with_wait(fast_wait());

        let err = deployer.deploy(&PlainModule, &ctx(), true).await.unwrap_err();

        assert!(matches!(err, CloudError::ChangeSetFailed { .. }));
        assert!(service.executed.lock().unwrap().is_empty());
    }
}
