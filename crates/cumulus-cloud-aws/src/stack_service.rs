//! CloudFormation-backed stack service

use async_trait::async_trait;
use aws_sdk_cloudformation::error::DisplayErrorContext;
use aws_sdk_cloudformation::types as cfn;
use cumulus_cloud::{
    ChangeSetInfo, ChangeSetStatus, ChangeSetType, CloudError, CreateChangeSet, ResourceChange,
    Result, StackService, StackStatus, StackSummary,
};

pub struct AwsStackService {
    client: aws_sdk_cloudformation::Client,
}

impl AwsStackService {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_cloudformation::Client::new(config),
        }
    }
}

#[async_trait]
impl StackService for AwsStackService {
    async fn list_stacks(&self) -> Result<Vec<StackSummary>> {
        let mut stacks = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let resp = self
                .client
                .describe_stacks()
                .set_next_token(next_token)
                .send()
                .await
                .map_err(service_err)?;

            for stack in resp.stacks() {
                let name = stack.stack_name().unwrap_or_default().to_string();
                let status = stack
                    .stack_status()
                    .map(|s| StackStatus::parse(s.as_str()))
                    .unwrap_or(StackStatus::Other);
                stacks.push(StackSummary::new(name, status));
            }

            next_token = resp.next_token().map(str::to_string);
            if next_token.is_none() {
                break;
            }
        }

        tracing::debug!(count = stacks.len(), "enumerated stacks");
        Ok(stacks)
    }

    async fn create_change_set(&self, request: &CreateChangeSet) -> Result<String> {
        let parameters: Vec<cfn::Parameter> = request
            .parameters
            .iter()
            .map(|p| {
                cfn::Parameter::builder()
                    .parameter_key(&p.key)
                    .parameter_value(&p.value)
                    .build()
            })
            .collect();

        let change_set_type = match request.change_set_type {
            ChangeSetType::Create => cfn::ChangeSetType::Create,
            ChangeSetType::Update => cfn::ChangeSetType::Update,
        };

        let capabilities: Vec<cfn::Capability> = request
            .capabilities
            .iter()
            .map(|c| cfn::Capability::from(c.as_str()))
            .collect();

        let resp = self
            .client
            .create_change_set()
            .stack_name(&request.stack_name)
            .change_set_name(&request.change_set_name)
            .change_set_type(change_set_type)
            .template_body(&request.template_body)
            .set_parameters(Some(parameters))
            .set_capabilities(Some(capabilities))
            .send()
            .await
            .map_err(service_err)?;

        Ok(resp.id().unwrap_or_default().to_string())
    }

    async fn describe_change_set(
        &self,
        stack_name: &str,
        change_set_name: &str,
    ) -> Result<ChangeSetInfo> {
        let resp = self
            .client
            .describe_change_set()
            .stack_name(stack_name)
            .change_set_name(change_set_name)
            .send()
            .await
            .map_err(service_err)?;

        let changes = resp
            .changes()
            .iter()
            .filter_map(|change| change.resource_change())
            .map(|rc| ResourceChange {
                action: rc.action().map(|a| a.as_str()).unwrap_or_default().to_string(),
                logical_resource_id: rc.logical_resource_id().unwrap_or_default().to_string(),
                resource_type: rc.resource_type().unwrap_or_default().to_string(),
            })
            .collect();

        Ok(ChangeSetInfo {
            change_set_name: resp
                .change_set_name()
                .unwrap_or(change_set_name)
                .to_string(),
            stack_name: resp.stack_name().unwrap_or(stack_name).to_string(),
            status: resp
                .status()
                .map(|s| ChangeSetStatus::parse(s.as_str()))
                .unwrap_or(ChangeSetStatus::Other),
            status_reason: resp.status_reason().map(str::to_string),
            changes,
        })
    }

    async fn execute_change_set(&self, stack_name: &str, change_set_name: &str) -> Result<()> {
        self.client
            .execute_change_set()
            .stack_name(stack_name)
            .change_set_name(change_set_name)
            .send()
            .await
            .map_err(service_err)?;
        Ok(())
    }
}

fn service_err<E>(err: E) -> CloudError
where
    E: std::error::Error + Send + Sync + 'static,
{
    CloudError::Service(format!("{}", DisplayErrorContext(err)))
}
