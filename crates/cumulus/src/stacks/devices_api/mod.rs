//! Devices API stack
//!
//! DynamoDB table, REST API with a request authorizer, and the
//! `/android/register` endpoint. The authorizer and register Lambdas
//! are built locally by the pre-deploy hook and uploaded to the
//! artifacts bucket by the deploy hook; the template receives their
//! bucket/key/version as parameters.

mod android_register;
mod authorizer;

use super::template_err;
use async_trait::async_trait;
use cumulus_cloud::{
    ArtifactStore, DeployContext, DeployParameter, Result as CloudResult, StackModule,
};
use cumulus_template::{
    apigateway, dynamodb, Output, Resource, Result, Template, Value,
};

pub struct DevicesApiStack;

#[async_trait]
impl StackModule for DevicesApiStack {
    fn name(&self) -> &str {
        "apidevices"
    }

    fn template_body(&self) -> CloudResult<String> {
        template()
            .and_then(|t| t.to_yaml())
            .map_err(template_err)
    }

    async fn pre_deploy(&self, ctx: &DeployContext) -> CloudResult<Vec<DeployParameter>> {
        authorizer::pre_deploy(ctx).await?;
        android_register::pre_deploy(ctx).await?;
        Ok(Vec::new())
    }

    async fn deploy(
        &self,
        ctx: &DeployContext,
        store: &dyn ArtifactStore,
    ) -> CloudResult<Vec<DeployParameter>> {
        let mut parameters = authorizer::deploy(ctx, store).await?;
        parameters.extend(android_register::deploy(ctx, store).await?);
        Ok(parameters)
    }
}

/// API Gateway invocation URI for a Lambda in this template.
fn lambda_invocation_arn(logical_id: &str) -> Value {
    Value::sub_with(
        "arn:aws:apigateway:${AWS::Region}:lambda:path/2015-03-31/functions/${fn}/invocations",
        [("fn".to_string(), Value::get_att(logical_id, "Arn"))],
    )
}

/// execute-api ARN for a path under this template's REST API.
fn execute_api_arn(api_logical_id: &str, path: &str) -> Value {
    Value::sub_with(
        format!("arn:aws:execute-api:${{AWS::Region}}:${{AWS::AccountId}}:${{api}}/{path}"),
        [("api".to_string(), Value::reference(api_logical_id))],
    )
}

pub fn template() -> Result<Template> {
    let mut t = Template::new().description("Devices API.");

    t.add_resource(
        "DevicesTable",
        Resource::new(dynamodb::Table {
            table_name: Some("Devices".to_string()),
            key_schema: vec![
                dynamodb::KeySchema::hash("key"),
                dynamodb::KeySchema::range("type"),
            ],
            attribute_definitions: vec![
                dynamodb::AttributeDefinition::string("key"),
                dynamodb::AttributeDefinition::string("type"),
            ],
            billing_mode: Some("PAY_PER_REQUEST".to_string()),
        })?,
    )?;

    let restapi = t.add_resource(
        "DevicesApi",
        Resource::new(apigateway::RestApi {
            name: "DevicesApi".to_string(),
            description: Some("Devices API.".to_string()),
            binary_media_types: Some(vec!["application/vnd.pasbox.octets".to_string()]),
        })?,
    )?;

    authorizer::add_to(&mut t)?;

    t.add_resource(
        "DevicesApiAuthorizer",
        Resource::new(apigateway::Authorizer {
            rest_api_id: restapi.clone(),
            name: "DevicesApiAuthorizer".to_string(),
            authorizer_type: "REQUEST".to_string(),
            authorizer_result_ttl_in_seconds: Some(0),
            authorizer_credentials: Some(Value::get_att(
                "DevicesApiAuthorizerCredentials",
                "Arn",
            )),
            identity_source: Some("method.request.header.Attestation".to_string()),
            authorizer_uri: lambda_invocation_arn(authorizer::FUNCTION_ID),
        })?,
    )?;

    let android = t.add_resource(
        "AndroidResource",
        Resource::new(apigateway::Resource {
            rest_api_id: restapi.clone(),
            parent_id: Value::get_att("DevicesApi", "RootResourceId"),
            path_part: "android".to_string(),
        })?,
    )?;

    t.add_resource(
        "RootMethod",
        Resource::new(apigateway::Method {
            rest_api_id: restapi.clone(),
            resource_id: Value::get_att("DevicesApi", "RootResourceId"),
            http_method: "POST".to_string(),
            authorization_type: "CUSTOM".to_string(),
            authorizer_id: Some(Value::reference("DevicesApiAuthorizer")),
            integration: Some(apigateway::Integration {
                integration_type: "MOCK".to_string(),
                integration_http_method: Some("POST".to_string()),
                uri: None,
            }),
        })?,
    )?;

    let register = t.add_resource(
        "AndroidRegisterResource",
        Resource::new(apigateway::Resource {
            rest_api_id: restapi.clone(),
            parent_id: android,
            path_part: "register".to_string(),
        })?,
    )?;

    android_register::add_to(&mut t)?;

    t.add_resource(
        "AndroidRegisterPermission",
        Resource::new(cumulus_template::lambda::Permission {
            function_name: Value::reference(android_register::FUNCTION_ID),
            action: "lambda:InvokeFunction".to_string(),
            principal: "apigateway.amazonaws.com".to_string(),
            source_arn: Some(execute_api_arn("DevicesApi", "*/*/*")),
        })?,
    )?;

    t.add_resource(
        "AndroidRegisterMethod",
        Resource::new(apigateway::Method {
            rest_api_id: restapi.clone(),
            resource_id: register,
            http_method: "POST".to_string(),
            authorization_type: "NONE".to_string(),
            authorizer_id: None,
            integration: Some(apigateway::Integration {
                integration_type: "AWS_PROXY".to_string(),
                integration_http_method: Some("POST".to_string()),
                uri: Some(lambda_invocation_arn(android_register::FUNCTION_ID)),
            }),
        })?,
    )?;

    t.add_resource(
        "AndroidRestApiV1",
        Resource::new(apigateway::Deployment {
            rest_api_id: restapi,
            stage_name: Some("v1".to_string()),
            stage_description: Some(apigateway::StageDescription {
                description: Some("Devices API version 1.".to_string()),
            }),
        })?
        .depends_on(["RootMethod", "AndroidRegisterMethod"]),
    )?;

    t.add_output(
        "DevicesApiId",
        Output::new(Value::reference("DevicesApi"))
            .description("Devices REST API ID.")
            .export("DevicesApiId"),
    )?;

    Ok(t)
}
