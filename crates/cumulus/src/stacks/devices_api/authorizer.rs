//! Request authorizer Lambda: Node.js, built with yarn.

use crate::stacks::{artifacts_bucket, build_err};
use cumulus_build::{read_artifact, run_commands};
use cumulus_cloud::{ArtifactStore, DeployContext, DeployParameter, Result as CloudResult};
use cumulus_template::{
    iam, lambda, Output, Parameter, PolicyDocument, Principal, Resource, Result, Statement,
    Template, Value,
};
use std::path::Path;

pub const FUNCTION_ID: &str = "DeviceAuthorizerFn";

const COMPONENT_DIR: &str = "apidevices/authorizer";
const ARTIFACT_PATH: &str = "apidevices/authorizer/artifact.zip";
const ARTIFACT_KEY: &str = "apidevices-authorizer.zip";
const BUILD_COMMANDS: &[&str] = &["yarn install --pure-lockfile", "yarn build", "yarn artifact"];

pub fn add_to(t: &mut Template) -> Result<()> {
    let bucket = t.add_parameter(
        "AuthorizerArtifactBucket",
        Parameter::string().description("Bucket holding the authorizer artifact."),
    )?;
    let name = t.add_parameter(
        "AuthorizerArtifactName",
        Parameter::string().description("Object key of the authorizer artifact."),
    )?;
    let version = t.add_parameter(
        "AuthorizerArtifactVersion",
        Parameter::string().description("Object version of the authorizer artifact."),
    )?;

    t.add_resource(
        "DeviceAuthorizerFnRole",
        Resource::new(iam::Role {
            role_name: Some("DeviceAuthorizerFnRole".to_string()),
            max_session_duration: None,
            managed_policy_arns: Some(vec![
                "arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole".into(),
            ]),
            assume_role_policy_document: PolicyDocument::new(vec![Statement::allow(
                ["sts:AssumeRole"],
            )
            .by(Principal::service("lambda.amazonaws.com"))]),
        })?,
    )?;

    t.add_resource(
        FUNCTION_ID,
        Resource::new(lambda::Function {
            function_name: Some("DeviceAuthorizerFn".to_string()),
            runtime: "nodejs10.x".to_string(),
            memory_size: Some(128),
            timeout: Some(10),
            handler: "index.handler".to_string(),
            role: Value::get_att("DeviceAuthorizerFnRole", "Arn"),
            environment: None,
            code: lambda::Code {
                s3_bucket: bucket,
                s3_key: name,
                s3_object_version: version,
            },
        })?,
    )?;

    // Credentials API Gateway uses to invoke the authorizer.
    t.add_resource(
        "DevicesApiAuthorizerCredentials",
        Resource::new(iam::Role {
            role_name: Some("DevicesApiAuthorizerCredentials".to_string()),
            max_session_duration: None,
            managed_policy_arns: Some(vec![
                "arn:aws:iam::aws:policy/service-role/AWSLambdaRole".into(),
            ]),
            assume_role_policy_document: PolicyDocument::new(vec![Statement::allow(
                ["sts:AssumeRole"],
            )
            .by(Principal::service("apigateway.amazonaws.com"))]),
        })?,
    )?;

    t.add_output(
        "DeviceAuthorizerFn",
        Output::new(Value::reference(FUNCTION_ID)).export("DeviceAuthorizerFn"),
    )?;
    t.add_output(
        "DeviceAuthorizerFnArn",
        Output::new(Value::get_att(FUNCTION_ID, "Arn")).export("DeviceAuthorizerFnArn"),
    )?;

    Ok(())
}

pub async fn pre_deploy(_ctx: &DeployContext) -> CloudResult<()> {
    run_commands(Path::new(COMPONENT_DIR), BUILD_COMMANDS)
        .await
        .map_err(build_err)
}

pub async fn deploy(
    ctx: &DeployContext,
    store: &dyn ArtifactStore,
) -> CloudResult<Vec<DeployParameter>> {
    let bucket = artifacts_bucket(ctx);
    let body = read_artifact(Path::new(ARTIFACT_PATH))
        .await
        .map_err(build_err)?;
    let version = store.put_object(&bucket, ARTIFACT_KEY, body).await?;

    Ok(vec![
        DeployParameter::new("AuthorizerArtifactBucket", bucket),
        DeployParameter::new("AuthorizerArtifactName", ARTIFACT_KEY),
        DeployParameter::new("AuthorizerArtifactVersion", version),
    ])
}
