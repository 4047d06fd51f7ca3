//! Android registration Lambda: Kotlin/JVM, built with gradle.

use crate::stacks::{artifacts_bucket, build_err};
use cumulus_build::{read_artifact, run_commands};
use cumulus_cloud::{ArtifactStore, DeployContext, DeployParameter, Result as CloudResult};
use cumulus_template::{
    iam, lambda, Output, Parameter, PolicyDocument, Principal, Resource, Result, Statement,
    Template, Value,
};
use std::path::Path;

pub const FUNCTION_ID: &str = "AndroidRegisterFn";

const ARTIFACT_PATH: &str =
    "apidevices/androidregister/build/distributions/androidregister-1.0-SNAPSHOT.zip";
const ARTIFACT_KEY: &str = "apidevices-androidregister.zip";
// Runs at the repository root so gradle resolves the multi-project build.
const BUILD_COMMANDS: &[&str] = &["./gradlew apidevices:androidregister:build"];

pub fn add_to(t: &mut Template) -> Result<()> {
    let bucket = t.add_parameter(
        "AndroidregisterArtifactBucket",
        Parameter::string().description("Bucket holding the register artifact."),
    )?;
    let name = t.add_parameter(
        "AndroidregisterArtifactName",
        Parameter::string().description("Object key of the register artifact."),
    )?;
    let version = t.add_parameter(
        "AndroidregisterArtifactVersion",
        Parameter::string().description("Object version of the register artifact."),
    )?;

    t.add_resource(
        "AndroidRegisterFnRole",
        Resource::new(iam::Role {
            role_name: Some("AndroidRegisterFnRole".to_string()),
            max_session_duration: None,
            managed_policy_arns: Some(vec![
                "arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole".into(),
                "arn:aws:iam::aws:policy/AmazonDynamoDBFullAccess".into(),
                "arn:aws:iam::aws:policy/AmazonSNSFullAccess".into(),
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
            function_name: Some("AndroidRegisterFn".to_string()),
            runtime: "java8".to_string(),
            memory_size: Some(256),
            timeout: Some(30),
            handler: "dev.pasbox.apidevices.androidregister.AndroidRegister".to_string(),
            role: Value::get_att("AndroidRegisterFnRole", "Arn"),
            environment: Some(lambda::Environment {
                variables: [
                    (
                        "SNS_TOPIC_ANDROID_DEVICES_ARN".to_string(),
                        Value::sub(
                            "arn:aws:sns:${AWS::Region}:${AWS::AccountId}:devices-android",
                        ),
                    ),
                    (
                        "SNS_PLATFORM_APPLICATION_ANDROID_ARN".to_string(),
                        Value::sub(
                            "arn:aws:sns:${AWS::Region}:${AWS::AccountId}:app/GCM/pasbox-android",
                        ),
                    ),
                    (
                        "ANDROID_APP_PACKAGE_NAME".to_string(),
                        "me.stojan.pasbox".into(),
                    ),
                ]
                .into_iter()
                .collect(),
            }),
            code: lambda::Code {
                s3_bucket: bucket,
                s3_key: name,
                s3_object_version: version,
            },
        })?,
    )?;

    t.add_output(
        "AndroidRegisterFn",
        Output::new(Value::reference(FUNCTION_ID)).export("AndroidRegisterFn"),
    )?;
    t.add_output(
        "AndroidRegisterFnArn",
        Output::new(Value::get_att(FUNCTION_ID, "Arn")).export("AndroidRegisterFnArn"),
    )?;

    Ok(())
}

pub async fn pre_deploy(_ctx: &DeployContext) -> CloudResult<()> {
    run_commands(Path::new("."), BUILD_COMMANDS)
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
        DeployParameter::new("AndroidregisterArtifactBucket", bucket),
        DeployParameter::new("AndroidregisterArtifactName", ARTIFACT_KEY),
        DeployParameter::new("AndroidregisterArtifactVersion", version),
    ])
}
