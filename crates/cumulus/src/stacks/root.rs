//! Root account stack
//!
//! IAM groups and deploy roles, the deployment robot user, and the
//! KMS-encrypted versioned artifacts bucket the deploy hooks upload to.

use super::template_err;
use async_trait::async_trait;
use cumulus_cloud::{Result as CloudResult, StackModule};
use cumulus_template::{
    iam, kms, s3, DeletionPolicy, Output, PolicyDocument, Principal, Resource, Result, Statement,
    Template, Value,
};

pub struct RootStack;

#[async_trait]
impl StackModule for RootStack {
    fn name(&self) -> &str {
        "root"
    }

    fn template_body(&self) -> CloudResult<String> {
        template()
            .and_then(|t| t.to_yaml())
            .map_err(template_err)
    }
}

pub fn template() -> Result<Template> {
    let mut t = Template::new().description("Account-level IAM and artifact storage.");
    groups(&mut t)?;
    roles(&mut t)?;
    robots(&mut t)?;
    artifacts(&mut t)?;
    Ok(t)
}

fn groups(t: &mut Template) -> Result<()> {
    t.add_resource(
        "IAMGroupAdministrators",
        Resource::new(iam::Group {
            group_name: Some("Administrators".to_string()),
            managed_policy_arns: Some(vec![
                "arn:aws:iam::aws:policy/AdministratorAccess".into()
            ]),
        })?,
    )?;

    t.add_resource(
        "IAMGroupEngineers",
        Resource::new(iam::Group {
            group_name: Some("Engineers".to_string()),
            managed_policy_arns: Some(vec!["arn:aws:iam::aws:policy/ReadOnlyAccess".into()]),
        })?,
    )?;

    let assume_role_only = t.add_resource(
        "PolicyAssumeRoleOnly",
        Resource::new(iam::ManagedPolicy {
            managed_policy_name: Some("AssumeRoleOnly".to_string()),
            description: Some("Allows users to only call sts:AssumeRole.".to_string()),
            policy_document: PolicyDocument::new(vec![
                Statement::allow(["sts:AssumeRole"]).on(["*"])
            ]),
        })?,
    )?;

    t.add_resource(
        "IAMGroupRobots",
        Resource::new(iam::Group {
            group_name: Some("Robots".to_string()),
            managed_policy_arns: Some(vec![assume_role_only]),
        })?,
    )?;

    Ok(())
}

fn roles(t: &mut Template) -> Result<()> {
    let cf_deploy_policy = t.add_resource(
        "CFDeployPolicy",
        Resource::new(iam::ManagedPolicy {
            managed_policy_name: Some("CloudFormationDeployAccess".to_string()),
            description: Some("Allows CloudFormation to deploy the application.".to_string()),
            policy_document: PolicyDocument::new(vec![Statement::allow(["*"]).on(["*"])]),
        })?,
    )?;

    t.add_resource(
        "CFDeployRole",
        Resource::new(iam::Role {
            role_name: Some("CloudFormationDeploy".to_string()),
            max_session_duration: Some(3600),
            managed_policy_arns: Some(vec![
                cf_deploy_policy,
                "arn:aws:iam::aws:policy/IAMReadOnlyAccess".into(),
            ]),
            assume_role_policy_document: PolicyDocument::unversioned(vec![Statement::allow(
                ["sts:AssumeRole"],
            )
            .by(Principal::service("cloudformation.amazonaws.com"))]),
        })?
        .depends_on(["CFDeployPolicy"]),
    )?;

    let deploy_policy = t.add_resource(
        "DeployPolicy",
        Resource::new(iam::ManagedPolicy {
            managed_policy_name: Some("DeployAccess".to_string()),
            description: Some("Allows access for deploying the application.".to_string()),
            policy_document: PolicyDocument::new(vec![
                Statement::allow(["cloudformation:*"]).on(["*"]),
                Statement::allow(["s3:Get*", "s3:PutObject", "s3:ListBucket"]).on(["*"]),
                Statement::allow(["iam:PassRole"])
                    .on([Value::get_att("CFDeployRole", "Arn")]),
            ]),
        })?
        .depends_on(["CFDeployRole"]),
    )?;

    t.add_resource(
        "RoleDeploy",
        Resource::new(iam::Role {
            role_name: Some("Deploy".to_string()),
            max_session_duration: Some(3600),
            managed_policy_arns: Some(vec![deploy_policy]),
            assume_role_policy_document: PolicyDocument::new(vec![Statement::allow(
                ["sts:AssumeRole"],
            )
            .by(Principal::aws(Value::sub(
                "arn:aws:iam::${AWS::AccountId}:user/DeploymentRobot",
            )))]),
        })?
        .depends_on(["DeployPolicy"]),
    )?;

    Ok(())
}

fn robots(t: &mut Template) -> Result<()> {
    let robot = t.add_resource(
        "DeploymentRobot",
        Resource::new(iam::User {
            user_name: Some("DeploymentRobot".to_string()),
            groups: Some(vec!["Robots".into()]),
        })?,
    )?;

    let access_key = t.add_resource(
        "DeploymentRobotAccessKey",
        Resource::new(iam::AccessKey {
            serial: Some(0),
            status: Some("Active".to_string()),
            user_name: robot,
        })?
        .depends_on(["DeploymentRobot"]),
    )?;

    t.add_output("DeploymentRobotAccessKey", Output::new(access_key))?;
    t.add_output(
        "DeploymentRobotSecretAccessKey",
        Output::new(Value::get_att("DeploymentRobotAccessKey", "SecretAccessKey")),
    )?;

    Ok(())
}

const ARTIFACTS_BUCKET_ARN: &str = "arn:aws:s3:::artifacts-${AWS::Region}-${AWS::AccountId}";

fn artifacts(t: &mut Template) -> Result<()> {
    let key = t.add_resource(
        "ArtifactsKey",
        Resource::new(kms::Key {
            description: Some("Key used to encrypt artifacts buckets.".to_string()),
            enabled: Some(true),
            key_policy: PolicyDocument::new(vec![
                Statement::allow(["kms:*"]).on(["*"]).by(Principal::aws(Value::sub(
                    "arn:aws:iam::${AWS::AccountId}:root",
                ))),
                Statement::allow([
                    "kms:Encrypt",
                    "kms:Decrypt",
                    "kms:ReEncrypt",
                    "kms:GenerateDataKey",
                    "kms:DescribeKey",
                ])
                .on(["*"])
                .by(Principal::service("s3.amazonaws.com")),
            ]),
        })?,
    )?;

    t.add_resource(
        "ArtifactsKeyAlias",
        Resource::new(kms::Alias {
            alias_name: "alias/ArtifactsKey".to_string(),
            target_key_id: key.clone(),
        })?,
    )?;

    let bucket = t.add_resource(
        "BucketArtifacts",
        Resource::new(s3::Bucket {
            bucket_name: Some(Value::sub("artifacts-${AWS::Region}-${AWS::AccountId}")),
            bucket_encryption: Some(s3::BucketEncryption {
                server_side_encryption_configuration: vec![s3::ServerSideEncryptionRule {
                    server_side_encryption_by_default: s3::ServerSideEncryptionByDefault {
                        kms_master_key_id: Some(key),
                        sse_algorithm: "aws:kms".to_string(),
                    },
                }],
            }),
            versioning_configuration: Some(s3::VersioningConfiguration::enabled()),
            public_access_block_configuration: Some(
                s3::PublicAccessBlockConfiguration::block_all(),
            ),
        })?
        .depends_on(["ArtifactsKey", "ArtifactsKeyAlias"])
        .deletion_policy(DeletionPolicy::Delete),
    )?;

    t.add_resource(
        "BucketPolicyArtifacts",
        Resource::new(s3::BucketPolicy {
            bucket,
            policy_document: PolicyDocument::unversioned(vec![
                bucket_access(&["s3:GetBucket*", "s3:ListBucket*"], ARTIFACTS_BUCKET_ARN, "Deploy"),
                bucket_access(
                    &["s3:GetBucket*", "s3:ListBucket*"],
                    ARTIFACTS_BUCKET_ARN,
                    "CloudFormationDeploy",
                ),
                bucket_access(
                    &["s3:PutObject*", "s3:GetObject*"],
                    &format!("{ARTIFACTS_BUCKET_ARN}/*"),
                    "Deploy",
                ),
                bucket_access(
                    &["s3:PutObject*", "s3:GetObject*"],
                    &format!("{ARTIFACTS_BUCKET_ARN}/*"),
                    "CloudFormationDeploy",
                ),
            ]),
        })?
        .depends_on(["BucketArtifacts"]),
    )?;

    Ok(())
}

fn bucket_access(actions: &[&str], resource_arn: &str, role: &str) -> Statement {
    Statement::allow(actions.iter().copied())
        .on([Value::sub(resource_arn)])
        .by(Principal::aws(Value::sub(format!(
            "arn:aws:iam::${{AWS::AccountId}}:role/{role}"
        ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn declares_groups_roles_robot_and_artifact_storage() {
        let t = template().unwrap();
        let ids: Vec<&str> = t.resources().keys().map(String::as_str).collect();
        assert_eq!(
            ids,
            vec![
                "ArtifactsKey",
                "ArtifactsKeyAlias",
                "BucketArtifacts",
                "BucketPolicyArtifacts",
                "CFDeployPolicy",
                "CFDeployRole",
                "DeployPolicy",
                "DeploymentRobot",
                "DeploymentRobotAccessKey",
                "IAMGroupAdministrators",
                "IAMGroupEngineers",
                "IAMGroupRobots",
                "PolicyAssumeRoleOnly",
                "RoleDeploy",
            ]
        );
    }

    #[test]
    fn artifacts_bucket_is_encrypted_versioned_and_private() {
        let t = template().unwrap();
        let doc = serde_json::to_value(&t).unwrap();
        let bucket = &doc["Resources"]["BucketArtifacts"];

        assert_eq!(bucket["Type"], json!("AWS::S3::Bucket"));
        assert_eq!(bucket["DeletionPolicy"], json!("Delete"));
        assert_eq!(
            bucket["Properties"]["VersioningConfiguration"]["Status"],
            json!("Enabled")
        );
        assert_eq!(
            bucket["Properties"]["BucketEncryption"]["ServerSideEncryptionConfiguration"][0]
                ["ServerSideEncryptionByDefault"]["KMSMasterKeyID"],
            json!({"Ref": "ArtifactsKey"})
        );
        assert_eq!(
            bucket["Properties"]["PublicAccessBlockConfiguration"]["BlockPublicAcls"],
            json!(true)
        );
    }

    #[test]
    fn deploy_role_trusts_only_the_deployment_robot() {
        let t = template().unwrap();
        let doc = serde_json::to_value(&t).unwrap();
        let statement =
            &doc["Resources"]["RoleDeploy"]["Properties"]["AssumeRolePolicyDocument"]["Statement"][0];
        assert_eq!(
            statement["Principal"],
            json!({"AWS": {"Fn::Sub": "arn:aws:iam::${AWS::AccountId}:user/DeploymentRobot"}})
        );
    }

    #[test]
    fn pass_role_is_limited_to_the_cloudformation_role() {
        let t = template().unwrap();
        let doc = serde_json::to_value(&t).unwrap();
        let statements = doc["Resources"]["DeployPolicy"]["Properties"]["PolicyDocument"]
            ["Statement"]
            .as_array()
            .unwrap();
        let pass_role = statements
            .iter()
            .find(|s| s["Action"] == json!(["iam:PassRole"]))
            .unwrap();
        assert_eq!(
            pass_role["Resource"],
            json!([{"Fn::GetAtt": ["CFDeployRole", "Arn"]}])
        );
    }
}
