//! IAM policy documents

use crate::intrinsic::Value;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

pub const POLICY_VERSION_2012: &str = "2012-10-17";

/// An IAM policy document, used for key policies, bucket policies,
/// assume-role policies and managed policies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub statement: Vec<Statement>,
}

impl PolicyDocument {
    pub fn new(statement: Vec<Statement>) -> Self {
        Self {
            version: Some(POLICY_VERSION_2012.to_string()),
            statement,
        }
    }

    /// Document without an explicit `Version` field.
    pub fn unversioned(statement: Vec<Statement>) -> Self {
        Self {
            version: None,
            statement,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    pub effect: Effect,
    pub action: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<Principal>,
}

impl Statement {
    pub fn allow(actions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            effect: Effect::Allow,
            action: actions.into_iter().map(Into::into).collect(),
            resource: None,
            principal: None,
        }
    }

    pub fn on(mut self, resources: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        self.resource = Some(resources.into_iter().map(Into::into).collect());
        self
    }

    pub fn by(mut self, principal: Principal) -> Self {
        self.principal = Some(principal);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
    Allow,
    Deny,
}

/// A statement principal: `{"AWS": ...}` or `{"Service": "..."}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Principal {
    Aws(Value),
    Service(String),
}

impl Principal {
    pub fn aws(value: impl Into<Value>) -> Self {
        Principal::Aws(value.into())
    }

    pub fn service(name: impl Into<String>) -> Self {
        Principal::Service(name.into())
    }
}

impl Serialize for Principal {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Principal::Aws(value) => map.serialize_entry("AWS", value)?,
            Principal::Service(name) => map.serialize_entry("Service", name)?,
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_service_principal_statement() {
        let doc = PolicyDocument::new(vec![Statement::allow(["sts:AssumeRole"])
            .by(Principal::service("lambda.amazonaws.com"))]);

        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({
                "Version": "2012-10-17",
                "Statement": [{
                    "Effect": "Allow",
                    "Action": ["sts:AssumeRole"],
                    "Principal": {"Service": "lambda.amazonaws.com"}
                }]
            })
        );
    }

    #[test]
    fn serializes_aws_principal_with_sub() {
        let statement = Statement::allow(["kms:*"])
            .on(["*"])
            .by(Principal::aws(Value::sub(
                "arn:aws:iam::${AWS::AccountId}:root",
            )));

        assert_eq!(
            serde_json::to_value(&statement).unwrap(),
            json!({
                "Effect": "Allow",
                "Action": ["kms:*"],
                "Resource": ["*"],
                "Principal": {"AWS": {"Fn::Sub": "arn:aws:iam::${AWS::AccountId}:root"}}
            })
        );
    }
}
