//! KMS resource properties

use crate::intrinsic::Value;
use crate::policy::PolicyDocument;
use crate::template::ResourceProperties;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Key {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    pub key_policy: PolicyDocument,
}

impl ResourceProperties for Key {
    const TYPE: &'static str = "AWS::KMS::Key";
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Alias {
    pub alias_name: String,
    pub target_key_id: Value,
}

impl ResourceProperties for Alias {
    const TYPE: &'static str = "AWS::KMS::Alias";
}
