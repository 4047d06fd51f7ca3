//! Lambda resource properties

use crate::intrinsic::Value;
use crate::template::ResourceProperties;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Function {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
    pub runtime: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,
    pub handler: String,
    pub role: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
    pub code: Code,
}

impl ResourceProperties for Function {
    const TYPE: &'static str = "AWS::Lambda::Function";
}

/// Code location in a versioned artifact bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Code {
    #[serde(rename = "S3Bucket")]
    pub s3_bucket: Value,
    #[serde(rename = "S3Key")]
    pub s3_key: Value,
    #[serde(rename = "S3ObjectVersion")]
    pub s3_object_version: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Environment {
    pub variables: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Permission {
    pub function_name: Value,
    pub action: String,
    pub principal: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_arn: Option<Value>,
}

impl ResourceProperties for Permission {
    const TYPE: &'static str = "AWS::Lambda::Permission";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn code_location_keeps_s3_casing() {
        let code = Code {
            s3_bucket: Value::reference("ArtifactBucket"),
            s3_key: Value::reference("ArtifactName"),
            s3_object_version: Value::reference("ArtifactVersion"),
        };
        assert_eq!(
            serde_json::to_value(&code).unwrap(),
            json!({
                "S3Bucket": {"Ref": "ArtifactBucket"},
                "S3Key": {"Ref": "ArtifactName"},
                "S3ObjectVersion": {"Ref": "ArtifactVersion"}
            })
        );
    }
}
