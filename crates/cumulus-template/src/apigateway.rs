//! API Gateway resource properties

use crate::intrinsic::Value;
use crate::template::ResourceProperties;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RestApi {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary_media_types: Option<Vec<String>>,
}

impl ResourceProperties for RestApi {
    const TYPE: &'static str = "AWS::ApiGateway::RestApi";
}

/// A path segment under a REST API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Resource {
    pub rest_api_id: Value,
    pub parent_id: Value,
    pub path_part: String,
}

impl ResourceProperties for Resource {
    const TYPE: &'static str = "AWS::ApiGateway::Resource";
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Method {
    pub rest_api_id: Value,
    pub resource_id: Value,
    pub http_method: String,
    pub authorization_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorizer_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration: Option<Integration>,
}

impl ResourceProperties for Method {
    const TYPE: &'static str = "AWS::ApiGateway::Method";
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Integration {
    #[serde(rename = "Type")]
    pub integration_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration_http_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Authorizer {
    pub rest_api_id: Value,
    pub name: String,
    #[serde(rename = "Type")]
    pub authorizer_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorizer_result_ttl_in_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorizer_credentials: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_source: Option<String>,
    pub authorizer_uri: Value,
}

impl ResourceProperties for Authorizer {
    const TYPE: &'static str = "AWS::ApiGateway::Authorizer";
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Deployment {
    pub rest_api_id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_description: Option<StageDescription>,
}

impl ResourceProperties for Deployment {
    const TYPE: &'static str = "AWS::ApiGateway::Deployment";
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StageDescription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
