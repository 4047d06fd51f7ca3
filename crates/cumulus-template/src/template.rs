//! Template document assembly

use crate::error::{Result, TemplateError};
use crate::intrinsic::Value;
use serde::Serialize;
use std::collections::BTreeMap;

/// Implemented by every typed resource property struct.
///
/// `TYPE` is the CloudFormation resource type identifier,
/// e.g. `AWS::S3::Bucket`.
pub trait ResourceProperties: Serialize {
    const TYPE: &'static str;
}

/// A single declared resource: type, optional lifecycle attributes and
/// the serialized properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    #[serde(rename = "Type")]
    resource_type: String,
    #[serde(rename = "DependsOn", skip_serializing_if = "Vec::is_empty")]
    depends_on: Vec<String>,
    #[serde(rename = "DeletionPolicy", skip_serializing_if = "Option::is_none")]
    deletion_policy: Option<DeletionPolicy>,
    #[serde(rename = "Properties")]
    properties: serde_json::Value,
}

impl Resource {
    pub fn new<P: ResourceProperties>(properties: P) -> Result<Self> {
        Ok(Self {
            resource_type: P::TYPE.to_string(),
            depends_on: Vec::new(),
            deletion_policy: None,
            properties: serde_json::to_value(properties)?,
        })
    }

    pub fn depends_on(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.depends_on.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn deletion_policy(mut self, policy: DeletionPolicy) -> Self {
        self.deletion_policy = Some(policy);
        self
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeletionPolicy {
    Delete,
    Retain,
    Snapshot,
}

/// A template input parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    #[serde(rename = "Type")]
    parameter_type: String,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Parameter {
    pub fn string() -> Self {
        Self {
            parameter_type: "String".to_string(),
            description: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A template output, optionally exported for cross-stack imports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Output {
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "Value")]
    value: Value,
    #[serde(rename = "Export", skip_serializing_if = "Option::is_none")]
    export: Option<Export>,
}

impl Output {
    pub fn new(value: Value) -> Self {
        Self {
            description: None,
            value,
            export: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn export(mut self, name: impl Into<String>) -> Self {
        self.export = Some(Export { name: name.into() });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Export {
    #[serde(rename = "Name")]
    name: String,
}

/// A CloudFormation template: parameters, resources and outputs keyed by
/// logical id. Logical ids are unique; re-adding one is an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Template {
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "Parameters", skip_serializing_if = "BTreeMap::is_empty")]
    parameters: BTreeMap<String, Parameter>,
    #[serde(rename = "Resources")]
    resources: BTreeMap<String, Resource>,
    #[serde(rename = "Outputs", skip_serializing_if = "BTreeMap::is_empty")]
    outputs: BTreeMap<String, Output>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a parameter and return a `Ref` to it.
    pub fn add_parameter(&mut self, logical_id: &str, parameter: Parameter) -> Result<Value> {
        if self.parameters.contains_key(logical_id) {
            return Err(TemplateError::DuplicateLogicalId(logical_id.to_string()));
        }
        self.parameters.insert(logical_id.to_string(), parameter);
        Ok(Value::reference(logical_id))
    }

    /// Add a resource and return a `Ref` to it.
    pub fn add_resource(&mut self, logical_id: &str, resource: Resource) -> Result<Value> {
        if self.resources.contains_key(logical_id) {
            return Err(TemplateError::DuplicateLogicalId(logical_id.to_string()));
        }
        self.resources.insert(logical_id.to_string(), resource);
        Ok(Value::reference(logical_id))
    }

    pub fn add_output(&mut self, logical_id: &str, output: Output) -> Result<()> {
        if self.outputs.contains_key(logical_id) {
            return Err(TemplateError::DuplicateLogicalId(logical_id.to_string()));
        }
        self.outputs.insert(logical_id.to_string(), output);
        Ok(())
    }

    pub fn resources(&self) -> &BTreeMap<String, Resource> {
        &self.resources
    }

    pub fn parameters(&self) -> &BTreeMap<String, Parameter> {
        &self.parameters
    }

    /// Serialize to the YAML document body submitted to the service.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
