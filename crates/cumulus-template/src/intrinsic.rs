//! CloudFormation intrinsic functions
//!
//! `Value` is a template-level value: either a literal, a list, or one of
//! the intrinsics (`Ref`, `Fn::GetAtt`, `Fn::Sub`, `Fn::ImportValue`).
//! Serialization produces the exact object forms CloudFormation expects,
//! e.g. `{"Fn::GetAtt": ["Logical", "Arn"]}`.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// A CloudFormation template value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Number(i64),
    Bool(bool),
    List(Vec<Value>),
    Ref(Ref),
    GetAtt(GetAtt),
    Sub(Sub),
    ImportValue(ImportValue),
}

impl Value {
    /// Reference to another resource or parameter by logical id.
    pub fn reference(logical_id: impl Into<String>) -> Self {
        Value::Ref(Ref {
            logical_id: logical_id.into(),
        })
    }

    /// `Fn::GetAtt` on a resource attribute.
    pub fn get_att(logical_id: impl Into<String>, attribute: impl Into<String>) -> Self {
        Value::GetAtt(GetAtt {
            path: vec![logical_id.into(), attribute.into()],
        })
    }

    /// `Fn::Sub` over a template string with `${...}` placeholders.
    pub fn sub(template: impl Into<String>) -> Self {
        Value::Sub(Sub::Plain(template.into()))
    }

    /// `Fn::Sub` with an explicit substitution map.
    pub fn sub_with(
        template: impl Into<String>,
        variables: impl IntoIterator<Item = (String, Value)>,
    ) -> Self {
        Value::Sub(Sub::WithMap(
            template.into(),
            variables.into_iter().collect(),
        ))
    }

    /// `Fn::ImportValue` of a cross-stack export.
    pub fn import(export_name: impl Into<String>) -> Self {
        Value::ImportValue(ImportValue {
            name: export_name.into(),
        })
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// `{"Ref": "..."}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ref {
    #[serde(rename = "Ref")]
    pub logical_id: String,
}

/// `{"Fn::GetAtt": ["Logical", "Attribute"]}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetAtt {
    #[serde(rename = "Fn::GetAtt")]
    pub path: Vec<String>,
}

/// `{"Fn::Sub": "..."}` or `{"Fn::Sub": ["...", {..}]}`
#[derive(Debug, Clone, PartialEq)]
pub enum Sub {
    Plain(String),
    WithMap(String, BTreeMap<String, Value>),
}

impl Serialize for Sub {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Sub::Plain(template) => map.serialize_entry("Fn::Sub", template)?,
            Sub::WithMap(template, variables) => {
                map.serialize_entry("Fn::Sub", &(template, variables))?
            }
        }
        map.end()
    }
}

/// `{"Fn::ImportValue": "..."}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportValue {
    #[serde(rename = "Fn::ImportValue")]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_ref() {
        let v = Value::reference("ArtifactsKey");
        assert_eq!(
            serde_json::to_value(&v).unwrap(),
            json!({"Ref": "ArtifactsKey"})
        );
    }

    #[test]
    fn serializes_get_att() {
        let v = Value::get_att("CFDeployRole", "Arn");
        assert_eq!(
            serde_json::to_value(&v).unwrap(),
            json!({"Fn::GetAtt": ["CFDeployRole", "Arn"]})
        );
    }

    #[test]
    fn serializes_sub() {
        let v = Value::sub("arn:aws:iam::${AWS::AccountId}:root");
        assert_eq!(
            serde_json::to_value(&v).unwrap(),
            json!({"Fn::Sub": "arn:aws:iam::${AWS::AccountId}:root"})
        );
    }

    #[test]
    fn serializes_sub_with_map() {
        let v = Value::sub_with(
            "${fn}/invocations",
            [("fn".to_string(), Value::get_att("AuthorizerFn", "Arn"))],
        );
        assert_eq!(
            serde_json::to_value(&v).unwrap(),
            json!({"Fn::Sub": [
                "${fn}/invocations",
                {"fn": {"Fn::GetAtt": ["AuthorizerFn", "Arn"]}}
            ]})
        );
    }

    #[test]
    fn serializes_import_value() {
        let v = Value::import("DevicesApiId");
        assert_eq!(
            serde_json::to_value(&v).unwrap(),
            json!({"Fn::ImportValue": "DevicesApiId"})
        );
    }

    #[test]
    fn serializes_literals_and_lists() {
        let v: Value = vec!["a", "b"].into();
        assert_eq!(serde_json::to_value(&v).unwrap(), json!(["a", "b"]));
        assert_eq!(serde_json::to_value(Value::from(30)).unwrap(), json!(30));
        assert_eq!(serde_json::to_value(Value::from(true)).unwrap(), json!(true));
    }
}
