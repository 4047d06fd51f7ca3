//! Typed CloudFormation template model
//!
//! Templates are immutable values assembled by pure builder functions and
//! serialized to the CloudFormation document format (YAML or JSON). The
//! property structs cover the resource kinds Cumulus stacks declare:
//! KMS, S3, IAM, SNS, DynamoDB, API Gateway and Lambda.

pub mod apigateway;
pub mod dynamodb;
pub mod error;
pub mod iam;
pub mod intrinsic;
pub mod kms;
pub mod lambda;
pub mod policy;
pub mod s3;
pub mod sns;
pub mod template;

pub use error::{Result, TemplateError};
pub use intrinsic::Value;
pub use policy::{Effect, PolicyDocument, Principal, Statement};
pub use template::{
    DeletionPolicy, Output, Parameter, Resource, ResourceProperties, Template,
};
