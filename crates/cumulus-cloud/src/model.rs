//! Stack and change-set data model

use serde::{Deserialize, Serialize};

/// Capability requested with every submission: the templates manage
/// named IAM resources.
pub const CAPABILITY_NAMED_IAM: &str = "CAPABILITY_NAMED_IAM";

/// Server-side lifecycle status of a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StackStatus {
    /// Created via a review-only change set that was never executed.
    /// Such a stack cannot be updated and is treated as absent.
    ReviewInProgress,
    CreateInProgress,
    CreateComplete,
    CreateFailed,
    UpdateInProgress,
    UpdateComplete,
    UpdateRollbackComplete,
    RollbackInProgress,
    RollbackComplete,
    DeleteInProgress,
    DeleteComplete,
    DeleteFailed,
    #[serde(other)]
    Other,
}

impl StackStatus {
    /// Parse the wire form (`REVIEW_IN_PROGRESS`, ...). Unknown statuses
    /// map to `Other` rather than failing the enumeration.
    pub fn parse(s: &str) -> Self {
        match s {
            "REVIEW_IN_PROGRESS" => StackStatus::ReviewInProgress,
            "CREATE_IN_PROGRESS" => StackStatus::CreateInProgress,
            "CREATE_COMPLETE" => StackStatus::CreateComplete,
            "CREATE_FAILED" => StackStatus::CreateFailed,
            "UPDATE_IN_PROGRESS" => StackStatus::UpdateInProgress,
            "UPDATE_COMPLETE" => StackStatus::UpdateComplete,
            "UPDATE_ROLLBACK_COMPLETE" => StackStatus::UpdateRollbackComplete,
            "ROLLBACK_IN_PROGRESS" => StackStatus::RollbackInProgress,
            "ROLLBACK_COMPLETE" => StackStatus::RollbackComplete,
            "DELETE_IN_PROGRESS" => StackStatus::DeleteInProgress,
            "DELETE_COMPLETE" => StackStatus::DeleteComplete,
            "DELETE_FAILED" => StackStatus::DeleteFailed,
            _ => StackStatus::Other,
        }
    }
}

/// One entry from the stack enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackSummary {
    pub name: String,
    pub status: StackStatus,
}

impl StackSummary {
    pub fn new(name: impl Into<String>, status: StackStatus) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }
}

/// Whether the submission creates a stack or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeSetType {
    Create,
    Update,
}

impl std::fmt::Display for ChangeSetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeSetType::Create => write!(f, "CREATE"),
            ChangeSetType::Update => write!(f, "UPDATE"),
        }
    }
}

/// A key/value deployment parameter supplied alongside the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployParameter {
    pub key: String,
    pub value: String,
}

impl DeployParameter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Request to create a change set against a single stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateChangeSet {
    pub stack_name: String,
    pub change_set_name: String,
    pub change_set_type: ChangeSetType,
    pub template_body: String,
    pub parameters: Vec<DeployParameter>,
    pub capabilities: Vec<String>,
}

/// Creation status of a change set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeSetStatus {
    CreatePending,
    CreateInProgress,
    CreateComplete,
    Failed,
    #[serde(other)]
    Other,
}

impl ChangeSetStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "CREATE_PENDING" => ChangeSetStatus::CreatePending,
            "CREATE_IN_PROGRESS" => ChangeSetStatus::CreateInProgress,
            "CREATE_COMPLETE" => ChangeSetStatus::CreateComplete,
            "FAILED" => ChangeSetStatus::Failed,
            _ => ChangeSetStatus::Other,
        }
    }
}

/// Description of a change set, reported to the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeSetInfo {
    pub change_set_name: String,
    pub stack_name: String,
    pub status: ChangeSetStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_reason: Option<String>,
    pub changes: Vec<ResourceChange>,
}

/// One proposed resource change within a change set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceChange {
    pub action: String,
    pub logical_resource_id: String,
    pub resource_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_review_in_progress() {
        assert_eq!(
            StackStatus::parse("REVIEW_IN_PROGRESS"),
            StackStatus::ReviewInProgress
        );
    }

    #[test]
    fn unknown_status_maps_to_other() {
        assert_eq!(
            StackStatus::parse("IMPORT_ROLLBACK_IN_PROGRESS"),
            StackStatus::Other
        );
        assert_eq!(ChangeSetStatus::parse("DELETE_PENDING"), ChangeSetStatus::Other);
    }

    #[test]
    fn change_set_type_displays_wire_form() {
        assert_eq!(ChangeSetType::Create.to_string(), "CREATE");
        assert_eq!(ChangeSetType::Update.to_string(), "UPDATE");
    }
}
