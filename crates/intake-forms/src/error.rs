use intake_core::models::ItemId;
use intake_schema::SchemaError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("form is invalid: {}", join_issues(.0))]
    Invalid(Vec<FormIssue>),
}

/// One reason a form cannot be saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum FormIssue {
    #[error("form title is required")]
    MissingTitle,

    #[error("field {id} has no label")]
    BlankLabel { id: ItemId },
}

fn join_issues(issues: &[FormIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
