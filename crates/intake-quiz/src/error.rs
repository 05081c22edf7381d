use intake_core::models::ItemId;
use intake_schema::SchemaError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("quiz is invalid: {}", join_issues(.0))]
    Invalid(Vec<QuizIssue>),
}

/// One reason a quiz cannot be saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "issue", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum QuizIssue {
    #[error("quiz title is required")]
    MissingTitle,

    #[error("study id is required")]
    MissingStudyId,

    #[error("quiz has no questions")]
    NoQuestions,

    #[error("question {id} has no text")]
    BlankQuestion { id: ItemId },

    #[error("custom frequency of {days} days is outside 1..={max}")]
    CustomDaysOutOfRange { days: u32, max: u32 },

    #[error("end date {end} is before start date {start}")]
    EndBeforeStart {
        start: jiff::civil::Date,
        end: jiff::civil::Date,
    },
}

fn join_issues(issues: &[QuizIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
