use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// What a mutation did to the schema.
///
/// Declined operations are reported as [`Outcome::NoOp`] rather than as
/// errors: the schema is left exactly as it was and its version is not
/// bumped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
#[ts(export)]
pub enum Outcome {
    Applied,
    NoOp(NoOpReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum NoOpReason {
    /// Removing the only remaining option.
    LastOption,
    /// Moving the first item up or the last item down.
    AtBoundary,
    /// Retyping an item to the type it already has.
    SameType,
    /// The patch carried no changes.
    EmptyPatch,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}
