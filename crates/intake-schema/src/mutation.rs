use intake_core::models::ItemId;
use intake_core::outcome::Outcome;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::SchemaError;
use crate::item::SchemaItem;
use crate::store::Schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Direction {
    Up,
    Down,
}

/// One schema operation as a message, e.g. `{"op": "move", "id": "…", "direction": "up"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    tag = "op",
    rename_all = "snake_case",
    rename_all_fields = "camelCase",
    bound(
        serialize = "I::Type: Serialize, I::Patch: Serialize",
        deserialize = "I::Type: Deserialize<'de>, I::Patch: Deserialize<'de>"
    )
)]
pub enum Mutation<I: SchemaItem> {
    Add {
        #[serde(rename = "type")]
        item_type: I::Type,
    },
    Update {
        id: ItemId,
        patch: I::Patch,
    },
    Delete {
        id: ItemId,
    },
    Duplicate {
        id: ItemId,
    },
    Move {
        id: ItemId,
        direction: Direction,
    },
    Retype {
        id: ItemId,
        #[serde(rename = "type")]
        item_type: I::Type,
    },
    AddOption {
        id: ItemId,
    },
    RemoveOption {
        id: ItemId,
        index: usize,
    },
    SetOption {
        id: ItemId,
        index: usize,
        value: String,
    },
}

/// Result of [`Schema::apply`]; `created` is set for adds and duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MutationReport {
    #[serde(flatten)]
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<ItemId>,
}

impl MutationReport {
    fn outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            created: None,
        }
    }

    fn created(id: ItemId) -> Self {
        Self {
            outcome: Outcome::Applied,
            created: Some(id),
        }
    }
}

impl<I: SchemaItem> Schema<I> {
    pub fn apply(&mut self, mutation: Mutation<I>) -> Result<MutationReport, SchemaError> {
        match mutation {
            Mutation::Add { item_type } => self.add_item(item_type).map(MutationReport::created),
            Mutation::Update { id, patch } => {
                self.update_item(id, patch).map(MutationReport::outcome)
            }
            Mutation::Delete { id } => self.delete_item(id).map(MutationReport::outcome),
            Mutation::Duplicate { id } => self.duplicate_item(id).map(MutationReport::created),
            Mutation::Move { id, direction } => {
                self.move_item(id, direction).map(MutationReport::outcome)
            }
            Mutation::Retype { id, item_type } => {
                self.retype_item(id, item_type).map(MutationReport::outcome)
            }
            Mutation::AddOption { id } => self.add_option(id).map(MutationReport::outcome),
            Mutation::RemoveOption { id, index } => {
                self.remove_option(id, index).map(MutationReport::outcome)
            }
            Mutation::SetOption { id, index, value } => {
                self.set_option(id, index, value).map(MutationReport::outcome)
            }
        }
    }

    /// Apply `mutation` only if the schema is still at `expected_version`.
    ///
    /// Lets concurrent editors detect that they computed an edit against a
    /// schema someone else has since changed.
    pub fn apply_at(
        &mut self,
        expected_version: u64,
        mutation: Mutation<I>,
    ) -> Result<MutationReport, SchemaError> {
        if self.version() != expected_version {
            return Err(SchemaError::StaleVersion {
                expected: expected_version,
                actual: self.version(),
            });
        }
        self.apply(mutation)
    }
}
