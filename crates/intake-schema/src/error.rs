use intake_core::models::ItemId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("item not found: {id}")]
    ItemNotFound { id: ItemId },

    #[error("option index {index} out of range for item {id} ({len} options)")]
    OptionIndexOutOfRange { id: ItemId, index: usize, len: usize },

    #[error("item {id} of type '{item_type}' has no options")]
    NotOptionsBearing { id: ItemId, item_type: String },

    #[error("rejected: {reason}")]
    Rejected { reason: String },

    #[error("schema is read-only")]
    ReadOnly,

    #[error("stale schema version (expected {expected}, current {actual})")]
    StaleVersion { expected: u64, actual: u64 },

    #[error("duplicate item id: {id}")]
    DuplicateId { id: ItemId },
}
