use intake_core::models::ItemId;
use serde::Serialize;

/// A change applied to a schema, queued for the caller to observe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum SchemaEvent {
    ItemAdded { id: ItemId, item_type: &'static str },
    ItemUpdated { id: ItemId },
    ItemDeleted { id: ItemId, index: usize },
    ItemDuplicated { source: ItemId, id: ItemId },
    ItemMoved { id: ItemId, from: usize, to: usize },
    ItemRetyped { id: ItemId, from: &'static str, to: &'static str },
    OptionAdded { id: ItemId, index: usize },
    OptionRemoved { id: ItemId, index: usize },
    OptionChanged { id: ItemId, index: usize },
}

impl SchemaEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SchemaEvent::ItemAdded { .. } => "item_added",
            SchemaEvent::ItemUpdated { .. } => "item_updated",
            SchemaEvent::ItemDeleted { .. } => "item_deleted",
            SchemaEvent::ItemDuplicated { .. } => "item_duplicated",
            SchemaEvent::ItemMoved { .. } => "item_moved",
            SchemaEvent::ItemRetyped { .. } => "item_retyped",
            SchemaEvent::OptionAdded { .. } => "option_added",
            SchemaEvent::OptionRemoved { .. } => "option_removed",
            SchemaEvent::OptionChanged { .. } => "option_changed",
        }
    }

    /// The item the event is about (the new copy, for duplicates).
    pub fn item_id(&self) -> ItemId {
        match self {
            SchemaEvent::ItemAdded { id, .. }
            | SchemaEvent::ItemUpdated { id }
            | SchemaEvent::ItemDeleted { id, .. }
            | SchemaEvent::ItemDuplicated { id, .. }
            | SchemaEvent::ItemMoved { id, .. }
            | SchemaEvent::ItemRetyped { id, .. }
            | SchemaEvent::OptionAdded { id, .. }
            | SchemaEvent::OptionRemoved { id, .. }
            | SchemaEvent::OptionChanged { id, .. } => *id,
        }
    }
}
