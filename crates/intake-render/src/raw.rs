//! Rendering straight from stored JSON.
//!
//! Definitions written by a newer build may carry type tags this one does
//! not know, and hand-edited files may not parse. Both still produce a
//! descriptor so the rest of the form stays usable.

use intake_core::models::ItemId;
use intake_forms::{FieldItem, FieldType};
use intake_quiz::{QuestionItem, QuestionType};
use intake_schema::ItemType;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::control::{Control, ControlDescriptor, RenderMode};
use crate::dispatch::Render;

pub fn render_raw_field(value: &Value, mode: RenderMode) -> ControlDescriptor {
    render_raw::<FieldItem, FieldType>(value, "label", mode)
}

pub fn render_raw_question(value: &Value, mode: RenderMode) -> ControlDescriptor {
    render_raw::<QuestionItem, QuestionType>(value, "question", mode)
}

fn render_raw<I, T>(value: &Value, text_key: &str, mode: RenderMode) -> ControlDescriptor
where
    I: Render + DeserializeOwned,
    T: ItemType,
{
    let item_id = value
        .get("id")
        .and_then(Value::as_str)
        .and_then(|id| id.parse::<ItemId>().ok());
    let label = value
        .get(text_key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let Some(tag) = value.get("type").and_then(Value::as_str) else {
        tracing::warn!(?item_id, "item has no type tag");
        let reason = "missing \"type\" tag".to_string();
        return ControlDescriptor::fallback(item_id, label, Control::Malformed { reason });
    };

    if T::parse(tag).is_none() {
        tracing::warn!(?item_id, type_name = tag, "unknown item type");
        let control = Control::Unknown {
            type_name: tag.to_string(),
        };
        return ControlDescriptor::fallback(item_id, label, control);
    }

    match serde_json::from_value::<I>(value.clone()) {
        Ok(item) => item.render(mode),
        Err(e) => {
            tracing::warn!(?item_id, type_name = tag, error = %e, "malformed item");
            let control = Control::Malformed {
                reason: e.to_string(),
            };
            ControlDescriptor::fallback(item_id, label, control)
        }
    }
}
