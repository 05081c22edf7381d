use intake_forms::FormDefinition;
use intake_quiz::QuizDefinition;
use intake_schema::{ItemType, Schema, SchemaItem};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::control::{ControlDescriptor, RenderMode, StructuralControls};
use crate::dispatch::Render;

/// A rendered definition: heading plus one descriptor per item, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SchemaView {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub mode: RenderMode,
    pub read_only: bool,
    pub controls: Vec<ControlDescriptor>,
}

/// Render every item of `schema`. Structural controls are attached only on
/// the authoring canvas of a writable schema; a read-only schema always
/// renders in [`RenderMode::ReadOnly`].
pub fn render_schema<I: Render>(schema: &Schema<I>, mode: RenderMode) -> Vec<ControlDescriptor> {
    let mode = effective_mode(schema, mode);
    let authoring = mode == RenderMode::AuthoringDisabled && !schema.is_read_only();
    let last = schema.len().saturating_sub(1);
    schema
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mut descriptor = item.render(mode);
            if authoring {
                descriptor.structural = Some(structural(item, index, last));
            }
            descriptor
        })
        .collect()
}

pub fn render_form(form: &FormDefinition, mode: RenderMode) -> SchemaView {
    SchemaView {
        title: form.title.clone(),
        description: form.description.clone(),
        mode: effective_mode(&form.fields, mode),
        read_only: form.fields.is_read_only(),
        controls: render_schema(&form.fields, mode),
    }
}

pub fn render_quiz(quiz: &QuizDefinition, mode: RenderMode) -> SchemaView {
    SchemaView {
        title: quiz.title.clone(),
        description: Some(quiz.description.clone()).filter(|d| !d.is_empty()),
        mode: effective_mode(&quiz.questions, mode),
        read_only: quiz.questions.is_read_only(),
        controls: render_schema(&quiz.questions, mode),
    }
}

fn effective_mode<I: SchemaItem>(schema: &Schema<I>, mode: RenderMode) -> RenderMode {
    if schema.is_read_only() {
        RenderMode::ReadOnly
    } else {
        mode
    }
}

fn structural<I: SchemaItem>(item: &I, index: usize, last: usize) -> StructuralControls {
    let current = item.item_type();
    StructuralControls {
        can_move_up: index > 0,
        can_move_down: index < last,
        can_delete: true,
        can_duplicate: true,
        can_edit_options: item.options().is_some(),
        can_remove_option: item.options().is_some_and(|options| options.len() > 1),
        retype_targets: <I::Type as ItemType>::ALL
            .iter()
            .filter(|t| **t != current)
            .map(|t| t.as_str().to_string())
            .collect(),
    }
}
