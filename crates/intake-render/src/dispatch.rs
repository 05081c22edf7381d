use intake_forms::{FieldItem, FieldShape};
use intake_quiz::{QuestionItem, QuestionShape, SCALE_MAX, SCALE_MIN};
use intake_schema::SchemaItem;

use crate::control::{Control, ControlDescriptor, InputKind, RenderMode};

/// Turn one schema item into the descriptor for its control.
pub trait Render: SchemaItem {
    fn render(&self, mode: RenderMode) -> ControlDescriptor;
}

impl Render for FieldItem {
    fn render(&self, mode: RenderMode) -> ControlDescriptor {
        let rules = self.effective_validation();
        let control = match &self.shape {
            FieldShape::Text => Control::TextInput {
                input: InputKind::Text,
            },
            FieldShape::Email => Control::TextInput {
                input: InputKind::Email,
            },
            FieldShape::Tel => Control::TextInput {
                input: InputKind::Tel,
            },
            FieldShape::Url => Control::TextInput {
                input: InputKind::Url,
            },
            FieldShape::Textarea => Control::TextArea,
            FieldShape::Number => Control::NumberInput {
                min: rules.min,
                max: rules.max,
            },
            FieldShape::Date => Control::DateInput,
            FieldShape::Select { options } => Control::Select {
                options: options.clone(),
            },
            FieldShape::Checkbox => Control::Checkbox,
            FieldShape::CheckboxGroup { options } => Control::CheckboxGroup {
                options: options.clone(),
            },
            FieldShape::RadioGroup { options } => Control::RadioGroup {
                options: options.clone(),
            },
            FieldShape::Switch => Control::Switch,
        };

        ControlDescriptor {
            item_id: Some(self.id),
            required: self.required,
            description: self.description.clone(),
            placeholder: self.placeholder.clone(),
            constraints: (!rules.is_empty()).then_some(rules),
            default_value: self.default_value.clone(),
            ..ControlDescriptor::new(self.label.clone(), control, mode)
        }
    }
}

impl Render for QuestionItem {
    fn render(&self, mode: RenderMode) -> ControlDescriptor {
        let control = match &self.shape {
            QuestionShape::SingleChoice { options } => Control::RadioGroup {
                options: options.clone(),
            },
            QuestionShape::MultipleChoice { options } => Control::CheckboxGroup {
                options: options.clone(),
            },
            QuestionShape::TrueFalse => Control::TrueFalse,
            QuestionShape::Text => Control::TextArea,
            QuestionShape::Scale => Control::Scale {
                min: SCALE_MIN,
                max: SCALE_MAX,
            },
        };

        ControlDescriptor {
            item_id: Some(self.id),
            required: self.required,
            ..ControlDescriptor::new(self.question.clone(), control, mode)
        }
    }
}
