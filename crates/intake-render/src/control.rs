use intake_core::models::{DefaultValue, ItemId, OptionList};
use intake_core::validation::ValidationRules;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Where a descriptor is going to be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RenderMode {
    /// Builder canvas: controls are inert, structural editing is offered.
    AuthoringDisabled,
    /// Respondent preview: controls accept input.
    PreviewEnabled,
    /// Archived or locked definition.
    ReadOnly,
}

impl RenderMode {
    pub fn accepts_input(self) -> bool {
        self == RenderMode::PreviewEnabled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum InputKind {
    Text,
    Email,
    Tel,
    Url,
}

/// The widget an item renders as. Exactly one per item type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "control", rename_all = "snake_case", rename_all_fields = "camelCase")]
#[ts(export)]
pub enum Control {
    TextInput {
        input: InputKind,
    },
    TextArea,
    NumberInput {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    DateInput,
    Select {
        options: OptionList,
    },
    Checkbox,
    CheckboxGroup {
        options: OptionList,
    },
    RadioGroup {
        options: OptionList,
    },
    Switch,
    TrueFalse,
    Scale {
        min: u8,
        max: u8,
    },
    /// The stored type tag is not one this build knows.
    Unknown {
        type_name: String,
    },
    /// The item could not be read at all.
    Malformed {
        reason: String,
    },
}

impl Control {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Control::Unknown { .. } | Control::Malformed { .. })
    }
}

/// Builder affordances for one item. Only present on the authoring canvas
/// of a writable schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StructuralControls {
    pub can_move_up: bool,
    pub can_move_down: bool,
    pub can_delete: bool,
    pub can_duplicate: bool,
    pub can_edit_options: bool,
    pub can_remove_option: bool,
    /// Wire tags the item may be retyped to, excluding its current type.
    pub retype_targets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ControlDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
    pub label: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub control: Control,
    pub interactive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<ValidationRules>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structural: Option<StructuralControls>,
}

impl ControlDescriptor {
    pub fn new(label: impl Into<String>, control: Control, mode: RenderMode) -> Self {
        Self {
            item_id: None,
            label: label.into(),
            required: false,
            description: None,
            placeholder: None,
            control,
            interactive: mode.accepts_input(),
            constraints: None,
            default_value: None,
            structural: None,
        }
    }

    /// Fallback controls never accept input, whatever the mode.
    pub(crate) fn fallback(item_id: Option<ItemId>, label: String, control: Control) -> Self {
        Self {
            item_id,
            interactive: false,
            ..Self::new(label, control, RenderMode::ReadOnly)
        }
    }
}
