use std::fmt;

use intake_core::models::{DefaultValue, ItemId, OptionList, ValueKind};
use intake_core::validation::{ValidationKey, ValidationRules};
use intake_schema::{ItemType, RawShape, RetypePolicy, SchemaItem};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Every control a form field can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Date,
    Select,
    Checkbox,
    CheckboxGroup,
    RadioGroup,
    Switch,
    Email,
    Tel,
    Url,
}

impl FieldType {
    /// Free-text entry types: length and pattern constraints apply.
    pub fn is_text_like(self) -> bool {
        matches!(
            self,
            FieldType::Text | FieldType::Textarea | FieldType::Email | FieldType::Tel | FieldType::Url
        )
    }

    /// The constraint keys that mean something for this type.
    pub fn validation_keys(self) -> &'static [ValidationKey] {
        if self.is_text_like() {
            ValidationKey::TEXT
        } else if self == FieldType::Number {
            ValidationKey::NUMERIC
        } else {
            ValidationKey::NONE
        }
    }

    pub fn value_kind(self) -> ValueKind {
        match self {
            FieldType::Number => ValueKind::Number,
            FieldType::Checkbox | FieldType::Switch => ValueKind::Flag,
            FieldType::CheckboxGroup => ValueKind::List,
            FieldType::Text
            | FieldType::Textarea
            | FieldType::Date
            | FieldType::Select
            | FieldType::RadioGroup
            | FieldType::Email
            | FieldType::Tel
            | FieldType::Url => ValueKind::Text,
        }
    }
}

impl ItemType for FieldType {
    const ALL: &'static [Self] = &[
        FieldType::Text,
        FieldType::Textarea,
        FieldType::Number,
        FieldType::Date,
        FieldType::Select,
        FieldType::Checkbox,
        FieldType::CheckboxGroup,
        FieldType::RadioGroup,
        FieldType::Switch,
        FieldType::Email,
        FieldType::Tel,
        FieldType::Url,
    ];

    fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
            FieldType::CheckboxGroup => "checkbox-group",
            FieldType::RadioGroup => "radio-group",
            FieldType::Switch => "switch",
            FieldType::Email => "email",
            FieldType::Tel => "tel",
            FieldType::Url => "url",
        }
    }

    fn display_name(self) -> &'static str {
        match self {
            FieldType::Text => "Text",
            FieldType::Textarea => "Text Area",
            FieldType::Number => "Number",
            FieldType::Date => "Date",
            FieldType::Select => "Dropdown",
            FieldType::Checkbox => "Checkbox",
            FieldType::CheckboxGroup => "Checkbox Group",
            FieldType::RadioGroup => "Radio Group",
            FieldType::Switch => "Switch",
            FieldType::Email => "Email",
            FieldType::Tel => "Phone",
            FieldType::Url => "URL",
        }
    }

    fn carries_options(self) -> bool {
        matches!(
            self,
            FieldType::Select | FieldType::CheckboxGroup | FieldType::RadioGroup
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The type-dependent part of a field. Options live only on the variants
/// that need them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(
    tag = "type",
    rename_all = "kebab-case",
    try_from = "RawShape<FieldType>"
)]
#[ts(export)]
pub enum FieldShape {
    Text,
    Textarea,
    Number,
    Date,
    Select { options: OptionList },
    Checkbox,
    CheckboxGroup { options: OptionList },
    RadioGroup { options: OptionList },
    Switch,
    Email,
    Tel,
    Url,
}

impl FieldShape {
    /// Shape of a freshly added field; choice types get three placeholders.
    pub fn for_new(field_type: FieldType) -> Self {
        Self::build(field_type, || OptionList::numbered(3))
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            FieldShape::Text => FieldType::Text,
            FieldShape::Textarea => FieldType::Textarea,
            FieldShape::Number => FieldType::Number,
            FieldShape::Date => FieldType::Date,
            FieldShape::Select { .. } => FieldType::Select,
            FieldShape::Checkbox => FieldType::Checkbox,
            FieldShape::CheckboxGroup { .. } => FieldType::CheckboxGroup,
            FieldShape::RadioGroup { .. } => FieldType::RadioGroup,
            FieldShape::Switch => FieldType::Switch,
            FieldShape::Email => FieldType::Email,
            FieldShape::Tel => FieldType::Tel,
            FieldShape::Url => FieldType::Url,
        }
    }

    pub fn options(&self) -> Option<&OptionList> {
        match self {
            FieldShape::Select { options }
            | FieldShape::CheckboxGroup { options }
            | FieldShape::RadioGroup { options } => Some(options),
            _ => None,
        }
    }

    pub fn options_mut(&mut self) -> Option<&mut OptionList> {
        match self {
            FieldShape::Select { options }
            | FieldShape::CheckboxGroup { options }
            | FieldShape::RadioGroup { options } => Some(options),
            _ => None,
        }
    }

    /// Shape after switching to `to`: existing options carry over between
    /// choice types, a non-choice source seeds a single placeholder.
    pub fn retyped(self, to: FieldType) -> Self {
        let carried = self.into_options();
        Self::build(to, || carried.unwrap_or_else(|| OptionList::numbered(1)))
    }

    fn into_options(self) -> Option<OptionList> {
        match self {
            FieldShape::Select { options }
            | FieldShape::CheckboxGroup { options }
            | FieldShape::RadioGroup { options } => Some(options),
            _ => None,
        }
    }

    fn build(field_type: FieldType, options: impl FnOnce() -> OptionList) -> Self {
        match field_type {
            FieldType::Text => FieldShape::Text,
            FieldType::Textarea => FieldShape::Textarea,
            FieldType::Number => FieldShape::Number,
            FieldType::Date => FieldShape::Date,
            FieldType::Select => FieldShape::Select { options: options() },
            FieldType::Checkbox => FieldShape::Checkbox,
            FieldType::CheckboxGroup => FieldShape::CheckboxGroup { options: options() },
            FieldType::RadioGroup => FieldShape::RadioGroup { options: options() },
            FieldType::Switch => FieldShape::Switch,
            FieldType::Email => FieldShape::Email,
            FieldType::Tel => FieldShape::Tel,
            FieldType::Url => FieldShape::Url,
        }
    }
}

impl TryFrom<RawShape<FieldType>> for FieldShape {
    type Error = String;

    fn try_from(raw: RawShape<FieldType>) -> Result<Self, String> {
        let (field_type, options) = raw.checked()?;
        Ok(Self::build(field_type, || {
            options.unwrap_or_else(|| OptionList::numbered(1))
        }))
    }
}

/// A single field of a data-collection form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FieldItem {
    pub id: ItemId,
    #[serde(flatten)]
    pub shape: FieldShape,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRules>,
}

impl FieldItem {
    pub fn field_type(&self) -> FieldType {
        self.shape.field_type()
    }

    /// Drop default values that no longer name one of the options.
    fn prune_default(&mut self) {
        let Some(options) = self.shape.options() else {
            return;
        };
        self.default_value = match self.default_value.take() {
            Some(DefaultValue::Text(text)) if !options.contains(&text) => None,
            Some(DefaultValue::List(values)) => {
                let kept: Vec<String> = values
                    .into_iter()
                    .filter(|value| options.contains(value))
                    .collect();
                (!kept.is_empty()).then_some(DefaultValue::List(kept))
            }
            other => other,
        };
    }

    /// Stored rules narrowed to the keys this field's type understands.
    pub fn effective_validation(&self) -> ValidationRules {
        self.validation
            .as_ref()
            .map(|rules| rules.effective(self.field_type().validation_keys()))
            .unwrap_or_default()
    }
}

/// Partial update of a field's identity and constraint data.
///
/// Empty `placeholder`/`description` strings clear the value; an empty
/// `validation` bag removes the bag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
    #[serde(default)]
    pub clear_default_value: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRules>,
}

impl FieldPatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }
}

impl SchemaItem for FieldItem {
    type Type = FieldType;
    type Patch = FieldPatch;

    fn create(id: ItemId, item_type: FieldType) -> Self {
        Self {
            id,
            shape: FieldShape::for_new(item_type),
            label: format!("New {} field", item_type.display_name()),
            placeholder: None,
            description: None,
            required: false,
            default_value: None,
            validation: (item_type == FieldType::Number).then(|| ValidationRules::with_min(0.0)),
        }
    }

    fn id(&self) -> ItemId {
        self.id
    }

    fn set_id(&mut self, id: ItemId) {
        self.id = id;
    }

    fn item_type(&self) -> FieldType {
        self.field_type()
    }

    fn text(&self) -> &str {
        &self.label
    }

    fn set_text(&mut self, text: String) {
        self.label = text;
    }

    fn options(&self) -> Option<&OptionList> {
        self.shape.options()
    }

    fn options_mut(&mut self) -> Option<&mut OptionList> {
        self.shape.options_mut()
    }

    fn retype(&mut self, to: FieldType, policy: RetypePolicy) {
        let shape = std::mem::replace(&mut self.shape, FieldShape::Text);
        self.shape = shape.retyped(to);

        if self
            .default_value
            .as_ref()
            .is_some_and(|value| !value.fits(to.value_kind()))
        {
            self.default_value = None;
        }
        self.prune_default();

        if policy.purge_stale_validation
            && let Some(rules) = self.validation.as_mut()
        {
            rules.retain(to.validation_keys());
            if rules.is_empty() {
                self.validation = None;
            }
        }
    }

    fn apply_patch(&mut self, patch: FieldPatch) -> Result<bool, String> {
        let field_type = self.field_type();
        let mut next = self.clone();

        if let Some(label) = patch.label {
            if label.trim().is_empty() {
                return Err("field label must not be blank".to_string());
            }
            next.label = label;
        }
        if let Some(placeholder) = patch.placeholder {
            next.placeholder = non_empty(placeholder);
        }
        if let Some(description) = patch.description {
            next.description = non_empty(description);
        }
        if let Some(required) = patch.required {
            next.required = required;
        }
        if patch.clear_default_value {
            next.default_value = None;
        }
        if let Some(value) = patch.default_value {
            if !value.fits(field_type.value_kind()) {
                return Err(format!("default value does not fit a {field_type} field"));
            }
            if let Some(options) = self.shape.options()
                && let Some(missing) = first_unknown_choice(&value, options)
            {
                return Err(format!("default '{missing}' is not one of the options"));
            }
            next.default_value = Some(value);
        }
        if let Some(rules) = patch.validation {
            check_rules(field_type, &rules)?;
            next.validation = (!rules.is_empty()).then_some(rules);
        }

        let changed = next != *self;
        *self = next;
        Ok(changed)
    }

    fn options_changed(&mut self) {
        self.prune_default();
    }
}

fn first_unknown_choice<'a>(value: &'a DefaultValue, options: &OptionList) -> Option<&'a str> {
    match value {
        DefaultValue::Text(text) => (!options.contains(text)).then_some(text.as_str()),
        DefaultValue::List(values) => values
            .iter()
            .find(|value| !options.contains(value))
            .map(String::as_str),
        DefaultValue::Flag(_) => None,
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

fn check_rules(field_type: FieldType, rules: &ValidationRules) -> Result<(), String> {
    let applicable = field_type.validation_keys();
    if let Some(key) = rules
        .present_keys()
        .into_iter()
        .find(|key| !applicable.contains(key))
    {
        return Err(format!("{key} does not apply to {field_type} fields"));
    }
    if let (Some(min), Some(max)) = (rules.min_length, rules.max_length)
        && min > max
    {
        return Err(format!("minLength {min} exceeds maxLength {max}"));
    }
    if let (Some(min), Some(max)) = (rules.min, rules.max)
        && min > max
    {
        return Err(format!("min {min} exceeds max {max}"));
    }
    if let Some(pattern) = &rules.pattern
        && let Err(e) = regex::Regex::new(pattern)
    {
        return Err(format!("pattern is not a valid regular expression: {e}"));
    }
    Ok(())
}
