//! Value validation for submitted form answers.
//!
//! Only the constraint keys that apply to a field's current type are
//! consulted; anything else left in the stored bag by a retype is ignored.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use intake_core::models::{ItemId, OptionList};
use intake_core::validation::{Violation, ViolationKind};
use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::field::{FieldItem, FieldShape};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid"));
static TEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 ()\-.]{2,}$").expect("tel regex is valid"));
static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/?#]+[^\s]*$").expect("url regex is valid"));

/// A submitted answer to one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum FieldValue {
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Empty text and empty selections count as no answer. `false` does not.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::List(values) => values.is_empty(),
            FieldValue::Flag(_) | FieldValue::Number(_) => false,
        }
    }
}

/// Check one answer against its field. `None` means the field was left unanswered.
pub fn validate_field(field: &FieldItem, value: Option<&FieldValue>) -> Vec<Violation> {
    let id = field.id;
    let Some(value) = value.filter(|v| !v.is_blank()) else {
        return if field.required {
            vec![Violation::required(id, &field.label)]
        } else {
            Vec::new()
        };
    };

    let rules = field.effective_validation();
    match (&field.shape, value) {
        (FieldShape::Text | FieldShape::Textarea, FieldValue::Text(text)) => {
            rules.check_text(id, text)
        }
        (FieldShape::Email, FieldValue::Text(text)) => {
            with_format(rules.check_text(id, text), id, text, &EMAIL, "an email address")
        }
        (FieldShape::Tel, FieldValue::Text(text)) => {
            with_format(rules.check_text(id, text), id, text, &TEL, "a phone number")
        }
        (FieldShape::Url, FieldValue::Text(text)) => {
            with_format(rules.check_text(id, text), id, text, &URL, "an http(s) URL")
        }
        (FieldShape::Number, FieldValue::Number(number)) => rules.check_number(id, *number),
        (FieldShape::Number, FieldValue::Text(text)) => match text.trim().parse::<f64>() {
            Ok(number) => rules.check_number(id, number),
            Err(_) => vec![Violation::new(
                id,
                ViolationKind::NotANumber,
                format!("'{text}' is not a number"),
            )],
        },
        (FieldShape::Date, FieldValue::Text(text)) => match text.parse::<jiff::civil::Date>() {
            Ok(_) => Vec::new(),
            Err(_) => vec![Violation::new(
                id,
                ViolationKind::InvalidFormat {
                    expected: "a YYYY-MM-DD date".to_string(),
                },
                format!("'{text}' is not a date"),
            )],
        },
        (FieldShape::Select { options } | FieldShape::RadioGroup { options }, value) => {
            match value {
                FieldValue::Text(choice) => check_choices(id, options, std::slice::from_ref(choice)),
                FieldValue::List(_) => vec![Violation::new(
                    id,
                    ViolationKind::SingleChoiceOnly,
                    "only one option may be selected",
                )],
                _ => wrong_kind(id),
            }
        }
        (FieldShape::CheckboxGroup { options }, value) => match value {
            FieldValue::List(choices) => check_choices(id, options, choices),
            FieldValue::Text(choice) => check_choices(id, options, std::slice::from_ref(choice)),
            _ => wrong_kind(id),
        },
        (FieldShape::Checkbox | FieldShape::Switch, FieldValue::Flag(_)) => Vec::new(),
        _ => wrong_kind(id),
    }
}

/// Validate a whole submission, keyed by field id, in field order.
pub fn validate_submission(
    fields: &[FieldItem],
    values: &BTreeMap<ItemId, FieldValue>,
) -> Vec<Violation> {
    fields
        .iter()
        .flat_map(|field| validate_field(field, values.get(&field.id)))
        .collect()
}

fn check_choices(id: ItemId, options: &OptionList, choices: &[String]) -> Vec<Violation> {
    choices
        .iter()
        .filter(|choice| !options.contains(choice))
        .map(|choice| {
            Violation::new(
                id,
                ViolationKind::NotAnOption {
                    value: choice.clone(),
                },
                format!("'{choice}' is not one of the options"),
            )
        })
        .collect()
}

fn with_format(
    mut violations: Vec<Violation>,
    id: ItemId,
    text: &str,
    re: &Regex,
    expected: &str,
) -> Vec<Violation> {
    if !re.is_match(text.trim()) {
        violations.push(Violation::new(
            id,
            ViolationKind::InvalidFormat {
                expected: expected.to_string(),
            },
            format!("'{text}' is not {expected}"),
        ));
    }
    violations
}

fn wrong_kind(id: ItemId) -> Vec<Violation> {
    vec![Violation::new(
        id,
        ViolationKind::WrongValueKind,
        "value does not match the field type",
    )]
}
