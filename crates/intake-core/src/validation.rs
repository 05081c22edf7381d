//! Type-agnostic validation bag and value checks.
//!
//! Each item type declares which [`ValidationKey`]s apply to it. Stored rules
//! outside that subset may survive a retype, so callers always narrow the bag
//! with [`ValidationRules::effective`] before checking a value.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::models::ItemId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ValidationKey {
    MinLength,
    MaxLength,
    Pattern,
    Min,
    Max,
}

impl ValidationKey {
    pub const TEXT: &'static [ValidationKey] = &[
        ValidationKey::MinLength,
        ValidationKey::MaxLength,
        ValidationKey::Pattern,
    ];
    pub const NUMERIC: &'static [ValidationKey] = &[ValidationKey::Min, ValidationKey::Max];
    pub const NONE: &'static [ValidationKey] = &[];
}

impl fmt::Display for ValidationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValidationKey::MinLength => "minLength",
            ValidationKey::MaxLength => "maxLength",
            ValidationKey::Pattern => "pattern",
            ValidationKey::Min => "min",
            ValidationKey::Max => "max",
        };
        f.write_str(name)
    }
}

/// Constraint bag stored on a field. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ValidationRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl ValidationRules {
    pub fn with_min(min: f64) -> Self {
        Self {
            min: Some(min),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.present_keys().is_empty()
    }

    pub fn present_keys(&self) -> Vec<ValidationKey> {
        let mut keys = Vec::new();
        if self.min_length.is_some() {
            keys.push(ValidationKey::MinLength);
        }
        if self.max_length.is_some() {
            keys.push(ValidationKey::MaxLength);
        }
        if self.pattern.is_some() {
            keys.push(ValidationKey::Pattern);
        }
        if self.min.is_some() {
            keys.push(ValidationKey::Min);
        }
        if self.max.is_some() {
            keys.push(ValidationKey::Max);
        }
        keys
    }

    /// A copy holding only the keys in `applicable`.
    pub fn effective(&self, applicable: &[ValidationKey]) -> ValidationRules {
        let mut rules = self.clone();
        rules.retain(applicable);
        rules
    }

    /// Drop every key not in `applicable`.
    pub fn retain(&mut self, applicable: &[ValidationKey]) {
        let keep = |key: ValidationKey| applicable.contains(&key);
        if !keep(ValidationKey::MinLength) {
            self.min_length = None;
        }
        if !keep(ValidationKey::MaxLength) {
            self.max_length = None;
        }
        if !keep(ValidationKey::Pattern) {
            self.pattern = None;
        }
        if !keep(ValidationKey::Min) {
            self.min = None;
        }
        if !keep(ValidationKey::Max) {
            self.max = None;
        }
    }

    /// Check free text against the length and pattern keys.
    pub fn check_text(&self, item_id: ItemId, text: &str) -> Vec<Violation> {
        let mut violations = Vec::new();
        let len = text.chars().count();

        if let Some(min) = self.min_length
            && len < min as usize
        {
            violations.push(Violation::new(
                item_id,
                ViolationKind::TooShort { min },
                format!("must be at least {min} characters (got {len})"),
            ));
        }
        if let Some(max) = self.max_length
            && len > max as usize
        {
            violations.push(Violation::new(
                item_id,
                ViolationKind::TooLong { max },
                format!("must be at most {max} characters (got {len})"),
            ));
        }
        if let Some(pattern) = &self.pattern {
            match Regex::new(&format!("^(?:{pattern})$")) {
                Ok(re) if !re.is_match(text) => violations.push(Violation::new(
                    item_id,
                    ViolationKind::PatternMismatch {
                        pattern: pattern.clone(),
                    },
                    format!("does not match pattern `{pattern}`"),
                )),
                Ok(_) => {}
                Err(e) => violations.push(Violation::new(
                    item_id,
                    ViolationKind::InvalidPattern {
                        pattern: pattern.clone(),
                    },
                    format!("pattern `{pattern}` is not a valid regular expression: {e}"),
                )),
            }
        }
        violations
    }

    /// Check a number against the inclusive `min`/`max` bounds.
    pub fn check_number(&self, item_id: ItemId, value: f64) -> Vec<Violation> {
        let mut violations = Vec::new();
        if let Some(min) = self.min
            && value < min
        {
            violations.push(Violation::new(
                item_id,
                ViolationKind::BelowMin { min },
                format!("{value} is below the minimum of {min}"),
            ));
        }
        if let Some(max) = self.max
            && value > max
        {
            violations.push(Violation::new(
                item_id,
                ViolationKind::AboveMax { max },
                format!("{value} is above the maximum of {max}"),
            ));
        }
        violations
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum ViolationKind {
    Required,
    TooShort { min: u32 },
    TooLong { max: u32 },
    PatternMismatch { pattern: String },
    InvalidPattern { pattern: String },
    BelowMin { min: f64 },
    AboveMax { max: f64 },
    NotANumber,
    NotAnOption { value: String },
    SingleChoiceOnly,
    InvalidFormat { expected: String },
    WrongValueKind,
}

/// A value failing one of its item's constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct Violation {
    pub item_id: ItemId,
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub fn new(item_id: ItemId, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            item_id,
            kind,
            message: message.into(),
        }
    }

    pub fn required(item_id: ItemId, label: &str) -> Self {
        Self::new(item_id, ViolationKind::Required, format!("{label} is required"))
    }
}
