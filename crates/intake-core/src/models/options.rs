use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Ordered, never-empty list of choice labels.
///
/// Only options-bearing item shapes own one of these, so an options-based
/// control can always assume at least one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(try_from = "Vec<String>")]
#[ts(export)]
pub struct OptionList(Vec<String>);

/// Result of asking an [`OptionList`] to drop an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    Removed(String),
    /// The list holds a single option; nothing was removed.
    LastOption,
    OutOfRange { len: usize },
}

impl OptionList {
    /// `"Option 1"` .. `"Option count"`. A count of zero still yields one option.
    pub fn numbered(count: usize) -> Self {
        Self((1..=count.max(1)).map(placeholder).collect())
    }

    pub fn new(options: Vec<String>) -> Result<Self, CoreError> {
        if options.is_empty() {
            return Err(CoreError::EmptyOptions);
        }
        Ok(Self(options))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|o| o == value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Append the next numbered placeholder and return its index.
    pub fn push_placeholder(&mut self) -> usize {
        let label = placeholder(self.0.len() + 1);
        self.0.push(label);
        self.0.len() - 1
    }

    /// A single-entry list refuses before the index is looked at.
    pub fn remove(&mut self, index: usize) -> Removal {
        if self.0.len() == 1 {
            return Removal::LastOption;
        }
        if index >= self.0.len() {
            return Removal::OutOfRange { len: self.0.len() };
        }
        Removal::Removed(self.0.remove(index))
    }

    /// Replace the option at `index`, returning the previous label.
    pub fn set(&mut self, index: usize, value: String) -> Option<String> {
        let slot = self.0.get_mut(index)?;
        Some(std::mem::replace(slot, value))
    }
}

impl TryFrom<Vec<String>> for OptionList {
    type Error = CoreError;

    fn try_from(options: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(options)
    }
}

impl<'a> IntoIterator for &'a OptionList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn placeholder(ordinal: usize) -> String {
    format!("Option {ordinal}")
}
