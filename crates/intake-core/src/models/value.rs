use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Pre-filled answer stored on a field definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum DefaultValue {
    Flag(bool),
    Text(String),
    List(Vec<String>),
}

/// The shape of value a control produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ValueKind {
    Text,
    Number,
    Flag,
    List,
}

impl DefaultValue {
    /// Whether this default can pre-fill a control producing `kind`.
    ///
    /// Numbers are stored as text, matching what a browser number input
    /// holds, so a numeric default must parse.
    pub fn fits(&self, kind: ValueKind) -> bool {
        match (self, kind) {
            (DefaultValue::Text(text), ValueKind::Number) => text.trim().parse::<f64>().is_ok(),
            (DefaultValue::Text(_), ValueKind::Text)
            | (DefaultValue::Flag(_), ValueKind::Flag)
            | (DefaultValue::List(_), ValueKind::List) => true,
            _ => false,
        }
    }
}
