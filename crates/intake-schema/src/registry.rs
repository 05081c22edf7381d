use std::fmt;

use intake_core::config::EngineConfig;
use intake_core::models::OptionList;
use serde::Deserialize;

/// A closed set of item types.
///
/// Implemented by the field and question type enums. The trait carries the
/// per-type facts the store needs; the type-specific shape rules live on the
/// item itself (see [`SchemaItem::retype`](crate::SchemaItem::retype)).
pub trait ItemType: Copy + Eq + fmt::Debug + fmt::Display + 'static {
    /// Every member of the registry, in authoring-menu order.
    const ALL: &'static [Self];

    /// Wire tag, e.g. `"checkbox-group"` or `"single_choice"`.
    fn as_str(self) -> &'static str;

    /// Human-readable name for menus and default labels.
    fn display_name(self) -> &'static str;

    /// Whether items of this type own a non-empty option list.
    fn carries_options(self) -> bool;

    fn parse(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == tag)
    }
}

/// How a retype treats data left over from the previous type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetypePolicy {
    /// Clear validation keys that do not apply to the new type.
    pub purge_stale_validation: bool,
}

impl From<&EngineConfig> for RetypePolicy {
    fn from(config: &EngineConfig) -> Self {
        Self {
            purge_stale_validation: config.purge_stale_validation,
        }
    }
}

/// The type tag and option list of a stored item, before they are checked
/// against each other.
///
/// Shape enums deserialize through this so that a choice type without
/// `options`, or a non-choice type carrying them, is refused on load.
#[derive(Debug, Clone, Deserialize)]
pub struct RawShape<T> {
    #[serde(rename = "type")]
    pub item_type: T,
    #[serde(default)]
    pub options: Option<OptionList>,
}

impl<T: ItemType> RawShape<T> {
    pub fn checked(self) -> Result<(T, Option<OptionList>), String> {
        match (self.item_type.carries_options(), self.options) {
            (true, None) => Err(format!("{} items require options", self.item_type.as_str())),
            (false, Some(_)) => Err(format!(
                "{} items do not take options",
                self.item_type.as_str()
            )),
            (_, options) => Ok((self.item_type, options)),
        }
    }
}
