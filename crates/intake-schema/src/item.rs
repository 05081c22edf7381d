use std::fmt;

use intake_core::models::{ItemId, OptionList};

use crate::registry::{ItemType, RetypePolicy};

/// Appended to the label or question text of a duplicated item.
pub const COPY_SUFFIX: &str = " (Copy)";

/// An item the [`Schema`](crate::Schema) store can hold.
pub trait SchemaItem: Clone + fmt::Debug + PartialEq {
    type Type: ItemType;
    /// Partial update of the item's identity fields (never its type or options).
    type Patch: Clone + fmt::Debug;

    /// Build a fresh item of `item_type` with the type's creation defaults.
    fn create(id: ItemId, item_type: Self::Type) -> Self;

    fn id(&self) -> ItemId;

    fn set_id(&mut self, id: ItemId);

    fn item_type(&self) -> Self::Type;

    /// Label of a field, text of a question.
    fn text(&self) -> &str;

    fn set_text(&mut self, text: String);

    fn options(&self) -> Option<&OptionList>;

    fn options_mut(&mut self) -> Option<&mut OptionList>;

    /// Move the item to `to`, re-deriving every type-dependent part.
    ///
    /// Options survive between options-bearing types, are dropped for
    /// non-options types and are seeded with a single placeholder when coming
    /// from a non-options type. Identity fields are untouched.
    fn retype(&mut self, to: Self::Type, policy: RetypePolicy);

    /// Apply `patch`. Returns `Ok(false)` for a patch with no changes.
    ///
    /// On `Err(reason)` the item must be left untouched.
    fn apply_patch(&mut self, patch: Self::Patch) -> Result<bool, String>;

    /// Called after an option was removed or relabelled, so data that
    /// refers to option labels can be brought back in line.
    fn options_changed(&mut self) {}

    /// Deep copy under a fresh id with [`COPY_SUFFIX`] appended to the text.
    fn duplicate(&self, id: ItemId) -> Self {
        let mut copy = self.clone();
        copy.set_id(id);
        copy.set_text(format!("{}{COPY_SUFFIX}", self.text()));
        copy
    }
}
