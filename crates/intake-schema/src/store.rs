use std::collections::HashSet;

use intake_core::models::options::Removal;
use intake_core::models::{ItemId, OptionList};
use intake_core::outcome::{NoOpReason, Outcome};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::error::SchemaError;
use crate::events::SchemaEvent;
use crate::item::SchemaItem;
use crate::mutation::Direction;
use crate::registry::{ItemType, RetypePolicy};

/// Ordered sequence of items owned by one authoring session.
///
/// Serializes as a plain array of items; version, read-only flag, policy and
/// pending events are session state and never reach the wire.
///
/// Every applied mutation queues a [`SchemaEvent`]. The queue is only
/// emptied by [`Schema::drain_events`], so a long-lived session must drain
/// it (typically after each batch of edits) or it grows without bound.
#[derive(Debug, Clone)]
pub struct Schema<I: SchemaItem> {
    items: Vec<I>,
    version: u64,
    read_only: bool,
    policy: RetypePolicy,
    events: Vec<SchemaEvent>,
}

impl<I: SchemaItem> Default for Schema<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: SchemaItem> PartialEq for Schema<I> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<I: SchemaItem> Schema<I> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            version: 0,
            read_only: false,
            policy: RetypePolicy::default(),
            events: Vec::new(),
        }
    }

    /// Adopt an externally supplied sequence, rejecting duplicate ids.
    pub fn from_items(items: Vec<I>) -> Result<Self, SchemaError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id()) {
                return Err(SchemaError::DuplicateId { id: item.id() });
            }
        }
        Ok(Self {
            items,
            ..Self::new()
        })
    }

    pub fn with_policy(mut self, policy: RetypePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn set_policy(&mut self, policy: RetypePolicy) {
        self.policy = policy;
    }

    pub fn policy(&self) -> RetypePolicy {
        self.policy
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Incremented by every applied mutation; declined no-ops leave it alone.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn items(&self) -> &[I] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, I> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&I> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Number of events waiting to be drained.
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Take the events queued by mutations since the last drain.
    pub fn drain_events(&mut self) -> Vec<SchemaEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn into_items(self) -> Vec<I> {
        self.items
    }

    /// Append a new item of `item_type` with its creation defaults.
    pub fn add_item(&mut self, item_type: I::Type) -> Result<ItemId, SchemaError> {
        self.ensure_writable()?;
        let id = self.fresh_id();
        self.items.push(I::create(id, item_type));
        self.record(SchemaEvent::ItemAdded {
            id,
            item_type: item_type.as_str(),
        });
        Ok(id)
    }

    pub fn update_item(&mut self, id: ItemId, patch: I::Patch) -> Result<Outcome, SchemaError> {
        self.ensure_writable()?;
        let index = self.index_of(id)?;
        match self.items[index].apply_patch(patch) {
            Ok(true) => {
                self.record(SchemaEvent::ItemUpdated { id });
                Ok(Outcome::Applied)
            }
            Ok(false) => Ok(Outcome::NoOp(NoOpReason::EmptyPatch)),
            Err(reason) => {
                warn!(item = %id, %reason, "update rejected");
                Err(SchemaError::Rejected { reason })
            }
        }
    }

    pub fn delete_item(&mut self, id: ItemId) -> Result<Outcome, SchemaError> {
        self.ensure_writable()?;
        let index = self.index_of(id)?;
        self.items.remove(index);
        self.record(SchemaEvent::ItemDeleted { id, index });
        Ok(Outcome::Applied)
    }

    /// Copy an item to the end of the sequence and return the copy's id.
    pub fn duplicate_item(&mut self, id: ItemId) -> Result<ItemId, SchemaError> {
        self.ensure_writable()?;
        let index = self.index_of(id)?;
        let copy_id = self.fresh_id();
        let copy = self.items[index].duplicate(copy_id);
        self.items.push(copy);
        self.record(SchemaEvent::ItemDuplicated {
            source: id,
            id: copy_id,
        });
        Ok(copy_id)
    }

    /// Swap an item with its neighbour. Moving past either end is a no-op.
    pub fn move_item(&mut self, id: ItemId, direction: Direction) -> Result<Outcome, SchemaError> {
        self.ensure_writable()?;
        let from = self.index_of(id)?;
        let to = match direction {
            Direction::Up => from.checked_sub(1),
            Direction::Down => Some(from + 1).filter(|&to| to < self.items.len()),
        };
        let Some(to) = to else {
            return Ok(Outcome::NoOp(NoOpReason::AtBoundary));
        };
        self.items.swap(from, to);
        self.record(SchemaEvent::ItemMoved { id, from, to });
        Ok(Outcome::Applied)
    }

    pub fn retype_item(&mut self, id: ItemId, item_type: I::Type) -> Result<Outcome, SchemaError> {
        self.ensure_writable()?;
        let index = self.index_of(id)?;
        let from = self.items[index].item_type();
        if from == item_type {
            return Ok(Outcome::NoOp(NoOpReason::SameType));
        }
        let policy = self.policy;
        self.items[index].retype(item_type, policy);
        self.record(SchemaEvent::ItemRetyped {
            id,
            from: from.as_str(),
            to: item_type.as_str(),
        });
        Ok(Outcome::Applied)
    }

    /// Append an `"Option N"` placeholder.
    pub fn add_option(&mut self, id: ItemId) -> Result<Outcome, SchemaError> {
        self.ensure_writable()?;
        let index = self.options_mut(id)?.push_placeholder();
        self.record(SchemaEvent::OptionAdded { id, index });
        Ok(Outcome::Applied)
    }

    /// Remove one option. The last remaining option is never removed.
    pub fn remove_option(&mut self, id: ItemId, index: usize) -> Result<Outcome, SchemaError> {
        self.ensure_writable()?;
        let removal = self.options_mut(id)?.remove(index);
        match removal {
            Removal::Removed(_) => {
                self.item_mut(id)?.options_changed();
                self.record(SchemaEvent::OptionRemoved { id, index });
                Ok(Outcome::Applied)
            }
            Removal::LastOption => Ok(Outcome::NoOp(NoOpReason::LastOption)),
            Removal::OutOfRange { len } => {
                Err(SchemaError::OptionIndexOutOfRange { id, index, len })
            }
        }
    }

    pub fn set_option(
        &mut self,
        id: ItemId,
        index: usize,
        value: impl Into<String>,
    ) -> Result<Outcome, SchemaError> {
        self.ensure_writable()?;
        let options = self.options_mut(id)?;
        let len = options.len();
        if options.set(index, value.into()).is_none() {
            return Err(SchemaError::OptionIndexOutOfRange { id, index, len });
        }
        self.item_mut(id)?.options_changed();
        self.record(SchemaEvent::OptionChanged { id, index });
        Ok(Outcome::Applied)
    }

    /// Hand the finalized sequence to the persistence collaborator.
    pub fn save<F, E>(&self, on_save: F) -> Result<(), E>
    where
        F: FnOnce(&[I]) -> Result<(), E>,
    {
        on_save(&self.items)?;
        info!(items = self.items.len(), version = self.version, "schema saved");
        Ok(())
    }

    fn ensure_writable(&self) -> Result<(), SchemaError> {
        if self.read_only {
            return Err(SchemaError::ReadOnly);
        }
        Ok(())
    }

    fn index_of(&self, id: ItemId) -> Result<usize, SchemaError> {
        self.position(id).ok_or(SchemaError::ItemNotFound { id })
    }

    fn item_mut(&mut self, id: ItemId) -> Result<&mut I, SchemaError> {
        let index = self.index_of(id)?;
        Ok(&mut self.items[index])
    }

    fn options_mut(&mut self, id: ItemId) -> Result<&mut OptionList, SchemaError> {
        let index = self.index_of(id)?;
        let item = &mut self.items[index];
        let item_type = item.item_type();
        item.options_mut().ok_or_else(|| SchemaError::NotOptionsBearing {
            id,
            item_type: item_type.as_str().to_string(),
        })
    }

    fn fresh_id(&self) -> ItemId {
        loop {
            let id = ItemId::new();
            if self.position(id).is_none() {
                return id;
            }
        }
    }

    fn record(&mut self, event: SchemaEvent) {
        self.version += 1;
        debug!(
            event = event.name(),
            item = %event.item_id(),
            version = self.version,
            "schema mutated"
        );
        self.events.push(event);
    }
}

impl<I: SchemaItem + Serialize> Serialize for Schema<I> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de, I: SchemaItem + Deserialize<'de>> Deserialize<'de> for Schema<I> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<I>::deserialize(deserializer)?;
        Schema::from_items(items).map_err(serde::de::Error::custom)
    }
}
