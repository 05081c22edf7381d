//! intake-schema
//!
//! The schema store and mutation layer shared by the form and quiz engines.
//! A [`Schema`] owns an ordered sequence of items and is only ever changed
//! through its named operations, each of which keeps the item invariants
//! intact and reports [`Outcome::Applied`](intake_core::outcome::Outcome),
//! a declined no-op, or a [`SchemaError`].

pub mod error;
pub mod events;
pub mod item;
pub mod mutation;
pub mod registry;
pub mod store;

pub use error::SchemaError;
pub use events::SchemaEvent;
pub use item::{COPY_SUFFIX, SchemaItem};
pub use mutation::{Direction, Mutation, MutationReport};
pub use registry::{ItemType, RawShape, RetypePolicy};
pub use store::Schema;
