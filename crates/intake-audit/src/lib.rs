//! intake-audit
//!
//! Structured audit records for schema edits, emitted through `tracing`.

pub mod error;
pub mod events;

pub use error::AuditError;
pub use events::{AuditEvent, ResourceKind, audit_events};
