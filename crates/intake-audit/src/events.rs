use std::fmt;

use intake_core::models::ItemId;
use intake_schema::SchemaEvent;
use serde::Serialize;
use tracing::info;

use crate::error::AuditError;

/// Which kind of definition an audited edit touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Form,
    Quiz,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResourceKind::Form => "form",
            ResourceKind::Quiz => "quiz",
        })
    }
}

/// A structured audit record for one applied schema edit.
///
/// Logged via `tracing` under the `audit.*` field names so a log shipper
/// can route them apart from diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: String,
    pub resource_type: ResourceKind,
    pub resource_id: String,
    pub item_id: Option<ItemId>,
    pub actor: String,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        action: impl Into<String>,
        resource_type: ResourceKind,
        resource_id: impl Into<String>,
        actor: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            resource_type,
            resource_id: resource_id.into(),
            item_id: None,
            actor: actor.into(),
            details: None,
        }
    }

    /// Record a schema event, keeping the full event as details.
    pub fn from_schema_event(
        event: &SchemaEvent,
        resource_type: ResourceKind,
        resource_id: impl Into<String>,
        actor: impl Into<String>,
    ) -> Result<Self, AuditError> {
        let details = serde_json::to_value(event)?;
        Ok(Self {
            item_id: Some(event.item_id()),
            ..Self::new(event.name(), resource_type, resource_id, actor).with_details(details)
        })
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        let item_id = self.item_id.map(|id| id.to_string());
        let details = self.details.as_ref().map(ToString::to_string);
        info!(
            audit.action = %self.action,
            audit.resource_type = %self.resource_type,
            audit.resource_id = %self.resource_id,
            audit.item_id = item_id.as_deref(),
            audit.actor = %self.actor,
            audit.details = details.as_deref(),
            "audit event"
        );
    }
}

/// Convert drained schema events into audit records, in order.
pub fn audit_events(
    events: impl IntoIterator<Item = SchemaEvent>,
    resource_type: ResourceKind,
    resource_id: &str,
    actor: &str,
) -> Result<Vec<AuditEvent>, AuditError> {
    events
        .into_iter()
        .map(|event| AuditEvent::from_schema_event(&event, resource_type, resource_id, actor))
        .collect()
}
