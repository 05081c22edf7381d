use intake_core::config::EngineConfig;
use intake_schema::{RetypePolicy, Schema};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{FormError, FormIssue};
use crate::field::FieldItem;

/// A data-collection form: metadata plus its ordered fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FormDefinition {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    #[ts(as = "Vec<FieldItem>")]
    pub fields: Schema<FieldItem>,
}

impl FormDefinition {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            fields: Schema::new(),
        }
    }

    /// Apply engine policy to the field schema.
    pub fn configure(&mut self, config: &EngineConfig) {
        self.fields.set_policy(RetypePolicy::from(config));
    }

    /// Rejects `title` if blank; the form is left unchanged.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), FormError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(FormError::Invalid(vec![FormIssue::MissingTitle]));
        }
        self.title = title;
        Ok(())
    }

    /// Collect every reason the form cannot be saved.
    pub fn issues(&self) -> Vec<FormIssue> {
        let mut issues = Vec::new();
        if self.title.trim().is_empty() {
            issues.push(FormIssue::MissingTitle);
        }
        issues.extend(
            self.fields
                .iter()
                .filter(|field| field.label.trim().is_empty())
                .map(|field| FormIssue::BlankLabel { id: field.id }),
        );
        issues
    }

    pub fn validate(&self) -> Result<(), FormError> {
        let issues = self.issues();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(FormError::Invalid(issues))
        }
    }

    /// Validate, then hand the form to the persistence collaborator.
    pub fn save<F, E>(&self, on_save: F) -> Result<(), E>
    where
        F: FnOnce(&FormDefinition) -> Result<(), E>,
        E: From<FormError>,
    {
        if let Err(e) = self.validate() {
            tracing::warn!(title = %self.title, error = %e, "form save rejected");
            return Err(e.into());
        }
        on_save(self)?;
        tracing::info!(
            title = %self.title,
            fields = self.fields.len(),
            version = self.fields.version(),
            "form saved"
        );
        Ok(())
    }
}
