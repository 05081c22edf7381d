//! intake-forms
//!
//! The form field engine: the closed set of field types, the field item and
//! its shape rules, value validation, and the form aggregate handed to the
//! save boundary.

pub mod error;
pub mod field;
pub mod form;
pub mod validate;

pub use error::{FormError, FormIssue};
pub use field::{FieldItem, FieldPatch, FieldShape, FieldType};
pub use form::FormDefinition;
pub use validate::{FieldValue, validate_field, validate_submission};
