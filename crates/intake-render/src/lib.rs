//! intake-render
//!
//! Maps form fields and quiz questions onto UI control descriptors.
//! Rendering is total: malformed or unknown input degrades to a fallback
//! control instead of failing, and nothing here mutates a schema.

pub mod control;
pub mod dispatch;
pub mod raw;
pub mod view;

pub use control::{Control, ControlDescriptor, InputKind, RenderMode, StructuralControls};
pub use dispatch::Render;
pub use raw::{render_raw_field, render_raw_question};
pub use view::{SchemaView, render_form, render_quiz, render_schema};
