//! intake-core
//!
//! Shared vocabulary of the Intake form and questionnaire engines: item
//! identifiers, option lists, default values, the validation bag, mutation
//! outcomes and engine configuration. No engine logic lives here.

pub mod config;
pub mod error;
pub mod models;
pub mod outcome;
pub mod validation;
