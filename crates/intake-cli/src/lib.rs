//! intake-cli
//!
//! Command-line front end for checking, previewing and editing form and
//! quiz definitions stored as JSON.

pub mod cli;
pub mod commands;
pub mod logging;
