//! TUI widgets for typeahead.
//!
//! Contains reusable UI components.

pub mod header;
pub mod input;
pub mod options;
