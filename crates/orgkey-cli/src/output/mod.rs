//! Output formatting helpers for the CLI.
//!
//! This module provides formatting utilities for displaying records
//! and recovered keys as JSON or as text tables.

mod json;
mod rows;
mod text;

// Re-export public API
pub use json::{keys_json, records_json};
pub use rows::{skipped_row, KeyRow, RecordRow};
pub use text::{print_keys, print_records};
