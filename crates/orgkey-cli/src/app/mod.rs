//! Application-level utilities for the Orgkey CLI.
//!
//! This module provides:
//! - Lazy config loading behind an application context
//! - Resolution of key file locations from config and flags

mod context;
mod key_sources;

// Re-export public API
pub use context::AppContext;
pub use key_sources::{resolve_key_sources, KeySources};
