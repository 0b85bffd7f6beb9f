//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting, verbosity, and debug logging
//!
//! # Design
//!
//! All CLI output goes through this module so the quiet and debug flags
//! are honored consistently.

pub mod output;
