//! core
//!
//! Natural ordering: the domain logic behind every command and patch.
//!
//! # Modules
//!
//! - [`chunk`] - Split a label into numeric and text runs
//! - [`compare`] - Three-way natural comparison and case folding
//! - [`sort`] - Stable natural sort over arbitrary items
//! - [`types`] - Labels extracted from loosely typed input
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Pure and synchronous: no I/O outside `config`
//! - Total: decomposition and comparison never fail
//! - Deterministic: identical output on every platform by default

pub mod chunk;
pub mod compare;
pub mod config;
pub mod sort;
pub mod types;
