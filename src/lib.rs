//! natorder - Natural (alphanumeric) string ordering
//!
//! natorder sorts labels the way people read them: embedded digit runs
//! compare as numbers, so `file2` comes before `file10`, and letters compare
//! without regard to case.
//!
//! # Architecture
//!
//! - [`core`] - Chunk decomposition, the comparator, stable sorting, config
//! - [`host`] - Patches for an extension host, built on injected capabilities
//! - [`cli`] - Command-line interface (parses args, delegates to core/host)
//! - [`ui`] - Output formatting and verbosity
//!
//! # Correctness Invariants
//!
//! 1. Chunk decomposition is a lossless partition of the label
//! 2. The comparator is a total preorder, safe for any sort algorithm
//! 3. Sorting is stable and returns a permutation of its input
//! 4. The core performs no I/O and holds no shared state
//!
//! # Example
//!
//! ```
//! use natorder::{compare_labels, natural_sort_strings};
//! use std::cmp::Ordering;
//!
//! assert_eq!(compare_labels("File2", "file10"), Ordering::Less);
//! assert_eq!(
//!     natural_sort_strings(vec!["a10", "a2", "a1"]),
//!     vec!["a1", "a2", "a10"]
//! );
//! ```

pub mod cli;
pub mod core;
pub mod host;
pub mod ui;

pub use crate::core::chunk::{decompose, Chunk, ChunkClass};
pub use crate::core::compare::{compare_labels, CaseFolding, NaturalOrder};
pub use crate::core::sort::{
    natural_sort, natural_sort_refs, natural_sort_strings, try_natural_sort, Arrangement,
};
pub use crate::core::types::{Label, LabelError};
