//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Command results are written by the commands themselves and ignore
//! `--quiet`. This module covers the rest: confirmations go to stdout and
//! diagnostics go to stderr, so piped results stay clean.

use std::fmt::Display;

use crate::core::chunk::Chunk;

/// How much the CLI says beyond its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Results and errors only
    Quiet,
    /// Results, confirmations, and warnings
    Normal,
    /// Everything, plus `[debug]` lines
    Debug,
}

impl Verbosity {
    /// `--quiet` wins over `--debug`.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        match (quiet, debug) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Debug,
            (false, false) => Verbosity::Normal,
        }
    }

    fn chatty(self) -> bool {
        self != Verbosity::Quiet
    }
}

/// Log a `[debug]` line to stderr.
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Report an error to stderr, even when quiet.
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Report a warning to stderr.
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity.chatty() {
        eprintln!("warning: {}", message);
    }
}

/// Confirm a completed change on stdout, such as `config set`.
pub fn success(message: impl Display, verbosity: Verbosity) {
    if verbosity.chatty() {
        println!("{}", message);
    }
}

/// Format a chunk decomposition, one `class<TAB>text` row per chunk.
pub fn format_chunks(chunks: &[Chunk<'_>]) -> String {
    chunks
        .iter()
        .map(|chunk| format!("{}\t{}", chunk.class(), chunk.as_str()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chunk::decompose;

    #[test]
    fn verbosity_quiet_wins() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn chunk_rows() {
        assert_eq!(
            format_chunks(&decompose("v1.2b")),
            "text\tv\nnumeric\t1.2\ntext\tb"
        );
        assert_eq!(format_chunks(&[]), "");
    }
}
