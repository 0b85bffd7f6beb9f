//! core::chunk
//!
//! Decomposition of a label into alternating numeric and text runs.
//!
//! # Classes
//!
//! - **Numeric**: ASCII digits `0`-`9` and the decimal point `.`
//! - **Text**: every other character, including Unicode digits, letters,
//!   whitespace, and punctuation
//!
//! # Invariants
//!
//! - Chunks are maximal: two adjacent chunks never share a class
//! - Concatenating the chunks in order reproduces the label exactly
//! - The empty label has no chunks
//!
//! # Example
//!
//! ```
//! use natorder::core::chunk::{decompose, ChunkClass};
//!
//! let chunks = decompose("img12.png");
//! let parts: Vec<&str> = chunks.iter().map(|c| c.as_str()).collect();
//! assert_eq!(parts, vec!["img", "12.", "png"]);
//! assert_eq!(chunks[1].class(), ChunkClass::Numeric);
//! ```

use serde::Serialize;

/// The class a character (and therefore a chunk) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkClass {
    /// ASCII digits and `.`
    Numeric,
    /// Everything else
    Text,
}

impl ChunkClass {
    /// Classify a single character.
    pub fn of(c: char) -> Self {
        if c.is_ascii_digit() || c == '.' {
            ChunkClass::Numeric
        } else {
            ChunkClass::Text
        }
    }
}

impl std::fmt::Display for ChunkClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChunkClass::Numeric => write!(f, "numeric"),
            ChunkClass::Text => write!(f, "text"),
        }
    }
}

/// A maximal run of same-class characters, borrowed from its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Chunk<'a> {
    text: &'a str,
    class: ChunkClass,
}

impl<'a> Chunk<'a> {
    /// The chunk's text.
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// The chunk's class.
    pub fn class(&self) -> ChunkClass {
        self.class
    }

    /// Whether this chunk is numeric-class.
    pub fn is_numeric(&self) -> bool {
        self.class == ChunkClass::Numeric
    }
}

/// Iterator over the chunks of a label.
///
/// Created by [`chunks`]. Yields chunks left to right without allocating.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let class = ChunkClass::of(first);

        let end = self
            .rest
            .char_indices()
            .find(|&(_, c)| ChunkClass::of(c) != class)
            .map(|(i, _)| i)
            .unwrap_or(self.rest.len());

        let (text, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(Chunk { text, class })
    }
}

impl std::iter::FusedIterator for Chunks<'_> {}

/// Iterate over the chunks of `label`.
pub fn chunks(label: &str) -> Chunks<'_> {
    Chunks { rest: label }
}

/// Decompose `label` into its ordered chunk sequence.
///
/// Never fails. An empty label yields an empty vector.
pub fn decompose(label: &str) -> Vec<Chunk<'_>> {
    chunks(label).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(label: &str) -> Vec<&str> {
        decompose(label).iter().map(|c| c.as_str()).collect()
    }

    #[test]
    fn empty_label_has_no_chunks() {
        assert!(decompose("").is_empty());
    }

    #[test]
    fn alternates_classes() {
        assert_eq!(texts("a10b2"), vec!["a", "10", "b", "2"]);
        assert_eq!(texts("10a"), vec!["10", "a"]);
    }

    #[test]
    fn dots_are_numeric_class() {
        let chunks = decompose("v1.2.3-rc");
        assert_eq!(chunks[0].as_str(), "v");
        assert_eq!(chunks[1].as_str(), "1.2.3");
        assert_eq!(chunks[1].class(), ChunkClass::Numeric);
        assert_eq!(chunks[2].as_str(), "-rc");
        assert_eq!(chunks[2].class(), ChunkClass::Text);
    }

    #[test]
    fn unicode_digits_are_text() {
        // Arabic-Indic three is not an ASCII digit
        let chunks = decompose("x\u{0663}7");
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].as_str(), "x\u{0663}");
        assert_eq!(chunks[1].as_str(), "7");
    }

    #[test]
    fn whitespace_and_punctuation_are_text() {
        assert_eq!(texts("track 07 - intro"), vec!["track ", "07", " - intro"]);
    }

    #[test]
    fn lossless_partition() {
        for label in ["", "abc", "123", "a1b22c333", "é9ü.8", "..", "日本12語"] {
            let joined: String = texts(label).concat();
            assert_eq!(joined, label);
        }
    }

    #[test]
    fn adjacent_chunks_differ_in_class() {
        let chunks = decompose("ab12.3cd..ef9");
        for pair in chunks.windows(2) {
            assert_ne!(pair[0].class(), pair[1].class());
        }
    }

    #[test]
    fn iterator_is_fused() {
        let mut it = chunks("a1");
        assert!(it.next().is_some());
        assert!(it.next().is_some());
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }
}
