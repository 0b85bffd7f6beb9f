//! core::compare
//!
//! The natural-order comparator.
//!
//! # Algorithm
//!
//! Both labels are case-folded, decomposed into chunks, and walked pairwise:
//!
//! 1. Identical chunks are skipped.
//! 2. Two numeric-class chunks compare by value. A clean decimal literal
//!    (`"10"`, `"007"`, `"1.50"`) compares exactly, with no float rounding.
//!    A chunk with several dots (`"1.2.3"`) compares by its longest valid
//!    prefix (`1.2`) and then by the remaining text (`".3"`).
//! 3. Two text chunks compare by code point.
//! 4. A text chunk against a numeric chunk sorts first when its leading
//!    character is below `'0'` and last otherwise.
//!
//! The first unequal chunk decides. When one sequence runs out first, the
//! shorter sequence sorts first.
//!
//! Every step is a total preorder on chunks, so the lexicographic extension
//! to sequences is a total preorder on labels and is safe for any sort.
//!
//! # Example
//!
//! ```
//! use natorder::core::compare::compare_labels;
//! use std::cmp::Ordering;
//!
//! assert_eq!(compare_labels("file2", "file10"), Ordering::Less);
//! assert_eq!(compare_labels("File2", "file10"), Ordering::Less);
//! assert_eq!(compare_labels("item", "item1"), Ordering::Less);
//! assert_eq!(compare_labels("1.2.3", "1.2.4"), Ordering::Less);
//! ```

use std::borrow::Cow;
use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::chunk::{chunks, Chunk};

/// How labels are lower-cased before comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseFolding {
    /// Fold only ASCII letters. Identical results on every platform.
    #[default]
    Ascii,
    /// Full Unicode lower-casing via `str::to_lowercase`.
    Unicode,
}

impl CaseFolding {
    /// Names accepted in config files and on the command line.
    pub const NAMES: &'static [&'static str] = &["ascii", "unicode"];

    /// Fold `label`, borrowing when nothing changes.
    pub fn fold<'a>(&self, label: &'a str) -> Cow<'a, str> {
        match self {
            CaseFolding::Ascii => {
                if label.bytes().any(|b| b.is_ascii_uppercase()) {
                    Cow::Owned(label.to_ascii_lowercase())
                } else {
                    Cow::Borrowed(label)
                }
            }
            CaseFolding::Unicode => {
                if label.chars().any(char::is_uppercase) {
                    Cow::Owned(label.to_lowercase())
                } else {
                    Cow::Borrowed(label)
                }
            }
        }
    }
}

impl std::fmt::Display for CaseFolding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaseFolding::Ascii => write!(f, "ascii"),
            CaseFolding::Unicode => write!(f, "unicode"),
        }
    }
}

impl FromStr for CaseFolding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascii" => Ok(CaseFolding::Ascii),
            "unicode" => Ok(CaseFolding::Unicode),
            other => Err(format!(
                "invalid case folding '{}', must be one of: {}",
                other,
                Self::NAMES.join(", ")
            )),
        }
    }
}

/// A configured natural-order comparator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder {
    folding: CaseFolding,
}

impl NaturalOrder {
    /// Create a comparator with the given case folding.
    pub fn new(folding: CaseFolding) -> Self {
        Self { folding }
    }

    /// The case folding in effect.
    pub fn folding(&self) -> CaseFolding {
        self.folding
    }

    /// Fold a label the way [`compare`](Self::compare) does.
    pub fn fold<'a>(&self, label: &'a str) -> Cow<'a, str> {
        self.folding.fold(label)
    }

    /// Three-way natural comparison of two labels.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        compare_folded(&self.fold(a), &self.fold(b))
    }
}

/// Compare two labels with the default (ASCII) case folding.
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    NaturalOrder::default().compare(a, b)
}

/// Compare two labels that have already been folded.
pub(crate) fn compare_folded(a: &str, b: &str) -> Ordering {
    let mut left = chunks(a);
    let mut right = chunks(b);

    loop {
        match (left.next(), right.next()) {
            (Some(x), Some(y)) => {
                let ord = compare_chunks(x, y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
        }
    }
}

fn compare_chunks(x: Chunk<'_>, y: Chunk<'_>) -> Ordering {
    if x.as_str() == y.as_str() {
        return Ordering::Equal;
    }

    match (x.is_numeric(), y.is_numeric()) {
        (true, true) => NumericKey::new(x.as_str()).cmp(&NumericKey::new(y.as_str())),
        (false, false) => x.as_str().cmp(y.as_str()),
        (false, true) => text_against_number(x.as_str()),
        (true, false) => text_against_number(y.as_str()).reverse(),
    }
}

/// Where a text chunk falls relative to any numeric chunk.
fn text_against_number(text: &str) -> Ordering {
    match text.chars().next() {
        Some(c) if c < '0' => Ordering::Less,
        _ => Ordering::Greater,
    }
}

/// An exact decimal value, normalized so that derived comparisons are
/// numeric: no leading zeros in `int`, no trailing zeros in `frac`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Decimal<'a> {
    int: &'a str,
    frac: &'a str,
}

impl<'a> Decimal<'a> {
    /// Parse a run of digits with at most one `.` and at least one digit.
    fn parse(s: &'a str) -> Option<Self> {
        if !s.bytes().any(|b| b.is_ascii_digit()) {
            return None;
        }
        if !s.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
            return None;
        }

        let (int, frac) = match s.split_once('.') {
            Some((int, frac)) if !frac.contains('.') => (int, frac),
            Some(_) => return None,
            None => (s, ""),
        };

        Some(Self {
            int: int.trim_start_matches('0'),
            frac: frac.trim_end_matches('0'),
        })
    }
}

impl Ord for Decimal<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.int
            .len()
            .cmp(&other.int.len())
            .then_with(|| self.int.cmp(other.int))
            .then_with(|| self.frac.cmp(other.frac))
    }
}

impl PartialOrd for Decimal<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort key for a numeric-class chunk.
///
/// A clean literal has an empty `rest`. A multi-dot chunk splits before its
/// second `.`; the head is coerced when it holds a digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct NumericKey<'a> {
    value: Option<Decimal<'a>>,
    rest: &'a str,
}

impl<'a> NumericKey<'a> {
    fn new(chunk: &'a str) -> Self {
        let split = chunk
            .match_indices('.')
            .nth(1)
            .map(|(i, _)| i)
            .unwrap_or(chunk.len());
        let (head, rest) = chunk.split_at(split);

        Self {
            value: Decimal::parse(head),
            rest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod decimal {
        use super::*;

        #[test]
        fn rejects_multiple_dots() {
            assert!(Decimal::parse("1.2.3").is_none());
        }

        #[test]
        fn rejects_dot_only() {
            assert!(Decimal::parse(".").is_none());
            assert!(Decimal::parse("").is_none());
        }

        #[test]
        fn normalizes_zeros() {
            assert_eq!(Decimal::parse("007"), Decimal::parse("7"));
            assert_eq!(Decimal::parse("1.50"), Decimal::parse("1.5"));
            assert_eq!(Decimal::parse("1."), Decimal::parse("1"));
            assert_eq!(Decimal::parse(".5"), Decimal::parse("0.5"));
        }

        #[test]
        fn orders_by_value() {
            let d = |s| Decimal::parse(s).unwrap();
            assert!(d("2") < d("10"));
            assert!(d("0.25") < d("0.5"));
            assert!(d("9.99") < d("10"));
            assert!(d("0") < d(".5"));
        }

        #[test]
        fn exact_beyond_float_precision() {
            let d = |s| Decimal::parse(s).unwrap();
            assert!(d("12345678901234567890") < d("12345678901234567891"));
        }
    }

    mod labels {
        use super::*;

        #[test]
        fn numeric_runs_compare_by_value() {
            assert_eq!(compare_labels("a2", "a10"), Ordering::Less);
            assert_eq!(compare_labels("a100", "a12"), Ordering::Greater);
        }

        #[test]
        fn case_insensitive() {
            assert_eq!(compare_labels("File2", "file10"), Ordering::Less);
            assert_eq!(compare_labels("ABC", "abc"), Ordering::Equal);
        }

        #[test]
        fn prefix_sorts_first() {
            assert_eq!(compare_labels("item", "item1"), Ordering::Less);
            assert_eq!(compare_labels("item1", "item"), Ordering::Greater);
        }

        #[test]
        fn empty_sorts_first() {
            assert_eq!(compare_labels("", "a"), Ordering::Less);
            assert_eq!(compare_labels("", "1"), Ordering::Less);
            assert_eq!(compare_labels("", ""), Ordering::Equal);
        }

        #[test]
        fn multi_dot_falls_back_to_remainder() {
            assert_eq!(compare_labels("1.2.3", "1.2.4"), Ordering::Less);
            assert_eq!(compare_labels("1.2.4", "1.2.3"), Ordering::Greater);
            assert_eq!(compare_labels("1.2", "1.2.3"), Ordering::Less);
            assert_eq!(compare_labels("10.0.0", "9"), Ordering::Greater);
        }

        #[test]
        fn multi_dot_is_deterministic() {
            for _ in 0..3 {
                assert_eq!(compare_labels("v1.2.3", "v1.2.4"), Ordering::Less);
            }
        }

        #[test]
        fn leading_zeros_compare_equal() {
            assert_eq!(compare_labels("a01", "a1"), Ordering::Equal);
        }

        #[test]
        fn trailing_dot_is_still_a_number() {
            assert_eq!(compare_labels("img12.png", "img9.png"), Ordering::Greater);
        }

        #[test]
        fn multi_dot_against_number_uses_prefix() {
            assert_eq!(compare_labels("10", "9.1.1"), Ordering::Greater);
            assert_eq!(compare_labels("9.1.1", "9.2"), Ordering::Less);
            assert_eq!(compare_labels("9.2", "10"), Ordering::Less);
        }

        #[test]
        fn text_against_number_uses_leading_char() {
            // '-' is below '0', 'a' is above '9'
            assert_eq!(compare_labels("-x", "1"), Ordering::Less);
            assert_eq!(compare_labels("a", "1"), Ordering::Greater);
            assert_eq!(compare_labels("1", "a"), Ordering::Less);
        }

        #[test]
        fn slash_ranks_below_every_number() {
            assert_eq!(compare_labels("/", ".5"), Ordering::Less);
            assert_eq!(compare_labels("/", "0"), Ordering::Less);
            assert_eq!(compare_labels("0", ".5"), Ordering::Less);
        }

        #[test]
        fn text_chunks_compare_by_code_point() {
            assert_eq!(compare_labels("a1b", "a1c"), Ordering::Less);
            assert_eq!(compare_labels("z", "é"), Ordering::Less);
        }
    }

    mod folding {
        use super::*;

        #[test]
        fn ascii_folding_leaves_non_ascii() {
            let order = NaturalOrder::new(CaseFolding::Ascii);
            assert_eq!(order.fold("ÉCOLE"), "École");
            assert_ne!(order.compare("Éa", "éa"), Ordering::Equal);
        }

        #[test]
        fn unicode_folding_lowercases_everything() {
            let order = NaturalOrder::new(CaseFolding::Unicode);
            assert_eq!(order.compare("Éa", "éa"), Ordering::Equal);
            assert_eq!(order.compare("ÜBER2", "über10"), Ordering::Less);
        }

        #[test]
        fn borrows_when_already_lowercase() {
            assert!(matches!(CaseFolding::Ascii.fold("abc1"), Cow::Borrowed(_)));
            assert!(matches!(CaseFolding::Unicode.fold("abc1"), Cow::Borrowed(_)));
        }

        #[test]
        fn parses_names() {
            assert_eq!("ascii".parse::<CaseFolding>(), Ok(CaseFolding::Ascii));
            assert_eq!("unicode".parse::<CaseFolding>(), Ok(CaseFolding::Unicode));
            assert!("locale".parse::<CaseFolding>().is_err());
        }
    }
}
