//! core::sort
//!
//! Stable natural sort over arbitrary items.
//!
//! # Design
//!
//! Every function extracts and folds each item's label exactly once, then
//! runs a stable `sort_by` over the decorated items. Items are moved, never
//! mutated, and the output always holds every input item.
//!
//! # Example
//!
//! ```
//! use natorder::core::sort::{natural_sort, natural_sort_strings};
//!
//! let sorted = natural_sort_strings(vec!["a10", "a2", "a100", "a1", "a12"]);
//! assert_eq!(sorted, vec!["a1", "a2", "a10", "a12", "a100"]);
//!
//! struct User { name: &'static str }
//! let users = vec![User { name: "user10" }, User { name: "User9" }];
//! let sorted = natural_sort(users, |u| u.name);
//! assert_eq!(sorted[0].name, "User9");
//! ```

use std::cmp::Ordering;
use std::convert::Infallible;

use super::compare::{compare_folded, NaturalOrder};

/// Post-sort adjustments used by the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Arrangement {
    /// Descending order of runs
    pub reverse: bool,
    /// Keep one item per run of equal labels
    pub unique: bool,
}

impl NaturalOrder {
    /// Stable natural sort of `items` by the label `label_of` returns.
    pub fn sort<T, I, F, S>(&self, items: I, mut label_of: F) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&T) -> S,
        S: AsRef<str>,
    {
        let infallible = |item: &T| Ok::<S, Infallible>(label_of(item));
        match self.try_sort(items, infallible) {
            Ok(sorted) => sorted,
            Err(never) => match never {},
        }
    }

    /// Stable natural sort with a fallible label accessor.
    ///
    /// # Errors
    ///
    /// Returns the first error `label_of` produces. No partial ordering is
    /// returned.
    pub fn try_sort<T, I, F, S, E>(&self, items: I, label_of: F) -> Result<Vec<T>, E>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&T) -> Result<S, E>,
        S: AsRef<str>,
    {
        let keyed = self.sorted_keyed(items, label_of)?;
        Ok(keyed.into_iter().map(|(_, item)| item).collect())
    }

    /// Sort, then apply reversal and de-duplication.
    ///
    /// Runs of equal labels are treated as one unit: `reverse` flips the
    /// order of runs but keeps input order inside each run, and `unique`
    /// keeps only the first item of each run.
    pub fn arrange<T, I, F, S>(
        &self,
        items: I,
        mut label_of: F,
        arrangement: Arrangement,
    ) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&T) -> S,
        S: AsRef<str>,
    {
        let infallible = |item: &T| Ok::<S, Infallible>(label_of(item));
        let keyed = match self.sorted_keyed(items, infallible) {
            Ok(keyed) => keyed,
            Err(never) => match never {},
        };

        let mut runs: Vec<Vec<T>> = Vec::new();
        let mut last: Option<String> = None;
        for (label, item) in keyed {
            let same = last
                .as_deref()
                .is_some_and(|prev| compare_folded(prev, &label) == Ordering::Equal);
            last = Some(label);
            if same {
                if let Some(run) = runs.last_mut() {
                    run.push(item);
                    continue;
                }
            }
            runs.push(vec![item]);
        }

        if arrangement.reverse {
            runs.reverse();
        }

        runs.into_iter()
            .flat_map(|run| {
                let keep = if arrangement.unique { 1 } else { run.len() };
                run.into_iter().take(keep)
            })
            .collect()
    }

    /// Find the first label that breaks the order `arrangement` describes.
    ///
    /// With `unique`, equal neighbours also count as out of order. Returns
    /// the index of the offending label, or `None` when `labels` is in order.
    pub fn first_disorder<S: AsRef<str>>(
        &self,
        labels: &[S],
        arrangement: Arrangement,
    ) -> Option<usize> {
        labels
            .windows(2)
            .position(|pair| {
                let mut ord = self.compare(pair[0].as_ref(), pair[1].as_ref());
                if arrangement.reverse {
                    ord = ord.reverse();
                }
                ord == Ordering::Greater || (arrangement.unique && ord == Ordering::Equal)
            })
            .map(|i| i + 1)
    }

    /// Extract, fold, and stably sort. Each label is computed once.
    fn sorted_keyed<T, I, F, S, E>(
        &self,
        items: I,
        mut label_of: F,
    ) -> Result<Vec<(String, T)>, E>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&T) -> Result<S, E>,
        S: AsRef<str>,
    {
        let mut keyed = items
            .into_iter()
            .map(|item| {
                let label = label_of(&item)?;
                let folded = self.fold(label.as_ref()).into_owned();
                Ok((folded, item))
            })
            .collect::<Result<Vec<(String, T)>, E>>()?;

        keyed.sort_by(|(a, _), (b, _)| compare_folded(a, b));

        Ok(keyed)
    }
}

/// Stable natural sort with ASCII case folding.
///
/// Equal labels keep their input order.
pub fn natural_sort<T, I, F, S>(items: I, label_of: F) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> S,
    S: AsRef<str>,
{
    NaturalOrder::default().sort(items, label_of)
}

/// Stable natural sort with a fallible label accessor.
///
/// # Errors
///
/// Propagates the first accessor error unchanged.
pub fn try_natural_sort<T, I, F, S, E>(items: I, label_of: F) -> Result<Vec<T>, E>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> Result<S, E>,
    S: AsRef<str>,
{
    NaturalOrder::default().try_sort(items, label_of)
}

/// Natural sort of raw strings.
pub fn natural_sort_strings<S, I>(items: I) -> Vec<S>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    natural_sort(items, |s| s.as_ref().to_owned())
}

/// Natural sort that borrows the items instead of consuming them.
pub fn natural_sort_refs<T, F, S>(items: &[T], mut label_of: F) -> Vec<&T>
where
    F: FnMut(&T) -> S,
    S: AsRef<str>,
{
    natural_sort(items.iter(), |item| label_of(*item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compare::CaseFolding;

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        id: u32,
        label: &'static str,
    }

    fn entry(id: u32, label: &'static str) -> Entry {
        Entry { id, label }
    }

    #[test]
    fn numeric_interleaving() {
        let sorted = natural_sort_strings(vec!["a10", "a2", "a100", "a1", "a12"]);
        assert_eq!(sorted, vec!["a1", "a2", "a10", "a12", "a100"]);
    }

    #[test]
    fn empty_labels_first_and_stable() {
        let items = vec![entry(1, ""), entry(2, "a"), entry(3, "")];
        let sorted = natural_sort(items, |e| e.label);
        let ids: Vec<u32> = sorted.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }

    #[test]
    fn stable_for_equal_labels() {
        let items = vec![
            entry(1, "Beta"),
            entry(2, "alpha"),
            entry(3, "beta"),
            entry(4, "ALPHA"),
            entry(5, "b01"),
            entry(6, "b1"),
        ];
        let sorted = natural_sort(items, |e| e.label);
        let ids: Vec<u32> = sorted.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 4, 5, 6, 1, 3]);
    }

    #[test]
    fn idempotent() {
        let once = natural_sort_strings(vec!["x9", "x10", "X1", "", "y", "x1.5"]);
        let twice = natural_sort_strings(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn refs_leave_input_untouched() {
        let items = vec![entry(1, "b"), entry(2, "a")];
        let sorted = natural_sort_refs(&items, |e| e.label);
        assert_eq!(sorted[0].id, 2);
        assert_eq!(items[0].id, 1);
    }

    #[test]
    fn accessor_error_propagates() {
        let items = vec![Some("a"), None, Some("b")];
        let result: Result<Vec<Option<&str>>, String> =
            try_natural_sort(items, |item| item.ok_or_else(|| "missing".to_string()));
        assert_eq!(result, Err("missing".to_string()));
    }

    #[test]
    fn labels_extracted_once_per_item() {
        let mut calls = 0;
        let sorted = natural_sort(vec!["c", "b", "a", "d"], |s| {
            calls += 1;
            *s
        });
        assert_eq!(sorted, vec!["a", "b", "c", "d"]);
        assert_eq!(calls, 4);
    }

    #[test]
    fn unicode_folding_sort() {
        let order = NaturalOrder::new(CaseFolding::Unicode);
        let sorted = order.sort(vec!["Über2", "über1"], |s| *s);
        assert_eq!(sorted, vec!["über1", "Über2"]);
    }

    #[test]
    fn arrange_reverse_keeps_ties_in_input_order() {
        let items = vec![entry(1, "b"), entry(2, "a10"), entry(3, "B"), entry(4, "a2")];
        let arranged = NaturalOrder::default().arrange(
            items,
            |e| e.label,
            Arrangement {
                reverse: true,
                unique: false,
            },
        );
        let ids: Vec<u32> = arranged.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3, 2, 4]);
    }

    #[test]
    fn arrange_unique_keeps_first_of_run() {
        let items = vec![entry(1, "x01"), entry(2, "y"), entry(3, "X1"), entry(4, "x2")];
        let arranged = NaturalOrder::default().arrange(
            items,
            |e| e.label,
            Arrangement {
                reverse: false,
                unique: true,
            },
        );
        let ids: Vec<u32> = arranged.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 4, 2]);
    }

    #[test]
    fn arrange_default_matches_sort() {
        let input = vec!["c3", "C1", "", "c20"];
        let arranged =
            NaturalOrder::default().arrange(input.clone(), |s| *s, Arrangement::default());
        assert_eq!(arranged, natural_sort_strings(input));
    }

    #[test]
    fn first_disorder_reports_position() {
        let order = NaturalOrder::default();
        let asc = Arrangement::default();
        assert_eq!(order.first_disorder(&["a1", "a2", "a10"], asc), None);
        assert_eq!(order.first_disorder(&["a1", "a10", "a2"], asc), Some(2));
        assert_eq!(order.first_disorder::<&str>(&[], asc), None);
    }

    #[test]
    fn first_disorder_reverse_and_unique() {
        let order = NaturalOrder::default();
        let desc = Arrangement {
            reverse: true,
            unique: false,
        };
        assert_eq!(order.first_disorder(&["a10", "a2", "a1"], desc), None);
        assert_eq!(order.first_disorder(&["a1", "a2"], desc), Some(1));

        let strict = Arrangement {
            reverse: false,
            unique: true,
        };
        assert_eq!(order.first_disorder(&["a1", "A1"], Arrangement::default()), None);
        assert_eq!(order.first_disorder(&["a1", "A1"], strict), Some(1));
    }
}
