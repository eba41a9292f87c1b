//! Splitting comma-separated cells and counting the pieces.

use ahash::{HashMap, HashSet};
use std::hash::Hash;

/// Tokens of a multi-valued cell: split on `,`, trimmed, blanks dropped.
pub fn tokens(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(',').map(str::trim).filter(|token| !token.is_empty())
}

/// First token of a multi-valued cell, if it is not blank.
pub fn primary(cell: &str) -> Option<&str> {
    cell.split(',')
        .next()
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Occurrence counter that remembers first-seen order, so ranking is stable.
#[derive(Debug)]
pub struct Tally<K> {
    index: HashMap<K, usize>,
    counts: Vec<(K, usize)>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Tally {
            index: HashMap::default(),
            counts: Vec::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> Tally<K> {
    pub fn add(&mut self, key: K) {
        match self.index.get(&key) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.index.insert(key, self.counts.len());
                self.counts.push((key, 1));
            }
        }
    }

    /// Counts each distinct key of one record once.
    pub fn add_distinct(&mut self, keys: impl IntoIterator<Item = K>) {
        let mut seen: HashSet<K> = HashSet::default();
        for key in keys {
            if seen.insert(key) {
                self.add(key);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    /// Keys by count, highest first; equal counts keep first-seen order.
    pub fn ranked(self) -> Vec<(K, usize)> {
        let mut counts = self.counts;
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

/// Explode every present cell into tokens and rank them. With `per_record`
/// a token repeated inside one cell still counts once for that cell.
pub fn explode_count<'a>(
    cells: impl IntoIterator<Item = Option<&'a str>>,
    per_record: bool,
) -> Vec<(&'a str, usize)> {
    let mut tally: Tally<&str> = Tally::default();
    for cell in cells.into_iter().flatten() {
        if per_record {
            tally.add_distinct(tokens(cell));
        } else {
            tokens(cell).for_each(|token| tally.add(token));
        }
    }
    tally.ranked()
}

#[cfg(test)]
mod test_explode {
    use super::*;

    #[test]
    fn tokens_are_trimmed_and_blank_free() {
        let got: Vec<&str> = tokens(" Drama ,, Comedy , ").collect();
        assert_eq!(got, vec!["Drama", "Comedy"]);
        assert_eq!(tokens("").count(), 0);
    }

    #[test]
    fn primary_is_first_token_only() {
        assert_eq!(primary("India, USA"), Some("India"));
        assert_eq!(primary(" France"), Some("France"));
        assert_eq!(primary(", USA"), None);
    }

    #[test]
    fn ranking_is_stable_on_ties() {
        let ranked = explode_count(
            [Some("b, a"), None, Some("a, c"), Some("c")],
            false,
        );
        assert_eq!(ranked, vec![("a", 2), ("c", 2), ("b", 1)]);
    }

    #[test]
    fn per_record_counts_repeats_once() {
        let cells = [Some("x, x, y")];
        assert_eq!(explode_count(cells, true), vec![("x", 1), ("y", 1)]);
        assert_eq!(explode_count(cells, false), vec![("x", 2), ("y", 1)]);
    }
}
