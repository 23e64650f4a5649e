//! Insertion-ordered counter for top-N lists.

use crate::types::Ranking;
use std::collections::HashMap;

/// Counts keyed by name, remembering the order keys were first seen.
#[derive(Debug, Default)]
pub struct Tally {
    counts: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str) {
        match self.index.get(name) {
            Some(&i) => self.counts[i].1 += 1,
            None => {
                self.index.insert(name.to_string(), self.counts.len());
                self.counts.push((name.to_string(), 1));
            }
        }
    }

    /// The `n` highest counts, descending; equal counts keep first-seen order.
    pub fn top(mut self, n: usize) -> Ranking {
        // sort_by is stable, which is what keeps ties in first-seen order
        self.counts.sort_by(|a, b| b.1.cmp(&a.1));
        self.counts.truncate(n);
        self.counts
    }
}
