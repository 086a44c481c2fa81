//! Lock-free core shared by both dictionary kinds.
//!
//! Callers hold the owning dictionary's write lock around every mutation.

use std::collections::HashMap;

use crate::dictionary::prefixes;
use crate::token::TokenSource;

#[derive(Debug, Default)]
pub(crate) struct WordTable {
    pub(crate) freq_map: HashMap<String, f64>,
    pub(crate) pos_map: HashMap<String, String>,
    pub(crate) total: f64,
}

impl WordTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Store one token and its prefix closure. Returns false for an empty word.
    ///
    /// Re-inserting a word overwrites its frequency but adds to `total` again.
    /// An empty tag leaves any previous tag in place.
    pub(crate) fn insert<T: TokenSource>(&mut self, token: &T) -> bool {
        let word = token.text();
        if word.is_empty() {
            return false;
        }

        let frequency = token.frequency();
        self.freq_map.insert(word.to_string(), frequency);
        self.total += frequency;

        for prefix in prefixes(word) {
            if !self.freq_map.contains_key(prefix) {
                self.freq_map.insert(prefix.to_string(), 0.0);
            }
        }

        let pos = token.pos();
        if !pos.is_empty() {
            self.pos_map.insert(word.to_string(), pos.to_string());
        }
        true
    }

    /// Remove `word` and subtract its stored frequency from `total`.
    ///
    /// With `keep_fragment` the key stays behind with frequency `0` so keys
    /// extending it keep their prefix closure. Fragments created for the
    /// removed word itself are never retracted.
    pub(crate) fn remove(&mut self, word: &str, keep_fragment: bool) -> Option<f64> {
        let frequency = *self.freq_map.get(word)?;
        if keep_fragment {
            self.freq_map.insert(word.to_string(), 0.0);
        } else {
            self.freq_map.remove(word);
        }
        self.pos_map.remove(word);
        self.total -= frequency;
        Some(frequency)
    }

    pub(crate) fn word_count(&self) -> usize {
        self.freq_map.values().filter(|freq| **freq != 0.0).count()
    }

    /// Whether some other key extends `word`. Scans every key.
    pub(crate) fn is_prefix_of_other_key(&self, word: &str) -> bool {
        self.freq_map
            .keys()
            .any(|key| key.len() > word.len() && key.starts_with(word))
    }
}
