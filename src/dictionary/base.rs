//! The canonical, bulk-loaded word statistics store.

use std::path::Path;

use log::debug;
use parking_lot::RwLock;

use crate::dictionary::table::WordTable;
use crate::dictionary::{Dictionary, TokenSink, loader};
use crate::error::Result;
use crate::token::TokenSource;
use crate::util::atomic_float::AtomicF64;

/// A thread-safe word frequency dictionary.
///
/// Mutations take the exclusive lock for their whole batch; lookups take the
/// shared lock for a single map access. `log_total` is republished right
/// after each mutating call releases the lock, so a concurrent reader may
/// briefly see the previous value.
#[derive(Debug)]
pub struct BaseDictionary {
    table: RwLock<WordTable>,
    log_total: AtomicF64,
}

impl BaseDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        BaseDictionary {
            table: RwLock::new(WordTable::new()),
            log_total: AtomicF64::new(0.0_f64.ln()),
        }
    }

    /// Create a dictionary and load it from a `word frequency [pos]` file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let dictionary = Self::new();
        dictionary.load_dictionary(path)?;
        Ok(dictionary)
    }

    /// Load every line of a dictionary file into this dictionary.
    ///
    /// Lines read before a failing line stay applied.
    pub fn load_dictionary<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        loader::load_dictionary(self, path)
    }

    /// Number of keys, prefix fragments included.
    pub fn len(&self) -> usize {
        self.table.read().freq_map.len()
    }

    /// Whether no key has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.table.read().freq_map.is_empty()
    }

    /// Number of keys with a non-zero frequency.
    pub fn word_count(&self) -> usize {
        self.table.read().word_count()
    }

    fn update_log_total(&self) {
        let total = self.table.read().total;
        self.log_total.store(total.ln());
    }
}

impl Default for BaseDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenSink for BaseDictionary {
    fn load<I>(&self, tokens: I)
    where
        I: IntoIterator,
        I::Item: TokenSource,
    {
        let mut applied = 0usize;
        {
            let mut table = self.table.write();
            for token in tokens {
                if table.insert(&token) {
                    applied += 1;
                }
            }
        }
        self.update_log_total();
        debug!("loaded {applied} tokens, total={}", self.total());
    }

    fn add_token<T: TokenSource>(&self, token: T) {
        self.table.write().insert(&token);
        self.update_log_total();
    }
}

impl Dictionary for BaseDictionary {
    fn frequency(&self, word: &str) -> Option<f64> {
        self.table.read().freq_map.get(word).copied()
    }

    fn pos(&self, word: &str) -> Option<String> {
        self.table.read().pos_map.get(word).cloned()
    }

    fn total(&self) -> f64 {
        self.table.read().total
    }

    fn log_total(&self) -> f64 {
        self.log_total.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;

    fn sample() -> BaseDictionary {
        let dict = BaseDictionary::new();
        dict.load(vec![
            Token::new("中国", 3.0, "ns"),
            Token::new("中国人", 2.0, "n"),
            Token::untagged("北京", 5.0),
        ]);
        dict
    }

    #[test]
    fn test_add_token_stores_word_and_prefixes() {
        let dict = BaseDictionary::new();
        dict.add_token(Token::new("北京大学", 7.0, "nt"));

        assert_eq!(dict.frequency("北京大学"), Some(7.0));
        assert_eq!(dict.frequency("北"), Some(0.0));
        assert_eq!(dict.frequency("北京"), Some(0.0));
        assert_eq!(dict.frequency("北京大"), Some(0.0));
        assert_eq!(dict.frequency("京"), None);
        assert_eq!(dict.pos("北京大学").as_deref(), Some("nt"));
        assert_eq!(dict.pos("北京"), None);
    }

    #[test]
    fn test_load_totals_and_log_total() {
        let dict = sample();
        assert_eq!(dict.total(), 10.0);
        assert!((dict.log_total() - 10.0_f64.ln()).abs() < 1e-12);
        assert_eq!(dict.word_count(), 3);
        // 中, 中国, 中国人, 北, 北京
        assert_eq!(dict.len(), 5);
    }

    #[test]
    fn test_duplicate_words_accumulate_total() {
        let dict = BaseDictionary::new();
        dict.add_token(Token::untagged("酒", 5.0));
        dict.add_token(Token::untagged("酒", 2.0));

        assert_eq!(dict.frequency("酒"), Some(2.0));
        assert_eq!(dict.total(), 7.0);
        assert!((dict.log_total() - 7.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_pos_tag_is_sticky() {
        let dict = BaseDictionary::new();
        dict.add_token(Token::new("车", 7.0, "n"));
        dict.add_token(Token::untagged("车", 3.0));

        assert_eq!(dict.pos("车").as_deref(), Some("n"));
        assert_eq!(dict.frequency("车"), Some(3.0));
    }

    #[test]
    fn test_prefix_word_keeps_frequency_after_longer_insert() {
        let dict = sample();
        assert_eq!(dict.frequency("中国"), Some(3.0));
        assert_eq!(dict.frequency("中"), Some(0.0));
    }

    #[test]
    fn test_empty_dictionary() {
        let dict = BaseDictionary::default();
        assert!(dict.is_empty());
        assert_eq!(dict.total(), 0.0);
        assert_eq!(dict.log_total(), f64::NEG_INFINITY);
        assert_eq!(dict.frequency("酒"), None);
        assert_eq!(dict.frequency_or_zero("酒"), 0.0);
    }

    #[test]
    fn test_log_probability() {
        let dict = sample();
        let expected = (5.0_f64 / 10.0).ln();
        assert!((dict.log_probability("北京").unwrap() - expected).abs() < 1e-12);
        assert_eq!(dict.log_probability("北"), None);
        assert_eq!(dict.log_probability("上海"), None);
        assert!(dict.contains("北"));
    }
}
