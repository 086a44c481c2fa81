//! Frequency dictionaries for prefix-based word segmentation.
//!
//! Two dictionary kinds share the read capability set [`Dictionary`]:
//!
//! - [`base::BaseDictionary`] - the canonical, bulk-loaded word statistics
//! - [`overlay::OverlayDictionary`] - a mutable layer of custom words that
//!   shadows a shared base dictionary and supports removal
//!
//! Every stored word keeps its *prefix closure*: each proper prefix (by
//! character) of a word is also a key, with frequency `0` unless it was
//! inserted as a word itself. A segmenter can therefore stop scanning a
//! candidate as soon as [`Dictionary::frequency`] returns `None`.
//!
//! # Examples
//!
//! ```
//! use segdict::dictionary::{Dictionary, TokenSink};
//! use segdict::dictionary::base::BaseDictionary;
//! use segdict::token::Token;
//!
//! let dict = BaseDictionary::new();
//! dict.add_token(Token::new("中国人", 4.0, "n"));
//!
//! assert_eq!(dict.frequency("中国人"), Some(4.0));
//! assert_eq!(dict.frequency("中国"), Some(0.0));
//! assert_eq!(dict.frequency("国"), None);
//! assert_eq!(dict.total(), 4.0);
//! ```

use std::sync::Arc;

use crate::token::TokenSource;

pub mod base;
pub mod loader;
pub mod overlay;
mod table;

/// Read access shared by every dictionary kind.
///
/// Segmentation code should be written against this trait so it can be
/// handed either a base dictionary or an overlay. All methods are safe to
/// call concurrently with mutations.
pub trait Dictionary: Send + Sync {
    /// Frequency of `word`, or `None` if the key is unknown.
    ///
    /// A prefix-only key answers `Some(0.0)`.
    fn frequency(&self, word: &str) -> Option<f64>;

    /// Part-of-speech tag of `word`, if one was ever stored.
    fn pos(&self, word: &str) -> Option<String>;

    /// Sum of the frequencies of every inserted word.
    fn total(&self) -> f64;

    /// Natural logarithm of [`Dictionary::total`] as of the last completed mutation.
    fn log_total(&self) -> f64;

    /// Frequency of `word`, `0.0` when unknown.
    fn frequency_or_zero(&self, word: &str) -> f64 {
        self.frequency(word).unwrap_or(0.0)
    }

    /// Whether `word` is a word or a prefix of one.
    fn contains(&self, word: &str) -> bool {
        self.frequency(word).is_some()
    }

    /// `ln(frequency / total)` for a word with non-zero frequency.
    fn log_probability(&self, word: &str) -> Option<f64> {
        match self.frequency(word) {
            Some(freq) if freq > 0.0 => Some(freq.ln() - self.log_total()),
            _ => None,
        }
    }
}

impl<D: Dictionary + ?Sized> Dictionary for Arc<D> {
    fn frequency(&self, word: &str) -> Option<f64> {
        (**self).frequency(word)
    }

    fn pos(&self, word: &str) -> Option<String> {
        (**self).pos(word)
    }

    fn total(&self) -> f64 {
        (**self).total()
    }

    fn log_total(&self) -> f64 {
        (**self).log_total()
    }
}

/// Mutation entry points used by loaders.
pub trait TokenSink {
    /// Apply every token of `tokens` inside one exclusive section.
    ///
    /// Readers are blocked until the iterator is exhausted.
    fn load<I>(&self, tokens: I)
    where
        I: IntoIterator,
        I::Item: TokenSource;

    /// Apply a single token.
    fn add_token<T: TokenSource>(&self, token: T);
}

/// Proper, non-empty prefixes of `word`, shortest first, split on character
/// boundaries.
///
/// ```
/// use segdict::dictionary::prefixes;
///
/// let all: Vec<&str> = prefixes("北京大学").collect();
/// assert_eq!(all, vec!["北", "北京", "北京大"]);
/// ```
pub fn prefixes(word: &str) -> impl Iterator<Item = &str> {
    word.char_indices().skip(1).map(move |(idx, _)| &word[..idx])
}
