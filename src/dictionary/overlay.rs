//! Custom-word overlay on top of a shared base dictionary.
//!
//! Lookups consult the overlay first and fall back to the base on a miss.
//! The overlay keeps its own running total; [`Dictionary::total`] reports the
//! base total plus the overlay total so scores from both layers share one
//! denominator.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;

use crate::dictionary::base::BaseDictionary;
use crate::dictionary::table::WordTable;
use crate::dictionary::{Dictionary, TokenSink, loader};
use crate::error::Result;
use crate::token::TokenSource;
use crate::util::atomic_float::AtomicF64;

/// A mutable layer of custom words bound to one [`BaseDictionary`].
///
/// The overlay's lock guards only its own maps. The base dictionary is
/// shared, never mutated through the overlay, and stays alive as long as any
/// overlay or caller holds it.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use segdict::dictionary::{Dictionary, TokenSink};
/// use segdict::dictionary::base::BaseDictionary;
/// use segdict::dictionary::overlay::OverlayDictionary;
/// use segdict::token::Token;
///
/// let base = Arc::new(BaseDictionary::new());
/// base.add_token(Token::untagged("酒", 5.0));
///
/// let overlay = OverlayDictionary::new(Arc::clone(&base));
/// overlay.add_my_token(Token::untagged("酒", 9.0));
/// assert_eq!(overlay.frequency("酒"), Some(9.0));
///
/// overlay.del_my_word("酒");
/// assert_eq!(overlay.frequency("酒"), Some(5.0));
/// ```
#[derive(Debug)]
pub struct OverlayDictionary {
    base: Arc<BaseDictionary>,
    state: RwLock<CustomState>,
    log_total: AtomicF64,
}

#[derive(Debug, Default)]
struct CustomState {
    table: WordTable,
    /// Keys inserted as words, as opposed to prefix fragments.
    words: HashSet<String>,
}

impl CustomState {
    fn insert<T: TokenSource>(&mut self, token: &T) -> bool {
        if !self.table.insert(token) {
            return false;
        }
        if !self.words.contains(token.text()) {
            self.words.insert(token.text().to_string());
        }
        true
    }
}

impl OverlayDictionary {
    /// Bind a new, empty overlay to `base`.
    pub fn new(base: Arc<BaseDictionary>) -> Self {
        let log_total = AtomicF64::new(base.total().ln());
        OverlayDictionary {
            base,
            state: RwLock::new(CustomState::default()),
            log_total,
        }
    }

    /// The bound base dictionary.
    pub fn base(&self) -> &Arc<BaseDictionary> {
        &self.base
    }

    /// Add one custom word.
    pub fn add_my_token<T: TokenSource>(&self, token: T) {
        self.state.write().insert(&token);
        self.refresh_log_total();
    }

    /// Add a batch of custom words inside one exclusive section.
    pub fn load_my_tokens<I>(&self, tokens: I)
    where
        I: IntoIterator,
        I::Item: TokenSource,
    {
        let mut applied = 0usize;
        {
            let mut state = self.state.write();
            for token in tokens {
                if state.insert(&token) {
                    applied += 1;
                }
            }
        }
        self.refresh_log_total();
        debug!(
            "loaded {applied} custom tokens, overlay_total={}",
            self.overlay_total()
        );
    }

    /// Remove a custom word and subtract its stored frequency.
    ///
    /// Returns the removed frequency, or `None` if `word` is not a custom
    /// word (prefix fragments do not count). Base entries are never touched:
    /// when the base knows `word`, the key leaves the overlay and lookups fall
    /// back to the base. Otherwise a word that another custom word extends
    /// stays behind as a zero-frequency fragment. Fragments created for the
    /// removed word are kept either way.
    pub fn del_my_word(&self, word: &str) -> Option<f64> {
        let removed = {
            let mut state = self.state.write();
            if state.words.remove(word) {
                let keep_fragment =
                    !self.base.contains(word) && state.table.is_prefix_of_other_key(word);
                state.table.remove(word, keep_fragment)
            } else {
                None
            }
        };
        match removed {
            Some(_) => self.refresh_log_total(),
            None => debug!("del_my_word: '{word}' is not a custom word"),
        }
        removed
    }

    /// Load a `word frequency [pos]` file of custom words.
    pub fn load_user_dictionary<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        loader::load_dictionary(self, path)
    }

    /// Sum of the frequencies contributed by custom words alone.
    pub fn overlay_total(&self) -> f64 {
        self.state.read().table.total
    }

    /// Recompute `log_total` from the current base and overlay totals.
    ///
    /// Overlay mutations call this themselves; call it after mutating the
    /// base directly.
    pub fn refresh_log_total(&self) {
        self.log_total.store(self.total().ln());
    }

    /// Words added through the overlay and not yet removed, sorted.
    pub fn custom_words(&self) -> Vec<String> {
        let mut words: Vec<String> = self.state.read().words.iter().cloned().collect();
        words.sort();
        words
    }
}

impl TokenSink for OverlayDictionary {
    fn load<I>(&self, tokens: I)
    where
        I: IntoIterator,
        I::Item: TokenSource,
    {
        self.load_my_tokens(tokens);
    }

    fn add_token<T: TokenSource>(&self, token: T) {
        self.add_my_token(token);
    }
}

impl Dictionary for OverlayDictionary {
    fn frequency(&self, word: &str) -> Option<f64> {
        let custom = self.state.read().table.freq_map.get(word).copied();
        custom.or_else(|| self.base.frequency(word))
    }

    fn pos(&self, word: &str) -> Option<String> {
        let custom = self.state.read().table.pos_map.get(word).cloned();
        custom.or_else(|| self.base.pos(word))
    }

    fn total(&self) -> f64 {
        self.base.total() + self.overlay_total()
    }

    fn log_total(&self) -> f64 {
        self.log_total.load()
    }
}
