//! Dictionary tokens.
//!
//! A token names a word, its frequency weight and an optional part-of-speech
//! tag. The dictionaries never depend on the concrete [`Token`] type: they
//! accept anything implementing [`TokenSource`].
//!
//! # Examples
//!
//! ```
//! use segdict::token::{Token, TokenSource};
//!
//! let token = Token::new("中国", 3.0, "ns");
//! assert_eq!(token.text(), "中国");
//! assert_eq!(token.frequency(), 3.0);
//! assert_eq!(token.pos(), "ns");
//!
//! let untagged = Token::untagged("酒", 9.0);
//! assert_eq!(untagged.pos(), "");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Read access to a word record.
///
/// An empty `pos()` means "no tag".
pub trait TokenSource {
    /// The word text.
    fn text(&self) -> &str;

    /// The frequency weight of the word.
    fn frequency(&self) -> f64;

    /// The part-of-speech tag, or an empty string.
    fn pos(&self) -> &str;
}

impl<T: TokenSource + ?Sized> TokenSource for &T {
    fn text(&self) -> &str {
        (**self).text()
    }

    fn frequency(&self) -> f64 {
        (**self).frequency()
    }

    fn pos(&self) -> &str {
        (**self).pos()
    }
}

/// An owned dictionary entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    text: String,
    frequency: f64,
    #[serde(default)]
    pos: String,
}

impl Token {
    /// Create a new token.
    pub fn new<S: Into<String>, P: Into<String>>(text: S, frequency: f64, pos: P) -> Self {
        Token {
            text: text.into(),
            frequency,
            pos: pos.into(),
        }
    }

    /// Create a token without a part-of-speech tag.
    pub fn untagged<S: Into<String>>(text: S, frequency: f64) -> Self {
        Self::new(text, frequency, String::new())
    }
}

impl TokenSource for Token {
    fn text(&self) -> &str {
        &self.text
    }

    fn frequency(&self) -> f64 {
        self.frequency
    }

    fn pos(&self) -> &str {
        &self.pos
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pos.is_empty() {
            write!(f, "{} {}", self.text, self.frequency)
        } else {
            write!(f, "{} {} {}", self.text, self.frequency, self.pos)
        }
    }
}
