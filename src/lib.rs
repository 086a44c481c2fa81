//! # segdict
//!
//! A concurrent, layered frequency dictionary backing prefix-based word
//! segmentation for text without whitespace word boundaries.
//!
//! ## Features
//!
//! - Per-word frequency and part-of-speech storage
//! - Complete prefix closure for constant-time prefix checks
//! - Custom-word overlay that shadows a shared base dictionary
//! - Reader/writer locking safe for concurrent segmentation requests
//! - Process-wide common dictionary with safe reload

pub mod config;
pub mod dictionary;
pub mod error;
pub mod registry;
pub mod token;
pub mod util;

pub mod prelude {
    pub use crate::dictionary::base::BaseDictionary;
    pub use crate::dictionary::overlay::OverlayDictionary;
    pub use crate::dictionary::{Dictionary, TokenSink};
    pub use crate::error::{Result, SegDictError};
    pub use crate::token::{Token, TokenSource};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
