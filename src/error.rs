//! Error types for the segdict library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`SegDictError`] enum. Lookups never fail: a missing word is reported as
//! `None`, not as an error.
//!
//! # Examples
//!
//! ```
//! use segdict::error::{Result, SegDictError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SegDictError::config("dictionary_path must not be empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// The main error type for segdict operations.
#[derive(Error, Debug)]
pub enum SegDictError {
    /// I/O errors while reading dictionary or configuration files
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A dictionary line that could not be parsed
    #[error("Parse error in {}:{line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for operations that may fail with SegDictError.
pub type Result<T> = std::result::Result<T, SegDictError>;

impl SegDictError {
    /// Create a new parse error for the given file and 1-based line number.
    pub fn parse<P: AsRef<Path>, S: Into<String>>(path: P, line: usize, msg: S) -> Self {
        SegDictError::Parse {
            path: path.as_ref().to_path_buf(),
            line,
            message: msg.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SegDictError::Config(msg.into())
    }
}
