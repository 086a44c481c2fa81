//! Dictionary configuration.
//!
//! A configuration names one base dictionary file and any number of user
//! dictionary files layered on top of it:
//!
//! ```json
//! {
//!   "dictionary_path": "dict/dict.txt",
//!   "user_dictionary_paths": ["dict/user.txt", "dict/brands.txt"]
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::dictionary::base::BaseDictionary;
use crate::dictionary::overlay::OverlayDictionary;
use crate::error::{Result, SegDictError};

/// Where to load dictionaries from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryConfig {
    /// Base dictionary file.
    pub dictionary_path: PathBuf,

    /// User dictionary files, applied to the overlay in order.
    #[serde(default)]
    pub user_dictionary_paths: Vec<PathBuf>,
}

impl DictionaryConfig {
    /// Create a configuration with no user dictionaries.
    pub fn new<P: Into<PathBuf>>(dictionary_path: P) -> Self {
        DictionaryConfig {
            dictionary_path: dictionary_path.into(),
            user_dictionary_paths: Vec::new(),
        }
    }

    /// Append a user dictionary file.
    pub fn with_user_dictionary<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.user_dictionary_paths.push(path.into());
        self
    }

    /// Parse a JSON configuration string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: DictionaryConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Check that every path is non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.dictionary_path.as_os_str().is_empty() {
            return Err(SegDictError::config("dictionary_path must not be empty"));
        }
        if let Some(idx) = self
            .user_dictionary_paths
            .iter()
            .position(|path| path.as_os_str().is_empty())
        {
            return Err(SegDictError::config(format!(
                "user_dictionary_paths[{idx}] must not be empty"
            )));
        }
        Ok(())
    }

    /// Load the base dictionary and an overlay holding every user dictionary.
    ///
    /// The base dictionary is built directly, not through the process-wide
    /// registry.
    pub fn build(&self) -> Result<OverlayDictionary> {
        self.validate()?;

        let base = Arc::new(BaseDictionary::from_file(&self.dictionary_path)?);
        let overlay = OverlayDictionary::new(base);
        for path in &self.user_dictionary_paths {
            overlay.load_user_dictionary(path)?;
        }

        info!(
            "built dictionary from '{}' with {} user dictionaries ({} custom words)",
            self.dictionary_path.display(),
            self.user_dictionary_paths.len(),
            overlay.custom_words().len()
        );
        Ok(overlay)
    }
}
