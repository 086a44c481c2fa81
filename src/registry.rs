//! Process-wide common dictionary.
//!
//! [`DictionaryRegistry`] lazily builds one [`BaseDictionary`] from a file on
//! first use and can replace it wholesale later. Handles are `Arc`s: a reload
//! publishes a new dictionary with a single pointer assignment under the
//! write lock, and readers that obtained the previous handle keep using the
//! previous, untouched dictionary until they drop it.
//!
//! # Examples
//!
//! ```no_run
//! use segdict::dictionary::Dictionary;
//! use segdict::registry;
//!
//! # fn example() -> segdict::error::Result<()> {
//! let dict = registry::common_dictionary("dict.txt")?;
//! let freq = dict.frequency("中国");
//!
//! // later, after the file changed on disk
//! let fresh = registry::reload_common_dictionary("dict.txt")?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use lazy_static::lazy_static;
use log::{info, warn};
use parking_lot::{RwLock, RwLockUpgradableReadGuard};

use crate::dictionary::base::BaseDictionary;
use crate::error::Result;

lazy_static! {
    static ref COMMON: DictionaryRegistry = DictionaryRegistry::new();
}

/// The process-wide registry.
pub fn global() -> &'static DictionaryRegistry {
    &COMMON
}

/// Shorthand for `global().get_or_create(path)`.
pub fn common_dictionary<P: AsRef<Path>>(path: P) -> Result<Arc<BaseDictionary>> {
    global().get_or_create(path)
}

/// Shorthand for `global().reload(path)`.
pub fn reload_common_dictionary<P: AsRef<Path>>(path: P) -> Result<Arc<BaseDictionary>> {
    global().reload(path)
}

#[derive(Debug)]
struct Slot {
    dictionary: Arc<BaseDictionary>,
    path: PathBuf,
}

/// Holder of a swappable [`BaseDictionary`] handle.
#[derive(Debug, Default)]
pub struct DictionaryRegistry {
    slot: RwLock<Option<Slot>>,
    generation: AtomicU64,
}

impl DictionaryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the registered dictionary, loading it from `path` on first use.
    ///
    /// Once a dictionary is registered, `path` is ignored; a mismatching path
    /// is logged as a warning. A failed first load registers nothing, so the
    /// next call tries again.
    pub fn get_or_create<P: AsRef<Path>>(&self, path: P) -> Result<Arc<BaseDictionary>> {
        let path = path.as_ref();
        let guard = self.slot.upgradable_read();
        if let Some(slot) = guard.as_ref() {
            if slot.path.as_path() != path {
                warn!(
                    "common dictionary already loaded from '{}', ignoring '{}'",
                    slot.path.display(),
                    path.display()
                );
            }
            return Ok(Arc::clone(&slot.dictionary));
        }

        let mut guard = RwLockUpgradableReadGuard::upgrade(guard);
        let dictionary = Arc::new(BaseDictionary::from_file(path)?);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            "loaded common dictionary from '{}' ({} words, generation {generation})",
            path.display(),
            dictionary.word_count()
        );
        *guard = Some(Slot {
            dictionary: Arc::clone(&dictionary),
            path: path.to_path_buf(),
        });
        Ok(dictionary)
    }

    /// Build a fresh dictionary from `path` and make it the registered one.
    ///
    /// The replacement is loaded without holding the registry lock. On
    /// failure the previous dictionary stays registered.
    pub fn reload<P: AsRef<Path>>(&self, path: P) -> Result<Arc<BaseDictionary>> {
        let path = path.as_ref();
        let dictionary = Arc::new(BaseDictionary::from_file(path)?);

        let previous = self.slot.write().replace(Slot {
            dictionary: Arc::clone(&dictionary),
            path: path.to_path_buf(),
        });
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            "reloaded common dictionary from '{}' ({} words, generation {generation}, replaced={})",
            path.display(),
            dictionary.word_count(),
            previous.is_some()
        );
        Ok(dictionary)
    }

    /// The registered dictionary, if any.
    pub fn current(&self) -> Option<Arc<BaseDictionary>> {
        self.slot
            .read()
            .as_ref()
            .map(|slot| Arc::clone(&slot.dictionary))
    }

    /// Number of dictionaries registered so far; bumps on every successful
    /// load or reload.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}
