//! Document store: resolution from storage with a built-in fallback.
//!
//! # Precedence
//!
//! ```text
//! resolve()
//!     │
//!     ├── storage[key] present and parses ──► stored document
//!     │
//!     └── absent / unreadable / corrupt  ──► Document::sample()
//! ```
//!
//! Once anything has been written, the stored document always wins.

use crate::log;

use super::{KvStorage, MemoryStorage, StorageError};
use super::types::Document;

/// Default storage key for the site document.
pub const DEFAULT_KEY: &str = "siteData";

/// Owns the storage scope and key of the site document.
#[derive(Debug)]
pub struct DocumentStore<S> {
    storage: S,
    key: String,
}

impl<S: KvStorage> DocumentStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the current document.
    ///
    /// Never fails: a missing, unreadable or corrupt entry yields the sample
    /// document.
    pub fn resolve(&self) -> Document {
        match self.storage.get(&self.key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(doc) => {
                    log!("store"; "loading data from storage");
                    doc
                }
                Err(err) => {
                    log!("warn"; "stored `{}` is unreadable ({err}), using defaults", self.key);
                    Document::sample()
                }
            },
            Ok(None) => {
                log!("store"; "loading default data");
                Document::sample()
            }
            Err(err) => {
                log!("warn"; "{err}, using defaults");
                Document::sample()
            }
        }
    }

    /// Serialize the whole document and overwrite the stored entry.
    pub fn write(&self, doc: &Document) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(doc)?;
        self.storage.set(&self.key, &json)?;
        log!("store"; "data saved");
        Ok(())
    }

    /// Whether nothing has been written under the key yet.
    pub fn is_pristine(&self) -> bool {
        matches!(self.storage.get(&self.key), Ok(None))
    }

    /// In-memory copy of this store under the same key.
    ///
    /// Writes to the copy never reach the backing storage.
    pub fn scratch(&self) -> Result<DocumentStore<MemoryStorage>, StorageError> {
        let memory = MemoryStorage::new();
        if let Some(raw) = self.storage.get(&self.key)? {
            memory.seed(&self.key, raw);
        }
        Ok(DocumentStore::new(memory, self.key.clone()))
    }
}
