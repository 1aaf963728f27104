//! The structured document the registry reads and writes, and the port
//! through which it reaches the storage medium.
//!
//! A [`Document`] is a list of named [`Section`]s; a section is an ordered
//! list of `key = "text"` entries.  Both keep insertion order, so a section
//! written as `ExampleInt`, `ExampleString` reads back in that order.
//!
//! The on-disk syntax is owned by the [`Storage`] implementation.  With the
//! TOML adapter a document looks like:
//!
//! ```toml
//! [ExampleConfig]
//! ExampleInt = "3"
//! ExampleString = ""
//! ```

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when the storage medium is missing, unwritable or corrupt.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored document could not be parsed.
    #[error("config at {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// The document could not be serialized.
    #[error("failed to serialize config document: {0}")]
    Serialize(String),

    /// The medium refused the operation for another reason.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// An ordered list of `(key, text)` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Section {
    entries: IndexMap<String, String>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts or replaces an entry.  A replaced entry keeps its position.
    pub fn set_entry(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Section {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// A whole configuration document: named sections in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    sections: IndexMap<String, Section>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Returns the named section, appending an empty one if absent.
    pub fn get_or_create_section(&mut self, name: &str) -> &mut Section {
        self.sections.entry(name.to_string()).or_default()
    }

    /// Replaces (or adds) a whole section.
    pub fn insert_section(&mut self, name: impl Into<String>, section: Section) {
        self.sections.insert(name.into(), section);
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sections.keys().map(String::as_str)
    }
}

/// Port to the storage medium.
///
/// Every registry write opens the current document, edits it and commits it
/// back whole, so implementations never see partial updates.
pub trait Storage: Send + Sync {
    /// Reads the current document.  A medium that does not exist yet opens
    /// as an empty document.
    fn open_document(&self) -> Result<Document, StorageError>;

    /// Persists `document`, replacing what the medium held.
    fn commit(&self, document: &Document) -> Result<(), StorageError>;
}

// ── Tests ─────────────────────────────────────────────────────────────────────
