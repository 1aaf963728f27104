//! In-memory [`Storage`] used by tests and embedders that persist elsewhere.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use propsync_core::{Document, Section, Storage, StorageError};

/// A document held in memory, plus a count of successful commits.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    document: Mutex<Document>,
    commits: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing document.
    pub fn with_document(document: Document) -> Self {
        Self {
            document: Mutex::new(document),
            commits: AtomicUsize::new(0),
        }
    }

    /// A copy of the current document.
    pub fn snapshot(&self) -> Document {
        self.document
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// A copy of one section, if present.
    pub fn section(&self, name: &str) -> Option<Section> {
        self.document
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .section(name)
            .cloned()
    }

    /// Replaces a section directly, bypassing the commit counter.
    pub fn put_section(&self, name: &str, section: Section) {
        self.document
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert_section(name, section);
    }

    /// Number of successful [`Storage::commit`] calls.
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }
}

impl Storage for MemoryStorage {
    fn open_document(&self) -> Result<Document, StorageError> {
        Ok(self.snapshot())
    }

    fn commit(&self, document: &Document) -> Result<(), StorageError> {
        *self.document.lock().unwrap_or_else(PoisonError::into_inner) = document.clone();
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
