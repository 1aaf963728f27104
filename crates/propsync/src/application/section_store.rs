//! Encodes records into their stored section and reads the section back.
//!
//! [`SectionStore`] pairs the cached field descriptors of one record type with
//! the storage port.  It is shared (via `Arc`) between the registry and the
//! change listener it subscribes on the instance, so a notified setter can
//! write through without going back through the registry's lock.
//!
//! Every write follows the same sequence:
//!
//! ```text
//! encode field(s)  →  open_document  →  set_entry …  →  commit
//! ```
//!
//! Encoding happens first so a codec error never reaches the medium.

use std::sync::Arc;

use propsync_core::{Document, FieldDescriptor, PersistError, Record, Section, Storage};
use tracing::debug;

/// Field descriptors plus storage access for one record type.
pub struct SectionStore<R> {
    storage: Arc<dyn Storage>,
    fields: Vec<FieldDescriptor<R>>,
}

impl<R: Record> SectionStore<R> {
    /// Builds the store, caching `R::fields()` for its lifetime.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            fields: R::fields(),
        }
    }

    /// Name of the section `R` is stored in.
    pub fn section_name(&self) -> &'static str {
        R::SECTION
    }

    /// The cached descriptors, in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor<R>] {
        &self.fields
    }

    /// Looks up a descriptor by storage key.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor<R>> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Opens the current document.
    pub fn open(&self) -> Result<Document, PersistError> {
        Ok(self.storage.open_document()?)
    }

    /// Reads the record's section, if the document has one.
    pub fn read_section(&self) -> Result<Option<Section>, PersistError> {
        Ok(self.open()?.section(R::SECTION).cloned())
    }

    /// Encodes every field of `record` as `(key, text)` pairs.
    pub fn encode_all(&self, record: &R) -> Result<Vec<(&'static str, String)>, PersistError> {
        self.fields
            .iter()
            .map(|f| {
                f.encode(record)
                    .map(|text| (f.name(), text))
                    .map_err(PersistError::from)
            })
            .collect()
    }

    /// Writes one field of `record` through to storage and commits.
    ///
    /// # Errors
    ///
    /// [`PersistError::FieldNotFound`] if `R` has no field `name`, codec
    /// errors from encoding, storage errors from open/commit.
    pub fn write_field(&self, record: &R, name: &str) -> Result<(), PersistError> {
        let field = self.field(name).ok_or_else(|| PersistError::FieldNotFound {
            section: R::SECTION.to_string(),
            field: name.to_string(),
        })?;
        let text = field.encode(record)?;

        let mut document = self.open()?;
        document
            .get_or_create_section(R::SECTION)
            .set_entry(field.name(), text.as_str());
        self.storage.commit(&document)?;

        debug!(section = R::SECTION, field = field.name(), value = %text, "wrote field through");
        Ok(())
    }

    /// Writes every field of `record` into its section and commits.
    pub fn write_all(&self, record: &R) -> Result<(), PersistError> {
        let entries = self.encode_all(record)?;

        let mut document = self.open()?;
        let section = document.get_or_create_section(R::SECTION);
        for (key, text) in entries {
            section.set_entry(key, text);
        }
        self.storage.commit(&document)?;

        debug!(section = R::SECTION, fields = self.fields.len(), "wrote all fields");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
