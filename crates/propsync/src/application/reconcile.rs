//! Load-or-initialize: brings a fresh instance in line with storage.
//!
//! # Algorithm
//!
//! ```text
//! section absent           → write defaults           → Created
//! section present, empty   → write defaults           → Seeded
//! entry count ≠ field count→ SchemaMismatch (EntryCount), storage untouched
//! a declared key missing   → SchemaMismatch (MissingKeys), storage untouched
//! otherwise                → decode all, then assign  → Loaded
//! ```
//!
//! The schema check is strict: the section must hold exactly the declared
//! keys.  With equal counts and no missing key there can be no unknown key,
//! so no "ignore unknown entries" path exists.
//!
//! All entries are decoded before any is assigned, so a `ValueFormat` error
//! leaves the instance exactly as it was.

use propsync_core::{PersistError, Record, SchemaDrift, Value};
use tracing::info;

use super::section_store::SectionStore;

/// What reconciliation did to bring memory and storage in line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// No section existed; one was created holding the current values.
    Created,
    /// The section existed but was empty; it was filled with current values.
    Seeded,
    /// Every stored entry was decoded into the instance.
    Loaded,
}

/// Reconciles `instance` with its stored section.
///
/// # Errors
///
/// - [`PersistError::SchemaMismatch`] when the section's keys differ from the
///   declared fields.
/// - Codec errors for entries that fail to decode, or fields whose type has
///   no textual form.
/// - Storage errors from opening or committing the document.
pub fn reconcile<R: Record>(
    store: &SectionStore<R>,
    instance: &mut R,
) -> Result<Reconciliation, PersistError> {
    let section = match store.read_section()? {
        None => {
            store.write_all(instance)?;
            info!(section = R::SECTION, "created section with default values");
            return Ok(Reconciliation::Created);
        }
        Some(section) if section.is_empty() => {
            store.write_all(instance)?;
            info!(section = R::SECTION, "seeded empty section with default values");
            return Ok(Reconciliation::Seeded);
        }
        Some(section) => section,
    };

    let fields = store.fields();
    if section.len() != fields.len() {
        return Err(PersistError::SchemaMismatch {
            section: R::SECTION.to_string(),
            drift: SchemaDrift::EntryCount {
                stored: section.len(),
                expected: fields.len(),
            },
        });
    }

    let missing: Vec<String> = fields
        .iter()
        .filter(|f| !section.contains_key(f.name()))
        .map(|f| f.name().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(PersistError::SchemaMismatch {
            section: R::SECTION.to_string(),
            drift: SchemaDrift::MissingKeys(missing),
        });
    }

    let mut decoded: Vec<(usize, Value)> = Vec::with_capacity(fields.len());
    for (key, text) in section.entries() {
        if let Some(index) = fields.iter().position(|f| f.name() == key) {
            decoded.push((index, fields[index].decode(text)?));
        }
    }
    for (index, value) in decoded {
        fields[index].write(instance, value)?;
    }

    info!(section = R::SECTION, fields = fields.len(), "loaded section");
    Ok(Reconciliation::Loaded)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
