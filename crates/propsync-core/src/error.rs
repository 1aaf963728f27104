//! Error type returned by registry operations.

use thiserror::Error;

use crate::codec::CodecError;
use crate::storage::StorageError;

/// How a stored section disagrees with the record's field list.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchemaDrift {
    /// The section holds a different number of entries than there are fields.
    #[error("section holds {stored} entries but the record declares {expected} fields")]
    EntryCount { stored: usize, expected: usize },

    /// Counts agree but some declared fields have no entry.
    #[error("section is missing entries for {}", .0.join(", "))]
    MissingKeys(Vec<String>),
}

/// Errors surfaced by load, save and write-through operations.
#[derive(Debug, Error)]
pub enum PersistError {
    /// A field value could not be converted to or from text.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The stored section no longer matches the record type.
    #[error("section `{section}` does not match its record type: {drift}")]
    SchemaMismatch { section: String, drift: SchemaDrift },

    /// `set_property` named a field the record does not declare.
    #[error("record `{section}` has no field named `{field}`")]
    FieldNotFound { section: String, field: String },

    /// The storage medium could not be opened, read, or committed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl PersistError {
    /// Returns `true` for errors that leave the registry usable as-is.
    ///
    /// Only an unknown field name qualifies; every other error means memory
    /// and storage may disagree until the caller intervenes.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PersistError::FieldNotFound { .. })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mismatch_message_names_section_and_counts() {
        let err = PersistError::SchemaMismatch {
            section: "ExampleConfig".to_string(),
            drift: SchemaDrift::EntryCount {
                stored: 3,
                expected: 2,
            },
        };
        assert_eq!(
            err.to_string(),
            "section `ExampleConfig` does not match its record type: \
             section holds 3 entries but the record declares 2 fields"
        );
    }

    #[test]
    fn test_missing_keys_are_listed() {
        let drift = SchemaDrift::MissingKeys(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(drift.to_string(), "section is missing entries for A, B");
    }

    #[test]
    fn test_codec_error_converts_transparently() {
        let codec = CodecError::ValueFormat {
            field: "Port".to_string(),
            expected: "i32".to_string(),
            raw: "abc".to_string(),
        };
        let err: PersistError = codec.clone().into();
        assert_eq!(err.to_string(), codec.to_string());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_only_field_not_found_is_recoverable() {
        let err = PersistError::FieldNotFound {
            section: "S".to_string(),
            field: "F".to_string(),
        };
        assert!(err.is_recoverable());
    }
}
