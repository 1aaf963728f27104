//! Record types and their persistable field descriptors.
//!
//! A *record* is a plain struct whose fields are mirrored into one named
//! section of the configuration document.  The set of persisted fields is
//! declared statically, once, through [`Record::fields`] (usually generated
//! by the [`record!`](crate::record) macro) instead of being discovered at
//! runtime.
//!
//! # Field descriptors (for beginners)
//!
//! A [`FieldDescriptor`] is everything the engine needs to know about one
//! field without knowing its concrete Rust type:
//!
//! - the key it is stored under (`"ExampleInt"`),
//! - its [`SemanticType`], which selects the textual grammar,
//! - a getter and setter that move the value in and out of a record as a
//!   type-erased [`Value`].
//!
//! The accessors are plain function pointers wrapped in boxed closures, so a
//! descriptor list can be built once and shared between threads.

use std::fmt;

use crate::codec::{decode_value, encode_value, CodecError};
use crate::domain::notify::ChangeNotifier;
use crate::domain::value::{FieldType, SemanticType, Value};

type Getter<R> = Box<dyn Fn(&R) -> Value + Send + Sync>;
type Setter<R> = Box<dyn Fn(&mut R, Value) -> bool + Send + Sync>;

/// A caller-defined type whose fields are persisted as one section.
///
/// `Default` supplies the first-run values; `Send + 'static` lets the
/// registry keep the instance behind a shared lock.
pub trait Record: Default + Send + 'static {
    /// Name of the section this record is stored in.
    const SECTION: &'static str;

    /// The ordered list of persisted fields.
    ///
    /// Called once per registry; the result is cached.
    fn fields() -> Vec<FieldDescriptor<Self>>;

    /// The record's change notifier, if it reports field-level changes.
    ///
    /// Records that return `Some` are written through on every notified
    /// change; records that return `None` are saved explicitly.
    fn change_notifier(&mut self) -> Option<&mut ChangeNotifier<Self>> {
        None
    }
}

enum Accessor<R> {
    Typed { get: Getter<R>, set: Setter<R> },
    Opaque,
}

/// Name, semantic type and accessors for one persisted field.
pub struct FieldDescriptor<R> {
    name: &'static str,
    semantic: SemanticType,
    accessor: Accessor<R>,
}

impl<R: 'static> FieldDescriptor<R> {
    /// Builds a descriptor for a field whose Rust type implements [`FieldType`].
    ///
    /// ```rust
    /// use propsync_core::{FieldDescriptor, SemanticType};
    ///
    /// #[derive(Default)]
    /// struct Limits { retries: i32 }
    ///
    /// let field = FieldDescriptor::<Limits>::typed("Retries", |r| &r.retries, |r| &mut r.retries);
    /// assert_eq!(field.semantic_type(), SemanticType::Int32);
    /// ```
    pub fn typed<T>(name: &'static str, get: fn(&R) -> &T, get_mut: fn(&mut R) -> &mut T) -> Self
    where
        T: FieldType + 'static,
    {
        Self {
            name,
            semantic: T::semantic_type(),
            accessor: Accessor::Typed {
                get: Box::new(move |record: &R| get(record).to_value()),
                set: Box::new(move |record: &mut R, value: Value| match T::from_value(value) {
                    Some(v) => {
                        *get_mut(record) = v;
                        true
                    }
                    None => false,
                }),
            },
        }
    }

    /// Declares a persisted field whose Rust type has no textual form.
    ///
    /// Reading or writing such a field fails with
    /// [`CodecError::UnsupportedType`] naming `type_name`.
    pub fn opaque(name: &'static str, type_name: &'static str) -> Self {
        Self {
            name,
            semantic: SemanticType::Other(type_name),
            accessor: Accessor::Opaque,
        }
    }
}

impl<R> FieldDescriptor<R> {
    /// Storage key of the field.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared semantic type of the field.
    pub fn semantic_type(&self) -> SemanticType {
        self.semantic
    }

    /// Reads the field's current value out of `record`.
    ///
    /// # Errors
    ///
    /// [`CodecError::UnsupportedType`] for opaque fields.
    pub fn read(&self, record: &R) -> Result<Value, CodecError> {
        match &self.accessor {
            Accessor::Typed { get, .. } => Ok(get(record)),
            Accessor::Opaque => Err(self.unsupported()),
        }
    }

    /// Assigns `value` to the field in `record`.
    ///
    /// # Errors
    ///
    /// [`CodecError::UnsupportedType`] for opaque fields or when `value` is
    /// not of the field's semantic type.
    pub fn write(&self, record: &mut R, value: Value) -> Result<(), CodecError> {
        match &self.accessor {
            Accessor::Typed { set, .. } if value.conforms_to(&self.semantic) => {
                if set(record, value) {
                    Ok(())
                } else {
                    Err(self.unsupported())
                }
            }
            _ => Err(self.unsupported()),
        }
    }

    /// Reads and encodes the field's current value.
    pub fn encode(&self, record: &R) -> Result<String, CodecError> {
        self.read(record).map(|value| encode_value(&value))
    }

    /// Decodes `text` for this field without touching any record.
    pub fn decode(&self, text: &str) -> Result<Value, CodecError> {
        decode_value(self.name, text, &self.semantic)
    }

    fn unsupported(&self) -> CodecError {
        CodecError::UnsupportedType {
            field: self.name.to_string(),
            type_name: self.semantic.to_string(),
        }
    }
}

impl<R> fmt::Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("semantic", &self.semantic)
            .finish_non_exhaustive()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
