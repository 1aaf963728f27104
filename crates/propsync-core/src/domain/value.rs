//! Semantic field types and the in-memory values they carry.
//!
//! Every persistable field has a [`SemanticType`] drawn from a small closed
//! set.  The Rust type of the field is bridged to that set by the
//! [`FieldType`] trait, which converts between the concrete field value and
//! the type-erased [`Value`] the codec works on.
//!
//! # Why a closed set? (for beginners)
//!
//! The storage medium only holds text.  Each semantic type has exactly one
//! canonical textual grammar (decimal integers, IEEE floats, `true`/`false`,
//! enum member names), so a value written by one run of the program is read
//! back identically by the next.  Anything richer (lists, nested structs)
//! would need its own grammar and is deliberately not supported.

use std::fmt;

/// The declared type of a persistable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticType {
    /// UTF-8 text, stored verbatim.
    String,
    /// Signed 32-bit integer, stored as decimal.
    Int32,
    /// 32-bit IEEE float.
    Float32,
    /// 64-bit IEEE float.
    Float64,
    /// `true` or `false` (case-sensitive).
    Bool,
    /// Unit-only enumeration, stored by member name.
    Enum {
        /// Rust type name of the enumeration.
        name: &'static str,
        /// Member names in declaration order.  The first one is the default.
        members: &'static [&'static str],
    },
    /// A declared field whose Rust type has no textual form.
    ///
    /// The codec rejects these with
    /// [`CodecError::UnsupportedType`](crate::codec::CodecError::UnsupportedType).
    Other(&'static str),
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticType::String => f.write_str("string"),
            SemanticType::Int32 => f.write_str("i32"),
            SemanticType::Float32 => f.write_str("f32"),
            SemanticType::Float64 => f.write_str("f64"),
            SemanticType::Bool => f.write_str("bool"),
            SemanticType::Enum { name, .. } => write!(f, "enum {name}"),
            SemanticType::Other(name) => f.write_str(name),
        }
    }
}

/// A type-erased field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int32(i32),
    Float32(f32),
    Float64(f64),
    Bool(bool),
    /// Member name of an enumeration.
    Enum(&'static str),
}

impl Value {
    /// Returns `true` if this value is an instance of `semantic`.
    ///
    /// Enumeration values must name one of the declared members.
    pub fn conforms_to(&self, semantic: &SemanticType) -> bool {
        match (self, semantic) {
            (Value::String(_), SemanticType::String)
            | (Value::Int32(_), SemanticType::Int32)
            | (Value::Float32(_), SemanticType::Float32)
            | (Value::Float64(_), SemanticType::Float64)
            | (Value::Bool(_), SemanticType::Bool) => true,
            (Value::Enum(member), SemanticType::Enum { members, .. }) => members.contains(member),
            _ => false,
        }
    }
}

/// Bridges a concrete Rust field type to a [`SemanticType`].
///
/// Implemented here for `String`, `i32`, `f32`, `f64` and `bool`.  Unit-only
/// enums get an implementation from [`enum_field!`](crate::enum_field).
pub trait FieldType: Sized {
    /// The semantic type every value of `Self` encodes as.
    fn semantic_type() -> SemanticType;

    /// Converts the field value into its type-erased form.
    fn to_value(&self) -> Value;

    /// Converts back from the type-erased form.
    ///
    /// Returns `None` when `value` is not of this field's semantic type.
    fn from_value(value: Value) -> Option<Self>;
}

impl FieldType for String {
    fn semantic_type() -> SemanticType {
        SemanticType::String
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

macro_rules! scalar_field_type {
    ($ty:ty, $variant:ident) => {
        impl FieldType for $ty {
            fn semantic_type() -> SemanticType {
                SemanticType::$variant
            }

            fn to_value(&self) -> Value {
                Value::$variant(*self)
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

scalar_field_type!(i32, Int32);
scalar_field_type!(f32, Float32);
scalar_field_type!(f64, Float64);
scalar_field_type!(bool, Bool);

// ── Tests ─────────────────────────────────────────────────────────────────────
