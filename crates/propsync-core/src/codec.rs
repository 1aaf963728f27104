//! Textual codec for individual field values.
//!
//! Grammar per semantic type:
//! ```text
//! string   verbatim
//! i32      decimal, optional sign          "-42"
//! f32/f64  shortest round-trip decimal     "0.1"  "1e-7"  "inf"  "NaN"
//! bool     "true" | "false"                case-sensitive
//! enum     member name                     "Dark"
//! ```
//! Empty text decodes to the type's default value (`""`, `0`, `0.0`,
//! `false`, first enum member), which keeps freshly written sections
//! readable even when a value was never set.

use thiserror::Error;

use crate::domain::value::{SemanticType, Value};

/// Errors produced while converting between values and text.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CodecError {
    /// The field's declared type has no textual form.
    #[error("field `{field}` has type `{type_name}`, which has no textual form")]
    UnsupportedType { field: String, type_name: String },

    /// The stored text does not parse as the field's declared type.
    #[error("field `{field}`: cannot parse {raw:?} as {expected}")]
    ValueFormat {
        field: String,
        expected: String,
        raw: String,
    },
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Renders `value` in its canonical textual form.
///
/// # Examples
///
/// ```rust
/// use propsync_core::codec::encode_value;
/// use propsync_core::Value;
///
/// assert_eq!(encode_value(&Value::Int32(-7)), "-7");
/// assert_eq!(encode_value(&Value::Bool(true)), "true");
/// assert_eq!(encode_value(&Value::String(String::new())), "");
/// ```
pub fn encode_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Int32(v) => v.to_string(),
        Value::Float32(v) => v.to_string(),
        Value::Float64(v) => v.to_string(),
        Value::Bool(v) => v.to_string(),
        Value::Enum(member) => (*member).to_string(),
    }
}

/// Parses `text` as a value of `semantic`, the declared type of `field`.
///
/// # Errors
///
/// - [`CodecError::UnsupportedType`] for [`SemanticType::Other`].
/// - [`CodecError::ValueFormat`] when `text` is not valid for the type.
///
/// # Examples
///
/// ```rust
/// use propsync_core::codec::decode_value;
/// use propsync_core::{SemanticType, Value};
///
/// let v = decode_value("Retries", "3", &SemanticType::Int32).unwrap();
/// assert_eq!(v, Value::Int32(3));
///
/// // Empty text is the type's default.
/// let v = decode_value("Retries", "", &SemanticType::Int32).unwrap();
/// assert_eq!(v, Value::Int32(0));
/// ```
pub fn decode_value(field: &str, text: &str, semantic: &SemanticType) -> Result<Value, CodecError> {
    if text.is_empty() {
        return default_value(field, semantic);
    }

    let malformed = || CodecError::ValueFormat {
        field: field.to_string(),
        expected: semantic.to_string(),
        raw: text.to_string(),
    };

    match semantic {
        SemanticType::String => Ok(Value::String(text.to_string())),
        SemanticType::Int32 => text.parse().map(Value::Int32).map_err(|_| malformed()),
        SemanticType::Float32 => text.parse().map(Value::Float32).map_err(|_| malformed()),
        SemanticType::Float64 => text.parse().map(Value::Float64).map_err(|_| malformed()),
        SemanticType::Bool => text.parse().map(Value::Bool).map_err(|_| malformed()),
        SemanticType::Enum { members, .. } => members
            .iter()
            .find(|member| **member == text)
            .map(|member| Value::Enum(*member))
            .ok_or_else(malformed),
        SemanticType::Other(type_name) => Err(unsupported(field, type_name)),
    }
}

/// Returns the value an empty text decodes to for `semantic`.
fn default_value(field: &str, semantic: &SemanticType) -> Result<Value, CodecError> {
    match semantic {
        SemanticType::String => Ok(Value::String(String::new())),
        SemanticType::Int32 => Ok(Value::Int32(0)),
        SemanticType::Float32 => Ok(Value::Float32(0.0)),
        SemanticType::Float64 => Ok(Value::Float64(0.0)),
        SemanticType::Bool => Ok(Value::Bool(false)),
        SemanticType::Enum { members, .. } => {
            members
                .first()
                .map(|member| Value::Enum(*member))
                .ok_or_else(|| CodecError::ValueFormat {
                    field: field.to_string(),
                    expected: semantic.to_string(),
                    raw: String::new(),
                })
        }
        SemanticType::Other(type_name) => Err(unsupported(field, type_name)),
    }
}

fn unsupported(field: &str, type_name: &str) -> CodecError {
    CodecError::UnsupportedType {
        field: field.to_string(),
        type_name: type_name.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
