//! Record-side domain types.
//!
//! Pure data and accessors with no I/O:
//!
//! - **`value`**  – the closed set of semantic types and the type-erased
//!   [`value::Value`] that moves between a record and the codec.
//! - **`record`** – the [`record::Record`] trait and its statically declared
//!   [`record::FieldDescriptor`] list.
//! - **`notify`** – the optional change-notification capability a record can
//!   embed to get write-through persistence.

pub mod notify;
pub mod record;
pub mod value;
