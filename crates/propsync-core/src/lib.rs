//! # propsync-core
//!
//! Shared foundation of propsync: record field descriptors, the textual value
//! codec, and the ports (traits) through which the registry reaches storage
//! and the host's shutdown path.
//!
//! This crate performs no I/O of its own.
//!
//! # Architecture overview (for beginners)
//!
//! propsync keeps one section of a configuration document in sync with one
//! plain Rust struct.  This crate defines the pieces that do not depend on
//! where the document lives:
//!
//! - **`domain`** – what a persistable record looks like: its ordered field
//!   descriptors, the semantic type of each field, and the optional change
//!   notifier that enables write-through.
//!
//! - **`codec`** – how one field value becomes text and back.
//!
//! - **`storage`** – the document/section model and the [`Storage`] trait an
//!   adapter implements (the `propsync` crate ships TOML and in-memory ones).
//!
//! - **`shutdown`** – the [`ShutdownRegistrar`] trait the host implements so a
//!   registry can flush unsaved changes at exit.

pub mod codec;
pub mod domain;
pub mod error;
mod macros;
pub mod shutdown;
pub mod storage;

pub use codec::{decode_value, encode_value, CodecError};
pub use domain::notify::{ChangeListener, ChangeNotifier};
pub use domain::record::{FieldDescriptor, Record};
pub use domain::value::{FieldType, SemanticType, Value};
pub use error::{PersistError, SchemaDrift};
pub use shutdown::{ExitHook, ShutdownRegistrar};
pub use storage::{Document, Section, Storage, StorageError};
