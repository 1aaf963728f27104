//! propsync library entry point.
//!
//! Keeps a plain Rust struct in sync with one section of a configuration
//! document.  Declare the struct's fields with [`propsync_core::record!`],
//! build a [`ConfigRegistry`] over a storage adapter, and read or change the
//! instance through it:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use propsync::{ConfigRegistry, ShutdownHooks, TomlFileStorage};
//! use propsync_core::record;
//!
//! #[derive(Default)]
//! struct ExampleConfig {
//!     example_int: i32,
//!     example_string: String,
//! }
//!
//! record! {
//!     ExampleConfig in "ExampleConfig" {
//!         "ExampleInt" => example_int,
//!         "ExampleString" => example_string,
//!     }
//! }
//!
//! # fn main() -> Result<(), propsync_core::PersistError> {
//! let hooks = ShutdownHooks::new();
//! let storage = Arc::new(TomlFileStorage::new("config.toml"));
//! let config = ConfigRegistry::<ExampleConfig>::new(storage, &hooks);
//!
//! config.get()?.example_int = 3;
//! config.save(None)?;
//! config.set_property("ExampleString", "hello")?;
//!
//! hooks.run();
//! # Ok(())
//! # }
//! ```
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.

pub mod application;
pub mod demo;
pub mod infrastructure;

pub use application::registry::{ConfigGuard, ConfigRegistry};
pub use infrastructure::shutdown::ShutdownHooks;
pub use infrastructure::storage::memory::MemoryStorage;
pub use infrastructure::storage::toml_file::TomlFileStorage;
