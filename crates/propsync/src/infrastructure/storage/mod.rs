//! Storage adapters: where a propsync document actually lives.
//!
//! - `toml_file` – one TOML file in the platform config directory (or any
//!   path given on the command line).  Reading a missing file yields an empty
//!   document, so first run needs no setup.
//! - `memory`    – a document held in memory; used by tests and by hosts
//!   that persist the document some other way.
//!
//! Both implement [`propsync_core::Storage`], so the registry never learns
//! which one it is talking to.

pub mod memory;
pub mod toml_file;
