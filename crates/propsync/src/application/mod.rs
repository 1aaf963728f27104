//! Application layer: the registry and the use cases it is built from.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure rules, here in `propsync_core`) and the infrastructure (files, the
//! process shutdown path).
//!
//! Code in this layer:
//!
//! - **Orchestrates** domain objects to fulfil a goal (e.g., "load this
//!   record from its section, or write the defaults if there is none").
//! - **Depends on abstractions** ([`propsync_core::Storage`],
//!   [`propsync_core::ShutdownRegistrar`]) rather than concrete adapters.
//! - **Contains no file system access** of its own.
//!
//! # Sub-modules
//!
//! - **`section_store`** – Encodes a record's fields into its section and
//!   commits the document; shared by the registry and the write-through
//!   listener.
//!
//! - **`reconcile`** – First-access load-or-initialize, including the strict
//!   schema check that refuses a section whose keys differ from the record.
//!
//! - **`registry`** – `ConfigRegistry<R>`: the single instance of a record
//!   type, its dirty flag and autosave policy, and the exit flush.

pub mod reconcile;
pub mod registry;
pub mod section_store;
