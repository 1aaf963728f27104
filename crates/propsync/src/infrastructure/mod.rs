//! Infrastructure layer for propsync.
//!
//! Contains the OS-facing adapters: file-system storage and the process
//! shutdown hook list.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `propsync_core`, but MUST NOT be imported by the `application` layer
//! outside of tests.

pub mod shutdown;
pub mod storage;
