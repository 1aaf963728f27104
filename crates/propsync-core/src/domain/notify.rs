//! Field-level change notification.
//!
//! A record opts into write-through persistence by embedding a
//! [`ChangeNotifier`] and calling [`ChangeNotifier::notify`] from each
//! setter, right after the field is assigned:
//!
//! ```rust
//! use propsync_core::{ChangeNotifier, PersistError};
//!
//! #[derive(Default)]
//! struct Window {
//!     width: i32,
//!     changes: ChangeNotifier<Window>,
//! }
//!
//! impl Window {
//!     pub fn set_width(&mut self, width: i32) -> Result<(), PersistError> {
//!         self.width = width;
//!         self.changes.notify(self, "Width")
//!     }
//! }
//! ```
//!
//! The registry subscribes once, when it creates the instance.  Listener
//! errors (a failed write-through) are returned from the setter.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::error::PersistError;

/// Callback invoked after a field of `R` changed.
pub type ChangeListener<R> = Arc<dyn Fn(&R, &'static str) -> Result<(), PersistError> + Send + Sync>;

/// Listener list embedded in records that report field changes.
///
/// Cloning a notifier yields an empty one: copies of a record are detached
/// from storage.  All notifiers compare equal so records can still derive
/// `PartialEq`.
pub struct ChangeNotifier<R> {
    listeners: Vec<ChangeListener<R>>,
}

impl<R> ChangeNotifier<R> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Adds a listener.
    pub fn subscribe(&mut self, listener: ChangeListener<R>) {
        self.listeners.push(listener);
    }

    /// Number of subscribed listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Tells every listener that `field` of `record` changed.
    ///
    /// Stops at and returns the first listener error.
    pub fn notify(&self, record: &R, field: &'static str) -> Result<(), PersistError> {
        trace!(field, listeners = self.listeners.len(), "field changed");
        for listener in &self.listeners {
            listener(record, field)?;
        }
        Ok(())
    }
}

impl<R> Default for ChangeNotifier<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for ChangeNotifier<R> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<R> PartialEq for ChangeNotifier<R> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<R> fmt::Debug for ChangeNotifier<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
