//! Port for process-exit notification.
//!
//! The host environment owns the shutdown path (end of `main`, a Ctrl-C
//! handler, a service stop callback).  It exposes a [`ShutdownRegistrar`]
//! so each registry can leave one hook that flushes unsaved changes.
//!
//! Hooks run only on a normal, orderly shutdown.  An abrupt termination
//! (`SIGKILL`, `abort`, power loss) skips them and unsaved changes are lost.

/// A callback run once during orderly shutdown.
pub type ExitHook = Box<dyn FnOnce() + Send + 'static>;

/// Accepts hooks to run once at orderly shutdown.
pub trait ShutdownRegistrar {
    /// Registers `hook` under a diagnostic `name`.
    fn register(&self, name: &'static str, hook: ExitHook);
}
