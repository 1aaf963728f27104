//! Process shutdown hooks.
//!
//! [`ShutdownHooks`] is the host-side [`ShutdownRegistrar`]: registries leave
//! their exit-flush hooks here, and `main` calls [`ShutdownHooks::run`] on
//! every orderly exit path (end of a subcommand, `exit` in the shell, Ctrl-C).
//!
//! Hooks run in registration order, at most once.  A panicking hook is logged
//! and the remaining hooks still run.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, PoisonError};

use propsync_core::{ExitHook, ShutdownRegistrar};
use tracing::{debug, error, warn};

/// Ordered list of exit hooks, drained by [`run`](Self::run).
pub struct ShutdownHooks {
    // `None` once the hooks have run.
    hooks: Mutex<Option<Vec<(&'static str, ExitHook)>>>,
}

impl ShutdownHooks {
    pub fn new() -> Self {
        Self {
            hooks: Mutex::new(Some(Vec::new())),
        }
    }

    /// Number of hooks waiting to run.
    pub fn pending(&self) -> usize {
        self.lock().as_ref().map_or(0, Vec::len)
    }

    /// Runs every registered hook once and returns how many ran.
    ///
    /// Later calls return `0`.
    pub fn run(&self) -> usize {
        let Some(hooks) = self.lock().take() else {
            return 0;
        };

        let count = hooks.len();
        for (name, hook) in hooks {
            debug!(hook = name, "running exit hook");
            if panic::catch_unwind(AssertUnwindSafe(hook)).is_err() {
                error!(hook = name, "exit hook panicked");
            }
        }
        count
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Vec<(&'static str, ExitHook)>>> {
        self.hooks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ShutdownRegistrar for ShutdownHooks {
    fn register(&self, name: &'static str, hook: ExitHook) {
        match self.lock().as_mut() {
            Some(hooks) => hooks.push((name, hook)),
            None => warn!(hook = name, "exit hooks already ran; hook dropped"),
        }
    }
}

impl Default for ShutdownHooks {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ShutdownHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShutdownHooks")
            .field("pending", &self.pending())
            .finish()
    }
}
