//! ConfigRegistry: the per-record-type singleton and its persistence policy.
//!
//! One `ConfigRegistry<R>` owns the single in-memory instance of `R` and
//! decides when it is written back:
//!
//! | record kind                      | on field change          | `dirty` |
//! |----------------------------------|--------------------------|---------|
//! | has a [`ChangeNotifier`]         | write-through, commit    | stays `false` |
//! | no notifier                      | nothing until `save()`   | set `true` |
//!
//! `set_property` always writes through, whatever the record kind.
//!
//! # Lifecycle (for beginners)
//!
//! ```text
//!              get() / create()
//! Uninitialized ───────────────► Ready ──┐ mutate / save / set_property
//!                  reconcile            ◄─┘
//! ```
//!
//! The first `get()` runs [`reconcile`](super::reconcile::reconcile): it loads
//! the stored section, or writes the defaults if there is none.  Later calls
//! return the cached instance.  On orderly shutdown the registered exit hook
//! saves a dirty instance of a record without a notifier.
//!
//! # Sharing
//!
//! The handle is cheap to clone and `Send + Sync`: state lives behind an
//! `Arc<Mutex<_>>` because the exit hook may run on whichever thread drives
//! shutdown.  Do not call another method on the same registry while holding
//! a [`ConfigGuard`]; the lock is not re-entrant.

use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};

use propsync_core::{
    ChangeNotifier, PersistError, Record, ShutdownRegistrar, Storage,
};
use tracing::{debug, error, info, warn};

use super::reconcile::reconcile;
use super::section_store::SectionStore;

/// Mutable per-type state guarded by the registry lock.
struct RegistryState<R> {
    instance: R,
    initialized: bool,
    dirty: bool,
}

/// Owner of the single in-memory instance of `R`.
pub struct ConfigRegistry<R: Record> {
    state: Arc<Mutex<RegistryState<R>>>,
    store: Arc<SectionStore<R>>,
    autosave: bool,
}

impl<R: Record> Clone for ConfigRegistry<R> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            store: Arc::clone(&self.store),
            autosave: self.autosave,
        }
    }
}

impl<R: Record> ConfigRegistry<R> {
    /// Creates the registry for `R` and registers its exit hook.
    ///
    /// The instance is default-constructed here; it is reconciled with
    /// storage on first access.  If `R` exposes a change notifier the
    /// registry subscribes to it now, which fixes
    /// [`is_autosave_enabled`](Self::is_autosave_enabled) for the registry's
    /// lifetime.
    pub fn new(storage: Arc<dyn Storage>, shutdown: &dyn ShutdownRegistrar) -> Self {
        let store = Arc::new(SectionStore::<R>::new(storage));
        let mut instance = R::default();
        let autosave = attach(&store, &mut instance);

        let registry = Self {
            state: Arc::new(Mutex::new(RegistryState {
                instance,
                initialized: false,
                dirty: false,
            })),
            store,
            autosave,
        };

        let on_exit = registry.clone();
        shutdown.register(R::SECTION, Box::new(move || on_exit.flush_on_exit()));

        registry
    }

    /// Returns the instance, reconciling it with storage on first access.
    ///
    /// # Errors
    ///
    /// Any reconciliation error (schema mismatch, unparseable value, storage
    /// failure).  The registry stays uninitialized and the next call retries.
    pub fn get(&self) -> Result<ConfigGuard<'_, R>, PersistError> {
        let mut state = self.lock();
        self.ensure_initialized(&mut state)?;
        Ok(ConfigGuard {
            state,
            autosave: self.autosave,
        })
    }

    /// Replaces the instance with a fresh default and reconciles it.
    ///
    /// Unsaved changes of a record without a notifier are discarded.
    pub fn create(&self) -> Result<ConfigGuard<'_, R>, PersistError> {
        let mut state = self.lock();
        if state.dirty {
            warn!(section = R::SECTION, "create() discards unsaved changes");
        }

        let mut instance = R::default();
        attach(&self.store, &mut instance);
        reconcile(&self.store, &mut instance)?;

        state.instance = instance;
        state.initialized = true;
        state.dirty = false;
        Ok(ConfigGuard {
            state,
            autosave: self.autosave,
        })
    }

    /// Writes every field to storage.
    ///
    /// With `Some(replacement)` the replacement becomes the instance first.
    /// With `None`, an instance that was never reconciled is reconciled
    /// before saving so unseen stored values are not clobbered by defaults.
    pub fn save(&self, replacement: Option<R>) -> Result<(), PersistError> {
        let mut state = self.lock();
        match replacement {
            Some(mut instance) => {
                attach(&self.store, &mut instance);
                state.instance = instance;
                state.initialized = true;
            }
            None => self.ensure_initialized(&mut state)?,
        }
        self.save_locked(&mut state)
    }

    /// Parses `text` into the field stored under `name` and writes it through.
    ///
    /// # Errors
    ///
    /// [`PersistError::FieldNotFound`] if `R` has no such field, codec
    /// errors if `text` does not parse; in both cases nothing changes, not
    /// even first-access reconciliation.  Storage errors from the write: a
    /// record without a notifier keeps the new value and is marked dirty, a
    /// notifying record gets its previous value back.
    pub fn set_property(&self, name: &str, text: &str) -> Result<(), PersistError> {
        let field = self
            .store
            .field(name)
            .ok_or_else(|| PersistError::FieldNotFound {
                section: R::SECTION.to_string(),
                field: name.to_string(),
            })?;
        let value = field.decode(text)?;

        let mut state = self.lock();
        self.ensure_initialized(&mut state)?;

        let previous = field.read(&state.instance)?;
        field.write(&mut state.instance, value)?;

        if let Err(e) = self.store.write_field(&state.instance, field.name()) {
            if self.autosave {
                // Memory must match storage; a notifying record has no deferred save.
                if let Err(restore) = field.write(&mut state.instance, previous) {
                    warn!(section = R::SECTION, field = field.name(), error = %restore, "could not restore field");
                }
            } else {
                state.dirty = true;
            }
            return Err(e);
        }
        Ok(())
    }

    /// Renders the current field values, one `Key = value` line each.
    pub fn print(&self) -> Result<String, PersistError> {
        let mut state = self.lock();
        self.ensure_initialized(&mut state)?;

        let mut out = format!("[{}]\n", R::SECTION);
        for field in self.store.fields() {
            let rendered = match field.encode(&state.instance) {
                Ok(text) => format!("{text:?}"),
                Err(e) => format!("<{e}>"),
            };
            out.push_str(&format!("{} = {}\n", field.name(), rendered));
        }
        Ok(out)
    }

    /// `true` if field changes are written through as they happen.
    pub fn is_autosave_enabled(&self) -> bool {
        self.autosave
    }

    /// `true` if the instance may differ from storage.
    pub fn is_dirty(&self) -> bool {
        self.lock().dirty
    }

    /// `true` once the instance has been reconciled with storage.
    pub fn is_initialized(&self) -> bool {
        self.lock().initialized
    }

    /// Name of the section `R` is stored in.
    pub fn section(&self) -> &'static str {
        R::SECTION
    }

    /// Exit hook body: saves a dirty instance of a record without a notifier.
    ///
    /// Never fails: errors are logged, and a lock held elsewhere (a live
    /// [`ConfigGuard`]) skips the flush rather than blocking shutdown.
    pub fn flush_on_exit(&self) {
        if self.autosave {
            return;
        }
        let mut state = match self.state.try_lock() {
            Ok(state) => state,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => {
                warn!(section = R::SECTION, "instance is in use at exit; skipping flush");
                return;
            }
        };
        if !state.dirty {
            return;
        }
        match self
            .ensure_initialized(&mut state)
            .and_then(|()| self.save_locked(&mut state))
        {
            Ok(()) => info!(section = R::SECTION, "flushed unsaved changes at exit"),
            Err(e) => error!(section = R::SECTION, error = %e, "failed to flush unsaved changes at exit"),
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn lock(&self) -> MutexGuard<'_, RegistryState<R>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_initialized(&self, state: &mut RegistryState<R>) -> Result<(), PersistError> {
        if state.initialized {
            return Ok(());
        }
        let outcome = reconcile(&self.store, &mut state.instance)?;
        debug!(section = R::SECTION, ?outcome, "reconciled");
        state.initialized = true;
        Ok(())
    }

    fn save_locked(&self, state: &mut RegistryState<R>) -> Result<(), PersistError> {
        self.store.write_all(&state.instance)?;
        state.dirty = false;
        info!(section = R::SECTION, "saved");
        Ok(())
    }
}

/// Subscribes a write-through listener if `instance` has a change notifier.
///
/// Returns whether it did.
fn attach<R: Record>(store: &Arc<SectionStore<R>>, instance: &mut R) -> bool {
    let Some(notifier) = instance.change_notifier() else {
        return false;
    };
    let store = Arc::clone(store);
    notifier.subscribe(Arc::new(move |record: &R, field: &'static str| {
        store.write_field(record, field)
    }));
    true
}

/// Borrow of the registry's instance.
///
/// Holds the registry lock until dropped.  Mutable access to a record
/// without a change notifier marks the registry dirty.
///
/// A record with a change notifier must be changed through its setters.
/// Assigning a field directly through the guard is neither written through
/// nor marked dirty, so the change never reaches storage.
pub struct ConfigGuard<'a, R: Record> {
    state: MutexGuard<'a, RegistryState<R>>,
    autosave: bool,
}

impl<R: Record> ConfigGuard<'_, R> {
    /// The instance's notifier, if the record has one.
    pub fn notifier(&mut self) -> Option<&mut ChangeNotifier<R>> {
        self.state.instance.change_notifier()
    }
}

impl<R: Record> Deref for ConfigGuard<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.state.instance
    }
}

impl<R: Record> DerefMut for ConfigGuard<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        if !self.autosave {
            self.state.dirty = true;
        }
        &mut self.state.instance
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use mockall::mock;
    use propsync_core::{record, Document, Section, StorageError};

    use super::*;
    use crate::infrastructure::shutdown::ShutdownHooks;
    use crate::infrastructure::storage::memory::MemoryStorage;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct ExampleConfig {
        example_int: i32,
        example_string: String,
    }

    record! {
        ExampleConfig in "ExampleConfig" {
            "ExampleInt" => example_int,
            "ExampleString" => example_string,
        }
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Window {
        width: i32,
        title: String,
        changes: ChangeNotifier<Window>,
    }

    impl Window {
        fn set_width(&mut self, width: i32) -> Result<(), PersistError> {
            self.width = width;
            self.changes.notify(self, "Width")
        }
    }

    record! {
        Window in "Window" notify changes {
            "Width" => width,
            "Title" => title,
        }
    }

    mock! {
        Medium {}

        impl Storage for Medium {
            fn open_document(&self) -> Result<Document, StorageError>;
            fn commit(&self, document: &Document) -> Result<(), StorageError>;
        }
    }

    fn registry<R: Record>() -> (Arc<MemoryStorage>, ShutdownHooks, ConfigRegistry<R>) {
        let storage = Arc::new(MemoryStorage::new());
        let hooks = ShutdownHooks::new();
        let registry = ConfigRegistry::<R>::new(storage.clone(), &hooks);
        (storage, hooks, registry)
    }

    // ── Construction ──────────────────────────────────────────────────────────

    #[test]
    fn test_new_does_not_touch_storage() {
        let (storage, hooks, registry) = registry::<ExampleConfig>();

        assert!(!registry.is_initialized());
        assert_eq!(storage.commit_count(), 0);
        assert_eq!(hooks.pending(), 1, "exactly one exit hook per registry");
    }

    #[test]
    fn test_autosave_follows_notifier_capability() {
        let (_, _, plain) = registry::<ExampleConfig>();
        let (_, _, notifying) = registry::<Window>();

        assert!(!plain.is_autosave_enabled());
        assert!(notifying.is_autosave_enabled());
    }

    // ── get ───────────────────────────────────────────────────────────────────

    #[test]
    fn test_get_on_empty_storage_creates_section_with_defaults() {
        // Arrange
        let (storage, _hooks, registry) = registry::<ExampleConfig>();

        // Act
        let instance = registry.get().expect("get").clone();

        // Assert
        assert_eq!(instance, ExampleConfig::default());
        assert!(registry.is_initialized());
        assert!(!registry.is_dirty());
        assert_eq!(
            storage
                .section("ExampleConfig")
                .unwrap()
                .entries()
                .collect::<Vec<_>>(),
            vec![("ExampleInt", "0"), ("ExampleString", "")]
        );
    }

    #[test]
    fn test_get_reconciles_only_once() {
        let (storage, _hooks, registry) = registry::<ExampleConfig>();

        drop(registry.get().expect("first"));
        storage.put_section(
            "ExampleConfig",
            [("ExampleInt", "99"), ("ExampleString", "")].into_iter().collect(),
        );
        let instance = registry.get().expect("second");

        assert_eq!(instance.example_int, 0, "cached instance is returned");
    }

    #[test]
    fn test_get_failure_leaves_registry_uninitialized() {
        let (storage, _hooks, registry) = registry::<ExampleConfig>();
        storage.put_section(
            "ExampleConfig",
            [("ExampleInt", "x"), ("ExampleString", "")].into_iter().collect(),
        );

        assert!(registry.get().is_err());
        assert!(!registry.is_initialized());
    }

    // ── Deferred save ─────────────────────────────────────────────────────────

    #[test]
    fn test_mutation_without_notifier_is_deferred_until_save() {
        // Arrange
        let (storage, _hooks, registry) = registry::<ExampleConfig>();
        drop(registry.get().expect("get"));

        // Act
        registry.get().expect("get").example_int = 7;

        // Assert: storage still holds the default
        assert!(registry.is_dirty());
        assert_eq!(
            storage.section("ExampleConfig").unwrap().get("ExampleInt"),
            Some("0")
        );

        // Act
        registry.save(None).expect("save");

        // Assert
        assert!(!registry.is_dirty());
        assert_eq!(
            storage.section("ExampleConfig").unwrap().get("ExampleInt"),
            Some("7")
        );
    }

    #[test]
    fn test_save_before_get_does_not_clobber_stored_values() {
        let (storage, _hooks, registry) = registry::<ExampleConfig>();
        storage.put_section(
            "ExampleConfig",
            [("ExampleInt", "12"), ("ExampleString", "kept")]
                .into_iter()
                .collect(),
        );

        registry.save(None).expect("save");

        let section = storage.section("ExampleConfig").unwrap();
        assert_eq!(section.get("ExampleInt"), Some("12"));
        assert_eq!(section.get("ExampleString"), Some("kept"));
    }

    #[test]
    fn test_save_with_replacement_adopts_it() {
        let (storage, _hooks, registry) = registry::<ExampleConfig>();
        let replacement = ExampleConfig {
            example_int: 5,
            example_string: "new".to_string(),
        };

        registry.save(Some(replacement.clone())).expect("save");

        assert_eq!(*registry.get().expect("get"), replacement);
        assert_eq!(
            storage.section("ExampleConfig").unwrap().get("ExampleString"),
            Some("new")
        );
    }

    // ── Write-through ─────────────────────────────────────────────────────────

    #[test]
    fn test_notified_mutation_writes_through_without_save() {
        // Arrange
        let (storage, _hooks, registry) = registry::<Window>();
        drop(registry.get().expect("get"));
        let commits_before = storage.commit_count();

        // Act
        registry.get().expect("get").set_width(1280).expect("set_width");

        // Assert
        assert_eq!(storage.section("Window").unwrap().get("Width"), Some("1280"));
        assert_eq!(storage.commit_count(), commits_before + 1);
        assert!(!registry.is_dirty());
    }

    #[test]
    fn test_direct_assignment_on_notifying_record_bypasses_persistence() {
        let (storage, _hooks, registry) = registry::<Window>();
        drop(registry.get().expect("get"));
        let commits = storage.commit_count();

        registry.get().expect("get").width = 999;

        assert_eq!(storage.commit_count(), commits);
        assert!(!registry.is_dirty());
        assert_eq!(storage.section("Window").unwrap().get("Width"), Some("0"));
    }

    #[test]
    fn test_replacement_instance_is_subscribed() {
        let (storage, _hooks, registry) = registry::<Window>();
        registry.save(Some(Window::default())).expect("save");

        registry.get().expect("get").set_width(640).expect("set_width");

        assert_eq!(storage.section("Window").unwrap().get("Width"), Some("640"));
    }

    // ── set_property ──────────────────────────────────────────────────────────

    #[test]
    fn test_set_property_writes_through_for_plain_record() {
        // Arrange
        let (storage, _hooks, registry) = registry::<ExampleConfig>();

        // Act
        registry.set_property("ExampleInt", "3").expect("set_property");

        // Assert
        assert_eq!(registry.get().expect("get").example_int, 3);
        assert_eq!(
            storage.section("ExampleConfig").unwrap().get("ExampleInt"),
            Some("3")
        );
    }

    #[test]
    fn test_set_property_unknown_field_changes_nothing() {
        let (storage, _hooks, registry) = registry::<ExampleConfig>();
        drop(registry.get().expect("get"));
        let before = storage.snapshot();

        let err = registry.set_property("DoesNotExist", "x").unwrap_err();

        assert!(matches!(err, PersistError::FieldNotFound { ref field, .. } if field == "DoesNotExist"));
        assert!(err.is_recoverable());
        assert_eq!(storage.snapshot(), before);
        assert_eq!(*registry.get().expect("get"), ExampleConfig::default());
    }

    #[test]
    fn test_set_property_unknown_field_does_not_reconcile() {
        let (storage, _hooks, registry) = registry::<ExampleConfig>();

        let err = registry.set_property("DoesNotExist", "x").unwrap_err();

        assert!(matches!(err, PersistError::FieldNotFound { .. }));
        assert!(!registry.is_initialized());
        assert_eq!(storage.commit_count(), 0);
        assert!(storage.section("ExampleConfig").is_none());
    }

    #[test]
    fn test_set_property_bad_text_leaves_instance_unchanged() {
        let (_storage, _hooks, registry) = registry::<ExampleConfig>();

        let result = registry.set_property("ExampleInt", "three");

        assert!(result.is_err());
        assert_eq!(registry.get().expect("get").example_int, 0);
    }

    // ── create / print ────────────────────────────────────────────────────────

    #[test]
    fn test_create_reloads_from_storage() {
        let (storage, _hooks, registry) = registry::<ExampleConfig>();
        registry.get().expect("get").example_int = 4;
        storage.put_section(
            "ExampleConfig",
            [("ExampleInt", "21"), ("ExampleString", "disk")]
                .into_iter()
                .collect(),
        );

        let instance = registry.create().expect("create").clone();

        assert_eq!(instance.example_int, 21);
        assert_eq!(instance.example_string, "disk");
        assert!(!registry.is_dirty());
    }

    #[test]
    fn test_print_lists_every_field() {
        let (_storage, _hooks, registry) = registry::<ExampleConfig>();
        registry.set_property("ExampleString", "hi").expect("set");

        let out = registry.print().expect("print");

        assert_eq!(out, "[ExampleConfig]\nExampleInt = \"0\"\nExampleString = \"hi\"\n");
    }

    // ── Exit flush ────────────────────────────────────────────────────────────

    #[test]
    fn test_exit_hook_saves_dirty_instance_once() {
        // Arrange
        let (storage, hooks, registry) = registry::<ExampleConfig>();
        registry.get().expect("get").example_string = "unsaved".to_string();

        // Act
        let ran = hooks.run();

        // Assert
        assert_eq!(ran, 1);
        assert!(!registry.is_dirty());
        assert_eq!(
            storage.section("ExampleConfig").unwrap().get("ExampleString"),
            Some("unsaved")
        );
        assert_eq!(hooks.run(), 0, "hooks run at most once");
    }

    #[test]
    fn test_exit_hook_skips_clean_instance() {
        let (storage, hooks, registry) = registry::<ExampleConfig>();
        drop(registry.get().expect("get"));
        let commits = storage.commit_count();

        hooks.run();

        assert_eq!(storage.commit_count(), commits);
    }

    #[test]
    fn test_exit_hook_skips_when_guard_is_held() {
        let (storage, hooks, registry) = registry::<ExampleConfig>();
        let mut guard = registry.get().expect("get");
        guard.example_int = 1;
        let commits = storage.commit_count();

        hooks.run();

        assert_eq!(storage.commit_count(), commits);
        drop(guard);
    }

    // ── Storage failures ──────────────────────────────────────────────────────

    #[test]
    fn test_storage_failure_on_open_is_surfaced() {
        let mut medium = MockMedium::new();
        medium
            .expect_open_document()
            .returning(|| Err(StorageError::Unavailable("disk gone".to_string())));
        let hooks = ShutdownHooks::new();
        let registry = ConfigRegistry::<ExampleConfig>::new(Arc::new(medium), &hooks);

        let err = registry.get().err().expect("get must fail");

        assert!(matches!(err, PersistError::Storage(StorageError::Unavailable(_))));
        assert!(!registry.is_initialized());
    }

    #[test]
    fn test_commit_failure_keeps_instance_dirty() {
        // Arrange: a matching section loads fine, every commit fails
        let mut medium = MockMedium::new();
        medium.expect_open_document().returning(|| {
            let mut doc = Document::new();
            let section: Section = [("ExampleInt", "1"), ("ExampleString", "")]
                .into_iter()
                .collect();
            doc.insert_section("ExampleConfig", section);
            Ok(doc)
        });
        medium
            .expect_commit()
            .returning(|_| Err(StorageError::Unavailable("read-only".to_string())));
        let hooks = ShutdownHooks::new();
        let registry = ConfigRegistry::<ExampleConfig>::new(Arc::new(medium), &hooks);
        registry.get().expect("get").example_int = 2;

        // Act
        let result = registry.save(None);

        // Assert
        assert!(matches!(result, Err(PersistError::Storage(_))));
        assert!(registry.is_dirty());
    }

    #[test]
    fn test_exit_flush_swallows_storage_failure() {
        // Arrange
        let mut medium = MockMedium::new();
        medium.expect_open_document().returning(|| {
            let mut doc = Document::new();
            let section: Section = [("ExampleInt", "1"), ("ExampleString", "")]
                .into_iter()
                .collect();
            doc.insert_section("ExampleConfig", section);
            Ok(doc)
        });
        medium
            .expect_commit()
            .times(1)
            .returning(|_| Err(StorageError::Unavailable("read-only".to_string())));
        let hooks = ShutdownHooks::new();
        let registry = ConfigRegistry::<ExampleConfig>::new(Arc::new(medium), &hooks);
        registry.get().expect("get").example_int = 9;

        // Act
        let ran = hooks.run();

        // Assert: the hook ran, failed quietly, and left the change unsaved
        assert_eq!(ran, 1);
        assert!(registry.is_dirty());
    }

    /// Memory storage whose commits can be switched to fail.
    #[derive(Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        fail_commits: AtomicBool,
    }

    impl Storage for FlakyStorage {
        fn open_document(&self) -> Result<Document, StorageError> {
            self.inner.open_document()
        }

        fn commit(&self, document: &Document) -> Result<(), StorageError> {
            if self.fail_commits.load(Ordering::SeqCst) {
                return Err(StorageError::Unavailable("read-only".to_string()));
            }
            self.inner.commit(document)
        }
    }

    fn flaky<R: Record>() -> (Arc<FlakyStorage>, ShutdownHooks, ConfigRegistry<R>) {
        let storage = Arc::new(FlakyStorage::default());
        let hooks = ShutdownHooks::new();
        let registry = ConfigRegistry::<R>::new(storage.clone(), &hooks);
        (storage, hooks, registry)
    }

    #[test]
    fn test_failed_set_property_marks_dirty_and_exit_flushes_it() {
        // Arrange
        let (storage, hooks, registry) = flaky::<ExampleConfig>();
        drop(registry.get().expect("get"));
        storage.fail_commits.store(true, Ordering::SeqCst);

        // Act
        let result = registry.set_property("ExampleInt", "5");
        storage.fail_commits.store(false, Ordering::SeqCst);
        hooks.run();

        // Assert
        assert!(matches!(result, Err(PersistError::Storage(_))));
        assert_eq!(registry.get().expect("get").example_int, 5);
        assert!(!registry.is_dirty());
        assert_eq!(
            storage.inner.section("ExampleConfig").unwrap().get("ExampleInt"),
            Some("5")
        );
    }

    #[test]
    fn test_failed_set_property_keeps_dirty_until_saved() {
        let (storage, _hooks, registry) = flaky::<ExampleConfig>();
        drop(registry.get().expect("get"));
        storage.fail_commits.store(true, Ordering::SeqCst);

        assert!(registry.set_property("ExampleString", "pending").is_err());

        assert!(registry.is_dirty());
        assert_eq!(
            storage.inner.section("ExampleConfig").unwrap().get("ExampleString"),
            Some("")
        );
    }

    #[test]
    fn test_failed_set_property_restores_notifying_record() {
        // Arrange
        let (storage, _hooks, registry) = flaky::<Window>();
        drop(registry.get().expect("get"));
        storage.fail_commits.store(true, Ordering::SeqCst);

        // Act
        let result = registry.set_property("Width", "800");

        // Assert: memory still matches storage
        assert!(result.is_err());
        assert_eq!(registry.get().expect("get").width, 0);
        assert!(!registry.is_dirty());
        assert_eq!(storage.inner.section("Window").unwrap().get("Width"), Some("0"));
    }
}
