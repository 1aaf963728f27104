//! Demo records and the command interpreter behind the `propsync` binary.
//!
//! Two record types show the two persistence policies side by side:
//!
//! - [`ExampleConfig`] has no change notifier.  Edits stay in memory
//!   (`dirty`) until `save`, or until the exit hook flushes them.
//! - [`WindowSettings`] embeds a [`ChangeNotifier`]; every setter writes the
//!   changed field straight through to the file.
//!
//! [`Demo::execute`] interprets one shell line so the interactive loop in
//! `main.rs` stays a thin I/O wrapper.

use std::sync::Arc;

use propsync_core::{
    enum_field, record, ChangeNotifier, PersistError, ShutdownRegistrar, Storage,
};

use crate::application::registry::ConfigRegistry;

// ── Demo records ──────────────────────────────────────────────────────────────

/// Plain record: changes are saved explicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExampleConfig {
    pub example_int: i32,
    pub example_string: String,
    pub example_ratio: f64,
    pub example_flag: bool,
}

record! {
    ExampleConfig in "ExampleConfig" {
        "ExampleInt" => example_int,
        "ExampleString" => example_string,
        "ExampleRatio" => example_ratio,
        "ExampleFlag" => example_flag,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

enum_field!(Theme { Light, Dark, System });

/// Notifying record: each setter writes through.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSettings {
    width: i32,
    height: i32,
    scale: f32,
    theme: Theme,
    changes: ChangeNotifier<WindowSettings>,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            scale: 1.0,
            theme: Theme::default(),
            changes: ChangeNotifier::new(),
        }
    }
}

record! {
    WindowSettings in "WindowSettings" notify changes {
        "Width" => width,
        "Height" => height,
        "Scale" => scale,
        "Theme" => theme,
    }
}

impl WindowSettings {
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_width(&mut self, width: i32) -> Result<(), PersistError> {
        self.width = width;
        self.changes.notify(self, "Width")
    }

    pub fn set_height(&mut self, height: i32) -> Result<(), PersistError> {
        self.height = height;
        self.changes.notify(self, "Height")
    }

    pub fn set_scale(&mut self, scale: f32) -> Result<(), PersistError> {
        self.scale = scale;
        self.changes.notify(self, "Scale")
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), PersistError> {
        self.theme = theme;
        self.changes.notify(self, "Theme")
    }
}

// ── Command interpreter ───────────────────────────────────────────────────────

/// Result of one shell line.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellOutcome {
    /// Print this text and read the next line.
    Continue(String),
    /// Leave the loop.
    Exit,
}

const HELP: &str = "\
commands:
  show                   print both sections
  set <NAME> <VALUE>     set a field by name (write-through); NAME may be Section.Field
  note <TEXT>            change ExampleString in memory only (saved on save or exit)
  width <N>              change WindowSettings.Width through its setter (write-through)
  save                   save ExampleConfig
  reload                 discard in-memory state and reload both sections
  status                 show dirty/autosave flags
  exit | quit            run exit hooks and leave";

/// The registries the demo binary works with.
#[derive(Clone)]
pub struct Demo {
    pub example: ConfigRegistry<ExampleConfig>,
    pub window: ConfigRegistry<WindowSettings>,
}

impl Demo {
    pub fn new(storage: Arc<dyn Storage>, shutdown: &dyn ShutdownRegistrar) -> Self {
        Self {
            example: ConfigRegistry::new(Arc::clone(&storage), shutdown),
            window: ConfigRegistry::new(storage, shutdown),
        }
    }

    /// Both sections, rendered by the registries.
    pub fn show(&self) -> Result<String, PersistError> {
        Ok(format!("{}\n{}", self.example.print()?, self.window.print()?))
    }

    /// Sets a field by `Field` or `Section.Field`.
    ///
    /// A bare name is looked up in `ExampleConfig` first, then
    /// `WindowSettings`.
    pub fn set_property(&self, name: &str, value: &str) -> Result<(), PersistError> {
        match name.split_once('.') {
            Some((section, field)) if section == self.example.section() => {
                self.example.set_property(field, value)
            }
            Some((section, field)) if section == self.window.section() => {
                self.window.set_property(field, value)
            }
            Some((section, field)) => Err(PersistError::FieldNotFound {
                section: section.to_string(),
                field: field.to_string(),
            }),
            None => match self.example.set_property(name, value) {
                Err(PersistError::FieldNotFound { .. }) => self.window.set_property(name, value),
                other => other,
            },
        }
    }

    /// Overwrites both sections with default values.
    pub fn reset(&self) -> Result<(), PersistError> {
        self.example.save(Some(ExampleConfig::default()))?;
        self.window.save(Some(WindowSettings::default()))
    }

    /// Interprets one shell line.
    ///
    /// Persistence errors are returned; malformed commands produce a usage
    /// message instead.
    pub fn execute(&self, line: &str) -> Result<ShellOutcome, PersistError> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(ShellOutcome::Continue(String::new()));
        };
        let rest: Vec<&str> = words.collect();

        let text = match (command, rest.as_slice()) {
            ("exit" | "quit", []) => return Ok(ShellOutcome::Exit),
            ("show", []) => self.show()?,
            ("set", [name, value]) => {
                self.set_property(name, value)?;
                format!("{name} = {value:?}")
            }
            ("note", words) if !words.is_empty() => {
                let note = words.join(" ");
                self.example.get()?.example_string = note.clone();
                format!("ExampleString = {note:?} (unsaved)")
            }
            ("width", [n]) => match n.parse::<i32>() {
                Ok(width) => {
                    self.window.get()?.set_width(width)?;
                    format!("Width = {width}")
                }
                Err(e) => format!("invalid width {n:?}: {e}"),
            },
            ("save", []) => {
                self.example.save(None)?;
                "saved ExampleConfig".to_string()
            }
            ("reload", []) => {
                drop(self.example.create()?);
                drop(self.window.create()?);
                "reloaded".to_string()
            }
            ("status", []) => format!(
                "ExampleConfig: dirty={} autosave={}\nWindowSettings: dirty={} autosave={}",
                self.example.is_dirty(),
                self.example.is_autosave_enabled(),
                self.window.is_dirty(),
                self.window.is_autosave_enabled(),
            ),
            _ => HELP.to_string(),
        };
        Ok(ShellOutcome::Continue(text))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
