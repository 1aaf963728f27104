//! TOML file persistence for propsync documents.
//!
//! Each record type owns one table of the file; every value is stored as a
//! TOML string so the text the codec produced is exactly what lands on disk:
//!
//! ```toml
//! [ExampleConfig]
//! ExampleInt = "3"
//! ExampleString = "hello"
//!
//! [WindowSettings]
//! Width = "1280"
//! Theme = "Dark"
//! ```
//!
//! The default location is the platform config directory:
//! - Windows:  `%APPDATA%\<app>\config.toml`
//! - Linux:    `$XDG_CONFIG_HOME/<app>/config.toml` or `~/.config/<app>/config.toml`
//! - macOS:    `~/Library/Application Support/<app>/config.toml`
//!
//! # Atomic writes (for beginners)
//!
//! Writing the file in place would leave a half-written file behind if the
//! process died mid-write.  `commit` writes a sibling temporary file, flushes
//! it to disk with `sync_all`, then renames it over the target.  A rename
//! within one directory is atomic, so readers see either the old document or
//! the new one, never a mix.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use propsync_core::{Document, Storage, StorageError};
use tracing::{debug, warn};

/// File name used inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// A [`Storage`] backed by one TOML file.
#[derive(Debug, Clone)]
pub struct TomlFileStorage {
    path: PathBuf,
}

impl TomlFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at `<platform config dir>/<app_name>/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the platform config base
    /// directory cannot be determined from the environment.
    pub fn for_app(app_name: &str) -> Result<Self, StorageError> {
        let dir = platform_config_dir(app_name).ok_or_else(|| {
            StorageError::Unavailable("could not determine platform config directory".to_string())
        })?;
        Ok(Self::new(dir.join(CONFIG_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> StorageError {
        warn!(config = %self.path.display(), path = %path.display(), error = %source, "config file access failed");
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl Storage for TomlFileStorage {
    fn open_document(&self) -> Result<Document, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => toml::from_str(&content).map_err(|e| StorageError::Corrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "config file absent; starting empty");
                Ok(Document::new())
            }
            Err(e) => Err(self.io_error(&self.path, e)),
        }
    }

    fn commit(&self, document: &Document) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.io_error(dir, e))?;
        }

        let content =
            toml::to_string_pretty(document).map_err(|e| StorageError::Serialize(e.to_string()))?;

        let tmp = self.path.with_extension("toml.tmp");
        {
            let mut file = fs::File::create(&tmp).map_err(|e| self.io_error(&tmp, e))?;
            file.write_all(content.as_bytes())
                .map_err(|e| self.io_error(&tmp, e))?;
            file.sync_all().map_err(|e| self.io_error(&tmp, e))?;
        }
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(&self.path, e))?;

        debug!(path = %self.path.display(), bytes = content.len(), "committed config file");
        Ok(())
    }
}

/// Resolves `<platform config base>/<app_name>`.
fn platform_config_dir(app_name: &str) -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join(app_name))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join(app_name))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join(app_name)
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        let _ = app_name;
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
