//! Durable key-value storage for the persisted preference.
//!
//! The manager only ever touches one key, but the backends are plain
//! string maps so the same storage file can hold other settings.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{debug, warn};

use super::preference::ColorScheme;
use super::signal::Signal;

/// Errors from writing to a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access storage file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode storage file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A string-keyed, string-valued durable store.
pub trait Storage {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage backed by a JSON object file.
///
/// The file is re-read on every access so separate processes sharing it see
/// each other's writes. A missing or corrupt file reads as empty.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, String> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "storage file unreadable, treating as empty");
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&text).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "storage file corrupt, treating as empty");
            BTreeMap::new()
        })
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.load();
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let text = serde_json::to_string_pretty(&entries).map_err(|source| StorageError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, text).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), key, value, "storage written");
        Ok(())
    }
}

/// The persisted color-scheme preference bound to one storage key.
///
/// Binding materializes the key with [`ColorScheme::Auto`] when absent.
/// Writes go through to storage; a failed write is logged and the in-memory
/// value still changes.
#[derive(Clone)]
pub struct PersistedScheme {
    key: String,
    storage: Rc<dyn Storage>,
    value: Signal<ColorScheme>,
}

impl PersistedScheme {
    pub fn bind(storage: Rc<dyn Storage>, key: impl Into<String>) -> Self {
        let key = key.into();
        let initial = match storage.get(&key) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!(key = %key, error = %e, "ignoring stored color scheme");
                ColorScheme::Auto
            }),
            None => {
                if let Err(e) = storage.set(&key, ColorScheme::Auto.as_str()) {
                    warn!(key = %key, error = %e, "could not materialize color scheme slot");
                }
                ColorScheme::Auto
            }
        };
        debug!(key = %key, scheme = %initial, "color scheme slot bound");

        Self {
            key,
            storage,
            value: Signal::new(initial),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get(&self) -> ColorScheme {
        self.value.get()
    }

    pub fn set(&self, scheme: ColorScheme) {
        if let Err(e) = self.storage.set(&self.key, scheme.as_str()) {
            warn!(key = %self.key, error = %e, "failed to persist color scheme");
        }
        self.value.set(scheme);
    }

    pub fn signal(&self) -> &Signal<ColorScheme> {
        &self.value
    }
}

impl std::fmt::Debug for PersistedScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistedScheme")
            .field("key", &self.key)
            .field("value", &self.value.get())
            .finish()
    }
}
