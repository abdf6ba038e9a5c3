//! Client-side key/value storage.
//!
//! [`ClientStorage`] plays the part browser local storage plays for a web
//! client: a flat namespace of string keys that survives restarts. The
//! credential store and the response cache both live in it, so clearing
//! the storage removes every trace of the previous identity.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::error::SessionResult;

/// File name used by [`FileStorage`] inside its directory.
pub const STORAGE_FILE: &str = "storage.json";

/// Persistent string key/value storage.
///
/// Implementations must apply [`set_many`](Self::set_many) as one unit:
/// a reader sees either none or all of the entries.
pub trait ClientStorage: Send + Sync {
    /// Gets a value.
    ///
    /// Returns `None` when the key is absent or the backing data cannot be
    /// read.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes several entries at once.
    fn set_many(&self, entries: &[(&str, &str)]) -> SessionResult<()>;

    /// Writes one entry.
    fn set(&self, key: &str, value: &str) -> SessionResult<()> {
        self.set_many(&[(key, value)])
    }

    /// Removes several keys at once. Missing keys are ignored.
    fn remove_many(&self, keys: &[&str]) -> SessionResult<()>;

    /// Lists all keys.
    fn keys(&self) -> Vec<String>;

    /// Removes every key.
    fn clear(&self) -> SessionResult<()>;
}

/// In-memory storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClientStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> SessionResult<()> {
        let mut map = self.entries.lock();
        for (key, value) in entries {
            map.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> SessionResult<()> {
        let mut map = self.entries.lock();
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.lock().keys().cloned().collect()
    }

    fn clear(&self) -> SessionResult<()> {
        self.entries.lock().clear();
        Ok(())
    }
}

/// Storage backed by a single JSON object file.
///
/// Writes go to a temporary file which is then renamed over the real one,
/// so a crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Creates a storage rooted at `dir`. The directory is created lazily
    /// on the first write.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(STORAGE_FILE),
            lock: Mutex::new(()),
        }
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    fn read_map(&self) -> BTreeMap<String, String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Failed to read client storage: {}", e);
                return BTreeMap::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Client storage is not valid JSON: {}", e);
                BTreeMap::new()
            }
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(map)
            .map_err(|e| crate::SessionError::Storage(e.to_string()))?;
        let temp = self.temp_path();
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

impl ClientStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock();
        self.read_map().remove(key)
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> SessionResult<()> {
        let _guard = self.lock.lock();
        let mut map = self.read_map();
        for (key, value) in entries {
            map.insert((*key).to_string(), (*value).to_string());
        }
        self.write_map(&map)
    }

    fn remove_many(&self, keys: &[&str]) -> SessionResult<()> {
        let _guard = self.lock.lock();
        let mut map = self.read_map();
        let before = map.len();
        for key in keys {
            map.remove(*key);
        }
        if map.len() == before {
            return Ok(());
        }
        self.write_map(&map)
    }

    fn keys(&self) -> Vec<String> {
        let _guard = self.lock.lock();
        self.read_map().into_keys().collect()
    }

    fn clear(&self) -> SessionResult<()> {
        let _guard = self.lock.lock();
        for path in [self.path.clone(), self.temp_path()] {
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}
