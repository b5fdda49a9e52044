//! Durable key-value storage for client state.
//!
//! Mirrors a browser's local storage: a flat map of string slots that
//! survives restarts. [`FileStorage`] keeps every slot in one JSON object file
//! and rewrites it atomically (synced temp file + rename) on each `set`.

use std::collections::BTreeMap;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Storage keys.
pub mod keys {
    /// Key for the serialized cart line items.
    pub const CART: &str = "fiberFitCart";
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A string key-value store.
pub trait KeyValueStorage {
    /// Read a slot. Missing slots return `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written durably.
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
}

// =============================================================================
// MemoryStorage
// =============================================================================

/// Ephemeral storage that lives as long as the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: BTreeMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value);
        Ok(())
    }
}

// =============================================================================
// FileStorage
// =============================================================================

/// Storage persisted to a single JSON object file.
///
/// The file is read once on open. A missing file is an empty store; an
/// unreadable or corrupt file is logged and also treated as empty, so a bad
/// file never prevents startup. The next `set` replaces it.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    slots: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open (or lazily create) the storage file at `path`.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let slots = read_slots(&path);
        Self { path, slots }
    }

    fn flush(&self) -> Result<(), StorageError> {
        let body = serde_json::to_string_pretty(&self.slots)?;
        write_atomic(&self.path, body.as_bytes())
    }
}

/// Write `bytes` to a process-unique temp file next to `path`, sync it, then
/// rename it over `path`.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(io_error(parent))?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("storage");
    let tmp = parent.join(format!(".{file_name}.tmp.{}", std::process::id()));
    {
        let mut file = std::fs::File::create(&tmp).map_err(io_error(&tmp))?;
        file.write_all(bytes).map_err(io_error(&tmp))?;
        file.sync_all().map_err(io_error(&tmp))?;
    }
    std::fs::rename(&tmp, path).map_err(io_error(path))?;

    if let Ok(dir) = std::fs::File::open(parent) {
        let _ = dir.sync_all();
    }
    Ok(())
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StorageError + use<> {
    let path = path.to_path_buf();
    move |source| StorageError::Io { path, source }
}

fn read_slots(path: &Path) -> BTreeMap<String, String> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return BTreeMap::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read storage file, starting empty");
            return BTreeMap::new();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "Corrupt storage file, starting empty");
        BTreeMap::new()
    })
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value);
        self.flush()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);

        storage.set("k", "v".to_string()).unwrap();
        storage.set("k", "w".to_string()).unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("w"));
    }

    #[test]
    fn test_file_storage_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/storage.json");

        let mut storage = FileStorage::open(&path);
        storage.set(keys::CART, "[]".to_string()).unwrap();
        storage.set("other", "x".to_string()).unwrap();

        let reopened = FileStorage::open(&path);
        assert_eq!(reopened.get(keys::CART).unwrap().as_deref(), Some("[]"));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("x"));

        let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("storage.json")]);
    }

    #[test]
    fn test_write_atomic_uses_process_unique_temp_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let tmp = dir
            .path()
            .join(format!(".storage.json.tmp.{}", std::process::id()));

        // A stale temp file from this process is truncated and replaced
        std::fs::write(&tmp, "stale contents that are longer than the body").unwrap();
        write_atomic(&path, b"{}").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
        assert!(!tmp.exists());
    }

    #[test]
    fn test_unwritable_location_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();

        let mut storage = FileStorage::open(blocker.join("storage.json"));
        let err = storage.set(keys::CART, "[]".to_string()).unwrap_err();

        assert!(matches!(err, StorageError::Io { .. }));
        assert_eq!(storage.get(keys::CART).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_storage_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json at all").unwrap();

        let mut storage = FileStorage::open(&path);
        assert_eq!(storage.get(keys::CART).unwrap(), None);

        storage.set(keys::CART, "[]".to_string()).unwrap();
        let reopened = FileStorage::open(&path);
        assert_eq!(reopened.get(keys::CART).unwrap().as_deref(), Some("[]"));
    }
}
