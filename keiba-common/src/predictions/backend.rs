//! Key/value persistence backends for the prediction store

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::debug;

use crate::{Error, Result};

/// Durable key/value medium holding one document per key
///
/// Operations are synchronous; callers serialize writers.
pub trait StorageBackend: Send + Sync {
    /// Read the document stored under `key`, `None` if absent
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replace the document stored under `key`
    fn save(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the document stored under `key`; absent keys are not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// Process-local backend, used for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| Error::Internal("memory backend lock poisoned".to_string()))
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Directory-backed store: each key is a `<key>.json` file
///
/// Writes land in a sibling temp file first and are renamed into place so
/// a crash mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `dir`, creating the directory if missing
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// File holding the document for `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(|c| c == '/' || c == '\\') || key.starts_with('.') {
            return Err(Error::InvalidInput(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl StorageBackend for FileBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, value)?;
        std::fs::rename(&tmp_path, &path)?;
        debug!(path = %path.display(), bytes = value.len(), "Saved document");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_backend_roundtrip() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.load("k").unwrap(), None);

        backend.save("k", "{}").unwrap();
        assert_eq!(backend.load("k").unwrap().as_deref(), Some("{}"));

        backend.remove("k").unwrap();
        assert_eq!(backend.load("k").unwrap(), None);
        backend.remove("k").unwrap();
    }

    #[test]
    fn test_file_backend_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path().join("store")).unwrap();

        assert_eq!(backend.load("keiba_predictions").unwrap(), None);

        backend.save("keiba_predictions", r#"{"r1":{"3":"◎"}}"#).unwrap();
        let path = backend.path_for("keiba_predictions").unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(
            backend.load("keiba_predictions").unwrap().as_deref(),
            Some(r#"{"r1":{"3":"◎"}}"#)
        );

        backend.remove("keiba_predictions").unwrap();
        assert!(!path.exists());
        // Removing twice is fine
        backend.remove("keiba_predictions").unwrap();
    }

    #[test]
    fn test_file_backend_rejects_path_keys() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path()).unwrap();

        assert!(backend.path_for("../escape").is_err());
        assert!(backend.path_for("").is_err());
        assert!(backend.save("a/b", "{}").is_err());
    }
}
