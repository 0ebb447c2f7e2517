//! Key/value backends holding the serialized document.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Synchronous string storage addressed by key.
///
/// No transactions: `set` replaces the whole value and the last writer wins. A stored
/// value that is not valid text is reported as [`io::ErrorKind::InvalidData`].
pub trait Backend {
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// Process-local backend
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.entries().remove(key);
        Ok(())
    }
}

/// One JSON file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Backend for FileBackend {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let target = self.path_for(key);
        // Readers only ever observe a complete document
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &target)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_get_set_remove() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("k").unwrap(), None);

        backend.set("k", "v1").unwrap();
        backend.set("k", "v2").unwrap();
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("v2"));

        backend.remove("k").unwrap();
        assert_eq!(backend.get("k").unwrap(), None);
    }

    #[test]
    fn test_file_backend_creates_directory_and_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(tmp.path().join("nested").join("data"));

        assert_eq!(backend.get("doc").unwrap(), None);
        backend.set("doc", "{\"a\":1}").unwrap();
        backend.set("doc", "{\"a\":2}").unwrap();

        assert_eq!(backend.get("doc").unwrap().as_deref(), Some("{\"a\":2}"));
        assert!(backend.path_for("doc").exists());
        assert!(!backend.dir().join(".doc.json.tmp").exists());
    }

    #[test]
    fn test_file_backend_reports_undecodable_bytes_as_invalid_data() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(tmp.path());
        fs::write(backend.path_for("doc"), [0xFF, 0xFE, 0x7B]).unwrap();

        let err = backend.get("doc").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_file_backend_remove_missing_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(tmp.path());
        backend.remove("absent").unwrap();
    }
}
