//! Key-value store persisting JSON values to disk
//!
//! Provides a `LocalStore` that keeps one JSON file per key, the terminal
//! counterpart of browser-local storage.

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when reading or writing a stored value
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem access failed
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stored value exists but is not valid JSON for the expected type
    #[error("Stored value for '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The value could not be encoded
    #[error("Failed to encode value for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads and writes string-keyed JSON slots on disk
///
/// Values are stored as `<key>.json` in an XDG-compliant data directory
/// (`~/.local/share/shopfront/` on Linux). An absent file means an absent key.
#[derive(Debug, Clone)]
pub struct LocalStore {
    /// Directory where slot files are stored
    dir: PathBuf,
}

impl LocalStore {
    /// Creates a new LocalStore using the XDG-compliant data directory
    ///
    /// Returns `None` if the data directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "shopfront")?;
        let dir = project_dirs.data_dir().to_path_buf();
        Some(Self { dir })
    }

    /// Creates a new LocalStore rooted at a custom directory
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Directory holding the slot files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path to the file backing `key`
    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Ensures the store directory exists
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    /// Whether a value is stored under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.slot_path(key).is_file()
    }

    /// Writes `value` under `key`, replacing any previous value
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        self.ensure_dir()?;

        let json = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;

        // Written aside, then renamed over the slot
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.flush()?;
        tmp.persist(self.slot_path(key)).map_err(|e| e.error)?;
        debug!(key, "stored value written");
        Ok(())
    }

    /// Reads the value stored under `key`
    ///
    /// # Returns
    /// * `Ok(Some(T))` if the key exists and parses
    /// * `Ok(None)` if the key is absent
    /// * `Err(StoreError::Corrupt)` if the stored text is not valid for `T`
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let content = match fs::read_to_string(self.slot_path(key)) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let value = serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            key: key.to_string(),
            source,
        })?;
        debug!(key, "stored value read");
        Ok(Some(value))
    }

    /// Deletes the value stored under `key`; removing an absent key is not an error
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.slot_path(key)) {
            Ok(()) => {
                debug!(key, "stored value removed");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    fn create_test_store() -> (LocalStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = LocalStore::with_dir(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    #[test]
    fn test_write_creates_file_in_store_directory() {
        let (store, temp_dir) = create_test_store();
        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };

        store.write("test_key", &data).expect("Write should succeed");

        let expected_path = temp_dir.path().join("test_key.json");
        assert!(expected_path.exists(), "Slot file should exist");

        let content = fs::read_to_string(&expected_path).expect("Should read file");
        assert!(content.contains("\"name\""));
        assert!(content.contains("\"test\""));
        assert!(content.contains("42"));
    }

    #[test]
    fn test_read_returns_none_for_missing_key() {
        let (store, _temp_dir) = create_test_store();

        let result: Option<TestData> = store.read("nonexistent_key").expect("Read should succeed");

        assert!(result.is_none(), "Should return None for missing key");
    }

    #[test]
    fn test_read_returns_written_value() {
        let (store, _temp_dir) = create_test_store();
        let data = TestData {
            name: "stored".to_string(),
            value: 100,
        };

        store.write("stored_key", &data).expect("Write should succeed");
        let result: Option<TestData> = store.read("stored_key").expect("Read should succeed");

        assert_eq!(result, Some(data));
    }

    #[test]
    fn test_read_reports_corrupt_value() {
        let (store, temp_dir) = create_test_store();
        fs::write(temp_dir.path().join("broken.json"), "[{\"name\":").expect("Should write file");

        let result: Result<Option<TestData>, StoreError> = store.read("broken");

        match result {
            Err(StoreError::Corrupt { key, .. }) => assert_eq!(key, "broken"),
            other => panic!("Expected corrupt error, got {:?}", other),
        }
    }

    #[test]
    fn test_write_creates_directory_if_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested_path = temp_dir.path().join("nested").join("data").join("dir");
        let store = LocalStore::with_dir(nested_path.clone());

        store
            .write("nested_key", &TestData { name: "nested".to_string(), value: 1 })
            .expect("Write should succeed");

        assert!(nested_path.join("nested_key.json").exists(), "Slot file should exist");
    }

    #[test]
    fn test_overwrite_existing_value() {
        let (store, _temp_dir) = create_test_store();
        let first = TestData { name: "first".to_string(), value: 1 };
        let second = TestData { name: "second".to_string(), value: 2 };

        store.write("overwrite_key", &first).expect("First write should succeed");
        store.write("overwrite_key", &second).expect("Second write should succeed");

        let result: Option<TestData> = store.read("overwrite_key").expect("Read should succeed");
        assert_eq!(result, Some(second), "Store should contain latest value");
    }

    #[test]
    fn test_write_leaves_only_the_slot_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = LocalStore::with_dir(temp_dir.path().to_path_buf());
        let data = TestData {
            name: "first".to_string(),
            value: 1,
        };

        store.write("cart", &data).expect("Should write");
        store.write("cart", &data).expect("Should overwrite");

        let names: Vec<String> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["cart.json"], "No temporary files should remain");
    }

    #[test]
    fn test_write_replaces_corrupt_slot_whole() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = LocalStore::with_dir(temp_dir.path().to_path_buf());
        fs::write(temp_dir.path().join("cart.json"), "[{\"name\": \"half-writ").unwrap();
        let data = TestData {
            name: "fresh".to_string(),
            value: 2,
        };

        store.write("cart", &data).expect("Should write");

        let read: Option<TestData> = store.read("cart").expect("Slot should parse");
        assert_eq!(read, Some(data));
    }

    #[test]
    fn test_remove_deletes_key() {
        let (store, _temp_dir) = create_test_store();
        store
            .write("gone", &TestData { name: "x".to_string(), value: 0 })
            .expect("Write should succeed");
        assert!(store.contains("gone"));

        store.remove("gone").expect("Remove should succeed");

        assert!(!store.contains("gone"));
        let result: Option<TestData> = store.read("gone").expect("Read should succeed");
        assert!(result.is_none());
    }

    #[test]
    fn test_remove_missing_key_is_not_an_error() {
        let (store, _temp_dir) = create_test_store();
        assert!(store.remove("never_written").is_ok());
    }

    #[test]
    fn test_new_creates_xdg_compliant_path() {
        if let Some(store) = LocalStore::new() {
            let path_str = store.dir().to_string_lossy();
            assert!(path_str.contains("shopfront"), "Store path should contain project name");
        }
        // Test passes if new() returns None (e.g., no home directory in CI)
    }
}
