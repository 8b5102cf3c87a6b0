//! JSON file backing for the durable key/value scope.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use strictly_memory::{KeyValueStore, StoreError};
use tracing::{debug, instrument, warn};

/// Key/value store persisted as one JSON object per file.
///
/// Every write rewrites the whole file; the store holds a handful of keys.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`.
    ///
    /// A missing file is an empty store. An unreadable or malformed file is
    /// logged and treated as empty; the next write replaces it.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(error = %e, "Store file is not a JSON object of strings, starting empty");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Store file not found, starting empty");
                BTreeMap::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read store file, starting empty");
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::new(format!("Failed to create store directory: {}", e)))?;
        }
        let json = serde_json::to_string_pretty(&self.values)
            .map_err(|e| StoreError::new(format!("Failed to encode store: {}", e)))?;
        std::fs::write(&self.path, json)
            .map_err(|e| StoreError::new(format!("Failed to write store file: {}", e)))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        self.flush()?;
        debug!("Store written");
        Ok(())
    }
}
