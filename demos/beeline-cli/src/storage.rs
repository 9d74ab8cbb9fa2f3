use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use beeline_engine::{Storage, StorageError};

/// Save file backend: one flat JSON object of string keys to string values,
/// written through on every set.
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    pub fn open(path: &Path) -> io::Result<Self> {
        let entries = match fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(entries) => entries,
                Err(err) => {
                    log::warn!("ignoring unreadable save file {}: {err}", path.display());
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err),
        };
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    fn flush(&self) -> Result<(), StorageError> {
        let text = serde_json::to_string_pretty(&self.entries)
            .map_err(|err| StorageError::Backend(err.to_string()))?;
        fs::write(&self.path, text).map_err(|err| StorageError::Backend(err.to_string()))
    }
}

impl Storage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }
}
