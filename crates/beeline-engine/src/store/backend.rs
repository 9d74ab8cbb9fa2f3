use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Uniform async key-value boundary over whatever the platform provides
/// (browser storage, a native key-value store, a file).
///
/// The engine is single-threaded and never moves these futures across
/// threads, so no `Send` bound is required.
#[allow(async_fn_in_trait)]
pub trait Storage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
}

/// Forwarding impl so a backend can be lent to an engine and reused after.
impl<S: Storage> Storage for &mut S {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key).await
    }

    async fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set(key, value).await
    }
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trips() {
        let mut store = MemoryStorage::new();
        pollster::block_on(async {
            assert_eq!(store.get("17-puzzle").await.unwrap(), None);
            store.set("17-puzzle", "{}".into()).await.unwrap();
            assert_eq!(store.get("17-puzzle").await.unwrap().as_deref(), Some("{}"));
        });
    }

    #[test]
    fn last_write_wins() {
        let mut store = MemoryStorage::new();
        pollster::block_on(async {
            store.set("k", "a".into()).await.unwrap();
            store.set("k", "b".into()).await.unwrap();
            assert_eq!(store.get("k").await.unwrap().as_deref(), Some("b"));
        });
    }
}
