use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Durable string records addressed by a fixed namespace key.
///
/// Adapters store opaque payloads; encoding is the caller's concern.
#[async_trait]
pub trait KeyValueRepository: Send + Sync {
    /// Fetch the payload stored under `namespace`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_record(&self, namespace: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the payload stored under `namespace`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the payload cannot be stored.
    async fn put_record(&self, namespace: &str, payload: &str) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    records: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl KeyValueRepository for InMemoryRepository {
    async fn get_record(&self, namespace: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(namespace).cloned())
    }

    async fn put_record(&self, namespace: &str, payload: &str) -> Result<(), StorageError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(namespace.to_owned(), payload.to_owned());
        Ok(())
    }
}

/// Wraps the record repository behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub records: Arc<dyn KeyValueRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let records: Arc<dyn KeyValueRepository> = Arc::new(InMemoryRepository::new());
        Self { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_record_is_none() {
        let repo = InMemoryRepository::new();
        assert!(repo.get_record("elearn_progress_v1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_overwrites_previous_payload() {
        let repo = InMemoryRepository::new();
        repo.put_record("ns", "{\"c1\":1.0}").await.unwrap();
        repo.put_record("ns", "{\"c1\":2.0}").await.unwrap();

        let stored = repo.get_record("ns").await.unwrap();
        assert_eq!(stored.as_deref(), Some("{\"c1\":2.0}"));
        assert!(repo.get_record("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clones_share_records() {
        let repo = InMemoryRepository::new();
        let clone = repo.clone();
        repo.put_record("ns", "x").await.unwrap();
        assert_eq!(clone.get_record("ns").await.unwrap().as_deref(), Some("x"));
    }
}
