//! Write-through persistence for the progress map.
//!
//! Loading never fails: a missing, unreadable or malformed record is
//! treated as "no saved progress" and yields an empty map.

use std::sync::Arc;

use learn_core::model::ProgressMap;

use crate::repository::{KeyValueRepository, StorageError};

/// Fixed namespace the progress record lives under.
pub const PROGRESS_NAMESPACE: &str = "elearn_progress_v1";

#[derive(Clone)]
pub struct PersistentStore {
    repo: Arc<dyn KeyValueRepository>,
    namespace: String,
}

impl PersistentStore {
    #[must_use]
    pub fn new(repo: Arc<dyn KeyValueRepository>) -> Self {
        Self {
            repo,
            namespace: PROGRESS_NAMESPACE.to_owned(),
        }
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Read the saved map, substituting an empty one on any failure.
    pub async fn load(&self) -> ProgressMap {
        let payload = match self.repo.get_record(&self.namespace).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return ProgressMap::new(),
            Err(err) => {
                tracing::warn!(namespace = %self.namespace, error = %err, "progress record unreadable, starting empty");
                return ProgressMap::new();
            }
        };

        match decode(&payload) {
            Ok(map) => map,
            Err(err) => {
                tracing::warn!(namespace = %self.namespace, error = %err, "progress record malformed, starting empty");
                ProgressMap::new()
            }
        }
    }

    /// Serialize the whole map and overwrite the saved record.
    ///
    /// Failures are logged; callers are never interrupted by them.
    pub async fn save(&self, progress: &ProgressMap) {
        let payload = match encode(progress) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(namespace = %self.namespace, error = %err, "failed to encode progress");
                return;
            }
        };

        if let Err(err) = self.repo.put_record(&self.namespace, &payload).await {
            tracing::warn!(namespace = %self.namespace, error = %err, "failed to save progress");
        }
    }
}

/// JSON object keyed by course id, e.g. `{"c1":42.3,"c3":100.0}`.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode(progress: &ProgressMap) -> Result<String, StorageError> {
    serde_json::to_string(progress).map_err(|err| StorageError::Serialization(err.to_string()))
}

/// # Errors
///
/// Returns `StorageError::Serialization` if `payload` is not a progress object.
pub fn decode(payload: &str) -> Result<ProgressMap, StorageError> {
    serde_json::from_str(payload).map_err(|err| StorageError::Serialization(err.to_string()))
}
