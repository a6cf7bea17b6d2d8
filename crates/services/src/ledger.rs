use tokio::sync::Mutex;

use learn_core::model::{CourseId, Progress, ProgressMap};
use storage::PersistentStore;

/// In-memory progress map with write-through persistence.
///
/// `update` is the only way to mutate progress. The lock is held across the
/// save so concurrent writers are applied and persisted one at a time.
pub struct ProgressLedger {
    entries: Mutex<ProgressMap>,
    store: PersistentStore,
}

impl ProgressLedger {
    #[must_use]
    pub fn new(store: PersistentStore, initial: ProgressMap) -> Self {
        Self {
            entries: Mutex::new(initial),
            store,
        }
    }

    /// Build a ledger seeded from whatever the store has saved.
    pub async fn load(store: PersistentStore) -> Self {
        let initial = store.load().await;
        tracing::info!(courses = initial.len(), "progress loaded");
        Self::new(store, initial)
    }

    /// Stored progress for `id`, zero when unknown.
    pub async fn get(&self, id: &CourseId) -> Progress {
        self.entries.lock().await.get(id)
    }

    /// Clamp `proposed` into `[0, 100]`, store it, persist the full map, and
    /// return the stored value.
    pub async fn update(&self, id: &CourseId, proposed: f64) -> Progress {
        let mut entries = self.entries.lock().await;
        let stored = Progress::clamped(proposed);
        entries.insert(id.clone(), stored);
        self.store.save(&entries).await;
        stored
    }

    pub async fn snapshot(&self) -> ProgressMap {
        self.entries.lock().await.clone()
    }
}
