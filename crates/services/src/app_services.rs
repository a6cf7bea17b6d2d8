use std::sync::Arc;

use learn_core::Catalog;
use storage::{PersistentStore, Storage};

use crate::app_state::AppState;
use crate::error::AppServicesError;
use crate::ledger::ProgressLedger;
use crate::simulator::SimulatorConfig;

/// Assembles the ledger and catalog shared by every app-facing component.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<Catalog>,
    ledger: Arc<ProgressLedger>,
    simulator: SimulatorConfig,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        catalog: Catalog,
        simulator: SimulatorConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, catalog, simulator).await)
    }

    pub async fn in_memory(catalog: Catalog, simulator: SimulatorConfig) -> Self {
        Self::from_storage(&Storage::in_memory(), catalog, simulator).await
    }

    /// Load saved progress from `storage` and wire the ledger to it.
    pub async fn from_storage(
        storage: &Storage,
        catalog: Catalog,
        simulator: SimulatorConfig,
    ) -> Self {
        let store = PersistentStore::new(Arc::clone(&storage.records));
        let ledger = Arc::new(ProgressLedger::load(store).await);
        Self {
            catalog: Arc::new(catalog),
            ledger,
            simulator,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn ledger(&self) -> Arc<ProgressLedger> {
        Arc::clone(&self.ledger)
    }

    /// A fresh, signed-out application state over the shared ledger.
    #[must_use]
    pub fn app_state(&self) -> AppState {
        AppState::new(self.catalog(), self.ledger(), self.simulator)
    }
}
