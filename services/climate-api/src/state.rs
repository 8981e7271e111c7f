//! Application state for the climate API.

use anyhow::{Context, Result};
use storage::ClimateStore;

/// Shared application state.
pub struct AppState {
    /// Query facade over the observation dataset.
    pub store: ClimateStore,
}

impl AppState {
    /// Open the dataset and build the shared state.
    ///
    /// Fails fast when the dataset is unreachable or its tables do not
    /// match the expected schema.
    pub async fn new(database_url: &str) -> Result<Self> {
        let store = ClimateStore::connect(database_url)
            .await
            .with_context(|| format!("Failed to open dataset at {}", database_url))?;

        Ok(Self { store })
    }

    /// Build state around an already-opened store.
    pub fn from_store(store: ClimateStore) -> Self {
        Self { store }
    }
}
