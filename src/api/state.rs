//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::store::{InMemoryStore, PayrollStore};

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded configuration and the data store.
#[derive(Clone)]
pub struct AppState {
    /// The loaded payroll configuration.
    config: Arc<ConfigLoader>,
    /// Employees, attendance and payroll rows.
    store: Arc<dyn PayrollStore>,
}

impl AppState {
    /// Creates a new application state from a configuration and a store.
    pub fn new(config: ConfigLoader, store: Arc<dyn PayrollStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Creates a state whose in-memory store is seeded from the
    /// configuration's directory and attendance data.
    pub fn with_seeded_store(config: ConfigLoader) -> Self {
        let store = Arc::new(InMemoryStore::from_config(config.config()));
        Self::new(config, store)
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the data store.
    pub fn store(&self) -> &dyn PayrollStore {
        self.store.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_seeded_store_sees_configured_employees() {
        let config = ConfigLoader::load("./config/default").unwrap();
        let state = AppState::with_seeded_store(config);
        assert!(state.store().employee("EMP001").unwrap().is_some());
        assert!(state.store().employee("EMP404").unwrap().is_none());
    }
}
