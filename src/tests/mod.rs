//! Test suite for the configuration store
//!
//! - Scenario tests for the documented default and failure cases
//! - Property tests over grids of valid and invalid inputs


/// Test configuration and utilities
pub mod config {
    use crate::config::{ConfigStore, Overrides, TrainingConfig};
    use crate::shared::error::ConfigError;
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Initialize test environment
    pub fn init() {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter("debug")
                .with_test_writer()
                .try_init();
        });
    }

    /// Load with overrides over the declared defaults
    pub fn load_with(overrides: Overrides) -> Result<TrainingConfig, ConfigError> {
        init();
        ConfigStore::new().load(Some(&overrides))
    }

    /// Assert `result` failed validation on `field`
    pub fn assert_rejects(result: Result<TrainingConfig, ConfigError>, field: &str) {
        match result {
            Err(err @ ConfigError::Invalid { .. }) => assert_eq!(err.field(), Some(field), "{}", err),
            Err(other) => panic!("expected validation error on {}, got {}", field, other),
            Ok(config) => panic!("expected validation error on {}, got {:?}", field, config),
        }
    }
}
