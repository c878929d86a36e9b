//! Configuration store
//!
//! Layers overrides over the declared defaults with the `config` crate,
//! then validates and derives. Loading does no I/O; see
//! [`OverrideSources`](crate::config::OverrideSources) for files and env.

use tracing::debug;

use crate::config::draft::ConfigDraft;
use crate::config::overrides::Overrides;
use crate::config::training_config::TrainingConfig;
use crate::shared::error::ConfigError;

/// Produces validated [`TrainingConfig`] snapshots
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    defaults: ConfigDraft,
}

impl ConfigStore {
    /// Store seeded with the declared defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose defaults are the source values of `snapshot`
    pub fn from_snapshot(snapshot: &TrainingConfig) -> Self {
        Self {
            defaults: snapshot.to_draft(),
        }
    }

    pub fn defaults(&self) -> &ConfigDraft {
        &self.defaults
    }

    /// Apply `overrides`, derive, validate.
    pub fn load(&self, overrides: Option<&Overrides>) -> Result<TrainingConfig, ConfigError> {
        let draft = self.draft(overrides)?;
        let config = draft.into_snapshot()?;

        debug!(
            overrides = overrides.map_or(0, Overrides::len),
            cell_len = config.cell_len(),
            min_lr = config.min_lr(),
            "Configuration snapshot built"
        );

        Ok(config)
    }

    fn draft(&self, overrides: Option<&Overrides>) -> Result<ConfigDraft, ConfigError> {
        let mut builder =
            ::config::Config::builder().add_source(::config::Config::try_from(&self.defaults)?);

        if let Some(overrides) = overrides {
            overrides.check()?;
            for (key, value) in overrides.iter() {
                builder = builder.set_override(key, value.clone())?;
            }
        }

        let draft = builder.build()?.try_deserialize::<ConfigDraft>()?;
        Ok(draft)
    }
}

/// Load with the declared defaults
pub fn load(overrides: Option<&Overrides>) -> Result<TrainingConfig, ConfigError> {
    ConfigStore::new().load(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_without_overrides_uses_defaults() {
        let config = load(None).unwrap();
        assert_eq!(config.to_draft(), ConfigDraft::default());
    }

    #[test]
    fn test_override_replaces_list() {
        let overrides = Overrides::new().set("devices", vec![0, 1, 2, 3, 4, 5, 6, 7]);
        let config = load(Some(&overrides)).unwrap();
        assert_eq!(config.devices(), &[0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_string_overrides_are_coerced() {
        let overrides = Overrides::new()
            .set("epochs_max", "12")
            .set("learning_rate", "0.01")
            .set("angle_range", 180);
        let config = load(Some(&overrides)).unwrap();
        assert_eq!(config.epochs_max(), 12);
        assert_eq!(config.learning_rate(), 0.01);
        assert_eq!(config.cell_len(), 2.5);
    }

    #[test]
    fn test_non_numeric_string_names_its_field() {
        let overrides = Overrides::new().set("epochs_max", "thirty");
        let err = load(Some(&overrides)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert_eq!(err.field(), Some("epochs_max"));
    }

    #[test]
    fn test_type_mismatch_names_its_field() {
        let err = load(Some(&Overrides::new().set("seed", -1))).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }), "{}", err);
        assert_eq!(err.field(), Some("seed"));
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn test_unknown_key_fails_before_layering() {
        let overrides = Overrides::new().set("batch_size", 32);
        let err = load(Some(&overrides)).unwrap_err();
        assert_eq!(err.field(), Some("batch_size"));
    }

    #[test]
    fn test_store_from_snapshot_recomputes_derived() {
        let base = load(Some(&Overrides::new().set("cell_reso", 36))).unwrap();
        assert_eq!(base.cell_len(), 10.0);

        let store = ConfigStore::from_snapshot(&base);
        let next = store
            .load(Some(&Overrides::new().set("angle_range", 180.0)))
            .unwrap();
        assert_eq!(next.cell_reso(), 36);
        assert_eq!(next.cell_len(), 5.0);
    }
}
