//! Validated training configuration snapshot
//!
//! Built once by [`ConfigStore::load`](crate::config::ConfigStore::load) and
//! read-only afterwards. Derived fields are computed at construction and can
//! only change through a fresh load.

use serde::Serialize;

use crate::config::draft::ConfigDraft;
use crate::config::overrides::Overrides;
use crate::config::store::ConfigStore;
use crate::config::validation::ConfigValidator;
use crate::domain::cells::{derive, CellGrid};
use crate::domain::schedule::{derive_min_lr, PlateauSchedule};
use crate::domain::tags::{ModelType, Space, Strategy};
use crate::shared::error::ConfigError;

/// Immutable, internally consistent training configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingConfig {
    seed: u64,
    model_type: ModelType,
    epochs_max: u32,
    devices: Vec<u32>,
    angle_range: f64,
    cell_reso: u32,
    cell_len: f64,
    sigma: f64,
    alpha: f64,
    space: Space,
    strategy: Strategy,
    learning_rate: f64,
    min_lr: f64,
    scheduler_factor: f64,
    patience: u32,
    patience_stop: u32,
}

fn narrow(field: &str, value: i64) -> Result<u32, ConfigError> {
    u32::try_from(value)
        .map_err(|_| ConfigError::invalid(field, value, "must fit in 32 bits"))
}

impl TrainingConfig {
    /// Convert a draft that already passed validation
    pub(crate) fn from_draft(draft: ConfigDraft) -> Result<Self, ConfigError> {
        let cell_reso = narrow("cell_reso", draft.cell_reso)?;
        let devices = draft
            .devices
            .iter()
            .map(|d| narrow("devices", *d))
            .collect::<Result<Vec<_>, _>>()?;

        let config = Self {
            seed: draft.seed,
            model_type: draft.model_type.parse()?,
            epochs_max: narrow("epochs_max", draft.epochs_max)?,
            devices,
            angle_range: draft.angle_range,
            cell_reso,
            cell_len: derive(draft.angle_range, cell_reso)?,
            sigma: draft.sigma,
            alpha: draft.alpha,
            space: draft.space.parse()?,
            strategy: draft.strategy.parse()?,
            learning_rate: draft.learning_rate,
            min_lr: derive_min_lr(draft.learning_rate),
            scheduler_factor: draft.scheduler_factor,
            patience: narrow("patience", draft.patience)?,
            patience_stop: narrow("patience_stop", draft.patience_stop)?,
        };

        ConfigValidator::validate_derived(&config)?;
        Ok(config)
    }

    /// Draft holding this snapshot's source values
    pub fn to_draft(&self) -> ConfigDraft {
        ConfigDraft {
            seed: self.seed,
            model_type: self.model_type.to_string(),
            epochs_max: i64::from(self.epochs_max),
            devices: self.devices.iter().map(|d| i64::from(*d)).collect(),
            angle_range: self.angle_range,
            cell_reso: i64::from(self.cell_reso),
            sigma: self.sigma,
            alpha: self.alpha,
            space: self.space.to_string(),
            strategy: self.strategy.to_string(),
            learning_rate: self.learning_rate,
            scheduler_factor: self.scheduler_factor,
            patience: i64::from(self.patience),
            patience_stop: i64::from(self.patience_stop),
        }
    }

    /// New snapshot with `overrides` applied on top of this one
    pub fn with_overrides(&self, overrides: &Overrides) -> Result<Self, ConfigError> {
        ConfigStore::from_snapshot(self).load(Some(overrides))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn model_type(&self) -> ModelType {
        self.model_type
    }

    pub fn epochs_max(&self) -> u32 {
        self.epochs_max
    }

    pub fn devices(&self) -> &[u32] {
        &self.devices
    }

    pub fn angle_range(&self) -> f64 {
        self.angle_range
    }

    pub fn cell_reso(&self) -> u32 {
        self.cell_reso
    }

    /// Width of one angular cell, `angle_range / cell_reso`
    pub fn cell_len(&self) -> f64 {
        self.cell_len
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn space(&self) -> Space {
        self.space
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Learning-rate floor, `learning_rate / 10`
    pub fn min_lr(&self) -> f64 {
        self.min_lr
    }

    pub fn scheduler_factor(&self) -> f64 {
        self.scheduler_factor
    }

    pub fn patience(&self) -> u32 {
        self.patience
    }

    pub fn patience_stop(&self) -> u32 {
        self.patience_stop
    }

    /// Number of replicas the strategy initializer should spawn
    pub fn world_size(&self) -> usize {
        self.devices.len()
    }

    pub fn is_distributed(&self) -> bool {
        self.strategy != Strategy::Single && self.devices.len() > 1
    }

    pub fn cell_grid(&self) -> CellGrid {
        CellGrid::from_parts(self.angle_range, self.cell_reso, self.cell_len, self.space)
    }

    pub fn plateau_schedule(&self) -> PlateauSchedule {
        PlateauSchedule {
            learning_rate: self.learning_rate,
            min_lr: self.min_lr,
            factor: self.scheduler_factor,
            patience: self.patience,
            patience_stop: self.patience_stop,
        }
    }
}
