//! Unvalidated configuration draft
//!
//! Raw values as they come out of the layered sources. Integers are wide
//! and tags are plain strings, so out-of-range input reaches validation
//! and is reported against its field instead of failing to parse.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::config::defaults::*;
use crate::config::training_config::TrainingConfig;
use crate::config::validation::ConfigValidator;
use crate::shared::error::ConfigError;

pub(crate) static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("identifier pattern is valid")
});

/// Settings before validation and derivation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ConfigDraft {
    pub seed: u64,

    #[validate(
        length(min = 1, message = "must not be empty"),
        regex(path = *IDENTIFIER, message = "must be an identifier")
    )]
    pub model_type: String,

    #[validate(range(min = 1, message = "must be greater than 0"))]
    pub epochs_max: i64,

    #[validate(length(min = 1, message = "must not be empty"))]
    pub devices: Vec<i64>,

    #[validate(range(exclusive_min = 0.0, message = "must be greater than 0"))]
    pub angle_range: f64,

    #[validate(range(min = 1, message = "must be greater than 0"))]
    pub cell_reso: i64,

    /// Kernel width in cell units
    #[validate(range(exclusive_min = 0.0, message = "must be greater than 0"))]
    pub sigma: f64,

    #[validate(range(min = 0.0, max = 1.0, message = "must be within [0, 1]"))]
    pub alpha: f64,

    pub space: String,

    pub strategy: String,

    #[validate(range(exclusive_min = 0.0, message = "must be greater than 0"))]
    pub learning_rate: f64,

    #[validate(range(
        exclusive_min = 0.0,
        exclusive_max = 1.0,
        message = "must be within (0, 1)"
    ))]
    pub scheduler_factor: f64,

    #[validate(range(min = 0, message = "must not be negative"))]
    pub patience: i64,

    #[validate(range(min = 0, message = "must not be negative"))]
    pub patience_stop: i64,
}

impl Default for ConfigDraft {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            model_type: DEFAULT_MODEL_TYPE.to_string(),
            epochs_max: DEFAULT_EPOCHS_MAX,
            devices: DEFAULT_DEVICES.to_vec(),
            angle_range: DEFAULT_ANGLE_RANGE,
            cell_reso: DEFAULT_CELL_RESO,
            sigma: DEFAULT_SIGMA,
            alpha: DEFAULT_ALPHA,
            space: DEFAULT_SPACE.to_string(),
            strategy: DEFAULT_STRATEGY.to_string(),
            learning_rate: DEFAULT_LEARNING_RATE,
            scheduler_factor: DEFAULT_SCHEDULER_FACTOR,
            patience: DEFAULT_PATIENCE,
            patience_stop: DEFAULT_PATIENCE_STOP,
        }
    }
}

impl ConfigDraft {
    /// Rendered value of a field, for diagnostics
    pub fn value_of(&self, field: &str) -> String {
        match field {
            "seed" => self.seed.to_string(),
            "model_type" => format!("{:?}", self.model_type),
            "epochs_max" => self.epochs_max.to_string(),
            "devices" => format!("{:?}", self.devices),
            "angle_range" => self.angle_range.to_string(),
            "cell_reso" => self.cell_reso.to_string(),
            "sigma" => self.sigma.to_string(),
            "alpha" => self.alpha.to_string(),
            "space" => format!("{:?}", self.space),
            "strategy" => format!("{:?}", self.strategy),
            "learning_rate" => self.learning_rate.to_string(),
            "scheduler_factor" => self.scheduler_factor.to_string(),
            "patience" => self.patience.to_string(),
            "patience_stop" => self.patience_stop.to_string(),
            _ => "-".to_string(),
        }
    }

    /// Validate and turn into an immutable snapshot.
    ///
    /// Fails with the first violation in field declaration order.
    pub fn into_snapshot(self) -> Result<TrainingConfig, ConfigError> {
        ConfigValidator::validate_config(&self)?;
        TrainingConfig::from_draft(self)
    }
}
