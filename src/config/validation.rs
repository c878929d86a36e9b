//! Configuration validation module
//!
//! This module provides the cross-field validation logic for configuration
//! beyond the basic validator crate validation.

use std::collections::HashSet;
use validator::{Validate, ValidationErrors};

use crate::config::defaults::{field_rank, CELL_TOLERANCE, FIELDS};
use crate::config::draft::ConfigDraft;
use crate::config::training_config::TrainingConfig;
use crate::domain::tags::{ModelType, Space, Strategy};
use crate::shared::error::ConfigError;

/// Configuration validator for additional validation logic
pub struct ConfigValidator;

impl ConfigValidator {
    /// All violations in `draft`, ordered by field declaration
    pub fn violations(draft: &ConfigDraft) -> Vec<ConfigError> {
        let mut found = Self::check_finite(draft);

        if let Err(errors) = draft.validate() {
            found.extend(Self::from_validation_errors(draft, &errors));
        }

        found.extend(Self::validate_devices(&draft.devices).err());
        found.extend(Self::validate_tags(draft));
        found.extend(Self::validate_patience(draft.patience, draft.patience_stop).err());

        found.sort_by_key(|e| field_rank(e.field().unwrap_or_default()));
        found
    }

    /// Validate the complete draft, failing on the first violation.
    ///
    /// Every violation is logged at debug level.
    pub fn validate_config(draft: &ConfigDraft) -> Result<(), ConfigError> {
        let violations = Self::violations(draft);
        for violation in &violations {
            tracing::debug!(
                field = violation.field().unwrap_or("-"),
                error = %violation,
                "Configuration violation"
            );
        }
        match violations.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Check the invariants of computed fields
    pub fn validate_derived(config: &TrainingConfig) -> Result<(), ConfigError> {
        let rebuilt = config.cell_len() * f64::from(config.cell_reso());
        if (rebuilt - config.angle_range()).abs() > CELL_TOLERANCE * config.angle_range().max(1.0) {
            return Err(ConfigError::invalid(
                "cell_len",
                config.cell_len(),
                format!(
                    "cell_len * cell_reso must equal angle_range ({})",
                    config.angle_range()
                ),
            ));
        }

        if !(config.min_lr() < config.learning_rate()) {
            return Err(ConfigError::invalid(
                "min_lr",
                config.min_lr(),
                "must be lower than learning_rate",
            ));
        }

        if config.strategy() == Strategy::Single && config.devices().len() > 1 {
            tracing::warn!(
                devices = ?config.devices(),
                "Strategy is single but several devices are configured - only the first will be used"
            );
        }

        Ok(())
    }

    fn from_validation_errors(draft: &ConfigDraft, errors: &ValidationErrors) -> Vec<ConfigError> {
        let fields = errors.field_errors();
        FIELDS
            .iter()
            .filter_map(|name| {
                let first = fields.get(*name)?.first()?;
                let constraint = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| first.code.to_string());
                Some(ConfigError::invalid(*name, draft.value_of(name), constraint))
            })
            .collect()
    }

    /// Range attributes let NaN through
    fn check_finite(draft: &ConfigDraft) -> Vec<ConfigError> {
        [
            ("angle_range", draft.angle_range),
            ("sigma", draft.sigma),
            ("alpha", draft.alpha),
            ("learning_rate", draft.learning_rate),
            ("scheduler_factor", draft.scheduler_factor),
        ]
        .into_iter()
        .filter(|(_, v)| !v.is_finite())
        .map(|(name, v)| ConfigError::invalid(name, v, "must be a finite number"))
        .collect()
    }

    /// Devices must be non-negative and unique; emptiness is an attribute rule
    fn validate_devices(devices: &[i64]) -> Result<(), ConfigError> {
        if let Some(negative) = devices.iter().find(|d| **d < 0) {
            return Err(ConfigError::invalid(
                "devices",
                format!("{:?}", devices),
                format!("device ids must not be negative (found {})", negative),
            ));
        }

        if let Some(too_big) = devices.iter().find(|d| u32::try_from(**d).is_err()) {
            return Err(ConfigError::invalid(
                "devices",
                format!("{:?}", devices),
                format!("device id {} is out of range", too_big),
            ));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = devices.iter().find(|d| !seen.insert(**d)) {
            return Err(ConfigError::invalid(
                "devices",
                format!("{:?}", devices),
                format!("device ids must be unique ({} repeats)", dup),
            ));
        }

        Ok(())
    }

    fn validate_tags(draft: &ConfigDraft) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !draft.model_type.is_empty() {
            errors.extend(draft.model_type.parse::<ModelType>().err());
        }
        errors.extend(draft.space.parse::<Space>().err());
        errors.extend(draft.strategy.parse::<Strategy>().err());
        errors
    }

    /// Decay has to be able to fire before early stopping does
    fn validate_patience(patience: i64, patience_stop: i64) -> Result<(), ConfigError> {
        if patience >= 0 && patience_stop < patience {
            return Err(ConfigError::invalid(
                "patience_stop",
                patience_stop,
                format!("must be at least patience ({})", patience),
            ));
        }
        Ok(())
    }
}
