//! trainconf - validated configuration for angular cell classification runs
//!
//! This library builds a single immutable [`TrainingConfig`] from declared
//! defaults and flat overrides, computing derived values (cell width,
//! learning-rate floor) and rejecting inconsistent settings before they
//! reach the training pipeline.

pub mod config;
pub mod domain;
pub mod shared;

#[cfg(test)]
mod tests;

pub use crate::config::{load, ConfigStore, OverrideSources, Overrides, TrainingConfig};
pub use crate::domain::{derive, CellGrid, ModelType, PlateauSchedule, Space, Strategy};
pub use crate::shared::error::{AppError, AppResult, ConfigError, DivisionError};

/// Crate result type
pub type Result<T> = std::result::Result<T, ConfigError>;
