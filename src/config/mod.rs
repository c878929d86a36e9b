//! Configuration management module
//!
//! This module handles all configuration concerns: declared defaults,
//! override layering, validation, derived values and the immutable
//! snapshot handed to the training pipeline.

pub mod defaults;
pub mod draft;
pub mod overrides;
pub mod sources;
pub mod store;
pub mod training_config;
pub mod validation;

pub use draft::ConfigDraft;
pub use overrides::Overrides;
pub use sources::OverrideSources;
pub use store::{load, ConfigStore};
pub use training_config::TrainingConfig;
pub use validation::ConfigValidator;
