//! Logging utilities module
//!
//! This module provides centralized logging functionality and utilities.

use tracing::{error, info};

use crate::config::TrainingConfig;
use crate::shared::error::{AppError, AppResult, ConfigError};

/// Logging utilities for the application
pub struct LoggingUtils;

impl LoggingUtils {
    /// Initialize logging on stderr, letting `RUST_LOG` win over `level`
    pub fn initialize(level: &str) -> AppResult<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level));

        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(std::io::stderr)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| AppError::Logging(format!("Failed to initialize logging: {}", e)))?;

        Ok(())
    }

    /// Log a validated snapshot with structured fields
    pub fn log_snapshot(config: &TrainingConfig) {
        info!(
            seed = config.seed(),
            model_type = %config.model_type(),
            epochs_max = config.epochs_max(),
            devices = ?config.devices(),
            strategy = %config.strategy(),
            space = %config.space(),
            cell_reso = config.cell_reso(),
            cell_len = config.cell_len(),
            learning_rate = config.learning_rate(),
            min_lr = config.min_lr(),
            "Training configuration loaded"
        );
    }

    /// Log a rejected configuration
    pub fn log_rejection(err: &ConfigError) {
        error!(
            field = err.field().unwrap_or("-"),
            error = %err,
            "Training configuration rejected"
        );
    }
}
