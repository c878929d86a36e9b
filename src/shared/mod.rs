//! Shared utilities and common functionality
//!
//! This module contains the error types and logging setup used across
//! the crate and its binary.

pub mod error;
pub mod logging;

pub use error::{AppError, AppResult, ConfigError, DivisionError};
pub use logging::LoggingUtils;
