//! Error handling module
//!
//! This module provides centralized error handling for the crate.

use thiserror::Error;

/// A derived value was requested with a zero divisor.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("cannot split {numerator} into zero cells")]
pub struct DivisionError {
    pub numerator: f64,
}

/// Configuration error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value} for `{field}`: {constraint}")]
    Invalid {
        field: String,
        value: String,
        constraint: String,
    },

    #[error("unknown configuration key `{0}`")]
    UnknownKey(String),

    #[error("configuration source error: {0}")]
    Source(String),

    #[error(transparent)]
    Division(#[from] DivisionError),
}

impl ConfigError {
    /// Build an `Invalid` error from anything displayable
    pub fn invalid(
        field: impl Into<String>,
        value: impl std::fmt::Display,
        constraint: impl Into<String>,
    ) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            value: value.to_string(),
            constraint: constraint.into(),
        }
    }

    /// Name of the offending field, when the error is tied to one
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::Invalid { field, .. } => Some(field),
            ConfigError::UnknownKey(key) => Some(key),
            ConfigError::Source(_) | ConfigError::Division(_) => None,
        }
    }
}

impl From<::config::ConfigError> for ConfigError {
    fn from(err: ::config::ConfigError) -> Self {
        match err {
            ::config::ConfigError::Type {
                key: Some(key),
                unexpected,
                expected,
                ..
            } => ConfigError::Invalid {
                field: field_of_key(&key).to_string(),
                value: unexpected.to_string(),
                constraint: format!("expected {}", expected),
            },
            other => ConfigError::Source(other.to_string()),
        }
    }
}

/// Top-level field of a `config` key path (`devices[1]` -> `devices`)
fn field_of_key(key: &str) -> &str {
    key.split(['.', '[']).next().unwrap_or(key)
}

/// Application error types
#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("Output error: {0}")]
    Output(String),
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Output(err.to_string())
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::Output(err.to_string())
    }
}
