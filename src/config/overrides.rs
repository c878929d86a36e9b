//! Flat override mapping
//!
//! Keys are field names of the draft; values are `config` crate values so
//! overrides from code, files and environment share one representation.

use ::config::{Map, Value, ValueKind};
use std::collections::BTreeMap;

use crate::config::defaults::{DERIVED_FIELDS, FIELDS, FLOAT_FIELDS, INTEGER_FIELDS};
use crate::shared::error::ConfigError;

/// Field name to value overrides, applied over the declared defaults
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    entries: BTreeMap<String, Value>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Reject keys outside the schema and keys of derived fields
    pub fn check_keys(&self) -> Result<(), ConfigError> {
        for key in self.entries.keys() {
            if FIELDS.contains(&key.as_str()) {
                continue;
            }
            if let Some((field, rule)) = DERIVED_FIELDS.iter().find(|(f, _)| *f == key.as_str()) {
                return Err(ConfigError::invalid(
                    *field,
                    &self.entries[key],
                    format!("{}, cannot be overridden", rule),
                ));
            }
            return Err(ConfigError::UnknownKey(key.clone()));
        }
        Ok(())
    }

    /// Reject values the `config` crate would coerce instead of refuse,
    /// such as `2.5` or `true` for an integer field
    pub fn check_values(&self) -> Result<(), ConfigError> {
        for field in FIELDS {
            let Some(value) = self.entries.get(field) else {
                continue;
            };
            if INTEGER_FIELDS.contains(&field) && !is_integer(value) {
                return Err(ConfigError::invalid(field, value, "must be an integer"));
            }
            if FLOAT_FIELDS.contains(&field) && !is_number(value) {
                return Err(ConfigError::invalid(field, value, "must be a number"));
            }
            if field == "devices" {
                if let ValueKind::Array(items) = &value.kind {
                    if let Some(bad) = items.iter().find(|item| !is_integer(item)) {
                        return Err(ConfigError::invalid(
                            field,
                            bad,
                            "device ids must be integers",
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Keys first, then values
    pub fn check(&self) -> Result<(), ConfigError> {
        self.check_keys()?;
        self.check_values()
    }
}

fn is_integer(value: &Value) -> bool {
    match &value.kind {
        ValueKind::I64(_) | ValueKind::I128(_) | ValueKind::U64(_) | ValueKind::U128(_) => true,
        ValueKind::Float(f) => f.is_finite() && f.fract() == 0.0,
        ValueKind::String(s) => s.trim().parse::<i128>().is_ok(),
        _ => false,
    }
}

fn is_number(value: &Value) -> bool {
    match &value.kind {
        ValueKind::I64(_)
        | ValueKind::I128(_)
        | ValueKind::U64(_)
        | ValueKind::U128(_)
        | ValueKind::Float(_) => true,
        ValueKind::String(s) => s.trim().parse::<f64>().is_ok(),
        _ => false,
    }
}

impl FromIterator<(String, Value)> for Overrides {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl From<Map<String, Value>> for Overrides {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}
