//! Closed tag sets
//!
//! Architecture family, cell-space topology and distributed strategy are
//! free-form strings on the way in and closed enums once validated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::error::ConfigError;

/// Architecture family the model builder dispatches on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    Dnn,
    Cnn,
    Rnn,
    Lstm,
    Transformer,
}

impl ModelType {
    pub const ALL: [ModelType; 5] = [
        ModelType::Dnn,
        ModelType::Cnn,
        ModelType::Rnn,
        ModelType::Lstm,
        ModelType::Transformer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::Dnn => "dnn",
            ModelType::Cnn => "cnn",
            ModelType::Rnn => "rnn",
            ModelType::Lstm => "lstm",
            ModelType::Transformer => "transformer",
        }
    }
}

/// Topology of the angular cell space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Space {
    /// The last cell is adjacent to the first one
    Circular,
    /// Cells form an open interval
    Linear,
}

impl Space {
    pub const ALL: [Space; 2] = [Space::Circular, Space::Linear];

    pub fn as_str(&self) -> &'static str {
        match self {
            Space::Circular => "circular",
            Space::Linear => "linear",
        }
    }
}

/// Distributed execution strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Synchronous data-parallel replication, one process per device
    Ddp,
    /// Single-process data parallelism
    Dp,
    /// No replication
    Single,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Ddp, Strategy::Dp, Strategy::Single];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Ddp => "ddp",
            Strategy::Dp => "dp",
            Strategy::Single => "single",
        }
    }
}

fn parse_tag<T: Copy>(
    field: &str,
    raw: &str,
    all: &[T],
    name: impl Fn(&T) -> &'static str,
) -> Result<T, ConfigError> {
    let wanted = raw.trim().to_ascii_lowercase();
    all.iter()
        .find(|tag| name(*tag) == wanted)
        .copied()
        .ok_or_else(|| {
            let allowed: Vec<&str> = all.iter().map(&name).collect();
            ConfigError::invalid(
                field,
                format!("{:?}", raw),
                format!("must be one of {}", allowed.join(", ")),
            )
        })
}

impl FromStr for ModelType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_tag("model_type", s, &Self::ALL, ModelType::as_str)
    }
}

impl FromStr for Space {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_tag("space", s, &Self::ALL, Space::as_str)
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_tag("strategy", s, &Self::ALL, Strategy::as_str)
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags() {
        assert_eq!("dnn".parse::<ModelType>().unwrap(), ModelType::Dnn);
        assert_eq!("Circular".parse::<Space>().unwrap(), Space::Circular);
        assert_eq!(" ddp ".parse::<Strategy>().unwrap(), Strategy::Ddp);
    }

    #[test]
    fn test_parse_unknown_tag_names_field() {
        let err = "spherical".parse::<Space>().unwrap_err();
        assert_eq!(err.field(), Some("space"));
        assert!(err.to_string().contains("circular, linear"));

        let err = "horovod".parse::<Strategy>().unwrap_err();
        assert_eq!(err.field(), Some("strategy"));

        let err = "".parse::<ModelType>().unwrap_err();
        assert_eq!(err.field(), Some("model_type"));
    }

    #[test]
    fn test_display_matches_serde_name() {
        for tag in Strategy::ALL {
            let json = serde_json::to_string(&tag).unwrap();
            assert_eq!(json, format!("\"{}\"", tag));
        }
    }
}
