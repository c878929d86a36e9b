//! Declared defaults and field names
//!
//! Every default value and recognized key lives here so the draft, the
//! store and the override sources agree on one schema.

/// Environment variable prefix (e.g. `TRAINCONF_EPOCHS_MAX`)
pub const ENV_PREFIX: &str = "TRAINCONF";

/// Overridable fields in declaration order. Violations are reported in this order.
pub const FIELDS: [&str; 14] = [
    "seed",
    "model_type",
    "epochs_max",
    "devices",
    "angle_range",
    "cell_reso",
    "sigma",
    "alpha",
    "space",
    "strategy",
    "learning_rate",
    "scheduler_factor",
    "patience",
    "patience_stop",
];

/// Fields computed from others; never accepted as overrides
pub const DERIVED_FIELDS: [(&str, &str); 2] = [
    ("cell_len", "derived from angle_range / cell_reso"),
    ("min_lr", "derived from learning_rate / 10"),
];

/// Scalar integer fields; `devices` holds integers too
pub const INTEGER_FIELDS: [&str; 5] = ["seed", "epochs_max", "cell_reso", "patience", "patience_stop"];

pub const FLOAT_FIELDS: [&str; 5] = [
    "angle_range",
    "sigma",
    "alpha",
    "learning_rate",
    "scheduler_factor",
];

/// Absolute tolerance for `cell_len * cell_reso == angle_range`
pub const CELL_TOLERANCE: f64 = 1e-9;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_MODEL_TYPE: &str = "dnn";
pub const DEFAULT_EPOCHS_MAX: i64 = 30;
pub const DEFAULT_DEVICES: [i64; 1] = [5];
pub const DEFAULT_ANGLE_RANGE: f64 = 360.0;
pub const DEFAULT_CELL_RESO: i64 = 72;
pub const DEFAULT_SIGMA: f64 = 8.0;
pub const DEFAULT_ALPHA: f64 = 0.2;
pub const DEFAULT_SPACE: &str = "circular";
pub const DEFAULT_STRATEGY: &str = "ddp";
pub const DEFAULT_LEARNING_RATE: f64 = 1e-3;
pub const DEFAULT_SCHEDULER_FACTOR: f64 = 0.1;
pub const DEFAULT_PATIENCE: i64 = 3;
pub const DEFAULT_PATIENCE_STOP: i64 = 10;

/// Position of `field` in [`FIELDS`], derived fields sorting last
pub fn field_rank(field: &str) -> usize {
    FIELDS
        .iter()
        .position(|f| *f == field)
        .unwrap_or(FIELDS.len())
}
