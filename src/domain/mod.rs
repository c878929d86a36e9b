//! Domain layer
//!
//! Closed tag sets and the pure derivations built on top of a validated
//! configuration.

pub mod cells;
pub mod schedule;
pub mod tags;

pub use cells::{derive, CellGrid};
pub use schedule::{derive_min_lr, PlateauSchedule};
pub use tags::{ModelType, Space, Strategy};
