//! Plateau learning-rate policy
//!
//! Decay by `scheduler_factor` after `patience` stagnant epochs, never below
//! `min_lr`, and stop after `patience_stop` stagnant epochs.

use serde::Serialize;

/// Ratio between the initial learning rate and its floor
pub const MIN_LR_DIVISOR: f64 = 10.0;

/// Learning-rate floor for an initial rate
pub fn derive_min_lr(learning_rate: f64) -> f64 {
    learning_rate / MIN_LR_DIVISOR
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlateauSchedule {
    pub learning_rate: f64,
    pub min_lr: f64,
    pub factor: f64,
    pub patience: u32,
    pub patience_stop: u32,
}

impl PlateauSchedule {
    /// Learning rate once `decays` reductions have fired
    pub fn lr_after(&self, decays: u32) -> f64 {
        let exp = i32::try_from(decays).unwrap_or(i32::MAX);
        (self.learning_rate * self.factor.powi(exp)).max(self.min_lr)
    }

    pub fn should_decay(&self, stagnant_epochs: u32) -> bool {
        if stagnant_epochs == 0 {
            return false;
        }
        self.patience == 0 || stagnant_epochs % self.patience == 0
    }

    pub fn should_stop(&self, stagnant_epochs: u32) -> bool {
        stagnant_epochs >= self.patience_stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> PlateauSchedule {
        PlateauSchedule {
            learning_rate: 1e-3,
            min_lr: derive_min_lr(1e-3),
            factor: 0.1,
            patience: 3,
            patience_stop: 10,
        }
    }

    #[test]
    fn test_min_lr_is_a_tenth() {
        assert!((derive_min_lr(1e-3) - 1e-4).abs() < 1e-15);
        assert!(derive_min_lr(0.5) < 0.5);
    }

    #[test]
    fn test_lr_after_is_floored() {
        let s = schedule();
        assert_eq!(s.lr_after(0), 1e-3);
        assert!((s.lr_after(1) - 1e-4).abs() < 1e-15);
        assert_eq!(s.lr_after(2), s.min_lr);
        assert_eq!(s.lr_after(u32::MAX), s.min_lr);
    }

    #[test]
    fn test_decay_fires_every_patience_epochs() {
        let s = schedule();
        assert!(!s.should_decay(0));
        assert!(!s.should_decay(2));
        assert!(s.should_decay(3));
        assert!(s.should_decay(6));

        let eager = PlateauSchedule { patience: 0, ..s };
        assert!(eager.should_decay(1));
    }

    #[test]
    fn test_decay_precedes_stop() {
        let s = schedule();
        let first_decay = (1..).find(|&e| s.should_decay(e)).unwrap();
        let first_stop = (1..).find(|&e| s.should_stop(e)).unwrap();
        assert!(first_decay < first_stop);
    }
}
