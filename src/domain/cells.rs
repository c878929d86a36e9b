//! Angular cell geometry
//!
//! The angular domain `[0, angle_range)` is split into `cell_reso` equal
//! cells of width `cell_len`. Kernel widths such as `sigma` are expressed
//! in cell units.

use serde::Serialize;

use crate::domain::tags::Space;
use crate::shared::error::DivisionError;

/// Width of one cell when `range` is split into `resolution` cells.
///
/// Guards the zero divisor itself so it can be used outside of a validated
/// configuration.
pub fn derive(range: f64, resolution: u32) -> Result<f64, DivisionError> {
    if resolution == 0 {
        return Err(DivisionError { numerator: range });
    }
    Ok(range / f64::from(resolution))
}

/// Discretization of the angular domain
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellGrid {
    range: f64,
    resolution: u32,
    cell_len: f64,
    space: Space,
}

impl CellGrid {
    pub fn new(range: f64, resolution: u32, space: Space) -> Result<Self, DivisionError> {
        let cell_len = derive(range, resolution)?;
        Ok(Self {
            range,
            resolution,
            cell_len,
            space,
        })
    }

    /// Grid for an already derived cell length
    pub(crate) fn from_parts(range: f64, resolution: u32, cell_len: f64, space: Space) -> Self {
        Self {
            range,
            resolution,
            cell_len,
            space,
        }
    }

    pub fn range(&self) -> f64 {
        self.range
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn cell_len(&self) -> f64 {
        self.cell_len
    }

    pub fn space(&self) -> Space {
        self.space
    }

    /// Index of the cell containing `angle`.
    ///
    /// Circular grids wrap any finite angle; linear grids accept
    /// `[0, range]` only, with `range` itself folded into the last cell.
    pub fn cell_of(&self, angle: f64) -> Option<u32> {
        if !angle.is_finite() {
            return None;
        }
        let offset = match self.space {
            Space::Circular => angle.rem_euclid(self.range),
            Space::Linear => {
                if angle < 0.0 || angle > self.range {
                    return None;
                }
                angle
            }
        };
        let index = (offset / self.cell_len).floor() as u32;
        Some(index.min(self.resolution - 1))
    }

    /// Angle at the middle of `cell`
    pub fn center_of(&self, cell: u32) -> Option<f64> {
        if cell >= self.resolution {
            return None;
        }
        Some((f64::from(cell) + 0.5) * self.cell_len)
    }

    /// Number of cell steps between `a` and `b`
    pub fn distance(&self, a: u32, b: u32) -> u32 {
        match self.space {
            Space::Circular => {
                let d = (a % self.resolution).abs_diff(b % self.resolution);
                d.min(self.resolution - d)
            }
            Space::Linear => a.abs_diff(b),
        }
    }

    /// Convert a width in cell units to degrees
    pub fn sigma_degrees(&self, sigma: f64) -> f64 {
        sigma * self.cell_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circular() -> CellGrid {
        CellGrid::new(360.0, 72, Space::Circular).unwrap()
    }

    #[test]
    fn test_derive_default_grid() {
        assert_eq!(derive(360.0, 72).unwrap(), 5.0);
    }

    #[test]
    fn test_derive_rejects_zero_resolution() {
        let err = derive(360.0, 0).unwrap_err();
        assert_eq!(err.numerator, 360.0);
    }

    #[test]
    fn test_derive_reconstructs_range() {
        for (range, reso) in [(360.0, 7), (180.0, 11), (1.0, 3), (359.5, 1000)] {
            let len = derive(range, reso).unwrap();
            assert!((len * f64::from(reso) - range).abs() < 1e-9);
        }
    }

    #[test]
    fn test_cell_of_wraps_on_circular_grid() {
        let grid = circular();
        assert_eq!(grid.cell_of(0.0), Some(0));
        assert_eq!(grid.cell_of(4.99), Some(0));
        assert_eq!(grid.cell_of(5.0), Some(1));
        assert_eq!(grid.cell_of(359.9), Some(71));
        assert_eq!(grid.cell_of(360.0), Some(0));
        assert_eq!(grid.cell_of(-2.5), Some(71));
        assert_eq!(grid.cell_of(f64::NAN), None);
    }

    #[test]
    fn test_cell_of_bounds_on_linear_grid() {
        let grid = CellGrid::new(180.0, 18, Space::Linear).unwrap();
        assert_eq!(grid.cell_of(0.0), Some(0));
        assert_eq!(grid.cell_of(180.0), Some(17));
        assert_eq!(grid.cell_of(-0.1), None);
        assert_eq!(grid.cell_of(180.1), None);
    }

    #[test]
    fn test_center_of() {
        let grid = circular();
        assert_eq!(grid.center_of(0), Some(2.5));
        assert_eq!(grid.center_of(71), Some(357.5));
        assert_eq!(grid.center_of(72), None);
    }

    #[test]
    fn test_distance_takes_short_way_round() {
        let grid = circular();
        assert_eq!(grid.distance(0, 71), 1);
        assert_eq!(grid.distance(10, 20), 10);
        assert_eq!(grid.distance(0, 36), 36);

        let linear = CellGrid::new(360.0, 72, Space::Linear).unwrap();
        assert_eq!(linear.distance(0, 71), 71);
    }

    #[test]
    fn test_sigma_degrees() {
        assert_eq!(circular().sigma_degrees(8.0), 40.0);
    }
}
