//! Rotation angles sampled over one full turn.

use crate::util::{AlignError, AlignResult};

/// Largest number of angles one grid may hold (a step of 0.001 degrees).
pub const MAX_ANGLES: usize = 360_000;

/// Discrete angle grid over `[0, 360)` degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct AngleGrid {
    step_deg: f64,
    len: usize,
}

impl AngleGrid {
    /// Creates the grid `0, step, 2 * step, ...` up to (excluding) 360.
    pub fn full_turn(step_deg: f64) -> AlignResult<Self> {
        if !step_deg.is_finite() {
            return Err(AlignError::InvalidAngleGrid {
                reason: "non-finite rotation step",
            });
        }
        if step_deg <= 0.0 {
            return Err(AlignError::InvalidAngleGrid {
                reason: "rotation_step_deg must be > 0",
            });
        }

        let estimate = (360.0 / step_deg).ceil();
        if estimate > MAX_ANGLES as f64 {
            return Err(AlignError::InvalidAngleGrid {
                reason: "rotation_step_deg yields too many angles",
            });
        }

        // Settle the estimate on the exact `k * step < 360` boundary.
        let mut len = (estimate as usize).max(1);
        while len > 1 && ((len - 1) as f64) * step_deg >= 360.0 {
            len -= 1;
        }
        while (len as f64) * step_deg < 360.0 {
            len += 1;
        }

        Ok(Self { step_deg, len })
    }

    /// Returns the number of angles; a valid grid always has at least one.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the grid step size in degrees.
    pub fn step_deg(&self) -> f64 {
        self.step_deg
    }

    /// Returns the angle for the given index.
    pub fn angle_at(&self, idx: usize) -> f64 {
        debug_assert!(idx < self.len);
        (idx as f64) * self.step_deg
    }

    /// Iterates over all angles in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(|idx| self.angle_at(idx))
    }
}
