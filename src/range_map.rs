//! Affine range remapping with saturation.

use crate::{constants::EPSILON, Error, Result};

/// Affine remap of a bounded input range onto a bounded output range,
/// saturating at the output bounds
///
/// Degenerate bounds are a configuration error rejected at construction;
/// `map` itself is total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeMap {
    old_min: f64,
    old_max: f64,
    new_min: f64,
    new_max: f64,
}

impl RangeMap {
    /// Create a validated remap
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the input span is degenerate
    /// (`old_min == old_max`) or the output bounds are not ordered.
    pub fn new(old_min: f64, old_max: f64, new_min: f64, new_max: f64) -> Result<Self> {
        if (old_max - old_min).abs() < EPSILON {
            return Err(Error::ConfigError(format!(
                "Degenerate input range: {old_min}..{old_max}"
            )));
        }
        if new_max <= new_min {
            return Err(Error::ConfigError(format!(
                "Output range must be ordered: {new_min}..{new_max}"
            )));
        }
        Ok(Self {
            old_min,
            old_max,
            new_min,
            new_max,
        })
    }

    /// Remap `value`, clamping the result to the output bounds
    #[must_use]
    pub fn map(&self, value: f64) -> f64 {
        let result = (value - self.old_min) / (self.old_max - self.old_min)
            * (self.new_max - self.new_min)
            + self.new_min;

        if result < self.new_min {
            self.new_min
        } else if result > self.new_max {
            self.new_max
        } else {
            result
        }
    }
}
