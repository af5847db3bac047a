//! Signal filtering algorithms for smoothing pointer coordinates.
//!
//! Each screen axis (and, in tilt-compensated modes, each angle proxy)
//! owns one filter instance; state is never shared across channels.

/// Adaptive one-euro filter for responsiveness-aware smoothing
pub mod one_euro;

/// Moving average filter for simple smoothing
pub mod moving_average;

use crate::{config::SmoothingConfig, Error, Result};

/// Trait for all per-channel scalar filters
pub trait ScalarFilter: Send + Sync {
    /// Apply the filter to one sample taken at `timestamp_ms`
    fn filter(&mut self, value: f64, timestamp_ms: f64) -> f64;

    /// Reset filter state
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes values through unchanged
pub struct Passthrough;

impl ScalarFilter for Passthrough {
    fn filter(&mut self, value: f64, _timestamp_ms: f64) -> f64 {
        value
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "Passthrough"
    }
}

/// Create a scalar filter from a smoothing configuration
///
/// # Errors
///
/// Returns `FilterError` for an unknown kind or invalid parameters.
pub fn create_filter(config: &SmoothingConfig) -> Result<Box<dyn ScalarFilter>> {
    match config.kind.to_lowercase().as_str() {
        "none" | "passthrough" => Ok(Box::new(Passthrough)),
        "one_euro" | "oneeuro" => Ok(Box::new(one_euro::OneEuroFilter::new(
            config.sample_rate_hz,
            config.min_cutoff,
            config.beta,
            config.derivative_cutoff,
        )?)),
        "moving_average" | "movingaverage" => Ok(Box::new(
            moving_average::MovingAverageFilter::new(config.window)?,
        )),
        kind => Err(Error::FilterError(format!("Unknown filter kind: {kind}"))),
    }
}
