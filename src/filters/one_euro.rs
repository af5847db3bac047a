//! One-euro adaptive low-pass filter.
//!
//! Smooths a scalar signal sampled at irregular timestamps while trading
//! jitter suppression against lag based on the signal's estimated speed:
//! the cutoff frequency rises with the (itself smoothed) rate of change,
//! so a slow hand gets heavy smoothing and a fast sweep stays responsive.

use super::ScalarFilter;
use crate::{Error, Result};
use std::f64::consts::PI;

/// Per-channel state: previous filtered value, previous rate estimate
/// and the timestamp both were taken at
#[derive(Debug, Clone, Copy)]
struct FilterState {
    value: f64,
    rate: f64,
    timestamp_ms: f64,
}

/// Adaptive low-pass filter over one scalar channel
pub struct OneEuroFilter {
    sample_rate_hz: f64,
    min_cutoff: f64,
    beta: f64,
    derivative_cutoff: f64,
    state: Option<FilterState>,
}

impl OneEuroFilter {
    /// Create a filter
    ///
    /// `sample_rate_hz` is the nominal sampling frequency, used only for
    /// the first sample where no elapsed time exists yet. `min_cutoff`
    /// sets low-speed smoothing strength (lower smooths more), `beta`
    /// the speed sensitivity (higher reduces lag during fast motion) and
    /// `derivative_cutoff` the smoothing of the internal speed estimate.
    ///
    /// # Errors
    ///
    /// Returns `FilterError` unless the sample rate and both cutoffs are
    /// positive and `beta` is non-negative.
    pub fn new(sample_rate_hz: f64, min_cutoff: f64, beta: f64, derivative_cutoff: f64) -> Result<Self> {
        if sample_rate_hz <= 0.0 {
            return Err(Error::FilterError(format!(
                "Sample rate must be positive, got {sample_rate_hz}"
            )));
        }
        if min_cutoff <= 0.0 || derivative_cutoff <= 0.0 {
            return Err(Error::FilterError(format!(
                "Cutoff frequencies must be positive, got {min_cutoff} / {derivative_cutoff}"
            )));
        }
        if beta < 0.0 {
            return Err(Error::FilterError(format!(
                "Beta must be non-negative, got {beta}"
            )));
        }
        Ok(Self {
            sample_rate_hz,
            min_cutoff,
            beta,
            derivative_cutoff,
            state: None,
        })
    }

    /// Standard RC low-pass conversion from cutoff frequency to the
    /// exponential smoothing coefficient
    fn smoothing_factor(dt: f64, cutoff: f64) -> f64 {
        let tau = 1.0 / (2.0 * PI * cutoff);
        1.0 / (1.0 + tau / dt)
    }
}

impl ScalarFilter for OneEuroFilter {
    fn filter(&mut self, raw: f64, timestamp_ms: f64) -> f64 {
        let Some(state) = self.state else {
            // First sample: seed state from the input with zero rate
            self.state = Some(FilterState {
                value: raw,
                rate: 0.0,
                timestamp_ms,
            });
            return raw;
        };

        if timestamp_ms < state.timestamp_ms {
            // Input contract violation: re-seed the channel instead of
            // propagating a negative-time artifact
            self.state = Some(FilterState {
                value: raw,
                rate: 0.0,
                timestamp_ms,
            });
            return raw;
        }

        let mut dt = (timestamp_ms - state.timestamp_ms) / 1000.0;
        if dt <= 0.0 {
            dt = 1.0 / self.sample_rate_hz;
        }

        let raw_rate = (raw - state.value) / dt;
        let rate_alpha = Self::smoothing_factor(dt, self.derivative_cutoff);
        let rate = rate_alpha * raw_rate + (1.0 - rate_alpha) * state.rate;

        let cutoff = self.min_cutoff + self.beta * rate.abs();
        let alpha = Self::smoothing_factor(dt, cutoff);
        let value = alpha * raw + (1.0 - alpha) * state.value;

        self.state = Some(FilterState {
            value,
            rate,
            timestamp_ms,
        });
        value
    }

    fn reset(&mut self) {
        self.state = None;
    }

    fn name(&self) -> &str {
        "OneEuroFilter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> OneEuroFilter {
        OneEuroFilter::new(60.0, 1.0, 0.1, 1.0).unwrap()
    }

    #[test]
    fn test_first_sample_passes_through() {
        let mut f = filter();
        assert_eq!(f.filter(0.37, 0.0), 0.37);
    }

    #[test]
    fn test_constant_input_converges() {
        let mut f = filter();
        let mut last = 0.0;
        for i in 0..60 {
            last = f.filter(5.0, f64::from(i) * 16.667);
        }
        assert!((last - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_step_input_bounded_and_monotonic() {
        let mut f = filter();
        f.filter(0.0, 0.0);

        let mut previous = 0.0;
        for i in 1..120 {
            let out = f.filter(10.0, f64::from(i) * 16.667);
            assert!(out >= previous - 1e-12, "no oscillation below previous");
            assert!(out <= 10.0, "never overshoots the input range");
            previous = out;
        }
        assert!(previous > 5.0, "should make real progress toward the step");
    }

    #[test]
    fn test_higher_beta_converges_faster() {
        let mut slow = OneEuroFilter::new(60.0, 1.0, 0.0, 1.0).unwrap();
        let mut fast = OneEuroFilter::new(60.0, 1.0, 5.0, 1.0).unwrap();
        slow.filter(0.0, 0.0);
        fast.filter(0.0, 0.0);

        let mut out_slow = 0.0;
        let mut out_fast = 0.0;
        for i in 1..20 {
            let t = f64::from(i) * 16.667;
            out_slow = slow.filter(10.0, t);
            out_fast = fast.filter(10.0, t);
        }
        assert!(out_fast > out_slow);
    }

    #[test]
    fn test_non_monotonic_timestamp_reseeds() {
        let mut f = filter();
        f.filter(5.0, 1000.0);
        // An older timestamp re-seeds the channel from the new sample
        assert_eq!(f.filter(7.0, 500.0), 7.0);
    }

    #[test]
    fn test_equal_timestamps_use_nominal_rate() {
        let mut f = filter();
        f.filter(0.0, 100.0);
        let out = f.filter(1.0, 100.0);
        assert!(out.is_finite());
        assert!(out > 0.0 && out < 1.0);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        assert!(OneEuroFilter::new(0.0, 1.0, 0.1, 1.0).is_err());
        assert!(OneEuroFilter::new(60.0, 0.0, 0.1, 1.0).is_err());
        assert!(OneEuroFilter::new(60.0, 1.0, -0.1, 1.0).is_err());
        assert!(OneEuroFilter::new(60.0, 1.0, 0.1, 0.0).is_err());
    }
}
