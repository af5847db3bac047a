//! Temporal debouncing of the pinch gesture.
//!
//! A single-frame pinch estimate is noisy; a majority vote over a sliding
//! window of recent frames trades up to one window of click latency for
//! resistance to single-frame false positives and negatives.

use crate::{Error, Result};
use std::collections::VecDeque;

/// Majority-vote debouncer over a sliding window of pinch estimates
#[derive(Debug, Clone)]
pub struct PinchDebouncer {
    window: VecDeque<bool>,
    capacity: usize,
    tolerance: f64,
}

impl PinchDebouncer {
    /// Create a debouncer with the given window size and vote fraction
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for a zero-sized window or a vote fraction
    /// outside `(0, 1]`.
    pub fn new(capacity: usize, tolerance: f64) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ConfigError(
                "Pinch debounce window must be greater than 0".to_string(),
            ));
        }
        if !(tolerance > 0.0 && tolerance <= 1.0) {
            return Err(Error::ConfigError(format!(
                "Pinch vote fraction must be in (0, 1], got {tolerance}"
            )));
        }
        Ok(Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
            tolerance,
        })
    }

    /// Insert an instantaneous estimate and return the debounced decision
    ///
    /// While the window is still filling the raw input passes through
    /// unchanged. Once full, the oldest entry is evicted first and the
    /// output is the majority vote over the window.
    pub fn push(&mut self, instant: bool) -> bool {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(instant);

        if self.window.len() < self.capacity {
            return instant;
        }

        let votes = self.window.iter().filter(|&&pinched| pinched).count();
        votes as f64 >= self.tolerance * self.capacity as f64
    }

    /// Drop all buffered estimates
    pub fn reset(&mut self) {
        self.window.clear();
    }

    /// Number of buffered estimates
    #[must_use]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// True when no estimates are buffered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_while_filling() {
        let mut debouncer = PinchDebouncer::new(5, 0.5).unwrap();
        assert!(debouncer.push(true));
        assert!(!debouncer.push(false));
        assert!(debouncer.push(true));
        assert!(!debouncer.push(false));
        assert_eq!(debouncer.len(), 4);
    }

    #[test]
    fn test_majority_law() {
        // 5 true out of 9 with tolerance 0.5 is a pinch
        let mut debouncer = PinchDebouncer::new(9, 0.5).unwrap();
        let pattern = [true, false, true, false, true, false, true, false];
        for value in pattern {
            debouncer.push(value);
        }
        assert!(debouncer.push(true), "5/9 should vote true");

        // 4 true out of 9 is not
        let mut debouncer = PinchDebouncer::new(9, 0.5).unwrap();
        let pattern = [false, true, false, true, false, true, false, true];
        for value in pattern {
            debouncer.push(value);
        }
        assert!(!debouncer.push(false), "4/9 should vote false");
    }

    #[test]
    fn test_fifo_eviction() {
        let mut debouncer = PinchDebouncer::new(3, 1.0).unwrap();
        debouncer.push(false);
        debouncer.push(true);
        debouncer.push(true);
        // Oldest false evicted: window is now all true
        assert!(debouncer.push(true));
        assert_eq!(debouncer.len(), 3);
    }

    #[test]
    fn test_invalid_construction() {
        assert!(PinchDebouncer::new(0, 0.5).is_err());
        assert!(PinchDebouncer::new(9, 0.0).is_err());
        assert!(PinchDebouncer::new(9, 1.5).is_err());
        assert!(PinchDebouncer::new(9, -0.5).is_err());
    }

    #[test]
    fn test_reset_returns_to_passthrough() {
        let mut debouncer = PinchDebouncer::new(3, 0.5).unwrap();
        for _ in 0..5 {
            debouncer.push(true);
        }
        debouncer.reset();
        assert!(debouncer.is_empty());
        // Raw passthrough again
        assert!(!debouncer.push(false));
    }
}
