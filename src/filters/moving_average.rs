use super::ScalarFilter;
use crate::{Error, Result};
use std::collections::VecDeque;

/// Moving average filter over one scalar channel
pub struct MovingAverageFilter {
    window_size: usize,
    buffer: VecDeque<f64>,
}

impl MovingAverageFilter {
    /// Create a filter averaging over the last `window_size` samples
    ///
    /// # Errors
    ///
    /// Returns `FilterError` for a zero window.
    pub fn new(window_size: usize) -> Result<Self> {
        if window_size == 0 {
            return Err(Error::FilterError(
                "Window size must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            window_size,
            buffer: VecDeque::with_capacity(window_size),
        })
    }
}

impl ScalarFilter for MovingAverageFilter {
    fn filter(&mut self, value: f64, _timestamp_ms: f64) -> f64 {
        if self.buffer.len() >= self.window_size {
            self.buffer.pop_front();
        }
        self.buffer.push_back(value);

        self.buffer.iter().sum::<f64>() / self.buffer.len() as f64
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }

    fn name(&self) -> &str {
        "MovingAverageFilter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_average() {
        let mut filter = MovingAverageFilter::new(3).unwrap();

        assert_eq!(filter.filter(10.0, 0.0), 10.0);
        assert_eq!(filter.filter(20.0, 16.0), 15.0);
        assert_eq!(filter.filter(30.0, 32.0), 20.0);

        // Window is full, oldest value should be dropped
        assert_eq!(filter.filter(40.0, 48.0), 30.0);
    }

    #[test]
    fn test_constant_input_is_fixed_point() {
        let mut filter = MovingAverageFilter::new(5).unwrap();
        for i in 0..10 {
            assert_eq!(filter.filter(7.5, f64::from(i)), 7.5);
        }
    }

    #[test]
    fn test_reset() {
        let mut filter = MovingAverageFilter::new(3).unwrap();
        filter.filter(10.0, 0.0);
        filter.filter(20.0, 16.0);
        filter.reset();
        assert_eq!(filter.filter(30.0, 32.0), 30.0);
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(MovingAverageFilter::new(0).is_err());
    }
}
