//! Hysteresis gate for tilt angle proxies.
//!
//! Suppresses small-magnitude oscillation in an orientation estimate so
//! a nominally stationary hand does not drift the cursor. A pinch-aware
//! freeze keeps the held angle fixed during a click gesture and for a
//! configurable number of frames after release.

/// Hysteresis gate over a scalar angle proxy
#[derive(Debug, Clone)]
pub struct AngleLock {
    held: f64,
    threshold: f64,
    cooldown_frames: u32,
    cooldown: u32,
}

impl AngleLock {
    /// Create a gate with the given change threshold and post-pinch
    /// cool-down length in frames
    #[must_use]
    pub fn new(threshold: f64, cooldown_frames: u32) -> Self {
        Self {
            held: 0.0,
            threshold,
            cooldown_frames,
            cooldown: 0,
        }
    }

    /// Plain hysteresis update: the held value changes only when the
    /// proposed value differs from it by more than the threshold
    pub fn update(&mut self, proposed: f64) -> f64 {
        if (proposed - self.held).abs() > self.threshold {
            self.held = proposed;
        }
        self.held
    }

    /// Pinch-aware update
    ///
    /// While `freeze` is set the proposed value is ignored entirely and
    /// the cool-down counter is re-armed; once `freeze` clears, the gate
    /// keeps returning the held value until the counter runs out, then
    /// normal hysteresis resumes.
    pub fn update_gated(&mut self, proposed: f64, freeze: bool) -> f64 {
        if freeze {
            self.cooldown = self.cooldown_frames;
            return self.held;
        }
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return self.held;
        }
        self.update(proposed)
    }

    /// Currently held value
    #[must_use]
    pub fn held(&self) -> f64 {
        self.held
    }

    /// Reset to the initial state
    pub fn reset(&mut self) {
        self.held = 0.0;
        self.cooldown = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_noise_never_moves_held_value() {
        let mut lock = AngleLock::new(0.03, 0);
        lock.update(1.0);
        assert_eq!(lock.held(), 1.0);

        for delta in [-0.029, 0.01, 0.025, -0.005, 0.029] {
            assert_eq!(lock.update(1.0 + delta), 1.0);
        }
        assert_eq!(lock.held(), 1.0);
    }

    #[test]
    fn test_threshold_crossing_updates_exactly() {
        let mut lock = AngleLock::new(0.03, 0);
        lock.update(1.0);

        let accepted = lock.update(1.05);
        assert_eq!(accepted, 1.05);
        assert_eq!(lock.held(), 1.05);
    }

    #[test]
    fn test_freeze_ignores_proposals() {
        let mut lock = AngleLock::new(0.03, 3);
        lock.update(2.0);

        // Frozen: even a large change is ignored
        assert_eq!(lock.update_gated(5.0, true), 2.0);
        assert_eq!(lock.update_gated(5.0, true), 2.0);
    }

    #[test]
    fn test_cooldown_counts_down_after_release() {
        let mut lock = AngleLock::new(0.03, 2);
        lock.update(2.0);
        lock.update_gated(5.0, true);

        // Two frames of cool-down, proposals still held back
        assert_eq!(lock.update_gated(5.0, false), 2.0);
        assert_eq!(lock.update_gated(5.0, false), 2.0);
        // Cool-down expired: hysteresis resumes and accepts the change
        assert_eq!(lock.update_gated(5.0, false), 5.0);
    }

    #[test]
    fn test_freeze_rearms_cooldown() {
        let mut lock = AngleLock::new(0.03, 2);
        lock.update(2.0);
        lock.update_gated(9.0, true);
        assert_eq!(lock.update_gated(9.0, false), 2.0);
        // Freezing again re-arms the full cool-down
        lock.update_gated(9.0, true);
        assert_eq!(lock.update_gated(9.0, false), 2.0);
        assert_eq!(lock.update_gated(9.0, false), 2.0);
        assert_eq!(lock.update_gated(9.0, false), 9.0);
    }
}
