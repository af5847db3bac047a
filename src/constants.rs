//! Constants used throughout the application

/// Number of hand landmarks produced by the detector
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Nominal sampling frequency assumption (camera fps)
pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 60.0;

/// One-euro filter defaults: lower `min_cutoff` to reduce jitter,
/// raise `beta` to reduce lag during fast motion
pub const DEFAULT_MIN_CUTOFF: f64 = 0.001;
pub const DEFAULT_DERIVATIVE_CUTOFF: f64 = 1.0;
pub const FRONT_BETA: f64 = 0.1;
pub const DOWN_BETA: f64 = 0.7;

/// Moving average window for the direct-mapping modes
pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 15;

/// Pinch metric thresholds (dimensionless ratio units)
pub const DEFAULT_PINCH_THRESHOLD: f64 = 12.0;
pub const DOWN_PINCH_THRESHOLD: f64 = 9.0;

/// Pinch debounce window sizes per mode
pub const NORMAL_PINCH_WINDOW: usize = 15;
pub const FRONT_PINCH_WINDOW: usize = 11;
pub const DOWN_PINCH_WINDOW: usize = 9;

/// Fraction of the debounce window that must agree for a pinch
pub const DEFAULT_PINCH_TOLERANCE: f64 = 0.5;

/// Angle lock hysteresis threshold (angle-proxy units)
pub const DEFAULT_ANGLE_LOCK_THRESHOLD: f64 = 0.03;

/// Frames the angle lock stays frozen after a pinch releases
pub const DEFAULT_PINCH_COOLDOWN_FRAMES: u32 = 15;

/// Pinch-metric margin above the threshold that already freezes the lock
pub const DEFAULT_NEAR_PINCH_MARGIN: f64 = 3.0;

/// Tilt contribution gain and vertical offset (front mode)
pub const DEFAULT_ANGLE_GAIN: f64 = 0.3;
pub const DEFAULT_AXIS_Y_OFFSET: f64 = 0.1;

/// Fixed-unit depth calibration (normal mode): reference span and divisor
pub const DEFAULT_CALIBRATION_REFERENCE: f64 = 0.15;
pub const DEFAULT_DEPTH_SCALE: f64 = 20.0;

/// Depth calibration span bounds (front mode), middle PIP-MCP distance
pub const DEFAULT_CALIBRATION_SPAN_MIN: f64 = 0.04;
pub const DEFAULT_CALIBRATION_SPAN_MAX: f64 = 0.2;

/// Normalized input band the direct-mapping modes stretch to full screen
pub const DIRECT_REMAP_MIN: f64 = 0.2;
pub const DIRECT_REMAP_MAX: f64 = 0.8;

/// Normalized input bands for the front mode
pub const FRONT_REMAP_X_MIN: f64 = 0.1;
pub const FRONT_REMAP_X_MAX: f64 = 0.9;
pub const FRONT_REMAP_Y_MIN: f64 = 0.2;
pub const FRONT_REMAP_Y_MAX: f64 = 0.8;

/// Numeric precision epsilon for configuration validation
pub const EPSILON: f64 = 1e-10;

/// Smallest depth delta for which an angle proxy is still defined
pub const DEPTH_EPSILON: f64 = 1e-6;
