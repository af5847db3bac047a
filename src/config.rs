//! Configuration management for the hand cursor control application

use crate::{
    constants::{
        DEFAULT_ANGLE_GAIN, DEFAULT_ANGLE_LOCK_THRESHOLD, DEFAULT_AXIS_Y_OFFSET,
        DEFAULT_CALIBRATION_REFERENCE, DEFAULT_CALIBRATION_SPAN_MAX, DEFAULT_CALIBRATION_SPAN_MIN,
        DEFAULT_DEPTH_SCALE, DEFAULT_DERIVATIVE_CUTOFF, DEFAULT_MIN_CUTOFF,
        DEFAULT_MOVING_AVERAGE_WINDOW, DEFAULT_NEAR_PINCH_MARGIN, DEFAULT_PINCH_COOLDOWN_FRAMES,
        DEFAULT_PINCH_THRESHOLD, DEFAULT_PINCH_TOLERANCE, DEFAULT_SAMPLE_RATE_HZ, DOWN_BETA,
        DOWN_PINCH_THRESHOLD, DOWN_PINCH_WINDOW, EPSILON, FRONT_BETA, FRONT_PINCH_WINDOW,
        NORMAL_PINCH_WINDOW,
    },
    pipeline::GeometryMode,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration, static for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Geometry mode (camera-facing orientation)
    pub mode: GeometryMode,

    /// Screen the normalized pointer is scaled into
    pub screen: ScreenConfig,

    /// Smoothing applied to each pointer axis
    pub pointer_smoothing: SmoothingConfig,

    /// Smoothing applied to each tilt angle proxy
    pub angle_smoothing: SmoothingConfig,

    /// Pinch detection and debouncing
    pub pinch: PinchConfig,

    /// Angle lock hysteresis and pinch freeze
    pub angle_lock: AngleLockConfig,

    /// Depth calibration and tilt constants
    pub calibration: CalibrationConfig,

    /// Cursor delivery configuration
    pub cursor: CursorConfig,
}

/// Target screen dimensions in pixels
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
}

/// Per-channel smoothing filter parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Filter kind: "one_euro", "moving_average" or "none"
    pub kind: String,

    /// Moving average window size
    pub window: usize,

    /// Nominal sampling frequency (camera fps)
    pub sample_rate_hz: f64,

    /// One-euro low-speed cutoff; lower to reduce jitter
    pub min_cutoff: f64,

    /// One-euro speed coefficient; raise to reduce lag
    pub beta: f64,

    /// One-euro cutoff for the internal speed estimate
    pub derivative_cutoff: f64,
}

/// Pinch gesture parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PinchConfig {
    /// Pinch metric value at or below which fingers count as pinched
    pub threshold: f64,

    /// Debounce window size in frames
    pub window: usize,

    /// Fraction of the window that must agree for a pinch
    pub tolerance: f64,
}

/// Angle lock parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AngleLockConfig {
    /// Minimum angle-proxy change accepted by the hysteresis gate
    pub threshold: f64,

    /// Frames the lock stays frozen after a pinch releases
    pub cooldown_frames: u32,

    /// Pinch-metric margin above the threshold that already freezes the
    /// lock, so the closing fingers are not read as tilt
    pub near_pinch_margin: f64,
}

/// Depth calibration and tilt composition constants
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Reference inter-landmark span for fixed-unit depth estimation
    pub reference_distance: f64,

    /// Divisor turning the fixed-unit estimate into screen units
    pub depth_scale: f64,

    /// Smallest expected calibration span (hand far from the camera)
    pub span_min: f64,

    /// Largest expected calibration span (hand closest to the camera)
    pub span_max: f64,

    /// Gain applied to the tilt contribution
    pub angle_gain: f64,

    /// Constant vertical offset subtracted before remapping
    pub y_offset: f64,
}

/// Cursor delivery configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CursorConfig {
    /// Deliver pointer updates to the sink (toggleable at runtime)
    pub enabled: bool,

    /// Log updates instead of moving the real cursor
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: GeometryMode::Front,
            screen: ScreenConfig::default(),
            pointer_smoothing: SmoothingConfig::default(),
            angle_smoothing: SmoothingConfig::default(),
            pinch: PinchConfig::default(),
            angle_lock: AngleLockConfig::default(),
            calibration: CalibrationConfig::default(),
            cursor: CursorConfig::default(),
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            kind: "one_euro".to_string(),
            window: DEFAULT_MOVING_AVERAGE_WINDOW,
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            min_cutoff: DEFAULT_MIN_CUTOFF,
            beta: FRONT_BETA,
            derivative_cutoff: DEFAULT_DERIVATIVE_CUTOFF,
        }
    }
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_PINCH_THRESHOLD,
            window: FRONT_PINCH_WINDOW,
            tolerance: DEFAULT_PINCH_TOLERANCE,
        }
    }
}

impl Default for AngleLockConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_ANGLE_LOCK_THRESHOLD,
            cooldown_frames: DEFAULT_PINCH_COOLDOWN_FRAMES,
            near_pinch_margin: DEFAULT_NEAR_PINCH_MARGIN,
        }
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            reference_distance: DEFAULT_CALIBRATION_REFERENCE,
            depth_scale: DEFAULT_DEPTH_SCALE,
            span_min: DEFAULT_CALIBRATION_SPAN_MIN,
            span_max: DEFAULT_CALIBRATION_SPAN_MAX,
            angle_gain: DEFAULT_ANGLE_GAIN,
            y_offset: DEFAULT_AXIS_Y_OFFSET,
        }
    }
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dry_run: false,
        }
    }
}

impl Config {
    /// Default configuration for a geometry mode
    ///
    /// Each mode carries its own smoothing and pinch tunings; the other
    /// sections keep the global defaults.
    #[must_use]
    pub fn for_mode(mode: GeometryMode) -> Self {
        let mut config = Self {
            mode,
            ..Self::default()
        };
        match mode {
            GeometryMode::Normal | GeometryMode::TopDown => {
                config.pointer_smoothing.kind = "moving_average".to_string();
                config.pinch.window = NORMAL_PINCH_WINDOW;
            }
            GeometryMode::Front => {
                config.pointer_smoothing.beta = FRONT_BETA;
                config.pinch.window = FRONT_PINCH_WINDOW;
            }
            GeometryMode::Down => {
                config.pointer_smoothing.beta = DOWN_BETA;
                config.pinch.threshold = DOWN_PINCH_THRESHOLD;
                config.pinch.window = DOWN_PINCH_WINDOW;
            }
        }
        config
    }

    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or writing fails.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    ///
    /// Everything a frame-processing step would otherwise have to guard
    /// against is rejected here, before any frame is processed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` describing the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        if self.screen.width == 0 || self.screen.height == 0 {
            return Err(Error::ConfigError(
                "Screen dimensions must be greater than 0".to_string(),
            ));
        }

        for smoothing in [&self.pointer_smoothing, &self.angle_smoothing] {
            validate_smoothing(smoothing)?;
        }

        if self.pinch.threshold <= 0.0 {
            return Err(Error::ConfigError(
                "Pinch threshold must be greater than 0".to_string(),
            ));
        }
        if self.pinch.window == 0 {
            return Err(Error::ConfigError(
                "Pinch debounce window must be greater than 0".to_string(),
            ));
        }
        if !(self.pinch.tolerance > 0.0 && self.pinch.tolerance <= 1.0) {
            return Err(Error::ConfigError(
                "Pinch vote fraction must be in (0, 1]".to_string(),
            ));
        }

        if self.angle_lock.threshold <= 0.0 {
            return Err(Error::ConfigError(
                "Angle lock threshold must be greater than 0".to_string(),
            ));
        }
        if self.angle_lock.near_pinch_margin < 0.0 {
            return Err(Error::ConfigError(
                "Near-pinch margin must not be negative".to_string(),
            ));
        }

        if self.calibration.reference_distance <= 0.0 {
            return Err(Error::ConfigError(
                "Calibration reference distance must be greater than 0".to_string(),
            ));
        }
        if self.calibration.depth_scale <= 0.0 {
            return Err(Error::ConfigError(
                "Depth scale must be greater than 0".to_string(),
            ));
        }
        if (self.calibration.span_max - self.calibration.span_min).abs() < EPSILON
            || self.calibration.span_max < self.calibration.span_min
        {
            return Err(Error::ConfigError(format!(
                "Calibration span must be a non-degenerate ordered range, got {}..{}",
                self.calibration.span_min, self.calibration.span_max
            )));
        }

        Ok(())
    }
}

fn validate_smoothing(config: &SmoothingConfig) -> Result<()> {
    if config.sample_rate_hz <= 0.0 {
        return Err(Error::ConfigError(
            "Sample rate must be greater than 0".to_string(),
        ));
    }
    if config.min_cutoff <= 0.0 || config.derivative_cutoff <= 0.0 {
        return Err(Error::ConfigError(
            "Cutoff frequencies must be greater than 0".to_string(),
        ));
    }
    if config.beta < 0.0 {
        return Err(Error::ConfigError("Beta must not be negative".to_string()));
    }
    if config.window == 0 {
        return Err(Error::ConfigError(
            "Moving average window must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Hand Cursor Control Configuration

# Geometry mode: normal, topdown, front, down
mode: front

# Screen the pointer is scaled into
screen:
  width: 1920
  height: 1080

# Smoothing for the pointer axes
pointer_smoothing:
  kind: "one_euro"
  window: 15
  sample_rate_hz: 60.0
  min_cutoff: 0.001
  beta: 0.1
  derivative_cutoff: 1.0

# Smoothing for the tilt angle proxies
angle_smoothing:
  kind: "one_euro"
  window: 15
  sample_rate_hz: 60.0
  min_cutoff: 0.001
  beta: 0.1
  derivative_cutoff: 1.0

# Pinch detection
pinch:
  threshold: 12.0
  window: 11
  tolerance: 0.5

# Angle lock
angle_lock:
  threshold: 0.03
  cooldown_frames: 15
  near_pinch_margin: 3.0

# Depth calibration
calibration:
  reference_distance: 0.15
  depth_scale: 20.0
  span_min: 0.04
  span_max: 0.2
  angle_gain: 0.3
  y_offset: 0.1

# Cursor delivery
cursor:
  enabled: true
  dry_run: false
"#;
