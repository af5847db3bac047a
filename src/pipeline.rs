//! Per-frame pointer pipeline.
//!
//! One `PointerPipeline` owns all state needed to turn a stream of
//! landmark frames into pointer updates: per-axis smoothing filters,
//! angle locks, the pinch debouncer and the mode-specific geometry
//! parameters. Modes are mutually exclusive configurations selected at
//! construction, not runtime-transitioning states; all near-duplicate
//! per-mode logic is expressed through one parameterized frame step.

use crate::{
    angle_lock::AngleLock,
    config::Config,
    constants::{
        DEPTH_EPSILON, DIRECT_REMAP_MAX, DIRECT_REMAP_MIN, FRONT_REMAP_X_MAX, FRONT_REMAP_X_MIN,
        FRONT_REMAP_Y_MAX, FRONT_REMAP_Y_MIN,
    },
    filters::{create_filter, ScalarFilter},
    geometry::{self, PinchPoints},
    landmarks::{DetectionFrame, HandLandmark},
    pinch::PinchDebouncer,
    range_map::RangeMap,
    utils, Error, Result,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Supported camera-facing orientations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GeometryMode {
    /// Camera faces the user; thumb orientation steers a tilt-compensated
    /// pointer anchored at the thumb MCP
    Normal,
    /// Camera looks down at the desk; thumb tip maps directly to the screen
    TopDown,
    /// Camera faces the user; middle finger orientation steers a locked,
    /// tilt-compensated pointer anchored at the middle MCP
    #[default]
    Front,
    /// Camera looks down; thumb tip maps directly with adaptive smoothing
    Down,
}

impl FromStr for GeometryMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "topdown" | "top_down" => Ok(Self::TopDown),
            "front" => Ok(Self::Front),
            "down" => Ok(Self::Down),
            other => Err(Error::ConfigError(format!("Unknown geometry mode: {other}"))),
        }
    }
}

impl fmt::Display for GeometryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Normal => "normal",
            Self::TopDown => "topdown",
            Self::Front => "front",
            Self::Down => "down",
        };
        write!(f, "{name}")
    }
}

/// Pipeline output for one processed frame: screen-pixel coordinates and
/// the debounced pinch flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerUpdate {
    pub x: i32,
    pub y: i32,
    pub pinch: bool,
}

/// How hand-to-camera depth is estimated from the calibration distance
#[derive(Debug, Clone)]
enum DepthCalibration {
    /// Depth units derived from the ratio of a reference span to the
    /// observed span, floored at zero
    FixedUnit { reference_distance: f64, scale: f64 },
    /// Observed span remapped onto the unit interval and inverted
    /// (larger span means the hand is closer to the camera)
    Span { map: RangeMap },
}

/// Tilt compensation parameters of a mode
#[derive(Debug, Clone)]
struct TiltSettings {
    /// Delta endpoint; the angle proxies come from anchor - reference
    reference: HandLandmark,
    /// Landmark pair whose distance estimates depth
    depth_pair: (HandLandmark, HandLandmark),
    depth: DepthCalibration,
    angle_gain: f64,
    y_offset: f64,
    /// Whether the angle proxies run through the adaptive filter and the
    /// pinch-aware hysteresis lock
    locked: bool,
}

/// Mode-configuration record driving the parameterized orchestrator
#[derive(Debug, Clone)]
struct ModeSettings {
    anchor: HandLandmark,
    mirror_x: bool,
    mirror_y: bool,
    remap_x: RangeMap,
    remap_y: RangeMap,
    pinch_points: PinchPoints,
    tilt: Option<TiltSettings>,
}

impl ModeSettings {
    fn for_mode(mode: GeometryMode, config: &Config) -> Result<Self> {
        let calibration = &config.calibration;
        let unit = RangeMap::new(0.0, 1.0, 0.0, 1.0)?;
        let direct = RangeMap::new(DIRECT_REMAP_MIN, DIRECT_REMAP_MAX, 0.0, 1.0)?;

        let settings = match mode {
            GeometryMode::Normal => Self {
                anchor: HandLandmark::ThumbMcp,
                mirror_x: true,
                mirror_y: false,
                remap_x: unit,
                remap_y: unit,
                pinch_points: PinchPoints::default(),
                tilt: Some(TiltSettings {
                    reference: HandLandmark::ThumbTip,
                    depth_pair: (HandLandmark::ThumbMcp, HandLandmark::ThumbCmc),
                    depth: DepthCalibration::FixedUnit {
                        reference_distance: calibration.reference_distance,
                        scale: calibration.depth_scale,
                    },
                    angle_gain: 1.0,
                    y_offset: 0.0,
                    locked: false,
                }),
            },
            GeometryMode::TopDown => Self {
                anchor: HandLandmark::ThumbTip,
                mirror_x: true,
                mirror_y: true,
                remap_x: direct,
                remap_y: direct,
                pinch_points: PinchPoints::default(),
                tilt: None,
            },
            GeometryMode::Front => Self {
                anchor: HandLandmark::MiddleMcp,
                mirror_x: true,
                mirror_y: false,
                remap_x: RangeMap::new(FRONT_REMAP_X_MIN, FRONT_REMAP_X_MAX, 0.0, 1.0)?,
                remap_y: RangeMap::new(FRONT_REMAP_Y_MIN, FRONT_REMAP_Y_MAX, 0.0, 1.0)?,
                pinch_points: PinchPoints::default(),
                tilt: Some(TiltSettings {
                    reference: HandLandmark::MiddlePip,
                    depth_pair: (HandLandmark::MiddlePip, HandLandmark::MiddleMcp),
                    depth: DepthCalibration::Span {
                        map: RangeMap::new(calibration.span_min, calibration.span_max, 0.0, 1.0)?,
                    },
                    angle_gain: calibration.angle_gain,
                    y_offset: calibration.y_offset,
                    locked: true,
                }),
            },
            GeometryMode::Down => Self {
                anchor: HandLandmark::ThumbTip,
                mirror_x: true,
                mirror_y: true,
                remap_x: direct,
                remap_y: direct,
                pinch_points: PinchPoints::default(),
                tilt: None,
            },
        };
        Ok(settings)
    }
}

/// Mutable tilt-stage state, owned by one pipeline instance
struct TiltState {
    filters: Option<(Box<dyn ScalarFilter>, Box<dyn ScalarFilter>)>,
    locks: Option<(AngleLock, AngleLock)>,
    last_xz: f64,
    last_yz: f64,
    last_depth: f64,
}

/// Per-session pointer pipeline
pub struct PointerPipeline {
    settings: ModeSettings,
    filter_x: Box<dyn ScalarFilter>,
    filter_y: Box<dyn ScalarFilter>,
    tilt: Option<TiltState>,
    debouncer: PinchDebouncer,
    pinch_threshold: f64,
    near_pinch_margin: f64,
    last_raw_pinch: bool,
    screen_width: f64,
    screen_height: f64,
    max_x: i32,
    max_y: i32,
}

impl PointerPipeline {
    /// Build a pipeline for the configured mode
    ///
    /// # Errors
    ///
    /// Returns `ConfigError`/`FilterError` for any invalid configuration;
    /// per-frame processing never fails after construction succeeds.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let settings = ModeSettings::for_mode(config.mode, config)?;

        let tilt = match &settings.tilt {
            Some(tilt_settings) => {
                let (filters, locks) = if tilt_settings.locked {
                    let filters = (
                        create_filter(&config.angle_smoothing)?,
                        create_filter(&config.angle_smoothing)?,
                    );
                    let locks = (
                        AngleLock::new(config.angle_lock.threshold, config.angle_lock.cooldown_frames),
                        AngleLock::new(config.angle_lock.threshold, config.angle_lock.cooldown_frames),
                    );
                    (Some(filters), Some(locks))
                } else {
                    (None, None)
                };
                Some(TiltState {
                    filters,
                    locks,
                    last_xz: 0.0,
                    last_yz: 0.0,
                    last_depth: 0.0,
                })
            }
            None => None,
        };

        Ok(Self {
            settings,
            filter_x: create_filter(&config.pointer_smoothing)?,
            filter_y: create_filter(&config.pointer_smoothing)?,
            tilt,
            debouncer: PinchDebouncer::new(config.pinch.window, config.pinch.tolerance)?,
            pinch_threshold: config.pinch.threshold,
            near_pinch_margin: config.angle_lock.near_pinch_margin,
            last_raw_pinch: false,
            screen_width: f64::from(config.screen.width),
            screen_height: f64::from(config.screen.height),
            max_x: utils::u32_to_i32(config.screen.width.saturating_sub(1))?,
            max_y: utils::u32_to_i32(config.screen.height.saturating_sub(1))?,
        })
    }

    /// Process one detector frame into at most one pointer update
    ///
    /// A frame with zero hands yields `None` and leaves every piece of
    /// filter, lock and debounce state untouched.
    pub fn process(&mut self, frame: &DetectionFrame) -> Option<PointerUpdate> {
        let hand = frame.primary_hand()?;
        let timestamp_ms = frame.timestamp_ms;

        // Instantaneous pinch estimate; a degenerate metric keeps the
        // previous estimate rather than guessing
        let metric = geometry::pinch_metric(hand, &self.settings.pinch_points);
        let raw_pinch = metric.map_or(self.last_raw_pinch, |m| m <= self.pinch_threshold);
        self.last_raw_pinch = raw_pinch;
        let pinch = self.debouncer.push(raw_pinch);

        let anchor = hand.point(self.settings.anchor);
        let mut raw_x = if self.settings.mirror_x { 1.0 - anchor.x } else { anchor.x };
        let mut raw_y = if self.settings.mirror_y { 1.0 - anchor.y } else { anchor.y };

        if let (Some(tilt_settings), Some(state)) = (&self.settings.tilt, &mut self.tilt) {
            let span = geometry::calibration_distance(
                hand,
                tilt_settings.depth_pair.0,
                tilt_settings.depth_pair.1,
            );
            let depth = match &tilt_settings.depth {
                DepthCalibration::FixedUnit {
                    reference_distance,
                    scale,
                } => {
                    if span < DEPTH_EPSILON {
                        state.last_depth
                    } else {
                        (reference_distance / span - reference_distance).max(0.0) / scale
                    }
                }
                DepthCalibration::Span { map } => 1.0 - map.map(span),
            };
            state.last_depth = depth;

            let proxies = geometry::angle_proxies(hand, self.settings.anchor, tilt_settings.reference);
            let (angle_xz, angle_yz) = match proxies {
                Some((xz, yz)) => {
                    let (xz, yz) = match &mut state.filters {
                        Some((fx, fy)) => (fx.filter(xz, timestamp_ms), fy.filter(yz, timestamp_ms)),
                        None => (xz, yz),
                    };
                    match &mut state.locks {
                        Some((lx, ly)) => {
                            // The closing fingers of a pinch read as tilt;
                            // freeze the lock while the metric is near the
                            // threshold and the click is not yet confirmed
                            let freeze = !pinch
                                && metric
                                    .map_or(false, |m| m < self.pinch_threshold + self.near_pinch_margin);
                            (lx.update_gated(xz, freeze), ly.update_gated(yz, freeze))
                        }
                        None => (xz, yz),
                    }
                }
                // Angle proxy undefined this frame: substitute the
                // previously accepted angles
                None => (state.last_xz, state.last_yz),
            };
            state.last_xz = angle_xz;
            state.last_yz = angle_yz;

            raw_x += depth * angle_xz * tilt_settings.angle_gain;
            raw_y -= depth * angle_yz * tilt_settings.angle_gain + tilt_settings.y_offset;
        }

        let norm_x = self.settings.remap_x.map(raw_x);
        let norm_y = self.settings.remap_y.map(raw_y);

        let smooth_x = self.filter_x.filter(norm_x, timestamp_ms);
        let smooth_y = self.filter_y.filter(norm_y, timestamp_ms);

        let update = PointerUpdate {
            x: utils::f64_to_i32_clamp(smooth_x * self.screen_width, 0, self.max_x),
            y: utils::f64_to_i32_clamp(smooth_y * self.screen_height, 0, self.max_y),
            pinch,
        };
        debug!(
            "frame t={timestamp_ms:.1}ms pointer=({}, {}) pinch={} metric={:?}",
            update.x, update.y, update.pinch, metric
        );
        Some(update)
    }

    /// Drop all temporal state, as if no frame had been processed yet
    pub fn reset(&mut self) {
        self.filter_x.reset();
        self.filter_y.reset();
        self.debouncer.reset();
        self.last_raw_pinch = false;
        if let Some(state) = &mut self.tilt {
            if let Some((fx, fy)) = &mut state.filters {
                fx.reset();
                fy.reset();
            }
            if let Some((lx, ly)) = &mut state.locks {
                lx.reset();
                ly.reset();
            }
            state.last_xz = 0.0;
            state.last_yz = 0.0;
            state.last_depth = 0.0;
        }
    }
}
