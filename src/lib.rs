//! Hand cursor control library for driving a pointing device from hand
//! landmarks.
//!
//! This library converts a stream of hand-landmark observations from an
//! external vision model into stabilized screen-pixel pointer coordinates
//! and a debounced pinch/click signal. The per-frame pipeline consists of:
//! 1. Geometric feature extraction (distances, pinch metric, tilt proxies)
//! 2. Adaptive one-euro smoothing of noisy scalar channels
//! 3. Drift-resistant angle locking with a pinch-aware freeze
//! 4. Range calibration/remapping onto the screen
//! 5. Majority-vote debouncing of the pinch gesture
//!
//! Detection, video capture and rendering are external collaborators;
//! this crate consumes their output at the landmark-frame boundary and
//! hands its result to a pluggable pointer sink.
//!
//! # Examples
//!
//! ## Basic usage
//!
//! ```
//! use hand_cursor_control::{
//!     config::Config,
//!     landmarks::DetectionFrame,
//!     pipeline::{GeometryMode, PointerPipeline},
//! };
//!
//! # fn main() -> hand_cursor_control::Result<()> {
//! let config = Config::for_mode(GeometryMode::Down);
//! let mut pipeline = PointerPipeline::new(&config)?;
//!
//! // One call per displayed video frame; frames without a hand emit
//! // nothing and leave all state untouched
//! let frame = DetectionFrame::empty(16.7);
//! assert!(pipeline.process(&frame).is_none());
//! # Ok(())
//! # }
//! ```
//!
//! ## Driving a session from detector output
//!
//! ```no_run
//! use hand_cursor_control::{
//!     app::HandCursorApp, config::Config, cursor_control::LogSink,
//! };
//! use std::io::BufReader;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::from_file("config.yaml")?;
//! let mut app = HandCursorApp::new(&config, Box::new(LogSink))?;
//! app.run(BufReader::new(std::io::stdin()))?;
//! # Ok(())
//! # }
//! ```

/// Hand landmark frame types
pub mod landmarks;

/// Geometric feature extraction from landmark frames
pub mod geometry;

/// Signal filtering algorithms for smoothing pointer coordinates
pub mod filters;

/// Hysteresis gate for tilt angle proxies
pub mod angle_lock;

/// Affine range remapping with saturation
pub mod range_map;

/// Temporal debouncing of the pinch gesture
pub mod pinch;

/// Per-frame pointer pipeline and geometry modes
pub mod pipeline;

/// Pointer injection sinks (X11 and logging)
pub mod cursor_control;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

/// Safe numeric conversion helpers
pub mod utils;

pub use error::{Error, Result};
