//! Main application module: one cursor-control session.
//!
//! A session owns the pipeline state and the sink for one hand. External
//! code drives it once per displayed video frame; only the most recent
//! frame is ever processed, so a slow sink causes dropped frames rather
//! than a backlog.

use crate::{
    config::Config,
    cursor_control::PointerSink,
    landmarks::{DetectionFrame, HandLandmarks},
    pipeline::{PointerPipeline, PointerUpdate},
    Error, Result,
};
use log::{info, warn};
use serde::Deserialize;
use std::io::BufRead;
use std::time::Instant;

/// How often to report throughput, in processed frames
const STATS_INTERVAL: u64 = 120;

/// One detector frame as serialized on the wire
///
/// `{"timestamp_ms": 123.4, "hands": [[[x, y, z], ...21 points], ...]}`
#[derive(Debug, Deserialize)]
struct WireFrame {
    timestamp_ms: f64,
    #[serde(default)]
    hands: Vec<Vec<[f64; 3]>>,
}

impl TryFrom<WireFrame> for DetectionFrame {
    type Error = Error;

    fn try_from(wire: WireFrame) -> Result<Self> {
        let hands = wire
            .hands
            .iter()
            .map(|points| HandLandmarks::from_points(points))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            hands,
            timestamp_ms: wire.timestamp_ms,
        })
    }
}

/// One cursor-control session
pub struct HandCursorApp {
    pipeline: PointerPipeline,
    sink: Box<dyn PointerSink>,
    cursor_enabled: bool,
    frames_processed: u64,
    frames_skipped: u64,
}

impl HandCursorApp {
    /// Create a session for the given configuration and sink
    ///
    /// # Errors
    ///
    /// Returns an error for any invalid configuration.
    pub fn new(config: &Config, sink: Box<dyn PointerSink>) -> Result<Self> {
        info!("Initializing hand cursor session in {} mode", config.mode);
        Ok(Self {
            pipeline: PointerPipeline::new(config)?,
            sink,
            cursor_enabled: config.cursor.enabled,
            frames_processed: 0,
            frames_skipped: 0,
        })
    }

    /// Enable or disable cursor delivery
    ///
    /// The pipeline keeps running while disabled so re-enabling resumes
    /// from warm filter state.
    pub fn set_cursor_enabled(&mut self, enabled: bool) {
        if enabled != self.cursor_enabled {
            info!("Cursor delivery {}", if enabled { "enabled" } else { "disabled" });
        }
        self.cursor_enabled = enabled;
    }

    /// Whether updates are currently delivered to the sink
    #[must_use]
    pub fn cursor_enabled(&self) -> bool {
        self.cursor_enabled
    }

    /// Process one detector frame and deliver the update, if any
    ///
    /// # Errors
    ///
    /// Returns an error only when sink delivery fails.
    pub fn process_frame(&mut self, frame: &DetectionFrame) -> Result<Option<PointerUpdate>> {
        let Some(update) = self.pipeline.process(frame) else {
            self.frames_skipped += 1;
            return Ok(None);
        };
        self.frames_processed += 1;

        if self.cursor_enabled {
            self.sink.deliver(&update)?;
        }
        Ok(Some(update))
    }

    /// Drive the session from newline-delimited JSON frames
    ///
    /// Malformed lines are logged and skipped; the session keeps running
    /// until the reader is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error when reading fails or sink delivery fails.
    pub fn run<R: BufRead>(&mut self, reader: R) -> Result<()> {
        info!("Starting frame loop");
        let start_time = Instant::now();
        let mut last_report = 0;

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let wire: WireFrame = match serde_json::from_str(&line) {
                Ok(wire) => wire,
                Err(e) => {
                    warn!("Skipping malformed frame: {e}");
                    continue;
                }
            };
            let frame = match DetectionFrame::try_from(wire) {
                Ok(frame) => frame,
                Err(e) => {
                    warn!("Skipping invalid frame: {e}");
                    continue;
                }
            };

            self.process_frame(&frame)?;

            if self.frames_processed >= last_report + STATS_INTERVAL {
                last_report = self.frames_processed;
                let elapsed = start_time.elapsed().as_secs_f64();
                info!(
                    "Processed {} frames ({} without a hand), {:.1} fps",
                    self.frames_processed,
                    self.frames_skipped,
                    self.frames_processed as f64 / elapsed.max(f64::EPSILON)
                );
            }
        }

        info!(
            "Frame loop finished: {} processed, {} skipped",
            self.frames_processed, self.frames_skipped
        );
        Ok(())
    }

    /// Frames that produced an update and frames skipped for lack of a hand
    #[must_use]
    pub fn stats(&self) -> (u64, u64) {
        (self.frames_processed, self.frames_skipped)
    }
}
