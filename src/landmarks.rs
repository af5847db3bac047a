//! Hand landmark frame types.
//!
//! A frame carries the detector output for one processed video frame:
//! zero or more hands, each an ordered set of 21 3-D points in normalized
//! coordinates, plus the capture timestamp in milliseconds.

use crate::{constants::NUM_HAND_LANDMARKS, Error, Result};
use nalgebra::Point3;

/// Named indices into the 21-point hand landmark model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum HandLandmark {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexMcp = 5,
    IndexPip = 6,
    IndexDip = 7,
    IndexTip = 8,
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,
    RingMcp = 13,
    RingPip = 14,
    RingDip = 15,
    RingTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

/// One tracked hand: 21 landmarks in normalized coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    points: [Point3<f64>; NUM_HAND_LANDMARKS],
}

impl HandLandmarks {
    /// Create from a full landmark array
    #[must_use]
    pub fn new(points: [Point3<f64>; NUM_HAND_LANDMARKS]) -> Self {
        Self { points }
    }

    /// Create from raw `[x, y, z]` triples as delivered by the detector
    ///
    /// # Errors
    ///
    /// Returns an error unless exactly 21 points are supplied.
    pub fn from_points(points: &[[f64; 3]]) -> Result<Self> {
        if points.len() != NUM_HAND_LANDMARKS {
            return Err(Error::FrameError(format!(
                "Expected {NUM_HAND_LANDMARKS} landmarks, got {}",
                points.len()
            )));
        }
        let mut out = [Point3::origin(); NUM_HAND_LANDMARKS];
        for (dst, src) in out.iter_mut().zip(points) {
            *dst = Point3::new(src[0], src[1], src[2]);
        }
        Ok(Self { points: out })
    }

    /// Access a landmark by its named index
    #[must_use]
    pub fn point(&self, landmark: HandLandmark) -> &Point3<f64> {
        &self.points[landmark as usize]
    }

    /// All 21 points in model order
    #[must_use]
    pub fn points(&self) -> &[Point3<f64>; NUM_HAND_LANDMARKS] {
        &self.points
    }
}

/// Detector output for one video frame
///
/// Absence of a hand is represented as an empty `hands` vector; the
/// pipeline emits nothing for such frames. Timestamps are monotonic
/// non-decreasing within a session.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionFrame {
    /// Zero or more tracked hands, detector order
    pub hands: Vec<HandLandmarks>,
    /// Capture timestamp in milliseconds
    pub timestamp_ms: f64,
}

impl DetectionFrame {
    /// Frame with a single hand
    #[must_use]
    pub fn single(hand: HandLandmarks, timestamp_ms: f64) -> Self {
        Self {
            hands: vec![hand],
            timestamp_ms,
        }
    }

    /// Frame with no hands
    #[must_use]
    pub fn empty(timestamp_ms: f64) -> Self {
        Self {
            hands: Vec::new(),
            timestamp_ms,
        }
    }

    /// The hand driving the pointer, if any
    #[must_use]
    pub fn primary_hand(&self) -> Option<&HandLandmarks> {
        self.hands.first()
    }
}
