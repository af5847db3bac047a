//! Geometric feature extraction from landmark frames.
//!
//! Pure functions deriving the scalar distances, delta vectors and ratios
//! the pointer pipeline consumes. Denominators near zero are reported as
//! `None` instead of propagating a non-finite value; callers substitute
//! the previous accepted value in that case.

use crate::{
    constants::DEPTH_EPSILON,
    landmarks::{HandLandmark, HandLandmarks},
};
use nalgebra::{Point3, Vector3};

/// Landmark quadruple defining the pinch metric
#[derive(Debug, Clone, Copy)]
pub struct PinchPoints {
    /// First fingertip (commonly the thumb tip)
    pub tip_a: HandLandmark,
    /// Second fingertip (commonly the index tip)
    pub tip_b: HandLandmark,
    /// Joint adjacent to `tip_a`
    pub joint_a: HandLandmark,
    /// Joint adjacent to `tip_b`
    pub joint_b: HandLandmark,
}

impl Default for PinchPoints {
    fn default() -> Self {
        Self {
            tip_a: HandLandmark::ThumbTip,
            tip_b: HandLandmark::IndexTip,
            joint_a: HandLandmark::ThumbIp,
            joint_b: HandLandmark::IndexDip,
        }
    }
}

/// 3-D Euclidean distance between two points
#[must_use]
pub fn euclidean_distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (a - b).norm()
}

/// Per-axis difference `a - b` between two landmarks
#[must_use]
pub fn delta_vector(hand: &HandLandmarks, a: HandLandmark, b: HandLandmark) -> Vector3<f64> {
    hand.point(a) - hand.point(b)
}

/// Distance between two designated landmarks, used downstream to estimate
/// hand-to-camera depth
#[must_use]
pub fn calibration_distance(hand: &HandLandmarks, a: HandLandmark, b: HandLandmark) -> f64 {
    euclidean_distance(hand.point(a), hand.point(b))
}

/// Dimensionless pinch metric: fingertip gap normalized by the fingers'
/// own joint lengths, roughly scale-invariant to hand distance
///
/// Returns `None` when the joint lengths vanish (degenerate geometry).
#[must_use]
pub fn pinch_metric(hand: &HandLandmarks, points: &PinchPoints) -> Option<f64> {
    let gap = euclidean_distance(hand.point(points.tip_a), hand.point(points.tip_b));
    let len_a = euclidean_distance(hand.point(points.tip_a), hand.point(points.joint_a));
    let len_b = euclidean_distance(hand.point(points.tip_b), hand.point(points.joint_b));

    let scale = 0.5 * (len_a + len_b);
    if scale < DEPTH_EPSILON {
        return None;
    }
    Some(10.0 * gap / scale)
}

/// Tilt angle proxies `(dx/dz, dy/dz)` from the delta between two landmarks
///
/// The ratio stands in for the tilt angle; display code applies `atan`.
/// Returns `None` when the depth delta is within epsilon of zero, where
/// the proxy is undefined; callers substitute the previous locked angle.
#[must_use]
pub fn angle_proxies(
    hand: &HandLandmarks,
    anchor: HandLandmark,
    reference: HandLandmark,
) -> Option<(f64, f64)> {
    let delta = delta_vector(hand, anchor, reference);
    if delta.z.abs() < DEPTH_EPSILON {
        return None;
    }
    Some((delta.x / delta.z, delta.y / delta.z))
}
