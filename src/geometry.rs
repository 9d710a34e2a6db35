//! Angle helpers on image-space keypoints.

use crate::constants::DEFAULT_VERTICAL_ANGLE;
use crate::pose::{Keypoint, KeypointName, PoseFrame};

/// Absolute angular distance between two angles, in `[0, π]`.
///
/// Computed as `|atan2(sin(a − b), cos(a − b))|` so it is continuous across
/// the −π/π wrap.
pub fn angle_diff(a: f64, b: f64) -> f64 {
    let diff = a - b;
    diff.sin().atan2(diff.cos()).abs()
}

/// Image-space direction of a leg, measured from hip to ankle
pub fn limb_angle(hip: &Keypoint, ankle: &Keypoint) -> f64 {
    (ankle.y - hip.y).atan2(ankle.x - hip.x)
}

/// The subject's "down" axis for this frame.
///
/// Direction from the nose to the hip midpoint. Falls back to straight down
/// (π/2) unless the nose and both hips are usable at `threshold`.
pub fn vertical_reference(frame: &PoseFrame, threshold: f64) -> f64 {
    let (Some(nose), Some(left_hip), Some(right_hip)) = (
        frame.usable(KeypointName::Nose, threshold),
        frame.usable(KeypointName::LeftHip, threshold),
        frame.usable(KeypointName::RightHip, threshold),
    ) else {
        return DEFAULT_VERTICAL_ANGLE;
    };

    let mid_x = (left_hip.x + right_hip.x) / 2.0;
    let mid_y = (left_hip.y + right_hip.y) / 2.0;
    (mid_y - nose.y).atan2(mid_x - nose.x)
}
