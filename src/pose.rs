//! Pose frame data model.
//!
//! A [`PoseFrame`] is one instant of named, scored 2D keypoints as produced
//! by an external pose estimator. Keypoints are indexed by name, at most one
//! per name, and any name may be absent.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Anatomical keypoint vocabulary (COCO 17-point body model)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeypointName {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl KeypointName {
    /// Every name in the vocabulary, in model index order
    pub const ALL: [KeypointName; 17] = [
        KeypointName::Nose,
        KeypointName::LeftEye,
        KeypointName::RightEye,
        KeypointName::LeftEar,
        KeypointName::RightEar,
        KeypointName::LeftShoulder,
        KeypointName::RightShoulder,
        KeypointName::LeftElbow,
        KeypointName::RightElbow,
        KeypointName::LeftWrist,
        KeypointName::RightWrist,
        KeypointName::LeftHip,
        KeypointName::RightHip,
        KeypointName::LeftKnee,
        KeypointName::RightKnee,
        KeypointName::LeftAnkle,
        KeypointName::RightAnkle,
    ];

    /// Wire name used by pose estimators (`snake_case`)
    pub fn as_str(&self) -> &'static str {
        match self {
            KeypointName::Nose => "nose",
            KeypointName::LeftEye => "left_eye",
            KeypointName::RightEye => "right_eye",
            KeypointName::LeftEar => "left_ear",
            KeypointName::RightEar => "right_ear",
            KeypointName::LeftShoulder => "left_shoulder",
            KeypointName::RightShoulder => "right_shoulder",
            KeypointName::LeftElbow => "left_elbow",
            KeypointName::RightElbow => "right_elbow",
            KeypointName::LeftWrist => "left_wrist",
            KeypointName::RightWrist => "right_wrist",
            KeypointName::LeftHip => "left_hip",
            KeypointName::RightHip => "right_hip",
            KeypointName::LeftKnee => "left_knee",
            KeypointName::RightKnee => "right_knee",
            KeypointName::LeftAnkle => "left_ankle",
            KeypointName::RightAnkle => "right_ankle",
        }
    }
}

impl fmt::Display for KeypointName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeypointName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        KeypointName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown keypoint name: {s}")))
    }
}

/// A single detected body keypoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint {
    /// Which landmark this is
    pub name: KeypointName,
    /// Horizontal image coordinate
    pub x: f64,
    /// Vertical image coordinate (grows downwards)
    pub y: f64,
    /// Detection confidence in [0, 1]
    pub score: f64,
}

impl Keypoint {
    #[must_use]
    pub fn new(name: KeypointName, x: f64, y: f64, score: f64) -> Self {
        Self { name, x, y, score }
    }

    /// Whether this keypoint carries a usable signal.
    ///
    /// Requires `score >= threshold` and finite coordinates.
    pub fn is_usable(&self, threshold: f64) -> bool {
        self.score >= threshold && self.x.is_finite() && self.y.is_finite()
    }
}

/// All keypoints observed at one instant
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoseFrame {
    /// Capture time in milliseconds on the session clock
    pub timestamp_ms: u64,
    keypoints: BTreeMap<KeypointName, Keypoint>,
}

impl PoseFrame {
    /// Create an empty frame
    #[must_use]
    pub fn new(timestamp_ms: u64) -> Self {
        Self {
            timestamp_ms,
            keypoints: BTreeMap::new(),
        }
    }

    /// Build a frame from keypoints.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the same name appears twice
    pub fn from_keypoints<I>(timestamp_ms: u64, keypoints: I) -> Result<Self>
    where
        I: IntoIterator<Item = Keypoint>,
    {
        let mut frame = Self::new(timestamp_ms);
        for keypoint in keypoints {
            frame.insert(keypoint)?;
        }
        Ok(frame)
    }

    /// Add a keypoint to the frame.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if a keypoint with this name is already present
    pub fn insert(&mut self, keypoint: Keypoint) -> Result<()> {
        if self.keypoints.contains_key(&keypoint.name) {
            return Err(Error::InvalidInput(format!(
                "Duplicate keypoint '{}' in frame at {} ms",
                keypoint.name, self.timestamp_ms
            )));
        }
        self.keypoints.insert(keypoint.name, keypoint);
        Ok(())
    }

    /// Look up a keypoint regardless of confidence
    pub fn get(&self, name: KeypointName) -> Option<&Keypoint> {
        self.keypoints.get(&name)
    }

    /// Look up a keypoint only if it is usable at `threshold`
    pub fn usable(&self, name: KeypointName, threshold: f64) -> Option<&Keypoint> {
        self.get(name).filter(|kp| kp.is_usable(threshold))
    }

    pub fn len(&self) -> usize {
        self.keypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }

    /// Keypoints in vocabulary order
    pub fn iter(&self) -> impl Iterator<Item = &Keypoint> {
        self.keypoints.values()
    }

    /// Decode a frame from one JSON object.
    ///
    /// Names outside the vocabulary are ignored.
    ///
    /// # Errors
    ///
    /// Returns `Json` on malformed input and `InvalidInput` on duplicate names
    pub fn from_json(line: &str) -> Result<Self> {
        let record: PoseFrameRecord = serde_json::from_str(line)?;
        Self::try_from(record)
    }

    /// Encode the frame as a single-line JSON object
    ///
    /// # Errors
    ///
    /// Returns `Json` if serialization fails
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&PoseFrameRecord::from(self))?)
    }
}

/// Serialized keypoint as emitted by pose estimators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeypointRecord {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub score: f64,
}

/// Serialized pose frame, one per line in replay files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseFrameRecord {
    pub timestamp_ms: u64,
    #[serde(default)]
    pub keypoints: Vec<KeypointRecord>,
}

impl TryFrom<PoseFrameRecord> for PoseFrame {
    type Error = Error;

    fn try_from(record: PoseFrameRecord) -> Result<Self> {
        let mut frame = PoseFrame::new(record.timestamp_ms);
        for kp in record.keypoints {
            match kp.name.parse::<KeypointName>() {
                Ok(name) => frame.insert(Keypoint::new(name, kp.x, kp.y, kp.score))?,
                Err(_) => log::trace!("Ignoring unknown keypoint '{}'", kp.name),
            }
        }
        Ok(frame)
    }
}

impl From<&PoseFrame> for PoseFrameRecord {
    fn from(frame: &PoseFrame) -> Self {
        Self {
            timestamp_ms: frame.timestamp_ms,
            keypoints: frame
                .iter()
                .map(|kp| KeypointRecord {
                    name: kp.name.as_str().to_string(),
                    x: kp.x,
                    y: kp.y,
                    score: kp.score,
                })
                .collect(),
        }
    }
}
