//! Kick detection from a stream of 2D body keypoints.
//!
//! The detector consumes one [`pose::PoseFrame`] per captured frame and
//! emits a [`sink::KickEvent`] each time the left or right leg completes a
//! kick. Each leg runs its own state machine:
//! 1. Estimate the body's "down" axis from the nose and hip midpoint
//! 2. Measure the leg's angular deviation from that axis (hip to ankle)
//! 3. Track a rolling baseline of that deviation (the resting stance)
//! 4. Arm when the deviation rises well past baseline, fire once it drops
//!    20% below its peak, and re-arm only after returning near baseline
//! 5. Suppress further kicks for a cooldown period
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use kick_detection::{
//!     config::DetectionConfig,
//!     detector::KickDetector,
//!     pose::{Keypoint, KeypointName, PoseFrame},
//!     sink::KickEvent,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut detector = KickDetector::new(DetectionConfig::default())?;
//!
//! // Frames come from an external pose estimator
//! let frame = PoseFrame::from_keypoints(
//!     33,
//!     vec![
//!         Keypoint::new(KeypointName::Nose, 320.0, 80.0, 0.95),
//!         Keypoint::new(KeypointName::LeftHip, 300.0, 260.0, 0.9),
//!         Keypoint::new(KeypointName::RightHip, 340.0, 260.0, 0.9),
//!         Keypoint::new(KeypointName::LeftAnkle, 298.0, 450.0, 0.8),
//!         Keypoint::new(KeypointName::RightAnkle, 342.0, 450.0, 0.8),
//!     ],
//! )?;
//!
//! detector.process_frame(&frame, &mut |event: &KickEvent| {
//!     println!("{}", event.wire_label());
//! });
//! # Ok(())
//! # }
//! ```
//!
//! ## Forwarding Events to Another Thread
//!
//! ```no_run
//! use kick_detection::{detector::KickDetector, pose::PoseFrame, sink::ChannelSink};
//! use std::sync::mpsc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (tx, rx) = mpsc::channel();
//! let mut sink = ChannelSink::new(tx);
//! let mut detector = KickDetector::default();
//!
//! let frame = PoseFrame::from_json(r#"{"timestamp_ms": 0, "keypoints": []}"#)?;
//! detector.process_frame(&frame, &mut sink);
//!
//! for event in rx.try_iter() {
//!     println!("{:?} kick at {} ms", event.side, event.timestamp_ms);
//! }
//! # Ok(())
//! # }
//! ```

/// Pose frame and keypoint data model
pub mod pose;

/// Angle helpers: circular difference, limb angle, vertical reference
pub mod geometry;

/// Rolling-mean baseline of limb deviation
pub mod baseline;

/// Per-limb motion state machine
pub mod limb;

/// Deadline-based cooldown after a kick
pub mod cooldown;

/// Kick events and the sink contract for downstream consumers
pub mod sink;

/// Detector session tying limbs, cooldowns and sinks together
pub mod detector;

/// Error types and result handling
pub mod error;

/// Constants used throughout the detector
pub mod constants;

/// Configuration management
pub mod config;

/// Replay application
pub mod app;

/// Command-line arguments
pub mod cli;

pub use error::{Error, Result};
