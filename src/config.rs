//! Configuration management for the kick detector

use crate::constants::{
    BASELINE_WINDOW_SIZE, CONFIDENCE_THRESHOLD, COOLDOWN_TIME_MS, MIN_ANGLE_DIFF, PEAK_DROP_RATIO,
};
use crate::cooldown::CooldownScope;
use crate::limb::MotionThresholds;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Detector tuning
    pub detection: DetectionConfig,

    /// Replay output settings
    pub output: OutputConfig,
}

/// Detector tuning, fixed for the lifetime of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Rise above baseline (radians) that arms a kick
    pub min_angle_diff: f64,

    /// Fraction of the peak the deviation must fall below to fire (0.0-1.0)
    pub peak_drop_ratio: f64,

    /// Refractory period after a kick, in milliseconds
    pub cooldown_ms: u64,

    /// Number of samples in the rolling baseline
    pub baseline_window: usize,

    /// Minimum keypoint score to be considered usable (0.0-1.0)
    pub confidence_threshold: f64,

    /// Whether the cooldown is per leg or shared by both
    pub cooldown_scope: CooldownScope,

    /// Optional sideways-displacement precondition
    pub horizontal_offset: Option<HorizontalOffsetGuard>,
}

/// Requires the ankle to sit outward of the hip before a frame is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalOffsetGuard {
    /// Minimum outward displacement in image units
    pub min_offset: f64,

    /// Camera image is mirrored (selfie view)
    #[serde(default)]
    pub mirrored: bool,
}

/// Output encoding for replayed kick events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One wire label (`left_kick` / `right_kick`) per line
    #[default]
    Text,
    /// One JSON event per line
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(Error::InvalidInput(format!("Unknown output format: {s}"))),
        }
    }
}

/// Replay output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Event encoding
    pub format: OutputFormat,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_angle_diff: MIN_ANGLE_DIFF,
            peak_drop_ratio: PEAK_DROP_RATIO,
            cooldown_ms: COOLDOWN_TIME_MS,
            baseline_window: BASELINE_WINDOW_SIZE,
            confidence_threshold: CONFIDENCE_THRESHOLD,
            cooldown_scope: CooldownScope::default(),
            horizontal_offset: None,
        }
    }
}

impl DetectionConfig {
    /// Thresholds for the limb state machine
    pub fn thresholds(&self) -> MotionThresholds {
        MotionThresholds {
            min_angle_diff: self.min_angle_diff,
            peak_drop_ratio: self.peak_drop_ratio,
        }
    }

    /// Validate detector parameters
    pub fn validate(&self) -> Result<()> {
        if !self.min_angle_diff.is_finite() || self.min_angle_diff <= 0.0 {
            return Err(Error::ConfigError(
                "Minimum angle difference must be positive".to_string(),
            ));
        }
        if !(self.peak_drop_ratio > 0.0 && self.peak_drop_ratio < 1.0) {
            return Err(Error::ConfigError(
                "Peak drop ratio must be between 0.0 and 1.0 (exclusive)".to_string(),
            ));
        }
        if self.baseline_window == 0 {
            return Err(Error::ConfigError(
                "Baseline window size must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(Error::ConfigError(
                "Confidence threshold must be between 0.0 and 1.0".to_string(),
            ));
        }
        if let Some(guard) = &self.horizontal_offset {
            if !guard.min_offset.is_finite() || guard.min_offset < 0.0 {
                return Err(Error::ConfigError(
                    "Horizontal offset must be non-negative".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| Error::IoError(e.to_string()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.detection.validate()
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Kick Detection Configuration

# Detector tuning
detection:
  min_angle_diff: 0.3
  peak_drop_ratio: 0.8
  cooldown_ms: 300
  baseline_window: 30
  confidence_threshold: 0.3
  # per_limb: each leg has its own cooldown
  # shared: any kick blocks both legs
  cooldown_scope: per_limb
  # Uncomment to require the ankle to be outward of the hip
  # horizontal_offset:
  #   min_offset: 20.0
  #   mirrored: false

# Replay output
output:
  format: text
"#;
