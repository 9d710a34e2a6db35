//! Constants used throughout the detector

/// Minimum rise above baseline (radians) that arms a kick
pub const MIN_ANGLE_DIFF: f64 = 0.3;

/// Fraction of the observed peak the deviation must fall below to fire
pub const PEAK_DROP_RATIO: f64 = 0.8;

/// Refractory period after a detected kick, in milliseconds
pub const COOLDOWN_TIME_MS: u64 = 300;

/// Number of deviation samples in the rolling baseline
pub const BASELINE_WINDOW_SIZE: usize = 30;

/// Keypoints scoring below this are treated as missing
pub const CONFIDENCE_THRESHOLD: f64 = 0.3;

/// Fallback "down" direction in image space (straight down)
pub const DEFAULT_VERTICAL_ANGLE: f64 = std::f64::consts::FRAC_PI_2;

/// Nominal capture rate, used for frame spacing in tests and benchmarks
pub const DEFAULT_FPS: f64 = 30.0;
