//! Per-limb motion state machine.
//!
//! Each tracked leg cycles `Waiting → Extended → Retracting → Waiting`,
//! driven by its deviation from the body's vertical axis relative to an
//! adaptive baseline. A kick is the `Extended → Retracting` transition.

use crate::baseline::BaselineTracker;
use crate::constants::{MIN_ANGLE_DIFF, PEAK_DROP_RATIO};
use crate::pose::KeypointName;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimbSide {
    Left,
    Right,
}

impl LimbSide {
    /// Both sides, in per-frame processing order
    pub const ALL: [LimbSide; 2] = [LimbSide::Left, LimbSide::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            LimbSide::Left => "left",
            LimbSide::Right => "right",
        }
    }

    pub fn hip(&self) -> KeypointName {
        match self {
            LimbSide::Left => KeypointName::LeftHip,
            LimbSide::Right => KeypointName::RightHip,
        }
    }

    pub fn ankle(&self) -> KeypointName {
        match self {
            LimbSide::Left => KeypointName::LeftAnkle,
            LimbSide::Right => KeypointName::RightAnkle,
        }
    }

    /// Sign of the image x axis pointing away from the body on this side.
    ///
    /// Left is −x and right is +x; `mirrored` flips both for selfie-view
    /// cameras.
    pub fn outward_sign(&self, mirrored: bool) -> f64 {
        let sign = match self {
            LimbSide::Left => -1.0,
            LimbSide::Right => 1.0,
        };
        if mirrored {
            -sign
        } else {
            sign
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            LimbSide::Left => 0,
            LimbSide::Right => 1,
        }
    }
}

impl fmt::Display for LimbSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle phase of a limb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// At rest, waiting for the limb to swing past baseline
    #[default]
    Waiting,
    /// Swinging out, tracking the peak deviation
    Extended,
    /// Kick fired, waiting for the limb to return near baseline
    Retracting,
}

/// A phase change produced by one observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
}

impl Transition {
    /// The only transition that constitutes a kick
    pub fn is_kick(&self) -> bool {
        self.from == Phase::Extended && self.to == Phase::Retracting
    }
}

/// Thresholds for the transition table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionThresholds {
    /// Rise above baseline (radians) that arms a kick
    pub min_angle_diff: f64,
    /// Fraction of the peak the deviation must fall below to fire
    pub peak_drop_ratio: f64,
}

impl Default for MotionThresholds {
    fn default() -> Self {
        Self {
            min_angle_diff: MIN_ANGLE_DIFF,
            peak_drop_ratio: PEAK_DROP_RATIO,
        }
    }
}

/// Motion state of one limb, owned by the detector session
#[derive(Debug, Clone, PartialEq)]
pub struct LimbMotionState {
    side: LimbSide,
    phase: Phase,
    baseline: BaselineTracker,
    peak: f64,
}

impl LimbMotionState {
    #[must_use]
    pub fn new(side: LimbSide, baseline_window: usize) -> Self {
        Self {
            side,
            phase: Phase::Waiting,
            baseline: BaselineTracker::new(baseline_window),
            peak: 0.0,
        }
    }

    pub fn side(&self) -> LimbSide {
        self.side
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current baseline deviation, `None` before the first admitted sample
    pub fn baseline_value(&self) -> Option<f64> {
        self.baseline.value()
    }

    pub fn baseline(&self) -> &BaselineTracker {
        &self.baseline
    }

    /// Highest deviation seen in the current `Extended` phase
    pub fn peak(&self) -> f64 {
        self.peak
    }

    /// Feed a deviation sample into the rolling baseline, returning the new mean
    pub fn update_baseline(&mut self, sample: f64) -> f64 {
        self.baseline.update(sample)
    }

    /// Advance the state machine with one admitted deviation sample.
    ///
    /// The baseline is updated first (on every call, in every phase); a cold
    /// baseline is seeded with the sample before that regular update. The
    /// transition table is then evaluated against the refreshed baseline.
    pub fn observe(&mut self, deviation: f64, thresholds: &MotionThresholds) -> Option<Transition> {
        if self.baseline.is_empty() {
            self.update_baseline(deviation);
            debug!("{} leg baseline seeded at {:.3} rad", self.side, deviation);
        }
        let baseline = self.update_baseline(deviation);

        let from = self.phase;
        match self.phase {
            Phase::Waiting => {
                if deviation > baseline + thresholds.min_angle_diff {
                    self.phase = Phase::Extended;
                    self.peak = deviation;
                }
            }
            Phase::Extended => {
                if deviation > self.peak {
                    self.peak = deviation;
                } else if deviation < self.peak * thresholds.peak_drop_ratio {
                    self.phase = Phase::Retracting;
                }
            }
            Phase::Retracting => {
                if deviation < baseline + thresholds.min_angle_diff / 2.0 {
                    self.phase = Phase::Waiting;
                }
            }
        }

        if from == self.phase {
            return None;
        }
        debug!(
            "{} leg {:?} -> {:?} (deviation {:.3}, baseline {:.3}, peak {:.3})",
            self.side, from, self.phase, deviation, baseline, self.peak
        );
        Some(Transition { from, to: self.phase })
    }

    /// Discard all motion history
    pub fn reset(&mut self) {
        self.phase = Phase::Waiting;
        self.baseline.reset();
        self.peak = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BASELINE_WINDOW_SIZE;

    fn warmed_up(value: f64) -> LimbMotionState {
        let mut state = LimbMotionState::new(LimbSide::Left, BASELINE_WINDOW_SIZE);
        for _ in 0..BASELINE_WINDOW_SIZE {
            state.observe(value, &MotionThresholds::default());
        }
        state
    }

    #[test]
    fn test_cold_start_seeds_baseline() {
        let mut state = LimbMotionState::new(LimbSide::Right, BASELINE_WINDOW_SIZE);
        assert_eq!(state.baseline_value(), None);

        assert_eq!(state.observe(0.2, &MotionThresholds::default()), None);
        assert_eq!(state.baseline().len(), 2);
        assert!((state.baseline_value().unwrap() - 0.2).abs() < 1e-12);
        assert_eq!(state.phase(), Phase::Waiting);
    }

    #[test]
    fn test_full_cycle() {
        let thresholds = MotionThresholds::default();
        let mut state = warmed_up(0.1);

        let mut transitions = Vec::new();
        for deviation in [0.2, 0.3, 0.4, 0.5, 0.6, 0.45, 0.1] {
            if let Some(t) = state.observe(deviation, &thresholds) {
                transitions.push(t);
            }
        }

        assert_eq!(
            transitions,
            vec![
                Transition { from: Phase::Waiting, to: Phase::Extended },
                Transition { from: Phase::Extended, to: Phase::Retracting },
                Transition { from: Phase::Retracting, to: Phase::Waiting },
            ]
        );
        assert!((state.peak() - 0.6).abs() < 1e-12);
        assert_eq!(transitions.iter().filter(|t| t.is_kick()).count(), 1);
    }

    #[test]
    fn test_peak_tracks_maximum() {
        let thresholds = MotionThresholds::default();
        let mut state = warmed_up(0.1);
        state.observe(0.9, &thresholds);
        assert_eq!(state.phase(), Phase::Extended);

        state.observe(1.2, &thresholds);
        state.observe(1.0, &thresholds);
        assert_eq!(state.phase(), Phase::Extended);
        assert!((state.peak() - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_retracting_holds_until_near_baseline() {
        let thresholds = MotionThresholds::default();
        let mut state = warmed_up(0.1);
        state.observe(1.0, &thresholds);
        state.observe(0.5, &thresholds);
        assert_eq!(state.phase(), Phase::Retracting);

        // Still well above baseline + 0.15
        state.observe(0.5, &thresholds);
        assert_eq!(state.phase(), Phase::Retracting);

        state.observe(0.1, &thresholds);
        assert_eq!(state.phase(), Phase::Waiting);
    }

    #[test]
    fn test_transitions_follow_table() {
        use rand::{rngs::StdRng, Rng, SeedableRng};

        let allowed = [
            (Phase::Waiting, Phase::Extended),
            (Phase::Extended, Phase::Retracting),
            (Phase::Retracting, Phase::Waiting),
        ];
        let thresholds = MotionThresholds::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = LimbMotionState::new(LimbSide::Right, BASELINE_WINDOW_SIZE);

        for _ in 0..5_000 {
            let before = state.phase();
            let deviation = rng.gen_range(0.0..std::f64::consts::PI);
            match state.observe(deviation, &thresholds) {
                Some(t) => {
                    assert_eq!(t.from, before);
                    assert!(allowed.contains(&(t.from, t.to)), "illegal {t:?}");
                }
                None => assert_eq!(state.phase(), before),
            }
            assert!(state.baseline().len() <= BASELINE_WINDOW_SIZE);
        }
    }

    #[test]
    fn test_outward_sign() {
        assert_eq!(LimbSide::Left.outward_sign(false), -1.0);
        assert_eq!(LimbSide::Right.outward_sign(false), 1.0);
        assert_eq!(LimbSide::Left.outward_sign(true), 1.0);
    }

    #[test]
    fn test_reset() {
        let mut state = warmed_up(0.1);
        state.observe(1.0, &MotionThresholds::default());
        state.reset();
        assert_eq!(state, LimbMotionState::new(LimbSide::Left, BASELINE_WINDOW_SIZE));
    }
}
