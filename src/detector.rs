//! Kick detector session.
//!
//! Owns one [`LimbMotionState`] per leg and the cooldown(s) governing them,
//! and turns a stream of [`PoseFrame`]s into [`KickEvent`]s. The detector is
//! a pure function of its state, the frame and the frame's timestamp: there
//! are no timers, threads or global flags.

use crate::config::DetectionConfig;
use crate::cooldown::Cooldown;
use crate::geometry::{angle_diff, limb_angle, vertical_reference};
use crate::limb::{LimbMotionState, LimbSide};
use crate::pose::{Keypoint, PoseFrame};
use crate::sink::{KickEvent, KickSink};
use crate::Result;
use log::{debug, info, trace};

/// Run one admitted-or-skipped step for a single limb.
///
/// Skips silently (no state change, no event) when the hip or ankle is
/// missing or below the confidence threshold, when `cooldown` is active at
/// `now_ms`, or when the optional horizontal-offset guard fails. Otherwise
/// feeds the limb's deviation from `vertical` into `state`; on the
/// `Extended → Retracting` transition, starts `cooldown` and returns the kick.
pub fn detect_kick(
    state: &mut LimbMotionState,
    cooldown: &mut Cooldown,
    hip: Option<&Keypoint>,
    ankle: Option<&Keypoint>,
    vertical: f64,
    now_ms: u64,
    config: &DetectionConfig,
) -> Option<KickEvent> {
    let side = state.side();
    let threshold = config.confidence_threshold;

    let (Some(hip), Some(ankle)) = (
        hip.filter(|kp| kp.is_usable(threshold)),
        ankle.filter(|kp| kp.is_usable(threshold)),
    ) else {
        trace!("{side} leg: hip or ankle not usable at {now_ms} ms");
        return None;
    };

    if cooldown.is_active(now_ms) {
        trace!("{side} leg: cooling down at {now_ms} ms");
        return None;
    }

    if let Some(guard) = &config.horizontal_offset {
        let outward = (ankle.x - hip.x) * side.outward_sign(guard.mirrored);
        if outward < guard.min_offset {
            trace!("{side} leg: ankle offset {outward:.1} below {:.1}", guard.min_offset);
            return None;
        }
    }

    let deviation = angle_diff(limb_angle(hip, ankle), vertical);
    let transition = state.observe(deviation, &config.thresholds())?;
    if !transition.is_kick() {
        return None;
    }

    cooldown.trigger(now_ms, config.cooldown_ms);
    Some(KickEvent {
        side,
        timestamp_ms: now_ms,
        peak_deviation: state.peak(),
    })
}

/// Per-session kick detector for both legs
#[derive(Debug, Clone)]
pub struct KickDetector {
    config: DetectionConfig,
    limbs: [LimbMotionState; 2],
    cooldowns: Vec<Cooldown>,
}

impl KickDetector {
    /// Start a detection session
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration does not validate
    pub fn new(config: DetectionConfig) -> Result<Self> {
        config.validate()?;
        info!(
            "Kick detector started (cooldown {} ms, scope {:?}, offset guard {})",
            config.cooldown_ms,
            config.cooldown_scope,
            if config.horizontal_offset.is_some() { "on" } else { "off" }
        );
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: DetectionConfig) -> Self {
        let window = config.baseline_window;
        Self {
            limbs: LimbSide::ALL.map(|side| LimbMotionState::new(side, window)),
            cooldowns: vec![Cooldown::new(); config.cooldown_scope.slots()],
            config,
        }
    }

    /// Process one frame, handing any detected kicks to `sink`.
    ///
    /// Both legs are updated before any event is emitted; at most one event
    /// per leg is produced. Returns the number of events emitted.
    pub fn process_frame<S>(&mut self, frame: &PoseFrame, sink: &mut S) -> usize
    where
        S: KickSink + ?Sized,
    {
        let now_ms = frame.timestamp_ms;
        let threshold = self.config.confidence_threshold;
        let vertical = vertical_reference(frame, threshold);

        let mut detected: [Option<KickEvent>; 2] = [None, None];
        for side in LimbSide::ALL {
            let slot = self.config.cooldown_scope.slot(side);
            detected[side.index()] = detect_kick(
                &mut self.limbs[side.index()],
                &mut self.cooldowns[slot],
                frame.get(side.hip()),
                frame.get(side.ankle()),
                vertical,
                now_ms,
                &self.config,
            );
        }

        let mut emitted = 0;
        for event in detected.iter().flatten() {
            debug!("{} kick detected at {} ms", event.side, event.timestamp_ms);
            sink.emit(event);
            emitted += 1;
        }
        emitted
    }

    /// Process a frame and return its events instead of pushing them to a sink
    pub fn detect(&mut self, frame: &PoseFrame) -> Vec<KickEvent> {
        let mut events = Vec::new();
        self.process_frame(frame, &mut events);
        events
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Motion state of one leg
    pub fn limb(&self, side: LimbSide) -> &LimbMotionState {
        &self.limbs[side.index()]
    }

    /// Whether detection for `side` is suppressed at `now_ms`
    pub fn cooldown_active(&self, side: LimbSide, now_ms: u64) -> bool {
        self.cooldowns[self.config.cooldown_scope.slot(side)].is_active(now_ms)
    }

    /// Discard all limb and cooldown state, as at session start
    pub fn reset(&mut self) {
        for limb in &mut self.limbs {
            limb.reset();
        }
        for cooldown in &mut self.cooldowns {
            cooldown.reset();
        }
    }
}

impl Default for KickDetector {
    fn default() -> Self {
        Self::with_valid_config(DetectionConfig::default())
    }
}
