//! Hand-off of detected kicks to downstream consumers.
//!
//! The detector only knows the [`KickSink`] contract: one synchronous,
//! non-blocking call per validated kick. Whether the receiver draws an
//! overlay, animates an avatar or forwards the event to a peer is its own
//! business.

use crate::limb::LimbSide;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::Sender;

/// A detected, debounced kick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KickEvent {
    /// Which leg kicked
    pub side: LimbSide,
    /// Timestamp of the frame that detected the peak drop
    pub timestamp_ms: u64,
    /// Highest deviation from vertical reached during the kick (radians)
    pub peak_deviation: f64,
}

impl KickEvent {
    /// Message string used on transport channels
    pub fn wire_label(&self) -> &'static str {
        match self.side {
            LimbSide::Left => "left_kick",
            LimbSide::Right => "right_kick",
        }
    }

    /// Parse a transport message back into a side
    pub fn side_from_wire(label: &str) -> Option<LimbSide> {
        match label.trim() {
            "left_kick" => Some(LimbSide::Left),
            "right_kick" => Some(LimbSide::Right),
            _ => None,
        }
    }
}

/// Receiver of kick events.
///
/// Called from inside frame processing, so implementations must not block.
pub trait KickSink {
    fn emit(&mut self, event: &KickEvent);
}

impl<F> KickSink for F
where
    F: FnMut(&KickEvent),
{
    fn emit(&mut self, event: &KickEvent) {
        self(event);
    }
}

impl KickSink for Vec<KickEvent> {
    fn emit(&mut self, event: &KickEvent) {
        self.push(*event);
    }
}

/// Forwards events into an unbounded channel for another thread to consume
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<KickEvent>,
}

impl ChannelSink {
    #[must_use]
    pub fn new(sender: Sender<KickEvent>) -> Self {
        Self { sender }
    }
}

impl KickSink for ChannelSink {
    fn emit(&mut self, event: &KickEvent) {
        if self.sender.send(*event).is_err() {
            warn!("Kick receiver disconnected, dropping {}", event.wire_label());
        }
    }
}

/// Writes every event to the log at `info`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl KickSink for LogSink {
    fn emit(&mut self, event: &KickEvent) {
        info!(
            "{} kick at {} ms (peak {:.3} rad)",
            event.side, event.timestamp_ms, event.peak_deviation
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn event(side: LimbSide) -> KickEvent {
        KickEvent {
            side,
            timestamp_ms: 100,
            peak_deviation: 0.6,
        }
    }

    #[test]
    fn test_wire_labels() {
        assert_eq!(event(LimbSide::Left).wire_label(), "left_kick");
        assert_eq!(event(LimbSide::Right).wire_label(), "right_kick");
        assert_eq!(KickEvent::side_from_wire("right_kick\n"), Some(LimbSide::Right));
        assert_eq!(KickEvent::side_from_wire("punch"), None);
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        let mut sink = |e: &KickEvent| seen.push(e.side);
        sink.emit(&event(LimbSide::Left));
        sink.emit(&event(LimbSide::Right));
        assert_eq!(seen, vec![LimbSide::Left, LimbSide::Right]);
    }

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<KickEvent> = Vec::new();
        sink.emit(&event(LimbSide::Right));
        sink.emit(&event(LimbSide::Left));
        assert_eq!(sink, vec![event(LimbSide::Right), event(LimbSide::Left)]);
    }

    #[test]
    fn test_channel_sink() {
        let (tx, rx) = mpsc::channel();
        let mut sink = ChannelSink::new(tx);
        sink.emit(&event(LimbSide::Right));
        assert_eq!(rx.try_recv().unwrap(), event(LimbSide::Right));
    }

    #[test]
    fn test_channel_sink_disconnected_does_not_panic() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut sink = ChannelSink::new(tx);
        sink.emit(&event(LimbSide::Left));
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&event(LimbSide::Left)).unwrap();
        assert_eq!(json, r#"{"side":"left","timestamp_ms":100,"peak_deviation":0.6}"#);
    }
}
