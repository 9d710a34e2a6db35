//! Refractory period after a detected kick.
//!
//! The cooldown is a deadline checked against the frame clock, so the
//! detector never needs timers or background threads.

use crate::limb::LimbSide;
use serde::{Deserialize, Serialize};

/// Which limbs a single cooldown instance governs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CooldownScope {
    /// Each leg has its own cooldown; both legs may kick back to back
    #[default]
    PerLimb,
    /// One cooldown for the whole session; any kick blocks both legs
    Shared,
}

impl CooldownScope {
    /// Number of independent cooldown instances this scope needs
    pub fn slots(&self) -> usize {
        match self {
            CooldownScope::PerLimb => 2,
            CooldownScope::Shared => 1,
        }
    }

    /// Index of the cooldown instance governing `side`
    pub fn slot(&self, side: LimbSide) -> usize {
        match self {
            CooldownScope::PerLimb => side.index(),
            CooldownScope::Shared => 0,
        }
    }
}

impl std::str::FromStr for CooldownScope {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "per_limb" | "perlimb" | "per-limb" => Ok(CooldownScope::PerLimb),
            "shared" | "global" => Ok(CooldownScope::Shared),
            _ => Err(crate::Error::InvalidInput(format!("Unknown cooldown scope: {s}"))),
        }
    }
}

/// Deadline-based refractory flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cooldown {
    until_ms: Option<u64>,
}

impl Cooldown {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or re-arm) the refractory period at `now_ms`
    pub fn trigger(&mut self, now_ms: u64, duration_ms: u64) {
        self.until_ms = Some(now_ms.saturating_add(duration_ms));
    }

    /// Whether detection is suppressed at `now_ms`
    pub fn is_active(&self, now_ms: u64) -> bool {
        self.until_ms.is_some_and(|deadline| now_ms < deadline)
    }

    /// End of the most recent refractory period, if one was ever started
    pub fn deadline(&self) -> Option<u64> {
        self.until_ms
    }

    pub fn reset(&mut self) {
        self.until_ms = None;
    }
}
