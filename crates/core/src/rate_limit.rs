//! Fixed-window point budget arithmetic.
//!
//! A window opens on the first consumption for a key and lasts
//! `window_secs`. Each call consumes one point; once `points` have been
//! consumed further calls are denied until the window closes. Stores
//! persist only the [`WindowState`]; the decision logic lives here so the
//! in-memory and database stores agree exactly.

use chrono::Duration;
use serde::Serialize;

use crate::types::Timestamp;

/// Points granted per window for admin logins and inquiries.
pub const DEFAULT_POINTS: u32 = 5;

/// Window length in seconds (15 minutes).
pub const DEFAULT_WINDOW_SECS: i64 = 15 * 60;

/// Bucket key used when the client IP cannot be determined.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Budget configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWindow {
    pub points: u32,
    pub window_secs: i64,
}

impl Default for FixedWindow {
    fn default() -> Self {
        Self {
            points: DEFAULT_POINTS,
            window_secs: DEFAULT_WINDOW_SECS,
        }
    }
}

/// Persisted per-key counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowState {
    pub consumed: u32,
    pub resets_at: Timestamp,
}

/// Outcome of one consumption attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_time: Timestamp,
}

impl RateLimitDecision {
    /// Whole seconds until the window resets, at least 1 when denied.
    pub fn retry_after_secs(&self, now: Timestamp) -> u64 {
        let secs = (self.reset_time - now).num_seconds();
        secs.max(1) as u64
    }
}

impl FixedWindow {
    pub fn new(points: u32, window_secs: i64) -> Self {
        Self { points, window_secs }
    }

    /// Consume one point against `current` at time `now`.
    ///
    /// Returns the state to persist and the decision. An expired or missing
    /// state opens a fresh window.
    pub fn consume(&self, current: Option<WindowState>, now: Timestamp) -> (WindowState, RateLimitDecision) {
        let state = match current {
            Some(state) if state.resets_at > now => WindowState {
                consumed: state.consumed.saturating_add(1),
                resets_at: state.resets_at,
            },
            _ => WindowState {
                consumed: 1,
                resets_at: now + Duration::seconds(self.window_secs),
            },
        };

        (state, self.decide(state))
    }

    /// Decision for a state that already includes the current consumption.
    pub fn decide(&self, state: WindowState) -> RateLimitDecision {
        let allowed = state.consumed <= self.points;
        RateLimitDecision {
            allowed,
            remaining: if allowed { self.points - state.consumed } else { 0 },
            reset_time: state.resets_at,
        }
    }
}
