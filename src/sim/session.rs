//! Session state machine and countdown timer
//!
//! The session is the single source of truth for whether the game is live.
//! Two states, `Running -> Over`, one-directional, no re-entry. Everything
//! else in the sim polls a [`SessionStatus`] snapshot taken after the timer
//! has advanced, so expiry is observed in the same tick it happens.

use log::{info, trace};
use serde::{Deserialize, Serialize};

use crate::consts::CLOCK_START_HOUR;

/// Read-only view of session activity, handed to dependent components.
///
/// Only [`Session`] itself ever flips the underlying flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub active: bool,
}

/// One play attempt from start to game over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    active: bool,
    elapsed: f32,
    limit: f32,
}

impl Session {
    pub fn new(limit: f32) -> Self {
        Self {
            active: true,
            elapsed: 0.0,
            limit,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            active: self.active,
        }
    }

    /// Elapsed play time in seconds, never exceeding the limit
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn limit(&self) -> f32 {
        self.limit
    }

    /// Advance the timer by `dt`. Returns true if the time limit was reached
    /// and the session terminated on this call. No-op once over.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }

        self.elapsed += dt;
        trace!("session elapsed {:.3}s", self.elapsed);

        if self.elapsed >= self.limit {
            // Cap so the final frame reports the limit, not the overshoot
            self.elapsed = self.limit;
            return self.terminate();
        }
        false
    }

    /// Flip the session to Over. Returns true only on the first call; later
    /// calls are silent no-ops, so both trigger sites (timer expiry, resolve
    /// depletion) can call this without double side effects.
    pub fn terminate(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        info!("game over at {:.2}s", self.elapsed);
        true
    }

    /// Display-ready clock face. The in-game clock runs from 8:00 toward a
    /// 9:00 deadline, advancing one clock minute per real second, so at the
    /// default 60 second limit the terminal frame reads exactly "9:00".
    pub fn clock_text(&self) -> String {
        let total_minutes = CLOCK_START_HOUR * 60 + self.elapsed as u32;
        format!("{}:{:02}", total_minutes / 60, total_minutes % 60)
    }
}
