//! Periodic obstacle spawning
//!
//! The spawner is the sole writer of new entries into the live obstacle set.
//! It accumulates tick time and fires whenever the accumulator reaches the
//! configured interval, resetting to zero on each firing (reset, not
//! subtract, so a long frame never banks more than one spawn).

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::ObstacleKind;
use crate::config::SpawnerConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    /// Seconds between spawns
    pub interval_seconds: f32,
    /// Horizontal offset is drawn uniformly from [-x_range, x_range]
    pub x_range: f32,
    /// Vertical position new obstacles start at
    pub spawn_y: f32,
    /// Kinds eligible for spawning, picked uniformly
    pub kinds: Vec<ObstacleKind>,
    /// Time accumulated since the last spawn
    clock: f32,
}

impl Spawner {
    pub fn new(config: &SpawnerConfig) -> Self {
        Self {
            interval_seconds: config.interval_seconds,
            x_range: config.x_range,
            spawn_y: config.spawn_y,
            kinds: config.kinds.clone(),
            clock: 0.0,
        }
    }

    /// Advance the spawn clock by `dt`; when it reaches the interval, roll a
    /// kind and a horizontal offset and hand back the spawn request. The
    /// caller gates this on session activity and owns id allocation.
    pub fn update(&mut self, dt: f32, rng: &mut Pcg32) -> Option<(ObstacleKind, Vec2)> {
        self.clock += dt;
        if self.clock < self.interval_seconds {
            return None;
        }
        self.clock = 0.0;

        let kind = self.kinds[rng.random_range(0..self.kinds.len())];
        let x = rng.random_range(-self.x_range..=self.x_range);
        Some((kind, Vec2::new(x, self.spawn_y)))
    }
}
