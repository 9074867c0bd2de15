//! Game state and core simulation types
//!
//! All per-session state lives here; the tick orchestrator in `tick.rs`
//! mutates it in a fixed order each frame.

use glam::Vec2;
use log::debug;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::session::{Session, SessionStatus};
use super::spawner::Spawner;
use crate::config::{ConfigError, GameConfig, PlayerConfig};
use crate::consts::*;

/// Obstacle variants, each with its own contact footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Rock,
    Crow,
    Puddle,
}

impl ObstacleKind {
    /// Radius used for player contact detection
    pub fn contact_radius(&self) -> f32 {
        match self {
            ObstacleKind::Rock => 0.35,
            ObstacleKind::Crow => 0.45,
            ObstacleKind::Puddle => 0.3,
        }
    }
}

/// A falling hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    /// Constant downward speed in units/sec
    pub fall_speed: f32,
}

impl Obstacle {
    pub fn spawn(id: u32, kind: ObstacleKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            fall_speed: OBSTACLE_FALL_SPEED,
        }
    }

    /// Move down at constant speed. Motion is gameplay, so it freezes while
    /// the session is over; despawning is hygiene and is handled separately.
    pub fn fall(&mut self, dt: f32, status: SessionStatus) {
        if status.active {
            self.pos.y -= self.fall_speed * dt;
        }
    }

    /// Despawn predicate, never gated on session activity
    pub fn below_threshold(&self, threshold_y: f32) -> bool {
        self.pos.y < threshold_y
    }
}

/// Result of a single obstacle contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Hit absorbed, gauge still above zero
    Absorbed,
    /// This hit emptied the gauge
    Depleted,
    /// Gauge was already empty; nothing changed
    AlreadyEmpty,
}

/// The player-controlled actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Depletable resource; the session ends when it reaches zero
    pub resolve: u8,
    pub max_resolve: u8,
    /// Movement speed in units/sec
    pub speed: f32,
    /// Half-extents the position is clamped into, per axis
    pub bounds: Vec2,
    /// Obstacle ids currently overlapping (contact fires on entry only)
    #[serde(default)]
    pub touching: Vec<u32>,
}

impl Player {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            pos: Vec2::ZERO,
            resolve: config.max_resolve,
            max_resolve: config.max_resolve,
            speed: config.speed,
            bounds: config.bounds,
            touching: Vec::new(),
        }
    }

    /// Apply one tick of directional input, then clamp each axis
    /// independently back into the arena.
    pub fn apply_input(&mut self, dir: Vec2, dt: f32) {
        let dir = dir.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
        self.pos += dir * self.speed * dt;
        self.pos = self.pos.clamp(-self.bounds, self.bounds);
    }

    /// Handle one qualifying contact event: drop resolve by one, clamped at
    /// zero. Reports `Depleted` exactly on the 1 -> 0 crossing so the caller
    /// can end the session once, no matter how many contacts follow.
    pub fn on_obstacle_contact(&mut self) -> ContactOutcome {
        if self.resolve == 0 {
            return ContactOutcome::AlreadyEmpty;
        }
        self.resolve -= 1;
        debug!("resolve: {}/{}", self.resolve, self.max_resolve);
        if self.resolve == 0 {
            ContactOutcome::Depleted
        } else {
            ContactOutcome::Absorbed
        }
    }
}

/// Output of one tick, forwarded by the host to its presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Clock face text for the timer display, emitted each tick the timer
    /// advanced (the expiry tick carries the capped terminal value)
    ClockUpdated { text: String },
    /// Resolve gauge update for the HP display
    ResolveChanged { current: u8, max: u8 },
    /// Game-over presentation trigger, emitted exactly once per session
    GameOver,
}

fn fresh_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete state of one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub session: Session,
    pub player: Player,
    /// Live obstacle set; the spawner appends, the despawn sweep removes
    pub obstacles: Vec<Obstacle>,
    pub spawner: Spawner,
    /// Obstacles below this y are removed by the sweep
    pub despawn_threshold_y: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Spawn RNG (not persisted; sessions are not resumable)
    #[serde(skip_serializing, skip_deserializing, default = "fresh_rng")]
    pub rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Build a session from a validated config and a seed. Config errors are
    /// fatal here, before the first tick.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            seed,
            session: Session::new(config.session.time_limit),
            player: Player::new(&config.player),
            obstacles: Vec::new(),
            spawner: Spawner::new(&config.spawner),
            despawn_threshold_y: DESPAWN_THRESHOLD_Y,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
