//! Dodgefall - a falling-obstacle dodge arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (session state machine, entities, spawning, collisions)
//! - `config`: Session configuration with fail-fast validation
//!
//! Rendering, widget binding and raw input polling live in the host; the sim
//! talks to them through `TickInput` going in and `GameEvent`s coming out.

pub mod config;
pub mod sim;

pub use config::{ConfigError, GameConfig, PlayerConfig, SessionConfig, SpawnerConfig};
pub use sim::{GameEvent, GameState, ObstacleKind, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Session defaults
    pub const TIME_LIMIT: f32 = 60.0;
    /// Hour shown on the clock face at session start ("8:00" -> "9:00" deadline)
    pub const CLOCK_START_HOUR: u32 = 8;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const PLAYER_MAX_RESOLVE: u8 = 3;
    /// Half-extents of the playable area
    pub const ARENA_BOUND_X: f32 = 1.5;
    pub const ARENA_BOUND_Y: f32 = 4.5;
    /// Contact radius of the player's hitbox
    pub const PLAYER_RADIUS: f32 = 0.4;

    /// Obstacle defaults
    pub const OBSTACLE_FALL_SPEED: f32 = 5.0;
    /// Obstacles below this y are despawned
    pub const DESPAWN_THRESHOLD_Y: f32 = -5.5;

    /// Spawner defaults
    pub const SPAWN_INTERVAL: f32 = 1.0;
    pub const SPAWN_RANGE_X: f32 = 1.5;
    pub const SPAWN_Y: f32 = 5.5;
}
