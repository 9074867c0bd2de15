//! Session configuration
//!
//! Everything tunable about a session lives here. Validation is fail-fast:
//! a bad config is rejected at session construction, never mid-tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::ObstacleKind;

/// Configuration rejected at session construction
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("obstacle kind list is empty")]
    NoObstacleKinds,
    #[error("spawn interval must be positive, got {0}")]
    NonPositiveInterval(f32),
    #[error("time limit must be positive, got {0}")]
    NonPositiveTimeLimit(f32),
    #[error("player speed must be positive, got {0}")]
    NonPositiveSpeed(f32),
    #[error("max resolve must be at least 1")]
    ZeroResolve,
}

/// Player tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Movement speed in units/sec
    pub speed: f32,
    /// Starting (and maximum) resolve
    pub max_resolve: u8,
    /// Half-extents of the playable area; position is clamped per axis
    pub bounds: Vec2,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            max_resolve: PLAYER_MAX_RESOLVE,
            bounds: Vec2::new(ARENA_BOUND_X, ARENA_BOUND_Y),
        }
    }
}

/// Spawner tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnerConfig {
    /// Seconds between spawns
    pub interval_seconds: f32,
    /// Horizontal spawn offset is drawn uniformly from [-x_range, x_range]
    pub x_range: f32,
    /// Vertical position obstacles spawn at
    pub spawn_y: f32,
    /// Kinds eligible for spawning, picked uniformly at random
    pub kinds: Vec<ObstacleKind>,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            interval_seconds: SPAWN_INTERVAL,
            x_range: SPAWN_RANGE_X,
            spawn_y: SPAWN_Y,
            kinds: vec![ObstacleKind::Rock, ObstacleKind::Crow, ObstacleKind::Puddle],
        }
    }
}

/// Complete session configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    pub session: SessionConfig,
    pub player: PlayerConfig,
    pub spawner: SpawnerConfig,
}

/// Session timer tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seconds until the session ends on its own
    pub time_limit: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_limit: TIME_LIMIT,
        }
    }
}

impl GameConfig {
    /// Reject configurations that would make ticking meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.time_limit <= 0.0 {
            return Err(ConfigError::NonPositiveTimeLimit(self.session.time_limit));
        }
        if self.spawner.kinds.is_empty() {
            return Err(ConfigError::NoObstacleKinds);
        }
        if self.spawner.interval_seconds <= 0.0 {
            return Err(ConfigError::NonPositiveInterval(
                self.spawner.interval_seconds,
            ));
        }
        if self.player.speed <= 0.0 {
            return Err(ConfigError::NonPositiveSpeed(self.player.speed));
        }
        if self.player.max_resolve == 0 {
            return Err(ConfigError::ZeroResolve);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_kinds_rejected() {
        let mut config = GameConfig::default();
        config.spawner.kinds.clear();
        assert_eq!(config.validate(), Err(ConfigError::NoObstacleKinds));
    }

    #[test]
    fn test_non_positive_interval_rejected() {
        let mut config = GameConfig::default();
        config.spawner.interval_seconds = 0.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveInterval(0.0))
        );
    }

    #[test]
    fn test_non_positive_time_limit_rejected() {
        let mut config = GameConfig::default();
        config.session.time_limit = -1.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveTimeLimit(-1.0))
        );
    }

    #[test]
    fn test_zero_resolve_rejected() {
        let mut config = GameConfig::default();
        config.player.max_resolve = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroResolve));
    }
}
