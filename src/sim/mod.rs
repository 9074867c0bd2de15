//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed external tick only, no wall-clock reads
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::player_obstacle_overlap;
pub use session::{Session, SessionStatus};
pub use spawner::Spawner;
pub use state::{ContactOutcome, GameEvent, GameState, Obstacle, ObstacleKind, Player};
pub use tick::{TickInput, tick};
