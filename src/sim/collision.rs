//! Contact detection between the player and falling obstacles
//!
//! The substrate is deliberately simple: both parties are circles, and a
//! contact event is the frame a pair starts overlapping (entry-edge
//! detection lives in the tick orchestrator, keyed by obstacle id).

use super::state::{Obstacle, Player};
use crate::consts::PLAYER_RADIUS;

/// True while the player's hitbox overlaps the obstacle's footprint
pub fn player_obstacle_overlap(player: &Player, obstacle: &Obstacle) -> bool {
    let reach = PLAYER_RADIUS + obstacle.kind.contact_radius();
    player.pos.distance_squared(obstacle.pos) <= reach * reach
}
