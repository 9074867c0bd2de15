//! Fixed timestep simulation tick
//!
//! One call per frame, driven by the host's clock. Order inside a tick is
//! fixed so that the tick in which the timer expires is the same tick in
//! which every dependent component observes the session as over:
//!
//! 1. session timer advance (and possible expiry)
//! 2. status snapshot
//! 3. player input (gated)
//! 4. spawner (gated)
//! 5. obstacle motion (frozen when over)
//! 6. contact resolution and resolve depletion (gated)
//! 7. despawn sweep (never gated)

use glam::Vec2;

use super::collision::player_obstacle_overlap;
use super::state::{ContactOutcome, GameEvent, GameState, Obstacle};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Directional input, components in [-1, 1]
    pub move_dir: Vec2,
}

/// Advance the game state by one timestep, returning the presentation
/// events produced by this tick in the order they occurred.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;

    // Timer first: expiry must be visible to everything below in this tick.
    if state.session.is_active() {
        let expired = state.session.advance(dt);
        // clock_text() reads the post-clamp value, so the expiry tick
        // carries the terminal face instead of an overshoot
        events.push(GameEvent::ClockUpdated {
            text: state.session.clock_text(),
        });
        if expired {
            events.push(GameEvent::GameOver);
        }
    }
    let status = state.session.status();

    if status.active {
        state.player.apply_input(input.move_dir, dt);

        if let Some((kind, pos)) = state.spawner.update(dt, &mut state.rng) {
            let id = state.next_entity_id();
            state.obstacles.push(Obstacle::spawn(id, kind, pos));
        }
    }

    for obstacle in &mut state.obstacles {
        obstacle.fall(dt, status);
    }

    // Contacts fire on overlap entry only, and not at all once the session
    // is over: post-game-over hits must not drain the gauge.
    if status.active {
        for i in 0..state.obstacles.len() {
            let (id, overlapping) = {
                let obstacle = &state.obstacles[i];
                (
                    obstacle.id,
                    player_obstacle_overlap(&state.player, obstacle),
                )
            };
            let known = state.player.touching.contains(&id);

            if overlapping && !known {
                state.player.touching.push(id);
                match state.player.on_obstacle_contact() {
                    ContactOutcome::Absorbed => {
                        events.push(GameEvent::ResolveChanged {
                            current: state.player.resolve,
                            max: state.player.max_resolve,
                        });
                    }
                    ContactOutcome::Depleted => {
                        events.push(GameEvent::ResolveChanged {
                            current: state.player.resolve,
                            max: state.player.max_resolve,
                        });
                        // Depletion flows through the orchestrator; only the
                        // session controller ever flips the active flag.
                        if state.session.terminate() {
                            events.push(GameEvent::GameOver);
                        }
                    }
                    ContactOutcome::AlreadyEmpty => {}
                }
            } else if !overlapping && known {
                state.player.touching.retain(|&t| t != id);
            }
        }
    }

    // Despawn sweep is hygiene, not gameplay: it runs whether or not the
    // session is over, so stragglers below the threshold always get pruned.
    let threshold = state.despawn_threshold_y;
    state.obstacles.retain(|o| !o.below_threshold(threshold));

    // Contact tracking must not hold ids of pruned obstacles
    let live: Vec<u32> = state.obstacles.iter().map(|o| o.id).collect();
    state.player.touching.retain(|id| live.contains(id));

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::consts::*;
    use crate::sim::state::ObstacleKind;
    use proptest::prelude::*;

    fn new_state() -> GameState {
        GameState::new(GameConfig::default(), 12345).unwrap()
    }

    /// Config with spawning pushed out of the way so tests control the
    /// obstacle set directly.
    fn quiet_state(max_resolve: u8) -> GameState {
        let mut config = GameConfig::default();
        config.player.max_resolve = max_resolve;
        config.spawner.interval_seconds = 1.0e6;
        GameState::new(config, 12345).unwrap()
    }

    fn game_over_count(events: &[GameEvent]) -> usize {
        events.iter().filter(|e| **e == GameEvent::GameOver).count()
    }

    #[test]
    fn test_timer_expiry_at_tick_60() {
        let mut state = quiet_state(3);
        let input = TickInput::default();

        let mut over_events = 0;
        for i in 1..=60 {
            let events = tick(&mut state, &input, 1.0);
            over_events += game_over_count(&events);
            if i < 60 {
                assert!(state.session.is_active(), "ended early at tick {i}");
            }
        }
        assert!(!state.session.is_active());
        assert_eq!(state.session.elapsed(), 60.0);
        assert_eq!(over_events, 1);
    }

    #[test]
    fn test_expiry_tick_emits_terminal_clock_text() {
        let mut state = quiet_state(3);
        let input = TickInput::default();
        let mut last_clock = None;
        for _ in 0..60 {
            for event in tick(&mut state, &input, 1.0) {
                if let GameEvent::ClockUpdated { text } = event {
                    last_clock = Some(text);
                }
            }
        }
        assert_eq!(last_clock.as_deref(), Some("9:00"));
        // No further clock updates once over
        assert!(tick(&mut state, &input, 1.0).is_empty());
    }

    #[test]
    fn test_five_contacts_deplete_and_terminate_once() {
        let mut state = quiet_state(5);
        let input = TickInput::default();

        let mut gauge = Vec::new();
        let mut over_events = 0;
        for _ in 0..5 {
            // A fresh obstacle on the player each tick is a new contact
            let id = state.next_entity_id();
            state
                .obstacles
                .push(Obstacle::spawn(id, ObstacleKind::Rock, state.player.pos));
            for event in tick(&mut state, &input, SIM_DT) {
                match event {
                    GameEvent::ResolveChanged { current, .. } => gauge.push(current),
                    GameEvent::GameOver => over_events += 1,
                    _ => {}
                }
            }
        }
        assert_eq!(gauge, vec![4, 3, 2, 1, 0]);
        assert_eq!(over_events, 1);
        assert!(!state.session.is_active());
    }

    #[test]
    fn test_post_game_over_contacts_do_not_drain_resolve() {
        let mut state = quiet_state(3);
        state.session.terminate();
        let id = state.next_entity_id();
        state
            .obstacles
            .push(Obstacle::spawn(id, ObstacleKind::Rock, state.player.pos));

        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(events.is_empty());
        assert_eq!(state.player.resolve, 3);
    }

    #[test]
    fn test_sustained_overlap_is_one_contact() {
        let mut state = quiet_state(3);
        let id = state.next_entity_id();
        // Directly above, well inside reach, falling through the player
        state.obstacles.push(Obstacle::spawn(
            id,
            ObstacleKind::Rock,
            state.player.pos + Vec2::new(0.0, 0.1),
        ));

        for _ in 0..4 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        // Several overlapping ticks, a single decrement
        assert_eq!(state.player.resolve, 2);
    }

    #[test]
    fn test_despawn_sweep_runs_while_session_over() {
        let mut state = quiet_state(3);
        state.session.terminate();
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle::spawn(
            id,
            ObstacleKind::Crow,
            Vec2::new(0.0, DESPAWN_THRESHOLD_Y - 0.1),
        ));

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_obstacles_freeze_on_the_expiry_tick() {
        let mut state = quiet_state(3);
        let input = TickInput::default();

        // Drive the timer to one tick before expiry, then drop an obstacle in
        for _ in 0..59 {
            tick(&mut state, &input, 1.0);
        }
        let id = state.next_entity_id();
        state
            .obstacles
            .push(Obstacle::spawn(id, ObstacleKind::Rock, Vec2::new(1.0, 3.0)));

        // Expiry tick: timer flips first, so motion is already frozen
        tick(&mut state, &input, 1.0);
        assert!(!state.session.is_active());
        assert_eq!(state.obstacles[0].pos.y, 3.0);
    }

    #[test]
    fn test_spawner_fires_and_respects_game_over() {
        let mut state = new_state();
        let input = TickInput::default();

        // Default interval 1.0 s: four 0.25 s ticks produce one obstacle
        for _ in 0..4 {
            tick(&mut state, &input, 0.25);
        }
        assert_eq!(state.obstacles.len(), 1);

        state.session.terminate();
        for _ in 0..8 {
            tick(&mut state, &input, 0.25);
        }
        // Frozen spawner, frozen obstacle: nothing new, nothing moved
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = new_state();
        let mut state2 = new_state();
        let input = TickInput {
            move_dir: Vec2::new(0.7, -0.2),
        };

        for _ in 0..600 {
            tick(&mut state1, &input, SIM_DT);
            tick(&mut state2, &input, SIM_DT);
        }
        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.obstacles.len(), state2.obstacles.len());
        for (a, b) in state1.obstacles.iter().zip(&state2.obstacles) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.pos, b.pos);
        }
        assert_eq!(state1.player.pos, state2.player.pos);
    }

    proptest! {
        /// Whatever the tick sizes, elapsed never exceeds the limit and the
        /// active flag never flips back on.
        #[test]
        fn prop_elapsed_clamped_and_flag_one_way(dts in proptest::collection::vec(0.0f32..2.0, 1..200)) {
            let mut state = new_state();
            let input = TickInput::default();
            let mut seen_over = false;
            for dt in dts {
                tick(&mut state, &input, dt);
                prop_assert!(state.session.elapsed() <= state.session.limit());
                if seen_over {
                    prop_assert!(!state.session.is_active());
                }
                seen_over |= !state.session.is_active();
            }
        }

        /// Any contact schedule keeps resolve in [0, max] and produces at
        /// most one game-over event.
        #[test]
        fn prop_resolve_bounded_single_termination(contacts in proptest::collection::vec(any::<bool>(), 1..60)) {
            let mut state = quiet_state(3);
            let input = TickInput::default();
            let mut over_events = 0;
            for spawn_contact in contacts {
                if spawn_contact {
                    let id = state.next_entity_id();
                    state.obstacles.push(Obstacle::spawn(id, ObstacleKind::Rock, state.player.pos));
                }
                for event in tick(&mut state, &input, SIM_DT) {
                    if event == GameEvent::GameOver {
                        over_events += 1;
                    }
                }
                prop_assert!(state.player.resolve <= state.player.max_resolve);
            }
            prop_assert!(over_events <= 1);
        }

        /// Player position stays inside the arena for arbitrary inputs.
        #[test]
        fn prop_player_stays_in_bounds(
            moves in proptest::collection::vec((-1.5f32..1.5, -1.5f32..1.5), 1..300)
        ) {
            let mut state = new_state();
            for (x, y) in moves {
                let input = TickInput { move_dir: Vec2::new(x, y) };
                tick(&mut state, &input, SIM_DT);
                let bounds = state.player.bounds;
                prop_assert!(state.player.pos.x.abs() <= bounds.x);
                prop_assert!(state.player.pos.y.abs() <= bounds.y);
            }
        }
    }
}
