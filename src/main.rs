//! Dodgefall entry point
//!
//! Headless demo host: runs the fixed timestep loop with a scripted zigzag
//! input until the session ends, printing the presentation events a real
//! front end would bind to widgets.

use glam::Vec2;

use dodgefall::consts::SIM_DT;
use dodgefall::sim::{GameEvent, GameState, TickInput, tick};
use dodgefall::GameConfig;

fn main() {
    env_logger::init();

    let seed = 0xD0D6EFA11;
    let mut state = match GameState::new(GameConfig::default(), seed) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("invalid config: {err}");
            std::process::exit(1);
        }
    };

    println!("dodgefall (seed {seed:#x})");

    let mut last_clock = String::new();
    while state.session.is_active() {
        // Scripted input: sweep left and right across the arena
        let phase = (state.time_ticks as f32 * SIM_DT * 0.8).sin();
        let input = TickInput {
            move_dir: Vec2::new(phase, 0.0),
        };

        for event in tick(&mut state, &input, SIM_DT) {
            match event {
                GameEvent::ClockUpdated { text } => {
                    if text != last_clock {
                        println!("clock  {text}");
                        last_clock = text;
                    }
                }
                GameEvent::ResolveChanged { current, max } => {
                    println!("resolve {current}/{max}");
                }
                GameEvent::GameOver => println!("game over"),
            }
        }
    }

    println!(
        "survived {:.0}s with {} resolve left, {} obstacles still falling",
        state.session.elapsed(),
        state.player.resolve,
        state.obstacles.len()
    );
}
