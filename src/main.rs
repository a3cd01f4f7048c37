//! Brickfall entry point
//!
//! Headless demo loop: builds the demo level set and plays it with a
//! simple ball-tracking paddle, logging the signals a host UI would
//! consume. Useful for watching the progression logic run end to end
//! (`RUST_LOG=info cargo run`).

use brickfall::consts::FRAME_RATE;
use brickfall::sim::{
    FrameInput, GamePhase, GameSignal, GameState, PaddleCommand, demo_levels, tick,
};
use brickfall::tuning::GameConfig;

/// Follow the first live ball with a small dead zone
fn track_ball(state: &GameState) -> PaddleCommand {
    let paddle_x = state.manager.player.rect.center().x;
    match state.manager.balls.iter().next() {
        Some(ball) if ball.rect.center().x < paddle_x - 0.01 => PaddleCommand::MoveLeft,
        Some(ball) if ball.rect.center().x > paddle_x + 0.01 => PaddleCommand::MoveRight,
        _ => PaddleCommand::Stop,
    }
}

fn main() {
    env_logger::init();

    let config = GameConfig::default();
    let mut state = GameState::new(config, demo_levels());

    // Ten simulated minutes is more than any demo run needs
    let frame_cap = 10 * 60 * u64::from(FRAME_RATE);

    while state.phase == GamePhase::Running && state.time_ticks < frame_cap {
        let input = FrameInput {
            paddle: track_ball(&state),
        };
        tick(&mut state, &input);

        for signal in state.drain_signals() {
            match signal {
                GameSignal::HudChanged => log::debug!(
                    "hud: lives={} score={} level={}",
                    state.manager.player.lives(),
                    state.manager.player.score(),
                    state.level_index()
                ),
                other => log::info!("signal: {other:?}"),
            }
        }
    }

    let seconds = state.time_ticks as f32 / FRAME_RATE as f32;
    println!(
        "{:?} after {seconds:.1}s - score {} on level {}, {} lives left",
        state.phase,
        state.manager.player.score(),
        state.level_index() + 1,
        state.manager.player.lives()
    );
}
