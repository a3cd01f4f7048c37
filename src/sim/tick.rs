//! Per-frame entry point and the progression state machine
//!
//! One `tick` per rendered frame: movement + collision first, then the
//! progression decision in fixed priority order. Transitions are emitted
//! as [`GameSignal`]s for the host to consume; the core never switches
//! screens itself.

use super::level::LevelSpec;
use super::manager::EntityManager;
use super::state::{GamePhase, GameSignal};
use crate::consts::FRAME_DT;
use crate::tuning::GameConfig;

/// Discrete paddle command from the input-mapping collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaddleCommand {
    MoveLeft,
    MoveRight,
    #[default]
    Stop,
}

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub paddle: PaddleCommand,
}

/// Complete state of a run
#[derive(Debug)]
pub struct GameState {
    pub manager: EntityManager,
    levels: Vec<LevelSpec>,
    level_index: usize,
    pub phase: GamePhase,
    /// Frames since the run started
    pub time_ticks: u64,
    /// Frames since the current level started (drives the time limit)
    level_ticks: u64,
    signals: Vec<GameSignal>,
}

impl GameState {
    /// Start a run: paddle, the first level's blocks, one served ball.
    /// The level set comes from the level-loading collaborator and is
    /// assumed well-formed and non-empty.
    pub fn new(config: GameConfig, levels: Vec<LevelSpec>) -> Self {
        let mut manager = EntityManager::new(config);
        if let Some(first) = levels.first() {
            manager.load_blocks(first);
        }
        manager.spawn_ball_above_player();

        Self {
            manager,
            levels,
            level_index: 0,
            phase: GamePhase::Running,
            time_ticks: 0,
            level_ticks: 0,
            // The HUD draws its initial lives/score/level from this
            signals: vec![GameSignal::HudChanged],
        }
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn current_level(&self) -> Option<&LevelSpec> {
        self.levels.get(self.level_index)
    }

    /// Seconds elapsed in the current level
    pub fn level_time(&self) -> f32 {
        self.level_ticks as f32 * FRAME_DT
    }

    /// Seconds until the level clock runs out, if this level has one
    pub fn time_remaining(&self) -> Option<f32> {
        self.current_level()
            .and_then(|level| level.meta.time_limit)
            .map(|limit| (limit - self.level_time()).max(0.0))
    }

    /// Hand the queued transition/HUD signals to the host
    pub fn drain_signals(&mut self) -> Vec<GameSignal> {
        std::mem::take(&mut self.signals)
    }

    fn advance_level(&mut self) {
        self.manager.balls.clear();
        self.manager.power_ups.clear();
        self.level_index += 1;
        self.level_ticks = 0;
        self.manager.load_blocks(&self.levels[self.level_index]);
        self.manager.spawn_ball_above_player();
        self.signals
            .push(GameSignal::LevelAdvanced { level: self.level_index });
        self.signals.push(GameSignal::HudChanged);
        log::info!("level advanced: {}", self.level_index);
    }
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &FrameInput) {
    // Won/Lost are terminal; the host owns what happens next
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;
    state.level_ticks += 1;

    let dir = match input.paddle {
        PaddleCommand::MoveLeft => -1.0,
        PaddleCommand::MoveRight => 1.0,
        PaddleCommand::Stop => 0.0,
    };
    state.manager.set_player_command(dir);
    state.manager.move_entities(&mut state.signals);

    // Progression, fixed priority order.
    //
    // 1. Out of time or out of lives loses the run.
    let time_out = state
        .current_level()
        .and_then(|level| level.meta.time_limit)
        .is_some_and(|limit| state.level_time() >= limit);
    if state.manager.player.lives() == 0 || time_out {
        state.phase = GamePhase::Lost;
        state.signals.push(GameSignal::Lost);
        log::info!(
            "run lost: lives={} time_out={time_out}",
            state.manager.player.lives()
        );
        return;
    }

    // 2. Clearing the final level wins the run.
    let cleared = state.manager.level_cleared();
    let on_final_level = state.level_index + 1 >= state.levels.len();
    if cleared && on_final_level {
        state.phase = GamePhase::Won;
        state.signals.push(GameSignal::Won);
        log::info!("run won: score={}", state.manager.player.score());
        return;
    }

    // 3. A frame must never end ball-less while lives remain: deduct one
    //    life and serve exactly one replacement. Lives hitting zero here
    //    is picked up by check 1 next frame.
    if state.manager.balls.count() == 0 {
        state.manager.player.take_life();
        state.manager.spawn_ball_above_player();
        state.signals.push(GameSignal::HudChanged);
    }

    // 4. Clearing a non-final level advances to the next one.
    if cleared {
        state.advance_level();
    }
}
