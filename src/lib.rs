//! Brickfall - a classic block-breaking arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, progression)
//! - `scene`: Draw-list extraction for a renderer collaborator
//! - `tuning`: Data-driven game balance
//!
//! The crate is headless: rendering, audio, input mapping and screen
//! switching live in the host. The host feeds one [`sim::FrameInput`] per
//! rendered frame into [`sim::tick`] and drains the emitted
//! [`sim::GameSignal`]s to drive screens and HUD text.

pub mod scene;
pub mod sim;
pub mod tuning;

pub use scene::Scene;
pub use tuning::{GameConfig, HungryRespawn};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Simulation frame rate (fixed-step, one tick per rendered frame)
    pub const FRAME_RATE: u32 = 60;
    /// Seconds advanced per simulation frame
    pub const FRAME_DT: f32 = 1.0 / FRAME_RATE as f32;

    /// Paddle defaults - the paddle slides along the bottom of the field
    pub const PLAYER_EXTENT: Vec2 = Vec2::new(0.2, 0.028);
    pub const PLAYER_POSITION: Vec2 = Vec2::new(0.4, 0.04);
    pub const PLAYER_SPEED: f32 = 0.018;

    /// Ball defaults
    pub const BALL_EXTENT: Vec2 = Vec2::new(0.03, 0.03);
    pub const BALL_SPEED: f32 = 0.012;
    /// Default launch direction (normalized at spawn time)
    pub const BALL_DIRECTION: Vec2 = Vec2::new(0.35, 1.0);

    /// Power-up defaults
    pub const POWER_UP_EXTENT: Vec2 = Vec2::new(0.05, 0.05);
    pub const POWER_UP_FALL_SPEED: f32 = 0.008;

    /// Paddle widen effect: 1.5x width, reverted after 5 seconds
    pub const WIDEN_FACTOR: f32 = 1.5;
    pub const WIDEN_DURATION_TICKS: u32 = 5 * FRAME_RATE;

    /// Big-ball effect multiplier (permanent)
    pub const BIG_BALL_FACTOR: f32 = 1.5;

    /// Lives at the start of a run
    pub const STARTING_LIVES: u32 = 3;
}

/// Normalize a direction and scale it to the given speed
#[inline]
pub fn scaled_dir(dir: Vec2, speed: f32) -> Vec2 {
    dir.normalize_or_zero() * speed
}
