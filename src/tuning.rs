//! Data-driven game balance
//!
//! Everything a designer may want to retune without touching simulation
//! code lives in [`GameConfig`]. Defaults come from [`crate::consts`];
//! hosts can override any subset via JSON.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Where a ball eaten by a Hungry block reappears.
///
/// The policy is configuration, not hard-coded: pick whichever fits the
/// level design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HungryRespawn {
    /// Anchored above the paddle, like a fresh serve
    #[default]
    AbovePaddle,
    /// Center of the playfield
    Center,
    /// Uniformly random position in the upper half of the field (seeded)
    Random,
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub starting_lives: u32,

    // Paddle
    pub player_pos: Vec2,
    pub player_extent: Vec2,
    pub player_speed: f32,

    // Ball
    pub ball_extent: Vec2,
    pub ball_speed: f32,
    pub ball_direction: Vec2,

    // Power-ups
    pub power_up_extent: Vec2,
    pub power_up_fall_speed: f32,
    pub widen_factor: f32,
    pub widen_duration_ticks: u32,
    pub big_ball_factor: f32,

    // Blocks
    pub hungry_respawn: HungryRespawn,

    /// Run seed; drives every random draw the simulation makes
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_lives: STARTING_LIVES,
            player_pos: PLAYER_POSITION,
            player_extent: PLAYER_EXTENT,
            player_speed: PLAYER_SPEED,
            ball_extent: BALL_EXTENT,
            ball_speed: BALL_SPEED,
            ball_direction: BALL_DIRECTION,
            power_up_extent: POWER_UP_EXTENT,
            power_up_fall_speed: POWER_UP_FALL_SPEED,
            widen_factor: WIDEN_FACTOR,
            widen_duration_ticks: WIDEN_DURATION_TICKS,
            big_ball_factor: BIG_BALL_FACTOR,
            hungry_respawn: HungryRespawn::default(),
            seed: 0,
        }
    }
}

impl GameConfig {
    /// Load a config handed over by the host; missing fields keep their
    /// defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
