//! Draw-list extraction
//!
//! Flattens the simulation into a back-to-front sprite list plus the HUD
//! numbers, so a renderer collaborator can draw a frame without reaching
//! into simulation internals.

use crate::sim::{BlockKind, GameState, PowerUpKind, Rect};

/// What a sprite depicts; the renderer maps this to an image/color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Block(BlockKind),
    PowerUp(PowerUpKind),
    Ball,
    Player,
}

/// One rectangle to draw
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub rect: Rect,
}

/// HUD numbers the host renders as text
#[derive(Debug, Clone, Copy)]
pub struct Hud {
    pub lives: u32,
    pub score: u64,
    pub level: usize,
    /// Seconds left on the level clock, if the level has one
    pub time_remaining: Option<f32>,
}

/// A complete frame's draw data
#[derive(Debug, Clone)]
pub struct Scene {
    /// Back-to-front: blocks, power-ups, balls, player
    pub sprites: Vec<Sprite>,
    pub hud: Hud,
}

/// Build the draw list for the current frame
pub fn extract(state: &GameState) -> Scene {
    let manager = &state.manager;
    let mut sprites = Vec::with_capacity(
        manager.blocks.count() + manager.power_ups.count() + manager.balls.count() + 1,
    );

    for block in manager.blocks.iter() {
        sprites.push(Sprite {
            kind: SpriteKind::Block(block.kind),
            rect: block.rect,
        });
    }
    for power_up in manager.power_ups.iter() {
        sprites.push(Sprite {
            kind: SpriteKind::PowerUp(power_up.kind),
            rect: power_up.rect,
        });
    }
    for ball in manager.balls.iter() {
        sprites.push(Sprite {
            kind: SpriteKind::Ball,
            rect: ball.rect,
        });
    }
    sprites.push(Sprite {
        kind: SpriteKind::Player,
        rect: manager.player.rect,
    });

    Scene {
        sprites,
        hud: Hud {
            lives: manager.player.lives(),
            score: manager.player.score(),
            level: state.level_index(),
            time_remaining: state.time_remaining(),
        },
    }
}

impl GameState {
    /// Render entry point: the per-frame draw data for the host renderer
    pub fn render(&self) -> Scene {
        extract(self)
    }
}
