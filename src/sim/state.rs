//! Simulation entities and shared game types
//!
//! Everything here is plain data plus small behavior methods; the per-frame
//! orchestration lives in `manager` and `tick`. Block and power-up kinds
//! are tagged variants, not type hierarchies: the variant carries exactly
//! the payload its behavior needs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::container::Entity;
use super::rect::Rect;
use crate::scaled_dir;

/// Current phase of a run. `Won` and `Lost` are terminal; the surrounding
/// screen controller reacts to the matching [`GameSignal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    Won,
    Lost,
}

/// Transition requests emitted toward the host, drained once per frame.
/// The core never switches screens itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameSignal {
    /// Final level cleared
    Won,
    /// Lives exhausted or the level clock ran out
    Lost,
    /// A non-final level was cleared and the next one is loaded
    LevelAdvanced { level: usize },
    /// Lives, score or level number changed; the HUD should refresh
    HudChanged,
}

/// A ball in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    pub vel: Vec2,
    deleted: bool,
}

impl Ball {
    /// Spawn a ball from placement parameters; `dir` is normalized here
    pub fn new(pos: Vec2, extent: Vec2, speed: f32, dir: Vec2) -> Self {
        Self {
            rect: Rect::new(pos, extent),
            vel: scaled_dir(dir, speed),
            deleted: false,
        }
    }

    /// Advance by one frame's velocity
    pub fn advance(&mut self) {
        self.rect.translate(self.vel);
    }

    /// True once the ball's top edge has dropped below the field bottom
    pub fn out_of_bounds(&self) -> bool {
        self.rect.max().y < 0.0
    }
}

impl Entity for Ball {
    fn is_deleted(&self) -> bool {
        self.deleted
    }
    fn delete(&mut self) {
        self.deleted = true;
    }
}

/// Power-up variants; the variant is the activator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// +1 life, permanent
    ExtraLife,
    /// Paddle width x1.5, reverted after a fixed frame-counted delay
    WidePaddle,
    /// Every live ball grows x1.5, permanent
    BigBall,
    /// Hazard: -1 life
    LoseLife,
}

/// Block variants; `on_collision` is the whole per-kind behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    Normal,
    /// Never takes damage, never counts toward clearing a level
    Unbreakable,
    /// Consumes the ball; the manager respawns it per the configured policy
    Hungry,
    /// Drops the carried power-up at the block's center on destruction
    PowerUp(PowerUpKind),
}

/// What a ball impact did, from the ball's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResponse {
    /// Reflect the ball off the block
    Bounce,
    /// The block ate the ball
    ConsumeBall,
}

/// A destructible (or not) block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub rect: Rect,
    pub kind: BlockKind,
    pub hp: u32,
    /// Points awarded when destroyed
    pub value: u32,
    deleted: bool,
}

impl Block {
    pub fn new(pos: Vec2, extent: Vec2, kind: BlockKind, hp: u32, value: u32) -> Self {
        Self {
            rect: Rect::new(pos, extent),
            kind,
            hp,
            value,
            deleted: false,
        }
    }

    pub fn take_damage(&mut self) {
        self.hp = self.hp.saturating_sub(1);
    }

    /// Apply a ball hit according to this block's kind
    pub fn on_collision(&mut self) -> HitResponse {
        match self.kind {
            BlockKind::Unbreakable => HitResponse::Bounce,
            BlockKind::Hungry => {
                self.take_damage();
                HitResponse::ConsumeBall
            }
            BlockKind::Normal | BlockKind::PowerUp(_) => {
                self.take_damage();
                HitResponse::Bounce
            }
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.hp == 0
    }

    /// True if this block must be destroyed to clear the level
    pub fn counts_for_clear(&self) -> bool {
        !matches!(self.kind, BlockKind::Unbreakable)
    }
}

impl Entity for Block {
    fn is_deleted(&self) -> bool {
        self.deleted
    }
    fn delete(&mut self) {
        self.deleted = true;
    }
}

/// A falling power-up capsule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub rect: Rect,
    pub vel: Vec2,
    pub kind: PowerUpKind,
    deleted: bool,
}

impl PowerUp {
    /// Spawn centered on `center`, falling straight down
    pub fn new(center: Vec2, extent: Vec2, fall_speed: f32, kind: PowerUpKind) -> Self {
        Self {
            rect: Rect::from_center(center, extent),
            vel: Vec2::new(0.0, -fall_speed),
            kind,
            deleted: false,
        }
    }

    pub fn advance(&mut self) {
        self.rect.translate(self.vel);
    }

    /// True once the capsule has fallen out of the field
    pub fn out_of_bounds(&self) -> bool {
        self.rect.max().y < 0.0
    }
}

impl Entity for PowerUp {
    fn is_deleted(&self) -> bool {
        self.deleted
    }
    fn delete(&mut self) {
        self.deleted = true;
    }
}

/// The paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Extent before any active widen effect
    base_extent: Vec2,
    /// Input-derived horizontal velocity for the current frame
    vel_x: f32,
    lives: u32,
    score: u64,
    /// Frames until the widen effect reverts (0 = not widened)
    widen_ticks: u32,
}

impl Player {
    pub fn new(pos: Vec2, extent: Vec2, lives: u32) -> Self {
        Self {
            rect: Rect::new(pos, extent),
            base_extent: extent,
            vel_x: 0.0,
            lives,
            score: 0,
            widen_ticks: 0,
        }
    }

    /// Set the horizontal velocity derived from the current input command
    pub fn set_velocity(&mut self, vel_x: f32) {
        self.vel_x = vel_x;
    }

    /// Move by the current velocity, clamped to the horizontal field
    pub fn advance(&mut self) {
        self.rect.pos.x += self.vel_x;
        self.clamp_to_field();
    }

    fn clamp_to_field(&mut self) {
        self.rect.pos.x = self.rect.pos.x.clamp(0.0, 1.0 - self.rect.extent.x);
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn take_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    pub fn add_life(&mut self) {
        self.lives += 1;
    }

    pub fn add_points(&mut self, points: u64) {
        self.score += points;
    }

    /// Widen to `factor` x base width for `duration_ticks` frames.
    /// Re-activation resets the timer; width stays exactly factor x base.
    pub fn widen(&mut self, factor: f32, duration_ticks: u32) {
        self.rect
            .resize_about_center(Vec2::new(self.base_extent.x * factor, self.base_extent.y));
        self.clamp_to_field();
        self.widen_ticks = duration_ticks;
    }

    /// Count down the frame-based effect timers; reverts the widen effect
    /// when its deadline passes. Called once per frame from the manager.
    pub fn tick_effects(&mut self) {
        if self.widen_ticks > 0 {
            self.widen_ticks -= 1;
            if self.widen_ticks == 0 {
                self.rect.resize_about_center(self.base_extent);
                self.clamp_to_field();
            }
        }
    }

    /// True while a widen effect is pending reversal
    pub fn is_widened(&self) -> bool {
        self.widen_ticks > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_unbreakable_never_damaged() {
        let mut block = Block::new(Vec2::ZERO, Vec2::new(0.1, 0.05), BlockKind::Unbreakable, 1, 10);
        for _ in 0..100 {
            assert_eq!(block.on_collision(), HitResponse::Bounce);
        }
        assert_eq!(block.hp, 1);
        assert!(!block.is_destroyed());
        assert!(!block.counts_for_clear());
    }

    #[test]
    fn test_normal_block_destroyed_at_zero_hp() {
        let mut block = Block::new(Vec2::ZERO, Vec2::new(0.1, 0.05), BlockKind::Normal, 1, 10);
        block.on_collision();
        assert!(block.is_destroyed());
    }

    #[test]
    fn test_hungry_block_consumes_ball() {
        let mut block = Block::new(Vec2::ZERO, Vec2::new(0.1, 0.05), BlockKind::Hungry, 2, 10);
        assert_eq!(block.on_collision(), HitResponse::ConsumeBall);
        assert_eq!(block.hp, 1);
    }

    #[test]
    fn test_ball_out_of_bounds_by_top_edge() {
        let mut ball = Ball::new(Vec2::new(0.5, 0.01), BALL_EXTENT, 0.0, Vec2::ZERO);
        assert!(!ball.out_of_bounds());
        ball.rect.pos.y = -BALL_EXTENT.y - 0.001;
        assert!(ball.out_of_bounds());
    }

    #[test]
    fn test_widen_reverts_after_deadline() {
        let mut player = Player::new(PLAYER_POSITION, PLAYER_EXTENT, 3);
        let original = player.rect.extent.x;

        player.widen(WIDEN_FACTOR, WIDEN_DURATION_TICKS);
        assert!((player.rect.extent.x - original * WIDEN_FACTOR).abs() < 1e-6);

        for _ in 0..WIDEN_DURATION_TICKS {
            player.tick_effects();
        }
        assert!(!player.is_widened());
        assert!((player.rect.extent.x - original).abs() < 1e-6);
    }

    #[test]
    fn test_widen_does_not_stack() {
        let mut player = Player::new(PLAYER_POSITION, PLAYER_EXTENT, 3);
        let original = player.rect.extent.x;
        player.widen(WIDEN_FACTOR, WIDEN_DURATION_TICKS);
        player.widen(WIDEN_FACTOR, WIDEN_DURATION_TICKS);
        assert!((player.rect.extent.x - original * WIDEN_FACTOR).abs() < 1e-6);
    }

    #[test]
    fn test_player_clamped_to_field() {
        let mut player = Player::new(PLAYER_POSITION, PLAYER_EXTENT, 3);
        player.set_velocity(-1.0);
        player.advance();
        assert_eq!(player.rect.pos.x, 0.0);
        player.set_velocity(2.0);
        player.advance();
        assert!((player.rect.pos.x - (1.0 - PLAYER_EXTENT.x)).abs() < 1e-6);
    }
}
