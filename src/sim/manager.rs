//! Entity ownership and the per-frame movement pass
//!
//! The manager owns the three entity containers and the paddle, and runs
//! one movement + collision pass per frame. Entities spawned while a
//! container is mid-pass (ball respawns, power-up drops) go through
//! deferred lists appended once the pass ends, so a pass is never
//! corrupted by its own side effects.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision;
use super::container::{Entity, EntityContainer};
use super::level::LevelSpec;
use super::state::{
    Ball, Block, BlockKind, GameSignal, HitResponse, Player, PowerUp, PowerUpKind,
};
use crate::tuning::{GameConfig, HungryRespawn};

/// Vertical gap between the paddle top and a freshly served ball
const SERVE_GAP: f32 = 0.005;

/// Owner of all live entities
#[derive(Debug)]
pub struct EntityManager {
    pub blocks: EntityContainer<Block>,
    pub balls: EntityContainer<Ball>,
    pub power_ups: EntityContainer<PowerUp>,
    pub player: Player,
    config: GameConfig,
    rng: Pcg32,
}

impl EntityManager {
    pub fn new(config: GameConfig) -> Self {
        let player = Player::new(
            config.player_pos,
            config.player_extent,
            config.starting_lives,
        );
        let rng = Pcg32::seed_from_u64(config.seed);
        Self {
            blocks: EntityContainer::new(),
            balls: EntityContainer::new(),
            power_ups: EntityContainer::new(),
            player,
            config,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Replace the block field with a level's placements
    pub fn load_blocks(&mut self, level: &LevelSpec) {
        self.blocks.clear();
        for p in &level.blocks {
            self.blocks
                .add(Block::new(p.pos, p.extent, p.kind, p.hp, p.value));
        }
    }

    /// Serve a fresh ball anchored above the paddle with the standard
    /// speed and direction
    pub fn spawn_ball_above_player(&mut self) {
        let ball = serve_ball(&self.player, &self.config);
        self.balls.add(ball);
    }

    /// Translate the frame's paddle command into a velocity
    pub fn set_player_command(&mut self, dir: f32) {
        self.player.set_velocity(dir * self.config.player_speed);
    }

    /// True when every block that counts toward clearing is gone
    pub fn level_cleared(&self) -> bool {
        !self.blocks.iter().any(|b| b.counts_for_clear())
    }

    /// One frame of movement and collision resolution
    pub fn move_entities(&mut self, signals: &mut Vec<GameSignal>) {
        let Self {
            blocks,
            balls,
            power_ups,
            player,
            config,
            rng,
        } = self;

        // Paddle first: balls and pickups resolve against its new position
        player.advance();
        player.tick_effects();

        let mut spawned_balls: Vec<Ball> = Vec::new();
        let mut drops: Vec<PowerUp> = Vec::new();
        let mut score_delta: u64 = 0;

        balls.iterate(|ball| {
            if let Some(hit) = collision::check_block_collisions(blocks, ball) {
                if let Some((kind, center, value)) = hit.destroyed {
                    score_delta += u64::from(value);
                    if let BlockKind::PowerUp(power) = kind {
                        drops.push(PowerUp::new(
                            center,
                            config.power_up_extent,
                            config.power_up_fall_speed,
                            power,
                        ));
                    }
                }
                if hit.response == HitResponse::ConsumeBall {
                    ball.delete();
                    spawned_balls.push(respawn_consumed_ball(
                        config.hungry_respawn,
                        rng,
                        player,
                        config,
                    ));
                    return;
                }
            }

            collision::check_ball_player_collision(ball, player);
            collision::resolve_wall_bounce(ball);

            if ball.out_of_bounds() {
                ball.delete();
                player.take_life();
                signals.push(GameSignal::HudChanged);
                spawned_balls.push(serve_ball(player, config));
                return;
            }

            ball.advance();
        });

        blocks.purge();
        for ball in spawned_balls {
            balls.add(ball);
        }
        if score_delta > 0 {
            player.add_points(score_delta);
            signals.push(GameSignal::HudChanged);
        }

        // Power-ups fall, get picked up by the paddle, or leave the field.
        // Effects apply after the pass so activation never mutates a
        // container that is still being walked; capsules dropped this frame
        // join the container afterwards and start falling next frame.
        let mut collected: Vec<PowerUpKind> = Vec::new();
        power_ups.iterate(|power_up| {
            power_up.advance();
            if power_up.rect.intersects(&player.rect) {
                collected.push(power_up.kind);
                power_up.delete();
            } else if power_up.out_of_bounds() {
                power_up.delete();
            }
        });
        for kind in collected {
            activate(kind, player, balls, config, signals);
        }
        for capsule in drops {
            log::debug!("power-up dropped: {:?}", capsule.kind);
            power_ups.add(capsule);
        }
    }
}

/// Standard serve: ball centered above the paddle
fn serve_ball(player: &Player, config: &GameConfig) -> Ball {
    let pos = Vec2::new(
        player.rect.center().x - config.ball_extent.x / 2.0,
        player.rect.max().y + SERVE_GAP,
    );
    Ball::new(pos, config.ball_extent, config.ball_speed, config.ball_direction)
}

/// Respawn a ball eaten by a Hungry block, per the configured policy
fn respawn_consumed_ball(
    policy: HungryRespawn,
    rng: &mut Pcg32,
    player: &Player,
    config: &GameConfig,
) -> Ball {
    let center = match policy {
        HungryRespawn::AbovePaddle => {
            return serve_ball(player, config);
        }
        HungryRespawn::Center => Vec2::new(0.5, 0.5),
        HungryRespawn::Random => Vec2::new(
            rng.random_range(0.1..0.9),
            rng.random_range(0.5..0.8),
        ),
    };
    let pos = center - config.ball_extent / 2.0;
    Ball::new(pos, config.ball_extent, config.ball_speed, config.ball_direction)
}

/// Apply a collected power-up to shared game state. Runs at most once per
/// capsule: the capsule is marked for removal before effects apply.
fn activate(
    kind: PowerUpKind,
    player: &mut Player,
    balls: &mut EntityContainer<Ball>,
    config: &GameConfig,
    signals: &mut Vec<GameSignal>,
) {
    log::info!("power-up activated: {kind:?}");
    match kind {
        PowerUpKind::ExtraLife => {
            player.add_life();
            signals.push(GameSignal::HudChanged);
        }
        PowerUpKind::LoseLife => {
            player.take_life();
            signals.push(GameSignal::HudChanged);
        }
        PowerUpKind::WidePaddle => {
            player.widen(config.widen_factor, config.widen_duration_ticks);
        }
        PowerUpKind::BigBall => {
            for ball in balls.iter_mut() {
                ball.rect
                    .scale_about_center(Vec2::splat(config.big_ball_factor));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn manager_with_ball() -> EntityManager {
        let mut manager = EntityManager::new(GameConfig::default());
        manager.spawn_ball_above_player();
        manager
    }

    fn sink_first_ball(manager: &mut EntityManager) {
        let ball = manager.balls.iter_mut().next().unwrap();
        ball.rect.pos = Vec2::new(0.5, -0.2);
        ball.vel = Vec2::new(0.0, -BALL_SPEED);
    }

    #[test]
    fn test_ball_loss_deducts_life_and_respawns() {
        let mut manager = manager_with_ball();
        let mut signals = Vec::new();

        sink_first_ball(&mut manager);
        manager.move_entities(&mut signals);

        assert_eq!(manager.player.lives(), STARTING_LIVES - 1);
        assert_eq!(manager.balls.count(), 1);
        assert!(signals.contains(&GameSignal::HudChanged));

        // The replacement sits above the paddle, moving upward
        let ball = manager.balls.iter().next().unwrap();
        assert!(ball.rect.pos.y > manager.player.rect.max().y);
        assert!(ball.vel.y > 0.0);
    }

    #[test]
    fn test_hungry_block_keeps_ball_count() {
        let mut manager = manager_with_ball();
        manager.blocks.add(Block::new(
            Vec2::new(0.4, 0.7),
            Vec2::new(0.2, 0.05),
            BlockKind::Hungry,
            3,
            10,
        ));

        // Park the ball inside the hungry block
        let ball = manager.balls.iter_mut().next().unwrap();
        ball.rect.pos = Vec2::new(0.48, 0.68);
        ball.vel = Vec2::new(0.0, BALL_SPEED);

        let mut signals = Vec::new();
        manager.move_entities(&mut signals);

        assert_eq!(manager.balls.count(), 1);
        assert_eq!(manager.player.lives(), STARTING_LIVES);
        assert_eq!(manager.blocks.iter().next().unwrap().hp, 2);
    }

    #[test]
    fn test_destroyed_power_up_block_drops_capsule() {
        let mut manager = manager_with_ball();
        manager.blocks.add(Block::new(
            Vec2::new(0.4, 0.7),
            Vec2::new(0.2, 0.05),
            BlockKind::PowerUp(PowerUpKind::ExtraLife),
            1,
            10,
        ));

        let ball = manager.balls.iter_mut().next().unwrap();
        ball.rect.pos = Vec2::new(0.48, 0.68);
        ball.vel = Vec2::new(0.0, BALL_SPEED);

        let mut signals = Vec::new();
        manager.move_entities(&mut signals);

        assert_eq!(manager.blocks.count(), 0);
        assert_eq!(manager.power_ups.count(), 1);
        assert_eq!(manager.player.score(), 10);

        // Capsule spawned centered on the destroyed block
        let capsule = manager.power_ups.iter().next().unwrap();
        assert!((capsule.rect.center() - Vec2::new(0.5, 0.725)).length() < 1e-4);
        assert!(capsule.vel.y < 0.0);
    }

    #[test]
    fn test_power_up_pickup_activates_once() {
        let mut manager = manager_with_ball();
        manager.power_ups.add(PowerUp::new(
            manager.player.rect.center(),
            POWER_UP_EXTENT,
            POWER_UP_FALL_SPEED,
            PowerUpKind::ExtraLife,
        ));

        let mut signals = Vec::new();
        manager.move_entities(&mut signals);
        assert_eq!(manager.player.lives(), STARTING_LIVES + 1);
        assert_eq!(manager.power_ups.count(), 0);

        // A later frame must not re-apply the effect
        manager.move_entities(&mut signals);
        assert_eq!(manager.player.lives(), STARTING_LIVES + 1);
    }

    #[test]
    fn test_missed_power_up_expires_without_effect() {
        let mut manager = manager_with_ball();
        let mut capsule = PowerUp::new(
            Vec2::new(0.9, 0.5),
            POWER_UP_EXTENT,
            POWER_UP_FALL_SPEED,
            PowerUpKind::ExtraLife,
        );
        capsule.rect.pos.y = -0.2;

        manager.power_ups.add(capsule);
        let mut signals = Vec::new();
        manager.move_entities(&mut signals);

        assert_eq!(manager.power_ups.count(), 0);
        assert_eq!(manager.player.lives(), STARTING_LIVES);
    }

    #[test]
    fn test_lose_life_hazard() {
        let mut manager = manager_with_ball();
        manager.power_ups.add(PowerUp::new(
            manager.player.rect.center(),
            POWER_UP_EXTENT,
            POWER_UP_FALL_SPEED,
            PowerUpKind::LoseLife,
        ));

        let mut signals = Vec::new();
        manager.move_entities(&mut signals);
        assert_eq!(manager.player.lives(), STARTING_LIVES - 1);
    }

    #[test]
    fn test_big_ball_scales_live_balls() {
        let mut manager = manager_with_ball();
        let before = manager.balls.iter().next().unwrap().rect.extent;

        manager.power_ups.add(PowerUp::new(
            manager.player.rect.center(),
            POWER_UP_EXTENT,
            POWER_UP_FALL_SPEED,
            PowerUpKind::BigBall,
        ));

        let mut signals = Vec::new();
        manager.move_entities(&mut signals);

        let after = manager.balls.iter().next().unwrap().rect.extent;
        assert!((after.x - before.x * BIG_BALL_FACTOR).abs() < 1e-6);
        assert!((after.y - before.y * BIG_BALL_FACTOR).abs() < 1e-6);
    }

    #[test]
    fn test_wide_paddle_pickup_widens_then_reverts() {
        let mut manager = manager_with_ball();
        let original = manager.player.rect.extent.x;

        manager.power_ups.add(PowerUp::new(
            manager.player.rect.center(),
            POWER_UP_EXTENT,
            POWER_UP_FALL_SPEED,
            PowerUpKind::WidePaddle,
        ));

        let mut signals = Vec::new();
        manager.move_entities(&mut signals);
        assert!(
            (manager.player.rect.extent.x - original * WIDEN_FACTOR).abs() < 1e-6
        );

        // Keep the ball clear of the bottom while the timer runs out
        for _ in 0..WIDEN_DURATION_TICKS {
            if manager.balls.count() == 0 {
                manager.spawn_ball_above_player();
            }
            manager.move_entities(&mut signals);
        }
        assert!((manager.player.rect.extent.x - original).abs() < 1e-4);
    }

    #[test]
    fn test_level_cleared_ignores_unbreakable() {
        let mut manager = EntityManager::new(GameConfig::default());
        manager.blocks.add(Block::new(
            Vec2::new(0.1, 0.7),
            Vec2::new(0.1, 0.04),
            BlockKind::Unbreakable,
            1,
            0,
        ));
        assert!(manager.level_cleared());

        manager.blocks.add(Block::new(
            Vec2::new(0.3, 0.7),
            Vec2::new(0.1, 0.04),
            BlockKind::Normal,
            1,
            10,
        ));
        assert!(!manager.level_cleared());
    }

    #[test]
    fn test_load_blocks_replaces_field() {
        let mut manager = EntityManager::new(GameConfig::default());
        let level = LevelSpec::grid("t", 2, 4, 1, |_, _| BlockKind::Normal);
        manager.load_blocks(&level);
        assert_eq!(manager.blocks.count(), 8);

        let next = LevelSpec::grid("u", 1, 3, 1, |_, _| BlockKind::Normal);
        manager.load_blocks(&next);
        assert_eq!(manager.blocks.count(), 3);
    }

    #[test]
    fn test_serve_ball_anchored_above_paddle() {
        let manager = manager_with_ball();
        let ball = manager.balls.iter().next().unwrap();
        let paddle = &manager.player.rect;
        assert!((ball.rect.center().x - paddle.center().x).abs() < 1e-6);
        assert!(ball.rect.pos.y >= paddle.max().y);
    }
}
