//! Collision detection and response
//!
//! Pure geometric resolution between balls and blocks, the paddle, and the
//! field bounds. The only mutation routed through here is the block's own
//! collision behavior; scoring and power-up drops stay in the manager.

use glam::Vec2;

use super::container::{Entity, EntityContainer};
use super::rect::Rect;
use super::state::{Ball, Block, BlockKind, HitResponse, Player};
use crate::scaled_dir;

/// How strongly the impact offset from the paddle center steers the ball.
/// 1.0 sends an edge hit out at 45 degrees.
const PADDLE_STEER: f32 = 0.8;

/// Result of a rectangle collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the rectangles intersect
    pub hit: bool,
    /// Axis-aligned surface normal pointing toward the ball (if hit)
    pub normal: Vec2,
    /// Penetration depth along the normal
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Test the ball rectangle against another rectangle.
///
/// The normal lies on the axis of least penetration - the side the ball
/// entered from - and points from the other rectangle toward the ball, so
/// reflecting the velocity about it flips exactly one component.
pub fn ball_rect_collision(ball: &Rect, other: &Rect) -> CollisionResult {
    if !ball.intersects(other) {
        return CollisionResult::miss();
    }

    let depth = ball.overlap(other);
    let delta = ball.center() - other.center();

    if depth.x < depth.y {
        CollisionResult {
            hit: true,
            normal: Vec2::new(delta.x.signum(), 0.0),
            penetration: depth.x,
        }
    } else {
        CollisionResult {
            hit: true,
            normal: Vec2::new(0.0, delta.y.signum()),
            penetration: depth.y,
        }
    }
}

/// Reflect velocity off a surface: v' = v - 2(v.n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Reflect the ball about the collision normal if it is moving into the
/// surface; a ball already separating is left alone so one contact cannot
/// flip it twice.
pub fn resolve_ball_bounce(ball: &mut Ball, result: &CollisionResult) {
    if result.hit && ball.vel.dot(result.normal) < 0.0 {
        ball.vel = reflect_velocity(ball.vel, result.normal);
    }
}

/// What the first intersecting block did to the ball
#[derive(Debug)]
pub struct BlockHit {
    pub response: HitResponse,
    /// Set when the hit destroyed the block: (kind, center, point value)
    pub destroyed: Option<(BlockKind, Vec2, u32)>,
}

/// Scan blocks in container order and resolve the FIRST intersecting one.
///
/// Further blocks overlapping the ball in the same frame are ignored; the
/// scan order is the container's insertion order, with no nearest-distance
/// tie-break. A destroyed block is marked for removal here; score and drop
/// handling belong to the caller.
pub fn check_block_collisions(
    blocks: &mut EntityContainer<Block>,
    ball: &mut Ball,
) -> Option<BlockHit> {
    for block in blocks.iter_mut() {
        let result = ball_rect_collision(&ball.rect, &block.rect);
        if !result.hit {
            continue;
        }

        let response = block.on_collision();
        if response == HitResponse::Bounce {
            resolve_ball_bounce(ball, &result);
        }

        let destroyed = if block.is_destroyed() {
            block.delete();
            Some((block.kind, block.rect.center(), block.value))
        } else {
            None
        };

        return Some(BlockHit {
            response,
            destroyed,
        });
    }
    None
}

/// Bounce the ball off the paddle: send it upward with the horizontal
/// direction biased by how far from the paddle center it struck, keeping
/// the speed unchanged. Returns true on contact.
pub fn check_ball_player_collision(ball: &mut Ball, player: &Player) -> bool {
    if !ball.rect.intersects(&player.rect) {
        return false;
    }
    // A ball already heading up has been served this contact
    if ball.vel.y >= 0.0 {
        return false;
    }

    let speed = ball.vel.length();
    let half_width = player.rect.extent.x / 2.0;
    let offset =
        ((ball.rect.center().x - player.rect.center().x) / half_width).clamp(-1.0, 1.0);
    ball.vel = scaled_dir(Vec2::new(offset * PADDLE_STEER, 1.0), speed);
    true
}

/// Reflect off the side walls and ceiling, clamping back inside the field.
/// The bottom edge does not reflect; leaving through it is ball loss,
/// detected by [`Ball::out_of_bounds`].
pub fn resolve_wall_bounce(ball: &mut Ball) {
    let max = ball.rect.max();
    if ball.rect.pos.x < 0.0 && ball.vel.x < 0.0 {
        ball.vel.x = -ball.vel.x;
        ball.rect.pos.x = 0.0;
    } else if max.x > 1.0 && ball.vel.x > 0.0 {
        ball.vel.x = -ball.vel.x;
        ball.rect.pos.x = 1.0 - ball.rect.extent.x;
    }
    if max.y > 1.0 && ball.vel.y > 0.0 {
        ball.vel.y = -ball.vel.y;
        ball.rect.pos.y = 1.0 - ball.rect.extent.y;
    }
}
