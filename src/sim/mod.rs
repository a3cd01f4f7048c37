//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - One fixed tick per rendered frame
//! - Seeded RNG only
//! - Stable container iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod container;
pub mod level;
pub mod manager;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, ball_rect_collision, reflect_velocity};
pub use container::{Entity, EntityContainer};
pub use level::{BlockPlacement, LevelMeta, LevelSpec, demo_levels};
pub use manager::EntityManager;
pub use rect::Rect;
pub use state::{
    Ball, Block, BlockKind, GamePhase, GameSignal, HitResponse, Player, PowerUp, PowerUpKind,
};
pub use tick::{FrameInput, GameState, PaddleCommand, tick};
