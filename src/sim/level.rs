//! Level placement data
//!
//! The level file parser is an external collaborator; this module only
//! models the well-formed data it hands over - ordered block placements
//! plus level metadata - and a grid builder used by the demo binary and
//! the tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{BlockKind, PowerUpKind};

/// One block placement, in playfield coordinates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockPlacement {
    pub pos: Vec2,
    pub extent: Vec2,
    pub kind: BlockKind,
    pub hp: u32,
    /// Points awarded on destruction
    #[serde(default = "default_value")]
    pub value: u32,
}

fn default_value() -> u32 {
    10
}

/// Level metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelMeta {
    #[serde(default)]
    pub name: String,
    /// Optional time limit in seconds; reaching it loses the run
    #[serde(default)]
    pub time_limit: Option<f32>,
}

/// Ordered block placements plus metadata for one level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSpec {
    #[serde(default)]
    pub meta: LevelMeta,
    pub blocks: Vec<BlockPlacement>,
}

/// Block grid layout: columns span the field between side margins, rows
/// stack downward from the top margin.
const GRID_SIDE_MARGIN: f32 = 0.02;
const GRID_TOP: f32 = 0.92;
const GRID_GAP: f32 = 0.005;
const GRID_BLOCK_HEIGHT: f32 = 0.04;

impl LevelSpec {
    /// Deserialize a level handed over by the level-loading collaborator
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Uniform grid of blocks across the upper field. `kind_for(row, col)`
    /// picks each block's variant; row 0 is the top row.
    pub fn grid(
        name: &str,
        rows: usize,
        cols: usize,
        hp: u32,
        kind_for: impl Fn(usize, usize) -> BlockKind,
    ) -> Self {
        let span = 1.0 - 2.0 * GRID_SIDE_MARGIN;
        let width = (span - GRID_GAP * (cols.saturating_sub(1)) as f32) / cols.max(1) as f32;
        let extent = Vec2::new(width, GRID_BLOCK_HEIGHT);

        let mut blocks = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            let y = GRID_TOP - row as f32 * (GRID_BLOCK_HEIGHT + GRID_GAP);
            for col in 0..cols {
                let x = GRID_SIDE_MARGIN + col as f32 * (width + GRID_GAP);
                blocks.push(BlockPlacement {
                    pos: Vec2::new(x, y),
                    extent,
                    kind: kind_for(row, col),
                    hp,
                    value: default_value(),
                });
            }
        }

        Self {
            meta: LevelMeta {
                name: name.to_string(),
                time_limit: None,
            },
            blocks,
        }
    }
}

/// The level set shipped with the demo binary
pub fn demo_levels() -> Vec<LevelSpec> {
    let opener = LevelSpec::grid("opener", 3, 8, 1, |row, col| {
        if row == 0 && col % 3 == 1 {
            BlockKind::PowerUp(PowerUpKind::WidePaddle)
        } else if row == 1 && col == 4 {
            BlockKind::PowerUp(PowerUpKind::ExtraLife)
        } else {
            BlockKind::Normal
        }
    });

    let fortress = LevelSpec::grid("fortress", 4, 8, 2, |row, col| match (row, col) {
        (0, c) if c % 2 == 0 => BlockKind::Unbreakable,
        (1, 3) => BlockKind::Hungry,
        (2, c) if c % 4 == 2 => BlockKind::PowerUp(PowerUpKind::BigBall),
        (3, 0) => BlockKind::PowerUp(PowerUpKind::LoseLife),
        _ => BlockKind::Normal,
    });

    vec![opener, fortress]
}
