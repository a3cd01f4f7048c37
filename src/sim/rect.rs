//! Axis-aligned rectangle geometry for the playfield
//!
//! Every simulated entity is a rectangle: `pos` is the bottom-left corner,
//! `extent` the width/height. The playfield is the unit square with the
//! origin at the bottom-left and y pointing up.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Bottom-left corner
    pub pos: Vec2,
    /// Width and height
    pub extent: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, extent: Vec2) -> Self {
        Self { pos, extent }
    }

    /// Rectangle placed by its center instead of its bottom-left corner
    pub fn from_center(center: Vec2, extent: Vec2) -> Self {
        Self {
            pos: center - extent / 2.0,
            extent,
        }
    }

    /// Bottom-left corner
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    /// Top-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.extent
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.extent / 2.0
    }

    /// Strict axis-aligned intersection test (touching edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.pos.x < b_max.x
            && other.pos.x < a_max.x
            && self.pos.y < b_max.y
            && other.pos.y < a_max.y
    }

    /// Per-axis overlap depths; both components are positive exactly when
    /// the rectangles intersect
    pub fn overlap(&self, other: &Rect) -> Vec2 {
        let a_max = self.max();
        let b_max = other.max();
        Vec2::new(
            a_max.x.min(b_max.x) - self.pos.x.max(other.pos.x),
            a_max.y.min(b_max.y) - self.pos.y.max(other.pos.y),
        )
    }

    /// Move by a displacement
    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    /// Replace the extent, keeping the center fixed
    pub fn resize_about_center(&mut self, extent: Vec2) {
        let center = self.center();
        self.extent = extent;
        self.pos = center - extent / 2.0;
    }

    /// Scale the extent by per-axis factors, keeping the center fixed
    pub fn scale_about_center(&mut self, factor: Vec2) {
        self.resize_about_center(self.extent * factor);
    }
}
