//! Axis-aligned bounding box collision
//!
//! Every gameplay shape is an upright rectangle, so a single overlap test
//! covers bullet vs enemy and projectile vs player.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An upright rectangle (top-left corner + size, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Horizontal midpoint
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }
}

/// Anything with a collision box
pub trait Bounds {
    fn bounds(&self) -> Rect;
}

impl Bounds for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Overlap test on raw rectangles.
///
/// Uses strict comparisons, so boxes that merely share an edge still count
/// as touching.
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    !(a.left() > b.right() || a.right() < b.left() || a.top() > b.bottom() || a.bottom() < b.top())
}

/// Check whether two entities' boxes overlap
#[inline]
pub fn collision(a: &impl Bounds, b: &impl Bounds) -> bool {
    rects_overlap(&a.bounds(), &b.bounds())
}
