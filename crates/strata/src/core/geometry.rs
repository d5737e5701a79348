use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in integer pixel space.
/// `x`/`y` is the top-left corner; Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Whether the rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Strict overlap test. Rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        other.left() < self.right()
            && self.left() < other.right()
            && other.top() < self.bottom()
            && self.top() < other.bottom()
    }

    /// Whether `other` lies entirely inside this rectangle (edges inclusive).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.left() <= other.left()
            && other.right() <= self.right()
            && self.top() <= other.top()
            && other.bottom() <= self.bottom()
    }

    /// Copy of this rectangle shifted by `(dx, dy)`.
    pub fn offset(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Top-left corner as a world-space vector.
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.left() as f32, self.top() as f32)
    }

    /// Bottom-right corner as a world-space vector.
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.right() as f32, self.bottom() as f32)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn center(&self) -> Vec2 {
        (self.min() + self.max()) * 0.5
    }
}

/// Round to the nearest whole pixel, ties toward positive infinity.
///
/// `round_px(v + n) == round_px(v) + n` for any whole `n`, including across
/// zero, which `f32::round` does not give for ties.
#[inline]
pub fn round_px(v: f32) -> f32 {
    (v + 0.5).floor()
}
