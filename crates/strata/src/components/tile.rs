use glam::Vec2;

use crate::api::types::TileRef;
use crate::core::geometry::Rect;
use crate::systems::collision::{self, Axis, Collidable};

/// Whether a tile blocks movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileKind {
    Solid,
    #[default]
    Background,
}

impl TileKind {
    /// Classify a layer by name: any name containing `marker` (case-sensitive) is solid.
    pub fn from_layer_name(name: &str, marker: &str) -> Self {
        if name.contains(marker) {
            TileKind::Solid
        } else {
            TileKind::Background
        }
    }
}

/// A single cell of a tile layer.
///
/// Tiles are built once by the grid and never move. `gid == 0` is an empty cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    /// Where this tile lives in its grid.
    pub tile_ref: TileRef,
    /// Column in the grid.
    pub grid_x: i32,
    /// Row in the grid.
    pub grid_y: i32,
    /// Pixel-space bounds.
    pub bounds: Rect,
    pub kind: TileKind,
    /// Global tile-set id (0 = empty).
    pub gid: u32,
    /// Reserved for animated or destructible tiles. The core never reads it.
    pub active: bool,
}

impl Tile {
    pub fn new(tile_ref: TileRef, grid_x: i32, grid_y: i32, size: (i32, i32), kind: TileKind, gid: u32) -> Self {
        let (w, h) = size;
        Self {
            tile_ref,
            grid_x,
            grid_y,
            bounds: Rect::new(grid_x * w, grid_y * h, w, h),
            kind,
            gid,
            active: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.gid == 0
    }

    /// Non-empty and solid: the only tiles the broad-phase ever returns.
    pub fn blocks(&self) -> bool {
        !self.is_empty() && self.kind == TileKind::Solid
    }

    /// Pixel position of the top-left corner.
    pub fn position(&self) -> Vec2 {
        self.bounds.min()
    }
}

impl Collidable for Tile {
    fn position(&self) -> Vec2 {
        Tile::position(self)
    }

    fn set_position(&mut self, _pos: Vec2) {}

    fn velocity(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn set_velocity(&mut self, _vel: Vec2) {}

    fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Pushes `other` back out of this tile.
    fn on_collision(&mut self, other: &mut dyn Collidable, axis: Axis) {
        collision::resolve_axis(other, self, axis);
    }
}
