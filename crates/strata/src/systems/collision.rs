//! Narrow-phase: per-axis entity-vs-tile resolution.
//!
//! Resolution is keyed on the sign of the mover's velocity, not on the sign of
//! the overlap. A mover heading right is pushed back to the tile's left edge; one
//! heading left is pushed to its right edge, and so on. If the mover is already
//! more than one tile past the edge it is treated as moving away and left alone.

use glam::Vec2;

use crate::api::types::TileRef;
use crate::components::tile::Tile;
use crate::components::tilemap::TileGrid;
use crate::core::geometry::{round_px, Rect};

/// Which axis a resolution pass works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// X.
    Horizontal,
    /// Y.
    Vertical,
}

/// Anything that can take part in entity-vs-tile collision.
///
/// Moving bodies and static tiles both implement it. Static implementors ignore
/// the setters.
pub trait Collidable {
    fn position(&self) -> Vec2;
    fn set_position(&mut self, pos: Vec2);
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, vel: Vec2);
    fn bounds(&self) -> Rect;
    /// Called when `other` overlaps this collidable during the `axis` pass.
    fn on_collision(&mut self, other: &mut dyn Collidable, axis: Axis);
}

/// Signed push needed along `axis` to move `mover` out of `tile`.
///
/// `None` when the mover has no velocity on that axis, or when it sits more than
/// one tile extent past the edge it is heading toward.
pub fn penetration(mover: &dyn Collidable, tile: &Rect, axis: Axis) -> Option<i32> {
    let b = mover.bounds();
    let v = mover.velocity();
    let (speed, extent) = match axis {
        Axis::Horizontal => (v.x, tile.width),
        Axis::Vertical => (v.y, tile.height),
    };

    if speed > 0.0 {
        let depth = match axis {
            Axis::Horizontal => tile.left() - b.right(),
            Axis::Vertical => tile.top() - b.bottom(),
        };
        (depth >= -extent).then_some(depth)
    } else if speed < 0.0 {
        let depth = match axis {
            Axis::Horizontal => tile.right() - b.left(),
            Axis::Vertical => tile.bottom() - b.top(),
        };
        (depth <= extent).then_some(depth)
    } else {
        None
    }
}

/// Push `mover` out of `tile` along `axis` and stop it on that axis.
///
/// The caller must already know the two bounds intersect. Returns whether the
/// mover was corrected. The tile is never touched.
pub fn resolve_axis(mover: &mut dyn Collidable, tile: &Tile, axis: Axis) -> bool {
    let Some(depth) = penetration(&*mover, &tile.bounds, axis) else {
        return false;
    };

    let mut pos = mover.position();
    let mut vel = mover.velocity();
    match axis {
        Axis::Horizontal => {
            pos.x = round_px(pos.x + depth as f32);
            vel.x = 0.0;
        }
        Axis::Vertical => {
            pos.y = round_px(pos.y + depth as f32);
            vel.y = 0.0;
        }
    }
    mover.set_position(pos);
    mover.set_velocity(vel);
    true
}

/// Test `mover` against its candidate tiles on one axis.
///
/// For every candidate whose bounds intersect the mover, the mover's hook fires
/// first, then the tile's (which resolves). Returns how many candidates overlapped.
pub fn check_tile_collisions(
    mover: &mut dyn Collidable,
    candidates: &[TileRef],
    grid: &TileGrid,
    axis: Axis,
) -> usize {
    let mut hits = 0;
    for &tile_ref in candidates {
        // Tiles are plain values; the copy only exists to satisfy the
        // symmetric `&mut` hook.
        let mut tile = *grid.tile(tile_ref);
        if !tile.bounds.intersects(&mover.bounds()) {
            continue;
        }
        hits += 1;
        mover.on_collision(&mut tile, axis);
        tile.on_collision(mover, axis);
    }
    hits
}
