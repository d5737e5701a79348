//! Debug overlay: opt-in collision visualization.
//!
//! Call `collision_overlay()` after `Level::update()` and hand the rectangles
//! to whatever draws lines. Nothing here touches the simulation.

use crate::core::geometry::Rect;
use crate::core::level::Level;

/// What a debug rectangle outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugKind {
    /// An active entity's collision bounds.
    EntityBounds,
    /// An entity that touched a solid tile during the last step.
    EntityContact,
    /// A tile the broad-phase handed to the resolver this frame.
    Candidate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugRect {
    pub rect: Rect,
    pub kind: DebugKind,
}

/// Rectangles for every active entity and every candidate tile of the last step.
///
/// Entities come first, in scene order. A tile shared by several entities is
/// listed once.
pub fn collision_overlay(level: &Level) -> Vec<DebugRect> {
    let mut out = Vec::new();
    for entity in level.scene.iter().filter(|e| e.active) {
        let kind = if entity.contacts.any() {
            DebugKind::EntityContact
        } else {
            DebugKind::EntityBounds
        };
        out.push(DebugRect {
            rect: entity.bounds(),
            kind,
        });
    }

    let mut tiles: Vec<_> = level
        .candidates()
        .iter()
        .flat_map(|(_, refs)| refs.iter().copied())
        .collect();
    tiles.sort_by_key(|r| (r.layer, r.index));
    tiles.dedup();
    for tile_ref in tiles {
        out.push(DebugRect {
            rect: level.grid().tile(tile_ref).bounds,
            kind: DebugKind::Candidate,
        });
    }
    out
}

/// Closed outline of a rectangle (4 corners + the first again) for line strips.
pub fn outline(rect: &Rect) -> Vec<[f32; 2]> {
    let (l, t) = (rect.left() as f32, rect.top() as f32);
    let (r, b) = (rect.right() as f32, rect.bottom() as f32);
    let mut points = vec![[l, t], [r, t], [r, b], [l, b]];
    // Close the loop
    points.push(points[0]);
    points
}
