//! Per-frame physics step: gravity and entity logic, then an X pass and a Y pass.
//!
//! Resolving the axes one after the other lets a body slide along a floor made
//! of many tiles without catching on the seams between them.

use crate::components::entity::{Contacts, Entity};
use crate::components::tilemap::TileGrid;
use crate::core::scene::Scene;
use crate::systems::broadphase::{build_candidate_map, CandidateMap};
use crate::systems::collision::{check_tile_collisions, Axis};

/// Downward acceleration in pixels per second squared.
pub const DEFAULT_GRAVITY: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsSettings {
    pub gravity: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
        }
    }
}

/// Advance every active entity by one frame.
///
/// An entity that clears its own `active` flag from `logic` is not integrated
/// this frame. Returns the candidate map so callers can inspect or draw it.
pub fn step<F>(
    scene: &mut Scene,
    grid: &TileGrid,
    settings: &PhysicsSettings,
    dt: f32,
    mut logic: F,
) -> CandidateMap
where
    F: FnMut(&mut Entity, f32),
{
    let candidates = build_candidate_map(scene.iter(), grid);

    for entity in scene.iter_mut().filter(|e| e.active) {
        entity.contacts = Contacts::default();
        entity.vel.y += settings.gravity * dt;
        logic(entity, dt);
    }

    let hits_x = resolve_pass(scene, grid, &candidates, Axis::Horizontal);
    let hits_y = resolve_pass(scene, grid, &candidates, Axis::Vertical);

    log::trace!(
        "physics step: {} entities, {} candidates, {} x hits, {} y hits",
        candidates.len(),
        candidates.tile_count(),
        hits_x,
        hits_y,
    );
    candidates
}

/// Integrate one axis for every active entity, then push it out of its candidates.
///
/// Returns how many candidate tiles were hit. Panics if an active entity has no
/// entry in `candidates`: the map must come from this frame's scene.
pub fn resolve_pass(scene: &mut Scene, grid: &TileGrid, candidates: &CandidateMap, axis: Axis) -> usize {
    let mut hits = 0;
    for entity in scene.iter_mut().filter(|e| e.active) {
        let tiles = candidates
            .get(entity.id)
            .unwrap_or_else(|| panic!("no candidate entry for active entity {:?}", entity.id));
        match axis {
            Axis::Horizontal => entity.apply_velocity_x(),
            Axis::Vertical => entity.apply_velocity_y(),
        }
        hits += check_tile_collisions(entity, tiles, grid, axis);
    }
    hits
}
