//! Broad-phase: the 3x3 block of solid tiles around each entity.
//!
//! Built once per frame and shared by both resolution passes, so it is
//! deliberately stale for the Y pass.

use std::collections::HashMap;

use crate::api::types::{EntityId, TileRef};
use crate::components::entity::Entity;
use crate::components::tilemap::{TileGrid, TileLayer};

/// Neighbour offsets in lookup order: centre, left, right, top, top-left,
/// top-right, bottom, bottom-left, bottom-right.
pub const NEIGHBOURHOOD: [(i32, i32); 9] = [
    (0, 0),
    (-1, 0),
    (1, 0),
    (0, -1),
    (-1, -1),
    (1, -1),
    (0, 1),
    (-1, 1),
    (1, 1),
];

/// Per-frame entity -> candidate tiles map.
#[derive(Debug, Clone, Default)]
pub struct CandidateMap {
    entries: HashMap<EntityId, Vec<TileRef>>,
}

impl CandidateMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: EntityId, tiles: Vec<TileRef>) {
        self.entries.insert(id, tiles);
    }

    pub fn get(&self, id: EntityId) -> Option<&[TileRef]> {
        self.entries.get(&id).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &[TileRef])> {
        self.entries.iter().map(|(id, tiles)| (*id, tiles.as_slice()))
    }

    /// Number of entities with an entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total candidate tiles across all entities.
    pub fn tile_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

/// Solid tiles on `layer` around `entity`, in [`NEIGHBOURHOOD`] order.
pub fn candidates(entity: &Entity, grid: &TileGrid, layer: usize) -> Vec<TileRef> {
    let mut out = Vec::with_capacity(NEIGHBOURHOOD.len());
    push_candidates(entity, grid, layer, &mut out);
    out
}

/// Append the solid tiles on `layer` around `entity` to `out`.
///
/// Out-of-range cells are skipped silently. Panics if `layer` is not a layer of
/// `grid`.
pub fn push_candidates(entity: &Entity, grid: &TileGrid, layer: usize, out: &mut Vec<TileRef>) {
    let tiles = &grid.layers()[layer];
    let (x, y) = entity.tile_coordinates(grid.tile_width, grid.tile_height);
    for (dx, dy) in NEIGHBOURHOOD {
        if let Some(tile_ref) = solid_cell(grid, tiles, x.saturating_add(dx), y.saturating_add(dy)) {
            out.push(tile_ref);
        }
    }
}

/// The cell at (x, y) if it holds a non-empty solid tile.
///
/// Only the flat index is range-checked. The coordinate check is inclusive
/// (`x <= columns`, `y <= rows`), so cells just past a row edge wrap onto the
/// neighbouring row.
fn solid_cell(grid: &TileGrid, layer: &TileLayer, x: i32, y: i32) -> Option<TileRef> {
    let element = i64::from(x) + i64::from(grid.columns) * i64::from(y);
    if element < 0 || element >= layer.len() as i64 {
        return None;
    }
    if x > grid.columns || y > grid.rows {
        return None;
    }
    let tile = &layer.tiles()[element as usize];
    tile.blocks().then_some(tile.tile_ref)
}

/// Candidate tiles for every active entity over every solid layer.
pub fn build_candidate_map<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    grid: &TileGrid,
) -> CandidateMap {
    let solid: Vec<usize> = grid.solid_layers().map(|(i, _)| i).collect();
    let mut map = CandidateMap::new();
    for entity in entities.filter(|e| e.active) {
        let mut tiles = Vec::with_capacity(NEIGHBOURHOOD.len() * solid.len());
        for &layer in &solid {
            push_candidates(entity, grid, layer, &mut tiles);
        }
        map.insert(entity.id, tiles);
    }
    map
}
