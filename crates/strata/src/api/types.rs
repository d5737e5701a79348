/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u32);

/// Stable handle to a tile: layer index plus row-major index within that layer.
/// Tiles never move, so a `TileRef` stays valid for the lifetime of its grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileRef {
    pub layer: usize,
    pub index: usize,
}

impl TileRef {
    pub fn new(layer: usize, index: usize) -> Self {
        Self { layer, index }
    }
}
