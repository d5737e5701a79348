//! Layered tile grid fed to the collision core by a map loader.
//!
//! Every layer stores a flat, row-major list of tiles (`index = x + columns * y`).
//! A layer is solid when its name contains the solid marker (`"Solid"` by default).

use serde::{Deserialize, Serialize};

use crate::api::types::TileRef;
use crate::components::tile::{Tile, TileKind};
use crate::core::geometry::Rect;
use crate::error::LevelError;

/// Layer-name substring that marks a layer as solid.
pub const SOLID_LAYER_MARKER: &str = "Solid";

/// Loader-side description of one layer: a name and one gid per cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDescriptor {
    pub name: String,
    /// Row-major global tile ids, `0` for empty cells.
    pub gids: Vec<u32>,
}

/// Loader-side description of a whole map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDescriptor {
    pub columns: u32,
    pub rows: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    #[serde(default)]
    pub layers: Vec<LayerDescriptor>,
}

impl MapDescriptor {
    /// Parse a map description from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One layer of tiles.
#[derive(Debug, Clone)]
pub struct TileLayer {
    pub name: String,
    pub kind: TileKind,
    tiles: Vec<Tile>,
}

impl TileLayer {
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn is_solid(&self) -> bool {
        self.kind == TileKind::Solid
    }
}

/// The level's tiles, read-only once built.
#[derive(Debug, Clone)]
pub struct TileGrid {
    /// Width of the grid in tiles.
    pub columns: i32,
    /// Height of the grid in tiles.
    pub rows: i32,
    /// Tile width in pixels.
    pub tile_width: i32,
    /// Tile height in pixels.
    pub tile_height: i32,
    layers: Vec<TileLayer>,
}

impl TileGrid {
    /// Build a grid from loader data, classifying layers with [`SOLID_LAYER_MARKER`].
    pub fn from_descriptor(desc: &MapDescriptor) -> Result<Self, LevelError> {
        Self::from_descriptor_with_marker(desc, SOLID_LAYER_MARKER)
    }

    /// Build a grid from loader data with a custom solid-layer marker.
    pub fn from_descriptor_with_marker(desc: &MapDescriptor, marker: &str) -> Result<Self, LevelError> {
        if desc.tile_width == 0 || desc.tile_height == 0 {
            return Err(LevelError::ZeroTileSize);
        }
        if desc.columns == 0 || desc.rows == 0 {
            return Err(LevelError::EmptyGrid);
        }

        let too_large = || LevelError::GridTooLarge {
            columns: desc.columns,
            rows: desc.rows,
            tile_width: desc.tile_width,
            tile_height: desc.tile_height,
        };
        let columns = i32::try_from(desc.columns).map_err(|_| too_large())?;
        let rows = i32::try_from(desc.rows).map_err(|_| too_large())?;
        let size = (
            i32::try_from(desc.tile_width).map_err(|_| too_large())?,
            i32::try_from(desc.tile_height).map_err(|_| too_large())?,
        );
        // Cell indices and pixel extents must all fit in i32.
        let cells = columns.checked_mul(rows).ok_or_else(too_large)?;
        columns.checked_mul(size.0).ok_or_else(too_large)?;
        rows.checked_mul(size.1).ok_or_else(too_large)?;
        let expected = cells as usize;

        let mut layers = Vec::with_capacity(desc.layers.len());
        for (layer_idx, layer) in desc.layers.iter().enumerate() {
            if layer.gids.len() != expected {
                return Err(LevelError::LayerSize {
                    layer: layer.name.clone(),
                    expected,
                    actual: layer.gids.len(),
                });
            }
            let kind = TileKind::from_layer_name(&layer.name, marker);
            let tiles = layer
                .gids
                .iter()
                .enumerate()
                .map(|(i, &gid)| {
                    let x = i as i32 % columns;
                    let y = i as i32 / columns;
                    Tile::new(TileRef::new(layer_idx, i), x, y, size, kind, gid)
                })
                .collect();
            layers.push(TileLayer {
                name: layer.name.clone(),
                kind,
                tiles,
            });
        }

        let grid = Self {
            columns,
            rows,
            tile_width: size.0,
            tile_height: size.1,
            layers,
        };
        log::debug!(
            "tile grid built: {}x{} tiles of {}x{} px, {} layers ({} solid)",
            grid.columns,
            grid.rows,
            grid.tile_width,
            grid.tile_height,
            grid.layers.len(),
            grid.solid_layers().count(),
        );
        Ok(grid)
    }

    pub fn layers(&self) -> &[TileLayer] {
        &self.layers
    }

    /// Solid layers with their indices, in layer order.
    pub fn solid_layers(&self) -> impl Iterator<Item = (usize, &TileLayer)> {
        self.layers.iter().enumerate().filter(|(_, l)| l.is_solid())
    }

    /// Resolve a tile handle.
    ///
    /// Panics on a handle that did not come from this grid.
    pub fn tile(&self, tile_ref: TileRef) -> &Tile {
        &self.layers[tile_ref.layer].tiles[tile_ref.index]
    }

    pub fn pixel_width(&self) -> i32 {
        self.columns * self.tile_width
    }

    pub fn pixel_height(&self) -> i32 {
        self.rows * self.tile_height
    }

    /// Pixel-space extent of the whole map, origin at (0, 0).
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.pixel_width(), self.pixel_height())
    }

    /// Count of non-empty tiles across all layers.
    pub fn tile_count(&self) -> usize {
        self.layers
            .iter()
            .map(|l| l.tiles.iter().filter(|t| !t.is_empty()).count())
            .sum()
    }
}
