use thiserror::Error;

/// Errors raised while turning loader/config data into a level.
///
/// Only the collaborator boundary is fallible. Once a `Level` exists, stepping
/// it cannot fail.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Layer {layer:?} has {actual} tiles, expected {expected}")]
    LayerSize {
        layer: String,
        expected: usize,
        actual: usize,
    },
    #[error("Tile size must be positive")]
    ZeroTileSize,
    #[error("Tile grid has no columns or rows")]
    EmptyGrid,
    #[error("Tile grid of {columns}x{rows} tiles at {tile_width}x{tile_height} px does not fit in 32-bit coordinates")]
    GridTooLarge {
        columns: u32,
        rows: u32,
        tile_width: u32,
        tile_height: u32,
    },
}
