pub mod api;
pub mod core;
pub mod components;
pub mod error;
pub mod systems;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, TileRef};
pub use components::entity::{Contacts, Entity};
pub use components::tile::{Tile, TileKind};
pub use components::tilemap::{LayerDescriptor, MapDescriptor, TileGrid, TileLayer, SOLID_LAYER_MARKER};
pub use core::geometry::Rect;
pub use core::level::Level;
pub use core::scene::Scene;
pub use core::time::FrameClock;
pub use error::LevelError;
pub use renderer::camera::{Camera, CameraLimits, ViewUniform, MIN_ZOOM, MAX_ZOOM};
pub use systems::broadphase::{build_candidate_map, CandidateMap};
pub use systems::collision::{check_tile_collisions, resolve_axis, Axis, Collidable};
pub use systems::debug::{collision_overlay, DebugKind, DebugRect};
pub use systems::physics::{PhysicsSettings, DEFAULT_GRAVITY};
