use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::level::Level;
use crate::error::LevelError;
use crate::renderer::camera::{Camera, CameraLimits};
use crate::systems::physics::{PhysicsSettings, DEFAULT_GRAVITY};

/// Configuration for the engine, provided by the game.
///
/// Every field has a default, so a JSON config only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Most ticks run for a single host frame (default: 10).
    pub max_steps_per_frame: u32,
    /// Viewport width in screen pixels (default: 1024).
    pub viewport_width: f32,
    /// Viewport height in screen pixels (default: 768).
    pub viewport_height: f32,
    /// Downward acceleration in pixels per second squared (default: 30).
    pub gravity: f32,
    /// Fraction of the distance to its target the camera covers each tick (default: 0.05).
    pub camera_follow_lerp: f32,
    /// Zoom applied after the camera is first fitted to the level (default: 1).
    pub initial_zoom: f32,
    /// Layer-name substring that marks a tile layer as solid (default: "Solid").
    pub solid_layer_marker: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 10,
            viewport_width: 1024.0,
            viewport_height: 768.0,
            gravity: DEFAULT_GRAVITY,
            camera_follow_lerp: 0.05,
            initial_zoom: 1.0,
            solid_layer_marker: crate::components::tilemap::SOLID_LAYER_MARKER.to_string(),
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON. Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn physics(&self) -> PhysicsSettings {
        PhysicsSettings {
            gravity: self.gravity,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before anything else.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Build the level the game plays in.
    fn load_level(&mut self, config: &GameConfig) -> Result<Level, LevelError>;

    /// Spawn the initial entities and set up the camera.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Runs once per tick before the level is stepped. Spawn, despawn, zoom.
    fn update(&mut self, _ctx: &mut EngineContext, _dt: f32) {}

    /// Per-entity behaviour, called during the step after gravity is applied.
    fn update_entity(&mut self, _entity: &mut Entity, _dt: f32) {}

    /// World point the camera should drift toward, if any.
    fn camera_target(&self, _ctx: &EngineContext) -> Option<Vec2> {
        None
    }
}

/// Mutable access to engine state, passed to the `Game` hooks.
pub struct EngineContext {
    pub level: Level,
    pub camera: Camera,
    next_id: u32,
}

impl EngineContext {
    /// Wrap `level` and fit a fresh camera to it.
    ///
    /// The camera is reset, bounded by the level's pixel extent, then zoomed
    /// to `config.initial_zoom` (raised if the level is smaller than the view).
    pub fn new(level: Level, config: &GameConfig) -> Self {
        let mut camera = Camera::new(config.viewport_width, config.viewport_height);
        camera.reset();
        camera.set_limits(CameraLimits::Bounded(level.bounds()));
        camera.set_zoom(config.initial_zoom);
        Self {
            level,
            camera,
            next_id: 1,
        }
    }

    /// Generate the next entity ID not already present in the level.
    ///
    /// Ids spawned directly through `level` are skipped over.
    pub fn next_id(&mut self) -> EntityId {
        loop {
            let id = EntityId(self.next_id);
            self.next_id += 1;
            if self.level.scene.get(id).is_none() {
                return id;
            }
        }
    }

    /// Spawn `entity` under a fresh id. Returns that id.
    pub fn spawn(&mut self, mut entity: Entity) -> EntityId {
        let id = self.next_id();
        entity.id = id;
        self.level.spawn(entity);
        id
    }

    /// Queue `id` for removal at the end of the next step.
    pub fn despawn(&mut self, id: EntityId) {
        self.level.despawn(id);
    }
}
