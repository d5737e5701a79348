use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::tilemap::{MapDescriptor, TileGrid};
use crate::core::geometry::Rect;
use crate::core::scene::Scene;
use crate::error::LevelError;
use crate::systems::broadphase::CandidateMap;
use crate::systems::physics::{self, PhysicsSettings};

/// A loaded level: the tile grid, the bodies moving through it, and the
/// physics settings that drive them.
pub struct Level {
    grid: TileGrid,
    pub scene: Scene,
    pub physics: PhysicsSettings,
    /// Candidate map from the most recent step.
    candidates: CandidateMap,
    frame: u64,
}

impl Level {
    pub fn new(grid: TileGrid) -> Self {
        Self {
            grid,
            scene: Scene::new(),
            physics: PhysicsSettings::default(),
            candidates: CandidateMap::new(),
            frame: 0,
        }
    }

    /// Build a level from loader data using the default solid-layer marker.
    pub fn from_descriptor(desc: &MapDescriptor) -> Result<Self, LevelError> {
        Ok(Self::new(TileGrid::from_descriptor(desc)?))
    }

    /// Build a level, treating layers whose name contains `marker` as solid.
    pub fn from_descriptor_with_marker(desc: &MapDescriptor, marker: &str) -> Result<Self, LevelError> {
        Ok(Self::new(TileGrid::from_descriptor_with_marker(desc, marker)?))
    }

    /// Parse a JSON map description and build a level from it.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Self::from_descriptor(&MapDescriptor::from_json(json)?)
    }

    pub fn with_physics(mut self, physics: PhysicsSettings) -> Self {
        self.physics = physics;
        self
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Pixel-space extent of the map, suitable as camera limits.
    pub fn bounds(&self) -> Rect {
        self.grid.bounds()
    }

    /// Frames stepped so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Candidate tiles gathered by the last [`Level::update`].
    pub fn candidates(&self) -> &CandidateMap {
        &self.candidates
    }

    /// Add `entity` to the scene. Panics if its id is already in use.
    pub fn spawn(&mut self, entity: Entity) {
        self.scene.spawn(entity);
    }

    /// Remove `id` at the end of the next update.
    pub fn despawn(&mut self, id: EntityId) {
        self.scene.queue_despawn(id);
    }

    /// Step the level by one frame.
    ///
    /// Runs `logic` on every active entity after gravity, resolves the X and Y
    /// passes, then applies queued despawns.
    pub fn update<F>(&mut self, dt: f32, logic: F)
    where
        F: FnMut(&mut Entity, f32),
    {
        self.candidates = physics::step(&mut self.scene, &self.grid, &self.physics, dt, logic);
        let removed = self.scene.flush_despawns();
        if !removed.is_empty() {
            log::debug!("frame {}: despawned {} entities", self.frame, removed.len());
        }
        self.frame += 1;
    }

    /// Step without any entity logic.
    pub fn step(&mut self, dt: f32) {
        self.update(dt, |_, _| {});
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    const MAP: &str = r#"{
        "columns": 8,
        "rows": 6,
        "tile_width": 32,
        "tile_height": 32,
        "layers": [
            { "name": "Background", "gids": [3,3,3,3,3,3,3,3, 3,3,3,3,3,3,3,3, 3,3,3,3,3,3,3,3, 3,3,3,3,3,3,3,3, 3,3,3,3,3,3,3,3, 3,3,3,3,3,3,3,3] },
            { "name": "Solid", "gids": [0,0,0,0,0,0,0,0, 0,0,0,0,0,0,0,0, 0,0,0,0,0,0,0,0, 0,0,0,0,0,0,0,0, 0,0,0,0,0,0,0,0, 1,1,1,1,1,1,1,1] }
        ]
    }"#;

    fn player() -> Entity {
        Entity::new(EntityId(1))
            .with_tag("player")
            .with_size(16, 16)
            .with_pos(Vec2::new(100.0, 100.0))
    }

    #[test]
    fn loads_from_json() {
        let level = Level::from_json(MAP).unwrap();
        assert_eq!(level.bounds(), Rect::new(0, 0, 256, 192));
        assert_eq!(level.grid().solid_layers().count(), 1);
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(matches!(Level::from_json("{"), Err(LevelError::Json(_))));
    }

    #[test]
    fn falling_body_lands_on_floor() {
        let mut level = Level::from_json(MAP).unwrap().with_physics(PhysicsSettings { gravity: 60.0 });
        level.spawn(player());
        for _ in 0..120 {
            level.step(1.0 / 60.0);
        }
        let p = level.scene.find_by_tag("player").unwrap();
        assert_eq!(p.bounds().bottom(), 160);
        assert!(p.grounded());
        assert_eq!(level.frame(), 120);
    }

    #[test]
    fn keeps_last_candidate_map() {
        let mut level = Level::from_json(MAP).unwrap();
        let floor_walker = Entity::new(EntityId(7)).with_size(16, 16).with_pos(Vec2::new(48.0, 152.0));
        level.spawn(floor_walker);
        assert!(level.candidates().is_empty());
        level.step(1.0 / 60.0);
        // Standing in row 4 over a full floor: bottom-left, bottom and bottom-right.
        assert_eq!(level.candidates().get(EntityId(7)).unwrap().len(), 3);
    }

    #[test]
    fn despawn_applies_after_the_step() {
        let mut level = Level::from_json(MAP).unwrap();
        level.spawn(player());
        level.spawn(Entity::new(EntityId(2)).with_size(8, 8).with_pos(Vec2::new(40.0, 40.0)));
        level.despawn(EntityId(2));
        assert_eq!(level.scene.len(), 2);

        let mut stepped = Vec::new();
        level.update(1.0 / 60.0, |e, _| stepped.push(e.id));
        assert_eq!(stepped, vec![EntityId(1), EntityId(2)]);
        assert_eq!(level.scene.len(), 1);
        assert!(level.scene.get(EntityId(2)).is_none());
    }
}
