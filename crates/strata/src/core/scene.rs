use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// The level's moving bodies, in spawn order.
///
/// Despawns requested while a frame is being stepped are queued with
/// [`Scene::queue_despawn`] and applied by [`Scene::flush_despawns`] at the tick
/// boundary, so iteration order never changes mid-step.
pub struct Scene {
    entities: Vec<Entity>,
    pending_despawns: Vec<EntityId>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(64),
            pending_despawns: Vec::new(),
        }
    }

    /// Add an entity to the scene.
    ///
    /// Panics if an entity with the same id is already present.
    pub fn spawn(&mut self, entity: Entity) {
        assert!(
            self.get(entity.id).is_none(),
            "entity {:?} spawned twice",
            entity.id
        );
        self.entities.push(entity);
    }

    /// Remove an entity by ID right away. Returns the removed entity if found.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    /// Mark an entity for removal at the end of the current tick.
    pub fn queue_despawn(&mut self, id: EntityId) {
        if !self.pending_despawns.contains(&id) {
            self.pending_despawns.push(id);
        }
    }

    /// Apply queued despawns. Returns the entities that were removed.
    pub fn flush_despawns(&mut self) -> Vec<Entity> {
        let pending = std::mem::take(&mut self.pending_despawns);
        pending.into_iter().filter_map(|id| self.despawn(id)).collect()
    }

    /// Number of despawns waiting for the tick boundary.
    pub fn pending_despawns(&self) -> usize {
        self.pending_despawns.len()
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Iterate over all entities mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    /// Find the first entity with the given tag (mutable).
    pub fn find_by_tag_mut(&mut self, tag: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.tag == tag)
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
