use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::layer::RenderLayer;

/// Entity registry split into an opaque and a transparent list.
/// Designed for small-to-medium entity counts (hundreds, not millions).
///
/// Both lists keep insertion order: collision queries walk opaque first,
/// then transparent, and return the first hit.
pub struct Scene {
    opaque: Vec<Entity>,
    transparent: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            opaque: Vec::with_capacity(256),
            transparent: Vec::with_capacity(32),
        }
    }

    /// Add an entity to the list matching its layer.
    pub fn spawn(&mut self, entity: Entity) {
        match entity.layer {
            RenderLayer::Opaque => self.opaque.push(entity),
            RenderLayer::Transparent => self.transparent.push(entity),
        }
    }

    /// Remove an entity by ID. Returns the removed entity if found.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        for list in [&mut self.opaque, &mut self.transparent] {
            if let Some(idx) = list.iter().position(|e| e.id == id) {
                return Some(list.remove(idx));
            }
        }
        None
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Opaque entities, in insertion order.
    pub fn opaque(&self) -> &[Entity] {
        &self.opaque
    }

    /// Transparent entities, in insertion order.
    pub fn transparent(&self) -> &[Entity] {
        &self.transparent
    }

    /// Iterate over all entities, opaque first.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.opaque.iter().chain(self.transparent.iter())
    }

    /// Iterate over all entities mutably, opaque first.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.opaque.iter_mut().chain(self.transparent.iter_mut())
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.iter().find(|e| e.tag == tag)
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.opaque.len() + self.transparent.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.opaque.is_empty() && self.transparent.is_empty()
    }

    /// Clear all entities.
    pub fn clear(&mut self) {
        self.opaque.clear();
        self.transparent.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
