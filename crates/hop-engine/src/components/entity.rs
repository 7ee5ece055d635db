use glam::Vec3;
use crate::api::types::{ActorKind, EntityId};
use crate::components::collider::{Aabb, BoxCollider};
use crate::components::layer::RenderLayer;
use crate::components::transform::Transform3D;

/// Fat Entity: a single struct with optional components.
/// Gameplay behaviour lives with the game, keyed by `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Gameplay classification used for collision responses.
    pub kind: ActorKind,
    /// Whether this entity updates. Tweens targeting an inactive entity freeze.
    pub active: bool,
    /// Whether this entity is drawn.
    pub drawn: bool,
    /// Which scene list the entity lives in.
    pub layer: RenderLayer,
    pub transform: Transform3D,
    /// Bounding box (optional; entities without one are never hit).
    pub collider: Option<BoxCollider>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            kind: ActorKind::default(),
            active: true,
            drawn: true,
            layer: RenderLayer::default(),
            transform: Transform3D::default(),
            collider: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_kind(mut self, kind: ActorKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.transform.translation = pos;
        self
    }

    pub fn with_transform(mut self, transform: Transform3D) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_collider(mut self, collider: BoxCollider) -> Self {
        self.collider = Some(collider);
        self
    }

    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self.drawn = false;
        self
    }

    /// Current position.
    pub fn pos(&self) -> Vec3 {
        self.transform.translation
    }

    /// World-space bounding box, if the entity has a collider.
    pub fn bounds(&self) -> Option<Aabb> {
        self.collider.map(|c| c.bounds(&self.transform))
    }
}
