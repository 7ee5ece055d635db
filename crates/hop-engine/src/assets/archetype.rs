use std::collections::HashMap;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use crate::api::types::{ActorKind, EntityId};
use crate::components::collider::BoxCollider;
use crate::components::entity::Entity;
use crate::components::layer::RenderLayer;
use crate::components::transform::Transform3D;
use crate::error::{EngineError, Result};

/// Template for entities that share their initial configuration.
/// `transform.translation` is an offset added to the spawn position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    pub kind: ActorKind,
    /// Instances are tagged `"<prefix> <n>"`.
    pub tag_prefix: String,
    #[serde(default)]
    pub transform: Transform3D,
    /// Collider half extents. No collider when absent.
    #[serde(default)]
    pub half_extents: Option<Vec3>,
    #[serde(default)]
    pub layer: RenderLayer,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default = "default_true")]
    pub drawn: bool,
}

fn default_true() -> bool {
    true
}

impl Archetype {
    pub fn new(kind: ActorKind, tag_prefix: impl Into<String>) -> Self {
        Self {
            kind,
            tag_prefix: tag_prefix.into(),
            transform: Transform3D::default(),
            half_extents: None,
            layer: RenderLayer::Opaque,
            active: true,
            drawn: true,
        }
    }

    pub fn with_transform(mut self, transform: Transform3D) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_half_extents(mut self, half_extents: Vec3) -> Self {
        self.half_extents = Some(half_extents);
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

    /// Build a fresh entity from this template.
    pub fn instantiate(&self, id: EntityId, tag: String, position: Vec3) -> Entity {
        let mut transform = self.transform;
        transform.translation += position;

        let mut entity = Entity::new(id)
            .with_tag(tag)
            .with_kind(self.kind)
            .with_layer(self.layer)
            .with_transform(transform);
        if let Some(half) = self.half_extents {
            entity = entity.with_collider(BoxCollider::new(half));
        }
        entity.active = self.active;
        entity.drawn = self.drawn;
        entity
    }
}

/// Named archetypes, as loaded from JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchetypeManifest {
    #[serde(default)]
    pub archetypes: HashMap<String, Archetype>,
}

impl ArchetypeManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Registry of named archetypes. The first registration of a name wins.
#[derive(Debug, Default)]
pub struct ArchetypeRegistry {
    archetypes: HashMap<String, Archetype>,
    counters: HashMap<String, u32>,
}

impl ArchetypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a parsed manifest.
    pub fn from_manifest(manifest: &ArchetypeManifest) -> Self {
        let mut registry = Self::new();
        for (name, archetype) in &manifest.archetypes {
            registry.register(name.clone(), archetype.clone());
        }
        registry
    }

    /// Returns false if the name was already taken.
    pub fn register(&mut self, name: impl Into<String>, archetype: Archetype) -> bool {
        let name = name.into();
        if self.archetypes.contains_key(&name) {
            log::debug!("archetype '{}' already registered", name);
            return false;
        }
        self.archetypes.insert(name, archetype);
        true
    }

    pub fn get(&self, name: &str) -> Option<&Archetype> {
        self.archetypes.get(name)
    }

    /// Deep-copy the named archetype into a new entity at `position`.
    pub fn instantiate(&mut self, name: &str, id: EntityId, position: Vec3) -> Result<Entity> {
        let archetype = self
            .archetypes
            .get(name)
            .ok_or_else(|| EngineError::UnknownArchetype(name.to_string()))?;

        let counter = self.counters.entry(archetype.tag_prefix.clone()).or_insert(0);
        *counter += 1;
        let tag = format!("{} {}", archetype.tag_prefix, counter);
        Ok(archetype.instantiate(id, tag, position))
    }

    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }
}
