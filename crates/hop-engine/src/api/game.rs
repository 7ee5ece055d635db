use glam::Vec3;
use serde::{Deserialize, Serialize};
use crate::api::types::EntityId;
use crate::assets::archetype::ArchetypeRegistry;
use crate::assets::level::LevelManager;
use crate::components::entity::Entity;
use crate::core::events::{EventDispatcher, EventListener, GameEvent};
use crate::core::scene::Scene;
use crate::error::Result;
use crate::extensions::timer::TimerState;
use crate::extensions::tween::{TweenCompleted, TweenState};
use crate::input::queue::KeyboardState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Maximum simulation steps per frame (default: 10).
    pub max_steps_per_frame: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 10,
        }
    }
}

impl GameConfig {
    /// Parse a config from a JSON string. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Register archetypes and levels, publish the opening events.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The game loop tick. Read input, query collisions, publish events.
    fn update(&mut self, ctx: &mut EngineContext, input: &KeyboardState);

    /// A tween invoked its completion callback during this step's tween tick.
    fn on_tween_complete(&mut self, _ctx: &mut EngineContext, _done: TweenCompleted) {}

    /// Every dispatched event, after the engine has routed it.
    fn on_event(&mut self, _ctx: &mut EngineContext, _event: &GameEvent) {}
}

/// Mutable access to engine state, passed to every `Game` hook.
pub struct EngineContext {
    pub scene: Scene,
    pub tweens: TweenState,
    pub timers: TimerState,
    pub events: EventDispatcher,
    pub archetypes: ArchetypeRegistry,
    pub levels: LevelManager,
    listeners: Vec<Box<dyn EventListener>>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            tweens: TweenState::new(),
            timers: TimerState::new(),
            events: EventDispatcher::new(),
            archetypes: ArchetypeRegistry::new(),
            levels: LevelManager::new(),
            listeners: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an entity to the scene immediately.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.scene.spawn(entity);
        id
    }

    /// Instantiate a registered archetype at `position` and add it to the scene.
    pub fn spawn_archetype(&mut self, name: &str, position: Vec3) -> Result<EntityId> {
        let id = self.next_id();
        let entity = self.archetypes.instantiate(name, id, position)?;
        Ok(self.spawn(entity))
    }

    /// Remove an entity and cancel every tween that targets or carries it.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        self.tweens.cancel_all_for(id);
        self.scene.despawn(id)
    }

    /// Queue an event for dispatch at the end of the step.
    pub fn publish(&mut self, event: GameEvent) {
        self.events.publish(event);
    }

    /// Subscribe a listener to the categories it names.
    pub fn add_listener(&mut self, listener: Box<dyn EventListener>) {
        self.listeners.push(listener);
    }

    /// Drop every entity and tween. Timers survive.
    pub fn clear_world(&mut self) {
        self.scene.clear();
        self.tweens.clear();
    }

    /// Apply the engine-level effect of an event, then notify listeners.
    pub fn route(&mut self, event: &GameEvent) {
        match event {
            GameEvent::AddActor(entity) => {
                if self.scene.contains(entity.id) {
                    log::warn!("entity {:?} is already in the scene", entity.id);
                } else {
                    self.scene.spawn(entity.clone());
                }
            }
            GameEvent::RemoveActor(id) => {
                self.despawn(*id);
            }
            GameEvent::AddTweens(tweens) => {
                for tween in tweens {
                    self.tweens.add(tween.clone());
                }
            }
            GameEvent::AddTweenChild { target, child } => {
                self.tweens.attach_child(*target, *child);
            }
            GameEvent::RemoveTweenChild { target, child } => {
                self.tweens.detach_child(*target, *child);
            }
            GameEvent::CancelTweens(id) => {
                self.tweens.cancel_all_for(*id);
            }
            _ => {}
        }

        let category = event.category();
        for listener in self.listeners.iter_mut() {
            if listener.wants(category) {
                listener.handle(event);
            }
        }
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
