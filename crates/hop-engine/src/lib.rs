pub mod api;
pub mod core;
pub mod components;
pub mod input;
pub mod assets;
pub mod extensions;
pub mod error;
pub mod runner;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{ActorKind, CallbackId, CollisionResponse, EntityId};
pub use components::collider::{Aabb, BoxCollider, Ray};
pub use components::entity::Entity;
pub use components::layer::RenderLayer;
pub use components::transform::Transform3D;
pub use core::collision::{check_all_collisions, raycast};
pub use core::events::{EventCategory, EventDispatcher, EventListener, GameEvent, MenuAction};
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use input::queue::{keys, InputEvent, InputQueue, KeyboardState};
pub use assets::archetype::{Archetype, ArchetypeManifest, ArchetypeRegistry};
pub use assets::level::{LevelCell, LevelInfo, LevelManager};
pub use error::{EngineError, Result};
pub use runner::GameRunner;

// Extensions
pub use extensions::{
    Easing, lerp, lerp_vec3, ease_vec3,
    TimerCallback, TimerState,
    Tween, TweenCompleted, TweenId, TweenLoop, TweenProperty, TweenState,
};
