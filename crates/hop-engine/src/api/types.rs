use serde::{Deserialize, Serialize};

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Identifies a tween completion callback.
/// The numeric value maps to a game-defined handler; it takes part in tween identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct CallbackId(pub u32);

/// What an entity is, as far as gameplay rules are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActorKind {
    /// The player character.
    Player,
    #[default]
    GrassTile,
    RoadTile,
    /// Open water: standing on it is fatal.
    WaterTile,
    /// Floating platform that carries passengers while its tween runs.
    WaterPlatform,
    /// Lethal moving obstacle (cars).
    Obstacle,
    /// Solid, harmless blocker (trees, rocks).
    BlockingObstacle,
    /// Hostile projectile.
    Projectile,
    /// Star pickup.
    Pickup,
    /// Reaching this zone wins the level.
    WinZone,
    /// Off-screen obstacle source.
    Spawner,
    /// Rotating projectile launcher.
    Turret,
    /// Cosmetic only.
    Decorator,
}

/// How a mover responds to touching an entity of a given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionResponse {
    /// Movement is cancelled.
    Block,
    /// The mover dies.
    Kill,
    /// The collidee is collected; movement proceeds.
    Pickup,
    /// The level is won; movement proceeds.
    Win,
    /// Nothing happens.
    PassThrough,
}

impl ActorKind {
    /// Resolve the collision response for a mover touching this kind.
    pub fn response(self) -> CollisionResponse {
        match self {
            ActorKind::BlockingObstacle | ActorKind::Turret | ActorKind::Spawner => {
                CollisionResponse::Block
            }
            ActorKind::Obstacle | ActorKind::Projectile | ActorKind::WaterTile => {
                CollisionResponse::Kill
            }
            ActorKind::Pickup => CollisionResponse::Pickup,
            ActorKind::WinZone => CollisionResponse::Win,
            ActorKind::Player
            | ActorKind::GrassTile
            | ActorKind::RoadTile
            | ActorKind::WaterPlatform
            | ActorKind::Decorator => CollisionResponse::PassThrough,
        }
    }

    /// Whether a player may come to rest on top of this kind.
    pub fn is_walkable(self) -> bool {
        matches!(
            self,
            ActorKind::GrassTile | ActorKind::RoadTile | ActorKind::WaterPlatform
        )
    }
}
