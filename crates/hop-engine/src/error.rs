use thiserror::Error;
use crate::api::types::EntityId;

/// Failures surfaced to callers. Gameplay outcomes (death, missed jumps)
/// are events, never errors.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("level '{0}' is not registered")]
    UnknownLevel(String),
    #[error("entity {0:?} does not exist in the scene")]
    MissingEntity(EntityId),
    #[error("archetype '{0}' is not registered")]
    UnknownArchetype(String),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
