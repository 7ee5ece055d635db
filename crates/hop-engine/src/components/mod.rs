pub mod collider;
pub mod entity;
pub mod layer;
pub mod transform;
