pub mod archetype;
pub mod level;
