pub mod collision;
pub mod events;
pub mod scene;
pub mod time;
