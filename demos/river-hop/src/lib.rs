pub mod config;
pub mod game;
pub mod hop;
pub mod level;
pub mod player;
pub mod sound;
pub mod spawner;
pub mod state;
pub mod turret;

pub use config::HopConfig;
pub use game::RiverHop;

/// Tween completion callbacks handled by `RiverHop::on_tween_complete`.
pub mod callbacks {
    use hop_engine::CallbackId;

    /// One phase of a hop arc finished.
    pub const HOP_PHASE: CallbackId = CallbackId(1);
    pub const FALL: CallbackId = CallbackId(2);
    /// An obstacle reached the far side of its row.
    pub const RESET_OBSTACLE: CallbackId = CallbackId(3);
    /// A turret finished one spin.
    pub const LAUNCH_PROJECTILES: CallbackId = CallbackId(4);
    pub const PROJECTILE_SPENT: CallbackId = CallbackId(5);
}
