// extensions/mod.rs
//
// Time-driven systems layered on top of the scene: easing curves, tweens
// and named timers. Each owns its own state and is ticked by the runner.

pub mod easing;
pub mod timer;
pub mod tween;

pub use easing::{Easing, lerp, lerp_vec3, ease_vec3};
pub use timer::{TimerCallback, TimerState};
pub use tween::{Tween, TweenCompleted, TweenId, TweenLoop, TweenProperty, TweenState};
