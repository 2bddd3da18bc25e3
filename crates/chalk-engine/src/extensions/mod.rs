// extensions/mod.rs
//
// Optional extension modules for ChalkEngine.
// These are decoupled from core Entity/Scene — games opt-in by creating these systems.

pub mod easing;
pub mod tween;

pub use easing::{ease, ease_vec2, lerp, lerp_vec2, Easing};
pub use tween::{Tween, TweenLoop, TweenState, TweenTarget};
