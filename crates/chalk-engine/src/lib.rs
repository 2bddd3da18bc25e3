pub mod api;
pub mod bridge;
pub mod components;
pub mod core;
pub mod extensions;
pub mod input;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{EngineContext, Game, GameConfig};
pub use api::types::{EntityId, GameEvent, SoundEvent};
pub use bridge::protocol::ProtocolLayout;
pub use components::entity::Entity;
pub use components::widget::{state as widget_state, WidgetComponent};
pub use core::scene::Scene;
pub use core::time::{DelayTimer, FixedTimestep, FrameFlag};
pub use input::queue::{InputEvent, InputQueue};
pub use systems::effects::{EffectsState, Particle, Rng};
pub use systems::widgets::{build_widget_buffer, WidgetBuffer, WidgetInstance};

#[cfg(feature = "vectors")]
pub use systems::ink::{InkColor, InkState, InkVertex};

// Extensions — decoupled optional systems
pub use extensions::{ease, ease_vec2, lerp, lerp_vec2, Easing, Tween, TweenLoop, TweenState};
