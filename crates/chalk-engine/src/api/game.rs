use crate::api::types::{EntityId, GameEvent, SoundEvent};
use crate::core::scene::Scene;
use crate::extensions::tween::TweenState;
use crate::input::queue::InputQueue;
use crate::systems::effects::EffectsState;
#[cfg(feature = "vectors")]
use crate::systems::ink::InkState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Side length of the square canvas in pixels. Touch coordinates arrive
    /// in this space, and normalized template points scale by it.
    pub canvas_size: f32,
    /// Maximum number of widget instances (default: 64).
    pub max_widgets: usize,
    /// Maximum number of ink vertices (default: 16384).
    pub max_ink_vertices: usize,
    /// Maximum number of effects vertices (default: 4096).
    pub max_effects_vertices: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            canvas_size: 400.0,
            max_widgets: 64,
            max_ink_vertices: 16384,
            max_effects_vertices: 4096,
            max_sounds: 32,
            max_events: 32,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The game loop tick. Process input, advance sessions, redraw ink.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Serialize persistent game state (progress) for the host to store.
    /// Return None when there is nothing to persist.
    fn save_state(&self) -> Option<String> {
        None
    }

    /// Restore persistent game state from a host-stored blob.
    /// Implementations must tolerate malformed input (log and ignore).
    fn load_state(&mut self, _blob: &str) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    #[cfg(feature = "vectors")]
    pub ink: InkState,
    pub effects: EffectsState,
    pub tweens: TweenState,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            #[cfg(feature = "vectors")]
            ink: InkState::new(),
            effects: EffectsState::new(42),
            tweens: TweenState::new(),
            sounds: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a sound cue to be forwarded to TypeScript.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to TypeScript.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events, ink).
    /// The game redraws its ink every update tick.
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
        #[cfg(feature = "vectors")]
        self.ink.clear();
    }

    /// Advance engine-owned animation systems (tweens, particles).
    /// Called automatically by the runner after `Game::update()`.
    pub fn tick_systems(&mut self, dt: f32) {
        // Tween completion notifications land in the same event stream the
        // game writes to, so the shell sees one ordered feed.
        let mut tween_events = Vec::new();
        self.tweens.tick(dt, &mut self.scene, &mut tween_events);
        self.events.append(&mut tween_events);
        self.effects.tick(dt);
    }

    /// Reset scene-scoped state on screen transitions: entities, tweens,
    /// particles. Sounds/events survive until the frame is packed.
    pub fn clear_screen(&mut self) {
        self.scene.clear();
        self.tweens.clear();
        self.effects.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;

    #[test]
    fn next_id_is_unique_and_increasing() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert_ne!(a, b);
        assert!(b.0 > a.0);
    }

    #[test]
    fn clear_frame_data_drops_transients() {
        let mut ctx = EngineContext::new();
        ctx.emit_sound(SoundEvent(1));
        ctx.emit_event(GameEvent::new(2, 0.0, 0.0, 0.0));
        ctx.clear_frame_data();
        assert!(ctx.sounds.is_empty());
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn clear_screen_resets_scene_and_animations() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        ctx.scene.spawn(Entity::new(id));
        ctx.effects.burst([10.0, 10.0], 5);
        ctx.clear_screen();
        assert!(ctx.scene.is_empty());
        assert!(ctx.effects.particles.is_empty());
    }
}
