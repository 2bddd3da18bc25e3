use chalk_engine::systems::widgets::build_widget_buffer;
use chalk_engine::{
    EngineContext, FixedTimestep, Game, GameConfig, InputEvent, InputQueue, ProtocolLayout,
    WidgetBuffer,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game (e.g., `schoolday`) creates a `thread_local!` GameRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    widget_buffer: WidgetBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    /// Flat buffer of sound cue IDs for SharedArrayBuffer reads.
    sound_buffer: Vec<u8>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);

        let widget_buffer = WidgetBuffer::with_capacity(config.max_widgets);
        let sound_buffer = Vec::with_capacity(config.max_sounds);

        Self {
            game,
            ctx: EngineContext::new(),
            input: InputQueue::new(),
            widget_buffer,
            timestep,
            layout,
            config,
            initialized: false,
            sound_buffer,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.game.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Direct access to the game, for game-specific exports (content loading).
    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    /// Run one frame tick: update game, advance animations, rebuild buffers.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        // Fixed timestep accumulation
        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.game.update(&mut self.ctx, &self.input);
            self.ctx.tick_systems(self.timestep.dt());
        }

        // Drain input after update
        self.input.drain();

        // Build widget buffer from entities
        build_widget_buffer(self.ctx.scene.iter(), &mut self.widget_buffer);

        // Rebuild effects buffer
        self.ctx.effects.rebuild_effects_buffer();

        // Pack sound cues into flat buffer
        self.sound_buffer.clear();
        for sound in &self.ctx.sounds {
            self.sound_buffer.push(sound.0 as u8);
        }
    }

    /// Serialize persistent state for the host to store.
    pub fn save_state(&self) -> Option<String> {
        self.game.save_state()
    }

    /// Restore persistent state from a host-stored blob.
    pub fn load_state(&mut self, blob: &str) {
        self.game.load_state(blob);
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn widgets_ptr(&self) -> *const f32 {
        self.widget_buffer.instances_ptr()
    }

    pub fn widget_count(&self) -> u32 {
        self.widget_buffer.instance_count()
    }

    #[cfg(feature = "vectors")]
    pub fn ink_ptr(&self) -> *const f32 {
        self.ctx.ink.buffer_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn ink_vertex_count(&self) -> u32 {
        self.ctx.ink.vertex_count() as u32
    }

    pub fn effects_ptr(&self) -> *const f32 {
        self.ctx.effects.effects_buffer_ptr()
    }

    pub fn effects_vertex_count(&self) -> u32 {
        self.ctx.effects.effects_vertex_count() as u32
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn canvas_size(&self) -> f32 {
        self.config.canvas_size
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_widgets(&self) -> u32 {
        self.layout.max_widgets as u32
    }

    pub fn max_ink_vertices(&self) -> u32 {
        self.layout.max_ink_vertices as u32
    }

    pub fn max_effects_vertices(&self) -> u32 {
        self.layout.max_effects_vertices as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
