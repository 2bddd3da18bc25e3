/// Input event types the engine understands.
/// Generic — no game-specific semantics. The apps are touch-first, so the
/// vocabulary is pointer events plus an escape hatch for host UI controls.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// A touch/click began at canvas coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/cursor moved to canvas coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// A touch/click ended at canvas coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// The platform cancelled the touch (incoming call, gesture takeover).
    /// Treated like PointerUp by games, but carries no position.
    PointerCancel,
    /// A custom event from the UI layer (host buttons, date changes, seeds).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
