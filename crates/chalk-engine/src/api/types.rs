use bytemuck::{Pod, Zeroable};

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// A sound cue emitted by the game logic.
/// The numeric value maps to a game-defined sound in the TypeScript SoundManager
/// (taps, chimes, cheers — and speech-synthesis cues for the reading games).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

/// A game event communicated from Rust to TypeScript via SharedArrayBuffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload
/// (progress fractions, subject indices, character codes).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// Build an event from a kind id and up to three payload values.
    pub fn new(kind: u32, a: f32, b: f32, c: f32) -> Self {
        Self {
            kind: kind as f32,
            a,
            b,
            c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_event_is_4_floats() {
        assert_eq!(std::mem::size_of::<GameEvent>(), 16);
        assert_eq!(GameEvent::FLOATS, 4);
    }

    #[test]
    fn new_stores_kind_as_float() {
        let e = GameEvent::new(7, 0.5, 1.0, 2.0);
        assert_eq!(e.kind, 7.0);
        assert_eq!(e.a, 0.5);
    }
}
