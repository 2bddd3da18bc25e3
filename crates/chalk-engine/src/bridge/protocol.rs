/// SharedArrayBuffer layout.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Widgets: max_widgets × 8 floats]
/// [Ink: max_ink_vertices × 6 floats]
/// [Effects: max_effects_vertices × 6 floats]
/// [Sounds: max_sounds × 1 float]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// TypeScript reads them from the header to compute offsets dynamically.
use crate::api::game::GameConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_WIDGETS: usize = 2;
pub const HEADER_WIDGET_COUNT: usize = 3;
pub const HEADER_MAX_INK_VERTICES: usize = 4;
pub const HEADER_INK_VERTEX_COUNT: usize = 5;
pub const HEADER_MAX_EFFECTS_VERTICES: usize = 6;
pub const HEADER_EFFECTS_VERTEX_COUNT: usize = 7;
pub const HEADER_CANVAS_SIZE: usize = 8;
pub const HEADER_MAX_SOUNDS: usize = 9;
pub const HEADER_SOUND_COUNT: usize = 10;
pub const HEADER_MAX_EVENTS: usize = 11;
pub const HEADER_EVENT_COUNT: usize = 12;
pub const HEADER_PROTOCOL_VERSION: usize = 13;
// Indices 14-15 reserved.

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per widget instance (wire format — never changes).
pub const WIDGET_FLOATS: usize = 8;

/// Floats per ink/effects vertex: x, y, r, g, b, a (wire format — never changes).
pub const INK_VERTEX_FLOATS: usize = 6;

/// Floats per game event: kind, a, b, c (wire format — never changes).
pub const EVENT_FLOATS: usize = 4;

/// Runtime-computed buffer layout from the game's configured capacities.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum widget instances.
    pub max_widgets: usize,
    /// Maximum ink vertices.
    pub max_ink_vertices: usize,
    /// Maximum effects vertices.
    pub max_effects_vertices: usize,
    /// Maximum sound events per frame.
    pub max_sounds: usize,
    /// Maximum game events per frame.
    pub max_events: usize,

    /// Size of widget data section in floats.
    pub widget_data_floats: usize,
    /// Size of ink data section in floats.
    pub ink_data_floats: usize,
    /// Size of effects data section in floats.
    pub effects_data_floats: usize,
    /// Size of sound data section in floats.
    pub sound_data_floats: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where widget data begins.
    pub widget_data_offset: usize,
    /// Offset (in floats) where ink data begins.
    pub ink_data_offset: usize,
    /// Offset (in floats) where effects data begins.
    pub effects_data_offset: usize,
    /// Offset (in floats) where sound data begins.
    pub sound_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(
        max_widgets: usize,
        max_ink_vertices: usize,
        max_effects_vertices: usize,
        max_sounds: usize,
        max_events: usize,
    ) -> Self {
        let widget_data_floats = max_widgets * WIDGET_FLOATS;
        let ink_data_floats = max_ink_vertices * INK_VERTEX_FLOATS;
        let effects_data_floats = max_effects_vertices * INK_VERTEX_FLOATS;
        let sound_data_floats = max_sounds;
        let event_data_floats = max_events * EVENT_FLOATS;

        let widget_data_offset = HEADER_FLOATS;
        let ink_data_offset = widget_data_offset + widget_data_floats;
        let effects_data_offset = ink_data_offset + ink_data_floats;
        let sound_data_offset = effects_data_offset + effects_data_floats;
        let event_data_offset = sound_data_offset + sound_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_widgets,
            max_ink_vertices,
            max_effects_vertices,
            max_sounds,
            max_events,
            widget_data_floats,
            ink_data_floats,
            effects_data_floats,
            sound_data_floats,
            event_data_floats,
            widget_data_offset,
            ink_data_offset,
            effects_data_offset,
            sound_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_widgets,
            config.max_ink_vertices,
            config.max_effects_vertices,
            config.max_sounds,
            config.max_events,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());

        assert_eq!(layout.max_widgets, 64);
        assert_eq!(layout.max_ink_vertices, 16384);
        assert_eq!(layout.max_effects_vertices, 4096);
        assert_eq!(layout.max_sounds, 32);
        assert_eq!(layout.max_events, 32);

        assert_eq!(layout.widget_data_floats, 64 * 8);
        assert_eq!(layout.ink_data_floats, 16384 * 6);
        assert_eq!(layout.effects_data_floats, 4096 * 6);
        assert_eq!(layout.sound_data_floats, 32);
        assert_eq!(layout.event_data_floats, 32 * 4);
    }

    #[test]
    fn custom_capacities_compute_correctly() {
        let layout = ProtocolLayout::new(16, 1024, 256, 8, 64);

        assert_eq!(layout.widget_data_floats, 16 * 8);
        assert_eq!(layout.ink_data_floats, 1024 * 6);
        assert_eq!(layout.effects_data_floats, 256 * 6);
        assert_eq!(layout.sound_data_floats, 8);
        assert_eq!(layout.event_data_floats, 64 * 4);

        let expected_total = HEADER_FLOATS + 16 * 8 + 1024 * 6 + 256 * 6 + 8 + 64 * 4;
        assert_eq!(layout.buffer_total_floats, expected_total);
        assert_eq!(layout.buffer_total_bytes, expected_total * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(10, 200, 100, 4, 16);

        assert_eq!(layout.widget_data_offset, HEADER_FLOATS);
        assert_eq!(
            layout.ink_data_offset,
            layout.widget_data_offset + layout.widget_data_floats
        );
        assert_eq!(
            layout.effects_data_offset,
            layout.ink_data_offset + layout.ink_data_floats
        );
        assert_eq!(
            layout.sound_data_offset,
            layout.effects_data_offset + layout.effects_data_floats
        );
        assert_eq!(
            layout.event_data_offset,
            layout.sound_data_offset + layout.sound_data_floats
        );
        assert_eq!(
            layout.buffer_total_floats,
            layout.event_data_offset + layout.event_data_floats
        );
    }
}
