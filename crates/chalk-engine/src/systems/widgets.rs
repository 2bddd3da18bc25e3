use crate::components::entity::Entity;
use bytemuck::{Pod, Zeroable};

/// Per-widget instance data written to SharedArrayBuffer for the TypeScript
/// renderer. Must match the TypeScript protocol: 8 floats = 32 bytes stride.
///
/// `kind` and `value` are game-defined codes; the shell maps them to art and
/// text (book colors, icons, labels). The engine only guarantees geometry.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct WidgetInstance {
    /// Center X in canvas space.
    pub x: f32,
    /// Center Y in canvas space.
    pub y: f32,
    /// Rectangle width.
    pub w: f32,
    /// Rectangle height.
    pub h: f32,
    /// Game-defined widget kind code.
    pub kind: f32,
    /// Game-defined payload value.
    pub value: f32,
    /// Bitwise OR of widget state flags.
    pub state: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
}

impl WidgetInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Buffer of widget instances for the current frame, sorted by draw order.
pub struct WidgetBuffer {
    pub instances: Vec<WidgetInstance>,
}

impl WidgetBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(64),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: WidgetInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for SharedArrayBuffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for WidgetBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the widget buffer from a set of entities, back-to-front by `z`
/// (stable, so equal-z entities keep spawn order — later spawns on top).
pub fn build_widget_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    buffer: &mut WidgetBuffer,
) {
    buffer.clear();

    let mut drawable: Vec<&Entity> = entities
        .filter(|e| e.active && e.widget.is_some())
        .collect();
    drawable.sort_by(|a, b| a.z.total_cmp(&b.z));

    for entity in drawable {
        let widget = entity.widget.as_ref().expect("filtered above");
        buffer.push(WidgetInstance {
            x: entity.pos.x,
            y: entity.pos.y,
            w: entity.size.x,
            h: entity.size.y,
            kind: widget.kind as f32,
            value: widget.value,
            state: widget.state as f32,
            alpha: widget.alpha,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::widget::WidgetComponent;
    use glam::Vec2;

    #[test]
    fn widget_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<WidgetInstance>(), 32);
        assert_eq!(WidgetInstance::FLOATS, 8);
    }

    #[test]
    fn build_buffer_sorts_by_z_and_skips_inactive() {
        let mut top = Entity::new(EntityId(1))
            .with_pos(Vec2::new(1.0, 1.0))
            .with_size(Vec2::splat(10.0))
            .with_z(5.0)
            .with_widget(WidgetComponent::new(2));
        top.widget.as_mut().unwrap().value = 42.0;
        let bottom = Entity::new(EntityId(2))
            .with_size(Vec2::splat(10.0))
            .with_widget(WidgetComponent::new(1));
        let mut hidden = Entity::new(EntityId(3)).with_widget(WidgetComponent::new(1));
        hidden.active = false;
        let logic_only = Entity::new(EntityId(4));

        let entities = vec![top, bottom, hidden, logic_only];
        let mut buffer = WidgetBuffer::new();
        build_widget_buffer(entities.iter(), &mut buffer);

        assert_eq!(buffer.instance_count(), 2);
        assert_eq!(buffer.instances[0].kind, 1.0);
        assert_eq!(buffer.instances[1].kind, 2.0);
        assert_eq!(buffer.instances[1].value, 42.0);
    }
}
