use crate::api::types::EntityId;
use crate::components::widget::WidgetComponent;
use glam::Vec2;

/// Fat Entity — a single struct with optional components.
/// Designed for simplicity and rapid prototyping over ECS purity.
/// Entities are positioned rectangles; the optional widget component makes
/// them tappable/drawable UI elements.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is active (inactive entities are skipped).
    pub active: bool,
    /// Center position in canvas space.
    pub pos: Vec2,
    /// Rectangle size (width, height) for hit-testing and layout.
    pub size: Vec2,
    /// Draw/hit order. Higher z wins ties on overlapping hits.
    pub z: f32,
    /// Widget component (optional — entities without widgets are logic-only).
    pub widget: Option<WidgetComponent>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec2::ZERO,
            size: Vec2::ZERO,
            z: 0.0,
            widget: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_z(mut self, z: f32) -> Self {
        self.z = z;
        self
    }

    pub fn with_widget(mut self, widget: WidgetComponent) -> Self {
        self.widget = Some(widget);
        self
    }

    /// Whether a canvas point falls inside this entity's rectangle.
    /// The rectangle is centered on `pos`.
    pub fn contains(&self, point: Vec2) -> bool {
        let half = self.size * 0.5;
        (point.x - self.pos.x).abs() <= half.x && (point.y - self.pos.y).abs() <= half.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_centered() {
        let e = Entity::new(EntityId(1))
            .with_pos(Vec2::new(100.0, 100.0))
            .with_size(Vec2::new(40.0, 20.0));
        assert!(e.contains(Vec2::new(100.0, 100.0)));
        assert!(e.contains(Vec2::new(119.0, 109.0)));
        assert!(!e.contains(Vec2::new(121.0, 100.0)));
        assert!(!e.contains(Vec2::new(100.0, 111.0)));
    }

    #[test]
    fn zero_size_contains_only_center() {
        let e = Entity::new(EntityId(1)).with_pos(Vec2::new(5.0, 5.0));
        assert!(e.contains(Vec2::new(5.0, 5.0)));
        assert!(!e.contains(Vec2::new(5.1, 5.0)));
    }
}
