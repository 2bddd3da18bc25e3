use crate::api::types::EntityId;
use crate::components::entity::Entity;
use glam::Vec2;

/// Simple entity storage using a flat Vec.
/// Designed for screen-sized UI counts (dozens, not millions).
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(64),
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove an entity by ID. Returns the removed entity if found.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        if let Some(idx) = self.entities.iter().position(|e| e.id == id) {
            Some(self.entities.swap_remove(idx))
        } else {
            None
        }
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Iterate over all entities mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    /// Find the first entity with the given tag (mutable).
    pub fn find_by_tag_mut(&mut self, tag: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.tag == tag)
    }

    /// Topmost active widget entity containing the point, if any.
    ///
    /// Higher `z` wins; among equal `z`, the most recently spawned wins
    /// (later spawns draw on top). Entities without a widget, inactive
    /// entities, and disabled widgets are not tappable.
    pub fn hit_test(&self, point: Vec2) -> Option<EntityId> {
        let mut best: Option<(f32, usize, EntityId)> = None;
        for (idx, e) in self.entities.iter().enumerate() {
            if !e.active || !e.contains(point) {
                continue;
            }
            let w = match &e.widget {
                Some(w) => w,
                None => continue,
            };
            if w.has(crate::components::widget::state::DISABLED) {
                continue;
            }
            let candidate = (e.z, idx, e.id);
            match best {
                Some((bz, bi, _)) if (e.z, idx) <= (bz, bi) => {}
                _ => best = Some(candidate),
            }
        }
        best.map(|(_, _, id)| id)
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Clear all entities. Called on screen transitions.
    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
