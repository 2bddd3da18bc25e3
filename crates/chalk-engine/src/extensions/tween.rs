// extensions/tween.rs
//
// Tween system — manages animated value transitions by EntityId.
// Completely decoupled from Entity/Scene internals.
//
// Usage:
//   let mut tweens = TweenState::new();
//   tweens.add(door_id, Tween::size(from, to, 0.1, Easing::QuadOut));
//   tweens.tick(dt, &mut scene, &mut events);  // Advances tweens, updates entities

use super::easing::{ease, ease_vec2, Easing};
use crate::api::types::{EntityId, GameEvent};
use crate::core::scene::Scene;
use glam::Vec2;
use std::collections::HashMap;

/// What property a tween animates.
#[derive(Debug, Clone, Copy)]
pub enum TweenTarget {
    /// Animate Entity.pos
    Position { from: Vec2, to: Vec2 },
    /// Animate Entity.size (the press-bounce on buttons scales size)
    Size { from: Vec2, to: Vec2 },
    /// Animate widget alpha (if a widget exists)
    Alpha { from: f32, to: f32 },
}

/// What happens when a tween completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenLoop {
    /// Stop and remove the tween.
    #[default]
    Once,
    /// Reverse direction (ping-pong) — breathing highlights.
    PingPong,
}

/// A single tween animation.
#[derive(Debug, Clone)]
pub struct Tween {
    /// What to animate.
    pub target: TweenTarget,
    /// Duration in seconds.
    pub duration: f32,
    /// Elapsed time.
    pub elapsed: f32,
    /// Easing function.
    pub easing: Easing,
    /// Loop behavior.
    pub loop_mode: TweenLoop,
    /// For ping-pong: current direction (true = forward).
    forward: bool,
    /// Optional event kind to emit as a GameEvent when complete.
    pub on_complete: Option<u32>,
}

impl Tween {
    pub fn position(from: Vec2, to: Vec2, duration: f32, easing: Easing) -> Self {
        Self::with_target(TweenTarget::Position { from, to }, duration, easing)
    }

    pub fn size(from: Vec2, to: Vec2, duration: f32, easing: Easing) -> Self {
        Self::with_target(TweenTarget::Size { from, to }, duration, easing)
    }

    pub fn alpha(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::with_target(TweenTarget::Alpha { from, to }, duration, easing)
    }

    fn with_target(target: TweenTarget, duration: f32, easing: Easing) -> Self {
        Self {
            target,
            duration: duration.max(1e-4),
            elapsed: 0.0,
            easing,
            loop_mode: TweenLoop::Once,
            forward: true,
            on_complete: None,
        }
    }

    pub fn ping_pong(mut self) -> Self {
        self.loop_mode = TweenLoop::PingPong;
        self
    }

    /// Emit `GameEvent::new(kind, ...)` when the tween finishes.
    pub fn notify(mut self, kind: u32) -> Self {
        self.on_complete = Some(kind);
        self
    }

    /// Normalized progress, respecting ping-pong direction.
    fn t(&self) -> f32 {
        let raw = (self.elapsed / self.duration).clamp(0.0, 1.0);
        if self.forward {
            raw
        } else {
            1.0 - raw
        }
    }

    fn apply(&self, scene: &mut Scene, id: EntityId) {
        let t = self.t();
        if let Some(entity) = scene.get_mut(id) {
            match self.target {
                TweenTarget::Position { from, to } => {
                    entity.pos = ease_vec2(from, to, t, self.easing);
                }
                TweenTarget::Size { from, to } => {
                    entity.size = ease_vec2(from, to, t, self.easing);
                }
                TweenTarget::Alpha { from, to } => {
                    if let Some(widget) = &mut entity.widget {
                        widget.alpha = ease(from, to, t, self.easing);
                    }
                }
            }
        }
    }
}

/// All active tweens, keyed by the entity they animate.
/// One tween per entity — adding a second replaces the first.
pub struct TweenState {
    tweens: HashMap<EntityId, Tween>,
}

impl TweenState {
    pub fn new() -> Self {
        Self {
            tweens: HashMap::new(),
        }
    }

    /// Start (or replace) a tween on an entity.
    pub fn add(&mut self, id: EntityId, tween: Tween) {
        self.tweens.insert(id, tween);
    }

    /// Stop a tween without completing it.
    pub fn remove(&mut self, id: EntityId) {
        self.tweens.remove(&id);
    }

    /// Whether an entity currently has a tween.
    pub fn has(&self, id: EntityId) -> bool {
        self.tweens.contains_key(&id)
    }

    /// Drop all tweens (screen transitions).
    pub fn clear(&mut self) {
        self.tweens.clear();
    }

    /// Advance all tweens, writing animated values into the scene and
    /// pushing completion events.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene, events: &mut Vec<GameEvent>) {
        let mut finished: Vec<EntityId> = Vec::new();

        for (&id, tween) in self.tweens.iter_mut() {
            tween.elapsed += dt;
            let done = tween.elapsed >= tween.duration;

            if done {
                match tween.loop_mode {
                    TweenLoop::Once => {
                        tween.elapsed = tween.duration;
                        tween.apply(scene, id);
                        if let Some(kind) = tween.on_complete {
                            events.push(GameEvent::new(kind, 0.0, 0.0, 0.0));
                        }
                        finished.push(id);
                        continue;
                    }
                    TweenLoop::PingPong => {
                        tween.elapsed = 0.0;
                        tween.forward = !tween.forward;
                    }
                }
            }

            tween.apply(scene, id);
        }

        for id in finished {
            self.tweens.remove(&id);
        }
    }
}

impl Default for TweenState {
    fn default() -> Self {
        Self::new()
    }
}
