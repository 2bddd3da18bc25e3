//! Celebration effects: confetti bursts on completions and sticker awards.
//!
//! This module provides the `EffectsState` facade for managing all particle
//! effects, plus the individual pieces for direct use.

mod geometry;
mod particle;
mod rng;

// Re-export public types
pub use geometry::{build_strip_vertices, strip_to_triangles};
pub use particle::Particle;
pub use rng::Rng;

/// Festive palette used when a burst does not specify colors.
const CONFETTI_PALETTE: [[f32; 4]; 6] = [
    [1.0, 0.42, 0.42, 1.0], // coral
    [0.31, 0.80, 0.77, 1.0], // teal
    [1.0, 0.80, 0.43, 1.0], // gold
    [0.64, 0.61, 1.0, 1.0],  // lavender
    [0.33, 0.94, 0.77, 1.0], // mint
    [0.99, 0.47, 0.66, 1.0], // pink
];

/// Container for all particle effects.
/// Generic — games trigger bursts via public methods; the runner ticks and
/// rebuilds the flat vertex buffer each frame.
pub struct EffectsState {
    pub particles: Vec<Particle>,
    pub effects_buffer: Vec<f32>,
    pub rng: Rng,
    max_floats: usize,
}

impl EffectsState {
    /// Create a new EffectsState with the given RNG seed.
    pub fn new(seed: u64) -> Self {
        Self::with_capacity(seed, 4096)
    }

    /// Create a new EffectsState with a vertex budget.
    pub fn with_capacity(seed: u64, max_vertices: usize) -> Self {
        EffectsState {
            particles: Vec::new(),
            effects_buffer: Vec::with_capacity(max_vertices * 6),
            rng: Rng::new(seed.wrapping_add(7919)),
            max_floats: max_vertices * 6,
        }
    }

    /// Launch a confetti burst at a position (subject complete, sticker won).
    pub fn burst(&mut self, center: [f32; 2], count: usize) {
        for _ in 0..count {
            let angle = self.rng.range_f32(0.0, std::f32::consts::TAU);
            let speed = self.rng.range_f32(120.0, 420.0);
            // Bias upward so confetti fountains before it falls.
            let vx = angle.cos() * speed;
            let vy = angle.sin() * speed * 0.6 - self.rng.range_f32(150.0, 320.0);
            let color = CONFETTI_PALETTE[self.rng.next_int(CONFETTI_PALETTE.len() as u32) as usize];
            let width = self.rng.range_f32(2.5, 5.0);
            let lifetime = self.rng.range_f32(1.2, 2.2);
            self.particles
                .push(Particle::new(center, [vx, vy], width, color, lifetime));
        }
    }

    /// Advance all particles, dropping expired ones.
    pub fn tick(&mut self, dt: f32) {
        self.particles.retain_mut(|p| p.tick(dt));
    }

    /// Rebuild the flat vertex buffer from live particles.
    /// Stops adding particles once the vertex budget is reached.
    pub fn rebuild_effects_buffer(&mut self) {
        self.effects_buffer.clear();
        for (i, p) in self.particles.iter().enumerate() {
            let verts = p.to_vertices();
            if self.effects_buffer.len() + verts.len() > self.max_floats {
                log::debug!("effects buffer full, dropping {} particles", self.particles.len() - i);
                break;
            }
            self.effects_buffer.extend_from_slice(&verts);
        }
    }

    /// Number of vertices currently in the effects buffer.
    pub fn effects_vertex_count(&self) -> usize {
        self.effects_buffer.len() / 6
    }

    /// Raw pointer to the effects buffer for SAB copy.
    pub fn effects_buffer_ptr(&self) -> *const f32 {
        self.effects_buffer.as_ptr()
    }

    /// Drop all live particles (screen transitions).
    pub fn clear(&mut self) {
        self.particles.clear();
        self.effects_buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_spawns_particles() {
        let mut fx = EffectsState::new(42);
        fx.burst([200.0, 200.0], 30);
        assert_eq!(fx.particles.len(), 30);
    }

    #[test]
    fn particles_expire_over_time() {
        let mut fx = EffectsState::new(42);
        fx.burst([200.0, 200.0], 10);
        for _ in 0..300 {
            fx.tick(1.0 / 60.0); // 5 seconds — past every lifetime
        }
        assert!(fx.particles.is_empty());
    }

    #[test]
    fn buffer_respects_budget() {
        let mut fx = EffectsState::with_capacity(42, 12);
        fx.burst([0.0, 0.0], 50);
        fx.tick(1.0 / 60.0);
        fx.rebuild_effects_buffer();
        assert!(fx.effects_vertex_count() <= 12);
    }

    #[test]
    fn clear_drops_everything() {
        let mut fx = EffectsState::new(1);
        fx.burst([0.0, 0.0], 5);
        fx.rebuild_effects_buffer();
        fx.clear();
        assert!(fx.particles.is_empty());
        assert_eq!(fx.effects_vertex_count(), 0);
    }
}
