// extensions/easing.rs
//
// Pure easing functions for animation interpolation.
// No dependencies on Entity/Scene — just math.

use std::f32::consts::PI;

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Slow start.
    QuadIn,
    /// Slow end.
    QuadOut,
    /// Slow start and end.
    QuadInOut,
    /// Stronger slow end.
    CubicOut,
    /// Sine wave easing (smooth).
    SineInOut,
    /// Overshoot then settle — button presses.
    BackOut,
    /// Bouncy finish — sticker drops.
    BounceOut,
}

impl Easing {
    /// Apply the easing function to a normalized time value `t` in [0, 1].
    /// Returns the eased value, typically in [0, 1] (Back can overshoot).
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,

            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }

            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),

            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,

            Easing::BackOut => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
            }

            Easing::BounceOut => {
                const N1: f32 = 7.5625;
                const D1: f32 = 2.75;
                if t < 1.0 / D1 {
                    N1 * t * t
                } else if t < 2.0 / D1 {
                    let t = t - 1.5 / D1;
                    N1 * t * t + 0.75
                } else if t < 2.5 / D1 {
                    let t = t - 2.25 / D1;
                    N1 * t * t + 0.9375
                } else {
                    let t = t - 2.625 / D1;
                    N1 * t * t + 0.984375
                }
            }
        }
    }
}

/// Linear interpolation between two scalars.
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Linear interpolation between two Vec2s.
#[inline]
pub fn lerp_vec2(from: glam::Vec2, to: glam::Vec2, t: f32) -> glam::Vec2 {
    from + (to - from) * t
}

/// Eased interpolation between two scalars.
#[inline]
pub fn ease(from: f32, to: f32, t: f32, easing: Easing) -> f32 {
    lerp(from, to, easing.apply(t))
}

/// Eased interpolation between two Vec2s.
#[inline]
pub fn ease_vec2(from: glam::Vec2, to: glam::Vec2, t: f32, easing: Easing) -> glam::Vec2 {
    lerp_vec2(from, to, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        for e in [
            Easing::Linear,
            Easing::QuadIn,
            Easing::QuadOut,
            Easing::QuadInOut,
            Easing::CubicOut,
            Easing::SineInOut,
            Easing::BackOut,
            Easing::BounceOut,
        ] {
            assert!((e.apply(0.0)).abs() < 1e-4, "{e:?} at 0");
            assert!((e.apply(1.0) - 1.0).abs() < 1e-4, "{e:?} at 1");
        }
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn back_out_overshoots() {
        let peak = (0..100)
            .map(|i| Easing::BackOut.apply(i as f32 / 100.0))
            .fold(0.0f32, f32::max);
        assert!(peak > 1.0, "BackOut should overshoot, peak {peak}");
    }

    #[test]
    fn ease_interpolates() {
        assert_eq!(ease(10.0, 20.0, 0.0, Easing::Linear), 10.0);
        assert_eq!(ease(10.0, 20.0, 1.0, Easing::Linear), 20.0);
        assert_eq!(ease(10.0, 20.0, 0.5, Easing::Linear), 15.0);
    }
}
