// Re-export glam for convenience
pub use glam::*;

// Whitted math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// Color type alias (linear RGB, not clamped until output)
pub type Color = Vec3;

/// Linear interpolation: `t * b + (1 - t) * a`.
#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    t * b + (1.0 - t) * a
}
