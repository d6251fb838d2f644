//! The list of primitives a render traces against.
//!
//! No acceleration structure: every query walks every sphere in scene
//! order.

use whitted_core::Scene;
use whitted_math::Ray;

use crate::Sphere;

/// Nearest intersection found along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Index of the sphere in scene order
    pub index: usize,
    /// Distance along the ray
    pub t: f32,
}

/// An ordered, immutable list of spheres.
#[derive(Debug, Clone, Default)]
pub struct World {
    spheres: Vec<Sphere>,
}

impl World {
    /// Create a world from spheres in scene order.
    pub fn new(spheres: Vec<Sphere>) -> Self {
        Self { spheres }
    }

    /// Build the render primitives for a validated scene.
    pub fn from_scene(scene: &Scene) -> Self {
        Self::new(scene.spheres().iter().map(Sphere::from).collect())
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    /// Get the number of spheres.
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    /// Check if the world is empty.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    /// Find the nearest sphere along a ray.
    ///
    /// When the ray starts inside a sphere the exit distance is used. Ties
    /// go to the sphere that comes first.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<Hit> {
        let mut nearest: Option<Hit> = None;

        for (index, sphere) in self.spheres.iter().enumerate() {
            if let Some((t0, t1)) = sphere.intersect(ray) {
                let t = if t0 < 0.0 { t1 } else { t0 };
                if nearest.map_or(true, |hit| t < hit.t) {
                    nearest = Some(Hit { index, t });
                }
            }
        }

        nearest
    }

    /// Test a shadow ray toward the light at `light_index`.
    ///
    /// Any intersection with another sphere counts as full occlusion,
    /// regardless of distance or material.
    pub fn occluded(&self, ray: &Ray, light_index: usize) -> bool {
        self.spheres
            .iter()
            .enumerate()
            .any(|(index, sphere)| index != light_index && sphere.intersect(ray).is_some())
    }

    /// Light-emitting spheres with their scene indices, in scene order.
    pub fn lights(&self) -> impl Iterator<Item = (usize, &Sphere)> {
        self.spheres
            .iter()
            .enumerate()
            .filter(|(_, sphere)| sphere.is_light())
    }
}
