//! Sphere primitive for ray tracing.

use whitted_core::SphereDesc;
use whitted_math::{Color, Ray, Vec3};

/// A sphere primitive with its material coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    /// Cached `radius * radius`
    radius2: f32,
    pub surface_color: Color,
    pub emission_color: Color,
    pub transparency: f32,
    pub reflection: f32,
}

impl Sphere {
    /// Create an opaque, non-reflective, non-emissive sphere.
    pub fn new(center: Vec3, radius: f32, surface_color: Color) -> Self {
        Self {
            center,
            radius,
            radius2: radius * radius,
            surface_color,
            emission_color: Color::ZERO,
            transparency: 0.0,
            reflection: 0.0,
        }
    }

    pub fn with_reflection(mut self, reflection: f32) -> Self {
        self.reflection = reflection;
        self
    }

    pub fn with_transparency(mut self, transparency: f32) -> Self {
        self.transparency = transparency;
        self
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission_color = emission;
        self
    }

    #[inline]
    pub fn radius2(&self) -> f32 {
        self.radius2
    }

    /// A sphere is a light iff the red channel of its emission is positive.
    #[inline]
    pub fn is_light(&self) -> bool {
        self.emission_color.x > 0.0
    }

    /// True if hits on this sphere spawn reflected/refracted rays.
    #[inline]
    pub fn is_specular(&self) -> bool {
        self.transparency > 0.0 || self.reflection > 0.0
    }

    /// Intersect a ray with this sphere.
    ///
    /// Returns the entry and exit distances `(t0, t1)` along the ray. `t0`
    /// is negative when the ray starts inside the sphere. Spheres whose
    /// center projects behind the origin (`tca < 0`) are culled, so a ray
    /// starting inside a sphere and pointing away from its center misses.
    /// Assumes a unit-length direction.
    pub fn intersect(&self, ray: &Ray) -> Option<(f32, f32)> {
        let l = self.center - ray.origin;
        let tca = l.dot(ray.direction);
        if tca < 0.0 {
            return None;
        }

        let d2 = l.dot(l) - tca * tca;
        if d2 > self.radius2 {
            return None;
        }

        let thc = (self.radius2 - d2).sqrt();
        Some((tca - thc, tca + thc))
    }

    /// Unit outward normal at a point on the surface.
    #[inline]
    pub fn normal_at(&self, p: Vec3) -> Vec3 {
        (p - self.center).normalize_or_zero()
    }
}

impl From<&SphereDesc> for Sphere {
    fn from(desc: &SphereDesc) -> Self {
        Sphere::new(desc.center(), desc.radius, desc.surface_color())
            .with_reflection(desc.reflection)
            .with_transparency(desc.transparency)
            .with_emission(desc.emission_color())
    }
}
