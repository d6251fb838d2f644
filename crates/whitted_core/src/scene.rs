//! Scene description types.
//!
//! A scene is an ordered list of sphere records. Order is significant: it
//! breaks ties between equally near hits and fixes the order in which
//! lights are accumulated, so renders are bit-reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use whitted_math::{Color, Interval, Vec3};

/// Default seed for random scenes.
pub const REFERENCE_SEED: u64 = 13;

/// Upper bound on the sphere count of a random scene.
pub const MAX_RANDOM_SPHERES: usize = 1024;

/// Errors found while validating a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Scene contains no spheres")]
    Empty,

    #[error("Sphere {index} has invalid radius {radius} (must be finite and > 0)")]
    InvalidRadius { index: usize, radius: f32 },

    #[error("Sphere {index} has {name} = {value}, expected a value in [0, 1]")]
    CoefficientOutOfRange {
        index: usize,
        name: &'static str,
        value: f32,
    },

    #[error("Sphere {index} has a non-finite position or color")]
    NonFinite { index: usize },
}

/// A single sphere record as it appears in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    /// Sphere center
    pub center: [f32; 3],

    /// Sphere radius (must be > 0)
    pub radius: f32,

    /// Diffuse/reflective base color (RGB)
    pub surface_color: [f32; 3],

    /// Reflectivity in [0, 1]
    #[serde(default)]
    pub reflection: f32,

    /// Transparency in [0, 1]
    #[serde(default)]
    pub transparency: f32,

    /// Emitted light (RGB). A sphere with a positive red channel is a light.
    #[serde(default)]
    pub emission_color: [f32; 3],
}

impl SphereDesc {
    /// Create an opaque, non-reflective, non-emissive sphere.
    pub fn new(center: Vec3, radius: f32, surface_color: Color) -> Self {
        Self {
            center: center.to_array(),
            radius,
            surface_color: surface_color.to_array(),
            reflection: 0.0,
            transparency: 0.0,
            emission_color: [0.0; 3],
        }
    }

    /// Set the reflection coefficient.
    pub fn with_reflection(mut self, reflection: f32) -> Self {
        self.reflection = reflection;
        self
    }

    /// Set the transparency coefficient.
    pub fn with_transparency(mut self, transparency: f32) -> Self {
        self.transparency = transparency;
        self
    }

    /// Set the emission color.
    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission_color = emission.to_array();
        self
    }

    pub fn center(&self) -> Vec3 {
        Vec3::from_array(self.center)
    }

    pub fn surface_color(&self) -> Color {
        Vec3::from_array(self.surface_color)
    }

    pub fn emission_color(&self) -> Color {
        Vec3::from_array(self.emission_color)
    }

    /// Check if this sphere acts as a light source.
    ///
    /// Only the red channel is inspected.
    pub fn is_light(&self) -> bool {
        self.emission_color[0] > 0.0
    }

    fn validate(&self, index: usize) -> Result<(), SceneError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(SceneError::InvalidRadius {
                index,
                radius: self.radius,
            });
        }

        let vectors_finite = self
            .center
            .iter()
            .chain(&self.surface_color)
            .chain(&self.emission_color)
            .all(|c| c.is_finite());
        if !vectors_finite {
            return Err(SceneError::NonFinite { index });
        }

        for (name, value) in [
            ("reflection", self.reflection),
            ("transparency", self.transparency),
        ] {
            if !Interval::UNIT.contains(value) {
                return Err(SceneError::CoefficientOutOfRange { index, name, value });
            }
        }

        Ok(())
    }
}

/// An ordered, validated collection of spheres.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    spheres: Vec<SphereDesc>,
}

impl Scene {
    /// Build a scene, validating every sphere.
    ///
    /// Coincident centers are allowed; equally near hits resolve to the
    /// sphere that comes first.
    pub fn new(spheres: Vec<SphereDesc>) -> Result<Self, SceneError> {
        if spheres.is_empty() {
            return Err(SceneError::Empty);
        }
        for (index, sphere) in spheres.iter().enumerate() {
            sphere.validate(index)?;
        }

        let scene = Self { spheres };
        log::debug!(
            "Scene validated: {} spheres, {} lights",
            scene.len(),
            scene.light_count()
        );
        Ok(scene)
    }

    /// Six-sphere scene: a large ground sphere, four colored reflective
    /// spheres and one light at (0, 20, -30).
    pub fn reference() -> Self {
        Self {
            spheres: vec![
                // Ground
                SphereDesc::new(Vec3::new(0.0, -10004.0, -20.0), 10000.0, Color::splat(0.2)),
                SphereDesc::new(Vec3::new(0.0, 0.0, -20.0), 4.0, Color::new(1.00, 0.32, 0.36))
                    .with_reflection(1.0)
                    .with_transparency(0.5),
                SphereDesc::new(Vec3::new(5.0, -1.0, -15.0), 2.0, Color::new(0.90, 0.76, 0.46))
                    .with_reflection(1.0),
                SphereDesc::new(Vec3::new(5.0, 0.0, -25.0), 3.0, Color::new(0.65, 0.77, 0.97))
                    .with_reflection(1.0),
                SphereDesc::new(Vec3::new(-5.5, 0.0, -15.0), 3.0, Color::new(0.90, 0.90, 0.90))
                    .with_reflection(1.0),
                // Light
                SphereDesc::new(Vec3::new(0.0, 20.0, -30.0), 3.0, Color::ZERO)
                    .with_emission(Color::splat(3.0)),
            ],
        }
    }

    /// Generate a random scene from a fixed seed.
    ///
    /// Keeps the reference ground and light and scatters `count` spheres
    /// resting on the ground in front of the camera. `count` is capped at
    /// [`MAX_RANDOM_SPHERES`].
    pub fn random(seed: u64, count: usize) -> Self {
        if count > MAX_RANDOM_SPHERES {
            log::warn!("Random sphere count {} capped to {}", count, MAX_RANDOM_SPHERES);
        }
        let count = count.min(MAX_RANDOM_SPHERES);

        let mut rng = StdRng::seed_from_u64(seed);
        let reference = Self::reference();
        let ground = reference.spheres[0].clone();
        let light = reference.spheres[5].clone();
        let ground_top = ground.center[1] + ground.radius;

        let mut spheres = Vec::with_capacity(count + 2);
        spheres.push(ground);

        for _ in 0..count {
            let radius = rng.gen_range(0.5..2.5);
            let center = Vec3::new(
                rng.gen_range(-9.0..9.0),
                ground_top + radius,
                rng.gen_range(-40.0..-12.0),
            );
            let color = Color::new(
                rng.gen_range(0.2..1.0),
                rng.gen_range(0.2..1.0),
                rng.gen_range(0.2..1.0),
            );

            let choose_mat: f32 = rng.gen();
            let sphere = SphereDesc::new(center, radius, color);
            let sphere = if choose_mat < 0.5 {
                // Diffuse
                sphere
            } else if choose_mat < 0.8 {
                // Mirror
                sphere.with_reflection(1.0)
            } else {
                // Glass
                sphere.with_reflection(1.0).with_transparency(0.5)
            };
            spheres.push(sphere);
        }

        spheres.push(light);
        log::info!("Generated random scene: seed {}, {} spheres", seed, spheres.len());
        Self { spheres }
    }

    /// Spheres in scene order.
    pub fn spheres(&self) -> &[SphereDesc] {
        &self.spheres
    }

    /// Get the number of spheres.
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    /// Get the number of light-emitting spheres.
    pub fn light_count(&self) -> usize {
        self.spheres.iter().filter(|s| s.is_light()).count()
    }
}
