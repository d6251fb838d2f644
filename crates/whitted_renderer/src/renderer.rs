//! Render driver.
//!
//! Traces one primary ray per pixel through a pinhole camera and stores
//! the unclamped colors in a row-major image buffer.

use std::time::Instant;

use thiserror::Error;
use whitted_core::Scene;
use whitted_math::Color;

use crate::{trace, Camera, World};

/// Errors that can occur while setting up a render.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Invalid resolution {width}x{height} (both must be > 0)")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Invalid field of view {0} degrees (must be in (0, 180))")]
    InvalidFov(f32),

    #[error("Invalid max depth {0} (must be at most {limit})", limit = RenderConfig::MAX_DEPTH_LIMIT)]
    InvalidMaxDepth(u32),
}

/// Render configuration.
///
/// Defaults: depth 5, gray background 2.0, bias 1e-4, IOR 1.1.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Maximum reflection/refraction recursion depth
    pub max_depth: u32,
    /// Color returned by rays that hit nothing
    pub background: Color,
    /// Offset along the normal for secondary ray origins
    pub bias: f32,
    /// Index of refraction of transparent spheres
    pub ior: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            background: Color::splat(2.0),
            bias: 1e-4,
            ior: 1.1,
        }
    }
}

impl RenderConfig {
    /// Largest accepted `max_depth`. Work per primary ray grows as
    /// `2^max_depth` inside transparent spheres.
    pub const MAX_DEPTH_LIMIT: u32 = 16;

    /// Check that the recursion depth stays bounded.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.max_depth > Self::MAX_DEPTH_LIMIT {
            return Err(RenderError::InvalidMaxDepth(self.max_depth));
        }
        Ok(())
    }
}

/// Counters gathered while tracing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Number of calls into the tracer (primary and secondary rays)
    pub rays: u64,
    /// Number of shadow rays cast toward lights
    pub shadow_rays: u64,
    /// Deepest recursion level reached
    pub max_depth: u32,
    /// Refraction rays suppressed by total internal reflection
    pub tir_events: u64,
}

/// Row-major buffer of linear colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get the pixel at (x, y), or `None` if out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the image.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y).unwrap_or_else(|| {
            panic!(
                "pixel ({}, {}) out of bounds for {}x{} image",
                x, y, self.width, self.height
            )
        });
        self.pixels[i] = color;
    }

    /// All pixels in row-major order, starting at the top-left.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }
}

/// Trace the primary ray of a single pixel.
pub fn render_pixel(
    camera: &Camera,
    world: &World,
    x: u32,
    y: u32,
    config: &RenderConfig,
    stats: &mut RenderStats,
) -> Color {
    let ray = camera.get_ray(x, y);
    trace(&ray, world, 0, config, stats)
}

/// Render the entire world to an image buffer.
///
/// The camera must have been initialized.
pub fn render(camera: &Camera, world: &World, config: &RenderConfig) -> (ImageBuffer, RenderStats) {
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    let mut stats = RenderStats::default();

    log::info!(
        "Rendering {}x{} (fov {}°, {} spheres, max depth {})",
        camera.image_width,
        camera.image_height,
        camera.fov(),
        world.len(),
        config.max_depth
    );
    let start = Instant::now();

    let band = (camera.image_height / 10).max(1);
    for y in 0..camera.image_height {
        for x in 0..camera.image_width {
            let color = render_pixel(camera, world, x, y, config, &mut stats);
            image.set(x, y, color);
        }

        if (y + 1) % band == 0 {
            log::debug!("Rendered {}/{} rows", y + 1, camera.image_height);
        }
    }

    log::info!(
        "Rendered in {:?}: {} rays, {} shadow rays, max depth {}",
        start.elapsed(),
        stats.rays,
        stats.shadow_rays,
        stats.max_depth
    );
    if stats.tir_events > 0 {
        log::debug!(
            "{} refraction rays replaced by total internal reflection",
            stats.tir_events
        );
    }

    (image, stats)
}

/// Render a scene with the default configuration.
pub fn render_scene(
    scene: &Scene,
    width: u32,
    height: u32,
    fov: f32,
) -> Result<(ImageBuffer, RenderStats), RenderError> {
    render_scene_with(scene, width, height, fov, &RenderConfig::default())
}

/// Render a scene with an explicit configuration.
pub fn render_scene_with(
    scene: &Scene,
    width: u32,
    height: u32,
    fov: f32,
    config: &RenderConfig,
) -> Result<(ImageBuffer, RenderStats), RenderError> {
    config.validate()?;

    let mut camera = Camera::new().with_resolution(width, height).with_fov(fov);
    camera.initialize()?;

    let world = World::from_scene(scene);
    Ok(render(&camera, &world, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_buffer_bounds() {
        let mut image = ImageBuffer::new(4, 3);
        image.set(3, 2, Color::ONE);

        assert_eq!(image.get(3, 2), Some(Color::ONE));
        assert_eq!(image.get(0, 0), Some(Color::ZERO));
        assert_eq!(image.get(4, 0), None);
        assert_eq!(image.get(0, 3), None);

        // Row-major: (3, 2) is the last pixel
        assert_eq!(image.pixels()[11], Color::ONE);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_image_buffer_set_out_of_bounds() {
        let mut image = ImageBuffer::new(4, 3);
        image.set(4, 0, Color::ONE);
    }

    #[test]
    fn test_render_scene_rejects_bad_camera() {
        let scene = Scene::reference();
        assert_eq!(
            render_scene(&scene, 0, 480, 30.0).unwrap_err(),
            RenderError::InvalidResolution { width: 0, height: 480 }
        );
        assert_eq!(
            render_scene(&scene, 640, 480, 180.0).unwrap_err(),
            RenderError::InvalidFov(180.0)
        );
    }

    #[test]
    fn test_max_depth_limit() {
        assert!(RenderConfig::default().validate().is_ok());

        let at_limit = RenderConfig {
            max_depth: RenderConfig::MAX_DEPTH_LIMIT,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());

        let too_deep = RenderConfig {
            max_depth: 64,
            ..Default::default()
        };
        assert_eq!(too_deep.validate(), Err(RenderError::InvalidMaxDepth(64)));
        assert_eq!(
            render_scene_with(&Scene::reference(), 4, 3, 30.0, &too_deep).unwrap_err(),
            RenderError::InvalidMaxDepth(64)
        );
    }

    #[test]
    fn test_reference_scene_end_to_end() {
        let _ = env_logger::builder().is_test(true).try_init();

        let scene = Scene::reference();
        let (image, stats) = render_scene(&scene, 640, 480, 30.0).unwrap();

        assert_eq!(image.width, 640);
        assert_eq!(image.height, 480);
        assert!(stats.rays >= 640 * 480);
        assert!(stats.max_depth <= 5);

        // Center pixel lands on the red reflective sphere
        let mut camera = Camera::new().with_resolution(640, 480).with_fov(30.0);
        camera.initialize().unwrap();
        let world = World::from_scene(&scene);
        let hit = world.nearest_hit(&camera.get_ray(320, 240)).unwrap();
        assert_eq!(hit.index, 1);

        let center = image.get(320, 240).unwrap();
        assert!(center.x > center.y && center.x > center.z, "center={:?}", center);

        // Top-left corner sees the sky
        assert_eq!(image.get(0, 0), Some(Color::splat(2.0)));

        for color in image.pixels() {
            for c in color.to_array() {
                assert!(c.is_finite() && c >= 0.0);
            }
        }
    }
}
