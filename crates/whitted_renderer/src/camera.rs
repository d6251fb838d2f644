//! Pinhole camera for primary ray generation.

use std::f32::consts::PI;

use whitted_math::{Ray, Vec3};

use crate::RenderError;

/// Pinhole camera at the origin looking down -Z with +Y up.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    fov: f32, // Field of view in degrees

    // Cached computed values (set by initialize())
    inv_width: f32,
    inv_height: f32,
    angle: f32,
    aspect_ratio: f32,
}

impl Camera {
    /// Create a new camera with the reference settings (640x480, 30°).
    pub fn new() -> Self {
        Self {
            image_width: 640,
            image_height: 480,
            fov: 30.0,
            inv_width: 0.0,
            inv_height: 0.0,
            angle: 0.0,
            aspect_ratio: 1.0,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set the field of view in degrees.
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Validate settings and compute the projection (must be called
    /// before generating rays).
    pub fn initialize(&mut self) -> Result<(), RenderError> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(RenderError::InvalidResolution {
                width: self.image_width,
                height: self.image_height,
            });
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(RenderError::InvalidFov(self.fov));
        }

        self.inv_width = 1.0 / self.image_width as f32;
        self.inv_height = 1.0 / self.image_height as f32;
        self.aspect_ratio = self.image_width as f32 / self.image_height as f32;
        self.angle = (PI * 0.5 * self.fov / 180.0).tan();
        Ok(())
    }

    /// Generate the primary ray through the center of pixel (x, y).
    ///
    /// Pixel (0, 0) is the top-left corner.
    pub fn get_ray(&self, x: u32, y: u32) -> Ray {
        let xx = (2.0 * ((x as f32 + 0.5) * self.inv_width) - 1.0) * self.angle * self.aspect_ratio;
        let yy = (1.0 - 2.0 * ((y as f32 + 0.5) * self.inv_height)) * self.angle;

        Ray::towards(Vec3::ZERO, Vec3::new(xx, yy, -1.0))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_initialize() {
        let mut camera = Camera::new().with_resolution(640, 480).with_fov(30.0);
        camera.initialize().unwrap();

        assert!((camera.aspect_ratio - 4.0 / 3.0).abs() < 1e-6);
        assert!((camera.angle - (15.0f32).to_radians().tan()).abs() < 1e-6);
    }

    #[test]
    fn test_camera_rejects_invalid_settings() {
        let mut camera = Camera::new().with_resolution(640, 0);
        assert_eq!(
            camera.initialize(),
            Err(RenderError::InvalidResolution { width: 640, height: 0 })
        );

        for fov in [0.0, -10.0, 180.0, f32::NAN] {
            let mut camera = Camera::new().with_fov(fov);
            assert!(matches!(camera.initialize(), Err(RenderError::InvalidFov(_))));
        }
    }

    #[test]
    fn test_camera_ray_direction() {
        let mut camera = Camera::new().with_resolution(100, 100).with_fov(90.0);
        camera.initialize().unwrap();

        // Rays start at the origin with unit directions
        let ray = camera.get_ray(50, 50);
        assert_eq!(ray.origin, Vec3::ZERO);
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
        assert!(ray.direction.z < 0.0);

        // Top-left points up and to the left, bottom-right down and to the right
        let top_left = camera.get_ray(0, 0).direction;
        assert!(top_left.x < 0.0 && top_left.y > 0.0);
        let bottom_right = camera.get_ray(99, 99).direction;
        assert!(bottom_right.x > 0.0 && bottom_right.y < 0.0);
    }

    #[test]
    fn test_camera_edge_ray_matches_fov() {
        // A 1x1 image's single pixel is centered on the axis
        let mut camera = Camera::new().with_resolution(1, 1).with_fov(60.0);
        camera.initialize().unwrap();
        let ray = camera.get_ray(0, 0);
        assert!((ray.direction - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }
}
