//! Whitted Renderer - recursive CPU ray tracing for sphere scenes.
//!
//! Classic Whitted-style transport: every primary ray is traced against
//! every sphere, diffuse surfaces gather direct light with hard shadows,
//! and reflective or transparent surfaces recurse into reflected and
//! refracted rays blended by a Fresnel mix.

mod camera;
mod output;
mod renderer;
mod sphere;
mod tracer;
mod world;

pub use camera::Camera;
pub use output::{color_to_rgb, save_image, write_ppm, OutputError};
pub use renderer::{
    render, render_pixel, render_scene, render_scene_with, ImageBuffer, RenderConfig, RenderError,
    RenderStats,
};
pub use sphere::Sphere;
pub use tracer::{trace, trace_ray};
pub use world::{Hit, World};

/// Re-export math types from whitted_math
pub use whitted_math::{Color, Interval, Ray, Vec3};
