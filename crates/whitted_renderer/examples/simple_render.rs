//! Simple ray tracer example.
//!
//! Renders the reference six-sphere scene and saves it in PPM format.

use whitted_core::Scene;
use whitted_renderer::{render, save_image, Camera, RenderConfig, World};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let scene = Scene::reference();
    let world = World::from_scene(&scene);

    let mut camera = Camera::new().with_resolution(640, 480).with_fov(30.0);
    camera.initialize()?;

    let (image, stats) = render(&camera, &world, &RenderConfig::default());
    println!("Traced {} rays ({} shadow rays)", stats.rays, stats.shadow_rays);

    let filename = "output.ppm";
    save_image(&image, filename)?;
    println!("Saved to {}", filename);
    Ok(())
}
