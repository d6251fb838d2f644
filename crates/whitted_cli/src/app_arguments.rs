use std::path::PathBuf;
use structopt::StructOpt;

/// Render a sphere scene with recursive ray tracing
#[derive(StructOpt, Debug)]
#[structopt(name = "whitted")]
pub struct AppArguments {
    /// JSON scene file (defaults to the built-in reference scene)
    #[structopt(long, parse(from_os_str))]
    pub scene: Option<PathBuf>,

    /// Generate a random scene from this seed instead
    #[structopt(long)]
    pub random_seed: Option<u64>,

    /// Number of spheres in a random scene (at most 1024)
    #[structopt(long, default_value = "8")]
    pub random_count: usize,

    /// Image width in pixels
    #[structopt(long, default_value = "640")]
    pub width: u32,

    /// Image height in pixels
    #[structopt(long, default_value = "480")]
    pub height: u32,

    /// Field of view in degrees
    #[structopt(long, default_value = "30")]
    pub fov: f32,

    /// Maximum reflection/refraction depth (at most 16)
    #[structopt(long, default_value = "5")]
    pub max_depth: u32,

    /// Output image (.ppm or .png)
    #[structopt(short, long, parse(from_os_str), default_value = "out.ppm")]
    pub output: PathBuf,

    /// Also write the scene used for the render as JSON
    #[structopt(long, parse(from_os_str))]
    pub dump_scene: Option<PathBuf>,

    /// Verbose logging
    #[structopt(short, long)]
    pub verbose: bool,
}
