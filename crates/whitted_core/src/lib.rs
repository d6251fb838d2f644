//! Whitted Core - scene description for the sphere ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `SphereDesc`, validated on construction
//! - **Built-in scenes**: the reference six-sphere scene and a seeded random scene
//! - **Scene files**: JSON loading and saving
//!
//! # Example
//!
//! ```ignore
//! use whitted_core::{load_scene, Scene};
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} spheres, {} lights", scene.len(), scene.light_count());
//! ```

pub mod loader;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, save_scene, LoadError, LoadResult};
pub use scene::{Scene, SceneError, SphereDesc, MAX_RANDOM_SPHERES, REFERENCE_SEED};
