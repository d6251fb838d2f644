//! JSON scene file loading and saving.
//!
//! A scene file is a single object with a `spheres` array:
//!
//! ```json
//! { "spheres": [
//!     { "center": [0, 0, -20], "radius": 4, "surface_color": [1, 0.32, 0.36],
//!       "reflection": 1, "transparency": 0.5 }
//! ] }
//! ```
//!
//! `reflection`, `transparency` and `emission_color` may be omitted.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::scene::{Scene, SceneError, SphereDesc};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scene: {0}")]
    Invalid(#[from] SceneError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

#[derive(Deserialize)]
struct SceneFile {
    spheres: Vec<SphereDesc>,
}

/// Load a scene from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let scene = load_scene_from_str(&contents)?;
    log::info!(
        "Loaded scene {}: {} spheres, {} lights",
        path.display(),
        scene.len(),
        scene.light_count()
    );
    Ok(scene)
}

/// Parse and validate a scene from a JSON string.
pub fn load_scene_from_str(contents: &str) -> LoadResult<Scene> {
    let file: SceneFile = serde_json::from_str(contents)?;
    Ok(Scene::new(file.spheres)?)
}

/// Write a scene as pretty-printed JSON.
pub fn save_scene<P: AsRef<Path>>(scene: &Scene, path: P) -> LoadResult<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(scene)?;
    fs::write(path, json)?;
    log::info!("Saved scene to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_minimal_scene() {
        let _ = env_logger::builder().is_test(true).try_init();

        let json = r#"{
            "spheres": [
                { "center": [0, 0, -20], "radius": 4, "surface_color": [1, 0.32, 0.36],
                  "reflection": 1, "transparency": 0.5 },
                { "center": [0, 20, -30], "radius": 3, "surface_color": [0, 0, 0],
                  "emission_color": [3, 3, 3] }
            ]
        }"#;

        let scene = load_scene_from_str(json).unwrap();
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.light_count(), 1);

        let first = &scene.spheres()[0];
        assert_eq!(first.reflection, 1.0);
        assert_eq!(first.transparency, 0.5);
        assert_eq!(first.emission_color, [0.0; 3]);
    }

    #[test]
    fn test_load_rejects_invalid_scene() {
        let json = r#"{ "spheres": [ { "center": [0, 0, 0], "radius": -1, "surface_color": [1, 1, 1] } ] }"#;
        let err = load_scene_from_str(json).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid(SceneError::InvalidRadius { index: 0, .. })
        ));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let err = load_scene_from_str(r#"{ "spheres": [ { "radius": 1 } ] }"#).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_save_and_reload_reference_scene() {
        let scene = Scene::reference();
        let path = std::env::temp_dir().join(format!("whitted_scene_{}.json", std::process::id()));

        save_scene(&scene, &path).unwrap();
        let reloaded = load_scene(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(reloaded, scene);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_scene("/nonexistent/whitted/scene.json").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
