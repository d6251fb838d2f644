mod app_arguments;

use anyhow::{bail, Context, Result};
use structopt::StructOpt;
use whitted_core::{load_scene, save_scene, Scene, MAX_RANDOM_SPHERES};
use whitted_renderer::{render, save_image, Camera, RenderConfig, World};

use crate::app_arguments::AppArguments;

fn main() -> Result<()> {
    let args = AppArguments::from_args();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let scene = select_scene(&args)?;
    let config = build_config(&args)?;

    if let Some(path) = &args.dump_scene {
        save_scene(&scene, path)
            .with_context(|| format!("Failed to write scene to {}", path.display()))?;
    }

    let mut camera = Camera::new()
        .with_resolution(args.width, args.height)
        .with_fov(args.fov);
    camera.initialize()?;

    let world = World::from_scene(&scene);
    let (image, _stats) = render(&camera, &world, &config);

    save_image(&image, &args.output)
        .with_context(|| format!("Failed to save image to {}", args.output.display()))?;

    Ok(())
}

fn select_scene(args: &AppArguments) -> Result<Scene> {
    if args.scene.is_some() && args.random_seed.is_some() {
        bail!("--scene and --random-seed cannot be used together");
    }

    if let Some(path) = &args.scene {
        return load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()));
    }

    if let Some(seed) = args.random_seed {
        if args.random_count > MAX_RANDOM_SPHERES {
            bail!(
                "--random-count {} exceeds the limit of {}",
                args.random_count,
                MAX_RANDOM_SPHERES
            );
        }
        return Ok(Scene::random(seed, args.random_count));
    }

    log::info!("Using the reference scene");
    Ok(Scene::reference())
}

fn build_config(args: &AppArguments) -> Result<RenderConfig> {
    let config = RenderConfig {
        max_depth: args.max_depth,
        ..Default::default()
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> AppArguments {
        AppArguments::from_iter(std::iter::once("whitted").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults_match_reference_render() {
        let args = parse(&[]);
        assert_eq!((args.width, args.height, args.fov), (640, 480, 30.0));
        assert_eq!(args.max_depth, 5);
        assert_eq!(select_scene(&args).unwrap(), Scene::reference());
    }

    #[test]
    fn test_random_scene_selection() {
        let args = parse(&["--random-seed", "13", "--random-count", "4"]);
        assert_eq!(select_scene(&args).unwrap(), Scene::random(13, 4));
    }

    #[test]
    fn test_scene_and_seed_conflict() {
        let args = parse(&["--scene", "scene.json", "--random-seed", "13"]);
        assert!(select_scene(&args).is_err());
    }

    #[test]
    fn test_random_count_limit() {
        let args = parse(&["--random-seed", "13", "--random-count", "1025"]);
        assert!(select_scene(&args).is_err());

        let args = parse(&["--random-seed", "13", "--random-count", "1024"]);
        assert_eq!(select_scene(&args).unwrap().len(), MAX_RANDOM_SPHERES + 2);
    }

    #[test]
    fn test_max_depth_limit() {
        assert_eq!(build_config(&parse(&[])).unwrap().max_depth, 5);
        assert_eq!(build_config(&parse(&["--max-depth", "16"])).unwrap().max_depth, 16);
        assert!(build_config(&parse(&["--max-depth", "64"])).is_err());
    }
}
