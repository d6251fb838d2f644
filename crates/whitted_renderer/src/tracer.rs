//! Recursive Whitted-style ray tracing.
//!
//! A hit on a reflective or transparent sphere spawns a reflection ray and,
//! for transparent spheres, a refraction ray; the two results are blended
//! with a Fresnel mix. Every other hit is shaded diffusely with binary
//! shadow rays toward each light. Recursion stops at `max_depth`, after
//! which specular spheres fall back to diffuse shading.

use whitted_math::{mix, Color, Ray, Vec3};

use crate::{RenderConfig, RenderStats, Sphere, World};

/// Compute the color seen along a ray.
///
/// `ray.direction` must be unit length. `depth` is the recursion level of
/// this ray (0 for primary rays).
pub fn trace(
    ray: &Ray,
    world: &World,
    depth: u32,
    config: &RenderConfig,
    stats: &mut RenderStats,
) -> Color {
    stats.rays += 1;
    stats.max_depth = stats.max_depth.max(depth);

    let Some(hit) = world.nearest_hit(ray) else {
        return config.background;
    };
    let sphere = &world.spheres()[hit.index];

    let p = ray.at(hit.t);
    let mut n = sphere.normal_at(p);

    // Ray started inside the sphere: flip the normal to face the ray
    let inside = ray.direction.dot(n) > 0.0;
    if inside {
        n = -n;
    }

    let max_depth = config.max_depth.min(RenderConfig::MAX_DEPTH_LIMIT);
    let surface_color = if sphere.is_specular() && depth < max_depth {
        shade_specular(ray, world, sphere, p, n, inside, depth, config, stats)
    } else {
        shade_diffuse(world, hit.index, sphere, p, n, config, stats)
    };

    surface_color + sphere.emission_color
}

/// Trace a single ray with default settings, discarding statistics.
pub fn trace_ray(ray: &Ray, world: &World) -> Color {
    trace(ray, world, 0, &RenderConfig::default(), &mut RenderStats::default())
}

#[allow(clippy::too_many_arguments)]
fn shade_specular(
    ray: &Ray,
    world: &World,
    sphere: &Sphere,
    p: Vec3,
    n: Vec3,
    inside: bool,
    depth: u32,
    config: &RenderConfig,
    stats: &mut RenderStats,
) -> Color {
    let facing_ratio = -ray.direction.dot(n);
    let mut fresnel = fresnel_mix(facing_ratio);

    let reflect_dir = reflect(ray.direction, n).normalize_or_zero();
    let reflection = trace(
        &Ray::new(p + n * config.bias, reflect_dir),
        world,
        depth + 1,
        config,
        stats,
    );

    let mut refraction = Color::ZERO;
    if sphere.transparency > 0.0 {
        let eta = if inside { config.ior } else { 1.0 / config.ior };
        match refract(ray.direction, n, eta) {
            Some(refract_dir) => {
                refraction = trace(
                    &Ray::new(p - n * config.bias, refract_dir.normalize_or_zero()),
                    world,
                    depth + 1,
                    config,
                    stats,
                );
            }
            None => {
                // Total internal reflection: everything is reflected
                stats.tir_events += 1;
                fresnel = 1.0;
            }
        }
    }

    (reflection * fresnel + refraction * (1.0 - fresnel) * sphere.transparency)
        * sphere.surface_color
}

fn shade_diffuse(
    world: &World,
    hit_index: usize,
    sphere: &Sphere,
    p: Vec3,
    n: Vec3,
    config: &RenderConfig,
    stats: &mut RenderStats,
) -> Color {
    let mut surface_color = Color::ZERO;
    let shadow_origin = p + n * config.bias;

    for (light_index, light) in world.lights() {
        if light_index == hit_index {
            continue;
        }

        let light_dir = (light.center - p).normalize_or_zero();
        stats.shadow_rays += 1;
        let transmission = if world.occluded(&Ray::new(shadow_origin, light_dir), light_index) {
            0.0
        } else {
            1.0
        };

        surface_color += sphere.surface_color
            * transmission
            * n.dot(light_dir).max(0.0)
            * light.emission_color;
    }

    surface_color
}

/// Blend weight of the reflected contribution for a given facing ratio.
///
/// Not the physical Schlick formula: `(1 - cos)^3` mixed toward 1 by 0.1.
#[inline]
pub(crate) fn fresnel_mix(facing_ratio: f32) -> f32 {
    mix((1.0 - facing_ratio).powi(3), 1.0, 0.1)
}

/// Reflect a direction about a normal.
#[inline]
pub(crate) fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    d - n * 2.0 * d.dot(n)
}

/// Refract a unit direction through a surface with relative index `eta`.
///
/// Returns `None` on total internal reflection.
#[inline]
pub(crate) fn refract(d: Vec3, n: Vec3, eta: f32) -> Option<Vec3> {
    let cosi = -n.dot(d);
    let k = 1.0 - eta * eta * (1.0 - cosi * cosi);
    if k < 0.0 {
        return None;
    }
    Some(d * eta + n * (eta * cosi - k.sqrt()))
}
