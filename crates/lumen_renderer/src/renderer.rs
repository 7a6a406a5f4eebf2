//! Core path tracing renderer.
//!
//! Implements:
//! - Recursive ray casting with a hard depth limit
//! - Anti-aliasing via jittered multi-sampling
//! - Optional gamma correction
//! - Normal visualisation as an alternative shading mode

use std::time::Instant;

use lumen_core::{
    ImageBuffer, ImageError, ImageSink, RenderSettings, SceneError, Shading, DEFAULT_GAMMA,
};
use lumen_math::{Color, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use thiserror::Error;

use crate::{CameraError, Material, World};

/// Errors that abort a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Image(#[from] ImageError),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Compute the color seen by a ray.
///
/// Rays that have already bounced `max_depth` times return black. A miss
/// returns the environment. A hit asks the material for the scattered ray,
/// traces it one level deeper and attenuates the result.
///
/// The bounce chain is walked in a loop and the materials it touched are
/// applied afterwards, innermost first, so deep paths use heap memory
/// rather than stack frames.
pub fn cast_ray(
    ray: &Ray,
    world: &World,
    settings: &RenderSettings,
    rng: &mut dyn RngCore,
) -> Color {
    let mut ray = *ray;
    let mut path: Vec<&Material> = Vec::new();

    let end = loop {
        if ray.depth >= settings.max_depth {
            break Color::BLACK;
        }

        let Some(rec) = world.scene.intersect(&ray) else {
            break world.environment.sample(ray.direction());
        };

        match settings.shading {
            Shading::Normals => break Color::from_direction(rec.normal),
            Shading::Path => {
                let material = world.scene.material(&rec);
                ray = material.scatter(&ray, &rec, rng).with_depth(ray.depth + 1);
                path.push(material);
            }
        }
    };

    path.iter()
        .rev()
        .fold(end, |color, material| material.attenuate(color))
}

/// Render a single pixel with multi-sampling.
///
/// Samples are summed per channel and divided by the sample count with
/// truncating integer division before gamma correction.
pub fn render_pixel(
    world: &World,
    x: u32,
    y: u32,
    settings: &RenderSettings,
    rng: &mut dyn RngCore,
) -> Color {
    let samples = settings.samples_per_pixel.max(1);
    let mut sum = [0u64; 3];

    for _ in 0..samples {
        let ray = world.camera.get_ray(x, y, rng);
        let color = cast_ray(&ray, world, settings, rng);
        sum[0] += color.r as u64;
        sum[1] += color.g as u64;
        sum[2] += color.b as u64;
    }

    let n = samples as u64;
    let average = Color::from_clamped(
        (sum[0] / n) as i64,
        (sum[1] / n) as i64,
        (sum[2] / n) as i64,
    );

    if settings.gamma {
        average.gamma_corrected(DEFAULT_GAMMA)
    } else {
        average
    }
}

/// Render the whole image into `sink`, row by row, left to right.
pub fn render(
    world: &World,
    settings: &RenderSettings,
    sink: &mut dyn ImageSink,
    rng: &mut dyn RngCore,
) -> RenderResult<()> {
    let width = world.camera.image_width();
    let height = world.camera.image_height();

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}, {:?} shading",
        width,
        height,
        settings.samples_per_pixel,
        settings.max_depth,
        settings.shading
    );
    let start = Instant::now();

    sink.begin(width, height)?;
    for y in 0..height {
        for x in 0..width {
            let color = render_pixel(world, x, y, settings, rng);
            sink.write_pixel(color)?;
        }
        log::debug!("Row {}/{} done", y + 1, height);
    }
    sink.finish()?;

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(())
}

/// Random stream for a render: fixed when a seed is given, from entropy
/// otherwise.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Render to an in-memory image using the stream from `settings.seed`.
pub fn render_image(world: &World, settings: &RenderSettings) -> RenderResult<ImageBuffer> {
    let mut rng = seeded_rng(settings.seed);

    let mut image = ImageBuffer::default();
    render(world, settings, &mut image, &mut rng)?;
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Camera, Environment, Scene, Sphere};
    use lumen_core::MaterialKind;
    use lumen_math::Vec3;

    const SKY: Color = Color::new(150, 200, 255);

    fn single_sphere_world(kind: MaterialKind, size: u32) -> World {
        let mut scene = Scene::new();
        scene.add(Sphere::new(
            Vec3::new(0.0, 0.0, -3.0),
            1.0,
            Material::new(Color::new(200, 240, 255), 0.5, kind),
        ));
        let camera = Camera::new(Vec3::ZERO, Vec3::NEG_Z, 30.0, size, size).unwrap();
        World::new(scene, camera, Environment::Sky(SKY))
    }

    #[test]
    fn test_depth_limit_returns_black() {
        let world = single_sphere_world(MaterialKind::Diffuse, 9);
        let settings = RenderSettings::default().with_quality(1, 4);
        let mut rng = StdRng::seed_from_u64(3);

        // Pointing at the sphere and pointing at the sky
        for direction in [Vec3::NEG_Z, Vec3::Y] {
            let ray = Ray::new(Vec3::ZERO, direction).with_depth(4);
            assert_eq!(cast_ray(&ray, &world, &settings, &mut rng), Color::BLACK);
        }
    }

    #[test]
    fn test_miss_returns_environment() {
        let world = single_sphere_world(MaterialKind::Diffuse, 9);
        let settings = RenderSettings::default();
        let mut rng = StdRng::seed_from_u64(3);

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert_eq!(cast_ray(&ray, &world, &settings, &mut rng), SKY);
    }

    #[test]
    fn test_one_bounce_attenuates_sky() {
        let world = single_sphere_world(MaterialKind::Diffuse, 9);
        let settings = RenderSettings::default().with_quality(1, 2);
        let mut rng = StdRng::seed_from_u64(3);

        // Front of the sphere scatters back toward +Z and escapes
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(
            cast_ray(&ray, &world, &settings, &mut rng),
            Color::new(58, 94, 127)
        );
    }

    #[test]
    fn test_mirror_reflects_sky_back() {
        let world = single_sphere_world(MaterialKind::Mirror, 9);
        let settings = RenderSettings::default().with_quality(1, 4);
        let mut rng = StdRng::seed_from_u64(3);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(
            cast_ray(&ray, &world, &settings, &mut rng),
            Color::new(58, 94, 127)
        );
    }

    #[test]
    fn test_dielectric_passes_through_to_sky() {
        let world = single_sphere_world(MaterialKind::Dielectric, 9);
        let settings = RenderSettings::default().with_quality(1, 4);
        let mut rng = StdRng::seed_from_u64(3);

        // Enters, exits, escapes: two attenuations
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let once = Color::new(58, 94, 127);
        let twice = once * 0.5 * Color::new(200, 240, 255);
        assert_eq!(cast_ray(&ray, &world, &settings, &mut rng), twice);
    }

    #[test]
    fn test_deep_mirror_trap_terminates() {
        // Camera inside a mirror ball: every bounce hits the wall again
        let mut scene = Scene::new();
        scene.add(Sphere::new(
            Vec3::ZERO,
            5.0,
            Material::new(Color::WHITE, 1.0, MaterialKind::Mirror),
        ));
        let camera = Camera::new(Vec3::ZERO, Vec3::NEG_Z, 30.0, 4, 4).unwrap();
        let world = World::new(scene, camera, Environment::Sky(SKY));
        let settings = RenderSettings::default().with_quality(1, 1_000_000);
        let mut rng = StdRng::seed_from_u64(3);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.3, 0.2, -1.0));
        assert_eq!(cast_ray(&ray, &world, &settings, &mut rng), Color::BLACK);
    }

    #[test]
    fn test_normal_shading() {
        let world = single_sphere_world(MaterialKind::Diffuse, 9);
        let mut settings = RenderSettings::default();
        settings.shading = Shading::Normals;
        let mut rng = StdRng::seed_from_u64(3);

        let hit = cast_ray(&Ray::new(Vec3::ZERO, Vec3::NEG_Z), &world, &settings, &mut rng);
        assert_eq!(hit, Color::from_direction(Vec3::Z));

        let miss = cast_ray(&Ray::new(Vec3::ZERO, Vec3::Z), &world, &settings, &mut rng);
        assert_eq!(miss, SKY);
    }

    #[test]
    fn test_render_pixel_sky_is_exact() {
        let world = World::new(
            Scene::new(),
            Camera::new(Vec3::ZERO, Vec3::NEG_Z, 30.0, 4, 4).unwrap(),
            Environment::Sky(SKY),
        );
        let settings = RenderSettings::default().with_quality(7, 4);
        let mut rng = StdRng::seed_from_u64(11);

        assert_eq!(render_pixel(&world, 1, 2, &settings, &mut rng), SKY);
    }

    #[test]
    fn test_render_pixel_gamma() {
        let world = World::new(
            Scene::new(),
            Camera::new(Vec3::ZERO, Vec3::NEG_Z, 30.0, 4, 4).unwrap(),
            Environment::Sky(Color::new(128, 0, 255)),
        );
        let mut settings = RenderSettings::default().with_quality(3, 4);
        settings.gamma = true;
        let mut rng = StdRng::seed_from_u64(11);

        assert_eq!(
            render_pixel(&world, 0, 0, &settings, &mut rng),
            Color::new(186, 0, 255)
        );
    }

    #[test]
    fn test_render_image_is_deterministic_with_seed() {
        let world = single_sphere_world(MaterialKind::Diffuse, 8);
        let settings = RenderSettings::default()
            .with_resolution(8, 8)
            .with_quality(2, 3)
            .with_seed(99);

        let a = render_image(&world, &settings).unwrap();
        let b = render_image(&world, &settings).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.pixels.len(), 64);
    }
}
