//! Everything a render pass reads: objects, camera and environment.

use lumen_core::{RenderSettings, SceneDescription};

use crate::{Camera, Environment, Material, RenderResult, Scene, Sphere};

/// Immutable render inputs, built once before the first ray is cast.
#[derive(Debug, Clone)]
pub struct World {
    pub scene: Scene,
    pub camera: Camera,
    pub environment: Environment,
}

impl World {
    pub fn new(scene: Scene, camera: Camera, environment: Environment) -> Self {
        Self {
            scene,
            camera,
            environment,
        }
    }

    /// Build a world from a scene description at the resolution in
    /// `settings`. Loads the panorama, if any.
    pub fn from_description(desc: &SceneDescription, settings: &RenderSettings) -> RenderResult<Self> {
        desc.validate()?;
        settings.validate()?;

        let scene: Scene = desc
            .spheres
            .iter()
            .map(|s| Sphere::new(s.center, s.radius, Material::from(&s.material)))
            .collect();
        let camera = Camera::from_description(&desc.camera, settings.width, settings.height)?;
        let environment = Environment::from_description(&desc.background)?;

        log::info!(
            "Built world: {} object(s), eye {:?}, fov {} deg",
            scene.len(),
            camera.eye(),
            desc.camera.fov
        );

        Ok(Self::new(scene, camera, environment))
    }
}
