//! Scene description types.
//!
//! A scene is plain data: a camera pose, a background and an ordered list
//! of spheres with their materials. The renderer turns it into traceable
//! objects; nothing here knows how rays are cast.

use std::fs;
use std::path::{Path, PathBuf};

use lumen_math::{Color, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::RenderSettings;

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("failed to read scene {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scene: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid scene: {0}")]
    Invalid(String),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// How a surface redirects an incoming ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Diffuse,
    Mirror,
    Dielectric,
}

/// Surface appearance: tint, per-bounce attenuation and scattering kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialDescription {
    pub color: Color,
    pub albedo: f64,
    pub kind: MaterialKind,
}

impl MaterialDescription {
    pub fn new(color: Color, albedo: f64, kind: MaterialKind) -> Self {
        Self { color, albedo, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereDescription {
    pub center: Vec3,
    pub radius: f64,
    pub material: MaterialDescription,
}

/// Pinhole camera pose.
///
/// `fov` is in degrees; the image plane sits at `(height / 2) / tan(fov)`
/// pixels from the eye.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraDescription {
    pub eye: Vec3,
    pub look_at: Vec3,
    pub fov: f64,
}

/// What a ray sees when it leaves the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BackgroundDescription {
    /// Flat color in every direction.
    Sky { color: Color },
    /// Equirectangular image, resolved relative to the scene file.
    Panorama { path: PathBuf },
}

impl Default for BackgroundDescription {
    fn default() -> Self {
        BackgroundDescription::Sky {
            color: SceneDescription::SKY_COLOR,
        }
    }
}

/// Everything needed to render an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub camera: CameraDescription,
    #[serde(default)]
    pub background: BackgroundDescription,
    #[serde(default)]
    pub spheres: Vec<SphereDescription>,
    #[serde(default)]
    pub settings: RenderSettings,
}

impl SceneDescription {
    pub const SKY_COLOR: Color = Color::new(150, 200, 255);

    /// Create an empty scene seen from `camera` against the default sky.
    pub fn new(camera: CameraDescription) -> Self {
        Self {
            camera,
            background: BackgroundDescription::default(),
            spheres: Vec::new(),
            settings: RenderSettings::default(),
        }
    }

    /// The built-in scene: two spheres on either side of the camera above
    /// a large terrain sphere, all sharing one pale blue diffuse material.
    pub fn reference() -> Self {
        let material = MaterialDescription::new(Color::new(200, 240, 255), 0.5, MaterialKind::Diffuse);

        Self::new(CameraDescription {
            eye: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            fov: 30.0,
        })
        .with_sphere(Vec3::new(0.0, 0.0, 2.0), 1.0, material)
        .with_sphere(Vec3::new(0.0, 0.0, -3.0), 1.0, material)
        .with_sphere(Vec3::new(2.0, -501.0, 2.0), 500.0, material)
    }

    /// Append a sphere.
    pub fn with_sphere(mut self, center: Vec3, radius: f64, material: MaterialDescription) -> Self {
        self.spheres.push(SphereDescription {
            center,
            radius,
            material,
        });
        self
    }

    pub fn with_background(mut self, background: BackgroundDescription) -> Self {
        self.background = background;
        self
    }

    pub fn with_settings(mut self, settings: RenderSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Parse a scene from a JSON string and validate it.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        let scene: SceneDescription = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Load a scene from a JSON file.
    ///
    /// Relative panorama paths are resolved against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut scene = Self::from_json_str(&json)?;
        if let (BackgroundDescription::Panorama { path: image }, Some(base)) =
            (&mut scene.background, path.parent())
        {
            if image.is_relative() {
                *image = base.join(&*image);
            }
        }

        log::info!(
            "Loaded scene {}: {} sphere(s), {:?} background",
            path.display(),
            scene.spheres.len(),
            scene.background
        );
        Ok(scene)
    }

    /// Write the scene as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> SceneResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check every value a render depends on.
    pub fn validate(&self) -> SceneResult<()> {
        self.settings.validate()?;

        let fov = self.camera.fov;
        if !(fov > 0.0 && fov < 90.0) {
            return Err(SceneError::Invalid(format!(
                "camera fov must be in (0, 90) degrees, got {fov}"
            )));
        }
        if self.camera.look_at.length_squared() == 0.0 {
            return Err(SceneError::Invalid("camera look_at must be non-zero".to_string()));
        }

        for (i, sphere) in self.spheres.iter().enumerate() {
            if !(sphere.radius > 0.0) {
                return Err(SceneError::Invalid(format!(
                    "sphere {i} has non-positive radius {}",
                    sphere.radius
                )));
            }
            let albedo = sphere.material.albedo;
            if !(0.0..=1.0).contains(&albedo) {
                return Err(SceneError::Invalid(format!(
                    "sphere {i} albedo {albedo} is outside [0, 1]"
                )));
            }
        }

        Ok(())
    }
}
