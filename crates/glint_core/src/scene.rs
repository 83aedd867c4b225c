//! JSON scene description.
//!
//! Serde types mirroring everything the renderer needs from a scene
//! file: camera, render settings, lights, materials, and transformed
//! objects. Loading only parses and validates; turning descriptions
//! into render-side primitives is the driver's job.

use std::path::{Path, PathBuf};

use glint_math::{Mat4, Quat, Vec3};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse scene file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Object {object} references unknown material \"{material}\"")]
    UnknownMaterial { object: usize, material: String },

    #[error("Object {object}: {reason}")]
    InvalidObject { object: usize, reason: String },

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

/// Top-level scene file contents.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDescription {
    pub camera: CameraDescription,
    #[serde(default)]
    pub settings: SettingsDescription,
    #[serde(default)]
    pub lights: Vec<LightDescription>,
    pub materials: Vec<MaterialDescription>,
    pub objects: Vec<ObjectDescription>,
}

impl SceneDescription {
    /// Load and validate a scene description from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Parse and validate a scene description from a JSON string.
    pub fn from_json(text: &str) -> Result<Self, SceneError> {
        let description: SceneDescription = serde_json::from_str(text)?;
        description.validate()?;
        Ok(description)
    }

    fn validate(&self) -> Result<(), SceneError> {
        let s = &self.settings;
        if s.resolution[0] == 0 || s.resolution[1] == 0 {
            return Err(SceneError::InvalidSettings(
                "resolution must be non-zero".to_string(),
            ));
        }
        if s.samples_per_pixel == 0 {
            return Err(SceneError::InvalidSettings(
                "samples_per_pixel must be at least 1".to_string(),
            ));
        }
        if self.camera.z_near <= 0.0 || self.camera.z_far <= self.camera.z_near {
            return Err(SceneError::InvalidSettings(
                "camera planes must satisfy 0 < z_near < z_far".to_string(),
            ));
        }

        for (index, object) in self.objects.iter().enumerate() {
            if !self.materials.iter().any(|m| m.name == object.material) {
                return Err(SceneError::UnknownMaterial {
                    object: index,
                    material: object.material.clone(),
                });
            }
            if let ShapeDescription::Sphere { radius } = object.shape {
                if radius <= 0.0 {
                    return Err(SceneError::InvalidObject {
                        object: index,
                        reason: format!("sphere radius must be positive, got {}", radius),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Camera parameters; basis derivation happens in the renderer.
#[derive(Debug, Clone, Deserialize)]
pub struct CameraDescription {
    pub position: [f32; 3],
    pub center: [f32; 3],
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    #[serde(default = "default_fovy")]
    pub fovy_degrees: f32,
    #[serde(default = "default_z_near")]
    pub z_near: f32,
    #[serde(default = "default_z_far")]
    pub z_far: f32,
}

/// Render quality and output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SettingsDescription {
    pub resolution: [u32; 2],
    pub samples_per_pixel: u32,
    pub jitter_radius: f32,
    pub max_ray_depth: u32,
    pub shadow_rays: u32,
    pub ambient_light: [f32; 3],
    pub background: [f32; 3],
    pub container: ContainerKind,
    pub seed: u64,
}

impl Default for SettingsDescription {
    fn default() -> Self {
        Self {
            resolution: [640, 480],
            samples_per_pixel: 4,
            jitter_radius: 0.5,
            max_ray_depth: 4,
            shadow_rays: 16,
            ambient_light: [0.1, 0.1, 0.1],
            background: [0.0, 0.0, 0.0],
            container: ContainerKind::Bvh,
            seed: 0,
        }
    }
}

/// Which acceleration structure to query during rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    Naive,
    Bvh,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LightDescription {
    pub position: [f32; 3],
    pub emission: [f32; 3],
    #[serde(default)]
    pub radius: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaterialDescription {
    pub name: String,
    #[serde(default = "default_albedo")]
    pub albedo: [f32; 3],
    #[serde(default = "one")]
    pub k_ambient: f32,
    #[serde(default = "one")]
    pub k_diffuse: f32,
    #[serde(default)]
    pub k_specular: f32,
    #[serde(default)]
    pub k_reflection: f32,
    #[serde(default)]
    pub k_refraction: f32,
    #[serde(default = "default_shininess")]
    pub shininess: f32,
    #[serde(default = "one")]
    pub refractive_index: f32,
    #[serde(default)]
    pub texture: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectDescription {
    pub material: String,
    #[serde(flatten)]
    pub shape: ShapeDescription,
    #[serde(default)]
    pub transform: TransformDescription,
}

/// One of the supported primitive shapes, in local space.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ShapeDescription {
    /// Sphere of the given radius at the local origin
    Sphere { radius: f32 },
    /// Unit square in the local XY plane, normal +Z
    Quad,
    /// Unit-radius cylinder around the local Y axis, |y| <= 1
    Cylinder,
    /// Triangle mesh loaded from an OBJ file
    Mesh { obj: PathBuf },
}

/// Local-to-world placement, composed as scale, then rotate, then translate.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TransformDescription {
    pub translation: [f32; 3],
    /// Euler angles in degrees, applied in XYZ order
    pub rotation_degrees: [f32; 3],
    pub scale: [f32; 3],
}

impl Default for TransformDescription {
    fn default() -> Self {
        Self {
            translation: [0.0; 3],
            rotation_degrees: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

impl TransformDescription {
    /// Compose the local-to-world matrix.
    pub fn to_matrix(&self) -> Mat4 {
        let [rx, ry, rz] = self.rotation_degrees;
        let rotation = Quat::from_euler(
            glint_math::EulerRot::XYZ,
            rx.to_radians(),
            ry.to_radians(),
            rz.to_radians(),
        );
        Mat4::from_scale_rotation_translation(
            Vec3::from(self.scale),
            rotation,
            Vec3::from(self.translation),
        )
    }
}

fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

fn default_fovy() -> f32 {
    60.0
}

fn default_z_near() -> f32 {
    0.1
}

fn default_z_far() -> f32 {
    100.0
}

fn default_albedo() -> [f32; 3] {
    [0.5, 0.5, 0.5]
}

fn one() -> f32 {
    1.0
}

fn default_shininess() -> f32 {
    32.0
}
