//! Phong-style materials and the read-only material table.

use std::sync::Arc;

use glint_math::Vec3;

use crate::texture::Texture;

/// Surface material for Whitted-style shading.
///
/// Coefficients weight the classic local terms (ambient, Lambert
/// diffuse, Blinn specular) plus the two recursive contributions
/// (mirror reflection, Snell refraction).
#[derive(Clone, Debug)]
pub struct Material {
    /// Material name (scene description key)
    pub name: String,

    /// Ambient coefficient
    pub k_ambient: f32,

    /// Diffuse coefficient
    pub k_diffuse: f32,

    /// Specular coefficient
    pub k_specular: f32,

    /// Reflection coefficient (0 = matte, 1 = perfect mirror)
    pub k_reflection: f32,

    /// Refraction coefficient (0 = opaque)
    pub k_refraction: f32,

    /// Blinn specular exponent
    pub shininess: f32,

    /// Index of refraction (1.0 = air, 1.5 = glass)
    pub refractive_index: f32,

    /// Base color when no texture is bound (RGB, 0-1)
    pub albedo: Vec3,

    /// Optional albedo texture, sampled at the hit UV
    pub texture: Option<Arc<Texture>>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            k_ambient: 1.0,
            k_diffuse: 1.0,
            k_specular: 0.0,
            k_reflection: 0.0,
            k_refraction: 0.0,
            shininess: 32.0,
            refractive_index: 1.0,
            albedo: Vec3::new(0.5, 0.5, 0.5), // Grey default
            texture: None,
        }
    }
}

impl Material {
    /// Create a new material with just a name and albedo color.
    pub fn new(name: impl Into<String>, albedo: Vec3) -> Self {
        Self {
            name: name.into(),
            albedo,
            ..Default::default()
        }
    }

    /// Set the albedo texture.
    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Base color at the given surface coordinates: texture sample if a
    /// texture is bound, flat albedo otherwise.
    pub fn base_color(&self, u: f32, v: f32) -> Vec3 {
        match &self.texture {
            Some(texture) => texture.sample(u, v),
            None => self.albedo,
        }
    }
}

/// Index of a material inside a [`MaterialLibrary`].
///
/// Stored in every intersection record; resolving it is a plain slice
/// lookup on an explicitly passed library, never a global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

/// Read-only table of materials, built once during scene setup.
#[derive(Default)]
pub struct MaterialLibrary {
    materials: Vec<Material>,
}

impl MaterialLibrary {
    /// Create a new empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material and return its id.
    pub fn add(&mut self, material: Material) -> MaterialId {
        let id = MaterialId(self.materials.len());
        self.materials.push(material);
        id
    }

    /// Get a material by id.
    ///
    /// Ids are only ever minted by `add`, so the lookup cannot fail for
    /// ids from the same library.
    pub fn get(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    /// Look up a material id by name.
    pub fn id_of(&self, name: &str) -> Option<MaterialId> {
        self.materials
            .iter()
            .position(|m| m.name == name)
            .map(MaterialId)
    }

    /// Number of materials in the library.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Check if the library is empty.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
