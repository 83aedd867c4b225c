//! Glint Core - scene data for the ray tracer.
//!
//! This crate provides:
//!
//! - **Resources**: `Material`/`MaterialLibrary`, `Texture`, `Mesh`
//! - **Scene description**: serde types for the JSON scene format and
//!   loading via [`SceneDescription::load`]
//! - **OBJ support**: minimal Wavefront OBJ mesh loading
//!
//! # Example
//!
//! ```ignore
//! use glint_core::SceneDescription;
//!
//! let desc = SceneDescription::load("scene.json")?;
//! println!("{} objects, {} lights", desc.objects.len(), desc.lights.len());
//! ```

pub mod light;
pub mod material;
pub mod mesh;
pub mod obj;
pub mod scene;
pub mod texture;

// Re-export commonly used types
pub use light::Light;
pub use material::{Material, MaterialId, MaterialLibrary};
pub use mesh::Mesh;
pub use obj::load_obj;
pub use scene::{SceneDescription, SceneError};
pub use texture::{Texture, TextureError};
