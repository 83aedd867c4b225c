//! Turning a scene description into render-ready objects.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use glint_core::scene::{ContainerKind, SceneDescription, ShapeDescription};
use glint_core::{load_obj, Light, Material, MaterialLibrary, Mesh, Texture};
use glint_math::Vec3;
use glint_render::{Bvh, Camera, Container, Naive, Primitive, Scene, Shape};

/// Build the camera from the description. The returned camera is
/// already initialized.
pub fn build_camera(description: &SceneDescription) -> Camera {
    let cam = &description.camera;
    let settings = &description.settings;

    let mut camera = Camera::new()
        .with_resolution(settings.resolution[0], settings.resolution[1])
        .with_position(
            Vec3::from(cam.position),
            Vec3::from(cam.center),
            Vec3::from(cam.up),
        )
        .with_lens(cam.fovy_degrees, cam.z_near, cam.z_far)
        .with_jitter(settings.jitter_radius);
    camera.initialize();
    camera
}

/// Build the scene from the description.
///
/// Texture and OBJ paths are resolved relative to `base_dir` (the
/// scene file's directory). `force_naive` overrides the container
/// choice, which is how the BVH is compared against the linear scan.
pub fn build_scene(
    description: &SceneDescription,
    base_dir: &Path,
    force_naive: bool,
) -> Result<Scene> {
    let settings = &description.settings;

    let mut materials = MaterialLibrary::new();
    for desc in &description.materials {
        let mut material = Material::new(&desc.name, Vec3::from(desc.albedo));
        material.k_ambient = desc.k_ambient;
        material.k_diffuse = desc.k_diffuse;
        material.k_specular = desc.k_specular;
        material.k_reflection = desc.k_reflection;
        material.k_refraction = desc.k_refraction;
        material.shininess = desc.shininess;
        material.refractive_index = desc.refractive_index;

        if let Some(texture_path) = &desc.texture {
            let resolved = base_dir.join(texture_path);
            let texture = Texture::load(&resolved)
                .with_context(|| format!("loading texture {}", resolved.display()))?;
            material = material.with_texture(Arc::new(texture));
        }

        materials.add(material);
    }

    // Meshes referenced by several objects are loaded once and shared
    let mut mesh_cache: HashMap<PathBuf, Arc<Mesh>> = HashMap::new();

    let mut primitives = Vec::with_capacity(description.objects.len());
    for object in &description.objects {
        // Validation guarantees the material exists
        let material = materials
            .id_of(&object.material)
            .with_context(|| format!("unknown material {}", object.material))?;

        let shape = match &object.shape {
            ShapeDescription::Sphere { radius } => Shape::Sphere { radius: *radius },
            ShapeDescription::Quad => Shape::Quad,
            ShapeDescription::Cylinder => Shape::Cylinder,
            ShapeDescription::Mesh { obj } => {
                let resolved = base_dir.join(obj);
                let mesh = match mesh_cache.get(&resolved) {
                    Some(mesh) => mesh.clone(),
                    None => {
                        let mesh = Arc::new(load_obj(&resolved).with_context(|| {
                            format!("loading mesh {}", resolved.display())
                        })?);
                        mesh_cache.insert(resolved, mesh.clone());
                        mesh
                    }
                };
                Shape::Mesh(mesh)
            }
        };

        primitives.push(Primitive::new(
            shape,
            object.transform.to_matrix(),
            material,
        ));
    }

    let primitives: Arc<[Primitive]> = primitives.into();
    let container = if force_naive || settings.container == ContainerKind::Naive {
        Container::Naive(Naive::new(primitives))
    } else {
        Container::Bvh(Bvh::new(primitives))
    };

    let lights = description
        .lights
        .iter()
        .map(|l| Light::new(Vec3::from(l.position), Vec3::from(l.emission), l.radius))
        .collect();

    Ok(Scene {
        container,
        lights,
        materials,
        ambient: Vec3::from(settings.ambient_light),
        background: Vec3::from(settings.background),
        max_ray_depth: settings.max_ray_depth,
        shadow_rays: settings.shadow_rays,
    })
}
