//! Transformed scene primitives.
//!
//! Each primitive pairs a canonical local-space shape with an instance
//! transform. Rays are pulled into local space through a cached inverse
//! matrix without renormalizing the direction, so the local `t` is the
//! world `t` and no remapping is needed on the way out. Normals go back
//! through the inverse-transpose to survive non-uniform scale.

use std::sync::Arc;

use glint_core::{MaterialId, Mesh};
use glint_math::{Aabb, Interval, Mat4, Mat4Ext, Ray, Vec3};

use crate::intersection::{Intersection, LocalHit};
use crate::{cylinder, mesh, quad, sphere};

/// The canonical local-space shapes a primitive can take.
///
/// A closed set keeps intersection dispatch a plain match; meshes are
/// shared behind an `Arc` so many instances can reuse one load.
#[derive(Clone, Debug)]
pub enum Shape {
    /// Sphere of the given radius at the origin
    Sphere { radius: f32 },
    /// [-1, 1] x [-1, 1] square in the XY plane, normal +Z
    Quad,
    /// Open tube of radius 1 around the Y axis, |y| <= 1
    Cylinder,
    /// Indexed triangle mesh
    Mesh(Arc<Mesh>),
}

impl Shape {
    /// Bounding box of the canonical shape in local space.
    fn local_bounds(&self) -> Aabb {
        match self {
            Shape::Sphere { radius } => Aabb::new(Vec3::splat(-radius), Vec3::splat(*radius)),
            Shape::Quad => Aabb::new(Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 0.0)),
            Shape::Cylinder => Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0)),
            Shape::Mesh(mesh) => mesh.bounds,
        }
    }
}

/// A shape placed in the world with a material.
#[derive(Clone, Debug)]
pub struct Primitive {
    shape: Shape,
    inverse: Mat4,
    normal_matrix: Mat4,
    material: MaterialId,
    bounds: Aabb,
}

impl Primitive {
    /// Create a primitive from a shape, its local-to-world transform,
    /// and a material.
    ///
    /// The inverse and inverse-transpose are cached here; the transform
    /// must be invertible (scene validation rejects zero scales).
    pub fn new(shape: Shape, transform: Mat4, material: MaterialId) -> Self {
        let inverse = transform.inverse();
        let bounds = transform.transform_aabb(&shape.local_bounds());
        Self {
            shape,
            inverse,
            normal_matrix: inverse.transpose(),
            material,
            bounds,
        }
    }

    /// World-space bounding box, rebuilt from the transformed corners
    /// of the local box.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }

    /// Find the nearest hit inside the window, if any.
    pub fn intersect(&self, ray: &Ray, window: Interval) -> Option<Intersection> {
        let local_ray = self.inverse.transform_ray(ray);

        let local: LocalHit = match &self.shape {
            Shape::Sphere { radius } => sphere::intersect(&local_ray, window, *radius)?,
            Shape::Quad => quad::intersect(&local_ray, window)?,
            Shape::Cylinder => cylinder::intersect(&local_ray, window)?,
            Shape::Mesh(mesh) => mesh::intersect(&local_ray, window, mesh)?,
        };

        Some(Intersection {
            t: local.t,
            position: ray.at(local.t),
            normal: self
                .normal_matrix
                .transform_vector3(local.normal)
                .normalize(),
            uv: local.uv,
            material: self.material,
        })
    }
}
