//! The assembled scene a render reads from.

use glint_core::{Light, Material, MaterialId, MaterialLibrary};
use glint_math::{Interval, Ray, Vec3};

use crate::container::Container;
use crate::intersection::Intersection;

/// Everything the integrator needs, fixed for the duration of a render.
pub struct Scene {
    pub container: Container,
    pub lights: Vec<Light>,
    pub materials: MaterialLibrary,

    /// Ambient light applied uniformly to every surface
    pub ambient: Vec3,

    /// Color returned by rays that leave the scene
    pub background: Vec3,

    /// Hard cap on recursion for reflection and refraction
    pub max_ray_depth: u32,

    /// Shadow rays cast per light per shading point
    pub shadow_rays: u32,
}

impl Scene {
    /// Find the nearest intersection inside the window, if any.
    pub fn intersect(&self, ray: &Ray, window: Interval) -> Option<Intersection> {
        self.container.intersect(ray, window)
    }

    /// Test whether anything blocks the ray inside the window.
    pub fn is_occluded(&self, ray: &Ray, window: Interval) -> bool {
        self.container.intersect(ray, window).is_some()
    }

    pub fn material(&self, id: MaterialId) -> &Material {
        self.materials.get(id)
    }
}
