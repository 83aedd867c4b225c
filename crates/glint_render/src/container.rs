//! Primitive containers.
//!
//! A container answers nearest-hit queries over a shared primitive
//! collection. `Naive` scans linearly and doubles as the correctness
//! baseline for the BVH.

use std::sync::Arc;

use glint_math::{Aabb, Interval, Ray};

use crate::bvh::Bvh;
use crate::intersection::Intersection;
use crate::primitive::Primitive;

/// The available container kinds, selected per scene.
pub enum Container {
    Naive(Naive),
    Bvh(Bvh),
}

impl Container {
    /// Find the nearest intersection inside the window, if any.
    pub fn intersect(&self, ray: &Ray, window: Interval) -> Option<Intersection> {
        match self {
            Container::Naive(naive) => naive.intersect(ray, window),
            Container::Bvh(bvh) => bvh.intersect(ray, window),
        }
    }

    /// Bounding box of everything in the container.
    pub fn bounds(&self) -> Aabb {
        match self {
            Container::Naive(naive) => naive.bounds(),
            Container::Bvh(bvh) => bvh.bounds(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Container::Naive(naive) => naive.primitives.len(),
            Container::Bvh(bvh) => bvh.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Linear scan over all primitives.
pub struct Naive {
    primitives: Arc<[Primitive]>,
}

impl Naive {
    pub fn new(primitives: Arc<[Primitive]>) -> Self {
        Self { primitives }
    }

    /// Test every primitive, shrinking the window to the nearest hit
    /// found so far.
    pub fn intersect(&self, ray: &Ray, window: Interval) -> Option<Intersection> {
        let mut nearest: Option<Intersection> = None;
        let mut window = window;

        for primitive in self.primitives.iter() {
            if let Some(hit) = primitive.intersect(ray, window) {
                window = window.shrunk_to(hit.t);
                nearest = Some(hit);
            }
        }

        nearest
    }

    pub fn bounds(&self) -> Aabb {
        self.primitives
            .iter()
            .fold(Aabb::EMPTY, |acc, p| Aabb::union(&acc, &p.bounds()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Shape;
    use glint_core::MaterialId;
    use glint_math::{Mat4, Vec3};

    const WINDOW: Interval = Interval {
        min: 0.001,
        max: f32::INFINITY,
    };

    fn sphere_at(center: Vec3, radius: f32) -> Primitive {
        Primitive::new(
            Shape::Sphere { radius },
            Mat4::from_translation(center),
            MaterialId(0),
        )
    }

    #[test]
    fn test_empty_container_misses() {
        let naive = Naive::new(Vec::new().into());
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(naive.intersect(&ray, WINDOW).is_none());
    }

    #[test]
    fn test_nearest_of_overlapping_spheres_wins() {
        let naive = Naive::new(
            vec![
                sphere_at(Vec3::new(0.0, 0.0, -10.0), 1.0),
                sphere_at(Vec3::new(0.0, 0.0, -5.0), 1.0),
                sphere_at(Vec3::new(0.0, 0.0, -20.0), 1.0),
            ]
            .into(),
        );

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = naive.intersect(&ray, WINDOW).unwrap();

        assert!((hit.t - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_window_max_excludes_far_hits() {
        let naive = Naive::new(vec![sphere_at(Vec3::new(0.0, 0.0, -10.0), 1.0)].into());

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(naive.intersect(&ray, Interval::new(0.001, 5.0)).is_none());
        assert!(naive.intersect(&ray, Interval::new(0.001, 9.5)).is_some());
    }

    #[test]
    fn test_bounds_enclose_all_primitives() {
        let naive = Naive::new(
            vec![
                sphere_at(Vec3::new(-5.0, 0.0, 0.0), 1.0),
                sphere_at(Vec3::new(5.0, 2.0, 0.0), 1.0),
            ]
            .into(),
        );

        let bounds = naive.bounds();
        assert_eq!(bounds.min.x, -6.0);
        assert_eq!(bounds.max.x, 6.0);
        assert_eq!(bounds.max.y, 3.0);
    }
}
