//! Ray-mesh intersection in local space.
//!
//! Walks every triangle with Moller-Trumbore, shrinking the search
//! window as hits are found so the nearest one wins.

use glint_core::Mesh;
use glint_math::{Interval, Ray, Vec2, Vec3};

use crate::intersection::LocalHit;

pub(crate) fn intersect(ray: &Ray, window: Interval, mesh: &Mesh) -> Option<LocalHit> {
    let mut nearest: Option<LocalHit> = None;
    let mut window = window;

    for i in 0..mesh.triangle_count() {
        let [v0, v1, v2] = mesh.triangle(i);
        if let Some(hit) = intersect_triangle(ray, window, v0, v1, v2) {
            window = window.shrunk_to(hit.t);
            nearest = Some(hit);
        }
    }

    nearest
}

/// Moller-Trumbore, without backface culling.
///
/// The geometric normal follows the winding order (right-hand rule),
/// so a hit on the back face reports the front-facing normal; the
/// shader flips it against the ray when needed.
fn intersect_triangle(
    ray: &Ray,
    window: Interval,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<LocalHit> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let pvec = ray.direction.cross(edge2);
    let det = edge1.dot(pvec);
    if det.abs() < 1e-8 {
        // Ray lies in the triangle's plane
        return None;
    }
    let inv_det = 1.0 / det;

    let tvec = ray.origin - v0;
    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = ray.direction.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(qvec) * inv_det;
    if !window.surrounds(t) {
        return None;
    }

    Some(LocalHit {
        t,
        normal: edge1.cross(edge2).normalize(),
        uv: Vec2::new(u, v),
    })
}
