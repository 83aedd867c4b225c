//! Ray-quad intersection in local space.
//!
//! The canonical quad spans [-1, 1] x [-1, 1] in the local XY plane
//! with its normal along +Z; instances scale and orient it.

use glint_math::{Interval, Ray, Vec2, Vec3};

use crate::intersection::LocalHit;

pub(crate) fn intersect(ray: &Ray, window: Interval) -> Option<LocalHit> {
    // Parallel rays never cross the plane, and grazing ones produce a
    // t far outside any sane window anyway.
    if ray.direction.z.abs() < 1e-8 {
        return None;
    }

    let t = -ray.origin.z / ray.direction.z;
    if !window.surrounds(t) {
        return None;
    }

    let point = ray.at(t);
    if point.x.abs() > 1.0 || point.y.abs() > 1.0 {
        return None;
    }

    Some(LocalHit {
        t,
        normal: Vec3::Z,
        uv: Vec2::new((point.x + 1.0) * 0.5, (point.y + 1.0) * 0.5),
    })
}
