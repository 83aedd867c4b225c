//! Ray-sphere intersection in local space.

use glint_math::{Interval, Ray, Vec2, Vec3};

use crate::intersection::LocalHit;

/// Intersect a local-space ray with a sphere of `radius` at the origin.
///
/// Solves the quadratic for both roots and returns the nearer one that
/// falls inside the window, so a ray starting inside the sphere still
/// hits the far wall.
pub(crate) fn intersect(ray: &Ray, window: Interval, radius: f32) -> Option<LocalHit> {
    let oc = ray.origin;
    let a = ray.direction.length_squared();
    let half_b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;

    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let mut t = (-half_b - sqrt_d) / a;
    if !window.surrounds(t) {
        t = (-half_b + sqrt_d) / a;
        if !window.surrounds(t) {
            return None;
        }
    }

    let point = ray.at(t);
    Some(LocalHit {
        t,
        normal: point / radius,
        uv: uv(point, radius),
    })
}

/// Spherical parametrization: `u` wraps around the XY equator, `v`
/// runs from the -Z pole to the +Z pole.
fn uv(point: Vec3, radius: f32) -> Vec2 {
    let u = (point.y.atan2(point.x) + std::f32::consts::PI) / (2.0 * std::f32::consts::PI);
    let v = (point.z + radius) / (2.0 * radius);
    Vec2::new(u, v)
}
