//! Ray-cylinder intersection in local space.
//!
//! The canonical cylinder is an open tube of radius 1 around the local
//! Y axis, truncated to |y| <= 1 so its bounding box is finite. There
//! are no end caps; a ray down the axis passes straight through.

use glint_math::{Interval, Ray, Vec2, Vec3};

use crate::intersection::LocalHit;

pub(crate) fn intersect(ray: &Ray, window: Interval) -> Option<LocalHit> {
    let o = ray.origin;
    let d = ray.direction;

    // Project onto the XZ plane and solve the circle quadratic.
    let a = d.x * d.x + d.z * d.z;
    if a < 1e-12 {
        // Ray parallel to the axis never crosses the tube wall
        return None;
    }
    let half_b = o.x * d.x + o.z * d.z;
    let c = o.x * o.x + o.z * o.z - 1.0;

    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();

    // The nearer root can fall outside the height bound while the
    // farther one is still valid, so both are tried in order.
    for t in [(-half_b - sqrt_d) / a, (-half_b + sqrt_d) / a] {
        if !window.surrounds(t) {
            continue;
        }
        let point = ray.at(t);
        if point.y.abs() > 1.0 {
            continue;
        }
        return Some(LocalHit {
            t,
            normal: Vec3::new(point.x, 0.0, point.z),
            uv: uv(point),
        });
    }

    None
}

/// `u` wraps around the tube, `v` is the raw height so textures tile
/// vertically on tall instances.
fn uv(point: Vec3) -> Vec2 {
    let u = point.x.atan2(point.z) / (2.0 * std::f32::consts::PI);
    Vec2::new(u, point.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Interval = Interval {
        min: 0.001,
        max: f32::INFINITY,
    };

    #[test]
    fn test_side_hit() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let hit = intersect(&ray, WINDOW).unwrap();

        assert!((hit.t - 4.0).abs() < 1e-5);
        assert!((hit.normal - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_above_height_bound_misses() {
        let ray = Ray::new(Vec3::new(0.0, 1.5, -5.0), Vec3::Z);
        assert!(intersect(&ray, WINDOW).is_none());
    }

    #[test]
    fn test_axis_parallel_ray_misses() {
        let ray = Ray::new(Vec3::new(0.5, -5.0, 0.0), Vec3::Y);
        assert!(intersect(&ray, WINDOW).is_none());
    }

    #[test]
    fn test_inside_hits_far_wall() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let hit = intersect(&ray, WINDOW).unwrap();

        assert!((hit.t - 1.0).abs() < 1e-5);
        assert!((hit.normal - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_near_root_out_of_bounds_falls_through_to_far() {
        // Enters above y = 1, descends, and exits through the far wall
        // inside the height bound.
        let ray = Ray::new(Vec3::new(0.0, 1.5, -2.0), Vec3::new(0.0, -1.0, 1.0));
        let hit = intersect(&ray, WINDOW).unwrap();

        let point = ray.at(hit.t);
        assert!(point.y.abs() <= 1.0);
        assert!((point.z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_normal_has_no_y_component() {
        let ray = Ray::new(Vec3::new(0.3, 0.9, -5.0), Vec3::Z);
        let hit = intersect(&ray, WINDOW).unwrap();

        assert_eq!(hit.normal.y, 0.0);
        assert!((hit.normal.length() - 1.0).abs() < 1e-5);
    }
}
