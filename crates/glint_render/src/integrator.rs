//! Recursive Whitted integrator.
//!
//! `trace` finds the nearest hit and hands it to `shade`, which sums
//! the local Phong terms under soft shadows and recurses for mirror
//! reflection and refraction until the scene's depth cap.

use glint_math::{Interval, Ray, Vec3, EPSILON};
use rand::Rng;
use rand::RngCore;

use glint_core::Light;

use crate::intersection::Intersection;
use crate::scene::Scene;

/// Counters accumulated over a render (or a single trace).
#[derive(Clone, Copy, Debug, Default)]
pub struct TraceStats {
    /// Total rays traced, primary and secondary
    pub rays_cast: u64,

    /// Deepest recursion level any ray reached
    pub deepest_recursion: u32,
}

impl TraceStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold another set of counters into this one.
    pub fn merge(&mut self, other: &TraceStats) {
        self.rays_cast += other.rays_cast;
        self.deepest_recursion = self.deepest_recursion.max(other.deepest_recursion);
    }
}

/// Compute the color seen along a ray and the world-space distance to
/// what it hit.
///
/// `depth` is 0 for primary rays and grows with each reflection or
/// refraction bounce. A ray that leaves the scene returns the
/// background color and an infinite distance, which the depth buffer
/// clamps to the far plane.
pub fn trace(
    scene: &Scene,
    ray: &Ray,
    depth: u32,
    rng: &mut dyn RngCore,
    stats: &mut TraceStats,
) -> (Vec3, f32) {
    stats.rays_cast += 1;
    stats.deepest_recursion = stats.deepest_recursion.max(depth);

    // The lower bound keeps secondary rays from re-hitting the surface
    // they left (shadow acne).
    match scene.intersect(ray, Interval::new(EPSILON, f32::INFINITY)) {
        Some(hit) => {
            let color = shade(scene, ray, &hit, depth, rng, stats);
            // t is in units of the (possibly non-unit) ray direction
            (color, hit.t * ray.direction.length())
        }
        None => (scene.background, f32::INFINITY),
    }
}

/// Shade a hit point: ambient and per-light diffuse and specular terms,
/// plus recursive reflection and refraction while depth remains.
fn shade(
    scene: &Scene,
    ray: &Ray,
    hit: &Intersection,
    depth: u32,
    rng: &mut dyn RngCore,
    stats: &mut TraceStats,
) -> Vec3 {
    let material = scene.material(hit.material);
    let base = material.base_color(hit.uv.x, hit.uv.y);

    let incoming = ray.direction.normalize();
    let front_face = incoming.dot(hit.normal) < 0.0;
    let normal = if front_face { hit.normal } else { -hit.normal };
    let view = -incoming;

    let mut color = base * scene.ambient * material.k_ambient;

    for light in &scene.lights {
        let to_light = light.position - hit.position;
        let distance = to_light.length();
        if distance < EPSILON {
            continue;
        }
        let light_dir = to_light / distance;

        let n_dot_l = normal.dot(light_dir);
        if n_dot_l <= 0.0 {
            continue;
        }

        let visibility = 1.0 - light_occlusion(scene, hit.position, light, scene.shadow_rays, rng);
        if visibility <= 0.0 {
            continue;
        }

        // Lambert diffuse
        color += base * light.emission * (material.k_diffuse * n_dot_l * visibility);

        // Blinn specular on the half vector
        if material.k_specular > 0.0 {
            let half = (light_dir + view).normalize();
            let highlight = normal.dot(half).max(0.0).powf(material.shininess);
            color += light.emission * (material.k_specular * highlight * visibility);
        }
    }

    if depth < scene.max_ray_depth {
        if material.k_reflection > EPSILON {
            let reflected = Ray::new(hit.position, reflect(incoming, normal));
            color += material.k_reflection * trace(scene, &reflected, depth + 1, rng, stats).0;
        }

        if material.k_refraction > EPSILON {
            let eta = if front_face {
                1.0 / material.refractive_index
            } else {
                material.refractive_index
            };
            // Total internal reflection bounces back instead
            let direction =
                refract(incoming, normal, eta).unwrap_or_else(|| reflect(incoming, normal));
            let transmitted = Ray::new(hit.position, direction);
            color += material.k_refraction * trace(scene, &transmitted, depth + 1, rng, stats).0;
        }
    }

    color
}

/// Fraction of the light's sampling disk that is blocked from `point`,
/// in [0, 1]. Zero-radius lights cast a single hard shadow ray.
pub fn light_occlusion(
    scene: &Scene,
    point: Vec3,
    light: &Light,
    shadow_rays: u32,
    rng: &mut dyn RngCore,
) -> f32 {
    let to_light = light.position - point;
    let distance = to_light.length();
    if distance < EPSILON {
        return 0.0;
    }
    let dir = to_light / distance;

    let count = if light.radius > 0.0 { shadow_rays.max(1) } else { 1 };

    // Disk basis perpendicular to the light direction
    let reference = if dir.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };
    let tangent = dir.cross(reference).normalize();
    let bitangent = dir.cross(tangent);

    let mut blocked = 0u32;
    for _ in 0..count {
        let target = if light.radius > 0.0 {
            // Uniform disk sample
            let r = light.radius * rng.gen::<f32>().sqrt();
            let theta = rng.gen::<f32>() * 2.0 * std::f32::consts::PI;
            light.position + tangent * (r * theta.cos()) + bitangent * (r * theta.sin())
        } else {
            light.position
        };

        let offset = target - point;
        let span = offset.length();
        if span < EPSILON {
            continue;
        }
        let shadow_ray = Ray::new(point, offset / span);

        // Only blockers strictly between the surface and the light count
        if scene.is_occluded(&shadow_ray, Interval::new(EPSILON, span - EPSILON)) {
            blocked += 1;
        }
    }

    blocked as f32 / count as f32
}

/// Mirror reflection of `d` about the unit normal `n`.
fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    d - 2.0 * d.dot(n) * n
}

/// Snell refraction of the unit vector `d` through the unit normal `n`
/// with relative index `eta`. `None` on total internal reflection.
fn refract(d: Vec3, n: Vec3, eta: f32) -> Option<Vec3> {
    let cos_i = (-d).dot(n).min(1.0);
    let sin2_t = eta * eta * (1.0 - cos_i * cos_i);
    if sin2_t > 1.0 {
        return None;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    Some(eta * d + (eta * cos_i - cos_t) * n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{Container, Naive};
    use crate::primitive::{Primitive, Shape};
    use glint_core::{Material, MaterialLibrary};
    use glint_math::Mat4;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scene_with(
        objects: Vec<(Shape, Mat4, Material)>,
        lights: Vec<Light>,
        max_ray_depth: u32,
    ) -> Scene {
        let mut materials = MaterialLibrary::new();
        let primitives: Vec<Primitive> = objects
            .into_iter()
            .map(|(shape, transform, material)| {
                let id = materials.add(material);
                Primitive::new(shape, transform, id)
            })
            .collect();

        Scene {
            container: Container::Naive(Naive::new(primitives.into())),
            lights,
            materials,
            ambient: Vec3::splat(0.1),
            background: Vec3::new(0.2, 0.3, 0.4),
            max_ray_depth,
            shadow_rays: 8,
        }
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = scene_with(vec![], vec![], 4);
        let mut rng = StdRng::seed_from_u64(1);
        let mut stats = TraceStats::new();

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let (color, distance) = trace(&scene, &ray, 0, &mut rng, &mut stats);

        assert_eq!(color, scene.background);
        assert_eq!(distance, f32::INFINITY);
        assert_eq!(stats.rays_cast, 1);
    }

    #[test]
    fn test_lit_surface_is_brighter_than_ambient() {
        let matte = Material::new("matte", Vec3::splat(0.8));
        let scene = scene_with(
            vec![(
                Shape::Sphere { radius: 1.0 },
                Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0)),
                matte,
            )],
            vec![Light::new(Vec3::new(0.0, 10.0, 0.0), Vec3::ONE, 0.0)],
            4,
        );

        let mut rng = StdRng::seed_from_u64(2);
        let mut stats = TraceStats::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let (color, distance) = trace(&scene, &ray, 0, &mut rng, &mut stats);

        let ambient_only = Vec3::splat(0.8) * scene.ambient;
        assert!(color.length() > ambient_only.length());
        // Front of the sphere, unit direction
        assert!((distance - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_fully_blocked_light_is_occluded() {
        // A wall quad between the shading point and the light
        let wall = Material::new("wall", Vec3::ONE);
        let scene = scene_with(
            vec![(
                Shape::Quad,
                Mat4::from_scale_rotation_translation(
                    Vec3::new(50.0, 50.0, 1.0),
                    glint_math::Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
                    Vec3::new(0.0, 5.0, 0.0),
                ),
                wall,
            )],
            vec![],
            4,
        );

        let light = Light::new(Vec3::new(0.0, 10.0, 0.0), Vec3::ONE, 0.5);
        let mut rng = StdRng::seed_from_u64(3);

        let occlusion = light_occlusion(&scene, Vec3::ZERO, &light, 16, &mut rng);
        assert_eq!(occlusion, 1.0);
    }

    #[test]
    fn test_clear_path_is_unoccluded() {
        let scene = scene_with(vec![], vec![], 4);
        let light = Light::new(Vec3::new(0.0, 10.0, 0.0), Vec3::ONE, 0.5);
        let mut rng = StdRng::seed_from_u64(4);

        let occlusion = light_occlusion(&scene, Vec3::ZERO, &light, 16, &mut rng);
        assert_eq!(occlusion, 0.0);
    }

    #[test]
    fn test_blocker_beyond_the_light_does_not_occlude() {
        // Quad at y = 20, light at y = 10: the wall is behind the light
        let wall = Material::new("wall", Vec3::ONE);
        let scene = scene_with(
            vec![(
                Shape::Quad,
                Mat4::from_scale_rotation_translation(
                    Vec3::new(50.0, 50.0, 1.0),
                    glint_math::Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
                    Vec3::new(0.0, 20.0, 0.0),
                ),
                wall,
            )],
            vec![],
            4,
        );

        let light = Light::new(Vec3::new(0.0, 10.0, 0.0), Vec3::ONE, 0.0);
        let mut rng = StdRng::seed_from_u64(5);

        let occlusion = light_occlusion(&scene, Vec3::ZERO, &light, 16, &mut rng);
        assert_eq!(occlusion, 0.0);
    }

    #[test]
    fn test_hall_of_mirrors_stops_at_depth_cap() {
        // Two parallel mirror quads facing each other
        let mut mirror = Material::new("mirror", Vec3::ONE);
        mirror.k_reflection = 1.0;

        let scene = scene_with(
            vec![
                (
                    Shape::Quad,
                    Mat4::from_translation(Vec3::new(0.0, 0.0, -2.0)),
                    mirror.clone(),
                ),
                (
                    Shape::Quad,
                    Mat4::from_translation(Vec3::new(0.0, 0.0, 2.0)),
                    mirror,
                ),
            ],
            vec![],
            6,
        );

        let mut rng = StdRng::seed_from_u64(6);
        let mut stats = TraceStats::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let _ = trace(&scene, &ray, 0, &mut rng, &mut stats);

        assert_eq!(stats.deepest_recursion, scene.max_ray_depth);
        // Primary ray plus one bounce per level
        assert_eq!(stats.rays_cast, 1 + scene.max_ray_depth as u64);
    }

    #[test]
    fn test_refraction_passes_through_flat_glass() {
        // A refracting quad in front of the background: the traced color
        // includes the background seen through the glass.
        let mut glass = Material::new("glass", Vec3::ZERO);
        glass.k_ambient = 0.0;
        glass.k_diffuse = 0.0;
        glass.k_refraction = 1.0;
        glass.refractive_index = 1.0; // No bending, pure pass-through

        let scene = scene_with(
            vec![(
                Shape::Quad,
                Mat4::from_translation(Vec3::new(0.0, 0.0, -2.0)),
                glass,
            )],
            vec![],
            4,
        );

        let mut rng = StdRng::seed_from_u64(7);
        let mut stats = TraceStats::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let (color, _) = trace(&scene, &ray, 0, &mut rng, &mut stats);

        assert!((color - scene.background).length() < 1e-4);
    }

    #[test]
    fn test_refract_straight_through_at_matched_index() {
        let d = Vec3::new(0.0, -1.0, 0.0);
        let n = Vec3::Y;
        let out = refract(d, n, 1.0).unwrap();
        assert!((out - d).length() < 1e-5);
    }

    #[test]
    fn test_total_internal_reflection() {
        // Grazing exit from a dense medium
        let d = Vec3::new(0.9, -0.1, 0.0).normalize();
        let n = Vec3::Y;
        assert!(refract(d, n, 1.5).is_none());
    }

    #[test]
    fn test_reflect_is_mirror() {
        let d = Vec3::new(1.0, -1.0, 0.0).normalize();
        let out = reflect(d, Vec3::Y);
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((out - expected).length() < 1e-5);
    }

    #[test]
    fn test_stats_merge() {
        let mut a = TraceStats {
            rays_cast: 10,
            deepest_recursion: 2,
        };
        let b = TraceStats {
            rays_cast: 5,
            deepest_recursion: 4,
        };
        a.merge(&b);

        assert_eq!(a.rays_cast, 15);
        assert_eq!(a.deepest_recursion, 4);
    }
}
