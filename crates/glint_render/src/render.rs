//! The parallel render loop.
//!
//! Buckets render independently on the rayon pool. Each bucket gets its
//! own RNG seeded from the base seed and its index, so a render is
//! reproducible regardless of thread scheduling.

use std::time::Instant;

use glint_math::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::bucket::{generate_buckets, Bucket, DEFAULT_BUCKET_SIZE};
use crate::camera::Camera;
use crate::frame::Frame;
use crate::integrator::{trace, TraceStats};
use crate::scene::Scene;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Tile edge length in pixels
    pub bucket_size: u32,
    /// Base seed for per-bucket RNGs
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 4,
            bucket_size: DEFAULT_BUCKET_SIZE,
            seed: 0,
        }
    }
}

struct BucketResult {
    bucket: Bucket,
    /// (color, depth) per pixel, row-major within the bucket
    pixels: Vec<(Vec3, f32)>,
    stats: TraceStats,
}

/// Render the scene through the camera into a new frame.
///
/// Returns the frame and the trace counters accumulated across all
/// buckets. The camera must already be initialized.
pub fn render(scene: &Scene, camera: &Camera, config: &RenderConfig) -> (Frame, TraceStats) {
    let start = Instant::now();
    let buckets = generate_buckets(camera.image_width, camera.image_height, config.bucket_size);
    log::info!(
        "Rendering {}x{} at {} spp, {} buckets, {} primitives",
        camera.image_width,
        camera.image_height,
        config.samples_per_pixel,
        buckets.len(),
        scene.container.len()
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(scene, camera, config, *bucket))
        .collect();

    let mut frame = Frame::new(camera.image_width, camera.image_height);
    let mut stats = TraceStats::new();

    for result in results {
        stats.merge(&result.stats);
        let mut i = 0;
        for local_y in 0..result.bucket.height {
            for local_x in 0..result.bucket.width {
                let (color, depth) = result.pixels[i];
                i += 1;
                frame.set_color(result.bucket.x + local_x, result.bucket.y + local_y, color);
                frame.set_depth(result.bucket.x + local_x, result.bucket.y + local_y, depth);
            }
        }
    }

    log::info!(
        "Render finished in {:.2?}: {} rays, deepest recursion {}",
        start.elapsed(),
        stats.rays_cast,
        stats.deepest_recursion
    );

    (frame, stats)
}

/// Render one bucket with its own deterministic RNG.
fn render_bucket(
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
    bucket: Bucket,
) -> BucketResult {
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(bucket.index as u64));
    let mut stats = TraceStats::new();
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let x = bucket.x + local_x;
            let y = bucket.y + local_y;

            let mut color = Vec3::ZERO;
            // Depth test: keep the nearest sample; misses clamp to the
            // far plane
            let mut depth = 1.0f32;
            for _ in 0..config.samples_per_pixel {
                let ray = camera.get_ray(x, y, &mut rng);
                let (sample, distance) = trace(scene, &ray, 0, &mut rng, &mut stats);
                color += sample;
                depth = depth.min(camera.normalize_depth(distance));
            }
            color /= config.samples_per_pixel as f32;

            pixels.push((color, depth));
        }
    }

    BucketResult {
        bucket,
        pixels,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{Container, Naive};
    use crate::primitive::{Primitive, Shape};
    use glint_core::{Light, Material, MaterialLibrary};
    use glint_math::Mat4;

    fn sphere_scene_at(z: f32) -> Scene {
        let mut materials = MaterialLibrary::new();
        let red = materials.add(Material::new("red", Vec3::new(0.9, 0.1, 0.1)));
        let primitives = vec![Primitive::new(
            Shape::Sphere { radius: 1.0 },
            Mat4::from_translation(Vec3::new(0.0, 0.0, z)),
            red,
        )];

        Scene {
            container: Container::Naive(Naive::new(primitives.into())),
            lights: vec![Light::new(Vec3::new(5.0, 5.0, 0.0), Vec3::ONE, 0.0)],
            materials,
            ambient: Vec3::splat(0.1),
            background: Vec3::new(0.0, 0.0, 0.3),
            max_ray_depth: 4,
            shadow_rays: 4,
        }
    }

    fn test_camera() -> Camera {
        let mut camera = Camera::new()
            .with_resolution(32, 32)
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -5.0), Vec3::Y)
            .with_lens(60.0, 0.1, 20.0);
        camera.initialize();
        camera
    }

    #[test]
    fn test_center_pixel_hits_the_sphere() {
        let scene = sphere_scene_at(-5.0);
        let camera = test_camera();
        let config = RenderConfig {
            samples_per_pixel: 2,
            bucket_size: 16,
            seed: 0,
        };

        let (frame, stats) = render(&scene, &camera, &config);

        // Center pixel sees the sphere, corner sees background
        let center = frame.color_at(16, 16);
        let corner = frame.color_at(0, 0);
        assert!(center.x > corner.x);
        assert_eq!(corner, scene.background);

        // Depth: sphere front is nearer than the far plane
        assert!(frame.depth_at(16, 16) < 1.0);
        assert_eq!(frame.depth_at(0, 0), 1.0);

        // At least one primary ray per sample per pixel
        assert!(stats.rays_cast >= (32 * 32 * 2) as u64);
    }

    #[test]
    fn test_same_seed_reproduces_the_frame() {
        let scene = sphere_scene_at(-5.0);
        let camera = test_camera();
        let config = RenderConfig {
            samples_per_pixel: 2,
            bucket_size: 16,
            seed: 42,
        };

        let (a, _) = render(&scene, &camera, &config);
        let (b, _) = render(&scene, &camera, &config);

        for y in 0..32 {
            for x in 0..32 {
                assert_eq!(a.color_at(x, y), b.color_at(x, y));
            }
        }
    }

    #[test]
    fn test_depth_is_nearer_for_closer_geometry() {
        let camera = test_camera();
        let config = RenderConfig::default();

        let (far_frame, _) = render(&sphere_scene_at(-5.0), &camera, &config);
        let (near_frame, _) = render(&sphere_scene_at(-2.5), &camera, &config);

        assert!(near_frame.depth_at(16, 16) < far_frame.depth_at(16, 16));
    }
}
