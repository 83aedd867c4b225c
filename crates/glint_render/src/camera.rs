//! Camera for primary ray generation.

use glint_math::{Ray, Vec3};
use rand::Rng;
use rand::RngCore;

/// Pinhole camera with a jittered pixel grid.
///
/// Built with the `with_*` methods, then `initialize()` caches the
/// basis and viewport vectors before any rays are generated.
#[derive(Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    // Lens settings
    fovy: f32, // Vertical field of view in degrees
    z_near: f32,
    z_far: f32,

    /// Sample jitter radius in pixels; 0.5 covers the whole pixel,
    /// 0 pins every sample to the center.
    jitter_radius: f32,

    // Cached computed values (set by initialize())
    center: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            image_width: 640,
            image_height: 480,
            look_from: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            vup: Vec3::Y,
            fovy: 60.0,
            z_near: 0.1,
            z_far: 100.0,
            jitter_radius: 0.5,
            center: Vec3::ZERO,
            pixel00_loc: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, fovy: f32, z_near: f32, z_far: f32) -> Self {
        self.fovy = fovy;
        self.z_near = z_near;
        self.z_far = z_far;
        self
    }

    /// Set the anti-aliasing jitter radius in pixels.
    pub fn with_jitter(mut self, radius: f32) -> Self {
        self.jitter_radius = radius;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) {
        self.center = self.look_from;

        // Viewport sits on the near plane
        let theta = self.fovy.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.z_near;
        let viewport_width = viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Camera basis vectors
        self.w = (self.look_from - self.look_at).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Viewport spans, top-left origin
        let viewport_u = viewport_width * self.u;
        let viewport_v = -viewport_height * self.v;

        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        let viewport_upper_left =
            self.center - self.z_near * self.w - viewport_u / 2.0 - viewport_v / 2.0;

        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);
    }

    /// Generate a jittered ray through pixel (x, y).
    pub fn get_ray(&self, x: u32, y: u32, rng: &mut dyn RngCore) -> Ray {
        let jitter_x = (rng.gen::<f32>() - 0.5) * 2.0 * self.jitter_radius;
        let jitter_y = (rng.gen::<f32>() - 0.5) * 2.0 * self.jitter_radius;

        let pixel_sample = self.pixel00_loc
            + ((x as f32) + jitter_x) * self.pixel_delta_u
            + ((y as f32) + jitter_y) * self.pixel_delta_v;

        Ray::new(self.center, pixel_sample - self.center)
    }

    /// Generate the unjittered ray through the center of pixel (x, y).
    pub fn center_ray(&self, x: u32, y: u32) -> Ray {
        let pixel = self.pixel00_loc
            + (x as f32) * self.pixel_delta_u
            + (y as f32) * self.pixel_delta_v;
        Ray::new(self.center, pixel - self.center)
    }

    /// Map a world-space distance from the camera into [0, 1] between
    /// the near and far planes.
    pub fn normalize_depth(&self, distance: f32) -> f32 {
        ((distance - self.z_near) / (self.z_far - self.z_near)).clamp(0.0, 1.0)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_camera_initialize() {
        let mut camera = Camera::new()
            .with_resolution(800, 600)
            .with_position(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y)
            .with_lens(90.0, 0.1, 100.0);

        camera.initialize();

        assert_eq!(camera.center, Vec3::ZERO);
        assert!((camera.w - Vec3::Z).length() < 0.001);
        assert!((camera.u - Vec3::X).length() < 0.001);
    }

    #[test]
    fn test_center_ray_points_at_look_at() {
        let mut camera = Camera::new()
            .with_resolution(101, 101)
            .with_position(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y)
            .with_lens(60.0, 0.1, 100.0);
        camera.initialize();

        let ray = camera.center_ray(50, 50);
        let direction = ray.direction.normalize();

        assert!((direction - Vec3::NEG_Z).length() < 0.001);
    }

    #[test]
    fn test_zero_jitter_is_deterministic() {
        let mut camera = Camera::new()
            .with_resolution(100, 100)
            .with_jitter(0.0);
        camera.initialize();

        let mut rng = StdRng::seed_from_u64(3);
        let a = camera.get_ray(10, 20, &mut rng);
        let b = camera.get_ray(10, 20, &mut rng);

        assert_eq!(a.direction, b.direction);
        assert_eq!(a.direction, camera.center_ray(10, 20).direction);
    }

    #[test]
    fn test_jittered_rays_stay_within_the_pixel() {
        let mut camera = Camera::new().with_resolution(100, 100).with_jitter(0.5);
        camera.initialize();

        let center = camera.center_ray(50, 50);
        let left = camera.center_ray(49, 50);
        let pixel_span = (center.direction - left.direction).length();

        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let ray = camera.get_ray(50, 50, &mut rng);
            let offset = (ray.direction - center.direction).length();
            assert!(offset <= pixel_span);
        }
    }

    #[test]
    fn test_normalize_depth() {
        let camera = Camera::new().with_lens(60.0, 1.0, 11.0);

        assert_eq!(camera.normalize_depth(1.0), 0.0);
        assert_eq!(camera.normalize_depth(6.0), 0.5);
        assert_eq!(camera.normalize_depth(11.0), 1.0);
        // Clamped outside the planes
        assert_eq!(camera.normalize_depth(0.0), 0.0);
        assert_eq!(camera.normalize_depth(50.0), 1.0);
    }
}
