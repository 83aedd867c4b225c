//! Glint render core - Whitted-style CPU ray tracing.
//!
//! Primitives intersect rays in their local space behind a cached
//! inverse transform, containers (linear scan or BVH) find the nearest
//! hit, and the integrator recursively shades with soft shadows,
//! reflection and refraction. Rendering is bucketed and parallel.

mod bucket;
mod bvh;
mod camera;
mod container;
mod cylinder;
mod frame;
mod integrator;
mod intersection;
mod mesh;
mod primitive;
mod quad;
mod render;
mod scene;
mod sphere;

pub use bucket::{generate_buckets, Bucket, DEFAULT_BUCKET_SIZE};
pub use bvh::Bvh;
pub use camera::Camera;
pub use container::{Container, Naive};
pub use frame::Frame;
pub use integrator::{light_occlusion, trace, TraceStats};
pub use intersection::Intersection;
pub use primitive::{Primitive, Shape};
pub use render::{render, RenderConfig};
pub use scene::Scene;

/// Re-export the math types rendering code works in.
pub use glint_math::{Aabb, Interval, Mat4, Ray, Vec2, Vec3, EPSILON};
