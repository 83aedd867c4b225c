//! Intersection records.

use glint_core::MaterialId;
use glint_math::{Vec2, Vec3};

/// The nearest surface hit found along a ray.
#[derive(Clone, Copy, Debug)]
pub struct Intersection {
    /// Ray parameter at the hit point
    pub t: f32,

    /// World-space hit position
    pub position: Vec3,

    /// World-space unit surface normal
    pub normal: Vec3,

    /// Surface parametrization at the hit, used for texture lookup
    pub uv: Vec2,

    /// Material of the surface that was hit
    pub material: MaterialId,
}

/// A hit in a primitive's local space, before transforming out.
///
/// The `t` parameter is shared with the world-space ray because the
/// local ray is derived without renormalizing its direction.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LocalHit {
    pub t: f32,
    pub normal: Vec3,
    pub uv: Vec2,
}
