//! Area lights for direct illumination and soft shadows.

use glint_math::Vec3;

/// A disk-shaped area light.
///
/// `radius` sets the size of the sampling disk used for soft shadows;
/// zero radius degenerates to a point light with hard shadows.
#[derive(Clone, Debug)]
pub struct Light {
    /// World-space position of the light center
    pub position: Vec3,

    /// Emitted radiance (RGB)
    pub emission: Vec3,

    /// Radius of the shadow-sampling disk
    pub radius: f32,
}

impl Light {
    /// Create a new light.
    pub fn new(position: Vec3, emission: Vec3, radius: f32) -> Self {
        Self {
            position,
            emission,
            radius,
        }
    }
}
