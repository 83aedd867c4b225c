//! Render output buffers.

use std::path::Path;

use glint_math::Vec3;
use image::{GrayImage, ImageResult, RgbImage};

/// Color and depth buffers for one render.
///
/// Depth is stored normalized to [0, 1] between the camera's near and
/// far planes; pixels nothing was hit for stay at 1.0.
pub struct Frame {
    pub width: u32,
    pub height: u32,
    color: Vec<Vec3>,
    depth: Vec<f32>,
}

impl Frame {
    /// Create a frame filled with black color and far-plane depth.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            color: vec![Vec3::ZERO; (width * height) as usize],
            depth: vec![1.0; (width * height) as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    pub fn color_at(&self, x: u32, y: u32) -> Vec3 {
        self.color[self.index(x, y)]
    }

    pub fn depth_at(&self, x: u32, y: u32) -> f32 {
        self.depth[self.index(x, y)]
    }

    pub fn set_color(&mut self, x: u32, y: u32, color: Vec3) {
        let i = self.index(x, y);
        self.color[i] = color;
    }

    pub fn set_depth(&mut self, x: u32, y: u32, depth: f32) {
        let i = self.index(x, y);
        self.depth[i] = depth;
    }

    /// Save the color buffer as an 8-bit RGB PNG.
    pub fn save_color(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        let mut img = RgbImage::new(self.width, self.height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let c = self.color_at(x, y);
            *pixel = image::Rgb([to_byte(c.x), to_byte(c.y), to_byte(c.z)]);
        }
        img.save(path.as_ref())?;
        log::info!("Wrote color image: {}", path.as_ref().display());
        Ok(())
    }

    /// Save the depth buffer as a grayscale PNG (near = black).
    pub fn save_depth(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        let mut img = GrayImage::new(self.width, self.height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = image::Luma([to_byte(self.depth_at(x, y))]);
        }
        img.save(path.as_ref())?;
        log::info!("Wrote depth image: {}", path.as_ref().display());
        Ok(())
    }
}

/// Clamp to [0, 1] and quantize to 8 bits.
#[inline]
fn to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
