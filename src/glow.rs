//! Raindrop glow sprite: a soft white radial falloff with matching alpha.

use glam::DVec2;
use image::{DynamicImage, Rgba, RgbaImage};

use crate::error::Result;
use crate::output::Encoding;
use crate::params::GlowParams;
use crate::raster::{gaussian_blur, Dimensions};
use crate::texture::TextureGenerator;

/// Generator for the 4-channel glow sprite
#[derive(Debug, Clone, Default)]
pub struct RadialGlowGenerator {
    params: GlowParams,
}

impl RadialGlowGenerator {
    pub fn new(params: GlowParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &GlowParams {
        &self.params
    }

    /// Glow intensity in [0, 1] at a pixel.
    ///
    /// `max_radius` is floor(min(W, H) / 2). When it is 0 (a 1-pixel-wide
    /// sprite) only the center pixel is lit.
    fn intensity(&self, offset: DVec2, max_radius: u32) -> f64 {
        if max_radius == 0 {
            return if offset == DVec2::ZERO { 1.0 } else { 0.0 };
        }

        let normalized = offset.length() / max_radius as f64;
        if normalized < 1.0 {
            (-self.params.falloff * normalized * normalized).exp()
        } else {
            0.0
        }
    }

    /// Rasterize the unblurred sprite
    pub fn rasterize(&self, dims: Dimensions) -> RgbaImage {
        let (cx, cy) = dims.center();
        let max_radius = dims.width.min(dims.height) / 2;

        RgbaImage::from_fn(dims.width, dims.height, |x, y| {
            let offset = DVec2::new(x as f64 - cx as f64, y as f64 - cy as f64);
            let level = (255.0 * self.intensity(offset, max_radius)) as u8;
            Rgba([level, level, level, level])
        })
    }

    /// Rasterize, then soften color and alpha with the same blur
    pub fn synthesize(&self, dims: Dimensions) -> Result<RgbaImage> {
        self.params.validate()?;
        let sprite = self.rasterize(dims);
        Ok(gaussian_blur(&sprite, self.params.blur_sigma))
    }
}

impl TextureGenerator for RadialGlowGenerator {
    fn name(&self) -> &'static str {
        "glow"
    }

    fn encoding(&self) -> Encoding {
        Encoding::Png
    }

    fn default_dimensions(&self) -> (u32, u32) {
        (self.params.width, self.params.height)
    }

    fn render(&self, dims: Dimensions) -> Result<DynamicImage> {
        self.synthesize(dims).map(DynamicImage::ImageRgba8)
    }
}
