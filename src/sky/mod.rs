//! Night-sky water reflection map.
//!
//! Pipeline, in order (each stage feeds the next):
//! 1. dark-blue base fill
//! 2. seeded stars painted over the base
//! 3. blur to soften the stars, spatially and across the color channels
//! 4. cloud layer and 5. vignette, both synthesized as float grids
//! 6. composite: clouds, then moonlight, added per channel with clamping
//! 7. final softening blur

mod clouds;
mod stars;
mod vignette;

pub use clouds::{cloud_layer, raw_cloud_layer};
pub use stars::{draw_star, place_stars, Star};
pub use vignette::vignette;

use image::{DynamicImage, Rgb, RgbImage};

use crate::error::Result;
use crate::output::Encoding;
use crate::params::{CompositeParams, SkyParams};
use crate::raster::{blur_across_channels, gaussian_blur, Dimensions, FloatGrid};
use crate::texture::TextureGenerator;

/// Add `amount * tint` to a channel, clamped and truncated back to a byte
fn add_tinted(channel: u8, amount: f32, tint: f32) -> u8 {
    (f32::from(channel) + amount * tint).clamp(0.0, 255.0) as u8
}

/// Lay the cloud layer, then the moonlight vignette, over the star field
pub fn composite(
    base: &RgbImage,
    clouds: &FloatGrid,
    moonlight: &FloatGrid,
    params: &CompositeParams,
) -> RgbImage {
    RgbImage::from_fn(base.width(), base.height(), |x, y| {
        let mut rgb = base.get_pixel(x, y).0;

        let cloud = clouds.get_pixel(x, y)[0] * params.cloud_strength;
        for (c, tint) in rgb.iter_mut().zip(params.cloud_tint) {
            *c = add_tinted(*c, cloud, tint);
        }

        let moon = moonlight.get_pixel(x, y)[0] * params.moonlight_strength;
        for (c, tint) in rgb.iter_mut().zip(params.moonlight_tint) {
            *c = add_tinted(*c, moon, tint);
        }

        Rgb(rgb)
    })
}

/// Generator for the 3-channel reflection map
#[derive(Debug, Clone, Default)]
pub struct SkyReflectionGenerator {
    params: SkyParams,
}

impl SkyReflectionGenerator {
    pub fn new(params: SkyParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SkyParams {
        &self.params
    }

    /// Base fill with the stars painted on, before any blur
    pub fn star_field(&self, dims: Dimensions) -> RgbImage {
        let mut sky =
            RgbImage::from_pixel(dims.width, dims.height, Rgb(self.params.base_color));
        let stars = place_stars(dims, &self.params.stars);
        for star in &stars {
            draw_star(&mut sky, star);
        }
        log::debug!(
            "Placed {} stars (seed {})",
            stars.len(),
            self.params.stars.seed
        );
        sky
    }

    pub fn synthesize(&self, dims: Dimensions) -> Result<RgbImage> {
        self.params.validate()?;
        let params = &self.params;

        let sigma = params.stars.blur_sigma;
        let sky = blur_across_channels(&gaussian_blur(&self.star_field(dims), sigma), sigma);
        let clouds = cloud_layer(dims, &params.clouds);
        let moonlight = vignette(dims, &params.vignette);

        let composited = composite(&sky, &clouds, &moonlight, &params.composite);
        Ok(gaussian_blur(&composited, params.final_blur_sigma))
    }
}

impl TextureGenerator for SkyReflectionGenerator {
    fn name(&self) -> &'static str {
        "reflection"
    }

    fn encoding(&self) -> Encoding {
        Encoding::Jpeg {
            quality: self.params.jpeg_quality,
        }
    }

    fn default_dimensions(&self) -> (u32, u32) {
        (self.params.width, self.params.height)
    }

    fn render(&self, dims: Dimensions) -> Result<DynamicImage> {
        self.synthesize(dims).map(DynamicImage::ImageRgb8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::StarParams;
    use image::Luma;

    fn dims(w: u32, h: u32) -> Dimensions {
        Dimensions::new(w, h).unwrap()
    }

    fn small_sky(seed: u64) -> SkyParams {
        SkyParams {
            stars: StarParams {
                count: 150,
                seed,
                ..StarParams::default()
            },
            ..SkyParams::default()
        }
    }

    #[test]
    fn test_composite_weights_per_channel() {
        let base = RgbImage::from_pixel(1, 1, Rgb([5, 10, 30]));
        let full = FloatGrid::from_pixel(1, 1, Luma([1.0]));
        let none = FloatGrid::from_pixel(1, 1, Luma([0.0]));
        let params = CompositeParams::default();

        // Clouds alone: +40, +50, +65
        let out = composite(&base, &full, &none, &params);
        assert_eq!(out.get_pixel(0, 0).0, [45, 60, 95]);

        // Moonlight alone: +21, +28, +28
        let out = composite(&base, &none, &full, &params);
        assert_eq!(out.get_pixel(0, 0).0, [26, 38, 58]);
    }

    #[test]
    fn test_composite_clamps() {
        let base = RgbImage::from_pixel(1, 1, Rgb([250, 250, 250]));
        let full = FloatGrid::from_pixel(1, 1, Luma([1.0]));
        let params = CompositeParams::default();
        let out = composite(&base, &full, &full, &params);
        assert_eq!(out.get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn test_star_free_base_is_color_mixed() {
        let params = SkyParams {
            stars: StarParams {
                count: 0,
                ..StarParams::default()
            },
            composite: CompositeParams {
                cloud_strength: 0.0,
                moonlight_strength: 0.0,
                ..CompositeParams::default()
            },
            ..SkyParams::default()
        };
        let sky = SkyReflectionGenerator::new(params).synthesize(dims(24, 16)).unwrap();

        // (5, 10, 30) smoothed along the channel axis
        for p in sky.pixels() {
            for (got, want) in p.0.iter().zip([8u8, 14, 22]) {
                assert!(got.abs_diff(want) <= 1, "{:?}", p);
            }
        }
    }

    #[test]
    fn test_stars_paint_over_base() {
        let generator = SkyReflectionGenerator::new(small_sky(42));
        let field = generator.star_field(dims(64, 64));
        let lit = field.pixels().filter(|p| p[0] >= 150).count();
        assert!(lit > 0);
        assert!(field.pixels().all(|p| p.0 == [5, 10, 30] || (p[0] == p[1] && p[1] == p[2])));
    }

    #[test]
    fn test_seed_changes_stars_but_not_base_or_vignette() {
        let a = SkyReflectionGenerator::new(small_sky(1));
        let b = SkyReflectionGenerator::new(small_sky(2));

        assert_ne!(a.star_field(dims(64, 64)), b.star_field(dims(64, 64)));
        assert_ne!(
            a.synthesize(dims(64, 64)).unwrap(),
            b.synthesize(dims(64, 64)).unwrap()
        );

        // Background pixels keep the base color
        let base = Rgb(a.params().base_color);
        let shared_background = a
            .star_field(dims(64, 64))
            .pixels()
            .zip(b.star_field(dims(64, 64)).pixels())
            .filter(|(pa, pb)| **pa == base && **pb == base)
            .count();
        assert!(shared_background > 64 * 64 / 2);

        assert_eq!(
            vignette(dims(64, 64), &a.params().vignette),
            vignette(dims(64, 64), &b.params().vignette)
        );
    }

    #[test]
    fn test_moonlight_brightens_center() {
        let params = SkyParams {
            stars: StarParams {
                count: 0,
                ..StarParams::default()
            },
            composite: CompositeParams {
                cloud_strength: 0.0,
                ..CompositeParams::default()
            },
            ..SkyParams::default()
        };
        let sky = SkyReflectionGenerator::new(params).synthesize(dims(96, 96)).unwrap();

        // Full moonlight at the center: mixed base (8, 14, 22) + (21, 28, 28)
        let center = sky.get_pixel(48, 48).0;
        for (got, want) in center.iter().zip([29u8, 42, 50]) {
            assert!(got.abs_diff(want) <= 1, "{:?}", center);
        }
        for corner in [(0, 0), (95, 0), (0, 95)] {
            assert!(sky.get_pixel(corner.0, corner.1)[2] < center[2]);
        }
    }

    #[test]
    fn test_deterministic() {
        let generator = SkyReflectionGenerator::new(small_sky(42));
        let a = generator.synthesize(dims(48, 40)).unwrap();
        let b = generator.synthesize(dims(48, 40)).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_single_pixel() {
        let sky = SkyReflectionGenerator::default().synthesize(dims(1, 1)).unwrap();
        assert_eq!(sky.dimensions(), (1, 1));
    }

    #[test]
    fn test_invalid_brightness_range_rejected() {
        let params = SkyParams {
            stars: StarParams {
                brightness_min: 200,
                brightness_max: 100,
                ..StarParams::default()
            },
            ..SkyParams::default()
        };
        assert!(SkyReflectionGenerator::new(params).synthesize(dims(4, 4)).is_err());
    }
}
