//! Water DuDv (UV distortion) map synthesis.
//!
//! Red stores the horizontal (U) offset, green the vertical (V) offset, blue is
//! unused. Values are centered on mid-gray, which a shader reads as "no distortion".

use image::{DynamicImage, Luma, Rgb, RgbImage};

use crate::error::Result;
use crate::output::Encoding;
use crate::params::{DuDvParams, WaveComponent};
use crate::raster::{Dimensions, FloatGrid};
use crate::texture::TextureGenerator;

/// Raw U and V offset fields before normalization
pub struct WaveField {
    pub du: FloatGrid,
    pub dv: FloatGrid,
}

impl WaveField {
    /// Largest absolute offset over both channels
    pub fn max_abs(&self) -> f32 {
        self.du
            .iter()
            .chain(self.dv.iter())
            .fold(0.0f32, |m, v| m.max(v.abs()))
    }
}

/// Sum every wave at every pixel, projected onto the U/V axes.
///
/// Sums run in f64 and are stored as f32.
pub fn wave_field(dims: Dimensions, waves: &[WaveComponent]) -> WaveField {
    let mut du = FloatGrid::new(dims.width, dims.height);
    let mut dv = FloatGrid::new(dims.width, dims.height);

    for y in 0..dims.height {
        for x in 0..dims.width {
            let (mut du_val, mut dv_val) = (0.0f64, 0.0f64);

            for wave in waves {
                let angle =
                    x as f64 * wave.frequency_x + y as f64 * wave.frequency_y + wave.phase;
                let wave_value = wave.amplitude * angle.sin();

                du_val += wave_value * wave.direction.cos();
                dv_val += wave_value * wave.direction.sin();
            }

            du.put_pixel(x, y, Luma([du_val as f32]));
            dv.put_pixel(x, y, Luma([dv_val as f32]));
        }
    }

    WaveField { du, dv }
}

/// Map an offset in [-0.5, 0.5] to a channel byte centered on mid-gray
fn offset_to_byte(offset: f32) -> u8 {
    ((offset + 0.5).clamp(0.0, 1.0) * 255.0) as u8
}

/// Generator for the 3-channel water distortion map
#[derive(Debug, Clone, Default)]
pub struct WaveDuDvGenerator {
    params: DuDvParams,
}

impl WaveDuDvGenerator {
    pub fn new(params: DuDvParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DuDvParams {
        &self.params
    }

    /// Compute the DuDv map.
    ///
    /// Two passes: the full wave field first, then a global max-abs rescale.
    /// An all-zero field has nothing to normalize and comes out uniformly mid-gray.
    pub fn synthesize(&self, dims: Dimensions) -> Result<RgbImage> {
        self.params.validate()?;

        let field = wave_field(dims, &self.params.waves);
        let max_val = field.max_abs();

        if max_val > 0.0 {
            log::debug!("DuDv normalization: max |offset| = {}", max_val);
        } else {
            log::warn!("DuDv wave field is zero everywhere, emitting neutral map");
        }

        // Divide first, then halve: the operation order fixes the f32 rounding
        let normalize = |v: f32| if max_val > 0.0 { v / max_val * 0.5 } else { 0.0 };

        Ok(RgbImage::from_fn(dims.width, dims.height, |x, y| {
            let du = normalize(field.du.get_pixel(x, y)[0]);
            let dv = normalize(field.dv.get_pixel(x, y)[0]);
            Rgb([offset_to_byte(du), offset_to_byte(dv), 0])
        }))
    }
}

impl TextureGenerator for WaveDuDvGenerator {
    fn name(&self) -> &'static str {
        "dudv"
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
