//! Shared raster primitives: validated dimensions, float working grids, blur.

use image::{imageops, ImageBuffer, Luma, Pixel, Rgb, RgbImage};

use crate::error::{Result, TextureError};

/// Single-channel f32 working grid (cloud layer, vignette, wave field)
pub type FloatGrid = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Texture size in pixels, guaranteed non-zero on both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// Reject degenerate sizes before any pixel work begins
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(TextureError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Image center with integer (floor) division
    pub fn center(&self) -> (u32, u32) {
        (self.width / 2, self.height / 2)
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Smallest and largest value in a grid
pub fn min_max(grid: &FloatGrid) -> (f32, f32) {
    grid.as_raw()
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Rescale a grid in place so its values span exactly [0, 1].
///
/// A constant grid has no range to stretch and collapses to all zeros.
/// Returns the (min, max) observed before rescaling.
pub fn normalize_min_max(grid: &mut FloatGrid) -> (f32, f32) {
    let (lo, hi) = min_max(grid);
    let range = hi - lo;

    if range > 0.0 && range.is_finite() {
        for v in grid.iter_mut() {
            *v = (*v - lo) / range;
        }
    } else {
        log::warn!(
            "Flat {}x{} grid (min = max = {}), normalizing to zero",
            grid.width(),
            grid.height(),
            lo
        );
        grid.iter_mut().for_each(|v| *v = 0.0);
    }

    (lo, hi)
}

/// Isotropic Gaussian blur applied identically to every channel.
///
/// A 1x1 image is returned unchanged: with edge clamping its blur is the identity.
pub fn gaussian_blur<P>(
    image: &ImageBuffer<P, Vec<P::Subpixel>>,
    sigma: f32,
) -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel + 'static,
{
    if image.width() <= 1 && image.height() <= 1 {
        return image.clone();
    }
    imageops::blur(image, sigma)
}

/// Normalized 1-D Gaussian taps, radius `trunc(4 * sigma + 0.5)`
fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (4.0 * sigma + 0.5) as i64;
    let taps: Vec<f64> = (-radius..=radius)
        .map(|k| (-0.5 * (k * k) as f64 / (sigma * sigma)).exp())
        .collect();
    let total: f64 = taps.iter().sum();
    taps.into_iter().map(|w| w / total).collect()
}

/// Half-sample symmetric index (`d c b a | a b c d | d c b a`)
fn reflect_index(i: i64, len: i64) -> usize {
    let period = 2 * len;
    let r = i.rem_euclid(period);
    (if r < len { r } else { period - 1 - r }) as usize
}

/// Gaussian smoothing along the color axis of each pixel.
///
/// Treats the three channels as a short signal with symmetric edges, so a
/// colored pixel drifts toward its own channel mean while gray stays gray.
/// Results are truncated back to bytes.
pub fn blur_across_channels(image: &RgbImage, sigma: f32) -> RgbImage {
    if sigma <= 0.0 {
        return image.clone();
    }
    let kernel = gaussian_kernel(f64::from(sigma));
    let radius = (kernel.len() / 2) as i64;

    let mut out = image.clone();
    for p in out.pixels_mut() {
        let src = p.0;
        let mut mixed = [0u8; 3];
        for (c, dst) in mixed.iter_mut().enumerate() {
            let sum: f64 = kernel
                .iter()
                .enumerate()
                .map(|(k, w)| {
                    let i = reflect_index(c as i64 + k as i64 - radius, 3);
                    w * f64::from(src[i])
                })
                .sum();
            *dst = sum.clamp(0.0, 255.0) as u8;
        }
        *p = Rgb(mixed);
    }
    out
}
