//! Cloud layer from a multi-octave sum of sinusoid products.
//!
//! This is a deliberately cheap stand-in for gradient noise, not Perlin noise.
//! The exact formula is part of the look.

use image::Luma;

use crate::params::CloudParams;
use crate::raster::{normalize_min_max, Dimensions, FloatGrid};

/// Unnormalized pseudo-noise sample at normalized coordinates scaled by the octave
fn sample(nx: f64, ny: f64) -> f64 {
    let mut value = nx.sin() * ny.sin() * 0.5 + 0.5;
    value += (nx * 1.7 + 1.3).sin() * (ny * 2.1 + 0.7).sin() * 0.25 + 0.25;
    value
}

/// Accumulate all octaves without normalizing
pub fn raw_cloud_layer(dims: Dimensions, params: &CloudParams) -> FloatGrid {
    let mut layer = FloatGrid::new(dims.width, dims.height);
    let (w, h) = (dims.width as f64, dims.height as f64);

    for octave in 0..params.octaves {
        let octave_scale = params.base_scale * params.lacunarity.powf(octave as f64);
        let amplitude = params.persistence.powf(octave as f64);

        for (x, y, Luma([cell])) in layer.enumerate_pixels_mut() {
            let nx = x as f64 / w * octave_scale;
            let ny = y as f64 / h * octave_scale;
            *cell = (*cell as f64 + sample(nx, ny) * amplitude) as f32;
        }
    }

    layer
}

/// Cloud density in [0, 1], min-max normalized over the whole image
pub fn cloud_layer(dims: Dimensions, params: &CloudParams) -> FloatGrid {
    let mut layer = raw_cloud_layer(dims, params);
    let (lo, hi) = normalize_min_max(&mut layer);
    log::debug!("Cloud layer range before normalization: [{}, {}]", lo, hi);
    layer
}
