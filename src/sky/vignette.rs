//! Radial moonlight vignette: bright center, darker edges.

use glam::DVec2;
use image::Luma;

use crate::params::VignetteParams;
use crate::raster::{Dimensions, FloatGrid};

/// vignette = 1 - (dist / max_dist)^exponent, with max_dist the center-to-origin distance.
///
/// A 1x1 image has max_dist = 0 and is uniformly 1.0.
pub fn vignette(dims: Dimensions, params: &VignetteParams) -> FloatGrid {
    let (cx, cy) = dims.center();
    let center = DVec2::new(cx as f64, cy as f64);
    let max_dist = center.length();

    FloatGrid::from_fn(dims.width, dims.height, |x, y| {
        if max_dist == 0.0 {
            return Luma([1.0]);
        }
        let dist = DVec2::new(x as f64, y as f64).distance(center);
        Luma([(1.0 - (dist / max_dist).powf(params.exponent)) as f32])
    })
}
