//! Seeded star placement and rasterization.

use image::{Rgb, RgbImage};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::params::StarParams;
use crate::raster::Dimensions;

/// A single star, consumed once by the rasterizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Star {
    pub x: u32,
    pub y: u32,
    pub size: u32,
    pub brightness: u8,
}

/// Draw `params.count` stars from a fresh RNG seeded with `params.seed`.
///
/// Per star the draws are x, y, size, brightness, in that order.
pub fn place_stars(dims: Dimensions, params: &StarParams) -> Vec<Star> {
    let mut rng = ChaCha8Rng::seed_from_u64(params.seed);

    (0..params.count)
        .map(|_| {
            let x = rng.gen_range(0..dims.width);
            let y = rng.gen_range(0..dims.height);
            let size = params.sizes.choose(&mut rng).copied().unwrap_or(1);
            let brightness = rng.gen_range(params.brightness_min..=params.brightness_max);
            Star {
                x,
                y,
                size,
                brightness,
            }
        })
        .collect()
}

/// Paint a star in solid gray, overwriting what is underneath.
///
/// Size 1 is a single pixel; larger stars are disks of radius `size / 2`,
/// clipped to the image.
pub fn draw_star(image: &mut RgbImage, star: &Star) {
    let color = Rgb([star.brightness; 3]);

    if star.size <= 1 {
        if star.x < image.width() && star.y < image.height() {
            image.put_pixel(star.x, star.y, color);
        }
        return;
    }

    let r = (star.size / 2) as i64;
    let (w, h) = (image.width() as i64, image.height() as i64);
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy > r * r {
                continue;
            }
            let (px, py) = (star.x as i64 + dx, star.y as i64 + dy);
            if (0..w).contains(&px) && (0..h).contains(&py) {
                image.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}
