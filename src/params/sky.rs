//! Night-sky reflection map parameters: stars, clouds, vignette, compositing.

use crate::error::{invalid, Result};

/// Star field placement and rasterization
#[derive(Debug, Clone)]
pub struct StarParams {
    /// Number of stars to place
    pub count: usize,

    /// Seed for the star RNG (same seed = same sky)
    pub seed: u64,

    /// Size table sampled uniformly; repeats act as weights.
    /// Size 1 = single pixel, larger sizes = disk of radius size / 2
    pub sizes: Vec<u32>,

    /// Minimum star gray level (inclusive)
    pub brightness_min: u8,

    /// Maximum star gray level (inclusive)
    pub brightness_max: u8,

    /// Gaussian blur softening the stars before compositing (pixels)
    pub blur_sigma: f32,
}

impl Default for StarParams {
    fn default() -> Self {
        Self {
            count: 2000,
            seed: 42,
            sizes: vec![1, 1, 1, 2, 2, 3], // Mostly small stars
            brightness_min: 150,
            brightness_max: 255,
            blur_sigma: 1.0,
        }
    }
}

/// Multi-octave sinusoidal cloud layer
#[derive(Debug, Clone)]
pub struct CloudParams {
    /// Spatial scale of the first octave (radians across the full image)
    pub base_scale: f64,

    /// Number of octaves summed
    pub octaves: u32,

    /// Amplitude decay per octave
    pub persistence: f64,

    /// Frequency growth per octave
    pub lacunarity: f64,
}

impl Default for CloudParams {
    fn default() -> Self {
        Self {
            base_scale: 8.0,
            octaves: 6,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

/// Radial moonlight falloff
#[derive(Debug, Clone)]
pub struct VignetteParams {
    /// vignette = 1 - (dist / max_dist)^exponent
    pub exponent: f64,
}

impl Default for VignetteParams {
    fn default() -> Self {
        Self { exponent: 1.5 }
    }
}

/// How clouds and vignette are added onto the blurred star field
#[derive(Debug, Clone)]
pub struct CompositeParams {
    /// Cloud value multiplier before tinting
    pub cloud_strength: f32,

    /// Per-channel levels added at full cloud strength (blue-white bias)
    pub cloud_tint: [f32; 3],

    /// Vignette value multiplier before tinting
    pub moonlight_strength: f32,

    /// Per-channel levels added at full moonlight
    pub moonlight_tint: [f32; 3],
}

impl Default for CompositeParams {
    fn default() -> Self {
        Self {
            cloud_strength: 0.5,
            cloud_tint: [80.0, 100.0, 130.0],
            moonlight_strength: 0.7,
            moonlight_tint: [30.0, 40.0, 40.0],
        }
    }
}

/// Water reflection map parameters
#[derive(Debug, Clone)]
pub struct SkyParams {
    /// Default output width (pixels)
    pub width: u32,

    /// Default output height (pixels)
    pub height: u32,

    /// Dark-blue night base color (RGB)
    pub base_color: [u8; 3],

    pub stars: StarParams,
    pub clouds: CloudParams,
    pub vignette: VignetteParams,
    pub composite: CompositeParams,

    /// Final softening blur over the composite (pixels)
    pub final_blur_sigma: f32,

    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
}

impl Default for SkyParams {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            base_color: [5, 10, 30],
            stars: StarParams::default(),
            clouds: CloudParams::default(),
            vignette: VignetteParams::default(),
            composite: CompositeParams::default(),
            final_blur_sigma: 1.5,
            jpeg_quality: 95,
        }
    }
}

impl SkyParams {
    pub fn validate(&self) -> Result<()> {
        let stars = &self.stars;
        if stars.count > 0 && stars.sizes.is_empty() {
            return Err(invalid("star size table must not be empty"));
        }
        if stars.brightness_min > stars.brightness_max {
            return Err(invalid(format!(
                "star brightness range {}..={} is empty",
                stars.brightness_min, stars.brightness_max
            )));
        }
        super::validate_sigma("star blur sigma", stars.blur_sigma)?;

        let clouds = &self.clouds;
        if !(clouds.base_scale.is_finite()
            && clouds.persistence.is_finite()
            && clouds.lacunarity.is_finite())
        {
            return Err(invalid("cloud scale, persistence and lacunarity must be finite"));
        }
        if !self.vignette.exponent.is_finite() || self.vignette.exponent <= 0.0 {
            return Err(invalid(format!(
                "vignette exponent must be > 0, got {}",
                self.vignette.exponent
            )));
        }

        let c = &self.composite;
        let finite = c
            .cloud_tint
            .iter()
            .chain(&c.moonlight_tint)
            .chain([&c.cloud_strength, &c.moonlight_strength])
            .all(|w| w.is_finite());
        if !finite {
            return Err(invalid("composite strengths and tints must be finite"));
        }

        super::validate_sigma("final blur sigma", self.final_blur_sigma)?;
        super::validate_quality(self.jpeg_quality)
    }
}
