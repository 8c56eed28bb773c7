//! Parameter definitions with documented semantics.
//!
//! All constants of the reference textures are extracted here with:
//! - Units (pixels, radians, 8-bit channel levels)
//! - Documented ranges and meanings
//! - `Default` impls reproducing the reference output

mod dudv;
mod glow;
mod output;
mod sky;

// Re-export all types
pub use dudv::{DuDvParams, WaveComponent, DEFAULT_WAVE_BANK};
pub use glow::GlowParams;
pub use output::OutputConfig;
pub use sky::{CloudParams, CompositeParams, SkyParams, StarParams, VignetteParams};

use crate::error::{invalid, Result};

/// JPEG quality must be a libjpeg-style percentage
pub(crate) fn validate_quality(quality: u8) -> Result<()> {
    if !(1..=100).contains(&quality) {
        return Err(invalid(format!(
            "JPEG quality must be in 1..=100, got {}",
            quality
        )));
    }
    Ok(())
}

/// Blur sigmas must be strictly positive and finite
pub(crate) fn validate_sigma(name: &str, sigma: f32) -> Result<()> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(invalid(format!("{} must be > 0, got {}", name, sigma)));
    }
    Ok(())
}
