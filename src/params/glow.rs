//! Raindrop glow sprite parameters.

use crate::error::{invalid, Result};

/// Radial glow sprite parameters
#[derive(Debug, Clone)]
pub struct GlowParams {
    /// Default output width (pixels)
    pub width: u32,

    /// Default output height (pixels)
    pub height: u32,

    /// Exponential falloff rate: intensity = exp(-falloff * r²), r normalized to [0, 1)
    pub falloff: f64,

    /// Gaussian blur applied to color and alpha after rasterizing (pixels)
    pub blur_sigma: f32,
}

impl Default for GlowParams {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            falloff: 4.0,
            blur_sigma: 1.0,
        }
    }
}

impl GlowParams {
    pub fn validate(&self) -> Result<()> {
        if !self.falloff.is_finite() || self.falloff < 0.0 {
            return Err(invalid(format!(
                "glow falloff must be finite and >= 0, got {}",
                self.falloff
            )));
        }
        super::validate_sigma("glow blur sigma", self.blur_sigma)
    }
}
