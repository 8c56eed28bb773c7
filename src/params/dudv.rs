//! Wave bank and DuDv map parameters.

use crate::error::{invalid, Result};

/// A single sinusoidal contributor to the UV offset field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveComponent {
    /// Peak offset contributed by this wave (UV units, before normalization)
    pub amplitude: f64,

    /// Phase advance per pixel along X (radians per pixel)
    pub frequency_x: f64,

    /// Phase advance per pixel along Y (radians per pixel)
    pub frequency_y: f64,

    /// Phase offset (radians)
    pub phase: f64,

    /// Projection angle onto the U/V axes (radians, 0 = pure U)
    pub direction: f64,
}

impl WaveComponent {
    pub const fn new(
        amplitude: f64,
        frequency_x: f64,
        frequency_y: f64,
        phase: f64,
        direction: f64,
    ) -> Self {
        Self {
            amplitude,
            frequency_x,
            frequency_y,
            phase,
            direction,
        }
    }

    fn is_finite(&self) -> bool {
        [
            self.amplitude,
            self.frequency_x,
            self.frequency_y,
            self.phase,
            self.direction,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// The fixed wave bank of the reference water distortion.
///
/// Order is preserved for bit-for-bit reproducibility of the summation.
pub const DEFAULT_WAVE_BANK: [WaveComponent; 8] = [
    WaveComponent::new(0.03, 0.01, 0.03, 0.0, 0.0),
    WaveComponent::new(0.02, 0.02, 0.01, 1.5, 0.7),
    WaveComponent::new(0.01, 0.04, 0.02, 3.0, 1.5),
    WaveComponent::new(0.02, 0.03, 0.02, 0.5, 2.2),
    WaveComponent::new(0.01, 0.01, 0.04, 2.0, 3.0),
    WaveComponent::new(0.02, 0.02, 0.02, 4.0, 3.9),
    WaveComponent::new(0.01, 0.03, 0.01, 1.0, 4.5),
    WaveComponent::new(0.02, 0.01, 0.03, 2.5, 5.2),
];

/// DuDv (UV distortion) map parameters
#[derive(Debug, Clone)]
pub struct DuDvParams {
    /// Default output width (pixels)
    pub width: u32,

    /// Default output height (pixels)
    pub height: u32,

    /// Waves summed into the offset field
    pub waves: Vec<WaveComponent>,

    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
}

impl Default for DuDvParams {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            waves: DEFAULT_WAVE_BANK.to_vec(),
            jpeg_quality: 95,
        }
    }
}

impl DuDvParams {
    pub fn validate(&self) -> Result<()> {
        if let Some(i) = self.waves.iter().position(|w| !w.is_finite()) {
            return Err(invalid(format!("wave component {} is not finite", i)));
        }
        super::validate_quality(self.jpeg_quality)
    }
}
