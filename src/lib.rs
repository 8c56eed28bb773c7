//! Raintex library - procedural textures for the rain-on-water effect
//!
//! Three independent generators, each a pure function from size and
//! parameters to a pixel buffer:
//! - [`WaveDuDvGenerator`]: UV distortion map from a bank of sine waves
//! - [`RadialGlowGenerator`]: soft radial glow sprite with alpha
//! - [`SkyReflectionGenerator`]: stars, clouds and moonlight for the water reflection

pub mod cli;
pub mod dudv;
pub mod error;
pub mod glow;
pub mod output;
pub mod params;
pub mod raster;
pub mod sky;
pub mod texture;

pub use dudv::WaveDuDvGenerator;
pub use error::{Result, TextureError};
pub use glow::RadialGlowGenerator;
pub use output::{Encoding, FileSink, ImageSink};
pub use raster::Dimensions;
pub use sky::SkyReflectionGenerator;
pub use texture::TextureGenerator;
