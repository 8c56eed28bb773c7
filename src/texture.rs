//! Common interface of the three texture generators.

use std::path::Path;
use std::time::Instant;

use image::DynamicImage;

use crate::error::Result;
use crate::output::{Encoding, ImageSink};
use crate::raster::Dimensions;

/// A pure (dimensions, parameters) -> pixels generator with a fixed output encoding
pub trait TextureGenerator {
    /// Short identifier used in logs and on the command line
    fn name(&self) -> &'static str;

    /// Encoding the output file is written with
    fn encoding(&self) -> Encoding;

    /// Size used when the caller does not pick one
    fn default_dimensions(&self) -> (u32, u32);

    /// Compute the final, clamped pixel buffer
    fn render(&self, dims: Dimensions) -> Result<DynamicImage>;

    /// Validate the size, render, and hand the buffer to `sink` for `path`.
    ///
    /// Invalid dimensions are rejected before any pixel work. Sink errors
    /// propagate unchanged.
    fn generate(
        &self,
        width: u32,
        height: u32,
        path: &Path,
        sink: &dyn ImageSink,
    ) -> Result<()> {
        let dims = Dimensions::new(width, height)?;
        let start = Instant::now();

        let image = self.render(dims)?;
        log::debug!(
            "{}: rendered {} in {:.2}ms",
            self.name(),
            dims,
            start.elapsed().as_secs_f64() * 1000.0
        );

        sink.write(&image, path, self.encoding())?;
        log::info!(
            "{}: wrote {} ({}, {})",
            self.name(),
            path.display(),
            dims,
            self.encoding()
        );
        Ok(())
    }
}
