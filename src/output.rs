//! Writing pixel buffers to image files.
//!
//! Generators only see the [`ImageSink`] capability. [`FileSink`] is the
//! filesystem implementation: it creates the parent directory and replaces the
//! target atomically, so a failed run never leaves a truncated image behind.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageEncoder, ImageError};
use tempfile::{Builder, NamedTempFile};

use crate::error::{self, Result, TextureError};

/// File encoding for a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Lossy, 3-channel, alpha dropped
    Jpeg { quality: u8 },

    /// Lossless, channel layout of the buffer preserved (including alpha)
    Png,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Jpeg { quality } => write!(f, "JPEG q{}, 24-bit", quality),
            Encoding::Png => write!(f, "PNG, lossless"),
        }
    }
}

/// Encode an image into an in-memory file
pub fn encode(
    image: &DynamicImage,
    encoding: Encoding,
) -> std::result::Result<Vec<u8>, ImageError> {
    let mut bytes = Vec::new();
    let (width, height) = (image.width(), image.height());

    match encoding {
        Encoding::Jpeg { quality } => {
            let rgb = image.to_rgb8();
            JpegEncoder::new_with_quality(&mut bytes, quality).write_image(
                rgb.as_raw(),
                width,
                height,
                image::ExtendedColorType::Rgb8,
            )?;
        }
        Encoding::Png => {
            PngEncoder::new(&mut bytes).write_image(
                image.as_bytes(),
                width,
                height,
                image.color().into(),
            )?;
        }
    }

    Ok(bytes)
}

/// Temporary file next to the target, created with the mode a plain
/// `File::create` would get (0o666 less the umask) instead of 0o600
fn staging_file(dir: &Path) -> io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

/// Capability to persist a pixel buffer as an image
pub trait ImageSink {
    fn write(&self, image: &DynamicImage, path: &Path, encoding: Encoding) -> Result<()>;
}

/// Writes images to the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSink;

impl ImageSink for FileSink {
    fn write(&self, image: &DynamicImage, path: &Path, encoding: Encoding) -> Result<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| error::io(parent, e))?;

        let bytes = encode(image, encoding).map_err(|source| TextureError::Encode {
            path: path.to_path_buf(),
            source,
        })?;

        // Same directory as the target so the final rename cannot cross filesystems
        let mut tmp = staging_file(parent).map_err(|e| error::io(parent, e))?;
        tmp.write_all(&bytes).map_err(|e| error::io(path, e))?;
        tmp.as_file().sync_all().map_err(|e| error::io(path, e))?;
        tmp.persist(path).map_err(|e| error::io(path, e.error))?;

        log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{ColorType, Rgb, RgbImage, Rgba, RgbaImage};
    use std::cell::RefCell;
    use std::path::PathBuf;

    /// Keeps written images in memory
    #[derive(Default)]
    pub(crate) struct MemorySink {
        pub(crate) written: RefCell<Vec<(PathBuf, DynamicImage, Encoding)>>,
    }

    impl ImageSink for MemorySink {
        fn write(&self, image: &DynamicImage, path: &Path, encoding: Encoding) -> Result<()> {
            self.written
                .borrow_mut()
                .push((path.to_path_buf(), image.clone(), encoding));
            Ok(())
        }
    }

    #[test]
    fn test_jpeg_round_trip_is_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/map.jpg");
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(12, 7, Rgb([20, 40, 90])));

        FileSink
            .write(&image, &path, Encoding::Jpeg { quality: 95 })
            .unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (12, 7));
        assert_eq!(decoded.color(), ColorType::Rgb8);
    }

    #[test]
    fn test_png_round_trip_keeps_alpha_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glow.png");
        let rgba = RgbaImage::from_fn(5, 4, |x, y| {
            Rgba([x as u8 * 50, y as u8 * 60, 7, (x + y) as u8 * 30])
        });

        FileSink
            .write(&DynamicImage::ImageRgba8(rgba.clone()), &path, Encoding::Png)
            .unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.color(), ColorType::Rgba8);
        assert_eq!(decoded.to_rgba8(), rgba);
    }

    #[test]
    fn test_write_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("only.png");
        let image = DynamicImage::ImageRgb8(RgbImage::new(3, 3));

        FileSink.write(&image, &path, Encoding::Png).unwrap();
        FileSink.write(&image, &path, Encoding::Png).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_written_file_has_default_create_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.jpg");
        let plain = dir.path().join("plain.bin");
        fs::write(&plain, b"x").unwrap();

        let image = DynamicImage::ImageRgb8(RgbImage::new(4, 4));
        FileSink
            .write(&image, &path, Encoding::Jpeg { quality: 95 })
            .unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(path.as_path()), mode(plain.as_path()));
    }

    #[test]
    fn test_failed_rename_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        // A directory squatting on the target name makes the final rename fail
        let target = dir.path().join("glow.png");
        fs::create_dir(&target).unwrap();

        let image = DynamicImage::ImageRgba8(RgbaImage::new(3, 3));
        let err = FileSink.write(&image, &target, Encoding::Png).unwrap_err();
        assert!(matches!(err, TextureError::Io { .. }));

        assert!(target.is_dir());
        assert_eq!(fs::read_dir(&target).unwrap().count(), 0);
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("glow.png")]);
    }

    #[test]
    fn test_unwritable_parent_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, b"file").unwrap();

        let image = DynamicImage::ImageRgb8(RgbImage::new(2, 2));
        let err = FileSink
            .write(&image, &blocker.join("map.jpg"), Encoding::Jpeg { quality: 95 })
            .unwrap_err();
        assert!(matches!(err, TextureError::Io { .. }));
    }

    #[test]
    fn test_encoding_display() {
        assert_eq!(Encoding::Jpeg { quality: 95 }.to_string(), "JPEG q95, 24-bit");
        assert_eq!(Encoding::Png.to_string(), "PNG, lossless");
    }
}
