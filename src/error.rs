//! Error taxonomy for texture synthesis and output.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TextureError>;

#[derive(Debug, Error)]
pub enum TextureError {
    /// Width or height was zero
    #[error("invalid texture dimensions {width}x{height}: both sides must be > 0")]
    InvalidDimensions { width: u32, height: u32 },

    /// A parameter struct failed validation
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub fn invalid(msg: impl Into<String>) -> TextureError {
    TextureError::InvalidParameter(msg.into())
}

pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> TextureError {
    TextureError::Io {
        path: path.into(),
        source,
    }
}
