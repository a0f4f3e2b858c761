//! Error types for snapdiff.
//!
//! Text diffing is total and has no error path; everything here comes from
//! the image pipeline and the artifact writer.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which of the two compared images an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSide {
    Baseline,
    Current,
}

impl fmt::Display for ImageSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSide::Baseline => f.write_str("baseline"),
            ImageSide::Current => f.write_str("current"),
        }
    }
}

/// Errors raised by a [`PixelCodec`](crate::pixel::PixelCodec).
#[derive(Debug, Error)]
pub enum CodecError {
    /// The raster backend rejected the bytes or the pixels
    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// A mime hint named a format the codec cannot read
    #[error("unsupported image mime type: {0}")]
    UnsupportedMime(String),

    /// The backend produced a buffer that does not describe a pixel grid
    #[error("malformed pixel data: {0}")]
    Malformed(String),
}

/// Errors that can occur while diffing images or writing artifacts.
#[derive(Debug, Error)]
pub enum DiffError {
    /// One of the inputs could not be decoded into a pixel grid
    #[error("failed to decode {side} image: {source}")]
    Decode {
        side: ImageSide,
        #[source]
        source: CodecError,
    },

    /// The visualization could not be encoded
    #[error("failed to encode visualization: {0}")]
    Encode(#[source] CodecError),

    /// Threshold outside `[0, 1]` (or NaN)
    #[error("threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),

    /// RGBA buffer length does not match the declared dimensions
    #[error("pixel buffer holds {actual} bytes, {width}x{height} RGBA needs {expected}")]
    InvalidGrid {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Writing a visualization artifact failed
    #[error("failed to write artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for snapdiff operations.
pub type DiffResult<T> = Result<T, DiffError>;

impl DiffError {
    /// Wraps a codec failure for the given side.
    pub fn decode(side: ImageSide, source: CodecError) -> Self {
        Self::Decode { side, source }
    }
}
