use super::PixelGrid;
use crate::error::CodecError;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

/// Turns encoded image bytes into pixel grids and back.
///
/// The diff engine never touches a file format directly; it only sees
/// what a codec hands it.
pub trait PixelCodec {
    /// Decodes `bytes` into RGBA pixels. `mime` is a format hint; without
    /// one the codec guesses from the content.
    fn decode(&self, bytes: &[u8], mime: Option<&str>) -> Result<PixelGrid, CodecError>;

    /// Encodes a grid into the codec's output format.
    fn encode(&self, grid: &PixelGrid) -> Result<Vec<u8>, CodecError>;
}

/// In-process codec backed by the `image` crate. Always encodes PNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngCodec;

impl PixelCodec for PngCodec {
    fn decode(&self, bytes: &[u8], mime: Option<&str>) -> Result<PixelGrid, CodecError> {
        let img = match mime {
            Some(mime) => {
                let format = ImageFormat::from_mime_type(mime)
                    .ok_or_else(|| CodecError::UnsupportedMime(mime.to_string()))?;
                image::load_from_memory_with_format(bytes, format)?
            }
            None => image::load_from_memory(bytes)?,
        };
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        PixelGrid::new(width, height, rgba.into_raw())
            .map_err(|e| CodecError::Malformed(e.to_string()))
    }

    fn encode(&self, grid: &PixelGrid) -> Result<Vec<u8>, CodecError> {
        let img = RgbaImage::from_raw(grid.width(), grid.height(), grid.data().to_vec())
            .ok_or_else(|| {
                CodecError::Malformed(format!(
                    "{}x{} grid does not fit its buffer",
                    grid.width(),
                    grid.height()
                ))
            })?;
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png)?;
        Ok(out.into_inner())
    }
}
