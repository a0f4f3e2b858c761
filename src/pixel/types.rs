use crate::error::{DiffError, DiffResult};
use crate::token::CallToken;
use serde::{Deserialize, Serialize};

/// Default fraction of the maximum RGB distance two pixels may differ by.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Decoded raster: `width * height` RGBA pixels, row-major, origin top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Wraps an RGBA buffer, checking its length against the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> DiffResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|area| area.checked_mul(4))
            .unwrap_or(usize::MAX);
        if data.len() != expected {
            return Err(DiffError::InvalidGrid {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(PixelGrid {
            width,
            height,
            data,
        })
    }

    /// A grid where every pixel is `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let area = width as usize * height as usize;
        PixelGrid {
            width,
            height,
            data: rgba.repeat(area),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// RGBA of the pixel at `(x, y)`, or `None` outside the grid.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.data[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn same_dimensions(&self, other: &PixelGrid) -> bool {
        self.width == other.width && self.height == other.height
    }
}

/// Comparison of two decoded grids, before the visualization is encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct GridDiff {
    pub total_pixels: u64,
    pub different_pixels: u64,
    pub mismatch_percentage: f64,
    pub visualization: PixelGrid,
    pub dimension_mismatch: bool,
    pub is_match: bool,
}

/// Outcome of an image diff, visualization already encoded by the codec.
///
/// `is_match` holds exactly when no pixel differs and the dimensions agree.
/// A dimension mismatch always reports every pixel as different and 100%.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDiffResult {
    pub total_pixels: u64,
    pub different_pixels: u64,
    pub mismatch_percentage: f64,
    pub visualization: Vec<u8>,
    pub dimension_mismatch: bool,
    #[serde(rename = "match")]
    pub is_match: bool,
}

/// Knobs for a byte-level image diff.
///
/// Deserializes from camelCase keys; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageDiffOptions {
    /// Fraction in `[0, 1]` of the maximum RGB distance tolerated per pixel
    pub threshold: f64,
    /// Format hint for decoding the baseline, e.g. `image/png`
    pub mime_of_baseline: Option<String>,
    /// Identifier for this call; a counter token is drawn when absent
    pub token: Option<CallToken>,
}

impl Default for ImageDiffOptions {
    fn default() -> Self {
        ImageDiffOptions {
            threshold: DEFAULT_THRESHOLD,
            mime_of_baseline: None,
            token: None,
        }
    }
}

impl ImageDiffOptions {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_baseline_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime_of_baseline = Some(mime.into());
        self
    }

    pub fn with_token(mut self, token: CallToken) -> Self {
        self.token = Some(token);
        self
    }
}
