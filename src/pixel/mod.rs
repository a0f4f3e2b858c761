//! Pixel-level image comparison.
//!
//! Two grids of equal size are compared pixel by pixel on their RGB
//! channels. Every pixel of the visualization is either opaque red (the
//! pixels differ beyond the threshold) or the baseline pixel dimmed to 30%.
//! Grids of different sizes are a total mismatch.

mod codec;
mod types;

pub use codec::*;
pub use types::*;

use crate::error::{DiffError, DiffResult, ImageSide};
use crate::token::CallToken;

const MISMATCH_RGBA: [u8; 4] = [255, 0, 0, 255];

/// Compares two decoded grids.
///
/// `threshold` is the fraction of the largest possible RGB distance
/// (`255 * sqrt(3)`) two pixels may differ by and still count as equal.
pub fn diff_grids(baseline: &PixelGrid, current: &PixelGrid, threshold: f64) -> DiffResult<GridDiff> {
    check_threshold(threshold)?;

    if !baseline.same_dimensions(current) {
        let total = baseline.area().max(current.area());
        tracing::warn!(
            baseline_width = baseline.width(),
            baseline_height = baseline.height(),
            current_width = current.width(),
            current_height = current.height(),
            "image dimensions differ"
        );
        return Ok(GridDiff {
            total_pixels: total,
            different_pixels: total,
            mismatch_percentage: 100.0,
            visualization: PixelGrid::filled(1, 1, MISMATCH_RGBA),
            dimension_mismatch: true,
            is_match: false,
        });
    }

    let max_distance = threshold * 255.0 * 3f64.sqrt();
    let mut out = vec![0u8; baseline.data().len()];
    let different = paint(baseline.data(), current.data(), &mut out, max_distance);
    let total = baseline.area();

    Ok(GridDiff {
        total_pixels: total,
        different_pixels: different,
        mismatch_percentage: percentage(different, total),
        visualization: PixelGrid::new(baseline.width(), baseline.height(), out)?,
        dimension_mismatch: false,
        is_match: different == 0,
    })
}

fn check_threshold(threshold: f64) -> DiffResult<()> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(DiffError::InvalidThreshold(threshold))
    }
}

/// Share of different pixels, rounded to two decimals.
fn percentage(different: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (different as f64 / total as f64 * 10000.0).round() / 100.0
}

fn dim(channel: u8) -> u8 {
    ((u16::from(channel) * 3 + 5) / 10) as u8
}

/// Writes one visualization pixel; returns whether the pixels differ.
fn paint_pixel(out: &mut [u8], a: &[u8], b: &[u8], max_distance: f64) -> bool {
    let dr = i32::from(a[0]) - i32::from(b[0]);
    let dg = i32::from(a[1]) - i32::from(b[1]);
    let db = i32::from(a[2]) - i32::from(b[2]);
    let distance = f64::from(dr * dr + dg * dg + db * db).sqrt();

    if distance > max_distance {
        out.copy_from_slice(&MISMATCH_RGBA);
        true
    } else {
        out[0] = dim(a[0]);
        out[1] = dim(a[1]);
        out[2] = dim(a[2]);
        out[3] = 255;
        false
    }
}

#[cfg(not(feature = "parallel"))]
fn paint(a: &[u8], b: &[u8], out: &mut [u8], max_distance: f64) -> u64 {
    out.chunks_exact_mut(4)
        .zip(a.chunks_exact(4))
        .zip(b.chunks_exact(4))
        .map(|((o, a), b)| u64::from(paint_pixel(o, a, b, max_distance)))
        .sum()
}

#[cfg(feature = "parallel")]
fn paint(a: &[u8], b: &[u8], out: &mut [u8], max_distance: f64) -> u64 {
    use rayon::prelude::*;

    out.par_chunks_exact_mut(4)
        .zip(a.par_chunks_exact(4))
        .zip(b.par_chunks_exact(4))
        .map(|((o, a), b)| u64::from(paint_pixel(o, a, b, max_distance)))
        .sum()
}

/// Byte-level image differ: decode, compare, encode the visualization.
#[derive(Debug, Clone, Default)]
pub struct ImageDiffer<C = PngCodec> {
    codec: C,
}

impl<C: PixelCodec> ImageDiffer<C> {
    pub fn new(codec: C) -> Self {
        ImageDiffer { codec }
    }

    /// Diffs two encoded images.
    ///
    /// Fails without a partial result if either side cannot be decoded.
    pub fn diff(
        &self,
        baseline: &[u8],
        current: &[u8],
        options: &ImageDiffOptions,
    ) -> DiffResult<ImageDiffResult> {
        check_threshold(options.threshold)?;
        let token = options.token.unwrap_or_else(CallToken::next);
        let span = tracing::debug_span!("image_diff", token = %token);
        let _enter = span.enter();

        let baseline = self
            .codec
            .decode(baseline, options.mime_of_baseline.as_deref())
            .map_err(|e| DiffError::decode(ImageSide::Baseline, e))?;
        let current = self
            .codec
            .decode(current, None)
            .map_err(|e| DiffError::decode(ImageSide::Current, e))?;

        let grid = diff_grids(&baseline, &current, options.threshold)?;
        let visualization = self
            .codec
            .encode(&grid.visualization)
            .map_err(DiffError::Encode)?;

        tracing::debug!(
            width = baseline.width(),
            height = baseline.height(),
            different_pixels = grid.different_pixels,
            mismatch_percentage = grid.mismatch_percentage,
            "computed image diff"
        );

        Ok(ImageDiffResult {
            total_pixels: grid.total_pixels,
            different_pixels: grid.different_pixels,
            mismatch_percentage: grid.mismatch_percentage,
            visualization,
            dimension_mismatch: grid.dimension_mismatch,
            is_match: grid.is_match,
        })
    }
}

/// Diffs two encoded images with the in-process [`PngCodec`].
pub fn diff_images(
    baseline: &[u8],
    current: &[u8],
    options: &ImageDiffOptions,
) -> DiffResult<ImageDiffResult> {
    ImageDiffer::new(PngCodec).diff(baseline, current, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid(width: u32, height: u32, pixels: &[[u8; 4]]) -> PixelGrid {
        PixelGrid::new(width, height, pixels.concat()).unwrap()
    }

    fn grid_strategy() -> impl Strategy<Value = (PixelGrid, PixelGrid)> {
        (1u32..6, 1u32..6).prop_flat_map(|(w, h)| {
            let len = (w * h * 4) as usize;
            (
                prop::collection::vec(any::<u8>(), len),
                prop::collection::vec(any::<u8>(), len),
            )
                .prop_map(move |(a, b)| {
                    (
                        PixelGrid::new(w, h, a).unwrap(),
                        PixelGrid::new(w, h, b).unwrap(),
                    )
                })
        })
    }

    proptest! {
        #[test]
        fn test_stricter_threshold_never_reduces_mismatch(
            (a, b) in grid_strategy(),
            loose in 0.0f64..=1.0,
            factor in 0.0f64..=1.0,
        ) {
            let strict = loose * factor;
            let loose_diff = diff_grids(&a, &b, loose).unwrap();
            let strict_diff = diff_grids(&a, &b, strict).unwrap();
            prop_assert!(strict_diff.different_pixels >= loose_diff.different_pixels);
            prop_assert!(strict_diff.mismatch_percentage >= loose_diff.mismatch_percentage);
        }

        #[test]
        fn test_identical_grids_match((a, _) in grid_strategy(), threshold in 0.0f64..=1.0) {
            let result = diff_grids(&a, &a, threshold).unwrap();
            prop_assert!(result.is_match);
            prop_assert_eq!(result.different_pixels, 0);
            prop_assert_eq!(result.mismatch_percentage, 0.0);
            prop_assert!(!result.dimension_mismatch);
        }
    }

    #[test]
    fn test_visualization_colors() {
        let baseline = grid(2, 1, &[[100, 200, 50, 128], [0, 0, 0, 255]]);
        let current = grid(2, 1, &[[100, 200, 50, 0], [255, 255, 255, 255]]);
        let result = diff_grids(&baseline, &current, DEFAULT_THRESHOLD).unwrap();

        assert_eq!(result.total_pixels, 2);
        assert_eq!(result.different_pixels, 1);
        assert_eq!(result.mismatch_percentage, 50.0);
        assert!(!result.is_match);
        assert_eq!(result.visualization.pixel(0, 0), Some([30, 60, 15, 255]));
        assert_eq!(result.visualization.pixel(1, 0), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_alpha_is_ignored() {
        let baseline = grid(1, 1, &[[10, 10, 10, 255]]);
        let current = grid(1, 1, &[[10, 10, 10, 0]]);
        let result = diff_grids(&baseline, &current, 0.0).unwrap();
        assert!(result.is_match);
    }

    #[test]
    fn test_threshold_boundary() {
        let baseline = grid(1, 1, &[[0, 0, 0, 255]]);
        let current = grid(1, 1, &[[10, 0, 0, 255]]);

        // 0.1 tolerates ~44.2, 0.02 only ~8.8
        assert_eq!(diff_grids(&baseline, &current, 0.1).unwrap().different_pixels, 0);
        assert_eq!(diff_grids(&baseline, &current, 0.02).unwrap().different_pixels, 1);
        assert_eq!(diff_grids(&baseline, &current, 0.0).unwrap().different_pixels, 1);
    }

    #[test]
    fn test_percentage_rounds_to_two_decimals() {
        let baseline = grid(3, 1, &[[0, 0, 0, 255]; 3]);
        let one = grid(3, 1, &[[255, 255, 255, 255], [0, 0, 0, 255], [0, 0, 0, 255]]);
        let two = grid(3, 1, &[[255, 255, 255, 255], [255, 255, 255, 255], [0, 0, 0, 255]]);

        assert_eq!(diff_grids(&baseline, &one, 0.1).unwrap().mismatch_percentage, 33.33);
        assert_eq!(diff_grids(&baseline, &two, 0.1).unwrap().mismatch_percentage, 66.67);
    }

    #[test]
    fn test_dimension_mismatch() {
        let small = PixelGrid::filled(2, 2, [0, 0, 0, 255]);
        let large = PixelGrid::filled(3, 2, [0, 0, 0, 255]);
        let result = diff_grids(&small, &large, 0.1).unwrap();

        assert!(result.dimension_mismatch);
        assert!(!result.is_match);
        assert_eq!(result.total_pixels, 6);
        assert_eq!(result.different_pixels, 6);
        assert_eq!(result.mismatch_percentage, 100.0);
        assert_eq!(result.visualization, PixelGrid::filled(1, 1, [255, 0, 0, 255]));
    }

    #[test]
    fn test_invalid_threshold() {
        let a = PixelGrid::filled(1, 1, [0, 0, 0, 255]);
        for bad in [-0.1, 1.5, f64::NAN] {
            assert!(matches!(
                diff_grids(&a, &a, bad),
                Err(DiffError::InvalidThreshold(_))
            ));
        }
    }

    #[test]
    fn test_grid_rejects_short_buffer() {
        let err = PixelGrid::new(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            DiffError::InvalidGrid {
                expected: 16,
                actual: 15,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_grids_match() {
        let a = PixelGrid::new(0, 0, vec![]).unwrap();
        let result = diff_grids(&a, &a, 0.1).unwrap();
        assert_eq!(result.total_pixels, 0);
        assert_eq!(result.mismatch_percentage, 0.0);
        assert!(result.is_match);
    }
}
