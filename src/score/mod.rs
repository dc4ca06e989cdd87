//! All-metrics scoring of region pairs.
//!
//! Each function builds the pair's geometry kernel once and reads the whole
//! suite from it. [`score_box_pairs`] fans a batch out over the rayon thread
//! pool; results come back in input order.
//!
//! # Example
//!
//! ```
//! use iouscore::geom::{BBoxXYXY, Pixel};
//! use iouscore::score::score_boxes;
//! use iouscore::MetricParams;
//!
//! let a = BBoxXYXY::<Pixel>::from_xyxy(0.0, 0.0, 2.0, 2.0);
//! let scores = score_boxes(&a, &a, &MetricParams::default());
//! assert_eq!(scores.iou, 1.0);
//! assert_eq!(scores.mpdiou, 1.0);
//! ```

mod report;

pub use report::{
    BatchReport, BoxPair, MaskPair, MaskReport, OverlapScores, PixelScores, ScoredBoxPair,
};

use rayon::prelude::*;
use tracing::debug;

use crate::boxes::BoxGeometry;
use crate::error::IouScoreError;
use crate::geom::{BBoxXYXY, Mask};
use crate::masks::MaskGeometry;
use crate::metric::MetricParams;
use crate::pixel;

/// Every box metric for one pair.
pub fn score_boxes<S>(a: &BBoxXYXY<S>, b: &BBoxXYXY<S>, params: &MetricParams) -> OverlapScores {
    OverlapScores::from_kernel(&BoxGeometry::new(a, b), params)
}

/// Every mask metric for one pair.
///
/// # Errors
/// [`IouScoreError::ShapeMismatch`] if the masks differ in shape.
pub fn score_masks(
    a: &Mask,
    b: &Mask,
    params: &MetricParams,
) -> Result<OverlapScores, IouScoreError> {
    let geometry = MaskGeometry::new(a, b)?;
    Ok(OverlapScores::from_kernel(&geometry, params))
}

/// Pixel accuracy, Dice coefficient and Hausdorff distance for one pair.
///
/// # Errors
/// [`IouScoreError::ShapeMismatch`] if the masks differ in shape.
pub fn score_pixels(a: &Mask, b: &Mask) -> Result<PixelScores, IouScoreError> {
    Ok(PixelScores {
        pixel_accuracy: pixel::pixel_accuracy(a, b)?,
        dice: pixel::dice_coefficient(a, b)?,
        hausdorff: pixel::hausdorff_distance(a, b),
    })
}

/// Overlap suite and pixel metrics for a mask pair.
pub fn score_mask_pair(
    pair: &MaskPair,
    params: &MetricParams,
) -> Result<MaskReport, IouScoreError> {
    let overlap = score_masks(&pair.a, &pair.b, params)?;
    let pixel = score_pixels(&pair.a, &pair.b)?;
    let (rows, cols) = pair.a.shape();

    Ok(MaskReport {
        rows,
        cols,
        overlap,
        pixel,
    })
}

/// Scores every pair in parallel, preserving input order, and appends the
/// per-metric mean.
pub fn score_box_pairs(pairs: &[BoxPair], params: &MetricParams) -> BatchReport {
    debug!(pairs = pairs.len(), "scoring box pairs");

    let scored: Vec<ScoredBoxPair> = pairs
        .par_iter()
        .map(|pair| ScoredBoxPair {
            id: pair.id.clone(),
            a: pair.a,
            b: pair.b,
            scores: score_boxes(&pair.a, &pair.b, params),
        })
        .collect();

    let mean = OverlapScores::mean(scored.iter().map(|pair| &pair.scores));
    debug!(pairs = scored.len(), mean_iou = ?mean.map(|m| m.iou), "batch scored");

    BatchReport {
        params: *params,
        pairs: scored,
        mean,
    }
}
