//! Overlap metrics for binary masks.
//!
//! The mask suite mirrors [`crate::boxes`]: IoU is the ratio of on cells in
//! both masks to on cells in either, the enclosing region is the inclusive
//! pixel extent of all on cells, and centers are centroids. Two differences
//! from the box suite:
//!
//! - the CIoU/SIoU aspect-ratio term compares the `rows / cols` ratio of the
//!   two grids, not of the regions their on cells occupy;
//! - a pair where either mask has no on cells scores `0.0` everywhere.
//!
//! Every function fails with [`IouScoreError::ShapeMismatch`] when the two
//! masks differ in shape.
//!
//! # Example
//!
//! ```
//! use iouscore::geom::Mask;
//! use iouscore::masks;
//!
//! let truth = Mask::from_rows(&[[1u8, 1, 0], [1, 1, 0], [0, 0, 0]])?;
//! let pred = Mask::from_rows(&[[0u8, 1, 1], [1, 0, 0], [0, 0, 1]])?;
//!
//! let iou = masks::iou(&truth, &pred)?;
//! assert!((iou - 1.0 / 3.0).abs() < 1e-12);
//! # Ok::<(), iouscore::IouScoreError>(())
//! ```

mod geometry;

pub use geometry::MaskGeometry;

use crate::error::IouScoreError;
use crate::geom::Mask;
use crate::metric::{Metric, MetricParams, OverlapKernel};

/// Cells on in both masks over cells on in either.
pub fn iou(a: &Mask, b: &Mask) -> Result<f64, IouScoreError> {
    Ok(MaskGeometry::new(a, b)?.iou())
}

/// Generalized IoU over the inclusive pixel extent of both masks. Below
/// `1.0` for identical masks whose on cells do not fill their extent.
pub fn giou(a: &Mask, b: &Mask) -> Result<f64, IouScoreError> {
    Ok(MaskGeometry::new(a, b)?.giou())
}

/// Distance IoU with centroid distance and the extent diagonal.
pub fn diou(a: &Mask, b: &Mask) -> Result<f64, IouScoreError> {
    Ok(MaskGeometry::new(a, b)?.diou())
}

/// Complete IoU: DIoU plus the grid aspect-ratio penalty.
pub fn ciou(a: &Mask, b: &Mask) -> Result<f64, IouScoreError> {
    Ok(MaskGeometry::new(a, b)?.ciou())
}

/// Same value as [`diou`].
pub fn eiou(a: &Mask, b: &Mask) -> Result<f64, IouScoreError> {
    Ok(MaskGeometry::new(a, b)?.eiou())
}

/// Focal-EIoU: `(1 - EIoU)^gamma * EIoU`.
pub fn focal_eiou(a: &Mask, b: &Mask, gamma: f64) -> Result<f64, IouScoreError> {
    Ok(MaskGeometry::new(a, b)?.focal_eiou(gamma))
}

/// IoU minus the grid aspect-ratio penalty.
pub fn siou(a: &Mask, b: &Mask) -> Result<f64, IouScoreError> {
    Ok(MaskGeometry::new(a, b)?.siou())
}

/// `IoU^alpha`.
pub fn alpha_iou(a: &Mask, b: &Mask, alpha: f64) -> Result<f64, IouScoreError> {
    Ok(MaskGeometry::new(a, b)?.alpha_iou(alpha))
}

/// `IoU * weight`.
pub fn wiou(a: &Mask, b: &Mask, weight: f64) -> Result<f64, IouScoreError> {
    Ok(MaskGeometry::new(a, b)?.wiou(weight))
}

/// Minimum-point-distance IoU.
pub fn mpdiou(a: &Mask, b: &Mask) -> Result<f64, IouScoreError> {
    Ok(MaskGeometry::new(a, b)?.mpdiou())
}

/// Scores the pair under `metric`.
pub fn evaluate(
    a: &Mask,
    b: &Mask,
    metric: Metric,
    params: &MetricParams,
) -> Result<f64, IouScoreError> {
    Ok(MaskGeometry::new(a, b)?.evaluate(metric, params))
}
