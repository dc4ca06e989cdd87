//! Pixel-level similarity and distance between two masks.
//!
//! These metrics read the raw grids directly and do not go through
//! [`crate::masks::MaskGeometry`].

use serde::Serialize;

use crate::error::IouScoreError;
use crate::geom::Mask;

/// Fraction of cells on which the two masks agree.
///
/// # Errors
/// [`IouScoreError::ShapeMismatch`] if the masks differ in shape.
pub fn pixel_accuracy(truth: &Mask, pred: &Mask) -> Result<f64, IouScoreError> {
    ensure_same_shape(truth, pred)?;

    let total = truth.cell_count();
    if total == 0 {
        // Two zero-sized grids agree everywhere they exist.
        return Ok(1.0);
    }

    let agreeing = truth.iter().zip(pred.iter()).filter(|(t, p)| t == p).count();
    Ok(agreeing as f64 / total as f64)
}

/// Dice coefficient `2·|A∩B| / (|A|+|B|)`.
///
/// Two masks with no on cells are a perfect match and score `1.0`.
///
/// # Errors
/// [`IouScoreError::ShapeMismatch`] if the masks differ in shape.
pub fn dice_coefficient(truth: &Mask, pred: &Mask) -> Result<f64, IouScoreError> {
    ensure_same_shape(truth, pred)?;

    let intersection = truth.iter().zip(pred.iter()).filter(|&(t, p)| t && p).count();
    let total_on = truth.count_on() + pred.count_on();
    if total_on == 0 {
        return Ok(1.0);
    }

    Ok(2.0 * intersection as f64 / total_on as f64)
}

/// Result of a directed Hausdorff query.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DirectedHausdorff {
    /// Largest distance from an on cell of the source mask to its nearest
    /// on cell in the target mask. `f64::INFINITY` if either mask is blank.
    pub distance: f64,
    /// `(row, col)` in the source mask realizing `distance`.
    pub from: Option<(usize, usize)>,
    /// `(row, col)` in the target mask nearest to `from`.
    pub to: Option<(usize, usize)>,
}

impl DirectedHausdorff {
    fn undefined() -> Self {
        Self {
            distance: f64::INFINITY,
            from: None,
            to: None,
        }
    }
}

/// Directed Hausdorff distance from the on cells of `from` to the on cells
/// of `to`.
///
/// The masks may differ in shape; only on-cell coordinates are compared.
/// The inner nearest-neighbour scan stops as soon as it finds a cell closer
/// than the running maximum, since that source cell can no longer raise it.
pub fn directed_hausdorff(from: &Mask, to: &Mask) -> DirectedHausdorff {
    let sources: Vec<(usize, usize)> = from.on_cells().collect();
    let targets: Vec<(usize, usize)> = to.on_cells().collect();
    directed_between(&sources, &targets)
}

/// Symmetric Hausdorff distance: the larger of the two directed distances.
///
/// Returns `f64::INFINITY` when either mask has no on cells.
pub fn hausdorff_distance(a: &Mask, b: &Mask) -> f64 {
    let cells_a: Vec<(usize, usize)> = a.on_cells().collect();
    let cells_b: Vec<(usize, usize)> = b.on_cells().collect();
    if cells_a.is_empty() || cells_b.is_empty() {
        return f64::INFINITY;
    }

    let forward = directed_between(&cells_a, &cells_b).distance;
    let backward = directed_between(&cells_b, &cells_a).distance;
    forward.max(backward)
}

fn directed_between(sources: &[(usize, usize)], targets: &[(usize, usize)]) -> DirectedHausdorff {
    if sources.is_empty() || targets.is_empty() {
        return DirectedHausdorff::undefined();
    }

    // Squared distances stay exact integers until the final sqrt.
    let mut best: Option<(u64, (usize, usize), (usize, usize))> = None;

    for &source in sources {
        let mut nearest_sq = u64::MAX;
        let mut nearest = targets[0];

        for &target in targets {
            let d_sq = squared_distance(source, target);
            if d_sq < nearest_sq {
                nearest_sq = d_sq;
                nearest = target;
            }
            if best.is_some_and(|(best_sq, _, _)| nearest_sq < best_sq) {
                break;
            }
        }

        if best.map_or(true, |(best_sq, _, _)| nearest_sq > best_sq) {
            best = Some((nearest_sq, source, nearest));
        }
    }

    match best {
        Some((best_sq, from, to)) => DirectedHausdorff {
            distance: (best_sq as f64).sqrt(),
            from: Some(from),
            to: Some(to),
        },
        None => DirectedHausdorff::undefined(),
    }
}

fn squared_distance(a: (usize, usize), b: (usize, usize)) -> u64 {
    let dr = a.0.abs_diff(b.0) as u64;
    let dc = a.1.abs_diff(b.1) as u64;
    dr * dr + dc * dc
}

fn ensure_same_shape(a: &Mask, b: &Mask) -> Result<(), IouScoreError> {
    if a.shape() == b.shape() {
        Ok(())
    } else {
        Err(IouScoreError::shape_mismatch(a.shape(), b.shape()))
    }
}
