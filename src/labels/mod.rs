//! Hand-off of mask pairs to an elementwise label-statistics facility.
//!
//! Classification-style scores (accuracy, precision, recall, F1, MAE, MSE)
//! over flattened masks are computed by an external statistics library.
//! This module flattens a mask pair into the two label sequences such a
//! library expects and defines the [`ElementwiseStats`] trait it is wrapped
//! behind.

use std::fmt;

use serde::Serialize;

use crate::error::IouScoreError;
use crate::geom::Mask;

/// Two equal-length label sequences, row-major flattened from a mask pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelSequences {
    pub truth: Vec<u8>,
    pub pred: Vec<u8>,
}

impl LabelSequences {
    /// Flattens `truth` and `pred` into `0`/`1` labels.
    ///
    /// # Errors
    /// [`IouScoreError::ShapeMismatch`] if the masks differ in shape.
    pub fn from_masks(truth: &Mask, pred: &Mask) -> Result<Self, IouScoreError> {
        if truth.shape() != pred.shape() {
            return Err(IouScoreError::shape_mismatch(truth.shape(), pred.shape()));
        }

        Ok(Self {
            truth: truth.iter().map(u8::from).collect(),
            pred: pred.iter().map(u8::from).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.truth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.truth.is_empty()
    }
}

/// Scores computed by an elementwise statistics facility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ClassificationSummary {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub mean_absolute_error: f64,
    pub mean_squared_error: f64,
}

impl fmt::Display for ClassificationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Accuracy:  {:.2}", self.accuracy)?;
        writeln!(f, "Precision: {:.2}", self.precision)?;
        writeln!(f, "Recall:    {:.2}", self.recall)?;
        writeln!(f, "F1-Score:  {:.2}", self.f1)?;
        writeln!(f, "MAE:       {:.2}", self.mean_absolute_error)?;
        writeln!(f, "MSE:       {:.2}", self.mean_squared_error)
    }
}

/// An external facility comparing two equal-length label sequences.
///
/// Implementations receive sequences of identical length; binary labels are
/// `0` and `1`, with `1` the positive class.
pub trait ElementwiseStats {
    fn compare(&self, truth: &[u8], pred: &[u8]) -> ClassificationSummary;
}

/// Flattens a mask pair and runs it through `stats`.
///
/// # Errors
/// [`IouScoreError::ShapeMismatch`] if the masks differ in shape.
pub fn classify_masks<S: ElementwiseStats + ?Sized>(
    stats: &S,
    truth: &Mask,
    pred: &Mask,
) -> Result<ClassificationSummary, IouScoreError> {
    let labels = LabelSequences::from_masks(truth, pred)?;
    Ok(stats.compare(&labels.truth, &labels.pred))
}
