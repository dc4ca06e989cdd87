//! Score report types and text formatting.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::geom::{BBoxXYXY, Mask, Pixel};
use crate::metric::{Metric, MetricParams, OverlapKernel};

/// All ten overlap metrics for one region pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct OverlapScores {
    pub iou: f64,
    pub giou: f64,
    pub diou: f64,
    pub ciou: f64,
    pub eiou: f64,
    pub focal_eiou: f64,
    pub siou: f64,
    pub alpha_iou: f64,
    pub wiou: f64,
    pub mpdiou: f64,
}

impl OverlapScores {
    /// Reads every metric from an already-built kernel.
    pub fn from_kernel<K: OverlapKernel + ?Sized>(kernel: &K, params: &MetricParams) -> Self {
        let mut values = [0.0; 10];
        for (slot, metric) in values.iter_mut().zip(Metric::ALL) {
            *slot = kernel.evaluate(metric, params);
        }
        Self::from_values(values)
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Iou => self.iou,
            Metric::Giou => self.giou,
            Metric::Diou => self.diou,
            Metric::Ciou => self.ciou,
            Metric::Eiou => self.eiou,
            Metric::FocalEiou => self.focal_eiou,
            Metric::Siou => self.siou,
            Metric::AlphaIou => self.alpha_iou,
            Metric::Wiou => self.wiou,
            Metric::Mpdiou => self.mpdiou,
        }
    }

    /// Values in [`Metric::ALL`] order.
    pub fn values(&self) -> [f64; 10] {
        Metric::ALL.map(|metric| self.get(metric))
    }

    /// Per-metric arithmetic mean, `None` for an empty input.
    pub fn mean<'a, I>(scores: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a OverlapScores>,
    {
        let mut sums = [0.0; 10];
        let mut count = 0usize;
        for score in scores {
            for (sum, value) in sums.iter_mut().zip(score.values()) {
                *sum += value;
            }
            count += 1;
        }
        if count == 0 {
            return None;
        }
        Some(Self::from_values(sums.map(|sum| sum / count as f64)))
    }

    fn from_values(values: [f64; 10]) -> Self {
        let [iou, giou, diou, ciou, eiou, focal_eiou, siou, alpha_iou, wiou, mpdiou] = values;
        Self {
            iou,
            giou,
            diou,
            ciou,
            eiou,
            focal_eiou,
            siou,
            alpha_iou,
            wiou,
            mpdiou,
        }
    }
}

impl fmt::Display for OverlapScores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for metric in Metric::ALL {
            writeln!(f, "{:<11} {:>10.6}", metric.name(), self.get(metric))?;
        }
        Ok(())
    }
}

/// Pixel-level metrics for one mask pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PixelScores {
    pub pixel_accuracy: f64,
    pub dice: f64,
    /// `f64::INFINITY` when either mask is blank; serialized as `null`.
    #[serde(serialize_with = "finite_or_null")]
    pub hausdorff: f64,
}

impl fmt::Display for PixelScores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<15} {:>10.6}", "Pixel accuracy", self.pixel_accuracy)?;
        writeln!(f, "{:<15} {:>10.6}", "Dice", self.dice)?;
        writeln!(f, "{:<15} {:>10.6}", "Hausdorff", self.hausdorff)
    }
}

fn finite_or_null<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_some(value)
    } else {
        serializer.serialize_none()
    }
}

/// Mask pair report: the overlap suite plus pixel-level metrics.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MaskReport {
    pub rows: usize,
    pub cols: usize,
    pub overlap: OverlapScores,
    pub pixel: PixelScores,
}

impl fmt::Display for MaskReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Masks: {}x{}", self.rows, self.cols)?;
        writeln!(f)?;
        write!(f, "{}", self.overlap)?;
        writeln!(f)?;
        write!(f, "{}", self.pixel)
    }
}

/// One box pair to score, optionally labelled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxPair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub a: BBoxXYXY<Pixel>,
    pub b: BBoxXYXY<Pixel>,
}

/// One mask pair to score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaskPair {
    pub a: Mask,
    pub b: Mask,
}

/// A box pair with its scores.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoredBoxPair {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub a: BBoxXYXY<Pixel>,
    pub b: BBoxXYXY<Pixel>,
    pub scores: OverlapScores,
}

/// Scores for a batch of box pairs, in input order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub params: MetricParams,
    pub pairs: Vec<ScoredBoxPair>,
    /// Per-metric mean over all pairs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<OverlapScores>,
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<12}", "pair")?;
        for metric in Metric::ALL {
            write!(f, " {:>10}", metric.name())?;
        }
        writeln!(f)?;

        for (index, pair) in self.pairs.iter().enumerate() {
            let label = pair.id.clone().unwrap_or_else(|| format!("#{}", index + 1));
            write_row(f, &label, &pair.scores)?;
        }

        if let Some(mean) = &self.mean {
            write_row(f, "mean", mean)?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "{} pair(s); gamma={}, alpha={}, weight={}",
            self.pairs.len(),
            self.params.gamma,
            self.params.alpha,
            self.params.weight
        )
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, label: &str, scores: &OverlapScores) -> fmt::Result {
    write!(f, "{label:<12}")?;
    for value in scores.values() {
        write!(f, " {value:>10.4}")?;
    }
    writeln!(f)
}
