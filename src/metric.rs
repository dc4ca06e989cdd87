//! Shared metric vocabulary for the box and mask suites.
//!
//! Both geometry kernels implement [`OverlapKernel`]. The kernel supplies
//! the geometric terms (IoU, enclosing area, center distance, diagonal,
//! aspect ratios) and the trait layers the derived metrics on top, so that
//! Focal-EIoU, Alpha-IoU and WIoU behave identically for boxes and masks.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The ten overlap metrics shared by the box and mask suites.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    /// Intersection over union.
    Iou,
    /// IoU minus the uncovered share of the enclosing region.
    Giou,
    /// IoU minus the normalized squared center distance.
    Diou,
    /// DIoU plus a weighted aspect-ratio consistency penalty.
    Ciou,
    /// Distance-penalized IoU; the same value as DIoU.
    Eiou,
    /// EIoU reweighted by `(1 - EIoU)^gamma`.
    FocalEiou,
    /// IoU minus the aspect-ratio consistency penalty.
    Siou,
    /// IoU raised to the power `alpha`.
    AlphaIou,
    /// IoU scaled by `weight`.
    Wiou,
    /// DIoU minus the smaller of center distance and enclosing diagonal.
    Mpdiou,
}

impl Metric {
    /// Every metric, in report order.
    pub const ALL: [Metric; 10] = [
        Metric::Iou,
        Metric::Giou,
        Metric::Diou,
        Metric::Ciou,
        Metric::Eiou,
        Metric::FocalEiou,
        Metric::Siou,
        Metric::AlphaIou,
        Metric::Wiou,
        Metric::Mpdiou,
    ];

    /// Conventional display name, e.g. `"Focal-EIoU"`.
    pub fn name(self) -> &'static str {
        match self {
            Metric::Iou => "IoU",
            Metric::Giou => "GIoU",
            Metric::Diou => "DIoU",
            Metric::Ciou => "CIoU",
            Metric::Eiou => "EIoU",
            Metric::FocalEiou => "Focal-EIoU",
            Metric::Siou => "SIoU",
            Metric::AlphaIou => "Alpha-IoU",
            Metric::Wiou => "WIoU",
            Metric::Mpdiou => "MPDIoU",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tunable parameters of the parameterized metrics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricParams {
    /// Focusing exponent of Focal-EIoU.
    pub gamma: f64,
    /// Exponent of Alpha-IoU.
    pub alpha: f64,
    /// Scale factor of WIoU.
    pub weight: f64,
}

impl Default for MetricParams {
    fn default() -> Self {
        Self {
            gamma: 2.0,
            alpha: 0.5,
            weight: 1.0,
        }
    }
}

/// Geometry of one region pair, from which every overlap metric follows.
///
/// A degenerate pair (zero-area box, empty mask, zero union) scores `0.0`
/// under every metric.
pub trait OverlapKernel {
    /// True when the pair cannot be scored and every metric falls back to `0.0`.
    fn is_degenerate(&self) -> bool;

    /// Intersection over union.
    fn iou(&self) -> f64;

    /// IoU minus the share of the enclosing region covered by neither side.
    fn giou(&self) -> f64;

    /// IoU minus squared center distance over squared enclosing diagonal.
    fn diou(&self) -> f64;

    /// DIoU plus the weighted aspect-ratio penalty.
    fn ciou(&self) -> f64;

    /// IoU minus the aspect-ratio penalty.
    fn siou(&self) -> f64;

    /// DIoU minus the smaller of center distance and enclosing diagonal.
    fn mpdiou(&self) -> f64;

    /// Distance-penalized IoU. Kept as its own entry point, computed by the
    /// same routine as [`OverlapKernel::diou`].
    fn eiou(&self) -> f64 {
        self.diou()
    }

    fn focal_eiou(&self, gamma: f64) -> f64 {
        focal_weight(self.eiou(), gamma)
    }

    fn alpha_iou(&self, alpha: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        self.iou().powf(alpha)
    }

    fn wiou(&self, weight: f64) -> f64 {
        self.iou() * weight
    }

    /// Evaluates `metric`, reading its parameter from `params`.
    fn evaluate(&self, metric: Metric, params: &MetricParams) -> f64 {
        match metric {
            Metric::Iou => self.iou(),
            Metric::Giou => self.giou(),
            Metric::Diou => self.diou(),
            Metric::Ciou => self.ciou(),
            Metric::Eiou => self.eiou(),
            Metric::FocalEiou => self.focal_eiou(params.gamma),
            Metric::Siou => self.siou(),
            Metric::AlphaIou => self.alpha_iou(params.alpha),
            Metric::Wiou => self.wiou(params.weight),
            Metric::Mpdiou => self.mpdiou(),
        }
    }
}

/// `IoU - d²/c²`, or plain IoU when the enclosing diagonal is zero.
pub(crate) fn distance_penalized(iou: f64, distance: f64, diagonal: f64) -> f64 {
    if diagonal == 0.0 {
        return iou;
    }
    iou - distance.powi(2) / diagonal.powi(2)
}

/// `IoU - d²/c² - min(d, c)`, or plain IoU when the enclosing diagonal is zero.
pub(crate) fn min_point_distance_penalized(iou: f64, distance: f64, diagonal: f64) -> f64 {
    if diagonal == 0.0 {
        return iou;
    }
    distance_penalized(iou, distance, diagonal) - distance.min(diagonal)
}

/// `IoU - (d²/c² + α·v)` with `α = v / (1 - IoU + v)`, zero when that
/// denominator vanishes.
pub(crate) fn complete_penalized(iou: f64, distance: f64, diagonal: f64, v: f64) -> f64 {
    if diagonal == 0.0 {
        return iou;
    }
    let denominator = 1.0 - iou + v;
    let tradeoff = if denominator == 0.0 {
        0.0
    } else {
        v / denominator
    };
    iou - (distance.powi(2) / diagonal.powi(2) + tradeoff * v)
}

/// Aspect-ratio consistency `v = (4/π²)(atan(r1) - atan(r2))²`.
pub(crate) fn aspect_consistency(ratio_a: f64, ratio_b: f64) -> f64 {
    4.0 / PI.powi(2) * (ratio_a.atan() - ratio_b.atan()).powi(2)
}

/// `(1 - e)^γ · e`, pinned to exactly `1.0` at full overlap.
pub(crate) fn focal_weight(eiou: f64, gamma: f64) -> f64 {
    if eiou == 1.0 {
        return 1.0;
    }
    (1.0 - eiou).powf(gamma) * eiou
}
