//! Overlap metrics for axis-aligned bounding boxes.
//!
//! Every function here builds a [`BoxGeometry`] for the pair and reads one
//! metric from it. When scoring one pair under several metrics, build the
//! geometry once and call the [`OverlapKernel`] methods on it instead.
//!
//! A box with zero area on either side scores `0.0` under every metric.
//!
//! # Example
//!
//! ```
//! use iouscore::boxes;
//! use iouscore::geom::{BBoxXYXY, Pixel};
//!
//! let a = BBoxXYXY::<Pixel>::from_xyxy(0.0, 0.0, 2.0, 2.0);
//! let b = BBoxXYXY::<Pixel>::from_xyxy(3.0, 3.0, 5.0, 5.0);
//!
//! assert_eq!(boxes::iou(&a, &b), 0.0);
//! assert!((boxes::giou(&a, &b) + 0.68).abs() < 1e-12);
//! ```

mod geometry;

pub use geometry::BoxGeometry;

use crate::geom::BBoxXYXY;
use crate::metric::{Metric, MetricParams, OverlapKernel};

/// Intersection over union.
pub fn iou<S>(a: &BBoxXYXY<S>, b: &BBoxXYXY<S>) -> f64 {
    BoxGeometry::new(a, b).iou()
}

/// Generalized IoU: IoU minus the share of the enclosing rectangle covered
/// by neither box.
pub fn giou<S>(a: &BBoxXYXY<S>, b: &BBoxXYXY<S>) -> f64 {
    BoxGeometry::new(a, b).giou()
}

/// Distance IoU: IoU minus squared center distance over squared enclosing
/// diagonal.
pub fn diou<S>(a: &BBoxXYXY<S>, b: &BBoxXYXY<S>) -> f64 {
    BoxGeometry::new(a, b).diou()
}

/// Complete IoU: the DIoU penalty plus a weighted aspect-ratio penalty.
///
/// Falls back to plain IoU when either box has zero height.
pub fn ciou<S>(a: &BBoxXYXY<S>, b: &BBoxXYXY<S>) -> f64 {
    BoxGeometry::new(a, b).ciou()
}

/// Efficient IoU. Carries only the center-distance penalty, so it equals
/// [`diou`].
pub fn eiou<S>(a: &BBoxXYXY<S>, b: &BBoxXYXY<S>) -> f64 {
    BoxGeometry::new(a, b).eiou()
}

/// Focal-EIoU: `(1 - EIoU)^gamma * EIoU`, exactly `1.0` at full overlap.
pub fn focal_eiou<S>(a: &BBoxXYXY<S>, b: &BBoxXYXY<S>, gamma: f64) -> f64 {
    BoxGeometry::new(a, b).focal_eiou(gamma)
}

/// SCYLLA IoU as used here: IoU minus the aspect-ratio penalty.
pub fn siou<S>(a: &BBoxXYXY<S>, b: &BBoxXYXY<S>) -> f64 {
    BoxGeometry::new(a, b).siou()
}

/// `IoU^alpha`.
pub fn alpha_iou<S>(a: &BBoxXYXY<S>, b: &BBoxXYXY<S>, alpha: f64) -> f64 {
    BoxGeometry::new(a, b).alpha_iou(alpha)
}

/// `IoU * weight`.
pub fn wiou<S>(a: &BBoxXYXY<S>, b: &BBoxXYXY<S>, weight: f64) -> f64 {
    BoxGeometry::new(a, b).wiou(weight)
}

/// Minimum-point-distance IoU: the DIoU value minus the smaller of the
/// center distance and the enclosing diagonal.
pub fn mpdiou<S>(a: &BBoxXYXY<S>, b: &BBoxXYXY<S>) -> f64 {
    BoxGeometry::new(a, b).mpdiou()
}

/// Scores the pair under `metric`.
pub fn evaluate<S>(
    a: &BBoxXYXY<S>,
    b: &BBoxXYXY<S>,
    metric: Metric,
    params: &MetricParams,
) -> f64 {
    BoxGeometry::new(a, b).evaluate(metric, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Pixel;

    const EPS: f64 = 1e-9;

    fn bx(x1: f64, y1: f64, x2: f64, y2: f64) -> BBoxXYXY<Pixel> {
        BBoxXYXY::from_xyxy(x1, y1, x2, y2)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn complete_overlap_scores_one_everywhere() {
        let a = bx(0.0, 0.0, 2.0, 2.0);
        let params = MetricParams::default();
        for metric in Metric::ALL {
            assert_eq!(evaluate(&a, &a, metric, &params), 1.0, "{metric}");
        }
    }

    #[test]
    fn disjoint_boxes() {
        let a = bx(0.0, 0.0, 2.0, 2.0);
        let b = bx(3.0, 3.0, 5.0, 5.0);
        assert_eq!(iou(&a, &b), 0.0);
        assert_close(giou(&a, &b), -0.68);
        // d = 3√2, c = 5√2
        assert_close(diou(&a, &b), -0.36);
        assert_close(eiou(&a, &b), -0.36);
        assert_close(ciou(&a, &b), -0.36);
        assert_close(focal_eiou(&a, &b, 2.0), -0.665856);
        assert_eq!(siou(&a, &b), 0.0);
        assert_eq!(alpha_iou(&a, &b, 0.5), 0.0);
        assert_close(mpdiou(&a, &b), -0.36 - 3.0 * 2f64.sqrt());
    }

    #[test]
    fn partial_overlap() {
        let a = bx(0.0, 0.0, 2.0, 2.0);
        let b = bx(1.0, 1.0, 3.0, 3.0);
        assert_close(iou(&a, &b), 1.0 / 7.0);
        assert_close(giou(&a, &b), 1.0 / 7.0 - 2.0 / 9.0);
        assert_close(diou(&a, &b), 1.0 / 7.0 - 2.0 / 18.0);
        // Same aspect ratio: no CIoU or SIoU penalty.
        assert_close(ciou(&a, &b), diou(&a, &b));
        assert_close(siou(&a, &b), iou(&a, &b));
        assert_close(alpha_iou(&a, &b, 0.5), (1.0f64 / 7.0).sqrt());
        assert_close(wiou(&a, &b, 3.0), 3.0 / 7.0);
        assert_close(mpdiou(&a, &b), -1.382467530627);
    }

    #[test]
    fn different_shapes_pay_aspect_penalty() {
        let a = bx(0.0, 0.0, 2.0, 3.0);
        let b = bx(1.0, 0.0, 3.0, 2.0);
        assert_close(iou(&a, &b), 0.25);
        assert_close(giou(&a, &b), 0.138888888889);
        assert_close(diou(&a, &b), 0.180555555556);
        assert_close(ciou(&a, &b), 0.180229899447);
        assert_close(siou(&a, &b), 0.234208077461);
        assert_close(focal_eiou(&a, &b, 2.0), 0.12124110511);
        assert_close(mpdiou(&a, &b), -0.937478433194);
    }

    #[test]
    fn nested_boxes_share_a_center() {
        let inner = bx(1.0, 1.0, 2.0, 2.0);
        let outer = bx(0.0, 0.0, 3.0, 3.0);
        let expected = 1.0 / 9.0;
        assert_close(iou(&inner, &outer), expected);
        assert_close(giou(&inner, &outer), expected);
        assert_close(diou(&inner, &outer), expected);
        assert_close(mpdiou(&inner, &outer), expected);
        assert_close(focal_eiou(&inner, &outer, 2.0), 0.087791495199);
    }

    #[test]
    fn touching_edges() {
        let a = bx(0.0, 0.0, 2.0, 2.0);
        let b = bx(2.0, 2.0, 4.0, 4.0);
        assert_eq!(iou(&a, &b), 0.0);
        assert_close(giou(&a, &b), -0.5);
        assert_close(diou(&a, &b), -0.25);
        assert_close(focal_eiou(&a, &b, 2.0), -0.390625);
    }

    #[test]
    fn zero_area_box_scores_zero_everywhere() {
        let empty = bx(0.0, 0.0, 0.0, 0.0);
        let b = bx(1.0, 1.0, 2.0, 2.0);
        let params = MetricParams::default();
        for metric in Metric::ALL {
            assert_eq!(evaluate(&empty, &b, metric, &params), 0.0, "{metric}");
            assert_eq!(evaluate(&b, &empty, metric, &params), 0.0, "{metric}");
        }
    }

    #[test]
    fn alpha_zero_on_degenerate_pair_stays_zero() {
        let empty = bx(0.0, 0.0, 0.0, 0.0);
        let b = bx(1.0, 1.0, 2.0, 2.0);
        assert_eq!(alpha_iou(&empty, &b, 0.0), 0.0);
    }

    #[test]
    fn normalized_boxes_score_like_their_pixel_scaling() {
        use crate::geom::Normalized;

        let a = BBoxXYXY::<Normalized>::from_xyxy(0.0, 0.0, 0.5, 0.5);
        let b = BBoxXYXY::<Normalized>::from_xyxy(0.25, 0.25, 0.75, 0.75);
        let (pa, pb) = (bx(0.0, 0.0, 2.0, 2.0), bx(1.0, 1.0, 3.0, 3.0));
        assert_close(iou(&a, &b), 1.0 / 7.0);
        assert_close(giou(&a, &b), giou(&pa, &pb));
        assert_close(diou(&a, &b), diou(&pa, &pb));
    }

    #[test]
    fn eiou_matches_diou() {
        let a = bx(0.0, 0.0, 2.0, 2.0);
        let b = bx(0.5, 0.5, 2.5, 2.5);
        assert_eq!(eiou(&a, &b), diou(&a, &b));
        assert_close(eiou(&a, &b), 0.351304347826);
    }

    #[test]
    fn parameters_flow_through_evaluate() {
        let a = bx(0.0, 0.0, 4.0, 4.0);
        let b = bx(1.0, 1.0, 3.0, 3.0);
        let params = MetricParams {
            gamma: 1.0,
            alpha: 2.0,
            weight: 0.5,
        };
        assert_close(evaluate(&a, &b, Metric::FocalEiou, &params), 0.75 * 0.25);
        assert_close(evaluate(&a, &b, Metric::AlphaIou, &params), 0.0625);
        assert_close(evaluate(&a, &b, Metric::Wiou, &params), 0.125);
    }
}
