use iouscore::boxes::{self, BoxGeometry};
use iouscore::{Metric, MetricParams, OverlapKernel};
use proptest::prelude::*;

mod proptest_helpers;

use proptest_helpers::close;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn every_metric_is_one_on_identical_boxes(a in proptest_helpers::arb_bbox()) {
        let params = MetricParams::default();
        for metric in Metric::ALL {
            prop_assert_eq!(boxes::evaluate(&a, &a, metric, &params), 1.0, "{}", metric);
        }
    }

    #[test]
    fn iou_is_a_fraction_and_bounds_giou_and_diou(
        a in proptest_helpers::arb_bbox(),
        b in proptest_helpers::arb_bbox(),
    ) {
        let geometry = BoxGeometry::new(&a, &b);
        let iou = geometry.iou();
        prop_assert!((0.0..=1.0).contains(&iou), "iou {}", iou);
        prop_assert!(geometry.giou() <= iou);
        prop_assert!(geometry.giou() >= -1.0);
        prop_assert!(geometry.diou() <= iou);
        prop_assert!(geometry.ciou() <= geometry.diou());
        prop_assert!(geometry.mpdiou() <= geometry.diou());
        prop_assert_eq!(geometry.eiou(), geometry.diou());
    }

    #[test]
    fn metrics_are_symmetric(
        a in proptest_helpers::arb_bbox(),
        b in proptest_helpers::arb_bbox(),
    ) {
        let params = MetricParams::default();
        for metric in Metric::ALL {
            let forward = boxes::evaluate(&a, &b, metric, &params);
            let backward = boxes::evaluate(&b, &a, metric, &params);
            prop_assert!(close(forward, backward), "{}: {} vs {}", metric, forward, backward);
        }
    }

    #[test]
    fn disjoint_boxes_have_zero_iou(
        (a, b) in proptest_helpers::arb_disjoint_bbox_pair(),
    ) {
        prop_assert_eq!(boxes::iou(&a, &b), 0.0);
        prop_assert!(boxes::giou(&a, &b) <= 0.0);
        prop_assert_eq!(boxes::alpha_iou(&a, &b, 0.5), 0.0);
        prop_assert_eq!(boxes::wiou(&a, &b, 3.0), 0.0);
    }

    #[test]
    fn zero_area_box_scores_zero_everywhere(
        empty in proptest_helpers::arb_zero_area_bbox(),
        b in proptest_helpers::arb_bbox(),
        gamma in 0.0f64..4.0,
        alpha in 0.0f64..4.0,
        weight in 0.0f64..4.0,
    ) {
        let params = MetricParams { gamma, alpha, weight };
        for metric in Metric::ALL {
            prop_assert_eq!(boxes::evaluate(&empty, &b, metric, &params), 0.0, "{}", metric);
            prop_assert_eq!(boxes::evaluate(&b, &empty, metric, &params), 0.0, "{}", metric);
        }
    }

    #[test]
    fn enclosing_box_contains_both(
        a in proptest_helpers::arb_bbox(),
        b in proptest_helpers::arb_bbox(),
    ) {
        let geometry = BoxGeometry::new(&a, &b);
        let enclosing = geometry.enclosing();
        for bbox in [&a, &b] {
            prop_assert!(enclosing.x1() <= bbox.x1() && enclosing.y1() <= bbox.y1());
            prop_assert!(enclosing.x2() >= bbox.x2() && enclosing.y2() >= bbox.y2());
        }
        prop_assert!(geometry.enclose_area() >= geometry.union());
        prop_assert!(geometry.center_distance() <= geometry.diagonal());
    }
}
