//! Per-pair geometry for bounding boxes.

use tracing::trace;

use crate::geom::BBoxXYXY;
use crate::metric::{
    aspect_consistency, complete_penalized, distance_penalized, min_point_distance_penalized,
    OverlapKernel,
};

/// Geometric terms shared by every box metric, computed once per pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxGeometry<TSpace> {
    intersection: f64,
    union: f64,
    enclosing: BBoxXYXY<TSpace>,
    center_distance: f64,
    diagonal: f64,
    /// `width / height` of each box; `None` if either height is zero.
    aspect_ratios: Option<(f64, f64)>,
    degenerate: bool,
}

impl<TSpace> BoxGeometry<TSpace> {
    /// Derives the geometry of the pair `(a, b)`.
    pub fn new(a: &BBoxXYXY<TSpace>, b: &BBoxXYXY<TSpace>) -> Self {
        let intersection = a.intersection_area(b);
        let area_a = a.area();
        let area_b = b.area();
        let union = area_a + area_b - intersection;

        let enclosing = a.enclose(b);
        let diagonal = enclosing.diagonal();
        let center_distance = a.center().distance_to(&b.center());

        let aspect_ratios = if a.height() == 0.0 || b.height() == 0.0 {
            None
        } else {
            Some((a.width() / a.height(), b.width() / b.height()))
        };

        let degenerate = area_a == 0.0 || area_b == 0.0;
        if degenerate {
            trace!(?a, ?b, "zero-area box, metrics fall back to 0.0");
        }

        Self {
            intersection,
            union,
            enclosing,
            center_distance,
            diagonal,
            aspect_ratios,
            degenerate,
        }
    }

    #[inline]
    pub fn intersection(&self) -> f64 {
        self.intersection
    }

    #[inline]
    pub fn union(&self) -> f64 {
        self.union
    }

    /// Smallest rectangle containing both boxes.
    #[inline]
    pub fn enclosing(&self) -> &BBoxXYXY<TSpace> {
        &self.enclosing
    }

    #[inline]
    pub fn enclose_area(&self) -> f64 {
        self.enclosing.area()
    }

    /// Distance between the two box centers.
    #[inline]
    pub fn center_distance(&self) -> f64 {
        self.center_distance
    }

    /// Diagonal length of the enclosing rectangle.
    #[inline]
    pub fn diagonal(&self) -> f64 {
        self.diagonal
    }

    /// Aspect-ratio consistency term, `None` if either box has zero height.
    fn aspect_penalty(&self) -> Option<f64> {
        self.aspect_ratios
            .map(|(ratio_a, ratio_b)| aspect_consistency(ratio_a, ratio_b))
    }
}

impl<TSpace> OverlapKernel for BoxGeometry<TSpace> {
    #[inline]
    fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    fn iou(&self) -> f64 {
        if self.degenerate {
            return 0.0;
        }
        self.intersection / self.union
    }

    fn giou(&self) -> f64 {
        if self.degenerate {
            return 0.0;
        }
        let enclose_area = self.enclose_area();
        self.iou() - (enclose_area - self.union) / enclose_area
    }

    fn diou(&self) -> f64 {
        if self.degenerate {
            return 0.0;
        }
        distance_penalized(self.iou(), self.center_distance, self.diagonal)
    }

    fn ciou(&self) -> f64 {
        if self.degenerate {
            return 0.0;
        }
        match self.aspect_penalty() {
            Some(v) => complete_penalized(self.iou(), self.center_distance, self.diagonal, v),
            None => self.iou(),
        }
    }

    fn siou(&self) -> f64 {
        if self.degenerate {
            return 0.0;
        }
        match self.aspect_penalty() {
            Some(v) => self.iou() - v,
            None => self.iou(),
        }
    }

    fn mpdiou(&self) -> f64 {
        if self.degenerate {
            return 0.0;
        }
        min_point_distance_penalized(self.iou(), self.center_distance, self.diagonal)
    }
}
