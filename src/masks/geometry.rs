//! Per-pair geometry for binary masks.

use tracing::trace;

use crate::error::IouScoreError;
use crate::geom::{BBoxXYXY, Coord, Mask, Pixel};
use crate::metric::{
    aspect_consistency, complete_penalized, distance_penalized, min_point_distance_penalized,
    OverlapKernel,
};

/// Geometric terms shared by every mask metric, computed in one pass over
/// both grids.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskGeometry {
    intersection: usize,
    union: usize,
    on_counts: (usize, usize),
    /// Inclusive pixel extent of the on cells of both masks, with
    /// `x = col` and `y = row`. `None` when neither mask has on cells.
    enclosing: Option<BBoxXYXY<Pixel>>,
    /// Mean `(col, row)` of the on cells of each mask.
    centroids: Option<(Coord<Pixel>, Coord<Pixel>)>,
    /// Grid `rows / cols` of each mask.
    aspect_ratios: (f64, f64),
    degenerate: bool,
}

/// Running sums for one mask's centroid.
#[derive(Default)]
struct CentroidSum {
    count: usize,
    rows: usize,
    cols: usize,
}

impl CentroidSum {
    fn add(&mut self, row: usize, col: usize) {
        self.count += 1;
        self.rows += row;
        self.cols += col;
    }

    fn centroid(&self) -> Option<Coord<Pixel>> {
        (self.count > 0).then(|| {
            let n = self.count as f64;
            Coord::new(self.cols as f64 / n, self.rows as f64 / n)
        })
    }
}

impl MaskGeometry {
    /// Derives the geometry of the pair `(a, b)`.
    ///
    /// Fails with [`IouScoreError::ShapeMismatch`] when the grids differ in
    /// shape.
    pub fn new(a: &Mask, b: &Mask) -> Result<Self, IouScoreError> {
        if a.shape() != b.shape() {
            return Err(IouScoreError::shape_mismatch(a.shape(), b.shape()));
        }

        let mut intersection = 0;
        let mut union = 0;
        let mut sum_a = CentroidSum::default();
        let mut sum_b = CentroidSum::default();
        let mut extent: Option<(usize, usize, usize, usize)> = None;

        let cells_b = b.view();
        for ((row, col), &on_a) in a.view().indexed_iter() {
            let on_b = cells_b[(row, col)];
            if on_a {
                sum_a.add(row, col);
            }
            if on_b {
                sum_b.add(row, col);
            }
            if on_a && on_b {
                intersection += 1;
            }
            if on_a || on_b {
                union += 1;
                extent = Some(match extent {
                    None => (row, row, col, col),
                    Some((row_min, row_max, col_min, col_max)) => (
                        row_min.min(row),
                        row_max.max(row),
                        col_min.min(col),
                        col_max.max(col),
                    ),
                });
            }
        }

        let enclosing = extent.map(|(row_min, row_max, col_min, col_max)| {
            BBoxXYXY::from_xyxy(
                col_min as f64,
                row_min as f64,
                col_max as f64,
                row_max as f64,
            )
        });
        let centroids = sum_a.centroid().zip(sum_b.centroid());

        let degenerate = union == 0 || centroids.is_none();
        if degenerate {
            trace!(
                on_a = sum_a.count,
                on_b = sum_b.count,
                "empty mask, metrics fall back to 0.0"
            );
        }

        Ok(Self {
            intersection,
            union,
            on_counts: (sum_a.count, sum_b.count),
            enclosing,
            centroids,
            aspect_ratios: (a.aspect_ratio(), b.aspect_ratio()),
            degenerate,
        })
    }

    /// Number of cells on in both masks.
    #[inline]
    pub fn intersection(&self) -> usize {
        self.intersection
    }

    /// Number of cells on in either mask.
    #[inline]
    pub fn union(&self) -> usize {
        self.union
    }

    /// On-cell counts of `(a, b)`.
    #[inline]
    pub fn on_counts(&self) -> (usize, usize) {
        self.on_counts
    }

    /// Inclusive pixel extent `[col_min, row_min, col_max, row_max]` of the
    /// on cells of both masks.
    #[inline]
    pub fn enclosing(&self) -> Option<&BBoxXYXY<Pixel>> {
        self.enclosing.as_ref()
    }

    /// Cell count of the enclosing extent, far boundary pixels included.
    pub fn enclose_area(&self) -> usize {
        self.enclosing.map_or(0, |extent| {
            (extent.width() as usize + 1) * (extent.height() as usize + 1)
        })
    }

    /// Centroids of `(a, b)` as `(col, row)` points.
    #[inline]
    pub fn centroids(&self) -> Option<(Coord<Pixel>, Coord<Pixel>)> {
        self.centroids
    }

    /// Distance between the two centroids, zero if either mask is empty.
    pub fn center_distance(&self) -> f64 {
        self.centroids
            .map_or(0.0, |(centroid_a, centroid_b)| centroid_a.distance_to(&centroid_b))
    }

    /// Distance from the first to the last pixel center of the enclosing
    /// extent.
    pub fn diagonal(&self) -> f64 {
        self.enclosing.map_or(0.0, |extent| extent.diagonal())
    }

    /// Aspect-ratio consistency term over the whole grids.
    fn aspect_penalty(&self) -> f64 {
        aspect_consistency(self.aspect_ratios.0, self.aspect_ratios.1)
    }
}

impl OverlapKernel for MaskGeometry {
    #[inline]
    fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    fn iou(&self) -> f64 {
        if self.degenerate {
            return 0.0;
        }
        self.intersection as f64 / self.union as f64
    }

    fn giou(&self) -> f64 {
        if self.degenerate {
            return 0.0;
        }
        let enclose_area = self.enclose_area() as f64;
        self.iou() - (enclose_area - self.union as f64) / enclose_area
    }

    fn diou(&self) -> f64 {
        if self.degenerate {
            return 0.0;
        }
        distance_penalized(self.iou(), self.center_distance(), self.diagonal())
    }

    fn ciou(&self) -> f64 {
        if self.degenerate {
            return 0.0;
        }
        complete_penalized(
            self.iou(),
            self.center_distance(),
            self.diagonal(),
            self.aspect_penalty(),
        )
    }

    fn siou(&self) -> f64 {
        if self.degenerate {
            return 0.0;
        }
        self.iou() - self.aspect_penalty()
    }

    fn mpdiou(&self) -> f64 {
        if self.degenerate {
            return 0.0;
        }
        min_point_distance_penalized(self.iou(), self.center_distance(), self.diagonal())
    }
}
