//! Axis-aligned boxes in XYXY corner format.

use serde::{Deserialize, Serialize};

use super::coord::Coord;

/// An axis-aligned bounding box `(x1, y1, x2, y2)`: top-left corner `min`,
/// bottom-right corner `max`.
///
/// The constructor does not check `min <= max`. A box with equal corners on
/// either axis has zero area, and every overlap metric treats it as a
/// degenerate input rather than an error.
#[derive(Clone, Copy, PartialEq)]
pub struct BBoxXYXY<TSpace> {
    pub min: Coord<TSpace>,
    pub max: Coord<TSpace>,
}

impl<TSpace> BBoxXYXY<TSpace> {
    /// Creates a new bounding box from its two corners.
    #[inline]
    pub fn new(min: Coord<TSpace>, max: Coord<TSpace>) -> Self {
        Self { min, max }
    }

    /// Creates a new bounding box from explicit coordinates.
    #[inline]
    pub fn from_xyxy(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            min: Coord::new(x1, y1),
            max: Coord::new(x2, y2),
        }
    }

    /// Creates a box from its top-left corner and size.
    #[inline]
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::from_xyxy(x, y, x + width, y + height)
    }

    /// Returns the coordinates as `[x1, y1, x2, y2]`.
    #[inline]
    pub fn to_xyxy(&self) -> [f64; 4] {
        [self.min.x, self.min.y, self.max.x, self.max.y]
    }

    #[inline]
    pub fn x1(&self) -> f64 {
        self.min.x
    }

    #[inline]
    pub fn y1(&self) -> f64 {
        self.min.y
    }

    #[inline]
    pub fn x2(&self) -> f64 {
        self.max.x
    }

    #[inline]
    pub fn y2(&self) -> f64 {
        self.max.y
    }

    /// Width of the box. Negative if the box is malformed.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Height of the box. Negative if the box is malformed.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Midpoint of the two corners.
    #[inline]
    pub fn center(&self) -> Coord<TSpace> {
        self.min.midpoint(&self.max)
    }

    /// Length of the min-to-max diagonal.
    #[inline]
    pub fn diagonal(&self) -> f64 {
        self.min.distance_to(&self.max)
    }

    /// Smallest box containing both `self` and `other`.
    #[inline]
    pub fn enclose(&self, other: &Self) -> Self {
        Self::new(self.min.min(&other.min), self.max.max(&other.max))
    }

    /// Area shared with `other`, zero when the boxes do not overlap on
    /// either axis.
    #[inline]
    pub fn intersection_area(&self, other: &Self) -> f64 {
        let overlap_x = (self.max.x.min(other.max.x) - self.min.x.max(other.min.x)).max(0.0);
        let overlap_y = (self.max.y.min(other.max.y) - self.min.y.max(other.min.y)).max(0.0);
        overlap_x * overlap_y
    }

    /// Returns true if all coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

impl<TSpace> std::fmt::Debug for BBoxXYXY<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBoxXYXY")
            .field("x1", &self.min.x)
            .field("y1", &self.min.y)
            .field("x2", &self.max.x)
            .field("y2", &self.max.y)
            .finish()
    }
}

impl<TSpace> std::fmt::Display for BBoxXYXY<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}

impl<TSpace> Default for BBoxXYXY<TSpace> {
    fn default() -> Self {
        Self::from_xyxy(0.0, 0.0, 0.0, 0.0)
    }
}

// Serialized as `[x1, y1, x2, y2]`, the layout input files use.
impl<TSpace> Serialize for BBoxXYXY<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_xyxy().serialize(serializer)
    }
}

impl<'de, TSpace> Deserialize<'de> for BBoxXYXY<TSpace> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [x1, y1, x2, y2] = <[f64; 4]>::deserialize(deserializer)?;
        Ok(BBoxXYXY::from_xyxy(x1, y1, x2, y2))
    }
}
