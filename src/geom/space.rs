//! Coordinate space markers for boxes and points.
//!
//! Uninhabited types used only as type parameters, so a box measured in
//! pixels can never be scored against a box in normalized units.
//!
//! ```compile_fail
//! use iouscore::boxes;
//! use iouscore::geom::{BBoxXYXY, Normalized, Pixel};
//!
//! let px = BBoxXYXY::<Pixel>::from_xyxy(0.0, 0.0, 2.0, 2.0);
//! let norm = BBoxXYXY::<Normalized>::from_xyxy(0.0, 0.0, 0.5, 0.5);
//! boxes::iou(&px, &norm);
//! ```

use std::fmt;

/// Absolute image coordinates, origin at the top-left corner.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {}

/// Coordinates expressed as fractions of the image size.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalized {}

impl fmt::Debug for Pixel {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Normalized {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
