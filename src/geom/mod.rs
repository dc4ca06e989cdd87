//! Region types scored by the metric suites.
//!
//! Boxes are `f64` rectangles in XYXY corner order, tagged with a coordinate
//! space marker so that both operands of a comparison agree on units. Masks
//! are boolean grids of arbitrary shape.
//!
//! # Example
//!
//! ```
//! use iouscore::geom::{BBoxXYXY, Mask, Pixel};
//!
//! let truth = BBoxXYXY::<Pixel>::from_xyxy(0.0, 0.0, 2.0, 2.0);
//! assert_eq!(truth.area(), 4.0);
//!
//! let mask = Mask::from_rows(&[[1u8, 1, 0], [1, 1, 0], [0, 0, 0]]).unwrap();
//! assert_eq!(mask.count_on(), 4);
//! ```

mod bbox;
mod coord;
mod mask;
mod space;

pub use bbox::BBoxXYXY;
pub use coord::Coord;
pub use mask::Mask;
pub use space::{Normalized, Pixel};
