#![allow(dead_code)]

use iouscore::geom::{BBoxXYXY, Mask, Pixel};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub const EPS: f64 = 1e-12;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Coordinates on a quarter-pixel grid, so areas and sums stay exact.
fn quarter(steps: u32) -> f64 {
    f64::from(steps) * 0.25
}

/// A box with strictly positive width and height.
pub fn arb_bbox() -> BoxedStrategy<BBoxXYXY<Pixel>> {
    (0u32..400, 0u32..400, 1u32..200, 1u32..200)
        .prop_map(|(x, y, w, h)| {
            BBoxXYXY::from_xyxy(quarter(x), quarter(y), quarter(x + w), quarter(y + h))
        })
        .boxed()
}

/// A box with zero width, zero height, or both.
pub fn arb_zero_area_bbox() -> BoxedStrategy<BBoxXYXY<Pixel>> {
    (0u32..400, 0u32..400, 0u32..200, 0u32..3)
        .prop_map(|(x, y, extent, which)| {
            let (w, h) = match which {
                0 => (0, extent),
                1 => (extent, 0),
                _ => (0, 0),
            };
            BBoxXYXY::from_xyxy(quarter(x), quarter(y), quarter(x + w), quarter(y + h))
        })
        .boxed()
}

/// Two positive-area boxes where the second starts at or right of the
/// first's right edge.
pub fn arb_disjoint_bbox_pair() -> BoxedStrategy<(BBoxXYXY<Pixel>, BBoxXYXY<Pixel>)> {
    (arb_bbox(), 0u32..100, 0u32..400, 1u32..200, 1u32..200)
        .prop_map(|(a, gap, y, w, h)| {
            let x1 = a.x2() + quarter(gap);
            let b = BBoxXYXY::from_xyxy(x1, quarter(y), x1 + quarter(w), quarter(y + h));
            (a, b)
        })
        .boxed()
}

/// A mask of exactly `rows x cols` cells.
pub fn arb_mask(rows: usize, cols: usize) -> BoxedStrategy<Mask> {
    prop::collection::vec(any::<bool>(), rows * cols)
        .prop_map(move |cells| Mask::from_shape_vec(rows, cols, cells).expect("sized buffer"))
        .boxed()
}

/// A mask of `rows x cols` cells with at least one cell on.
pub fn arb_nonblank_mask(rows: usize, cols: usize) -> BoxedStrategy<Mask> {
    (prop::collection::vec(any::<bool>(), rows * cols), 0..rows * cols)
        .prop_map(move |(mut cells, forced)| {
            cells[forced] = true;
            Mask::from_shape_vec(rows, cols, cells).expect("sized buffer")
        })
        .boxed()
}

/// Two masks sharing a random shape of up to 8x8.
pub fn arb_mask_pair() -> BoxedStrategy<(Mask, Mask)> {
    (1usize..=8, 1usize..=8)
        .prop_flat_map(|(rows, cols)| (arb_mask(rows, cols), arb_mask(rows, cols)))
        .boxed()
}

/// Two nonblank masks sharing a random shape of up to 8x8.
pub fn arb_nonblank_mask_pair() -> BoxedStrategy<(Mask, Mask)> {
    (1usize..=8, 1usize..=8)
        .prop_flat_map(|(rows, cols)| (arb_nonblank_mask(rows, cols), arb_nonblank_mask(rows, cols)))
        .boxed()
}

/// A mask together with a copy where the listed cell indices are flipped.
pub fn arb_mask_with_flips() -> BoxedStrategy<(Mask, Mask, usize)> {
    (1usize..=8, 1usize..=8)
        .prop_flat_map(|(rows, cols)| {
            let n = rows * cols;
            (
                prop::collection::vec(any::<bool>(), n),
                prop::sample::subsequence((0..n).collect::<Vec<_>>(), 0..=n),
            )
                .prop_map(move |(cells, flips)| {
                    let mut flipped = cells.clone();
                    for &index in &flips {
                        flipped[index] = !flipped[index];
                    }
                    (
                        Mask::from_shape_vec(rows, cols, cells).expect("sized buffer"),
                        Mask::from_shape_vec(rows, cols, flipped).expect("sized buffer"),
                        flips.len(),
                    )
                })
        })
        .boxed()
}

pub fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPS * a.abs().max(b.abs()).max(1.0)
}
