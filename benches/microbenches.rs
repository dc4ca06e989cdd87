//! Criterion microbenches for iouscore metric kernels.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - the full box suite from one `BoxGeometry`
//! - the full mask suite on square masks of growing size
//! - Hausdorff distance on sparse and dense masks
//! - parallel batch scoring of box pairs

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use iouscore::geom::{BBoxXYXY, Mask, Pixel};
use iouscore::io::box_pairs_from_csv_str;
use iouscore::score::{score_box_pairs, score_boxes, score_masks, BoxPair};
use iouscore::{pixel, MetricParams};

const PAIRS_FIXTURE: &str = "id,a_x1,a_y1,a_x2,a_y2,b_x1,b_y1,b_x2,b_y2
p1,0,0,2,2,1,1,3,3
p2,0,0,2,3,1,0,3,2
p3,0,0,2,2,3,3,5,5
p4,10,10,50,80,12,15,48,70
";

/// A `size x size` mask with a filled disc centered at `(cx, cy)`.
fn disc(size: usize, cx: f64, cy: f64, radius: f64) -> Mask {
    let cells = (0..size * size)
        .map(|i| {
            let (row, col) = (i / size, i % size);
            let dr = row as f64 - cy;
            let dc = col as f64 - cx;
            dr * dr + dc * dc <= radius * radius
        })
        .collect();
    Mask::from_shape_vec(size, size, cells).unwrap()
}

fn bench_box_suite(c: &mut Criterion) {
    let a = BBoxXYXY::<Pixel>::from_xyxy(10.0, 10.0, 50.0, 80.0);
    let b = BBoxXYXY::<Pixel>::from_xyxy(12.0, 15.0, 48.0, 70.0);
    let params = MetricParams::default();

    c.bench_function("score_boxes", |bencher| {
        bencher.iter(|| black_box(score_boxes(black_box(&a), black_box(&b), &params)))
    });
}

fn bench_mask_suite(c: &mut Criterion) {
    let params = MetricParams::default();
    let mut group = c.benchmark_group("score_masks");

    for size in [32usize, 128, 512] {
        let half = size as f64 / 2.0;
        let a = disc(size, half, half, half * 0.6);
        let b = disc(size, half * 1.1, half * 0.9, half * 0.5);
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &(a, b), |bencher, (a, b)| {
            bencher.iter(|| black_box(score_masks(a, b, &params).unwrap()))
        });
    }

    group.finish();
}

fn bench_hausdorff(c: &mut Criterion) {
    let mut group = c.benchmark_group("hausdorff_distance");

    for size in [32usize, 96] {
        let half = size as f64 / 2.0;
        let a = disc(size, half, half, half * 0.6);
        let b = disc(size, half * 1.2, half, half * 0.4);
        group.throughput(Throughput::Elements((a.count_on() * b.count_on()) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &(a, b), |bencher, (a, b)| {
            bencher.iter(|| black_box(pixel::hausdorff_distance(a, b)))
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let fixture = box_pairs_from_csv_str(PAIRS_FIXTURE).unwrap();
    let pairs: Vec<BoxPair> = fixture.iter().cycle().take(10_000).cloned().collect();
    let params = MetricParams::default();

    let mut group = c.benchmark_group("score_box_pairs");
    group.throughput(Throughput::Elements(pairs.len() as u64));
    group.bench_function("10k", |bencher| {
        bencher.iter(|| black_box(score_box_pairs(black_box(&pairs), &params)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_box_suite,
    bench_mask_suite,
    bench_hausdorff,
    bench_batch
);
criterion_main!(benches);
