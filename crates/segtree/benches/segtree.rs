use bench::RuntimePreset;
use bench::default_rng;
use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use rand::Rng;
use segtree::Additive;
use segtree::LazySegmentTree;
use segtree::LazySegmentTreeDfs;
use segtree::RangeApply;
use segtree::RangeFold;
use segtree::SegmentTree;
use segtree::SegmentTreeDfs;
use segtree::monoid_fn;
use std::hint::black_box;

const SIZES: [usize; 4] = [1_024, 4_096, 16_384, 65_536];
const VALUE_RANGE: std::ops::RangeInclusive<i64> = -1_000_000..=1_000_000;
const DELTA_RANGE: std::ops::RangeInclusive<i64> = -1_000..=1_000;

#[derive(Clone, Copy, Debug)]
enum Op {
    Point { index: usize, value: i64 },
    Range { start: usize, end: usize, delta: i64 },
    Fold { start: usize, end: usize },
}

fn generate_values<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<i64> {
    let mut values = Vec::with_capacity(n);
    for _ in 0..n {
        values.push(rng.random_range(VALUE_RANGE));
    }
    values
}

/// Half folds, half writes; `Range` writes only when `lazy` is set.
fn generate_ops<R: Rng + ?Sized>(rng: &mut R, n: usize, q: usize, lazy: bool) -> Vec<Op> {
    let mut ops = Vec::with_capacity(q);
    for _ in 0..q {
        let start = rng.random_range(0..n);
        let end = rng.random_range((start + 1)..=n);
        let op = match rng.random_range(0..2) {
            0 => Op::Fold { start, end },
            _ if lazy => Op::Range {
                start,
                end,
                delta: rng.random_range(DELTA_RANGE),
            },
            _ => Op::Point {
                index: start,
                value: rng.random_range(VALUE_RANGE),
            },
        };
        ops.push(op);
    }
    ops
}

fn run_fold<T: RangeFold<Value = i64>>(tree: &mut T, ops: &[Op]) -> i64 {
    let mut acc = 0_i64;
    for &op in ops {
        match op {
            Op::Point { index, value } => tree.set(black_box(index), value).unwrap(),
            Op::Fold { start, end } => {
                acc ^= tree.fold(black_box(start)..black_box(end)).unwrap();
            }
            Op::Range { .. } => unreachable!(),
        }
    }
    acc
}

fn run_apply<T: RangeApply<Value = (i64, i64), Action = i64>>(tree: &mut T, ops: &[Op]) -> i64 {
    let mut acc = 0_i64;
    for &op in ops {
        match op {
            Op::Range { start, end, delta } => {
                tree.apply(black_box(start)..black_box(end), delta).unwrap();
            }
            Op::Fold { start, end } => {
                acc ^= tree.fold(black_box(start)..black_box(end)).unwrap().0;
            }
            Op::Point { .. } => unreachable!(),
        }
    }
    acc
}

fn bench_point_update(c: &mut Criterion) {
    let mut rng = default_rng();
    let sum = Additive::<i64>::new();
    let mut group = c.benchmark_group("segtree/point_update");

    for &size in &SIZES {
        RuntimePreset::for_size(size).apply(&mut group);
        let values = generate_values(&mut rng, size);
        let ops = generate_ops(&mut rng, size, size, false);

        group.bench_function(BenchmarkId::new("iterative", size), |bencher| {
            bencher.iter(|| {
                let mut tree = SegmentTree::new(black_box(values.as_slice()), &sum).unwrap();
                black_box(run_fold(&mut tree, &ops));
            })
        });
        group.bench_function(BenchmarkId::new("dfs", size), |bencher| {
            bencher.iter(|| {
                let mut tree = SegmentTreeDfs::new(black_box(values.as_slice()), &sum).unwrap();
                black_box(run_fold(&mut tree, &ops));
            })
        });
    }

    group.finish();
}

fn bench_range_add(c: &mut Criterion) {
    let mut rng = default_rng();
    let sum_len = monoid_fn((0_i64, 0_i64), |a: &(i64, i64), b: &(i64, i64)| {
        (a.0.wrapping_add(b.0), a.1 + b.1)
    });
    let add = monoid_fn(0_i64, |f: &i64, g: &i64| f.wrapping_add(*g));
    let map = |f: &i64, x: &(i64, i64)| (x.0.wrapping_add(f.wrapping_mul(x.1)), x.1);
    let mut group = c.benchmark_group("segtree/range_add");

    for &size in &SIZES {
        RuntimePreset::for_size(size).apply(&mut group);
        let values: Vec<(i64, i64)> = generate_values(&mut rng, size)
            .into_iter()
            .map(|v| (v, 1))
            .collect();
        let ops = generate_ops(&mut rng, size, size, true);

        group.bench_function(BenchmarkId::new("iterative", size), |bencher| {
            bencher.iter(|| {
                let values = black_box(values.as_slice());
                let mut tree = LazySegmentTree::new(values, &sum_len, &add, &map).unwrap();
                black_box(run_apply(&mut tree, &ops));
            })
        });
        group.bench_function(BenchmarkId::new("dfs", size), |bencher| {
            bencher.iter(|| {
                let values = black_box(values.as_slice());
                let mut tree = LazySegmentTreeDfs::new(values, &sum_len, &add, &map).unwrap();
                black_box(run_apply(&mut tree, &ops));
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_point_update, bench_range_add);
criterion_main!(benches);
