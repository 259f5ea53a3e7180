use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use monoseg::algebra::{Additive, Affine, RangeAffineRangeSum, Sum};
use monoseg::{LazySegmentTree, ModInt, SegmentTree};

type Mint = ModInt<998244353>;

fn bench_segment_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("Segment Tree");

    let n = 100_000;

    group.bench_function("build", |b| {
        b.iter_batched(
            || (0..n as u64).collect::<Vec<_>>(),
            |data| black_box(SegmentTree::from_vec(Additive::new(), data)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("set", |b| {
        let mut seg = SegmentTree::from_vec(Additive::new(), (0..n as u64).collect());
        b.iter(|| seg.set(black_box(n / 2), black_box(100)));
    });

    group.bench_function("prod", |b| {
        let seg = SegmentTree::from_vec(Additive::new(), (0..n as u64).collect());
        b.iter(|| seg.prod(black_box(n / 4)..black_box(3 * n / 4)));
    });

    group.bench_function("max_right", |b| {
        let seg = SegmentTree::from_vec(Additive::new(), (0..n as u64).collect());
        b.iter(|| seg.max_right(black_box(n / 4), |&s| s < 1 << 32));
    });

    group.bench_function("naive_vec_prod", |b| {
        let data = (0..n as u64).collect::<Vec<_>>();
        b.iter(|| {
            let start = black_box(n / 4);
            let end = black_box(3 * n / 4);
            data[start..end].iter().sum::<u64>()
        });
    });

    group.finish();
}

fn bench_lazy_segment_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("Lazy Segment Tree");

    let n = 100_000;
    let data = || {
        (0..n as u32)
            .map(|i| Sum::leaf(Mint::new(i)))
            .collect::<Vec<_>>()
    };

    group.bench_function("build", |b| {
        b.iter_batched(
            data,
            |data| black_box(LazySegmentTree::from_vec(RangeAffineRangeSum::new(), data)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("apply", |b| {
        let mut seg = LazySegmentTree::from_vec(RangeAffineRangeSum::new(), data());
        let f = Affine::new(Mint::new(3), Mint::new(1));
        b.iter(|| seg.apply(black_box(n / 4)..black_box(3 * n / 4), &f));
    });

    group.bench_function("apply_then_prod", |b| {
        let mut seg = LazySegmentTree::from_vec(RangeAffineRangeSum::new(), data());
        let f = Affine::new(Mint::new(3), Mint::new(1));
        let mut i = 0;
        b.iter(|| {
            i = (i + 7919) % n;
            seg.apply(i / 2..i, &f)?;
            seg.prod(black_box(i / 3)..black_box(n - i / 3))
        });
    });

    group.bench_function("get_imu", |b| {
        let mut seg = LazySegmentTree::from_vec(RangeAffineRangeSum::new(), data());
        let _ = seg.apply(.., &Affine::add(Mint::new(5)));
        b.iter(|| seg.get_imu(black_box(n / 3)));
    });

    group.finish();
}

criterion_group!(benches, bench_segment_tree, bench_lazy_segment_tree);
criterion_main!(benches);
