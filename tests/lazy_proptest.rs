use monoseg::algebra::{Additive, Affine, RangeAffineRangeSum, Sum};
use monoseg::{LazySegmentTree, ModInt, RangeError, SegmentTree};
use proptest::prelude::*;

type Mint = ModInt<998244353>;

#[derive(Debug, Clone)]
enum Operation {
    Set(usize, u32),
    ApplyAt(usize, u32, u32),
    Apply(usize, usize, u32, u32),
    Get(usize),
    Prod(usize, usize),
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (any::<usize>(), any::<u32>()).prop_map(|(p, v)| Operation::Set(p, v)),
        (any::<usize>(), any::<u32>(), any::<u32>()).prop_map(|(p, b, c)| Operation::ApplyAt(p, b, c)),
        (any::<usize>(), any::<usize>(), any::<u32>(), any::<u32>())
            .prop_map(|(l, r, b, c)| Operation::Apply(l, r, b, c)),
        any::<usize>().prop_map(Operation::Get),
        (any::<usize>(), any::<usize>()).prop_map(|(l, r)| Operation::Prod(l, r)),
    ]
}

fn build(values: &[u32]) -> LazySegmentTree<RangeAffineRangeSum<Mint>> {
    LazySegmentTree::from_vec(
        RangeAffineRangeSum::new(),
        values.iter().map(|&v| Sum::leaf(Mint::new(v))).collect(),
    )
}

fn sorted(a: usize, b: usize, n: usize) -> (usize, usize) {
    let (a, b) = (a % (n + 1), b % (n + 1));
    (a.min(b), a.max(b))
}

proptest! {
    #[test]
    fn lazy_tree_matches_vec(
        values in proptest::collection::vec(any::<u32>(), 1..64),
        ops in proptest::collection::vec(operation(), 1..100),
    ) {
        let n = values.len();
        let mut naive = values.iter().map(|&v| Mint::new(v)).collect::<Vec<_>>();
        let mut seg = build(&values);

        for op in ops {
            match op {
                Operation::Set(p, v) => {
                    seg.set(p % n, Sum::leaf(Mint::new(v))).unwrap();
                    naive[p % n] = Mint::new(v);
                }
                Operation::ApplyAt(p, b, c) => {
                    let f = Affine::new(Mint::new(b), Mint::new(c));
                    seg.apply_at(p % n, &f).unwrap();
                    naive[p % n] = f.b * naive[p % n] + f.c;
                }
                Operation::Apply(l, r, b, c) => {
                    let (l, r) = sorted(l, r, n);
                    let f = Affine::new(Mint::new(b), Mint::new(c));
                    seg.apply(l..r, &f).unwrap();
                    for x in &mut naive[l..r] {
                        *x = f.b * *x + f.c;
                    }
                }
                Operation::Get(p) => {
                    prop_assert_eq!(seg.get_imu(p % n).map(|s| s.value), Ok(naive[p % n]));
                }
                Operation::Prod(l, r) => {
                    let (l, r) = sorted(l, r, n);
                    let expected = naive[l..r].iter().copied().sum::<Mint>();
                    prop_assert_eq!(seg.prod(l..r).map(|s| s.value), Ok(expected));
                }
            }
        }

        prop_assert_eq!(seg.all_prod().value, naive.iter().copied().sum::<Mint>());
        let leaves = seg.into_vec().into_iter().map(|s| s.value).collect::<Vec<_>>();
        prop_assert_eq!(leaves, naive);
    }

    #[test]
    fn range_apply_equals_pointwise_apply(
        values in proptest::collection::vec(any::<u32>(), 1..64),
        updates in proptest::collection::vec((any::<usize>(), any::<usize>(), any::<u32>(), any::<u32>()), 1..20),
    ) {
        let n = values.len();
        let mut lazy = build(&values);
        let mut eager = build(&values);
        for (l, r, b, c) in updates {
            let (l, r) = sorted(l, r, n);
            let f = Affine::new(Mint::new(b), Mint::new(c));
            lazy.apply(l..r, &f).unwrap();
            for i in l..r {
                eager.apply_at(i, &f).unwrap();
            }
        }
        for l in 0..=n {
            prop_assert_eq!(lazy.prod(l..), eager.prod(l..));
        }
        prop_assert_eq!(lazy.all_prod(), eager.all_prod());
    }

    #[test]
    fn adding_a_constant_shifts_the_sum(
        values in proptest::collection::vec(-1000i64..1000, 1..64),
        l in any::<usize>(),
        r in any::<usize>(),
        c in -1000i64..1000,
    ) {
        let n = values.len();
        let (l, r) = sorted(l, r, n);
        let mut seg = LazySegmentTree::from_vec(
            RangeAffineRangeSum::new(),
            values.iter().map(|&v| Sum::leaf(v)).collect(),
        );
        let before = seg.prod(l..r).unwrap();
        seg.apply(l..r, &Affine::add(c)).unwrap();
        let after = seg.prod(l..r).unwrap();
        prop_assert_eq!(after.value, before.value + c * (r - l) as i64);
        prop_assert_eq!(after.len, before.len);
    }

    #[test]
    fn reads_do_not_change_state(
        values in proptest::collection::vec(any::<u32>(), 1..64),
        updates in proptest::collection::vec((any::<usize>(), any::<usize>(), any::<u32>()), 0..10),
        queries in proptest::collection::vec((any::<usize>(), any::<usize>()), 1..20),
    ) {
        let n = values.len();
        let mut seg = build(&values);
        for (l, r, c) in updates {
            let (l, r) = sorted(l, r, n);
            seg.apply(l..r, &Affine::add(Mint::new(c))).unwrap();
        }
        let snapshot = format!("{seg:?}");
        for (l, r) in queries {
            let (l, r) = sorted(l, r, n);
            let first = seg.prod(l..r);
            prop_assert_eq!(seg.prod(l..r), first);
            let _ = seg.get(l % n);
            let _ = seg.get_imu(r % n);
            let _ = seg.max_right(l, |s| s.len.val() <= 3);
        }
        prop_assert_eq!(format!("{seg:?}"), snapshot);
    }

    #[test]
    fn out_of_range_is_rejected(
        values in proptest::collection::vec(any::<i32>(), 0..32),
        extra in 0usize..8,
    ) {
        let n = values.len();
        let mut seg = SegmentTree::from_vec(Additive::<i64>::new(), values.iter().map(|&v| i64::from(v)).collect());
        let total = *seg.all_prod();

        prop_assert_eq!(seg.set(n + extra, 1), Err(RangeError::IndexOutOfRange { index: n + extra, len: n }));
        prop_assert_eq!(seg.get(n + extra), Err(RangeError::IndexOutOfRange { index: n + extra, len: n }));
        prop_assert_eq!(seg.prod(0..n + extra + 1), Err(RangeError::RangeOutOfBounds { start: 0, end: n + extra + 1, len: n }));
        prop_assert_eq!(seg.max_right(n + extra + 1, |_| true), Err(RangeError::RangeOutOfBounds { start: n + extra + 1, end: n, len: n }));
        prop_assert_eq!(seg.all_prod(), &total);
        prop_assert_eq!(seg.prod(..), Ok(total));
    }
}
