//! よく使うモノイドと作用素付きモノイド

use std::marker::PhantomData;

use num_traits::{Bounded, One, Zero};

use super::lazysegtree::MapMonoid;
use super::util::{Associativity, Identity, Magma};

/// 加法のモノイド `(T, +, 0)`
#[derive(Clone, Copy, Debug)]
pub struct Additive<T>(PhantomData<T>);

impl<T> Additive<T> {
    #[must_use]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Additive<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Zero + Clone> Magma for Additive<T> {
    type T = T;
    fn op(&self, lhs: &T, rhs: &T) -> T {
        lhs.clone() + rhs.clone()
    }
}
impl<T: Zero + Clone> Identity for Additive<T> {
    fn e(&self) -> T {
        T::zero()
    }
}
impl<T: Zero + Clone> Associativity for Additive<T> {}

/// 最小値のモノイド. 単位元は`T::max_value()`
#[derive(Clone, Copy, Debug)]
pub struct Min<T>(PhantomData<T>);

impl<T> Min<T> {
    #[must_use]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Min<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Bounded + PartialOrd + Clone> Magma for Min<T> {
    type T = T;
    fn op(&self, lhs: &T, rhs: &T) -> T {
        if rhs < lhs { rhs.clone() } else { lhs.clone() }
    }
}
impl<T: Bounded + PartialOrd + Clone> Identity for Min<T> {
    fn e(&self) -> T {
        T::max_value()
    }
}
impl<T: Bounded + PartialOrd + Clone> Associativity for Min<T> {}

/// 最大値のモノイド. 単位元は`T::min_value()`
#[derive(Clone, Copy, Debug)]
pub struct Max<T>(PhantomData<T>);

impl<T> Max<T> {
    #[must_use]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Max<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Bounded + PartialOrd + Clone> Magma for Max<T> {
    type T = T;
    fn op(&self, lhs: &T, rhs: &T) -> T {
        if lhs < rhs { rhs.clone() } else { lhs.clone() }
    }
}
impl<T: Bounded + PartialOrd + Clone> Identity for Max<T> {
    fn e(&self) -> T {
        T::min_value()
    }
}
impl<T: Bounded + PartialOrd + Clone> Associativity for Max<T> {}

/// 区間和と区間の長さの組
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Sum<T> {
    pub value: T,
    pub len: T,
}

impl<T: One> Sum<T> {
    /// 長さ1の区間`[value]`を表す元
    #[must_use]
    pub fn leaf(value: T) -> Self {
        Self {
            value,
            len: T::one(),
        }
    }
}

/// アフィン変換 `x -> b * x + c`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Affine<T> {
    pub b: T,
    pub c: T,
}

impl<T> Affine<T> {
    #[must_use]
    pub fn new(b: T, c: T) -> Self {
        Self { b, c }
    }
}

impl<T: Zero + One> Affine<T> {
    /// `x -> x + c`
    #[must_use]
    pub fn add(c: T) -> Self {
        Self { b: T::one(), c }
    }

    /// `x -> c`
    #[must_use]
    pub fn assign(c: T) -> Self {
        Self { b: T::zero(), c }
    }
}

/// 区間アフィン変換・区間和取得
///
/// 元は[`Sum`], 作用素は[`Affine`]である.
/// `T`は整数型の他に[`ModInt`](crate::modint::ModInt)も使える.
#[derive(Clone, Copy, Debug)]
pub struct RangeAffineRangeSum<T>(PhantomData<T>);

impl<T> RangeAffineRangeSum<T> {
    #[must_use]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for RangeAffineRangeSum<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Zero + One + Clone> Magma for RangeAffineRangeSum<T> {
    type T = Sum<T>;
    fn op(&self, lhs: &Sum<T>, rhs: &Sum<T>) -> Sum<T> {
        Sum {
            value: lhs.value.clone() + rhs.value.clone(),
            len: lhs.len.clone() + rhs.len.clone(),
        }
    }
}
impl<T: Zero + One + Clone> Identity for RangeAffineRangeSum<T> {
    fn e(&self) -> Sum<T> {
        Sum {
            value: T::zero(),
            len: T::zero(),
        }
    }
}
impl<T: Zero + One + Clone> Associativity for RangeAffineRangeSum<T> {}

impl<T: Zero + One + Clone> MapMonoid for RangeAffineRangeSum<T> {
    type F = Affine<T>;

    fn id(&self) -> Affine<T> {
        Affine {
            b: T::one(),
            c: T::zero(),
        }
    }

    fn composition(&self, f: &Affine<T>, g: &Affine<T>) -> Affine<T> {
        Affine {
            b: f.b.clone() * g.b.clone(),
            c: f.b.clone() * g.c.clone() + f.c.clone(),
        }
    }

    fn mapping(&self, f: &Affine<T>, x: &Sum<T>) -> Sum<T> {
        Sum {
            value: f.b.clone() * x.value.clone() + f.c.clone() * x.len.clone(),
            len: x.len.clone(),
        }
    }
}
