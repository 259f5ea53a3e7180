use std::ops::{Bound, RangeBounds};

use crate::error::{RangeError, Result};

/// マグマ. 二項演算で閉じている代数構造
///
/// 演算は副作用を持たない純粋な関数でなければならない.
/// セグメント木は演算を任意の回数・順序で呼び出す.
pub trait Magma {
    /// マグマの元の型
    type T;
    /// 二項演算
    fn op(&self, lhs: &Self::T, rhs: &Self::T) -> Self::T;
}

/// マグマに単位元があることを表すトレイト
///
/// 任意の`x`について`self.op(&self.e(), &x) == x`かつ`self.op(&x, &self.e()) == x`を満たす必要がある
pub trait Identity: Magma<T: Clone> {
    /// 単位元を構築して返す
    fn e(&self) -> Self::T;
}

/// マグマで結合律が成り立つことを表すトレイト
///
/// 実行時には検査されない. 成り立たない場合は総積の値が不定になる.
pub trait Associativity: Magma {}

/// 引数の`range`を`0..=len`に収まる半開区間`(left, right)`に変換する
pub(crate) fn to_half_open(range: impl RangeBounds<usize>, len: usize) -> Result<(usize, usize)> {
    let left = match range.start_bound() {
        Bound::Included(&i) => i,
        Bound::Excluded(&i) => i.checked_add(1).ok_or(RangeError::BoundOverflow)?,
        Bound::Unbounded => 0,
    };
    let right = match range.end_bound() {
        Bound::Included(&i) => i.checked_add(1).ok_or(RangeError::BoundOverflow)?,
        Bound::Excluded(&i) => i,
        Bound::Unbounded => len,
    };
    if left > len || right > len {
        return Err(RangeError::RangeOutOfBounds {
            start: left,
            end: right,
            len,
        });
    }
    if left > right {
        return Err(RangeError::InvertedRange {
            start: left,
            end: right,
        });
    }
    Ok((left, right))
}

/// `index`が`0..len`に含まれるか検査する
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(RangeError::IndexOutOfRange { index, len })
    }
}

/// 操作が`RangeError`で拒否されたことを記録するクロージャを返す
pub(crate) fn log_rejected(operation: &'static str) -> impl Fn(&RangeError) {
    move |err| tracing::debug!(operation, %err, "operation rejected")
}

/// `n`以上の最小の2冪`size`と`log2(size)`を返す
pub(crate) fn ceil_pow2(n: usize) -> (usize, u32) {
    let size = n.next_power_of_two();
    (size, size.trailing_zeros())
}
