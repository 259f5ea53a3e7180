use std::ops::{Deref, DerefMut, RangeBounds};

use super::error::Result;
use super::util::{
    ceil_pow2, check_index, log_rejected, to_half_open, Associativity, Identity,
};

pub trait Monoid: Associativity + Identity {}
impl<T: Associativity + Identity> Monoid for T {}

/// セグメント木
///
/// 一点更新と区間の総積の計算が可能である.
/// 要素数`n`以上の最小の2冪`size`個の葉を持つ完全二分木を, 1-indexedのヒープ順で配列に格納している.
/// 葉`p`は`data[p + size]`にあり, `n`以降の葉は常に単位元である.
#[derive(Clone)]
pub struct SegmentTree<M: Monoid> {
    data: Box<[M::T]>,
    len: usize,
    size: usize,
    log: u32,
    monoid: M,
}

impl<M: Monoid> SegmentTree<M> {
    /// 全ての要素が`monoid.e()`で初期化された長さ`n`のSegmentTreeを構築する.
    ///
    /// # Time complexity
    ///
    /// - *O*(*n*)
    #[must_use]
    pub fn new(monoid: M, n: usize) -> Self {
        let (size, log) = ceil_pow2(n);
        let data = (0..size * 2).map(|_| monoid.e()).collect();
        tracing::trace!(len = n, size, log, "built segment tree");
        Self {
            data,
            len: n,
            size,
            log,
            monoid,
        }
    }

    /// 配列`vec`からSegmentTreeを構築する.
    ///
    /// # Time complexity
    ///
    /// - *O*(*n*)
    #[must_use]
    pub fn from_vec(monoid: M, vec: Vec<M::T>) -> Self {
        let len = vec.len();
        let (size, log) = ceil_pow2(len);
        let mut data = Vec::with_capacity(size * 2);
        data.extend((0..size).map(|_| monoid.e()));
        data.extend(vec);
        data.extend((len..size).map(|_| monoid.e()));
        let mut tree = Self {
            data: data.into_boxed_slice(),
            len,
            size,
            log,
            monoid,
        };
        for k in (1..size).rev() {
            tree.update(k);
        }
        tracing::trace!(len, size, log, "built segment tree");
        tree
    }

    /// SegmentTreeの長さを返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// SegmentTreeが空かどうか調べる
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn update(&mut self, k: usize) {
        self.data[k] = self.monoid.op(&self.data[2 * k], &self.data[2 * k + 1]);
    }

    fn update_ancestors(&mut self, leaf: usize) {
        for i in 1..=self.log {
            self.update(leaf >> i);
        }
    }

    /// SegmentTreeの`index`番目の値を`value`に設定する.
    ///
    /// # Errors
    ///
    /// - `index >= self.len()`のとき`RangeError::IndexOutOfRange`を返し, 何も変更しない.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn set(&mut self, index: usize, value: M::T) -> Result<()> {
        check_index(index, self.len).inspect_err(log_rejected("SegmentTree::set"))?;
        let leaf = index + self.size;
        self.data[leaf] = value;
        self.update_ancestors(leaf);
        Ok(())
    }

    /// SegmentTreeの`index`番目の値を取得する.
    ///
    /// # Errors
    ///
    /// - `index >= self.len()`のとき`RangeError::IndexOutOfRange`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    pub fn get(&self, index: usize) -> Result<&M::T> {
        check_index(index, self.len).inspect_err(log_rejected("SegmentTree::get"))?;
        Ok(&self.data[index + self.size])
    }

    /// SegmentTreeの`index`番目の値の可変参照(のラッパー)を取得する.
    ///
    /// ラッパーが破棄されたときに祖先の値が再計算される.
    ///
    /// # Errors
    ///
    /// - `index >= self.len()`のとき`RangeError::IndexOutOfRange`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    /// - *O*(log *n*)  (ラッパーのデストラクタ)
    pub fn setter(
        &mut self,
        index: usize,
    ) -> Result<impl DerefMut<Target = M::T> + use<'_, M>> {
        check_index(index, self.len).inspect_err(log_rejected("SegmentTree::setter"))?;

        struct Wrapper<'a, M: Monoid>(&'a mut SegmentTree<M>, usize);
        impl<M: Monoid> Deref for Wrapper<'_, M> {
            type Target = M::T;
            fn deref(&self) -> &M::T {
                &self.0.data[self.1]
            }
        }
        impl<M: Monoid> DerefMut for Wrapper<'_, M> {
            fn deref_mut(&mut self) -> &mut M::T {
                &mut self.0.data[self.1]
            }
        }
        impl<M: Monoid> Drop for Wrapper<'_, M> {
            fn drop(&mut self) {
                self.0.update_ancestors(self.1);
            }
        }

        let leaf = index + self.size;
        Ok(Wrapper(self, leaf))
    }

    /// SegmentTreeの`range`の範囲の要素の総積を左から順に計算する.
    ///
    /// 空区間に対しては`monoid.e()`を返す.
    ///
    /// # Errors
    ///
    /// - `range`が`0..=self.len()`に含まれない, または始点が終点より大きいとき`RangeError`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn prod(&self, range: impl RangeBounds<usize>) -> Result<M::T> {
        let (left, right) =
            to_half_open(range, self.len).inspect_err(log_rejected("SegmentTree::prod"))?;
        if left == right {
            return Ok(self.monoid.e());
        }
        let mut left = left + self.size;
        let mut right = right + self.size;
        let mut left_val = self.monoid.e();
        let mut right_val = self.monoid.e();
        while left < right {
            if left & 1 == 1 {
                left_val = self.monoid.op(&left_val, &self.data[left]);
                left += 1;
            }
            if right & 1 == 1 {
                right -= 1;
                right_val = self.monoid.op(&self.data[right], &right_val);
            }
            left >>= 1;
            right >>= 1;
        }
        Ok(self.monoid.op(&left_val, &right_val))
    }

    /// 全要素の総積を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn all_prod(&self) -> &M::T {
        &self.data[1]
    }

    /// `f(self.prod(left..x))`が真となる最大の`x`を求める.
    ///
    /// `f`は単調であると仮定する. 全体で真なら`self.len()`を返す.
    ///
    /// # Constraints
    ///
    /// - `f(monoid.e())`は`true`である.
    ///
    /// # Errors
    ///
    /// - `left > self.len()`のとき`RangeError`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn max_right(&self, left: usize, f: impl Fn(&M::T) -> bool) -> Result<usize> {
        let (left, _) =
            to_half_open(left.., self.len).inspect_err(log_rejected("SegmentTree::max_right"))?;
        debug_assert!(f(&self.monoid.e()));
        if left == self.len {
            return Ok(self.len);
        }
        let mut k = left + self.size;
        let mut acc = self.monoid.e();
        loop {
            while k & 1 == 0 {
                k >>= 1;
            }
            let next = self.monoid.op(&acc, &self.data[k]);
            if !f(&next) {
                while k < self.size {
                    k *= 2;
                    let next = self.monoid.op(&acc, &self.data[k]);
                    if f(&next) {
                        acc = next;
                        k += 1;
                    }
                }
                return Ok(k - self.size);
            }
            acc = next;
            k += 1;
            if k.is_power_of_two() {
                return Ok(self.len);
            }
        }
    }

    /// `f(self.prod(x..right))`が真となる最小の`x`を求める.
    ///
    /// `f`は単調であると仮定する. 全体で真なら`0`を返す.
    ///
    /// # Constraints
    ///
    /// - `f(monoid.e())`は`true`である.
    ///
    /// # Errors
    ///
    /// - `right > self.len()`のとき`RangeError`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn min_left(&self, right: usize, f: impl Fn(&M::T) -> bool) -> Result<usize> {
        let (_, right) =
            to_half_open(..right, self.len).inspect_err(log_rejected("SegmentTree::min_left"))?;
        debug_assert!(f(&self.monoid.e()));
        if right == 0 {
            return Ok(0);
        }
        let mut k = right + self.size;
        let mut acc = self.monoid.e();
        loop {
            k -= 1;
            while k > 1 && k & 1 == 1 {
                k >>= 1;
            }
            let next = self.monoid.op(&self.data[k], &acc);
            if !f(&next) {
                while k < self.size {
                    k = 2 * k + 1;
                    let next = self.monoid.op(&self.data[k], &acc);
                    if f(&next) {
                        acc = next;
                        k -= 1;
                    }
                }
                return Ok(k + 1 - self.size);
            }
            acc = next;
            if k.is_power_of_two() {
                return Ok(0);
            }
        }
    }
}

impl<M: Monoid + Default> From<Vec<M::T>> for SegmentTree<M> {
    fn from(value: Vec<M::T>) -> Self {
        Self::from_vec(M::default(), value)
    }
}

impl<M: Monoid> AsRef<[M::T]> for SegmentTree<M> {
    fn as_ref(&self) -> &[M::T] {
        &self.data[self.size..self.size + self.len]
    }
}

impl<M: Monoid> std::ops::Index<usize> for SegmentTree<M> {
    type Output = M::T;

    fn index(&self, index: usize) -> &M::T {
        &self.as_ref()[index]
    }
}

impl<M: Monoid> std::fmt::Debug for SegmentTree<M>
where
    M::T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SegmentTree").field(&self.as_ref()).finish()
    }
}
