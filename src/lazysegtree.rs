use std::ops::{Deref, DerefMut, RangeBounds};

use super::error::Result;
use super::segmenttree::Monoid;
use super::util::{ceil_pow2, check_index, log_rejected, to_half_open};

/// 遅延伝搬セグメントツリーに載せる作用素付きモノイド
///
/// 作用素の合成`composition(f, g)`は「`g`を作用させた後に`f`を作用させる」ことを表す.
/// 以下を満たす必要がある (実行時には検査されない).
///
/// - `mapping(id(), x) == x`
/// - `composition(id(), f) == composition(f, id()) == f`
/// - `mapping(composition(f, g), x) == mapping(f, mapping(g, x))`
/// - `mapping(f, op(x, y)) == op(mapping(f, x), mapping(f, y))`
pub trait MapMonoid: Monoid {
    /// 作用素の型
    type F: Clone;

    /// 恒等写像を返す
    fn id(&self) -> Self::F;
    /// `g`の後に`f`を作用させる作用素を返す
    fn composition(&self, f: &Self::F, g: &Self::F) -> Self::F;
    /// `x`に`f`を作用させる
    fn mapping(&self, f: &Self::F, x: &Self::T) -> Self::T;
}

/// 遅延伝搬セグメントツリー
///
/// 特定の条件を満たすクエリの区間更新・区間取得が可能である.
/// 内部ノード`k`の`lazy[k]`は, `k`の子孫にまだ伝搬していない作用素である.
/// `data[k]`は`k`に届いた全ての作用を反映済みである.
#[derive(Clone)]
pub struct LazySegmentTree<M: MapMonoid> {
    data: Box<[M::T]>,
    lazy: Box<[M::F]>,
    len: usize,
    size: usize,
    log: u32,
    monoid: M,
}

impl<M: MapMonoid> LazySegmentTree<M> {
    /// 全ての要素が`monoid.e()`で初期化された長さ`n`のLazySegmentTreeを構築する.
    ///
    /// # Time complexity
    ///
    /// - *O*(*n*)
    #[must_use]
    pub fn new(monoid: M, n: usize) -> Self {
        let (size, log) = ceil_pow2(n);
        let data = (0..size * 2).map(|_| monoid.e()).collect();
        let lazy = (0..size).map(|_| monoid.id()).collect();
        tracing::trace!(len = n, size, log, "built lazy segment tree");
        Self {
            data,
            lazy,
            len: n,
            size,
            log,
            monoid,
        }
    }

    /// 配列`vec`からLazySegmentTreeを構築する.
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
        let lazy = (0..size).map(|_| monoid.id()).collect();
        let mut tree = Self {
            data: data.into_boxed_slice(),
            lazy,
            len,
            size,
            log,
            monoid,
        };
        for k in (1..size).rev() {
            tree.update(k);
        }
        tracing::trace!(len, size, log, "built lazy segment tree");
        tree
    }

    /// 列の長さを返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// 列が空かどうか判定する
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 子の値から`data[k]`を再計算する. 子は`k`に届いた作用を反映済みでなければならない.
    fn update(&mut self, k: usize) {
        self.data[k] = self.monoid.op(&self.data[2 * k], &self.data[2 * k + 1]);
    }

    /// ノード`k`に`f`を作用させ, 内部ノードなら子孫への作用として溜めておく.
    /// 新しい作用素は既存の作用素の左から合成する.
    fn all_apply(&mut self, k: usize, f: &M::F) {
        self.data[k] = self.monoid.mapping(f, &self.data[k]);
        if k < self.size {
            self.lazy[k] = self.monoid.composition(f, &self.lazy[k]);
        }
    }

    fn push(&mut self, k: usize) {
        let f = std::mem::replace(&mut self.lazy[k], self.monoid.id());
        self.all_apply(2 * k, &f);
        self.all_apply(2 * k + 1, &f);
    }

    /// 葉`leaf`の祖先の作用素を根から順に伝搬する
    fn push_ancestors(&mut self, leaf: usize) {
        for i in (1..=self.log).rev() {
            self.push(leaf >> i);
        }
    }

    fn update_ancestors(&mut self, leaf: usize) {
        for i in 1..=self.log {
            self.update(leaf >> i);
        }
    }

    /// 葉の区間`left..right`の境界にかかる祖先の作用素を根から順に伝搬する
    fn push_boundaries(&mut self, left: usize, right: usize) {
        for i in (1..=self.log).rev() {
            if ((left >> i) << i) != left {
                self.push(left >> i);
            }
            if ((right >> i) << i) != right {
                self.push((right - 1) >> i);
            }
        }
    }

    /// 指定した位置の値を変更する
    ///
    /// # Errors
    ///
    /// - `index >= self.len()`のとき`RangeError::IndexOutOfRange`を返し, 何も変更しない.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn set(&mut self, index: usize, item: M::T) -> Result<()> {
        check_index(index, self.len).inspect_err(log_rejected("LazySegmentTree::set"))?;
        let leaf = index + self.size;
        self.push_ancestors(leaf);
        self.data[leaf] = item;
        self.update_ancestors(leaf);
        Ok(())
    }

    /// 指定した位置の要素の可変参照のラッパーを返す
    ///
    /// # Errors
    ///
    /// - `index >= self.len()`のとき`RangeError::IndexOutOfRange`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    /// - *O*(log *n*) (デストラクタ)
    pub fn setter(
        &mut self,
        index: usize,
    ) -> Result<impl DerefMut<Target = M::T> + use<'_, M>> {
        check_index(index, self.len).inspect_err(log_rejected("LazySegmentTree::setter"))?;

        struct Wrapper<'a, M: MapMonoid>(&'a mut LazySegmentTree<M>, usize);
        impl<M: MapMonoid> Deref for Wrapper<'_, M> {
            type Target = M::T;
            fn deref(&self) -> &M::T {
                &self.0.data[self.1]
            }
        }
        impl<M: MapMonoid> DerefMut for Wrapper<'_, M> {
            fn deref_mut(&mut self) -> &mut M::T {
                &mut self.0.data[self.1]
            }
        }
        impl<M: MapMonoid> Drop for Wrapper<'_, M> {
            fn drop(&mut self) {
                self.0.update_ancestors(self.1);
            }
        }

        let leaf = index + self.size;
        self.push_ancestors(leaf);
        Ok(Wrapper(self, leaf))
    }

    /// 指定した位置の値を取得する
    ///
    /// # Errors
    ///
    /// - `index >= self.len()`のとき`RangeError::IndexOutOfRange`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn get(&mut self, index: usize) -> Result<&M::T> {
        check_index(index, self.len).inspect_err(log_rejected("LazySegmentTree::get"))?;
        let leaf = index + self.size;
        self.push_ancestors(leaf);
        Ok(&self.data[leaf])
    }

    /// 指定した位置の値を, 木を変更せずに取得する
    ///
    /// # Errors
    ///
    /// - `index >= self.len()`のとき`RangeError::IndexOutOfRange`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn get_imu(&self, index: usize) -> Result<M::T> {
        check_index(index, self.len).inspect_err(log_rejected("LazySegmentTree::get_imu"))?;
        Ok(self.leaf_imu(index + self.size))
    }

    fn leaf_imu(&self, leaf: usize) -> M::T {
        let mut f = self.monoid.id();
        for i in (1..=self.log).rev() {
            f = self.monoid.composition(&f, &self.lazy[leaf >> i]);
        }
        self.monoid.mapping(&f, &self.data[leaf])
    }

    /// 指定した区間の値の総積を計算する
    ///
    /// # Errors
    ///
    /// - `range`が`0..=self.len()`に含まれない, または始点が終点より大きいとき`RangeError`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn prod(&mut self, range: impl RangeBounds<usize>) -> Result<M::T> {
        let (left, right) =
            to_half_open(range, self.len).inspect_err(log_rejected("LazySegmentTree::prod"))?;
        if left == right {
            return Ok(self.monoid.e());
        }
        let mut left = left + self.size;
        let mut right = right + self.size;
        self.push_boundaries(left, right);

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

    /// 全要素の総積を返す
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn all_prod(&self) -> &M::T {
        &self.data[1]
    }

    /// 指定した位置の要素に作用素`f`を適用する
    ///
    /// # Errors
    ///
    /// - `index >= self.len()`のとき`RangeError::IndexOutOfRange`を返し, 何も変更しない.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn apply_at(&mut self, index: usize, f: &M::F) -> Result<()> {
        check_index(index, self.len).inspect_err(log_rejected("LazySegmentTree::apply_at"))?;
        let leaf = index + self.size;
        self.push_ancestors(leaf);
        self.data[leaf] = self.monoid.mapping(f, &self.data[leaf]);
        self.update_ancestors(leaf);
        Ok(())
    }

    /// 指定した区間に作用素`f`を適用する
    ///
    /// # Errors
    ///
    /// - `range`が`0..=self.len()`に含まれない, または始点が終点より大きいとき`RangeError`を返し, 何も変更しない.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn apply(&mut self, range: impl RangeBounds<usize>, f: &M::F) -> Result<()> {
        let (left, right) =
            to_half_open(range, self.len).inspect_err(log_rejected("LazySegmentTree::apply"))?;
        if left == right {
            return Ok(());
        }
        let left = left + self.size;
        let right = right + self.size;
        self.push_boundaries(left, right);
        {
            let mut left = left;
            let mut right = right;
            while left < right {
                if left & 1 == 1 {
                    self.all_apply(left, f);
                    left += 1;
                }
                if right & 1 == 1 {
                    right -= 1;
                    self.all_apply(right, f);
                }
                left >>= 1;
                right >>= 1;
            }
        }
        for i in 1..=self.log {
            if ((left >> i) << i) != left {
                self.update(left >> i);
            }
            if ((right >> i) << i) != right {
                self.update((right - 1) >> i);
            }
        }
        Ok(())
    }

    /// `g(self.prod(left..x))`が真となる最大の`x`を求める.
    ///
    /// `g`は単調であると仮定する. 全体で真なら`self.len()`を返す.
    ///
    /// # Constraints
    ///
    /// - `g(monoid.e())`は`true`である.
    ///
    /// # Errors
    ///
    /// - `left > self.len()`のとき`RangeError`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn max_right(&mut self, left: usize, g: impl Fn(&M::T) -> bool) -> Result<usize> {
        let (left, _) = to_half_open(left.., self.len)
            .inspect_err(log_rejected("LazySegmentTree::max_right"))?;
        debug_assert!(g(&self.monoid.e()));
        if left == self.len {
            return Ok(self.len);
        }
        let mut k = left + self.size;
        self.push_ancestors(k);
        let mut acc = self.monoid.e();
        loop {
            while k & 1 == 0 {
                k >>= 1;
            }
            let next = self.monoid.op(&acc, &self.data[k]);
            if !g(&next) {
                while k < self.size {
                    self.push(k);
                    k *= 2;
                    let next = self.monoid.op(&acc, &self.data[k]);
                    if g(&next) {
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

    /// `g(self.prod(x..right))`が真となる最小の`x`を求める.
    ///
    /// `g`は単調であると仮定する. 全体で真なら`0`を返す.
    ///
    /// # Constraints
    ///
    /// - `g(monoid.e())`は`true`である.
    ///
    /// # Errors
    ///
    /// - `right > self.len()`のとき`RangeError`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn min_left(&mut self, right: usize, g: impl Fn(&M::T) -> bool) -> Result<usize> {
        let (_, right) = to_half_open(..right, self.len)
            .inspect_err(log_rejected("LazySegmentTree::min_left"))?;
        debug_assert!(g(&self.monoid.e()));
        if right == 0 {
            return Ok(0);
        }
        let mut k = right + self.size;
        self.push_ancestors(k - 1);
        let mut acc = self.monoid.e();
        loop {
            k -= 1;
            while k > 1 && k & 1 == 1 {
                k >>= 1;
            }
            let next = self.monoid.op(&self.data[k], &acc);
            if !g(&next) {
                while k < self.size {
                    self.push(k);
                    k = 2 * k + 1;
                    let next = self.monoid.op(&self.data[k], &acc);
                    if g(&next) {
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

    /// 全ての作用素を伝搬し, 列を取り出す
    ///
    /// # Time complexity
    ///
    /// - *O*(*n*)
    #[must_use]
    pub fn into_vec(mut self) -> Vec<M::T> {
        for k in 1..self.size {
            self.push(k);
        }
        let mut data = self.data.into_vec();
        data.truncate(self.size + self.len);
        data.split_off(self.size)
    }
}

impl<M: MapMonoid + Default> From<Vec<M::T>> for LazySegmentTree<M> {
    fn from(value: Vec<M::T>) -> Self {
        Self::from_vec(M::default(), value)
    }
}

impl<M: MapMonoid> std::fmt::Debug for LazySegmentTree<M>
where
    M::T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let items = (0..self.len)
            .map(|index| self.leaf_imu(index + self.size))
            .collect::<Vec<_>>();
        f.debug_tuple("LazySegmentTree").field(&items).finish()
    }
}
