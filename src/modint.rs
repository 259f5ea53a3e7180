use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::{One, Zero};

/// 計算すると自動で mod `N` での値をとる数値型
///
/// 法はコンパイル時定数なので, 異なる法の値を同時に扱える.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ModInt<const N: u32 = 998244353>(u32);

impl<const N: u32> ModInt<N> {
    /// `val`を`N`で割って`ModInt<N>`を作る
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn new(val: u32) -> Self {
        Self(val % N)
    }

    /// `N`で割った値をu32で取り出す.
    #[must_use]
    pub fn val(self) -> u32 {
        self.0
    }

    /// 法`N`を返す
    #[must_use]
    pub const fn modulus() -> u32 {
        N
    }

    /// 値を`exp`乗する
    ///
    /// # Time complexity
    ///
    /// - *O*(log *exp*)
    #[must_use]
    pub fn pow(self, mut exp: u64) -> Self {
        let mut base = self;
        let mut r = Self::new(1);
        while exp > 0 {
            if exp & 1 == 1 {
                r *= base;
            }
            base *= base;
            exp >>= 1;
        }
        r
    }

    /// 逆元を拡張ユークリッドの互除法で求める. `N`と互いに素でなければ`None`
    ///
    /// # Time complexity
    ///
    /// - *O*(log *N*)
    #[must_use]
    pub fn checked_inv(self) -> Option<Self> {
        let (mut s, mut t) = (i64::from(N), i64::from(self.0));
        let (mut m0, mut m1) = (0i64, 1i64);
        while t != 0 {
            let u = s / t;
            s -= t * u;
            m0 -= m1 * u;
            std::mem::swap(&mut s, &mut t);
            std::mem::swap(&mut m0, &mut m1);
        }
        if s != 1 {
            return None;
        }
        Some(Self(m0.rem_euclid(i64::from(N)) as u32))
    }

    /// 値の逆数を求める
    ///
    /// # Panics
    ///
    /// - 値が`N`と互いに素でないとき
    ///
    /// # Time complexity
    ///
    /// - *O*(log *N*)
    #[must_use]
    pub fn inv(self) -> Self {
        match self.checked_inv() {
            Some(v) => v,
            None => panic!("{} has no inverse modulo {}", self.0, N),
        }
    }
}

impl<const N: u32> Add for ModInt<N> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        let r = u64::from(self.0) + u64::from(rhs.0);
        let r = if r >= u64::from(N) { r - u64::from(N) } else { r };
        Self(r as u32)
    }
}
impl<const N: u32> Sub for ModInt<N> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        if self.0 >= rhs.0 {
            Self(self.0 - rhs.0)
        } else {
            Self(N - (rhs.0 - self.0))
        }
    }
}
impl<const N: u32> Mul for ModInt<N> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self((u64::from(self.0) * u64::from(rhs.0) % u64::from(N)) as u32)
    }
}
impl<const N: u32> Div for ModInt<N> {
    type Output = Self;
    #[allow(clippy::suspicious_arithmetic_impl)]
    fn div(self, rhs: Self) -> Self {
        self * rhs.inv()
    }
}
impl<const N: u32> Neg for ModInt<N> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::default() - self
    }
}

macro_rules! impl_ref_ops {
    ($({$tr: ident, $mt: ident, $tr2: ident, $mt2: ident}),*$(,)?) => {$(
        impl<const N: u32> $tr<&Self> for ModInt<N> {
            type Output = Self;
            fn $mt(self, rhs: &Self) -> Self {
                self.$mt(*rhs)
            }
        }
        impl<const N: u32> $tr for &ModInt<N> {
            type Output = ModInt<N>;
            fn $mt(self, rhs: Self) -> ModInt<N> {
                (*self).$mt(*rhs)
            }
        }
        impl<const N: u32> $tr2 for ModInt<N> {
            fn $mt2(&mut self, rhs: Self) {
                *self = self.$mt(rhs);
            }
        }
    )*};
}

impl_ref_ops! {
    { Add, add, AddAssign, add_assign },
    { Sub, sub, SubAssign, sub_assign },
    { Mul, mul, MulAssign, mul_assign },
    { Div, div, DivAssign, div_assign },
}

impl<const N: u32> Zero for ModInt<N> {
    fn zero() -> Self {
        Self(0)
    }
    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl<const N: u32> One for ModInt<N> {
    fn one() -> Self {
        Self::new(1)
    }
}

impl<const N: u32> std::iter::Sum for ModInt<N> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + x)
    }
}

impl<const N: u32> std::iter::Product for ModInt<N> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), |acc, x| acc * x)
    }
}

macro_rules! impl_from_int {
    ($($t: ty),*$(,)?) => {$(
        impl<const N: u32> From<$t> for ModInt<N> {
            fn from(value: $t) -> Self {
                Self((value as i128).rem_euclid(i128::from(N)) as u32)
            }
        }
    )*};
}
impl_from_int! { u8, u16, u32, u64, usize, i8, i16, i32, i64, isize }

impl<const N: u32> std::fmt::Debug for ModInt<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.0, f)
    }
}
impl<const N: u32> std::fmt::Display for ModInt<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
