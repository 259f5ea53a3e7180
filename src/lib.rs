//! モノイド上のセグメント木と遅延伝搬セグメント木
//!
//! 載せる代数構造は値として構築時に渡し, 木ごとに保持する.
//!
//! ```
//! use monoseg::algebra::{Additive, Affine, RangeAffineRangeSum, Sum};
//! use monoseg::{LazySegmentTree, SegmentTree};
//!
//! let mut seg = SegmentTree::from_vec(Additive::new(), vec![1, 2, 3, 4, 5]);
//! assert_eq!(seg.prod(1..4), Ok(9));
//! seg.set(2, 10)?;
//! assert_eq!(seg.prod(..), Ok(22));
//!
//! let mut lazy = LazySegmentTree::from_vec(
//!     RangeAffineRangeSum::new(),
//!     seg.as_ref().iter().map(|&x| Sum::leaf(x)).collect(),
//! );
//! lazy.apply(0..5, &Affine::new(2, 0))?;
//! assert_eq!(lazy.prod(0..5)?.value, 44);
//! # Ok::<(), monoseg::RangeError>(())
//! ```

pub mod algebra;
pub mod error;
pub mod lazysegtree;
pub mod modint;
pub mod segmenttree;
pub mod util;

pub use error::{RangeError, Result};
pub use lazysegtree::{LazySegmentTree, MapMonoid};
pub use modint::ModInt;
pub use segmenttree::{Monoid, SegmentTree};
pub use util::{Associativity, Identity, Magma};
