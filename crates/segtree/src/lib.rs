//! Array-backed segment trees over caller-supplied monoids.
//!
//! - [`SegmentTree`] / [`SegmentTreeDfs`]: point update, range fold and
//!   binary search ([`RangeFold`]).
//! - [`LazySegmentTree`] / [`LazySegmentTreeDfs`]: range action and range
//!   fold with deferred propagation ([`RangeApply`]).
//!
//! The iterative and recursive variants of each family share storage layout
//! and return identical results.

mod error;
mod lazy_segment_tree;
mod lazy_segment_tree_dfs;
mod monoid;
mod segment_tree;
mod segment_tree_dfs;
mod traits;
mod util;

pub use error::{Result, SegmentTreeError};
pub use lazy_segment_tree::LazySegmentTree;
pub use lazy_segment_tree_dfs::LazySegmentTreeDfs;
pub use monoid::{Additive, Monoid, MonoidFn, monoid_fn};
pub use segment_tree::SegmentTree;
pub use segment_tree_dfs::SegmentTreeDfs;
pub use traits::{RangeApply, RangeFold};
