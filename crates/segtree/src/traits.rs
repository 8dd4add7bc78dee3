use std::ops::RangeBounds;

use crate::error::Result;

/// Point update / range fold over a fixed-length sequence.
///
/// Ranges are half-open and may be given as any `RangeBounds<usize>`.
pub trait RangeFold {
    type Value;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The raw element at `index`. No folding happens.
    fn get(&self, index: usize) -> Result<&Self::Value>;

    fn set(&mut self, index: usize, value: Self::Value) -> Result<()>;

    /// Folds the elements of `range` left to right. An empty range yields the identity.
    fn fold<R: RangeBounds<usize>>(&self, range: R) -> Result<Self::Value>;

    fn all_fold(&self) -> Self::Value;

    /// Largest `r` in `[left, len]` with `is_ok(fold(left..r))`.
    ///
    /// `is_ok` must be monotone: once it rejects a range it must reject every
    /// extension of it. This is not checked.
    fn max_right<P>(&self, left: usize, is_ok: P) -> Result<usize>
    where
        P: FnMut(&Self::Value) -> bool;

    /// Smallest `l` in `[0, right]` with `is_ok(fold(l..right))`.
    ///
    /// Same monotonicity requirement as [`RangeFold::max_right`].
    fn min_left<P>(&self, right: usize, is_ok: P) -> Result<usize>
    where
        P: FnMut(&Self::Value) -> bool;
}

/// Range action / range fold over a fixed-length sequence.
///
/// Reads take `&mut self` because they push pending actions down the tree.
pub trait RangeApply {
    type Value;
    type Action;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&mut self, index: usize) -> Result<Self::Value>;

    /// Overwrites the element at `index`, bypassing the mapping.
    fn update(&mut self, index: usize, value: Self::Value) -> Result<()>;

    fn fold<R: RangeBounds<usize>>(&mut self, range: R) -> Result<Self::Value>;

    fn all_fold(&self) -> Self::Value;

    /// Applies `action` to every element of `range`.
    fn apply<R: RangeBounds<usize>>(&mut self, range: R, action: Self::Action) -> Result<()>;
}
