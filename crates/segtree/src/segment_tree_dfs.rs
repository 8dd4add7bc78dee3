use std::ops::RangeBounds;

use tracing::trace;

use crate::error::{Result, SegmentTreeError};
use crate::monoid::Monoid;
use crate::traits::RangeFold;
use crate::util::Layout;

/// Segment tree whose operations descend from the root.
///
/// Same storage and results as [`crate::SegmentTree`]; node `k` covers the
/// half-open leaf range `[s, t)` passed alongside it.
pub struct SegmentTreeDfs<'a, M: Monoid> {
    monoid: &'a M,
    layout: Layout,
    data: Vec<M::S>,
}

impl<'a, M: Monoid> SegmentTreeDfs<'a, M> {
    pub fn new(values: &[M::S], monoid: &'a M) -> Result<Self> {
        let layout = Layout::new(values.len())?;
        let mut tree = Self {
            monoid,
            layout,
            data: vec![monoid.identity(); 2 * layout.size],
        };
        tree.build(values, 1, 0, layout.size);
        trace!(len = layout.len, size = layout.size, height = layout.log, "built dfs segment tree");
        Ok(tree)
    }

    pub fn with_len(len: usize, monoid: &'a M) -> Result<Self> {
        Self::new(&vec![monoid.identity(); len], monoid)
    }

    fn build(&mut self, values: &[M::S], k: usize, s: usize, t: usize) {
        if t - s == 1 {
            if let Some(value) = values.get(s) {
                self.data[k] = value.clone();
            }
            return;
        }
        let mid = (s + t) / 2;
        self.build(values, 2 * k, s, mid);
        self.build(values, 2 * k + 1, mid, t);
        self.pull(k);
    }

    #[inline(always)]
    fn pull(&mut self, k: usize) {
        self.data[k] = self.monoid.operation(&self.data[2 * k], &self.data[2 * k + 1]);
    }

    fn set_rec(&mut self, k: usize, s: usize, t: usize, index: usize, value: M::S) {
        if t - s == 1 {
            self.data[k] = value;
            return;
        }
        let mid = (s + t) / 2;
        if index < mid {
            self.set_rec(2 * k, s, mid, index, value);
        } else {
            self.set_rec(2 * k + 1, mid, t, index, value);
        }
        self.pull(k);
    }

    fn fold_rec(&self, k: usize, s: usize, t: usize, l: usize, r: usize) -> M::S {
        if r <= s || t <= l {
            return self.monoid.identity();
        }
        if l <= s && t <= r {
            return self.data[k].clone();
        }
        let mid = (s + t) / 2;
        let left = self.fold_rec(2 * k, s, mid, l, r);
        let right = self.fold_rec(2 * k + 1, mid, t, l, r);
        self.monoid.operation(&left, &right)
    }

    /// Returns the first leaf in `[max(s, left), t)` at which `is_ok` fails,
    /// extending `acc` over every node it accepts along the way.
    fn max_right_rec<P>(
        &self,
        k: usize,
        s: usize,
        t: usize,
        left: usize,
        is_ok: &mut P,
        acc: &mut M::S,
    ) -> Option<usize>
    where
        P: FnMut(&M::S) -> bool,
    {
        if t <= left {
            return None;
        }
        if left <= s {
            let next = self.monoid.operation(acc, &self.data[k]);
            if is_ok(&next) {
                *acc = next;
                return None;
            }
            if t - s == 1 {
                return Some(s);
            }
        }
        let mid = (s + t) / 2;
        self.max_right_rec(2 * k, s, mid, left, is_ok, acc)
            .or_else(|| self.max_right_rec(2 * k + 1, mid, t, left, is_ok, acc))
    }

    fn min_left_rec<P>(
        &self,
        k: usize,
        s: usize,
        t: usize,
        right: usize,
        is_ok: &mut P,
        acc: &mut M::S,
    ) -> Option<usize>
    where
        P: FnMut(&M::S) -> bool,
    {
        if right <= s {
            return None;
        }
        if t <= right {
            let next = self.monoid.operation(&self.data[k], acc);
            if is_ok(&next) {
                *acc = next;
                return None;
            }
            if t - s == 1 {
                return Some(t);
            }
        }
        let mid = (s + t) / 2;
        self.min_left_rec(2 * k + 1, mid, t, right, is_ok, acc)
            .or_else(|| self.min_left_rec(2 * k, s, mid, right, is_ok, acc))
    }
}

impl<M: Monoid> RangeFold for SegmentTreeDfs<'_, M> {
    type Value = M::S;

    fn len(&self) -> usize {
        self.layout.len
    }

    fn get(&self, index: usize) -> Result<&M::S> {
        self.layout.check_index(index)?;
        Ok(&self.data[self.layout.size + index])
    }

    fn set(&mut self, index: usize, value: M::S) -> Result<()> {
        self.layout.check_index(index)?;
        self.set_rec(1, 0, self.layout.size, index, value);
        Ok(())
    }

    fn fold<R: RangeBounds<usize>>(&self, range: R) -> Result<M::S> {
        let (start, end) = self.layout.resolve_range(range)?;
        Ok(self.fold_rec(1, 0, self.layout.size, start, end))
    }

    fn all_fold(&self) -> M::S {
        self.data[1].clone()
    }

    fn max_right<P>(&self, left: usize, mut is_ok: P) -> Result<usize>
    where
        P: FnMut(&M::S) -> bool,
    {
        self.layout.check_boundary(left)?;
        let mut acc = self.monoid.identity();
        if !is_ok(&acc) {
            return Err(SegmentTreeError::IdentityRejected);
        }
        let found = self.max_right_rec(1, 0, self.layout.size, left, &mut is_ok, &mut acc);
        Ok(found.unwrap_or(self.layout.len))
    }

    fn min_left<P>(&self, right: usize, mut is_ok: P) -> Result<usize>
    where
        P: FnMut(&M::S) -> bool,
    {
        self.layout.check_boundary(right)?;
        let mut acc = self.monoid.identity();
        if !is_ok(&acc) {
            return Err(SegmentTreeError::IdentityRejected);
        }
        let found = self.min_left_rec(1, 0, self.layout.size, right, &mut is_ok, &mut acc);
        Ok(found.unwrap_or(0))
    }
}
