use std::ops::RangeBounds;

use tracing::trace;

use crate::error::{Result, SegmentTreeError};
use crate::monoid::Monoid;
use crate::traits::RangeFold;
use crate::util::Layout;

/// Bottom-up segment tree with point update and range fold.
///
/// Node `i` has children `2i` and `2i + 1`; leaves start at `size`.
pub struct SegmentTree<'a, M: Monoid> {
    monoid: &'a M,
    layout: Layout,
    data: Vec<M::S>,
}

impl<'a, M: Monoid> SegmentTree<'a, M> {
    pub fn new(values: &[M::S], monoid: &'a M) -> Result<Self> {
        let layout = Layout::new(values.len())?;
        let size = layout.size;
        let mut data = vec![monoid.identity(); 2 * size];
        data[size..size + values.len()].clone_from_slice(values);

        let mut tree = Self {
            monoid,
            layout,
            data,
        };
        for i in (1..size).rev() {
            tree.pull(i);
        }
        trace!(len = layout.len, size, height = layout.log, "built segment tree");
        Ok(tree)
    }

    /// A tree of `len` identity elements.
    pub fn with_len(len: usize, monoid: &'a M) -> Result<Self> {
        Self::new(&vec![monoid.identity(); len], monoid)
    }

    #[inline(always)]
    fn pull(&mut self, k: usize) {
        self.data[k] = self.monoid.operation(&self.data[2 * k], &self.data[2 * k + 1]);
    }
}

impl<M: Monoid> RangeFold for SegmentTree<'_, M> {
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
        let mut p = index + self.layout.size;
        self.data[p] = value;
        while p > 1 {
            p >>= 1;
            self.pull(p);
        }
        Ok(())
    }

    fn fold<R: RangeBounds<usize>>(&self, range: R) -> Result<M::S> {
        let (start, end) = self.layout.resolve_range(range)?;
        let m = self.monoid;

        let mut l = start + self.layout.size;
        let mut r = end + self.layout.size;
        let mut left = m.identity();
        let mut right = m.identity();

        while l < r {
            if (l & 1) == 1 {
                left = m.operation(&left, &self.data[l]);
                l += 1;
            }
            if (r & 1) == 1 {
                r -= 1;
                right = m.operation(&self.data[r], &right);
            }
            l >>= 1;
            r >>= 1;
        }

        Ok(m.operation(&left, &right))
    }

    fn all_fold(&self) -> M::S {
        self.data[1].clone()
    }

    fn max_right<P>(&self, left: usize, mut is_ok: P) -> Result<usize>
    where
        P: FnMut(&M::S) -> bool,
    {
        self.layout.check_boundary(left)?;
        let m = self.monoid;
        if !is_ok(&m.identity()) {
            return Err(SegmentTreeError::IdentityRejected);
        }
        let Layout { len, size, .. } = self.layout;
        if left == len {
            return Ok(len);
        }

        let mut l = left + size;
        let mut acc = m.identity();
        loop {
            while l % 2 == 0 {
                l >>= 1;
            }
            let next = m.operation(&acc, &self.data[l]);
            if !is_ok(&next) {
                // The boundary is inside node `l`; descend to the leaf.
                while l < size {
                    l *= 2;
                    let next = m.operation(&acc, &self.data[l]);
                    if is_ok(&next) {
                        acc = next;
                        l += 1;
                    }
                }
                return Ok(l - size);
            }
            acc = next;
            l += 1;
            if l.is_power_of_two() {
                break;
            }
        }
        Ok(len)
    }

    fn min_left<P>(&self, right: usize, mut is_ok: P) -> Result<usize>
    where
        P: FnMut(&M::S) -> bool,
    {
        self.layout.check_boundary(right)?;
        let m = self.monoid;
        if !is_ok(&m.identity()) {
            return Err(SegmentTreeError::IdentityRejected);
        }
        if right == 0 {
            return Ok(0);
        }
        let size = self.layout.size;

        let mut r = right + size;
        let mut acc = m.identity();
        loop {
            r -= 1;
            while r > 1 && r % 2 == 1 {
                r >>= 1;
            }
            let next = m.operation(&self.data[r], &acc);
            if !is_ok(&next) {
                while r < size {
                    r = 2 * r + 1;
                    let next = m.operation(&self.data[r], &acc);
                    if is_ok(&next) {
                        acc = next;
                        r -= 1;
                    }
                }
                return Ok(r + 1 - size);
            }
            acc = next;
            if r.is_power_of_two() {
                break;
            }
        }
        Ok(0)
    }
}
