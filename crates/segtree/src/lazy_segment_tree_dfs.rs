use std::ops::RangeBounds;

use tracing::trace;

use crate::error::Result;
use crate::monoid::Monoid;
use crate::traits::RangeApply;
use crate::util::Layout;

/// Lazy segment tree whose operations descend from the root, pushing pending
/// actions into each partially covered node on the way down.
///
/// Observably equivalent to [`crate::LazySegmentTree`] and bound by the same
/// laws on `M`, `A` and `map`.
pub struct LazySegmentTreeDfs<'a, M, A, F>
where
    M: Monoid,
    A: Monoid,
{
    monoid: &'a M,
    action: &'a A,
    map: &'a F,
    layout: Layout,
    data: Vec<M::S>,
    lazy: Vec<A::S>,
}

impl<'a, M, A, F> LazySegmentTreeDfs<'a, M, A, F>
where
    M: Monoid,
    A: Monoid,
    F: Fn(&A::S, &M::S) -> M::S,
{
    pub fn new(values: &[M::S], monoid: &'a M, action: &'a A, map: &'a F) -> Result<Self> {
        let layout = Layout::new(values.len())?;
        let mut tree = Self {
            monoid,
            action,
            map,
            layout,
            data: vec![monoid.identity(); 2 * layout.size],
            lazy: vec![action.identity(); layout.size],
        };
        tree.build(values, 1, 0, layout.size);
        trace!(
            len = layout.len,
            size = layout.size,
            height = layout.log,
            "built dfs lazy segment tree"
        );
        Ok(tree)
    }

    pub fn with_len(len: usize, monoid: &'a M, action: &'a A, map: &'a F) -> Result<Self> {
        Self::new(&vec![monoid.identity(); len], monoid, action, map)
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

    #[inline(always)]
    fn apply_node(&mut self, k: usize, f: &A::S) {
        self.data[k] = (self.map)(f, &self.data[k]);
        if k < self.layout.size {
            self.lazy[k] = self.action.operation(f, &self.lazy[k]);
        }
    }

    fn push(&mut self, k: usize) {
        let f = std::mem::replace(&mut self.lazy[k], self.action.identity());
        self.apply_node(2 * k, &f);
        self.apply_node(2 * k + 1, &f);
    }

    fn apply_rec(&mut self, k: usize, s: usize, t: usize, l: usize, r: usize, f: &A::S) {
        if r <= s || t <= l {
            return;
        }
        if l <= s && t <= r {
            self.apply_node(k, f);
            return;
        }
        self.push(k);
        let mid = (s + t) / 2;
        self.apply_rec(2 * k, s, mid, l, r, f);
        self.apply_rec(2 * k + 1, mid, t, l, r, f);
        self.pull(k);
    }

    fn fold_rec(&mut self, k: usize, s: usize, t: usize, l: usize, r: usize) -> M::S {
        if r <= s || t <= l {
            return self.monoid.identity();
        }
        if l <= s && t <= r {
            return self.data[k].clone();
        }
        self.push(k);
        let mid = (s + t) / 2;
        let left = self.fold_rec(2 * k, s, mid, l, r);
        let right = self.fold_rec(2 * k + 1, mid, t, l, r);
        self.monoid.operation(&left, &right)
    }

    /// Walks to leaf `index`, pushing on the way, and returns its array slot.
    fn descend(&mut self, index: usize) -> usize {
        let (mut k, mut s, mut t) = (1, 0, self.layout.size);
        while t - s > 1 {
            self.push(k);
            let mid = (s + t) / 2;
            if index < mid {
                k = 2 * k;
                t = mid;
            } else {
                k = 2 * k + 1;
                s = mid;
            }
        }
        k
    }

    fn update_rec(&mut self, k: usize, s: usize, t: usize, index: usize, value: M::S) {
        if t - s == 1 {
            self.data[k] = value;
            return;
        }
        self.push(k);
        let mid = (s + t) / 2;
        if index < mid {
            self.update_rec(2 * k, s, mid, index, value);
        } else {
            self.update_rec(2 * k + 1, mid, t, index, value);
        }
        self.pull(k);
    }
}

impl<M, A, F> RangeApply for LazySegmentTreeDfs<'_, M, A, F>
where
    M: Monoid,
    A: Monoid,
    F: Fn(&A::S, &M::S) -> M::S,
{
    type Value = M::S;
    type Action = A::S;

    fn len(&self) -> usize {
        self.layout.len
    }

    fn get(&mut self, index: usize) -> Result<M::S> {
        self.layout.check_index(index)?;
        let k = self.descend(index);
        Ok(self.data[k].clone())
    }

    fn update(&mut self, index: usize, value: M::S) -> Result<()> {
        self.layout.check_index(index)?;
        self.update_rec(1, 0, self.layout.size, index, value);
        Ok(())
    }

    fn fold<R: RangeBounds<usize>>(&mut self, range: R) -> Result<M::S> {
        let (start, end) = self.layout.resolve_range(range)?;
        if start == end {
            return Ok(self.monoid.identity());
        }
        Ok(self.fold_rec(1, 0, self.layout.size, start, end))
    }

    fn all_fold(&self) -> M::S {
        self.data[1].clone()
    }

    fn apply<R: RangeBounds<usize>>(&mut self, range: R, action: A::S) -> Result<()> {
        let (start, end) = self.layout.resolve_range(range)?;
        if start == end {
            return Ok(());
        }
        self.apply_rec(1, 0, self.layout.size, start, end, &action);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::LazySegmentTreeDfs;
    use crate::error::SegmentTreeError;
    use crate::monoid::{Additive, Monoid, monoid_fn};
    use crate::traits::RangeApply;

    type SumLen = (i64, i64);

    fn sum_len() -> impl Monoid<S = SumLen> {
        monoid_fn((0, 0), |a: &SumLen, b: &SumLen| (a.0 + b.0, a.1 + b.1))
    }

    fn add_to_each(f: &i64, x: &SumLen) -> SumLen {
        (x.0 + f * x.1, x.1)
    }

    #[test]
    fn range_add_range_sum_scenario() {
        let values = sum_len();
        let add = Additive::<i64>::new();
        let mut seg = LazySegmentTreeDfs::new(&[(0, 1); 4], &values, &add, &add_to_each).unwrap();

        seg.apply(1..3, 5).unwrap();
        assert_eq!(seg.fold(0..4).unwrap().0, 10);
        assert_eq!(seg.fold(1..2).unwrap().0, 5);
        assert_eq!(seg.fold(0..1).unwrap().0, 0);
    }

    #[test]
    fn nested_actions_push_in_order() {
        let values = sum_len();
        let add = Additive::<i64>::new();
        let mut seg = LazySegmentTreeDfs::new(&[(0, 1); 5], &values, &add, &add_to_each).unwrap();

        seg.apply(.., 1).unwrap();
        seg.apply(1..4, 10).unwrap();
        seg.apply(2..3, 100).unwrap();
        let points: Vec<i64> = (0..5).map(|i| seg.get(i).unwrap().0).collect();
        assert_eq!(points, vec![1, 11, 111, 11, 1]);
        assert_eq!(seg.all_fold(), (135, 5));

        seg.update(2, (0, 1)).unwrap();
        assert_eq!(seg.fold(1..4).unwrap(), (22, 3));
    }

    #[test]
    fn errors_leave_state_untouched() {
        let values = sum_len();
        let add = Additive::<i64>::new();
        assert!(LazySegmentTreeDfs::new(&[], &values, &add, &add_to_each).is_err());

        let mut seg = LazySegmentTreeDfs::new(&[(1, 1); 3], &values, &add, &add_to_each).unwrap();
        assert_eq!(
            seg.apply(0..4, 1),
            Err(SegmentTreeError::InvalidRange { start: 0, end: 4, len: 3 })
        );
        assert_eq!(
            seg.get(3),
            Err(SegmentTreeError::IndexOutOfBounds { index: 3, len: 3 })
        );
        assert_eq!(seg.fold(..).unwrap(), (3, 3));
        assert_eq!(seg.fold(3..3).unwrap(), (0, 0));
    }
}
