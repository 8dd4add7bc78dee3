use std::ops::RangeBounds;

use tracing::trace;

use crate::error::Result;
use crate::monoid::Monoid;
use crate::traits::RangeApply;
use crate::util::Layout;

/// Bottom-up segment tree with lazy range actions.
///
/// `M` aggregates values, `A` composes actions and `map(f, x)` applies action
/// `f` to an aggregate `x`. Besides the [`Monoid`] laws for both, the caller
/// must guarantee
///
/// - `map(A::identity(), x) == x`
/// - `map(A::operation(f2, f1), x) == map(f2, map(f1, x))` (apply `f1` first)
/// - `map(f, M::operation(x, y)) == M::operation(map(f, x), map(f, y))`
///
/// Actions that depend on the number of covered elements (e.g. "add `v` to
/// each") need the element count carried inside the aggregate, like
/// `(sum, len)`.
///
/// `lazy[k]` holds an action already applied to `data[k]` but not yet to the
/// children of `k`. It is `A::identity()` when nothing is pending.
pub struct LazySegmentTree<'a, M, A, F>
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

impl<'a, M, A, F> LazySegmentTree<'a, M, A, F>
where
    M: Monoid,
    A: Monoid,
    F: Fn(&A::S, &M::S) -> M::S,
{
    pub fn new(values: &[M::S], monoid: &'a M, action: &'a A, map: &'a F) -> Result<Self> {
        let layout = Layout::new(values.len())?;
        let size = layout.size;
        let mut data = vec![monoid.identity(); 2 * size];
        data[size..size + values.len()].clone_from_slice(values);

        let mut tree = Self {
            monoid,
            action,
            map,
            layout,
            data,
            lazy: vec![action.identity(); size],
        };
        for i in (1..size).rev() {
            tree.pull(i);
        }
        trace!(len = layout.len, size, height = layout.log, "built lazy segment tree");
        Ok(tree)
    }

    pub fn with_len(len: usize, monoid: &'a M, action: &'a A, map: &'a F) -> Result<Self> {
        Self::new(&vec![monoid.identity(); len], monoid, action, map)
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

    /// Pushes every ancestor of leaf `p` from the root down.
    fn push_path(&mut self, p: usize) {
        for i in (1..=self.layout.log).rev() {
            self.push(p >> i);
        }
    }

    /// Pushes the ancestors of the boundary leaves `l` and `r - 1` whose
    /// subtree is split by `[l, r)`.
    fn push_boundaries(&mut self, l: usize, r: usize) {
        for i in (1..=self.layout.log).rev() {
            if ((l >> i) << i) != l {
                self.push(l >> i);
            }
            if ((r >> i) << i) != r {
                self.push((r - 1) >> i);
            }
        }
    }
}

impl<M, A, F> RangeApply for LazySegmentTree<'_, M, A, F>
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
        let p = index + self.layout.size;
        self.push_path(p);
        Ok(self.data[p].clone())
    }

    fn update(&mut self, index: usize, value: M::S) -> Result<()> {
        self.layout.check_index(index)?;
        let p = index + self.layout.size;
        self.push_path(p);
        self.data[p] = value;
        for i in 1..=self.layout.log {
            self.pull(p >> i);
        }
        Ok(())
    }

    fn fold<R: RangeBounds<usize>>(&mut self, range: R) -> Result<M::S> {
        let (start, end) = self.layout.resolve_range(range)?;
        let m = self.monoid;
        if start == end {
            return Ok(m.identity());
        }

        let mut l = start + self.layout.size;
        let mut r = end + self.layout.size;
        self.push_boundaries(l, r);

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

    fn apply<R: RangeBounds<usize>>(&mut self, range: R, action: A::S) -> Result<()> {
        let (start, end) = self.layout.resolve_range(range)?;
        if start == end {
            return Ok(());
        }

        let l = start + self.layout.size;
        let r = end + self.layout.size;
        self.push_boundaries(l, r);

        {
            let (mut l, mut r) = (l, r);
            while l < r {
                if (l & 1) == 1 {
                    self.apply_node(l, &action);
                    l += 1;
                }
                if (r & 1) == 1 {
                    r -= 1;
                    self.apply_node(r, &action);
                }
                l >>= 1;
                r >>= 1;
            }
        }

        for i in 1..=self.layout.log {
            if ((l >> i) << i) != l {
                self.pull(l >> i);
            }
            if ((r >> i) << i) != r {
                self.pull((r - 1) >> i);
            }
        }
        Ok(())
    }
}
