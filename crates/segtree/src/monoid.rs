//! Monoids supplied to the trees by the caller.

use std::marker::PhantomData;
use std::ops::Add;

/// An associative binary operation with an identity element.
///
/// Implementations must satisfy, for all `a`, `b`, `c`:
///
/// - `operation(operation(a, b), c) == operation(a, operation(b, c))`
/// - `operation(identity(), a) == a == operation(a, identity())`
///
/// The trees cannot detect a violation; they silently return wrong aggregates.
/// Commutativity is *not* required: results of left sub-ranges are always
/// passed as `a` and right sub-ranges as `b`.
///
/// `operation` may be called any number of times and in any grouping allowed
/// by associativity, so it must be free of observable side effects.
pub trait Monoid {
    type S: Clone;

    /// Called often; should be cheap.
    fn identity(&self) -> Self::S;
    fn operation(&self, a: &Self::S, b: &Self::S) -> Self::S;
}

/// A monoid assembled from an identity value and a closure.
#[derive(Clone, Debug)]
pub struct MonoidFn<S, Op> {
    identity: S,
    op: Op,
}

impl<S, Op> MonoidFn<S, Op>
where
    S: Clone,
    Op: Fn(&S, &S) -> S,
{
    pub fn new(identity: S, op: Op) -> Self {
        Self { identity, op }
    }
}

impl<S, Op> Monoid for MonoidFn<S, Op>
where
    S: Clone,
    Op: Fn(&S, &S) -> S,
{
    type S = S;

    #[inline(always)]
    fn identity(&self) -> S {
        self.identity.clone()
    }

    #[inline(always)]
    fn operation(&self, a: &S, b: &S) -> S {
        (self.op)(a, b)
    }
}

/// Shorthand for [`MonoidFn::new`].
pub fn monoid_fn<S, Op>(identity: S, op: Op) -> MonoidFn<S, Op>
where
    S: Clone,
    Op: Fn(&S, &S) -> S,
{
    MonoidFn::new(identity, op)
}

/// `(T::default(), +)`.
pub struct Additive<T>(PhantomData<fn() -> T>);

impl<T> Additive<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Additive<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Monoid for Additive<T>
where
    T: Clone + Default + Add<Output = T>,
{
    type S = T;

    #[inline(always)]
    fn identity(&self) -> T {
        T::default()
    }

    #[inline(always)]
    fn operation(&self, a: &T, b: &T) -> T {
        a.clone() + b.clone()
    }
}
