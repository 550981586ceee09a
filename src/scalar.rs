//! Element types accepted by the estimators.

use ndarray::prelude::*;
use ndarray::{Data, ScalarOperand};
use num_traits::Num;
use std::fmt::Debug;
use std::ops::Neg;

/// Numeric element of a state array.
///
/// Besides ordinary arithmetic, a scalar knows how to lift a numeric literal
/// into its own type and how to *freeze* itself. Freezing returns an equal
/// value that carries no derivative information, so an element type that
/// tracks derivatives (see [`Dual`](crate::dual::Dual)) stops propagating
/// them through the frozen value. Plain floats have nothing to drop.
pub trait Scalar: ScalarOperand + Copy + Debug + Num + Neg<Output = Self> {
    /// Converts a coefficient to this type.
    fn constant(value: f64) -> Self;

    /// Returns `self` detached from any derivative tracking.
    fn freeze(self) -> Self;
}

impl Scalar for f64 {
    fn constant(value: f64) -> Self {
        value
    }

    fn freeze(self) -> Self {
        self
    }
}

impl Scalar for f32 {
    fn constant(value: f64) -> Self {
        value as f32
    }

    fn freeze(self) -> Self {
        self
    }
}

/// Returns a new array holding the frozen elements of `a`.
///
/// `a` itself is left untouched, so it can keep feeding computations that
/// should still carry derivatives.
pub fn freeze<A, S, D>(a: &ArrayBase<S, D>) -> Array<A, D>
where
    A: Scalar,
    S: Data<Elem = A>,
    D: Dimension,
{
    a.mapv(A::freeze)
}
