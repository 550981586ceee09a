//! Time-derivative estimates of sampled state trajectories.
//!
//! Given a derivative field `f(x, t)` and one or two samples of a trajectory,
//! [`estimate_derivative`] returns a derivative value consistent with the
//! chosen [`Scheme`]. Nothing is simulated: the estimators only evaluate the
//! field at states and times derived from the samples, which makes them
//! suitable as regression targets when fitting a dynamics model.
//!
//! States are arrays of shape `(..., N)`. Leading axes are batch axes and
//! pass through every estimator unchanged. Times are arrays of the same
//! dimensionality whose shape broadcasts to the state's, e.g. `(B, 1)` for a
//! `(B, N)` state.

#[macro_use]
extern crate lazy_static;

pub mod collocation;
pub mod dual;
mod error;
pub mod explicit;
mod scalar;
mod scheme;
pub mod splitting;

pub use crate::error::EstimateError;
pub use crate::scalar::{freeze, Scalar};
pub use crate::scheme::Scheme;

use ndarray::prelude::*;
use ndarray::{Data, ErrorKind, ShapeError};
use std::convert::TryInto;

/// Continuous-time derivative field of a dynamical system.
///
/// `derivative(x, t)` must return an array of exactly the shape of `x`.
pub trait DerivativeField<A, D: Dimension> {
    fn derivative(&mut self, x: ArrayView<A, D>, t: ArrayView<A, D>) -> Array<A, D>;
}

impl<A, D, F> DerivativeField<A, D> for F
where
    D: Dimension,
    F: FnMut(ArrayView<A, D>, ArrayView<A, D>) -> Array<A, D>,
{
    fn derivative(&mut self, x: ArrayView<A, D>, t: ArrayView<A, D>) -> Array<A, D> {
        self(x, t)
    }
}

/// Evaluates `field` and checks that it kept the shape of `x`.
pub(crate) fn evaluate<A, D, F>(
    field: &mut F,
    x: ArrayView<A, D>,
    t: ArrayView<A, D>,
) -> Result<Array<A, D>, EstimateError>
where
    D: Dimension,
    F: DerivativeField<A, D>,
{
    let expected = x.shape().to_vec();
    let dx = field.derivative(x, t);
    if dx.shape() != &expected[..] {
        return Err(EstimateError::FieldShape {
            expected,
            found: dx.shape().to_vec(),
        });
    }
    Ok(dx)
}

fn incompatible() -> EstimateError {
    ShapeError::from_kind(ErrorKind::IncompatibleShape).into()
}

/// Checks that a time array broadcasts to the shape of the state `x`.
pub(crate) fn check_time<A, D: Dimension>(
    t: &ArrayView<A, D>,
    x: &ArrayView<A, D>,
) -> Result<(), EstimateError> {
    t.broadcast(x.raw_dim()).map(|_| ()).ok_or_else(incompatible)
}

/// Checks that both endpoint states have the same shape.
pub(crate) fn check_endpoints<A, D: Dimension>(
    x1: &ArrayView<A, D>,
    x2: &ArrayView<A, D>,
) -> Result<(), EstimateError> {
    if x1.shape() == x2.shape() {
        Ok(())
    } else {
        Err(incompatible())
    }
}

/// Rejects a zero step. Only the value counts, not any derivative it carries.
pub(crate) fn check_step<A: Scalar>(dt: A) -> Result<(), EstimateError> {
    if dt.freeze().is_zero() {
        Err(EstimateError::ZeroStep)
    } else {
        Ok(())
    }
}

/// Returns a time array holding `t` that broadcasts to the shape of `x`.
///
/// The result has the dimensionality of `x` and length one along every
/// axis.
pub fn scalar_time<A, S, D>(t: A, x: &ArrayBase<S, D>) -> Array<A, D>
where
    A: Clone,
    S: Data,
    D: Dimension,
{
    let mut dim = x.raw_dim();
    for len in dim.slice_mut() {
        *len = 1;
    }
    Array::from_elem(dim, t)
}

/// Arguments of a derivative estimate.
///
/// Only `x_start` and `t_start` are always needed; which of the optional
/// arguments must be present depends on the [`Scheme`].
#[derive(Debug, Clone)]
pub struct Sample<'a, A, D: Dimension> {
    /// State at the start of the sampling interval.
    pub x_start: ArrayView<'a, A, D>,
    /// State at the end of the sampling interval.
    pub x_end: Option<ArrayView<'a, A, D>>,
    /// Time at the start of the sampling interval.
    pub t_start: ArrayView<'a, A, D>,
    /// Time at the end of the sampling interval.
    pub t_end: Option<ArrayView<'a, A, D>>,
    /// Length of the sampling interval. Its sign gives the direction.
    pub dt: Option<A>,
    /// Control input. Accepted for interface parity; no scheme reads it.
    pub u: Option<ArrayView<'a, A, D>>,
}

impl<'a, A, D: Dimension> Sample<'a, A, D> {
    pub fn new(x_start: ArrayView<'a, A, D>, t_start: ArrayView<'a, A, D>) -> Self {
        Sample {
            x_start,
            x_end: None,
            t_start,
            t_end: None,
            dt: None,
            u: None,
        }
    }

    pub fn with_x_end(mut self, x_end: ArrayView<'a, A, D>) -> Self {
        self.x_end = Some(x_end);
        self
    }

    pub fn with_t_end(mut self, t_end: ArrayView<'a, A, D>) -> Self {
        self.t_end = Some(t_end);
        self
    }

    pub fn with_step(mut self, dt: A) -> Self {
        self.dt = Some(dt);
        self
    }

    pub fn with_control(mut self, u: ArrayView<'a, A, D>) -> Self {
        self.u = Some(u);
        self
    }
}

fn require<T>(
    value: Option<T>,
    scheme: Scheme,
    argument: &'static str,
) -> Result<T, EstimateError> {
    value.ok_or(EstimateError::MissingArgument { scheme, argument })
}

/// Estimates the time derivative of `sample` with the given scheme.
///
/// | scheme     | uses                                  |
/// |------------|---------------------------------------|
/// | `Euler`    | `x_start`, `t_start`                  |
/// | `Midpoint` | `x_start`, `x_end`, `t_start`, `t_end`|
/// | `Rk4`      | `x_start`, `t_start`, `dt`            |
/// | `Y4`       | `x_start`, `t_start`, `dt`            |
/// | `Srk4`     | `x_start`, `x_end`, `t_start`, `dt`   |
/// | `Cm4`      | `x_start`, `x_end`, `t_start`, `dt`   |
/// | `Cs6`      | `x_start`, `x_end`, `t_start`, `dt`   |
///
/// `scheme` is a [`Scheme`] or anything that converts into one: an
/// identifier such as `"rk4"` (case is ignored) or the `false` shorthand for
/// `Euler`.
///
/// # Errors
///
/// * [`EstimateError::UnknownScheme`] if `scheme` names no scheme.
/// * [`EstimateError::MissingArgument`] if the scheme needs an argument the
///   sample lacks.
/// * [`EstimateError::Shape`] if the sample's arrays have incompatible
///   shapes.
/// * [`EstimateError::ZeroStep`] if `dt` is zero.
/// * [`EstimateError::FieldShape`] if `field` breaks its shape contract.
/// * [`EstimateError::NotSeparable`] if `Y4` is given a state whose last
///   axis has odd length.
pub fn estimate_derivative<S, A, D, F>(
    scheme: S,
    field: &mut F,
    sample: &Sample<'_, A, D>,
) -> Result<Array<A, D>, EstimateError>
where
    S: TryInto<Scheme>,
    EstimateError: From<S::Error>,
    A: Scalar,
    D: Dimension,
    F: DerivativeField<A, D>,
{
    let scheme = scheme.try_into()?;
    let x1 = sample.x_start.view();
    let t1 = sample.t_start.view();
    match scheme {
        Scheme::Euler => explicit::continuous(field, x1, t1),
        Scheme::Midpoint => {
            let x2 = require(sample.x_end.as_ref(), scheme, "x_end")?.view();
            let t2 = require(sample.t_end.as_ref(), scheme, "t_end")?.view();
            explicit::midpoint(field, x1, x2, t1, t2)
        }
        Scheme::Rk4 => {
            let dt = require(sample.dt, scheme, "dt")?;
            explicit::rk4(field, x1, t1, dt)
        }
        Scheme::Y4 => {
            let dt = require(sample.dt, scheme, "dt")?;
            let u = sample.u.as_ref().map(|u| u.view());
            splitting::y4(field, x1, t1, dt, u)
        }
        Scheme::Srk4 => {
            let x2 = require(sample.x_end.as_ref(), scheme, "x_end")?.view();
            let dt = require(sample.dt, scheme, "dt")?;
            collocation::srk4(field, x1, x2, t1, dt)
        }
        Scheme::Cm4 => {
            let x2 = require(sample.x_end.as_ref(), scheme, "x_end")?.view();
            let dt = require(sample.dt, scheme, "dt")?;
            collocation::cm4(field, x1, x2, t1, dt)
        }
        Scheme::Cs6 => {
            let x2 = require(sample.x_end.as_ref(), scheme, "x_end")?.view();
            let dt = require(sample.dt, scheme, "dt")?;
            collocation::cs6(field, x1, x2, t1, dt)
        }
    }
}
