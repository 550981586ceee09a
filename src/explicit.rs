//! Explicit single-point estimators.
//!
//! These schemes start from one sample and only query the field at states
//! they construct themselves, so they are usable when the end of the
//! sampling interval is unknown (`midpoint` being the exception: it averages
//! both endpoints before a single evaluation).

use ndarray::azip;
use ndarray::prelude::*;

use crate::{check_endpoints, check_step, check_time, evaluate};
use crate::{DerivativeField, EstimateError, Scalar};

/// Evaluates the field directly at `(x, t)`.
pub fn continuous<A, D, F>(
    field: &mut F,
    x: ArrayView<A, D>,
    t: ArrayView<A, D>,
) -> Result<Array<A, D>, EstimateError>
where
    A: Scalar,
    D: Dimension,
    F: DerivativeField<A, D>,
{
    check_time(&t, &x)?;
    evaluate(field, x, t)
}

/// Evaluates the field at the average of the two endpoints.
///
/// This is the implicit midpoint estimate: second order in the length of the
/// sampling interval.
pub fn midpoint<A, D, F>(
    field: &mut F,
    x1: ArrayView<A, D>,
    x2: ArrayView<A, D>,
    t1: ArrayView<A, D>,
    t2: ArrayView<A, D>,
) -> Result<Array<A, D>, EstimateError>
where
    A: Scalar,
    D: Dimension,
    F: DerivativeField<A, D>,
{
    check_endpoints(&x1, &x2)?;
    check_time(&t1, &x1)?;
    check_time(&t2, &x1)?;

    let half = A::constant(0.5);
    let x = (&x1 + &x2) * half;
    let t = (&t1 + &t2) * half;
    continuous(field, x.view(), t.view())
}

/// Classic 4-stage Runge–Kutta slope over a step `dt` from `(x1, t1)`.
///
/// Returns `(k1 + 2 k2 + 2 k3 + k4) / 6`, the slope of the secant to the RK4
/// prediction at `t1 + dt`.
pub fn rk4<A, D, F>(
    field: &mut F,
    x1: ArrayView<A, D>,
    t1: ArrayView<A, D>,
    dt: A,
) -> Result<Array<A, D>, EstimateError>
where
    A: Scalar,
    D: Dimension,
    F: DerivativeField<A, D>,
{
    check_time(&t1, &x1)?;
    check_step(dt)?;

    let half_dt = dt * A::constant(0.5);
    let t_half = &t1 + half_dt;
    let t_full = &t1 + dt;

    let k1 = evaluate(field, x1.view(), t1.view())?;
    let k2 = evaluate(field, (&x1 + &(&k1 * half_dt)).view(), t_half.view())?;
    let k3 = evaluate(field, (&x1 + &(&k2 * half_dt)).view(), t_half.view())?;
    let k4 = evaluate(field, (&x1 + &(&k3 * dt)).view(), t_full.view())?;

    let two = A::constant(2.);
    let sixth = A::constant(1. / 6.);
    let mut slope = k1;
    azip!((s in &mut slope, &k2 in &k2, &k3 in &k3, &k4 in &k4) {
        *s = (*s + two * (k2 + k3) + k4) * sixth;
    });
    Ok(slope)
}
