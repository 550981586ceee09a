//! Collocation estimators over a fully sampled interval.
//!
//! All three schemes need both endpoints of the interval `[t1, t1 + dt]` and
//! are meant for fitting against a recorded trajectory rather than stepping
//! one forward. They share one pattern: blend the endpoint states into
//! interior collocation states, evaluate the field there and return a
//! quadrature-weighted sum of the slopes. The estimates approach the secant
//! slope `(x2 - x1) / dt` of the true trajectory.
//!
//! `cm4` and `cs6` correct their collocation states with slope differences.
//! Those corrections are passed through [`freeze`] so that, when the element
//! type tracks derivatives, the sensitivity of the estimate flows only
//! through the collocation states themselves and not back through the
//! correction terms.

use ndarray::prelude::*;

use crate::{check_endpoints, check_step, check_time, evaluate, freeze};
use crate::{DerivativeField, EstimateError, Scalar};

/// Offset `√3/6` of the Gauss–Legendre points from the interval midpoint, in
/// units of the interval length.
const GAUSS_OFFSET: f64 = 0.288_675_134_594_812_87;

fn check_interval<A, D>(
    x1: &ArrayView<A, D>,
    x2: &ArrayView<A, D>,
    t1: &ArrayView<A, D>,
    dt: A,
) -> Result<(), EstimateError>
where
    A: Scalar,
    D: Dimension,
{
    check_endpoints(x1, x2)?;
    check_time(t1, x1)?;
    check_step(dt)
}

/// Symmetric 4th order collocation at the two Gauss–Legendre points.
///
/// The collocation states `z1`, `z2` interpolate the endpoints linearly at
/// the Gauss times `tm`, `tp`. Each is then swapped to the opposite Gauss
/// time through a half-step extrapolation from the interval midpoint, and
/// the estimate is the mean of the field at the two corrected states.
pub fn srk4<A, D, F>(
    field: &mut F,
    x1: ArrayView<A, D>,
    x2: ArrayView<A, D>,
    t1: ArrayView<A, D>,
    dt: A,
) -> Result<Array<A, D>, EstimateError>
where
    A: Scalar,
    D: Dimension,
    F: DerivativeField<A, D>,
{
    check_interval(&x1, &x2, &t1, dt)?;

    let half = A::constant(0.5);
    let s = A::constant(GAUSS_OFFSET);
    let lo = A::constant(0.5 - GAUSS_OFFSET);
    let hi = A::constant(0.5 + GAUSS_OFFSET);

    let xh = (&x1 + &x2) * half;
    let z1 = &x1 * hi + &(&x2 * lo);
    let z2 = &x1 * lo + &(&x2 * hi);
    let tm = &t1 + lo * dt;
    let tp = &t1 + hi * dt;

    let z3 = &xh - &(evaluate(field, z2.view(), tp.view())? * (s * dt));
    let z4 = &xh + &(evaluate(field, z1.view(), tm.view())? * (s * dt));
    let g3 = evaluate(field, z3.view(), tm.view())?;
    let g4 = evaluate(field, z4.view(), tp.view())?;
    Ok((g3 + &g4) * half)
}

/// Cash and Moore's 4th order implicit collocation (Lobatto IIIA).
///
/// Simpson's rule over the interval, with the midpoint state taken from the
/// cubic Hermite interpolant of the endpoints.
pub fn cm4<A, D, F>(
    field: &mut F,
    x1: ArrayView<A, D>,
    x2: ArrayView<A, D>,
    t1: ArrayView<A, D>,
    dt: A,
) -> Result<Array<A, D>, EstimateError>
where
    A: Scalar,
    D: Dimension,
    F: DerivativeField<A, D>,
{
    check_interval(&x1, &x2, &t1, dt)?;

    let half = A::constant(0.5);
    let th = &t1 + half * dt;
    let t2 = &t1 + dt;

    let f1 = evaluate(field, x1.view(), t1.view())?;
    let f2 = evaluate(field, x2.view(), t2.view())?;

    let correction = freeze(&(&f2 - &f1)) * (A::constant(0.125) * dt);
    let z = (&x1 + &x2) * half - &correction;
    let gh = evaluate(field, z.view(), th.view())?;

    Ok((f1 + &f2) * A::constant(1. / 6.) + &(gh * A::constant(2. / 3.)))
}

/// Cash and Singhal's 6th order implicit collocation.
///
/// Collocation states at the quarter points come from fixed blends of the
/// endpoints plus endpoint slope corrections. The half point is the interval
/// midpoint corrected by the endpoint slope difference and the difference
/// of the quarter-point slopes. The five slopes are combined with Boole's
/// rule weights `7/90, 16/45, 2/15, 16/45, 7/90`.
pub fn cs6<A, D, F>(
    field: &mut F,
    x1: ArrayView<A, D>,
    x2: ArrayView<A, D>,
    t1: ArrayView<A, D>,
    dt: A,
) -> Result<Array<A, D>, EstimateError>
where
    A: Scalar,
    D: Dimension,
    F: DerivativeField<A, D>,
{
    check_interval(&x1, &x2, &t1, dt)?;

    let c = A::constant;
    let t14 = &t1 + c(0.25) * dt;
    let t12 = &t1 + c(0.5) * dt;
    let t34 = &t1 + c(0.75) * dt;
    let t2 = &t1 + dt;

    let f1 = evaluate(field, x1.view(), t1.view())?;
    let f2 = evaluate(field, x2.view(), t2.view())?;

    let x14 = &x1 * c(27. / 32.)
        + &(&x2 * c(5. / 32.))
        + &(freeze(&(&f1 * c(9. / 64.) - &(&f2 * c(3. / 64.)))) * dt);
    let x34 = &x1 * c(5. / 32.)
        + &(&x2 * c(27. / 32.))
        + &(freeze(&(&f1 * c(3. / 64.) - &(&f2 * c(9. / 64.)))) * dt);
    let g14 = evaluate(field, x14.view(), t14.view())?;
    let g34 = evaluate(field, x34.view(), t34.view())?;

    let x12 = (&x1 + &x2) * c(0.5) + &(freeze(&(&f2 - &f1)) * (c(5. / 24.) * dt))
        - &(freeze(&(&g34 - &g14)) * (c(2. / 3.) * dt));
    let g12 = evaluate(field, x12.view(), t12.view())?;

    Ok((f1 + &f2) * c(7. / 90.) + &((g14 + &g34) * c(16. / 45.)) + &(g12 * c(2. / 15.)))
}
