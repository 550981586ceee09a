//! Convergence order of the estimators on problems with known solutions.
//!
//! The step-based schemes estimate the slope of the secant between the two
//! samples of the exact trajectory, so halving `dt` should shrink their error
//! against that secant by `2^order`. Against the instantaneous derivative at
//! the start point every scheme is only first order.

use ndarray::array;
use ndarray::prelude::*;

use ndarray_derivative_estimate::{estimate_derivative, Sample, Scheme};

/// Harmonic oscillator `q' = p, p' = -q` on row states `[q, p]`.
fn harmonic(x: ArrayView2<f64>, _t: ArrayView2<f64>) -> Array2<f64> {
    x.dot(&array![[0., -1.], [1., 0.]])
}

/// Exact flow of `harmonic` over a time `dt`.
fn harmonic_flow(x: &Array2<f64>, dt: f64) -> Array2<f64> {
    let (c, s) = (dt.cos(), dt.sin());
    x.dot(&array![[c, -s], [s, c]])
}

/// `x' = cos(t)`, independent of the state.
fn cosine(x: ArrayView1<f64>, t: ArrayView1<f64>) -> Array1<f64> {
    Array1::from_elem(x.raw_dim(), t[0].cos())
}

fn max_abs(a: ArrayView2<f64>) -> f64 {
    a.fold(0., |acc, &e| f64::max(acc, e.abs()))
}

/// Returns the errors of the estimate against the secant slope and against
/// the derivative at the start point.
fn harmonic_errors(scheme: Scheme, dt: f64) -> (f64, f64) {
    let x1 = array![[1., 0.5]];
    let x2 = harmonic_flow(&x1, dt);
    let t1 = array![[0.]];
    let t2 = array![[dt]];
    let sample = Sample::new(x1.view(), t1.view())
        .with_x_end(x2.view())
        .with_t_end(t2.view())
        .with_step(dt);
    let dx = estimate_derivative(scheme, &mut harmonic, &sample).unwrap();

    let secant = (&x2 - &x1) / dt;
    let start = harmonic(x1.view(), t1.view());
    (max_abs((&dx - &secant).view()), max_abs((&dx - &start).view()))
}

fn assert_order(scheme: Scheme, dt: f64) {
    let (coarse, _) = harmonic_errors(scheme, dt);
    let (fine, _) = harmonic_errors(scheme, dt / 2.);
    let ratio = coarse / fine;
    let expected = 2f64.powi(scheme.order() as i32);
    assert!(
        ratio > 0.75 * expected && ratio < 1.3 * expected,
        "{}: error ratio {} for expected order {}",
        scheme,
        ratio,
        scheme.order()
    );
}

#[test]
fn euler_is_first_order() {
    assert_order(Scheme::Euler, 0.2);
}

#[test]
fn midpoint_is_second_order() {
    assert_order(Scheme::Midpoint, 0.2);
}

#[test]
fn rk4_is_fourth_order() {
    assert_order(Scheme::Rk4, 0.2);
    let (err, _) = harmonic_errors(Scheme::Rk4, 0.1);
    assert!(err < 2e-6);
}

#[test]
fn y4_is_fourth_order_for_separable_systems() {
    assert_order(Scheme::Y4, 0.2);
    let (err, _) = harmonic_errors(Scheme::Y4, 0.1);
    assert!(err < 2e-5);
}

#[test]
fn srk4_is_fourth_order() {
    assert_order(Scheme::Srk4, 0.2);
    let (err, _) = harmonic_errors(Scheme::Srk4, 0.1);
    assert!(err < 1e-6);
}

#[test]
fn cm4_is_fourth_order() {
    assert_order(Scheme::Cm4, 0.2);
    let (err, _) = harmonic_errors(Scheme::Cm4, 0.1);
    assert!(err < 1e-6);
}

#[test]
fn cs6_is_sixth_order() {
    // Larger steps keep the error clear of round-off in the secant.
    assert_order(Scheme::Cs6, 0.4);
    let (err, _) = harmonic_errors(Scheme::Cs6, 0.2);
    assert!(err < 2e-9);
}

#[test]
fn start_point_derivative_is_first_order() {
    for &scheme in &[Scheme::Rk4, Scheme::Srk4, Scheme::Cm4, Scheme::Cs6] {
        let (_, coarse) = harmonic_errors(scheme, 0.2);
        let (_, fine) = harmonic_errors(scheme, 0.1);
        let ratio = coarse / fine;
        assert!(ratio > 1.5 && ratio < 2.6, "{}: ratio {}", scheme, ratio);
    }
}

#[test]
fn time_dependent_field_uses_quadrature_nodes() {
    let (t1, dt): (f64, f64) = (0.3, 0.1);
    let x1 = array![t1.sin()];
    let x2 = array![(t1 + dt).sin()];
    let secant = (x2[0] - x1[0]) / dt;
    let (t1, t2) = (array![t1], array![t1 + dt]);
    let sample = Sample::new(x1.view(), t1.view())
        .with_x_end(x2.view())
        .with_t_end(t2.view())
        .with_step(dt);

    let tolerances = [
        (Scheme::Euler, 2e-2),
        (Scheme::Midpoint, 5e-4),
        (Scheme::Rk4, 1e-7),
        (Scheme::Srk4, 1e-7),
        (Scheme::Cm4, 1e-7),
        (Scheme::Cs6, 1e-11),
    ];
    for &(scheme, tol) in tolerances.iter() {
        let dx = estimate_derivative(scheme, &mut cosine, &sample).unwrap();
        let err = (dx[0] - secant).abs();
        assert!(err < tol, "{}: error {} above {}", scheme, err, tol);
    }
}
