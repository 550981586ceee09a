//! Symplectic splitting estimator for separable systems.

use ndarray::prelude::*;
use ndarray::Slice;

use crate::{check_step, check_time, evaluate};
use crate::{DerivativeField, EstimateError, Scalar};

lazy_static! {
    /// Yoshida's 4th order coefficients as `(c, d)` pairs, one per stage.
    ///
    /// `c = (c1, c2, c2, c1)` scales the position update and
    /// `d = (d1, d2, d1, 0)` the momentum update.
    static ref YOSHIDA: [(f64, f64); 4] = {
        let cbrt2 = 2f64.cbrt();
        let w = 2. - cbrt2;
        let c1 = 1. / (2. * w);
        let c2 = (1. - cbrt2) / (2. * w);
        let d1 = 1. / w;
        let d2 = -cbrt2 / w;
        [(c1, d1), (c2, d2), (c2, d1), (c1, 0.)]
    };
}

/// Yoshida 4th order splitting slope over a step `dt` from `(x1, t1)`.
///
/// The last axis of the state holds positions in its first half and momenta
/// in its second half. Each of the four stages drifts the positions along
/// the field at the current state, then kicks the momenta along the field at
/// the drifted state. The result is the slope `(x - x1) / dt` of the net
/// displacement. All stages evaluate the field at `t1`.
///
/// `u` is accepted for interface parity with controlled systems and is not
/// read.
///
/// # Errors
///
/// [`EstimateError::NotSeparable`] if the state has no axes or its last axis
/// has odd length.
pub fn y4<A, D, F>(
    field: &mut F,
    x1: ArrayView<A, D>,
    t1: ArrayView<A, D>,
    dt: A,
    _u: Option<ArrayView<A, D>>,
) -> Result<Array<A, D>, EstimateError>
where
    A: Scalar,
    D: Dimension,
    F: DerivativeField<A, D>,
{
    let axis = match x1.ndim().checked_sub(1).map(Axis) {
        Some(axis) if x1.len_of(axis) % 2 == 0 => axis,
        _ => {
            return Err(EstimateError::NotSeparable {
                shape: x1.shape().to_vec(),
            })
        }
    };
    check_time(&t1, &x1)?;
    check_step(dt)?;

    let positions = Slice::from(..x1.len_of(axis) / 2);
    let mut x = x1.to_owned();
    for &(c, d) in YOSHIDA.iter() {
        let drift = evaluate(field, x.view(), t1.view())? * (A::constant(c) * dt);
        let xh = &x + &drift;
        let kick = evaluate(field, xh.view(), t1.view())? * (A::constant(d) * dt);
        let mut xn = &x + &kick;
        xn.slice_axis_mut(axis, positions)
            .assign(&xh.slice_axis(axis, positions));
        x = xn;
    }
    Ok((x - &x1) / dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn oscillator(x: ArrayView2<f64>, _t: ArrayView2<f64>) -> Array2<f64> {
        let mut dx = Array2::zeros(x.raw_dim());
        dx.column_mut(0).assign(&x.column(1));
        dx.column_mut(1).assign(&x.column(0).mapv(|q| -q));
        dx
    }

    #[test]
    fn coefficients_are_consistent() {
        let c: f64 = YOSHIDA.iter().map(|&(c, _)| c).sum();
        let d: f64 = YOSHIDA.iter().map(|&(_, d)| d).sum();
        assert_abs_diff_eq!(c, 1., epsilon = 1e-14);
        assert_abs_diff_eq!(d, 1., epsilon = 1e-14);
        assert_abs_diff_eq!(YOSHIDA[0].0, 0.675_603_595_979_828_9, epsilon = 1e-15);
    }

    #[test]
    fn odd_state_is_not_separable() {
        let x = array![[1., 2., 3.]];
        let t = array![[0.]];
        let mut zero = |x: ArrayView2<f64>, _t: ArrayView2<f64>| Array2::<f64>::zeros(x.raw_dim());
        match y4(&mut zero, x.view(), t.view(), 0.1, None) {
            Err(EstimateError::NotSeparable { shape }) => assert_eq!(shape, vec![1, 3]),
            other => panic!("expected NotSeparable, got {:?}", other),
        }
    }

    #[test]
    fn zero_dimensional_state_is_not_separable() {
        let x = arr0(1.);
        let t = arr0(0.);
        let mut zero = |x: ArrayView0<f64>, _t: ArrayView0<f64>| Array0::<f64>::zeros(x.raw_dim());
        assert!(matches!(
            y4(&mut zero, x.view(), t.view(), 0.1, None),
            Err(EstimateError::NotSeparable { .. })
        ));
    }

    #[test]
    fn control_is_not_read() {
        let x = array![[1., 0.5], [0., 1.]];
        let t = array![[0.], [0.]];
        let u = array![[10., -10.], [3., 3.]];
        let plain = y4(&mut oscillator, x.view(), t.view(), 0.1, None).unwrap();
        let controlled = y4(&mut oscillator, x.view(), t.view(), 0.1, Some(u.view())).unwrap();
        assert_eq!(plain, controlled);
    }

    #[test]
    fn constant_field_slope() {
        // Positions move by c·dt·f and momenta by d·dt·f per stage; both
        // coefficient sets sum to one.
        let x = array![[2., -1.]];
        let t = array![[0.]];
        let mut constant =
            |x: ArrayView2<f64>, _t: ArrayView2<f64>| Array2::from_elem(x.raw_dim(), 3.);
        let dx = y4(&mut constant, x.view(), t.view(), 0.25, None).unwrap();
        assert_abs_diff_eq!(dx, array![[3., 3.]], epsilon = 1e-12);
    }
}
