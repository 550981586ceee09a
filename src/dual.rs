//! Forward-mode dual numbers.
//!
//! A `Dual` carries a value together with its derivative with respect to one
//! seeded input. Running an estimator over `Dual` arrays yields the estimate
//! and its sensitivity in one pass. Frozen values drop their derivative part,
//! which is how the collocation schemes keep their slope corrections out of
//! the sensitivity.

use ndarray::ScalarOperand;
use num_traits::{Num, One, Zero};
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

use crate::Scalar;

/// Dual number `val + eps·ε` with `ε² = 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Dual {
    /// Real part.
    pub val: f64,
    /// Infinitesimal part.
    pub eps: f64,
}

impl Dual {
    pub fn new(val: f64, eps: f64) -> Self {
        Dual { val, eps }
    }

    /// A value with unit derivative, i.e. the input being differentiated
    /// against.
    pub fn variable(val: f64) -> Self {
        Dual::new(val, 1.)
    }

    /// A value with zero derivative.
    pub fn constant(val: f64) -> Self {
        Dual::new(val, 0.)
    }
}

impl Add for Dual {
    type Output = Dual;
    fn add(self, rhs: Dual) -> Dual {
        Dual::new(self.val + rhs.val, self.eps + rhs.eps)
    }
}

impl Sub for Dual {
    type Output = Dual;
    fn sub(self, rhs: Dual) -> Dual {
        Dual::new(self.val - rhs.val, self.eps - rhs.eps)
    }
}

impl Mul for Dual {
    type Output = Dual;
    fn mul(self, rhs: Dual) -> Dual {
        Dual::new(self.val * rhs.val, self.val * rhs.eps + self.eps * rhs.val)
    }
}

impl Div for Dual {
    type Output = Dual;
    fn div(self, rhs: Dual) -> Dual {
        Dual::new(
            self.val / rhs.val,
            (self.eps * rhs.val - self.val * rhs.eps) / (rhs.val * rhs.val),
        )
    }
}

impl Rem for Dual {
    type Output = Dual;
    fn rem(self, rhs: Dual) -> Dual {
        // d(a mod b) = da - trunc(a / b)·db away from the discontinuities.
        let q = (self.val / rhs.val).trunc();
        Dual::new(self.val % rhs.val, self.eps - q * rhs.eps)
    }
}

impl Neg for Dual {
    type Output = Dual;
    fn neg(self) -> Dual {
        Dual::new(-self.val, -self.eps)
    }
}

impl Zero for Dual {
    fn zero() -> Self {
        Dual::constant(0.)
    }

    fn is_zero(&self) -> bool {
        self.val == 0. && self.eps == 0.
    }
}

impl One for Dual {
    fn one() -> Self {
        Dual::constant(1.)
    }
}

impl Num for Dual {
    type FromStrRadixErr = <f64 as Num>::FromStrRadixErr;

    fn from_str_radix(s: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        f64::from_str_radix(s, radix).map(Dual::constant)
    }
}

impl ScalarOperand for Dual {}

impl Scalar for Dual {
    fn constant(value: f64) -> Self {
        Dual::constant(value)
    }

    fn freeze(self) -> Self {
        Dual::constant(self.val)
    }
}
