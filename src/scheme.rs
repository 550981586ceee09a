//! Integrator identifiers.

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use crate::EstimateError;

/// Numerical scheme used to estimate the time derivative of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Field evaluated at the start point.
    Euler,
    /// Field evaluated at the average of the two endpoints (implicit
    /// midpoint).
    Midpoint,
    /// Classic explicit 4-stage Runge–Kutta.
    Rk4,
    /// Yoshida's 4th order symplectic splitting, for separable systems.
    Y4,
    /// Symmetric 4th order collocation at the two Gauss–Legendre points.
    Srk4,
    /// Cash and Moore's 4th order implicit collocation.
    Cm4,
    /// Cash and Singhal's 6th order implicit collocation.
    Cs6,
}

impl Scheme {
    pub const ALL: [Scheme; 7] = [
        Scheme::Euler,
        Scheme::Midpoint,
        Scheme::Rk4,
        Scheme::Y4,
        Scheme::Srk4,
        Scheme::Cm4,
        Scheme::Cs6,
    ];

    /// Canonical lowercase identifier.
    pub fn name(self) -> &'static str {
        match self {
            Scheme::Euler => "euler",
            Scheme::Midpoint => "midpoint",
            Scheme::Rk4 => "rk4",
            Scheme::Y4 => "y4",
            Scheme::Srk4 => "srk4",
            Scheme::Cm4 => "cm4",
            Scheme::Cs6 => "cs6",
        }
    }

    /// Order of accuracy in `dt`.
    ///
    /// For the step-based schemes this is the order at which the estimate
    /// approaches the secant slope `(x_end - x_start) / dt` of the exact
    /// trajectory. `y4` reaches its order only for separable systems.
    pub fn order(self) -> usize {
        match self {
            Scheme::Euler => 1,
            Scheme::Midpoint => 2,
            Scheme::Rk4 | Scheme::Y4 | Scheme::Srk4 | Scheme::Cm4 => 4,
            Scheme::Cs6 => 6,
        }
    }

    /// Returns `true` if the scheme needs the end state of the sample.
    pub fn requires_end(self) -> bool {
        match self {
            Scheme::Midpoint | Scheme::Srk4 | Scheme::Cm4 | Scheme::Cs6 => true,
            Scheme::Euler | Scheme::Rk4 | Scheme::Y4 => false,
        }
    }

    /// Returns `true` if the scheme needs the step size.
    pub fn requires_step(self) -> bool {
        match self {
            Scheme::Euler | Scheme::Midpoint => false,
            Scheme::Rk4 | Scheme::Y4 | Scheme::Srk4 | Scheme::Cm4 | Scheme::Cs6 => true,
        }
    }

    /// Number of derivative field evaluations per estimate.
    pub fn evaluations(self) -> usize {
        match self {
            Scheme::Euler | Scheme::Midpoint => 1,
            Scheme::Rk4 | Scheme::Srk4 => 4,
            Scheme::Y4 => 8,
            Scheme::Cm4 => 3,
            Scheme::Cs6 => 5,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = EstimateError;

    /// Parses an identifier, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Scheme::ALL
            .iter()
            .copied()
            .find(|scheme| scheme.name() == lower)
            .ok_or_else(|| EstimateError::UnknownScheme(s.to_string()))
    }
}

impl TryFrom<&str> for Scheme {
    type Error = EstimateError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        name.parse()
    }
}

/// `false` is shorthand for [`Scheme::Euler`]; `true` names no scheme.
impl TryFrom<bool> for Scheme {
    type Error = EstimateError;

    fn try_from(flag: bool) -> Result<Self, Self::Error> {
        if flag {
            Err(EstimateError::UnknownScheme(flag.to_string()))
        } else {
            Ok(Scheme::Euler)
        }
    }
}
