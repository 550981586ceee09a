use ndarray::ShapeError;
use std::convert::Infallible;
use thiserror::Error;

use crate::Scheme;

/// Errors returned by [`estimate_derivative`](crate::estimate_derivative) and
/// the individual estimators.
#[derive(Debug, Error)]
pub enum EstimateError {
    /// The integrator identifier is not one of the recognized schemes.
    #[error("unknown integrator `{0}`")]
    UnknownScheme(String),
    /// The scheme needs an argument that was not supplied.
    #[error("integrator `{scheme}` requires `{argument}`")]
    MissingArgument {
        scheme: Scheme,
        argument: &'static str,
    },
    /// Array arguments have incompatible shapes.
    #[error("array arguments have incompatible shapes: {0}")]
    Shape(#[from] ShapeError),
    /// The derivative field returned an array shaped differently from its
    /// state argument.
    #[error("derivative field returned shape {found:?} for a state of shape {expected:?}")]
    FieldShape {
        expected: Vec<usize>,
        found: Vec<usize>,
    },
    /// The state's last axis cannot be split into position and momentum
    /// halves of equal length.
    #[error("state of shape {shape:?} does not split into two equal halves along its last axis")]
    NotSeparable { shape: Vec<usize> },
    #[error("step size is zero")]
    ZeroStep,
}

/// Lets an already typed [`Scheme`] go through the same conversion as text.
impl From<Infallible> for EstimateError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
