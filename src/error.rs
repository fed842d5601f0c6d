//! Error types for numpoly

use crate::dtype::DType;
use thiserror::Error;

/// Result type alias using numpoly's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in numpoly operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Exponents, coefficients and indeterminates do not line up
    ///
    /// Raised at construction time when the raw polynomial attributes are
    /// structurally inconsistent: wrong column count, ragged coefficient
    /// shapes, an empty coefficient list, or duplicate/empty names that
    /// cannot be reconciled.
    #[error("Attribute mismatch: {reason}")]
    AttributeMismatch {
        /// What was inconsistent
        reason: String,
    },

    /// A name specification could not be expanded into indeterminate names
    #[error("Invalid name specification {spec:?}: {reason}")]
    InvalidNameSpec {
        /// The specification as given
        spec: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Shape mismatch in an operation
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Invalid dimension index
    #[error("Invalid dimension {dim} for array with {ndim} dimensions")]
    InvalidDimension {
        /// The invalid dimension
        dim: isize,
        /// Number of dimensions
        ndim: usize,
    },

    /// DType mismatch between operands
    #[error("DType mismatch: {lhs:?} vs {rhs:?}")]
    DTypeMismatch {
        /// Left-hand side dtype
        lhs: DType,
        /// Right-hand side dtype
        rhs: DType,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// No implementation is registered for an array function
    #[error("Not implemented: {function}")]
    NotImplemented {
        /// Name of the array function
        function: &'static str,
    },

    /// DType requires a cargo feature that is not enabled
    #[error("DType {dtype:?} requires feature '{feature}'")]
    FeatureRequired {
        /// The dtype that needs the feature
        dtype: DType,
        /// The missing feature
        feature: &'static str,
    },
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create an attribute mismatch error
    pub fn attribute_mismatch(reason: impl Into<String>) -> Self {
        Self::AttributeMismatch {
            reason: reason.into(),
        }
    }

    /// Create an invalid name specification error
    pub fn invalid_name_spec(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidNameSpec {
            spec: spec.into(),
            reason: reason.into(),
        }
    }
}
