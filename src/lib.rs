//! # numpoly
//!
//! **Multivariate polynomial arrays that behave like numeric arrays.**
//!
//! Every element of a [`PolyArray`] is a polynomial in a shared, named set of
//! indeterminates. The polynomial array is stored as one plain coefficient
//! array per monomial, so shape operations are just the same operation
//! applied to each coefficient array.
//!
//! ## Overview
//!
//! - **Representation**: exponent matrix, coefficient arrays and
//!   indeterminate names, kept canonical (unique rows, no zero terms, no
//!   unused names, graded row order)
//! - **Construction**: [`polynomial_from_attributes`] is the single entry
//!   point; [`symbols`] and [`variable`] create bare indeterminates from a
//!   compact name specification such as `"q:3"` or `"x y z"`
//! - **Dispatch**: generic array functions (`atleast_3d`, `reshape`, `amin`, ...)
//!   route through a [`DispatchTable`] to polynomial-aware overrides
//!
//! ## Quick Start
//!
//! ```
//! use numpoly::prelude::*;
//!
//! let q = symbols("q:3", false, DType::I64)?;
//! assert_eq!(q.names(), ["q0", "q1", "q2"]);
//!
//! let promoted = atleast_3d([q])?.into_poly()?;
//! assert_eq!(promoted.shape(), &[1, 3, 1]);
//! # Ok::<(), numpoly::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `f16`: Half-precision coefficients (F16, BF16)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod array;
pub mod dispatch;
pub mod dtype;
pub mod error;
pub mod poly;

pub use dispatch::{DispatchTable, atleast_3d};
pub use poly::{PolyArray, polynomial_from_attributes, symbols, variable};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::array::NdArray;
    pub use crate::dispatch::{
        ArrayArg, ArrayFunction, DispatchTable, Dispatched, FunctionArgs, amin, aspolynomial,
        atleast_1d, atleast_2d, atleast_3d, expand_dims, reshape,
    };
    pub use crate::dtype::DType;
    pub use crate::error::{Error, Result};
    pub use crate::poly::{
        Exponents, Indeterminates, PolyArray, isconstant, polynomial_from_attributes, symbols,
        variable,
    };
}
