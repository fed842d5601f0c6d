//! Generic array functions over plain and polynomial arrays
//!
//! Callers invoke an [`ArrayFunction`] through a [`DispatchTable`]. When any
//! operand is a [`PolyArray`](crate::poly::PolyArray) the table runs the
//! registered polynomial override; otherwise it runs the plain default
//! unchanged. The built-in table covers the shape functions in [`shape`]
//! ([`atleast_1d`], [`atleast_2d`], [`atleast_3d`], [`reshape`],
//! [`expand_dims`]) and the [`amin`] reduction; more functions can be added
//! through [`DispatchTable::builtin_builder`].

mod args;
mod reduce;
pub mod shape;
mod table;

pub use args::{ArrayArg, Dispatched, FunctionArgs, aspolynomial};
pub use reduce::amin;
pub use shape::{atleast_1d, atleast_2d, atleast_3d, expand_dims, reshape};
pub use table::{ArrayFunction, ArrayFunctionImpl, DispatchTable, DispatchTableBuilder};
