//! Polynomial arrays
//!
//! A polynomial array stores, for each monomial, one plain coefficient array
//! of the polynomial array's shape. This module holds the representation
//! ([`Exponents`], [`MonomialKey`], [`PolyArray`]), the canonicaliser that
//! keeps it unique ([`postprocess_attributes`]), the constructor everything
//! funnels through ([`polynomial_from_attributes`]) and the name parser
//! behind [`symbols`].

mod clean;
mod construct;
mod exponents;
mod polynomial;
mod symbols;

pub use clean::{
    Attributes, CleanOptions, DEFAULT_VARNAME, Indeterminates, canonicalize,
    postprocess_attributes,
};
pub use construct::polynomial_from_attributes;
pub use exponents::{Exponents, MonomialKey};
pub use polynomial::PolyArray;
pub use symbols::{NameSpec, ParsedNames, parse_names, symbols, variable};

use crate::error::Result;

/// Whether a polynomial array has no non-constant terms
///
/// See [`PolyArray::isconstant`].
pub fn isconstant(poly: &PolyArray) -> Result<bool> {
    poly.isconstant()
}
