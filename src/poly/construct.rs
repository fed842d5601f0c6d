//! Construction of polynomial arrays from raw attributes

use super::clean::{CleanOptions, Indeterminates, postprocess_attributes};
use super::{Exponents, MonomialKey, PolyArray};
use crate::array::NdArray;
use crate::dtype::DType;
use crate::error::{Error, Result};

/// Build a polynomial array from exponents, coefficients and names
///
/// This is the single entry point every other constructor funnels through.
///
/// # Arguments
///
/// * `exponents` - one row per monomial, one column per indeterminate
/// * `coefficients` - one array per monomial; all must share a shape
/// * `indeterminates` - explicit names, or a prefix expanded to fit the
///   column count
/// * `dtype` - coefficient type; taken from the first coefficient array
///   when `None` (after canonicalisation, which promotes them all)
/// * `clean` - canonicalise the attributes first (merge duplicates, drop
///   zero terms and unused names, sort rows)
///
/// Without `clean`, the attributes must already be canonical: duplicate
/// names or exponent rows are rejected rather than merged.
///
/// # Example
///
/// ```
/// use numpoly::array::NdArray;
/// use numpoly::poly::{Exponents, polynomial_from_attributes};
///
/// // 1 + 2*x*y, as a scalar polynomial
/// let exponents = Exponents::from_rows(&[[0u32, 0], [1, 1]])?;
/// let coefficients = vec![NdArray::scalar(1i64), NdArray::scalar(2i64)];
/// let poly = polynomial_from_attributes(exponents, coefficients, ["x", "y"], None, true)?;
/// assert_eq!(poly.num_terms(), 2);
/// assert_eq!(poly.coefficient(&[1, 1]).unwrap().item::<i64>()?, 2);
/// # Ok::<(), numpoly::error::Error>(())
/// ```
pub fn polynomial_from_attributes(
    exponents: Exponents,
    coefficients: Vec<NdArray>,
    indeterminates: impl Into<Indeterminates>,
    dtype: Option<DType>,
    clean: bool,
) -> Result<PolyArray> {
    let (exponents, coefficients, names) = if clean {
        let attrs =
            postprocess_attributes(exponents, coefficients, indeterminates, CleanOptions::default())?;
        (attrs.exponents, attrs.coefficients, attrs.indeterminates)
    } else {
        let names = indeterminates.into().resolve(exponents.cols())?;
        if exponents.rows() != coefficients.len() {
            return Err(Error::attribute_mismatch(format!(
                "{} exponent rows but {} coefficient arrays",
                exponents.rows(),
                coefficients.len()
            )));
        }
        (exponents, coefficients, names)
    };

    let first = coefficients
        .first()
        .ok_or_else(|| Error::attribute_mismatch("no coefficient arrays given"))?;
    let shape = first.shape().to_vec();
    let dtype = dtype.unwrap_or(first.dtype());

    let mut poly = PolyArray::empty(exponents.clone(), &shape, names, dtype)?;
    for (row, values) in exponents.iter().zip(coefficients) {
        poly.set_term(&MonomialKey::from_exponent(row), values)?;
    }
    Ok(poly)
}
