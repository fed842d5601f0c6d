//! Polynomial array value type

use super::{Exponents, MonomialKey};
use crate::array::NdArray;
use crate::dtype::{DType, can_cast_safely};
use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Array whose elements are polynomials in a shared set of indeterminates
///
/// A `PolyArray` is the triple `(exponents, coefficients, indeterminates)`:
/// monomial `i` has exponent row `exponents.row(i)` and its value at every
/// position of the array is held in `coefficients[i]`, a plain [`NdArray`]
/// of the polynomial array's `shape` and `dtype`.
///
/// Values are built only through [`polynomial_from_attributes`] (or the
/// helpers funnelling into it) and are immutable afterwards. Operations that
/// appear to modify a polynomial array return a new value; they may share
/// storage with the input at the level of the coefficient arrays.
///
/// [`polynomial_from_attributes`]: super::polynomial_from_attributes
#[derive(Clone)]
pub struct PolyArray {
    shape: Vec<usize>,
    dtype: DType,
    indeterminates: Vec<String>,
    exponents: Exponents,
    keys: Vec<MonomialKey>,
    coefficients: Vec<NdArray>,
}

impl PolyArray {
    /// Allocate a polynomial array with zero-filled monomial slots
    ///
    /// Slots are filled afterwards with [`PolyArray::set_term`].
    pub(crate) fn empty(
        exponents: Exponents,
        shape: &[usize],
        indeterminates: Vec<String>,
        dtype: DType,
    ) -> Result<Self> {
        if exponents.cols() != indeterminates.len() {
            return Err(Error::attribute_mismatch(format!(
                "{} exponent columns for {} indeterminates",
                exponents.cols(),
                indeterminates.len()
            )));
        }
        if exponents.is_empty() {
            return Err(Error::attribute_mismatch("polynomial has no monomials"));
        }

        let mut seen = HashSet::with_capacity(indeterminates.len());
        for name in &indeterminates {
            if name.is_empty() {
                return Err(Error::attribute_mismatch("empty indeterminate name"));
            }
            if !seen.insert(name.as_str()) {
                return Err(Error::attribute_mismatch(format!(
                    "indeterminate '{name}' appears more than once"
                )));
            }
        }

        let keys: Vec<MonomialKey> = exponents.iter().map(MonomialKey::from_exponent).collect();
        let unique: HashSet<&MonomialKey> = keys.iter().collect();
        if unique.len() != keys.len() {
            return Err(Error::attribute_mismatch("duplicate exponent rows"));
        }

        let zero = NdArray::zeros(shape, dtype);
        let coefficients = vec![zero; keys.len()];

        Ok(Self {
            shape: shape.to_vec(),
            dtype,
            indeterminates,
            exponents,
            keys,
            coefficients,
        })
    }

    /// Assign the coefficient array of the monomial addressed by `key`
    pub(crate) fn set_term(&mut self, key: &MonomialKey, values: NdArray) -> Result<()> {
        let slot = self.slot(key).ok_or_else(|| {
            Error::attribute_mismatch(format!("no monomial with key '{key}'"))
        })?;
        if values.shape() != self.shape.as_slice() {
            return Err(Error::attribute_mismatch(format!(
                "coefficient for '{key}' has shape {:?}, expected {:?}",
                values.shape(),
                self.shape
            )));
        }
        if !can_cast_safely(values.dtype(), self.dtype) {
            debug!(%key, from = %values.dtype(), to = %self.dtype, "lossy coefficient cast");
        }
        self.coefficients[slot] = values.cast(self.dtype)?;
        Ok(())
    }

    /// Wrap a plain array as a constant polynomial in `q0`
    pub fn from_constant(values: NdArray) -> Self {
        let key = MonomialKey::from_exponent(&[0]);
        Self {
            shape: values.shape().to_vec(),
            dtype: values.dtype(),
            indeterminates: vec![format!("{}0", super::DEFAULT_VARNAME)],
            exponents: Exponents::zeros(1, 1),
            keys: vec![key],
            coefficients: vec![values],
        }
    }

    fn slot(&self, key: &MonomialKey) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    // ===== Accessors =====

    /// Shape shared by every coefficient array
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of array dimensions
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Coefficient element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Indeterminate names, one per exponent column
    #[inline]
    pub fn indeterminates(&self) -> &[String] {
        &self.indeterminates
    }

    /// Alias for [`PolyArray::indeterminates`]
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.indeterminates
    }

    /// Exponent matrix
    #[inline]
    pub fn exponents(&self) -> &Exponents {
        &self.exponents
    }

    /// Coefficient arrays, aligned with the exponent rows
    #[inline]
    pub fn coefficients(&self) -> &[NdArray] {
        &self.coefficients
    }

    /// Monomial keys, aligned with the exponent rows
    #[inline]
    pub fn keys(&self) -> &[MonomialKey] {
        &self.keys
    }

    /// Number of monomials
    #[inline]
    pub fn num_terms(&self) -> usize {
        self.keys.len()
    }

    /// Coefficient array stored under `key`
    pub fn get(&self, key: &MonomialKey) -> Option<&NdArray> {
        self.slot(key).map(|slot| &self.coefficients[slot])
    }

    /// Coefficient array of the monomial with the given exponents
    pub fn coefficient(&self, exponent: &[u32]) -> Option<&NdArray> {
        if exponent.len() != self.indeterminates.len() {
            return None;
        }
        self.get(&MonomialKey::from_exponent(exponent))
    }

    // ===== Predicates =====

    /// Whether the polynomial array has no non-constant terms
    ///
    /// Monomials of positive degree with all-zero coefficients do not count.
    pub fn isconstant(&self) -> Result<bool> {
        for (row, coefficient) in self.exponents.iter().zip(&self.coefficients) {
            if row.iter().any(|&e| e != 0) && !coefficient.is_all_zero()? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Same names, exponents, shape, dtype and coefficient values
    pub fn structurally_eq(&self, other: &Self) -> Result<bool> {
        if self.shape != other.shape
            || self.dtype != other.dtype
            || self.indeterminates != other.indeterminates
            || self.exponents != other.exponents
        {
            return Ok(false);
        }
        for (a, b) in self.coefficients.iter().zip(&other.coefficients) {
            if !a.array_eq(b)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    // ===== Transformations =====

    /// Apply a plain-array operation to every coefficient array
    ///
    /// The results are reassembled with the same exponents and names and
    /// canonicalised again; they must all share one shape.
    pub fn map_coefficients<F>(&self, mut f: F) -> Result<Self>
    where
        F: FnMut(&NdArray) -> Result<NdArray>,
    {
        let coefficients = self
            .coefficients
            .iter()
            .map(&mut f)
            .collect::<Result<Vec<_>>>()?;
        super::polynomial_from_attributes(
            self.exponents.clone(),
            coefficients,
            self.indeterminates.clone(),
            None,
            true,
        )
    }

    /// Decompose into `(exponents, coefficients, indeterminates)`
    pub fn into_parts(self) -> (Exponents, Vec<NdArray>, Vec<String>) {
        (self.exponents, self.coefficients, self.indeterminates)
    }
}

impl fmt::Debug for PolyArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolyArray")
            .field("shape", &self.shape)
            .field("dtype", &self.dtype)
            .field("names", &self.indeterminates)
            .field("exponents", &self.exponents)
            .finish()
    }
}

impl fmt::Display for PolyArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PolyArray({:?}, dtype={}, names=[{}], terms={})",
            self.shape,
            self.dtype,
            self.indeterminates.join(", "),
            self.num_terms()
        )
    }
}
