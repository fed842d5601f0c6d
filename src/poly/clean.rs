//! Canonicalisation of raw polynomial attributes
//!
//! A raw `(exponents, coefficients, indeterminates)` triple may name the same
//! indeterminate twice, repeat exponent rows, carry monomials whose
//! coefficients are all zero, or mention indeterminates no monomial uses.
//! [`postprocess_attributes`] folds all of that away and fixes a
//! deterministic row order, so that two semantically equal polynomial
//! arrays have identical attributes.

use super::Exponents;
use crate::array::NdArray;
use crate::dtype::{DType, promote_all};
use crate::error::{Error, Result};
use std::collections::HashMap;
use tracing::debug;

/// Default indeterminate name prefix
pub const DEFAULT_VARNAME: &str = "q";

/// Indeterminate names, given explicitly or as a prefix to be expanded
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Indeterminates {
    /// One name per exponent column
    Names(Vec<String>),
    /// Prefix `p`: resolves to `p` for one column, `p0, p1, ...` otherwise
    Prefix(String),
}

impl Indeterminates {
    /// Prefix placeholder
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::Prefix(prefix.into())
    }

    /// Resolve to exactly `count` names
    pub fn resolve(self, count: usize) -> Result<Vec<String>> {
        let names = match self {
            Self::Names(names) => {
                if names.len() != count {
                    return Err(Error::attribute_mismatch(format!(
                        "{} indeterminate names for {count} exponent columns",
                        names.len()
                    )));
                }
                names
            }
            Self::Prefix(prefix) if count == 1 => vec![prefix],
            Self::Prefix(prefix) => (0..count).map(|i| format!("{prefix}{i}")).collect(),
        };

        if let Some(pos) = names.iter().position(String::is_empty) {
            return Err(Error::attribute_mismatch(format!(
                "indeterminate {pos} has an empty name"
            )));
        }
        Ok(names)
    }
}

impl Default for Indeterminates {
    fn default() -> Self {
        Self::Prefix(DEFAULT_VARNAME.to_string())
    }
}

impl From<&str> for Indeterminates {
    fn from(prefix: &str) -> Self {
        Self::Prefix(prefix.to_string())
    }
}

impl From<Vec<String>> for Indeterminates {
    fn from(names: Vec<String>) -> Self {
        Self::Names(names)
    }
}

impl From<Vec<&str>> for Indeterminates {
    fn from(names: Vec<&str>) -> Self {
        Self::Names(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Indeterminates {
    fn from(names: &[&str]) -> Self {
        Self::Names(names.iter().map(|name| name.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Indeterminates {
    fn from(names: [&str; N]) -> Self {
        Self::Names(names.iter().map(|name| name.to_string()).collect())
    }
}

/// Switches for the optional canonicalisation steps
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CleanOptions {
    /// Keep monomials whose coefficients are all zero
    pub retain_coefficients: bool,
    /// Keep indeterminates no monomial uses
    pub retain_names: bool,
}

/// A canonical `(exponents, coefficients, indeterminates)` triple
#[derive(Clone, Debug)]
pub struct Attributes {
    /// One row per monomial, one column per indeterminate
    pub exponents: Exponents,
    /// One array per monomial, all of one shape and dtype
    pub coefficients: Vec<NdArray>,
    /// Unique indeterminate names
    pub indeterminates: Vec<String>,
}

/// Canonicalise a raw attribute triple with default options
pub fn canonicalize(
    exponents: Exponents,
    coefficients: Vec<NdArray>,
    indeterminates: impl Into<Indeterminates>,
) -> Result<Attributes> {
    postprocess_attributes(
        exponents,
        coefficients,
        indeterminates,
        CleanOptions::default(),
    )
}

/// Canonicalise a raw attribute triple
///
/// Steps, in order:
/// 1. Validate row/column counts and that all coefficient arrays share a shape.
/// 2. Collapse duplicate indeterminate names; their exponent columns are
///    summed, since `x^a * x^b = x^(a+b)`.
/// 3. Merge identical exponent rows by summing their coefficient arrays.
/// 4. Drop rows whose coefficients are all zero, falling back to a single
///    zero-exponent row when nothing is left.
/// 5. Drop indeterminates no remaining row uses, keeping at least one.
/// 6. Sort rows by total degree, then lexicographically.
///
/// Coefficient arrays of different dtypes are promoted to a common dtype.
/// Arrays that are not merged are passed through without copying.
pub fn postprocess_attributes(
    exponents: Exponents,
    coefficients: Vec<NdArray>,
    indeterminates: impl Into<Indeterminates>,
    options: CleanOptions,
) -> Result<Attributes> {
    let names = indeterminates.into().resolve(exponents.cols())?;
    let (shape, dtype) = validate(&exponents, &coefficients)?;
    let rows_in = exponents.rows();
    let names_in = names.len();

    let (names, rows) = collapse_names(&exponents, names)?;
    let mut terms = merge_rows(rows, coefficients)?;
    for term in &mut terms {
        term.1 = term.1.cast(dtype)?;
    }

    if !options.retain_coefficients {
        let mut kept = Vec::with_capacity(terms.len());
        for term in terms {
            if !term.1.is_all_zero()? {
                kept.push(term);
            }
        }
        if kept.is_empty() {
            kept.push((vec![0; names.len()], NdArray::zeros(&shape, dtype)));
        }
        terms = kept;
    }

    let (names, mut terms) = if options.retain_names {
        (names, terms)
    } else {
        drop_unused_names(names, terms)
    };

    terms.sort_by(|(a, _), (b, _)| {
        let degree_a: u64 = a.iter().map(|&e| u64::from(e)).sum();
        let degree_b: u64 = b.iter().map(|&e| u64::from(e)).sum();
        degree_a.cmp(&degree_b).then_with(|| a.cmp(b))
    });

    let (rows, coefficients): (Vec<Vec<u32>>, Vec<NdArray>) = terms.into_iter().unzip();
    let exponents = if rows.is_empty() {
        Exponents::zeros(0, names.len())
    } else {
        Exponents::from_rows(&rows)?
    };

    debug!(
        rows_in,
        rows_out = exponents.rows(),
        names_in,
        names_out = names.len(),
        "canonicalized polynomial attributes"
    );

    Ok(Attributes {
        exponents,
        coefficients,
        indeterminates: names,
    })
}

/// Check the triple lines up; return the common shape and promoted dtype
fn validate(exponents: &Exponents, coefficients: &[NdArray]) -> Result<(Vec<usize>, DType)> {
    let first = coefficients
        .first()
        .ok_or_else(|| Error::attribute_mismatch("no coefficient arrays given"))?;

    if exponents.rows() != coefficients.len() {
        return Err(Error::attribute_mismatch(format!(
            "{} exponent rows but {} coefficient arrays",
            exponents.rows(),
            coefficients.len()
        )));
    }

    let shape = first.shape().to_vec();
    if let Some((i, bad)) = coefficients
        .iter()
        .enumerate()
        .find(|(_, c)| c.shape() != shape.as_slice())
    {
        return Err(Error::attribute_mismatch(format!(
            "coefficient {i} has shape {:?}, expected {:?}",
            bad.shape(),
            shape
        )));
    }

    let dtype = promote_all(coefficients.iter().map(NdArray::dtype))
        .ok_or_else(|| Error::attribute_mismatch("no coefficient arrays given"))?;
    Ok((shape, dtype))
}

/// Deduplicate names in first-occurrence order, summing collapsed columns
fn collapse_names(exponents: &Exponents, names: Vec<String>) -> Result<(Vec<String>, Vec<Vec<u32>>)> {
    let mut unique: Vec<String> = Vec::with_capacity(names.len());
    let mut column_map = Vec::with_capacity(names.len());
    for name in names {
        match unique.iter().position(|u| *u == name) {
            Some(pos) => column_map.push(pos),
            None => {
                column_map.push(unique.len());
                unique.push(name);
            }
        }
    }

    let mut rows = Vec::with_capacity(exponents.rows());
    for row in exponents.iter() {
        let mut collapsed = vec![0u32; unique.len()];
        for (&target, &e) in column_map.iter().zip(row) {
            collapsed[target] = collapsed[target].checked_add(e).ok_or_else(|| {
                Error::attribute_mismatch(format!(
                    "exponent of '{}' overflows after merging duplicate names",
                    unique[target]
                ))
            })?;
        }
        rows.push(collapsed);
    }

    Ok((unique, rows))
}

/// Merge identical rows, summing coefficients; first-occurrence order
fn merge_rows(rows: Vec<Vec<u32>>, coefficients: Vec<NdArray>) -> Result<Vec<(Vec<u32>, NdArray)>> {
    let mut slots: HashMap<Vec<u32>, usize> = HashMap::with_capacity(rows.len());
    let mut terms: Vec<(Vec<u32>, NdArray)> = Vec::with_capacity(rows.len());
    let mut merged = 0usize;

    for (row, coefficient) in rows.into_iter().zip(coefficients) {
        match slots.get(&row) {
            Some(&slot) => {
                terms[slot].1 = terms[slot].1.add(&coefficient)?;
                merged += 1;
            }
            None => {
                slots.insert(row.clone(), terms.len());
                terms.push((row, coefficient));
            }
        }
    }

    if merged > 0 {
        debug!(merged, "merged duplicate exponent rows");
    }
    Ok(terms)
}

/// Remove columns that are zero in every row, keeping at least one name
fn drop_unused_names(
    names: Vec<String>,
    terms: Vec<(Vec<u32>, NdArray)>,
) -> (Vec<String>, Vec<(Vec<u32>, NdArray)>) {
    let mut used: Vec<bool> = (0..names.len())
        .map(|col| terms.iter().any(|(row, _)| row[col] != 0))
        .collect();
    if !used.is_empty() && !used.contains(&true) {
        used[0] = true;
    }
    if !used.contains(&false) {
        return (names, terms);
    }

    let names = names
        .into_iter()
        .zip(&used)
        .filter_map(|(name, &keep)| keep.then_some(name))
        .collect();
    let terms = terms
        .into_iter()
        .map(|(row, coefficient)| {
            let row = row
                .into_iter()
                .zip(&used)
                .filter_map(|(e, &keep)| keep.then_some(e))
                .collect();
            (row, coefficient)
        })
        .collect();
    (names, terms)
}
