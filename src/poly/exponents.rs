//! Exponent matrix and monomial keys

use crate::error::{Error, Result};
use std::fmt;

/// Exponent matrix of a polynomial array
///
/// `rows` monomials by `cols` indeterminates, stored row-major. Row `i` is
/// the exponent tuple of monomial `i`. Zero columns is valid (a polynomial
/// with no indeterminates); zero rows is only valid transiently.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Exponents {
    data: Vec<u32>,
    rows: usize,
    cols: usize,
}

impl Exponents {
    /// Create an exponent matrix from row-major data
    pub fn new(data: Vec<u32>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::attribute_mismatch(format!(
                "exponent data has {} entries, expected {rows}x{cols}",
                data.len()
            )));
        }
        Ok(Self { data, rows, cols })
    }

    /// Create an exponent matrix from a list of rows
    ///
    /// Every row must have the same length.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Error::attribute_mismatch(format!(
                    "exponent row {i} has {} columns, expected {cols}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// Create an all-zero exponent matrix
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0; rows * cols],
            rows,
            cols,
        }
    }

    /// Create an `n x n` identity exponent matrix: row `i` is indeterminate `i`
    pub fn identity(n: usize) -> Self {
        let mut data = vec![0; n * n];
        for i in 0..n {
            data[i * n + i] = 1;
        }
        Self {
            data,
            rows: n,
            cols: n,
        }
    }

    /// Number of monomials
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of indeterminates
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the matrix has no rows
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Exponent tuple of monomial `i`
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.rows()`.
    #[inline]
    pub fn row(&self, i: usize) -> &[u32] {
        assert!(i < self.rows, "exponent row {i} out of range");
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Iterate over exponent rows
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[u32]> + '_ {
        (0..self.rows).map(move |i| self.row(i))
    }

    /// Total degree of monomial `i`
    pub fn total_degree(&self, i: usize) -> u64 {
        self.row(i).iter().map(|&e| u64::from(e)).sum()
    }

    /// Copy out as a list of rows
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.iter().map(<[u32]>::to_vec).collect()
    }
}

impl fmt::Debug for Exponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Storage key addressing one monomial's coefficient array
///
/// Derived from an exponent row (decimal exponents joined by `,`); the
/// mapping is a bijection for a fixed number of indeterminates. Keys are only
/// produced from exponent rows, never edited independently.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonomialKey(String);

impl MonomialKey {
    /// Key for an exponent row
    pub fn from_exponent(exponent: &[u32]) -> Self {
        let parts: Vec<String> = exponent.iter().map(u32::to_string).collect();
        Self(parts.join(","))
    }

    /// Textual form of the key
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for MonomialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MonomialKey({:?})", self.0)
    }
}

impl fmt::Display for MonomialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let e = Exponents::from_rows(&[vec![1u32, 0], vec![0, 2]]).unwrap();
        assert_eq!(e.rows(), 2);
        assert_eq!(e.cols(), 2);
        assert_eq!(e.row(1), &[0, 2]);
        assert_eq!(e.total_degree(1), 2);
        assert_eq!(e.to_rows(), vec![vec![1, 0], vec![0, 2]]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = Exponents::from_rows(&[vec![1u32, 0], vec![1]]);
        assert!(matches!(result, Err(Error::AttributeMismatch { .. })));
        assert!(Exponents::new(vec![1, 2, 3], 2, 2).is_err());
    }

    #[test]
    fn test_zero_columns() {
        let e = Exponents::zeros(1, 0);
        assert_eq!(e.rows(), 1);
        assert_eq!(e.row(0), &[] as &[u32]);
        assert_eq!(e.iter().count(), 1);
        assert_eq!(MonomialKey::from_exponent(e.row(0)).as_str(), "");
    }

    #[test]
    fn test_identity() {
        let e = Exponents::identity(3);
        assert_eq!(e.to_rows(), vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]]);
    }

    #[test]
    fn test_key_is_injective() {
        let a = MonomialKey::from_exponent(&[1, 10]);
        let b = MonomialKey::from_exponent(&[11, 0]);
        let c = MonomialKey::from_exponent(&[1, 10]);
        assert_ne!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.to_string(), "1,10");
    }
}
