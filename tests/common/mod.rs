//! Common test utilities
#![allow(dead_code)]

use numpoly::array::NdArray;
use numpoly::poly::{Exponents, PolyArray, polynomial_from_attributes};

/// Build an i64 array, panicking on a shape mismatch
pub fn array_i64(data: &[i64], shape: &[usize]) -> NdArray {
    NdArray::from_slice(data, shape).unwrap()
}

/// Build an f64 array, panicking on a shape mismatch
pub fn array_f64(data: &[f64], shape: &[usize]) -> NdArray {
    NdArray::from_slice(data, shape).unwrap()
}

/// `1 + 2x + 3y` with the given coefficient shape, all entries equal
pub fn sample_poly(shape: &[usize]) -> PolyArray {
    let len: usize = shape.iter().product();
    let exponents = Exponents::from_rows(&[[0u32, 0], [1, 0], [0, 1]]).unwrap();
    let coefficients = [1i64, 2, 3]
        .iter()
        .map(|&value| array_i64(&vec![value; len], shape))
        .collect();
    polynomial_from_attributes(exponents, coefficients, ["x", "y"], None, true).unwrap()
}

/// Assert every coefficient of `after` is a view of the matching one in `before`
pub fn assert_coefficients_shared(before: &PolyArray, after: &PolyArray) {
    assert_eq!(before.num_terms(), after.num_terms());
    for (a, b) in before.coefficients().iter().zip(after.coefficients()) {
        assert!(a.shares_storage(b), "coefficient was copied");
    }
}

/// Assert two f64 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f64(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}
