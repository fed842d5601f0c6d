//! Integration tests for polynomial construction and canonical form
//!
//! Tests verify:
//! - Keys address the coefficient they were built from
//! - Canonicalisation is idempotent
//! - Duplicate names and rows merge by summation
//! - The zero polynomial keeps its constant row
//! - Structural errors are reported as attribute mismatches

mod common;

use common::{array_f64, array_i64, assert_allclose_f64, sample_poly};
use numpoly::dtype::DType;
use numpoly::error::Error;
use numpoly::poly::{
    CleanOptions, Exponents, Indeterminates, MonomialKey, PolyArray, canonicalize, isconstant,
    polynomial_from_attributes, postprocess_attributes,
};

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_keys_match_exponent_rows() {
    let poly = sample_poly(&[2, 3]);

    assert_eq!(poly.keys().len(), poly.exponents().rows());
    for (i, key) in poly.keys().iter().enumerate() {
        assert_eq!(key, &MonomialKey::from_exponent(poly.exponents().row(i)));
        assert!(poly.get(key).unwrap().array_eq(&poly.coefficients()[i]).unwrap());
    }
}

#[test]
fn test_construct_from_canonical_triple() {
    let exponents = Exponents::from_rows(&[[0u32, 0], [0, 1], [1, 0], [1, 1]]).unwrap();
    let coefficients = vec![
        array_i64(&[1, 0], &[2]),
        array_i64(&[0, 2], &[2]),
        array_i64(&[3, 3], &[2]),
        array_i64(&[4, 0], &[2]),
    ];
    let poly = polynomial_from_attributes(
        exponents.clone(),
        coefficients.clone(),
        ["x", "y"],
        None,
        true,
    )
    .unwrap();

    assert_eq!(poly.exponents(), &exponents);
    assert_eq!(poly.shape(), &[2]);
    assert_eq!(poly.ndim(), 1);
    for (row, expected) in exponents.iter().zip(&coefficients) {
        assert!(poly.coefficient(row).unwrap().array_eq(expected).unwrap());
    }
}

#[test]
fn test_dtype_resolution() {
    let exponents = Exponents::from_rows(&[[0u32], [1]]).unwrap();
    let mixed = vec![array_i64(&[1], &[1]), array_f64(&[0.5], &[1])];

    let inferred =
        polynomial_from_attributes(exponents.clone(), mixed.clone(), "x", None, true).unwrap();
    assert_eq!(inferred.dtype(), DType::F64);

    let explicit =
        polynomial_from_attributes(exponents, mixed, "x", Some(DType::F32), true).unwrap();
    assert_eq!(explicit.dtype(), DType::F32);
    assert!(explicit.coefficients().iter().all(|c| c.dtype() == DType::F32));
}

#[test]
fn test_float_coefficients_merge() {
    let exponents = Exponents::from_rows(&[[1u32], [1]]).unwrap();
    let poly = polynomial_from_attributes(
        exponents,
        vec![array_f64(&[0.1, 0.2], &[2]), array_f64(&[0.2, 0.4], &[2])],
        "x",
        None,
        true,
    )
    .unwrap();
    let merged = poly.coefficient(&[1]).unwrap().to_vec::<f64>().unwrap();
    assert_allclose_f64(&merged, &[0.3, 0.6], 1e-12, 0.0, "merged coefficients");
}

#[test]
fn test_prefix_indeterminates() {
    let exponents = Exponents::identity(3);
    let coefficients = vec![array_i64(&[1], &[1]); 3];
    let poly =
        polynomial_from_attributes(exponents, coefficients, Indeterminates::default(), None, true)
            .unwrap();
    assert_eq!(poly.names(), ["q0", "q1", "q2"]);
}

#[test]
fn test_structural_errors() {
    let exponents = Exponents::identity(2);

    let empty = polynomial_from_attributes(Exponents::zeros(0, 2), vec![], ["x", "y"], None, true);
    assert!(matches!(empty, Err(Error::AttributeMismatch { .. })));

    let ragged = polynomial_from_attributes(
        exponents.clone(),
        vec![array_i64(&[1, 2], &[2]), array_i64(&[1, 2], &[1, 2])],
        ["x", "y"],
        None,
        true,
    );
    assert!(matches!(ragged, Err(Error::AttributeMismatch { .. })));

    let wrong_names =
        polynomial_from_attributes(exponents, vec![array_i64(&[1], &[1]); 2], ["x"], None, true);
    assert!(matches!(wrong_names, Err(Error::AttributeMismatch { .. })));
}

// ============================================================================
// Canonical form
// ============================================================================

#[test]
fn test_canonicalize_idempotent() {
    let exponents = Exponents::from_rows(&[[2u32, 0, 1], [0, 0, 0], [1, 0, 1], [2, 0, 1]]).unwrap();
    let coefficients = vec![
        array_i64(&[1, -1], &[2]),
        array_i64(&[0, 0], &[2]),
        array_i64(&[5, 6], &[2]),
        array_i64(&[-1, 1], &[2]),
    ];

    let once = canonicalize(exponents, coefficients, ["a", "b", "c"]).unwrap();
    let twice = canonicalize(
        once.exponents.clone(),
        once.coefficients.clone(),
        once.indeterminates.clone(),
    )
    .unwrap();

    assert_eq!(once.exponents, twice.exponents);
    assert_eq!(once.indeterminates, twice.indeterminates);
    assert_eq!(once.coefficients.len(), twice.coefficients.len());
    for (a, b) in once.coefficients.iter().zip(&twice.coefficients) {
        assert!(a.array_eq(b).unwrap());
    }

    // a^2 c cancelled out, b never used
    assert_eq!(once.indeterminates, vec!["a", "c"]);
    assert_eq!(once.exponents.to_rows(), vec![vec![1, 1]]);
}

#[test]
fn test_duplicate_name_merge() {
    let exponents = Exponents::from_rows(&[[1u32, 0], [1, 0]]).unwrap();
    let a = array_i64(&[1, 2, 3], &[3]);
    let b = array_i64(&[10, 20, 30], &[3]);
    let attrs = canonicalize(exponents, vec![a, b], ["x", "x"]).unwrap();

    assert_eq!(attrs.exponents.to_rows(), vec![vec![1]]);
    assert_eq!(attrs.indeterminates, vec!["x"]);
    assert_eq!(attrs.coefficients[0].to_vec::<i64>().unwrap(), [11, 22, 33]);
}

#[test]
fn test_zero_retention() {
    let exponents = Exponents::from_rows(&[[0u32]]).unwrap();
    let attrs = canonicalize(exponents, vec![array_i64(&[0, 0], &[2])], ["x"]).unwrap();
    assert_eq!(attrs.exponents.rows(), 1);
    assert_eq!(attrs.exponents.row(0), &[0]);

    let poly = polynomial_from_attributes(
        Exponents::from_rows(&[[3u32]]).unwrap(),
        vec![array_i64(&[0], &[1])],
        "x",
        None,
        true,
    )
    .unwrap();
    assert_eq!(poly.exponents().to_rows(), vec![vec![0]]);
    assert!(isconstant(&poly).unwrap());
}

#[test]
fn test_retain_options() {
    let exponents = Exponents::from_rows(&[[0u32, 0], [0, 1]]).unwrap();
    let coefficients = vec![array_i64(&[1], &[1]), array_i64(&[0], &[1])];

    let cleaned = canonicalize(exponents.clone(), coefficients.clone(), ["x", "y"]).unwrap();
    assert_eq!(cleaned.exponents.to_rows(), vec![vec![0]]);

    let kept = postprocess_attributes(
        exponents,
        coefficients,
        ["x", "y"],
        CleanOptions {
            retain_coefficients: true,
            retain_names: true,
        },
    )
    .unwrap();
    assert_eq!(kept.exponents.to_rows(), vec![vec![0, 0], vec![0, 1]]);
    assert_eq!(kept.indeterminates, vec!["x", "y"]);
}

#[test]
fn test_isconstant() {
    assert!(!isconstant(&sample_poly(&[2])).unwrap());

    let constant = PolyArray::from_constant(array_i64(&[4, 5], &[2]));
    assert!(isconstant(&constant).unwrap());
}
