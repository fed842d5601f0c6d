//! Integration tests for name specifications and symbol construction

use numpoly::dtype::DType;
use numpoly::error::Error;
use numpoly::poly::{parse_names, symbols, variable};

// ============================================================================
// Name parsing
// ============================================================================

#[test]
fn test_parse_numeric_range() {
    assert_eq!(parse_names("q:3").unwrap().names, ["q0", "q1", "q2"]);
    assert_eq!(parse_names("q:7").unwrap().names.len(), 7);
    assert_eq!(parse_names("x_1:3").unwrap().names, ["x_1", "x_2"]);
}

#[test]
fn test_parse_expands_only_first_range() {
    assert_eq!(parse_names("x:2y:2").unwrap().names, ["x0y:2", "x1y:2"]);
}

#[test]
fn test_parse_letter_range() {
    assert_eq!(parse_names("za:c").unwrap().names, ["za", "zb", "zc"]);
    assert_eq!(parse_names("a:e").unwrap().names, ["a", "b", "c", "d", "e"]);
}

#[test]
fn test_parse_delimited() {
    let parsed = parse_names("a,b,c").unwrap();
    assert_eq!(parsed.names, ["a", "b", "c"]);
    assert!(parsed.force_array);

    let parsed = parse_names("x y z").unwrap();
    assert_eq!(parsed.names, ["x", "y", "z"]);
    assert!(parsed.force_array);
}

#[test]
fn test_parse_rejects_malformed() {
    for spec in ["x:0", "x4:1", "e:a", "", ", ,"] {
        let result = parse_names(spec);
        assert!(
            matches!(result, Err(Error::InvalidNameSpec { .. })),
            "{spec:?} gave {result:?}"
        );
    }
}

// ============================================================================
// Symbols
// ============================================================================

#[test]
fn test_single_symbol_is_scalar() {
    let q = symbols("q", false, DType::I64).unwrap();
    assert_eq!(q.ndim(), 0);
    assert_eq!(q.names(), ["q"]);
    assert_eq!(q.exponents().to_rows(), vec![vec![1]]);

    let q = symbols("q", true, DType::I64).unwrap();
    assert_eq!(q.shape(), &[1]);
}

#[test]
fn test_delimiter_forces_array() {
    let q = symbols("q,", false, DType::I64).unwrap();
    assert_eq!(q.shape(), &[1]);
    assert_eq!(q.names(), ["q"]);
}

#[test]
fn test_symbols_are_unit_polynomials() {
    let abc = symbols("a,b,c", false, DType::F64).unwrap();
    assert_eq!(abc.shape(), &[3]);
    assert_eq!(abc.dtype(), DType::F64);
    assert_eq!(abc.names(), ["a", "b", "c"]);

    let expected = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    for (i, want) in expected.iter().enumerate() {
        let mut exponent = [0u32; 3];
        exponent[i] = 1;
        let coefficient = abc.coefficient(&exponent).unwrap();
        assert_eq!(coefficient.to_vec::<f64>().unwrap(), want);
    }
    assert!(abc.coefficient(&[0, 0, 0]).is_none());
    assert!(!abc.isconstant().unwrap());
}

#[test]
fn test_symbols_from_names() {
    let poly = symbols(vec!["alpha".to_string(), "beta".to_string()], false, DType::I32).unwrap();
    assert_eq!(poly.names(), ["alpha", "beta"]);
    assert_eq!(poly.dtype(), DType::I32);

    let single = symbols(["theta"], false, DType::I64).unwrap();
    assert!(single.shape().is_empty());
}

#[test]
fn test_variable() {
    let q = variable(2, false, DType::I64).unwrap();
    assert_eq!(q.dtype(), DType::I64);
    assert_eq!(q.names(), ["q0", "q1"]);
    assert_eq!(q.shape(), &[2]);

    let q = variable(1, true, DType::I64).unwrap();
    assert_eq!(q.shape(), &[1]);
}

#[cfg(not(feature = "f16"))]
#[test]
fn test_half_dtype_needs_feature() {
    let result = symbols("x", false, DType::F16);
    assert!(matches!(result, Err(Error::FeatureRequired { feature: "f16", .. })));
}

#[cfg(feature = "f16")]
#[test]
fn test_half_dtype() {
    let x = symbols("x y", false, DType::BF16).unwrap();
    assert_eq!(x.dtype(), DType::BF16);
}
