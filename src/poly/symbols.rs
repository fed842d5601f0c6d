//! Indeterminate name specifications and symbol construction
//!
//! A name specification is either an explicit list of names or a compact
//! string. Strings are read with the first matching production:
//!
//! | Production    | Example     | Names                        |
//! |---------------|-------------|------------------------------|
//! | delimited     | `"x y,z"`   | `x`, `y`, `z` (always array) |
//! | numeric range | `"q:3"`     | `q0`, `q1`, `q2`             |
//! | letter range  | `"za:c"`    | `za`, `zb`, `zc`             |
//! | bare          | `"alpha"`   | `alpha`                      |
//!
//! Spaces count as commas. A numeric range `a:b` covers `a..b` (`a` may be
//! omitted and defaults to 0); a letter range `x:y` is inclusive over the
//! alphabet `a..z` followed by `A..Z`. Only the first range is expanded, and
//! the rest of the string is kept as a template around it.

use super::clean::DEFAULT_VARNAME;
use super::{Exponents, PolyArray, polynomial_from_attributes};
use crate::array::NdArray;
use crate::dtype::DType;
use crate::error::{Error, Result};
use tracing::debug;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Names of the indeterminates to create
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NameSpec {
    /// Compact string form, expanded by [`parse_names`]
    Spec(String),
    /// Explicit names, used as given
    Names(Vec<String>),
}

impl From<&str> for NameSpec {
    fn from(spec: &str) -> Self {
        Self::Spec(spec.to_string())
    }
}

impl From<String> for NameSpec {
    fn from(spec: String) -> Self {
        Self::Spec(spec)
    }
}

impl From<Vec<String>> for NameSpec {
    fn from(names: Vec<String>) -> Self {
        Self::Names(names)
    }
}

impl From<Vec<&str>> for NameSpec {
    fn from(names: Vec<&str>) -> Self {
        Self::Names(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for NameSpec {
    fn from(names: &[&str]) -> Self {
        Self::Names(names.iter().map(|name| name.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for NameSpec {
    fn from(names: [&str; N]) -> Self {
        Self::Names(names.iter().map(|name| name.to_string()).collect())
    }
}

/// Result of expanding a name specification string
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedNames {
    /// Expanded names, in order
    pub names: Vec<String>,
    /// Whether the specification demands array output (delimited form)
    pub force_array: bool,
}

/// Which production a specification string matched
#[derive(Debug)]
enum Production {
    Delimited(String),
    NumericRange(Range),
    LetterRange(Range),
    Bare,
}

/// Byte span `[lo, hi)` of a range token and its bounds
#[derive(Debug)]
struct Range {
    lo: usize,
    hi: usize,
    start: usize,
    end: usize,
}

impl Range {
    fn expand(&self, template: &str, render: impl Fn(usize) -> String) -> Vec<String> {
        let (head, tail) = (&template[..self.lo], &template[self.hi..]);
        (self.start..self.end)
            .map(|value| format!("{head}{}{tail}", render(value)))
            .collect()
    }
}

fn classify(spec: &str) -> Result<Production> {
    let delimited = spec.replace(' ', ",");
    if delimited.contains(',') {
        return Ok(Production::Delimited(delimited));
    }
    if let Some(range) = find_numeric_range(spec)? {
        return Ok(Production::NumericRange(range));
    }
    if let Some(range) = find_letter_range(spec) {
        return Ok(Production::LetterRange(range));
    }
    Ok(Production::Bare)
}

/// First `digits?:digits` token; the start is the digit run before the colon
fn find_numeric_range(spec: &str) -> Result<Option<Range>> {
    let bytes = spec.as_bytes();
    for (colon, _) in spec.match_indices(':') {
        let after = bytes[colon + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if after == 0 {
            continue;
        }
        let before = bytes[..colon]
            .iter()
            .rev()
            .take_while(|b| b.is_ascii_digit())
            .count();

        let lo = colon - before;
        let hi = colon + 1 + after;
        let parse = |digits: &str| {
            digits.parse::<usize>().map_err(|_| {
                Error::invalid_name_spec(spec, format!("range bound '{digits}' is too large"))
            })
        };
        let start = if before == 0 {
            0
        } else {
            parse(&spec[lo..colon])?
        };
        let end = parse(&spec[colon + 1..hi])?;
        return Ok(Some(Range { lo, hi, start, end }));
    }
    Ok(None)
}

/// First `letter:letter` token; bounds are the single letters at the colon
fn find_letter_range(spec: &str) -> Option<Range> {
    let bytes = spec.as_bytes();
    spec.match_indices(':').find_map(|(colon, _)| {
        let first = *bytes.get(colon.checked_sub(1)?)?;
        let last = *bytes.get(colon + 1)?;
        let start = ALPHABET.iter().position(|&c| c == first)?;
        let end = ALPHABET.iter().position(|&c| c == last)?;
        Some(Range {
            lo: colon - 1,
            hi: colon + 2,
            start,
            end: end + 1,
        })
    })
}

/// Expand a name specification string
///
/// # Errors
///
/// `Error::InvalidNameSpec` when a range is reversed or empty, or when the
/// specification yields no names or an empty name.
pub fn parse_names(spec: &str) -> Result<ParsedNames> {
    let production = classify(spec)?;
    let (names, force_array): (Vec<String>, bool) = match &production {
        Production::Delimited(delimited) => (
            delimited
                .split(',')
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect(),
            true,
        ),
        Production::NumericRange(range) => {
            if range.end <= range.start {
                return Err(Error::invalid_name_spec(
                    spec,
                    format!("numeric range {}:{} is empty", range.start, range.end),
                ));
            }
            (range.expand(spec, |i| i.to_string()), false)
        }
        Production::LetterRange(range) => {
            if range.end <= range.start {
                return Err(Error::invalid_name_spec(
                    spec,
                    format!("letter range {} is reversed", &spec[range.lo..range.hi]),
                ));
            }
            let letter = |i: usize| char::from(ALPHABET[i]).to_string();
            (range.expand(spec, letter), false)
        }
        Production::Bare => (vec![spec.to_string()], false),
    };

    if names.is_empty() {
        return Err(Error::invalid_name_spec(spec, "no names given"));
    }
    if names.iter().any(String::is_empty) {
        return Err(Error::invalid_name_spec(spec, "empty name"));
    }

    debug!(spec, ?production, count = names.len(), "expanded name specification");
    Ok(ParsedNames { names, force_array })
}

/// Create polynomials that are each a single bare indeterminate
///
/// Polynomial `i` of the result is the `i`-th named indeterminate, with
/// coefficient 1 in `dtype`. One name without `as_array` (and without a
/// delimiter in the specification) gives a scalar polynomial; anything else
/// gives a one-dimensional array of length N.
///
/// # Example
///
/// ```
/// use numpoly::dtype::DType;
/// use numpoly::poly::symbols;
///
/// let q = symbols("q:3", false, DType::I64)?;
/// assert_eq!(q.names(), ["q0", "q1", "q2"]);
/// assert_eq!(q.shape(), &[3]);
///
/// let x = symbols("x", false, DType::F64)?;
/// assert_eq!(x.shape(), &[] as &[usize]);
/// # Ok::<(), numpoly::error::Error>(())
/// ```
pub fn symbols(names: impl Into<NameSpec>, as_array: bool, dtype: DType) -> Result<PolyArray> {
    let (names, as_array) = match names.into() {
        NameSpec::Spec(spec) => {
            let parsed = parse_names(&spec)?;
            (parsed.names, as_array || parsed.force_array)
        }
        NameSpec::Names(names) => {
            if names.is_empty() {
                return Err(Error::invalid_name_spec("", "no names given"));
            }
            if let Some(empty) = names.iter().position(String::is_empty) {
                return Err(Error::invalid_name_spec(
                    names.join(","),
                    format!("name {empty} is empty"),
                ));
            }
            (names, as_array)
        }
    };

    let count = names.len();
    let eye = NdArray::eye(count, dtype)?;
    let coefficients = if count == 1 && !as_array {
        vec![eye.reshape(&[])?]
    } else {
        (0..count)
            .map(|i| eye.select(0, i))
            .collect::<Result<Vec<_>>>()?
    };

    polynomial_from_attributes(Exponents::identity(count), coefficients, names, None, true)
}

/// Create `n` indeterminates with the default prefix (`q0, q1, ...`)
pub fn variable(n: usize, as_array: bool, dtype: DType) -> Result<PolyArray> {
    symbols(format!("{DEFAULT_VARNAME}:{n}"), as_array, dtype)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(spec: &str) -> Vec<String> {
        parse_names(spec).unwrap().names
    }

    #[test]
    fn test_numeric_range() {
        assert_eq!(names("q:3"), ["q0", "q1", "q2"]);
        assert_eq!(names("x2:5"), ["x2", "x3", "x4"]);
        assert_eq!(names("a:2b"), ["a0b", "a1b"]);
        assert!(!parse_names("q:3").unwrap().force_array);
    }

    #[test]
    fn test_numeric_range_first_match_only() {
        assert_eq!(names("q:2_1:3"), ["q0_1:3", "q1_1:3"]);
    }

    #[test]
    fn test_letter_range() {
        assert_eq!(names("za:c"), ["za", "zb", "zc"]);
        assert_eq!(names("za:f"), ["za", "zb", "zc", "zd", "ze", "zf"]);
        assert_eq!(names("y:B"), ["y", "z", "A", "B"]);
        assert_eq!(names("a:a"), ["a"]);
    }

    #[test]
    fn test_delimited_forces_array() {
        let parsed = parse_names("a,b,c").unwrap();
        assert_eq!(parsed.names, ["a", "b", "c"]);
        assert!(parsed.force_array);

        assert_eq!(names("x y  z"), ["x", "y", "z"]);
        assert_eq!(names("q,"), ["q"]);
        assert!(parse_names("q,").unwrap().force_array);
        assert_eq!(names("q:2,r"), ["q:2", "r"]);
    }

    #[test]
    fn test_bare_name() {
        let parsed = parse_names("alpha").unwrap();
        assert_eq!(parsed.names, ["alpha"]);
        assert!(!parsed.force_array);
        assert_eq!(names("a:"), ["a:"]);
    }

    #[test]
    fn test_invalid_specs() {
        for spec in ["q:0", "q5:2", "q3:3", "c:a", "", ",", " "] {
            assert!(
                matches!(parse_names(spec), Err(Error::InvalidNameSpec { .. })),
                "{spec:?} should be rejected"
            );
        }
        assert!(matches!(
            parse_names("q:99999999999999999999999"),
            Err(Error::InvalidNameSpec { .. })
        ));
    }

    #[test]
    fn test_symbols_scalar_and_array() {
        let q = symbols("q", false, DType::I64).unwrap();
        assert_eq!(q.shape(), &[] as &[usize]);
        assert_eq!(q.names(), ["q"]);
        assert_eq!(q.coefficient(&[1]).unwrap().item::<i64>().unwrap(), 1);

        let q = symbols("q", true, DType::I64).unwrap();
        assert_eq!(q.shape(), &[1]);

        let q = symbols("q,", false, DType::I64).unwrap();
        assert_eq!(q.shape(), &[1]);
    }

    #[test]
    fn test_symbols_unit_coefficients() {
        let xyz = symbols("x y z", false, DType::F32).unwrap();
        assert_eq!(xyz.shape(), &[3]);
        assert_eq!(xyz.dtype(), DType::F32);
        assert_eq!(xyz.num_terms(), 3);
        assert_eq!(xyz.coefficient(&[1, 0, 0]).unwrap().to_vec::<f32>().unwrap(), [1.0, 0.0, 0.0]);
        assert_eq!(xyz.coefficient(&[0, 1, 0]).unwrap().to_vec::<f32>().unwrap(), [0.0, 1.0, 0.0]);
        assert_eq!(xyz.coefficient(&[0, 0, 1]).unwrap().to_vec::<f32>().unwrap(), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_symbols_explicit_names() {
        let poly = symbols(["alpha", "beta"], false, DType::I64).unwrap();
        assert_eq!(poly.names(), ["alpha", "beta"]);
        assert_eq!(poly.shape(), &[2]);

        let empty: Vec<String> = Vec::new();
        assert!(matches!(
            symbols(empty, false, DType::I64),
            Err(Error::InvalidNameSpec { .. })
        ));
        assert!(symbols(["a", ""], false, DType::I64).is_err());
    }

    #[test]
    fn test_variable() {
        let q = variable(3, false, DType::I64).unwrap();
        assert_eq!(q.names(), ["q0", "q1", "q2"]);

        let q0 = variable(1, false, DType::I64).unwrap();
        assert_eq!(q0.names(), ["q0"]);
        assert!(q0.shape().is_empty());

        assert!(variable(0, false, DType::I64).is_err());
    }
}
