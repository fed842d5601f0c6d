//! Operands and results of array functions

use crate::array::NdArray;
use crate::error::{Error, Result};
use crate::poly::PolyArray;

/// One operand of an array function: a plain array or a polynomial array
///
/// This is the single coercion point for loosely typed inputs. Anything that
/// can be an operand converts into an `ArrayArg` via `From`; everything else
/// is rejected at compile time.
#[derive(Clone, Debug)]
pub enum ArrayArg {
    /// Plain numeric array
    Plain(NdArray),
    /// Polynomial array
    Poly(PolyArray),
}

impl ArrayArg {
    /// Whether this operand is a polynomial array
    #[inline]
    pub fn is_poly(&self) -> bool {
        matches!(self, Self::Poly(_))
    }

    /// Shape of the operand
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Plain(array) => array.shape(),
            Self::Poly(poly) => poly.shape(),
        }
    }

    /// Rank of the operand
    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Borrow as a polynomial array, if it is one
    pub fn as_poly(&self) -> Option<&PolyArray> {
        match self {
            Self::Poly(poly) => Some(poly),
            Self::Plain(_) => None,
        }
    }

    /// Borrow as a plain array, if it is one
    pub fn as_plain(&self) -> Option<&NdArray> {
        match self {
            Self::Plain(array) => Some(array),
            Self::Poly(_) => None,
        }
    }

    /// The plain array; a polynomial operand is an error
    pub(crate) fn require_plain(&self) -> Result<&NdArray> {
        self.as_plain().ok_or(Error::InvalidArgument {
            arg: "arrays",
            reason: "plain default given a polynomial operand".to_string(),
        })
    }
}

impl From<NdArray> for ArrayArg {
    fn from(array: NdArray) -> Self {
        Self::Plain(array)
    }
}

impl From<PolyArray> for ArrayArg {
    fn from(poly: PolyArray) -> Self {
        Self::Poly(poly)
    }
}

macro_rules! impl_scalar_arg {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for ArrayArg {
                fn from(value: $t) -> Self {
                    Self::Plain(NdArray::scalar(value))
                }
            }
        )*
    };
}

impl_scalar_arg!(f64, f32, i64, i32, i16, i8, u64, u32, u16, u8);

/// Coerce an operand into a polynomial array
///
/// Plain arrays become constant polynomials (one zero-exponent monomial);
/// polynomial arrays are returned unchanged.
pub fn aspolynomial(arg: impl Into<ArrayArg>) -> PolyArray {
    match arg.into() {
        ArrayArg::Plain(array) => PolyArray::from_constant(array),
        ArrayArg::Poly(poly) => poly,
    }
}

/// Operands and keyword parameters of one array function call
#[derive(Clone, Debug, Default)]
pub struct FunctionArgs {
    /// Positional array operands
    pub arrays: Vec<ArrayArg>,
    /// Target shape (`reshape`)
    pub shape: Option<Vec<usize>>,
    /// Axis (`expand_dims`, `amin`)
    pub axis: Option<isize>,
}

impl FunctionArgs {
    /// Call arguments with the given operands and no parameters
    pub fn new<I, A>(arrays: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<ArrayArg>,
    {
        Self {
            arrays: arrays.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the target shape
    pub fn with_shape(mut self, shape: &[usize]) -> Self {
        self.shape = Some(shape.to_vec());
        self
    }

    /// Set the axis
    pub fn with_axis(mut self, axis: isize) -> Self {
        self.axis = Some(axis);
        self
    }

    /// Whether any operand is a polynomial array
    pub fn has_poly(&self) -> bool {
        self.arrays.iter().any(ArrayArg::is_poly)
    }

    /// The only operand of a unary function
    pub fn single(&self) -> Result<&ArrayArg> {
        match self.arrays.as_slice() {
            [arg] => Ok(arg),
            arrays => Err(Error::InvalidArgument {
                arg: "arrays",
                reason: format!("expected exactly one operand, got {}", arrays.len()),
            }),
        }
    }

    /// The `shape` parameter, which must be present
    pub fn require_shape(&self) -> Result<&[usize]> {
        self.shape.as_deref().ok_or(Error::InvalidArgument {
            arg: "shape",
            reason: "parameter is required".to_string(),
        })
    }

    /// The `axis` parameter, which must be present
    pub fn require_axis(&self) -> Result<isize> {
        self.axis.ok_or(Error::InvalidArgument {
            arg: "axis",
            reason: "parameter is required".to_string(),
        })
    }
}

/// Result of an array function: one value, or one per operand
#[derive(Clone, Debug)]
pub enum Dispatched {
    /// Exactly one input was given
    One(ArrayArg),
    /// Results in operand order
    Many(Vec<ArrayArg>),
}

impl Dispatched {
    /// Wrap per-operand results, unwrapping a single result
    pub fn from_results(mut results: Vec<ArrayArg>) -> Self {
        if results.len() == 1 {
            if let Some(only) = results.pop() {
                return Self::One(only);
            }
        }
        Self::Many(results)
    }

    /// All results, in operand order
    pub fn into_vec(self) -> Vec<ArrayArg> {
        match self {
            Self::One(arg) => vec![arg],
            Self::Many(args) => args,
        }
    }

    /// The single result
    pub fn into_one(self) -> Result<ArrayArg> {
        match self {
            Self::One(arg) => Ok(arg),
            Self::Many(args) => Err(Error::InvalidArgument {
                arg: "result",
                reason: format!("expected one result, got {}", args.len()),
            }),
        }
    }

    /// The single polynomial result
    pub fn into_poly(self) -> Result<PolyArray> {
        match self {
            Self::One(ArrayArg::Poly(poly)) => Ok(poly),
            Self::One(ArrayArg::Plain(_)) => Err(Error::InvalidArgument {
                arg: "result",
                reason: "expected a polynomial array, got a plain array".to_string(),
            }),
            Self::Many(args) => Err(Error::InvalidArgument {
                arg: "result",
                reason: format!("expected one result, got {}", args.len()),
            }),
        }
    }

    /// The single plain-array result
    pub fn into_plain(self) -> Result<NdArray> {
        match self {
            Self::One(ArrayArg::Plain(array)) => Ok(array),
            Self::One(ArrayArg::Poly(_)) => Err(Error::InvalidArgument {
                arg: "result",
                reason: "expected a plain array, got a polynomial array".to_string(),
            }),
            Self::Many(args) => Err(Error::InvalidArgument {
                arg: "result",
                reason: format!("expected one result, got {}", args.len()),
            }),
        }
    }

    /// All results as polynomial arrays; plain results are coerced
    pub fn into_polys(self) -> Vec<PolyArray> {
        self.into_vec().into_iter().map(aspolynomial).collect()
    }
}
