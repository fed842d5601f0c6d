//! Element trait for mapping Rust types to DType

use super::DType;
use bytemuck::{Pod, Zeroable};

/// A single value in its widest lossless carrier
///
/// Casting goes through this instead of `f64` so that 64-bit integers keep
/// every bit on integer-to-integer conversions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Scalar {
    /// Any floating point value
    Float(f64),
    /// Any signed integer value
    Int(i64),
    /// Any unsigned integer value
    UInt(u64),
}

/// Trait for types that can be coefficients of a polynomial array
///
/// This trait connects Rust's type system to numpoly's runtime dtype system.
/// It's implemented for all primitive numeric types.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - Basic trait requirements
/// - `Pod + Zeroable` - Safe reinterpretation of storage bytes (bytemuck)
/// - `PartialOrd` - Comparison
pub trait Element:
    Copy + Send + Sync + Pod + Zeroable + 'static + PartialOrd + std::fmt::Debug
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Widen into a [`Scalar`]
    fn to_scalar(self) -> Scalar;

    /// Convert from a [`Scalar`] with `as` semantics (integers wrap,
    /// floats truncate toward zero and saturate)
    fn from_scalar(v: Scalar) -> Self;

    /// Sum that wraps around on integer overflow
    fn wrapping_add(self, rhs: Self) -> Self;

    /// Zero value
    fn zero() -> Self;

    /// One value
    fn one() -> Self;

    /// Whether this value equals zero
    #[inline]
    fn is_zero(self) -> bool {
        self == Self::zero()
    }
}

macro_rules! impl_float_element {
    ($t:ty, $dtype:expr) => {
        impl Element for $t {
            const DTYPE: DType = $dtype;

            #[inline]
            fn to_scalar(self) -> Scalar {
                Scalar::Float(self as f64)
            }

            #[inline]
            fn from_scalar(v: Scalar) -> Self {
                match v {
                    Scalar::Float(v) => v as $t,
                    Scalar::Int(v) => v as $t,
                    Scalar::UInt(v) => v as $t,
                }
            }

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline]
            fn zero() -> Self {
                0.0
            }

            #[inline]
            fn one() -> Self {
                1.0
            }
        }
    };
}

macro_rules! impl_int_element {
    ($t:ty, $dtype:expr, $variant:ident, $wide:ty) => {
        impl Element for $t {
            const DTYPE: DType = $dtype;

            #[inline]
            fn to_scalar(self) -> Scalar {
                Scalar::$variant(self as $wide)
            }

            #[inline]
            fn from_scalar(v: Scalar) -> Self {
                match v {
                    Scalar::Float(v) => v as $t,
                    Scalar::Int(v) => v as $t,
                    Scalar::UInt(v) => v as $t,
                }
            }

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$t>::wrapping_add(self, rhs)
            }

            #[inline]
            fn zero() -> Self {
                0
            }

            #[inline]
            fn one() -> Self {
                1
            }
        }
    };
}

impl_float_element!(f64, DType::F64);
impl_float_element!(f32, DType::F32);

impl_int_element!(i64, DType::I64, Int, i64);
impl_int_element!(i32, DType::I32, Int, i64);
impl_int_element!(i16, DType::I16, Int, i64);
impl_int_element!(i8, DType::I8, Int, i64);
impl_int_element!(u64, DType::U64, UInt, u64);
impl_int_element!(u32, DType::U32, UInt, u64);
impl_int_element!(u16, DType::U16, UInt, u64);
impl_int_element!(u8, DType::U8, UInt, u64);

macro_rules! impl_half_element {
    ($t:ty, $dtype:expr) => {
        #[cfg(feature = "f16")]
        impl Element for $t {
            const DTYPE: DType = $dtype;

            #[inline]
            fn to_scalar(self) -> Scalar {
                Scalar::Float(<$t>::to_f64(self))
            }

            #[inline]
            fn from_scalar(v: Scalar) -> Self {
                match v {
                    Scalar::Float(v) => <$t>::from_f64(v),
                    Scalar::Int(v) => <$t>::from_f64(v as f64),
                    Scalar::UInt(v) => <$t>::from_f64(v as f64),
                }
            }

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline]
            fn zero() -> Self {
                <$t>::ZERO
            }

            #[inline]
            fn one() -> Self {
                <$t>::ONE
            }
        }
    };
}

impl_half_element!(half::f16, DType::F16);
impl_half_element!(half::bf16, DType::BF16);
