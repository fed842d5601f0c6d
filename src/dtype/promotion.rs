//! Type promotion rules for merging coefficient arrays

use super::DType;

/// Promote two dtypes to a common dtype
///
/// Follows NumPy-like promotion rules:
/// - Floats always win over integers
/// - Larger types win over smaller types
/// - Signed wins over unsigned when mixing
pub fn promote(lhs: DType, rhs: DType) -> DType {
    use DType::*;

    if lhs == rhs {
        return lhs;
    }

    let priority = |dt: DType| -> u8 {
        match dt {
            F64 => 100,
            F32 => 90,
            BF16 => 85,
            F16 => 80,
            I64 => 65,
            U64 => 60,
            I32 => 55,
            U32 => 50,
            I16 => 45,
            U16 => 40,
            I8 => 35,
            U8 => 30,
        }
    };

    // Mixing signed and unsigned integers: signed type of same or larger size
    if lhs.is_signed_int() && rhs.is_unsigned_int() {
        return match (lhs, rhs) {
            (I64, _) => I64,
            (I32, U64 | U32) => I64,
            (I32, _) => I32,
            (I16, U64 | U32) => I64,
            (I16, U16) => I32,
            (I16, _) => I16,
            (I8, U64 | U32) => I64,
            (I8, U16) => I32,
            (I8, _) => I16,
            _ => I64,
        };
    }
    if rhs.is_signed_int() && lhs.is_unsigned_int() {
        return promote(rhs, lhs);
    }

    if priority(lhs) >= priority(rhs) {
        lhs
    } else {
        rhs
    }
}

/// Promote a sequence of dtypes to their common dtype
///
/// Returns `None` for an empty sequence.
pub(crate) fn promote_all(dtypes: impl IntoIterator<Item = DType>) -> Option<DType> {
    dtypes.into_iter().reduce(promote)
}

/// Check if a dtype can be safely cast to another without data loss
pub fn can_cast_safely(from: DType, to: DType) -> bool {
    use DType::*;

    if from == to {
        return true;
    }

    match (from, to) {
        (F16 | BF16, F32 | F64) => true,
        (F32, F64) => true,

        // Integers to floats (exact within the mantissa width)
        (I8 | U8, F16 | BF16 | F32 | F64) => true,
        (I16 | U16, F32 | F64) => true,
        (I32 | U32, F64) => true,

        // Integer widening
        (I8, I16 | I32 | I64) => true,
        (I16, I32 | I64) => true,
        (I32, I64) => true,
        (U8, U16 | U32 | U64 | I16 | I32 | I64) => true,
        (U16, U32 | U64 | I32 | I64) => true,
        (U32, U64 | I64) => true,

        _ => false,
    }
}
