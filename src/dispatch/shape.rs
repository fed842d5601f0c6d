//! Built-in shape functions
//!
//! Each function has a plain default operating on [`NdArray`] and a
//! polynomial override that coerces every operand with [`aspolynomial`],
//! applies the plain operation to each coefficient array, and reassembles
//! the result through the constructor. Exponents and names are never
//! touched, so only the shape of the polynomial array changes.

use super::args::{ArrayArg, Dispatched, FunctionArgs, aspolynomial};
use super::table::{ArrayFunction, DispatchTableBuilder, dispatch_global};
use crate::array::NdArray;
use crate::error::Result;
use crate::poly::PolyArray;

pub(crate) fn register_builtins(builder: DispatchTableBuilder) -> DispatchTableBuilder {
    builder
        .register(ArrayFunction::ATLEAST_1D, |args: &FunctionArgs| {
            atleast_nd_poly(args, 1)
        })
        .register_plain(ArrayFunction::ATLEAST_1D, |args: &FunctionArgs| {
            atleast_nd_plain(args, 1)
        })
        .register(ArrayFunction::ATLEAST_2D, |args: &FunctionArgs| {
            atleast_nd_poly(args, 2)
        })
        .register_plain(ArrayFunction::ATLEAST_2D, |args: &FunctionArgs| {
            atleast_nd_plain(args, 2)
        })
        .register(ArrayFunction::ATLEAST_3D, |args: &FunctionArgs| {
            atleast_nd_poly(args, 3)
        })
        .register_plain(ArrayFunction::ATLEAST_3D, |args: &FunctionArgs| {
            atleast_nd_plain(args, 3)
        })
        .register(ArrayFunction::RESHAPE, reshape_poly)
        .register_plain(ArrayFunction::RESHAPE, reshape_plain)
        .register(ArrayFunction::EXPAND_DIMS, expand_dims_poly)
        .register_plain(ArrayFunction::EXPAND_DIMS, expand_dims_plain)
}

/// Raise the rank of a plain array to at least `rank` (at most 3)
///
/// Rank 0 becomes all ones; rank 1 of length L becomes `(1, L)` or
/// `(1, L, 1)`; rank 2 becomes `(M, N, 1)`. Never copies contiguous data.
fn promote_rank(array: &NdArray, rank: usize) -> Result<NdArray> {
    match (array.ndim(), rank) {
        (0, _) => array.reshape(&vec![1; rank]),
        (1, 2) => array.unsqueeze(0),
        (1, 3) => array.unsqueeze(0)?.unsqueeze(-1),
        (2, 3) => array.unsqueeze(-1),
        _ => Ok(array.clone()),
    }
}

fn promote_poly_rank(poly: &PolyArray, rank: usize) -> Result<PolyArray> {
    if poly.ndim() >= rank {
        return Ok(poly.clone());
    }
    poly.map_coefficients(|coefficient| promote_rank(coefficient, rank))
}

fn atleast_nd_poly(args: &FunctionArgs, rank: usize) -> Result<Dispatched> {
    let results = args
        .arrays
        .iter()
        .map(|arg| {
            let poly = aspolynomial(arg.clone());
            promote_poly_rank(&poly, rank).map(ArrayArg::Poly)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Dispatched::from_results(results))
}

fn atleast_nd_plain(args: &FunctionArgs, rank: usize) -> Result<Dispatched> {
    let results = args
        .arrays
        .iter()
        .map(|arg| promote_rank(arg.require_plain()?, rank).map(ArrayArg::Plain))
        .collect::<Result<Vec<_>>>()?;
    Ok(Dispatched::from_results(results))
}

fn reshape_poly(args: &FunctionArgs) -> Result<Dispatched> {
    let shape = args.require_shape()?;
    let poly = aspolynomial(args.single()?.clone());
    let reshaped = poly.map_coefficients(|coefficient| coefficient.reshape(shape))?;
    Ok(Dispatched::One(reshaped.into()))
}

fn reshape_plain(args: &FunctionArgs) -> Result<Dispatched> {
    let shape = args.require_shape()?;
    let array = args.single()?.require_plain()?;
    Ok(Dispatched::One(array.reshape(shape)?.into()))
}

fn expand_dims_poly(args: &FunctionArgs) -> Result<Dispatched> {
    let axis = args.require_axis()?;
    let poly = aspolynomial(args.single()?.clone());
    let expanded = poly.map_coefficients(|coefficient| coefficient.unsqueeze(axis))?;
    Ok(Dispatched::One(expanded.into()))
}

fn expand_dims_plain(args: &FunctionArgs) -> Result<Dispatched> {
    let axis = args.require_axis()?;
    let array = args.single()?.require_plain()?;
    Ok(Dispatched::One(array.unsqueeze(axis)?.into()))
}

// ===== Typed helpers over the global table =====

/// View each input with at least one dimension
pub fn atleast_1d<I, A>(arrays: I) -> Result<Dispatched>
where
    I: IntoIterator<Item = A>,
    A: Into<ArrayArg>,
{
    dispatch_global(ArrayFunction::ATLEAST_1D, FunctionArgs::new(arrays))
}

/// View each input with at least two dimensions
pub fn atleast_2d<I, A>(arrays: I) -> Result<Dispatched>
where
    I: IntoIterator<Item = A>,
    A: Into<ArrayArg>,
{
    dispatch_global(ArrayFunction::ATLEAST_2D, FunctionArgs::new(arrays))
}

/// View each input with at least three dimensions
///
/// Rank 0 becomes `(1, 1, 1)`, rank 1 of length L becomes `(1, L, 1)` and
/// rank 2 of shape `(M, N)` becomes `(M, N, 1)`. Inputs of rank three or more
/// are returned as they are. Coefficient arrays are reshaped as views where
/// their layout allows, and the monomials are left untouched.
///
/// If any input is a polynomial array, every result is one. A single input
/// gives [`Dispatched::One`]; several give [`Dispatched::Many`] in input
/// order.
///
/// # Example
///
/// ```
/// use numpoly::array::NdArray;
/// use numpoly::dispatch::{ArrayArg, atleast_3d};
/// use numpoly::dtype::DType;
/// use numpoly::poly::symbols;
///
/// let xy = symbols("x y", false, DType::I64)?;
/// let plain = NdArray::from_slice(&[1i64, 2, 3, 4], &[2, 2])?;
/// let results = atleast_3d([ArrayArg::from(xy), plain.into()])?.into_polys();
/// assert_eq!(results[0].shape(), &[1, 2, 1]);
/// assert_eq!(results[1].shape(), &[2, 2, 1]);
/// # Ok::<(), numpoly::error::Error>(())
/// ```
pub fn atleast_3d<I, A>(arrays: I) -> Result<Dispatched>
where
    I: IntoIterator<Item = A>,
    A: Into<ArrayArg>,
{
    dispatch_global(ArrayFunction::ATLEAST_3D, FunctionArgs::new(arrays))
}

/// Give an array a new shape with the same number of elements
pub fn reshape(array: impl Into<ArrayArg>, shape: &[usize]) -> Result<ArrayArg> {
    let args = FunctionArgs::new([array]).with_shape(shape);
    dispatch_global(ArrayFunction::RESHAPE, args)?.into_one()
}

/// Insert a unit axis at `axis` (negative counts from the end of the result)
pub fn expand_dims(array: impl Into<ArrayArg>, axis: isize) -> Result<ArrayArg> {
    let args = FunctionArgs::new([array]).with_axis(axis);
    dispatch_global(ArrayFunction::EXPAND_DIMS, args)?.into_one()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::DispatchTable;
    use crate::dtype::DType;
    use crate::error::Error;
    use crate::poly::symbols;

    #[test]
    fn test_promote_rank_plain() {
        let scalar = NdArray::scalar(5i32);
        assert_eq!(promote_rank(&scalar, 1).unwrap().shape(), &[1]);
        assert_eq!(promote_rank(&scalar, 2).unwrap().shape(), &[1, 1]);
        assert_eq!(promote_rank(&scalar, 3).unwrap().shape(), &[1, 1, 1]);

        let vector = NdArray::from_slice(&[1i32, 2, 3], &[3]).unwrap();
        assert_eq!(promote_rank(&vector, 1).unwrap().shape(), &[3]);
        assert_eq!(promote_rank(&vector, 2).unwrap().shape(), &[1, 3]);
        let promoted = promote_rank(&vector, 3).unwrap();
        assert_eq!(promoted.shape(), &[1, 3, 1]);
        assert!(promoted.shares_storage(&vector));

        let matrix = NdArray::from_slice(&[1i32, 2, 3, 4], &[2, 2]).unwrap();
        assert_eq!(promote_rank(&matrix, 2).unwrap().shape(), &[2, 2]);
        assert_eq!(promote_rank(&matrix, 3).unwrap().shape(), &[2, 2, 1]);
    }

    #[test]
    fn test_atleast_2d_poly() {
        let q = symbols("q:3", false, DType::I64).unwrap();
        let promoted = atleast_2d([q.clone()]).unwrap().into_poly().unwrap();
        assert_eq!(promoted.shape(), &[1, 3]);
        assert_eq!(promoted.exponents(), q.exponents());
    }

    #[test]
    fn test_atleast_1d_plain_stays_plain() {
        let result = atleast_1d([7u8]).unwrap().into_plain().unwrap();
        assert_eq!(result.shape(), &[1]);
        assert_eq!(result.to_vec::<u8>().unwrap(), [7]);
    }

    #[test]
    fn test_reshape() {
        let q = symbols("q:4", false, DType::F64).unwrap();
        let reshaped = reshape(q.clone(), &[2, 2]).unwrap();
        let reshaped = reshaped.as_poly().unwrap();
        assert_eq!(reshaped.shape(), &[2, 2]);
        assert_eq!(reshaped.names(), q.names());

        assert!(matches!(
            reshape(q, &[3]),
            Err(Error::ShapeMismatch { .. })
        ));

        let plain = NdArray::from_slice(&[1u16, 2, 3, 4], &[4]).unwrap();
        let reshaped = reshape(plain, &[4, 1]).unwrap();
        assert_eq!(reshaped.as_plain().unwrap().shape(), &[4, 1]);
    }

    #[test]
    fn test_expand_dims() {
        let q = symbols("q:2", false, DType::I64).unwrap();
        let front = expand_dims(q.clone(), 0).unwrap();
        assert_eq!(front.shape(), &[1, 2]);
        let back = expand_dims(q.clone(), -1).unwrap();
        assert_eq!(back.shape(), &[2, 1]);
        assert!(matches!(
            expand_dims(q, 3),
            Err(Error::InvalidDimension { dim: 3, .. })
        ));
    }

    #[test]
    fn test_plain_defaults_reject_polys() {
        let q = symbols("q:2", false, DType::I64).unwrap();
        let args = FunctionArgs::new([q]).with_shape(&[2]).with_axis(0);
        for result in [
            atleast_nd_plain(&args, 3),
            reshape_plain(&args),
            expand_dims_plain(&args),
        ] {
            assert!(matches!(result, Err(Error::InvalidArgument { arg: "arrays", .. })));
        }
    }

    #[test]
    fn test_missing_parameters() {
        let q = symbols("q:2", false, DType::I64).unwrap();
        let result = DispatchTable::global().dispatch(ArrayFunction::RESHAPE, &FunctionArgs::new([q]));
        assert!(matches!(result, Err(Error::InvalidArgument { arg: "shape", .. })));
    }
}
