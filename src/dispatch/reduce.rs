//! Built-in reductions
//!
//! `amin` picks, for every output position, the smallest element of the
//! group it reduces over. Plain elements compare by value. Polynomial
//! elements compare by their leading monomial in graded order (total degree,
//! then exponents lexicographically, the order canonical rows are kept in),
//! then by the coefficient of that monomial. An all-zero element counts as
//! the constant 0. Ties keep the first element.

use super::args::{ArrayArg, Dispatched, FunctionArgs, aspolynomial};
use super::table::{ArrayFunction, DispatchTableBuilder, dispatch_global};
use crate::array::NdArray;
use crate::dtype::{Element, dispatch_dtype};
use crate::error::{Error, Result};
use crate::poly::{Exponents, PolyArray, polynomial_from_attributes};
use std::cmp::Ordering;

pub(crate) fn register_builtins(builder: DispatchTableBuilder) -> DispatchTableBuilder {
    builder
        .register(ArrayFunction::AMIN, amin_poly)
        .register_plain(ArrayFunction::AMIN, amin_plain)
}

/// Flat row-major input positions reduced into each output element
struct Groups {
    shape: Vec<usize>,
    members: Vec<Vec<usize>>,
}

impl Groups {
    fn new(shape: &[usize], axis: Option<isize>) -> Result<Self> {
        let Some(axis) = axis else {
            let numel: usize = shape.iter().product();
            return Ok(Self {
                shape: Vec::new(),
                members: vec![(0..numel).collect()],
            });
        };

        let dim = normalize_axis(axis, shape.len())?;
        let outer: usize = shape[..dim].iter().product();
        let len = shape[dim];
        let inner: usize = shape[dim + 1..].iter().product();

        let mut members = Vec::with_capacity(outer * inner);
        for o in 0..outer {
            for i in 0..inner {
                members.push((0..len).map(|k| (o * len + k) * inner + i).collect());
            }
        }

        let mut reduced = shape.to_vec();
        reduced.remove(dim);
        Ok(Self {
            shape: reduced,
            members,
        })
    }

    /// Position of the first smallest member of every group
    fn argmin(&self, cmp: impl Fn(usize, usize) -> Ordering) -> Result<Vec<usize>> {
        self.members
            .iter()
            .map(|group| {
                group
                    .iter()
                    .copied()
                    .reduce(|best, k| if cmp(k, best) == Ordering::Less { k } else { best })
                    .ok_or_else(|| Error::InvalidArgument {
                        arg: "a",
                        reason: "zero-size reduction has no minimum".to_string(),
                    })
            })
            .collect()
    }
}

fn normalize_axis(axis: isize, ndim: usize) -> Result<usize> {
    let rank = ndim as isize;
    let dim = if axis < 0 { axis + rank } else { axis };
    if (0..rank).contains(&dim) {
        Ok(dim as usize)
    } else {
        Err(Error::InvalidDimension { dim: axis, ndim })
    }
}

/// Total order on values; NaN sorts first so it propagates
fn value_order<T: Element>(a: T, b: T) -> Ordering {
    match a.partial_cmp(&b) {
        Some(order) => order,
        None if a.partial_cmp(&a).is_none() && b.partial_cmp(&b).is_some() => Ordering::Less,
        None => Ordering::Equal,
    }
}

fn graded(exponents: &Exponents, a: usize, b: usize) -> Ordering {
    exponents
        .total_degree(a)
        .cmp(&exponents.total_degree(b))
        .then_with(|| exponents.row(a).cmp(exponents.row(b)))
}

/// Leading monomial of every element of a polynomial array
struct LeadTerms<'a, T> {
    exponents: &'a Exponents,
    constant: Vec<u32>,
    values: Vec<Vec<T>>,
    leads: Vec<Option<usize>>,
}

impl<'a, T: Element> LeadTerms<'a, T> {
    fn new(poly: &'a PolyArray) -> Result<Self> {
        let exponents = poly.exponents();
        let values = poly
            .coefficients()
            .iter()
            .map(NdArray::to_vec::<T>)
            .collect::<Result<Vec<_>>>()?;

        let numel: usize = poly.shape().iter().product();
        let leads = (0..numel)
            .map(|element| {
                (0..exponents.rows())
                    .filter(|&row| !values[row][element].is_zero())
                    .max_by(|&a, &b| graded(exponents, a, b))
            })
            .collect();

        Ok(Self {
            exponents,
            constant: vec![0; exponents.cols()],
            values,
            leads,
        })
    }

    fn lead(&self, element: usize) -> (u64, &[u32], T) {
        match self.leads[element] {
            Some(row) => (
                self.exponents.total_degree(row),
                self.exponents.row(row),
                self.values[row][element],
            ),
            None => (0, self.constant.as_slice(), T::zero()),
        }
    }

    fn compare(&self, a: usize, b: usize) -> Ordering {
        let (degree_a, exponent_a, value_a) = self.lead(a);
        let (degree_b, exponent_b, value_b) = self.lead(b);
        degree_a
            .cmp(&degree_b)
            .then_with(|| exponent_a.cmp(exponent_b))
            .then_with(|| value_order(value_a, value_b))
    }
}

/// Pick elements at flat positions `picks` into a new array of `shape`
fn gather(array: &NdArray, picks: &[usize], shape: &[usize]) -> Result<NdArray> {
    dispatch_dtype!(array.dtype(), T => {
        let data = array.to_vec::<T>()?;
        let picked: Vec<T> = picks.iter().map(|&k| data[k]).collect();
        NdArray::from_slice(&picked, shape)
    })
}

fn amin_plain(args: &FunctionArgs) -> Result<Dispatched> {
    let array = args.single()?.require_plain()?;
    let groups = Groups::new(array.shape(), args.axis)?;
    let picks = dispatch_dtype!(array.dtype(), T => {
        let data = array.to_vec::<T>()?;
        groups.argmin(|a, b| value_order(data[a], data[b]))?
    });
    Ok(Dispatched::One(gather(array, &picks, &groups.shape)?.into()))
}

fn amin_poly(args: &FunctionArgs) -> Result<Dispatched> {
    let poly = aspolynomial(args.single()?.clone());
    let groups = Groups::new(poly.shape(), args.axis)?;
    let picks = dispatch_dtype!(poly.dtype(), T => {
        let leads = LeadTerms::<T>::new(&poly)?;
        groups.argmin(|a, b| leads.compare(a, b))?
    });

    let coefficients = poly
        .coefficients()
        .iter()
        .map(|coefficient| gather(coefficient, &picks, &groups.shape))
        .collect::<Result<Vec<_>>>()?;
    let reduced = polynomial_from_attributes(
        poly.exponents().clone(),
        coefficients,
        poly.names().to_vec(),
        Some(poly.dtype()),
        true,
    )?;
    Ok(Dispatched::One(reduced.into()))
}

/// Smallest element, overall (`axis = None`) or along `axis`
///
/// Reducing over everything gives a 0-dimensional result; reducing along an
/// axis removes that axis. Polynomial elements are ordered by leading
/// monomial (graded), then by its coefficient; over indeterminates `x, y`
/// that gives `1 < y < x < 2x < x^2`.
///
/// # Example
///
/// ```
/// use numpoly::array::NdArray;
/// use numpoly::dispatch::amin;
///
/// let a = NdArray::from_slice(&[4i64, 1, 3, 2], &[2, 2])?;
/// let rows = amin(a, Some(1))?;
/// assert_eq!(rows.as_plain().unwrap().to_vec::<i64>()?, [1, 2]);
/// # Ok::<(), numpoly::error::Error>(())
/// ```
pub fn amin(array: impl Into<ArrayArg>, axis: Option<isize>) -> Result<ArrayArg> {
    let mut args = FunctionArgs::new([array]);
    args.axis = axis;
    dispatch_global(ArrayFunction::AMIN, args)?.into_one()
}
