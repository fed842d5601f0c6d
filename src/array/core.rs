//! Core NdArray type

use super::{Layout, Storage};
use crate::dtype::{DType, Element, Scalar, dispatch_dtype, promote};
use crate::error::{Error, Result};
use std::fmt;

/// N-dimensional numeric array in host memory
///
/// `NdArray` is the plain array every polynomial coefficient is stored in.
/// It consists of:
/// - **Storage**: Reference-counted, immutable element buffer
/// - **Layout**: Shape, strides, and offset defining the view into storage
/// - **DType**: Element type (determined at runtime)
///
/// # Zero-Copy Views
///
/// `reshape` (of contiguous data), `unsqueeze`, `squeeze` and `select`
/// create new arrays that share the same underlying storage. Nothing ever
/// writes through a view, so sharing is always safe.
///
/// # Example
///
/// ```
/// use numpoly::array::NdArray;
///
/// let a = NdArray::from_slice(&[1.0f64, 2.0, 3.0, 4.0], &[2, 2])?;
/// let b = a.unsqueeze(-1)?; // shape [2, 2, 1], shares storage with a
/// assert!(b.shares_storage(&a));
/// # Ok::<(), numpoly::error::Error>(())
/// ```
pub struct NdArray {
    storage: Storage,
    layout: Layout,
}

impl NdArray {
    /// Create an array from a slice of data
    ///
    /// Returns an error if `data.len()` does not equal the product of the
    /// `shape` dimensions.
    pub fn from_slice<T: Element>(data: &[T], shape: &[usize]) -> Result<Self> {
        let expected_len: usize = shape.iter().product();
        if data.len() != expected_len {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![data.len()],
            });
        }

        Ok(Self {
            storage: Storage::from_slice(data),
            layout: Layout::contiguous(shape),
        })
    }

    /// Create a 0-dimensional array holding one value
    pub fn scalar<T: Element>(value: T) -> Self {
        Self {
            storage: Storage::from_slice(&[value]),
            layout: Layout::scalar(),
        }
    }

    /// Create an array filled with zeros
    pub fn zeros(shape: &[usize], dtype: DType) -> Self {
        let len: usize = shape.iter().product();
        Self {
            storage: Storage::zeroed(len, dtype),
            layout: Layout::contiguous(shape),
        }
    }

    /// Create an `n x n` identity matrix
    pub fn eye(n: usize, dtype: DType) -> Result<Self> {
        dispatch_dtype!(dtype, T => {
            let mut data = vec![T::zero(); n * n];
            for i in 0..n {
                data[i * n + i] = T::one();
            }
            Self::from_slice(&data, &[n, n])
        })
    }

    // ===== Accessors =====

    /// Get the storage
    #[inline]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Get the layout
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Get the strides
    #[inline]
    pub fn strides(&self) -> &[isize] {
        self.layout.strides()
    }

    /// Get the number of dimensions (rank)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Get the total number of elements
    #[inline]
    pub fn numel(&self) -> usize {
        self.layout.elem_count()
    }

    /// Get the element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    /// Check if the array is contiguous in memory
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.layout.is_contiguous()
    }

    /// Check if this is a scalar (0-dimensional array)
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.layout.is_scalar()
    }

    /// Get size along a dimension (supports negative indexing)
    pub fn size(&self, dim: isize) -> Option<usize> {
        self.layout.dim(dim)
    }

    /// Whether `self` and `other` are views of the same buffer
    #[inline]
    pub fn shares_storage(&self, other: &Self) -> bool {
        self.storage.ptr_eq(&other.storage)
    }

    // ===== View Operations =====

    /// Reshape to a new shape
    ///
    /// Zero-copy when the array is contiguous; otherwise the data is first
    /// copied into a contiguous buffer.
    pub fn reshape(&self, shape: &[usize]) -> Result<Self> {
        let new_count: usize = shape.iter().product();
        if new_count != self.numel() {
            return Err(Error::shape_mismatch(shape, self.shape()));
        }

        let source = if self.is_contiguous() {
            self.clone()
        } else {
            self.contiguous()
        };
        let layout = source
            .layout
            .reshape(shape)
            .ok_or_else(|| Error::shape_mismatch(shape, self.shape()))?;

        Ok(Self {
            storage: source.storage,
            layout,
        })
    }

    /// Remove dimensions of size 1 (zero-copy)
    pub fn squeeze(&self, dim: Option<isize>) -> Self {
        Self {
            storage: self.storage.clone(),
            layout: self.layout.squeeze(dim),
        }
    }

    /// Add a dimension of size 1 (zero-copy)
    pub fn unsqueeze(&self, dim: isize) -> Result<Self> {
        let layout = self
            .layout
            .unsqueeze(dim)
            .ok_or(Error::InvalidDimension {
                dim,
                ndim: self.ndim(),
            })?;

        Ok(Self {
            storage: self.storage.clone(),
            layout,
        })
    }

    /// Fix `dim` at `index`, dropping that axis (zero-copy)
    ///
    /// `a.select(0, i)` is row `i` of a matrix.
    pub fn select(&self, dim: isize, index: usize) -> Result<Self> {
        let dim_idx = self
            .layout
            .normalize_dim(dim)
            .ok_or(Error::InvalidDimension {
                dim,
                ndim: self.ndim(),
            })?;

        let layout = self.layout.select(dim_idx, index).ok_or_else(|| {
            Error::ShapeMismatch {
                expected: vec![self.shape()[dim_idx]],
                got: vec![index],
            }
        })?;

        Ok(Self {
            storage: self.storage.clone(),
            layout,
        })
    }

    /// Make the array contiguous (copy if needed)
    ///
    /// If the array is already contiguous, returns a view (zero-copy).
    pub fn contiguous(&self) -> Self {
        if self.is_contiguous() {
            return self.clone();
        }

        let elem_size = self.dtype().size_in_bytes();
        let src = self.storage.as_bytes();
        let mut bytes = Vec::with_capacity(self.numel() * elem_size);
        for offset in self.layout.offsets() {
            let start = offset * elem_size;
            bytes.extend_from_slice(&src[start..start + elem_size]);
        }

        Self {
            storage: Storage::from_bytes(&bytes, self.dtype()),
            layout: Layout::contiguous(self.shape()),
        }
    }

    // ===== Data Access =====

    /// Copy array data to a Vec in row-major logical order
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        let data = self.storage.as_slice::<T>()?;
        Ok(self.layout.offsets().map(|offset| data[offset]).collect())
    }

    /// Extract the value of a single-element array
    pub fn item<T: Element>(&self) -> Result<T> {
        if self.numel() != 1 {
            return Err(Error::ShapeMismatch {
                expected: vec![1],
                got: self.shape().to_vec(),
            });
        }
        let data = self.storage.as_slice::<T>()?;
        Ok(data[self.layout.offset()])
    }

    // ===== Element-wise Operations =====

    /// Convert to another dtype (new storage unless dtype already matches)
    ///
    /// Values convert with Rust `as` semantics: integers wrap, floats
    /// truncate toward zero.
    pub fn cast(&self, dtype: DType) -> Result<Self> {
        if dtype == self.dtype() {
            return Ok(self.clone());
        }

        let values: Vec<Scalar> = dispatch_dtype!(self.dtype(), S => {
            self.to_vec::<S>()?.into_iter().map(Element::to_scalar).collect()
        });
        dispatch_dtype!(dtype, D => {
            let data: Vec<D> = values.into_iter().map(D::from_scalar).collect();
            Self::from_slice(&data, self.shape())
        })
    }

    /// Element-wise sum of two arrays of identical shape
    ///
    /// Operands of different dtypes are promoted to a common dtype first.
    /// Integer sums wrap around on overflow.
    pub fn add(&self, other: &Self) -> Result<Self> {
        if self.shape() != other.shape() {
            return Err(Error::shape_mismatch(self.shape(), other.shape()));
        }

        let dtype = promote(self.dtype(), other.dtype());
        let lhs = self.cast(dtype)?;
        let rhs = other.cast(dtype)?;
        dispatch_dtype!(dtype, T => {
            let a = lhs.to_vec::<T>()?;
            let b = rhs.to_vec::<T>()?;
            let data: Vec<T> = a.into_iter().zip(b).map(|(x, y)| x.wrapping_add(y)).collect();
            Self::from_slice(&data, self.shape())
        })
    }

    /// Whether every element equals zero (true for empty arrays)
    pub fn is_all_zero(&self) -> Result<bool> {
        dispatch_dtype!(self.dtype(), T => {
            let data = self.storage.as_slice::<T>()?;
            Ok(self.layout.offsets().all(|offset| data[offset].is_zero()))
        })
    }

    /// Structural equality: same shape, same dtype, equal elements
    pub fn array_eq(&self, other: &Self) -> Result<bool> {
        if self.shape() != other.shape() || self.dtype() != other.dtype() {
            return Ok(false);
        }
        dispatch_dtype!(self.dtype(), T => {
            Ok(self.to_vec::<T>()? == other.to_vec::<T>()?)
        })
    }
}

impl Clone for NdArray {
    /// Clone creates a new array sharing the same storage (zero-copy)
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            layout: self.layout.clone(),
        }
    }
}

impl fmt::Debug for NdArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NdArray")
            .field("shape", &self.shape())
            .field("dtype", &self.dtype())
            .field("contiguous", &self.is_contiguous())
            .finish()
    }
}

impl fmt::Display for NdArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NdArray({:?}, dtype={})", self.shape(), self.dtype())
    }
}
