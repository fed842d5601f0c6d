//! Storage: host memory with Arc-based sharing

use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use std::sync::Arc;

/// Storage for array data
///
/// Storage wraps an immutable host buffer with reference counting, enabling
/// zero-copy views (reshape, unsqueeze, select) that share the underlying
/// buffer. The buffer is word-aligned so it can be reinterpreted as any
/// supported element type.
pub struct Storage {
    inner: Arc<StorageInner>,
}

struct StorageInner {
    /// Backing words; only the first `len * dtype.size_in_bytes()` bytes are data
    words: Vec<u64>,
    /// Number of elements (not bytes)
    len: usize,
    /// Element type
    dtype: DType,
}

impl Storage {
    /// Create zero-filled storage for `len` elements of `dtype`
    ///
    /// An all-zero bit pattern is the zero value for every supported dtype.
    pub fn zeroed(len: usize, dtype: DType) -> Self {
        let size_bytes = len * dtype.size_in_bytes();
        Self {
            inner: Arc::new(StorageInner {
                words: vec![0u64; size_bytes.div_ceil(8)],
                len,
                dtype,
            }),
        }
    }

    /// Create storage from existing data with inferred dtype
    pub fn from_slice<T: Element>(data: &[T]) -> Self {
        Self::from_bytes(bytemuck::cast_slice(data), T::DTYPE)
    }

    /// Create storage from raw bytes with explicit dtype
    ///
    /// Trailing bytes that do not form a whole element are ignored.
    pub fn from_bytes(data: &[u8], dtype: DType) -> Self {
        let len = data.len() / dtype.size_in_bytes();
        let size_bytes = len * dtype.size_in_bytes();
        let mut words = vec![0u64; size_bytes.div_ceil(8)];
        bytemuck::cast_slice_mut::<u64, u8>(&mut words)[..size_bytes]
            .copy_from_slice(&data[..size_bytes]);

        Self {
            inner: Arc::new(StorageInner { words, len, dtype }),
        }
    }

    /// Get the number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len
    }

    /// Check if storage is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.len == 0
    }

    /// Get the element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.inner.dtype
    }

    /// Get size in bytes
    #[inline]
    pub fn size_in_bytes(&self) -> usize {
        self.inner.len * self.inner.dtype.size_in_bytes()
    }

    /// Check whether two storages are the same buffer
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// View the raw element bytes
    pub fn as_bytes(&self) -> &[u8] {
        &bytemuck::cast_slice::<u64, u8>(&self.inner.words)[..self.size_in_bytes()]
    }

    /// View the elements as a typed slice
    ///
    /// Fails with `DTypeMismatch` if `T` is not the storage dtype.
    pub fn as_slice<T: Element>(&self) -> Result<&[T]> {
        if T::DTYPE != self.dtype() {
            return Err(Error::DTypeMismatch {
                lhs: self.dtype(),
                rhs: T::DTYPE,
            });
        }
        Ok(bytemuck::cast_slice(self.as_bytes()))
    }
}

impl Clone for Storage {
    /// Clone increments the reference count (zero-copy)
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("len", &self.inner.len)
            .field("dtype", &self.inner.dtype)
            .field("refs", &Arc::strong_count(&self.inner))
            .finish()
    }
}
