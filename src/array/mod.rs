//! Plain numeric arrays
//!
//! This module provides `NdArray`, the arbitrary-rank, strided, host-resident
//! array that holds every polynomial coefficient. Polynomial-aware code only
//! ever touches numeric data through this type.

mod core;
mod layout;
mod storage;

pub use self::core::NdArray;
pub use layout::{Layout, Offsets, Shape, Strides};
pub use storage::Storage;
