//! Array function registry
//!
//! A [`DispatchTable`] maps an [`ArrayFunction`] identity to up to two
//! implementations: a polynomial-aware override and a plain default. The
//! table is assembled once through [`DispatchTableBuilder`] and is read-only
//! afterwards, so a shared reference can be handed to any number of threads.

use super::args::{Dispatched, FunctionArgs};
use super::{reduce, shape};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;
use tracing::{debug, trace};

/// Identity of a generic array function
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArrayFunction(&'static str);

impl ArrayFunction {
    /// View as an array with at least one dimension
    pub const ATLEAST_1D: Self = Self("atleast_1d");
    /// View as an array with at least two dimensions
    pub const ATLEAST_2D: Self = Self("atleast_2d");
    /// View as an array with at least three dimensions
    pub const ATLEAST_3D: Self = Self("atleast_3d");
    /// Give a new shape without changing the data
    pub const RESHAPE: Self = Self("reshape");
    /// Insert a unit axis
    pub const EXPAND_DIMS: Self = Self("expand_dims");
    /// Smallest element, overall or along an axis
    pub const AMIN: Self = Self("amin");

    /// Identity with the given name
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Function name
    #[inline]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ArrayFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Implementation of an array function
///
/// Implemented for every `Fn(&FunctionArgs) -> Result<Dispatched>` closure or
/// function item that is `Send + Sync`.
pub trait ArrayFunctionImpl: Send + Sync {
    /// Run the function
    fn call(&self, args: &FunctionArgs) -> Result<Dispatched>;
}

impl<F> ArrayFunctionImpl for F
where
    F: Fn(&FunctionArgs) -> Result<Dispatched> + Send + Sync,
{
    fn call(&self, args: &FunctionArgs) -> Result<Dispatched> {
        self(args)
    }
}

#[derive(Default)]
struct Entry {
    poly: Option<Box<dyn ArrayFunctionImpl>>,
    plain: Option<Box<dyn ArrayFunctionImpl>>,
}

/// Builder for a [`DispatchTable`]
#[derive(Default)]
pub struct DispatchTableBuilder {
    entries: HashMap<ArrayFunction, Entry>,
}

impl DispatchTableBuilder {
    /// Empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the polynomial override of `function`
    ///
    /// A later registration for the same function replaces the earlier one.
    pub fn register(mut self, function: ArrayFunction, imp: impl ArrayFunctionImpl + 'static) -> Self {
        let entry = self.entries.entry(function).or_default();
        if entry.poly.replace(Box::new(imp)).is_some() {
            debug!(%function, "replaced polynomial override");
        }
        self
    }

    /// Register the plain-array default of `function`
    pub fn register_plain(
        mut self,
        function: ArrayFunction,
        imp: impl ArrayFunctionImpl + 'static,
    ) -> Self {
        let entry = self.entries.entry(function).or_default();
        if entry.plain.replace(Box::new(imp)).is_some() {
            debug!(%function, "replaced plain default");
        }
        self
    }

    /// Freeze into an immutable table
    pub fn build(self) -> DispatchTable {
        debug!(functions = self.entries.len(), "built dispatch table");
        DispatchTable {
            entries: self.entries,
        }
    }
}

/// Immutable registry of array function implementations
///
/// # Routing
///
/// - Any polynomial operand: the registered override runs; without one the
///   call fails with [`Error::NotImplemented`].
/// - Only plain operands: the plain default runs unchanged; without one the
///   call fails with [`Error::NotImplemented`].
///
/// # Example
///
/// ```
/// use numpoly::dispatch::{ArrayFunction, DispatchTable, FunctionArgs};
/// use numpoly::dtype::DType;
/// use numpoly::poly::symbols;
///
/// let x = symbols("x", false, DType::I64)?;
/// let args = FunctionArgs::new([x]);
/// let promoted = DispatchTable::global()
///     .dispatch(ArrayFunction::ATLEAST_3D, &args)?
///     .into_poly()?;
/// assert_eq!(promoted.shape(), &[1, 1, 1]);
/// # Ok::<(), numpoly::error::Error>(())
/// ```
pub struct DispatchTable {
    entries: HashMap<ArrayFunction, Entry>,
}

impl DispatchTable {
    /// Start building a table
    pub fn builder() -> DispatchTableBuilder {
        DispatchTableBuilder::new()
    }

    /// Builder preloaded with the built-in shape and reduction functions
    ///
    /// Use this to extend the built-ins with further functions.
    pub fn builtin_builder() -> DispatchTableBuilder {
        reduce::register_builtins(shape::register_builtins(Self::builder()))
    }

    /// Table with the built-in shape and reduction functions
    pub fn builtin() -> Self {
        Self::builtin_builder().build()
    }

    /// Process-wide built-in table, initialised on first use
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<DispatchTable> = OnceLock::new();
        GLOBAL.get_or_init(Self::builtin)
    }

    /// Whether a polynomial override is registered for `function`
    pub fn has_override(&self, function: ArrayFunction) -> bool {
        self.entries
            .get(&function)
            .is_some_and(|entry| entry.poly.is_some())
    }

    /// Registered functions, sorted by name
    pub fn functions(&self) -> Vec<ArrayFunction> {
        let mut functions: Vec<_> = self.entries.keys().copied().collect();
        functions.sort();
        functions
    }

    /// Invoke `function`, routing on whether any operand is polynomial
    pub fn dispatch(&self, function: ArrayFunction, args: &FunctionArgs) -> Result<Dispatched> {
        let entry = self.entries.get(&function);
        let poly = args.has_poly();
        let imp = entry.and_then(|entry| {
            if poly {
                entry.poly.as_deref()
            } else {
                entry.plain.as_deref()
            }
        });

        match imp {
            Some(imp) => {
                trace!(%function, poly, operands = args.arrays.len(), "dispatching");
                imp.call(args)
            }
            None => {
                trace!(%function, poly, "no implementation registered");
                Err(Error::NotImplemented {
                    function: function.name(),
                })
            }
        }
    }
}

/// Call `function` through [`DispatchTable::global`]
pub(crate) fn dispatch_global(function: ArrayFunction, args: FunctionArgs) -> Result<Dispatched> {
    DispatchTable::global().dispatch(function, &args)
}

impl fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTable")
            .field("functions", &self.functions())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::ArrayArg;
    use crate::dtype::DType;
    use crate::poly::symbols;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const IDENTITY: ArrayFunction = ArrayFunction::new("identity");

    fn identity(args: &FunctionArgs) -> Result<Dispatched> {
        Ok(Dispatched::from_results(args.arrays.clone()))
    }

    #[test]
    fn test_routes_on_poly_operands() {
        let poly_calls = Arc::new(AtomicUsize::new(0));
        let plain_calls = Arc::new(AtomicUsize::new(0));
        let (p, q) = (Arc::clone(&poly_calls), Arc::clone(&plain_calls));
        let table = DispatchTable::builder()
            .register(IDENTITY, move |args: &FunctionArgs| {
                p.fetch_add(1, Ordering::SeqCst);
                identity(args)
            })
            .register_plain(IDENTITY, move |args: &FunctionArgs| {
                q.fetch_add(1, Ordering::SeqCst);
                identity(args)
            })
            .build();

        let x = symbols("x", false, DType::I64).unwrap();
        table
            .dispatch(IDENTITY, &FunctionArgs::new([ArrayArg::from(1i64), x.into()]))
            .unwrap();
        assert_eq!(poly_calls.load(Ordering::SeqCst), 1);
        assert_eq!(plain_calls.load(Ordering::SeqCst), 0);

        table.dispatch(IDENTITY, &FunctionArgs::new([1i64])).unwrap();
        assert_eq!(plain_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_missing_implementation() {
        let table = DispatchTable::builder().register(IDENTITY, identity).build();
        let result = table.dispatch(IDENTITY, &FunctionArgs::new([1i64]));
        assert!(matches!(
            result,
            Err(Error::NotImplemented { function: "identity" })
        ));

        let x = symbols("x", false, DType::I64).unwrap();
        let result = table.dispatch(ArrayFunction::new("unknown"), &FunctionArgs::new([x]));
        assert!(matches!(
            result,
            Err(Error::NotImplemented { function: "unknown" })
        ));
    }

    #[test]
    fn test_builtin_functions() {
        let table = DispatchTable::builtin();
        assert_eq!(
            table.functions(),
            [
                ArrayFunction::AMIN,
                ArrayFunction::ATLEAST_1D,
                ArrayFunction::ATLEAST_2D,
                ArrayFunction::ATLEAST_3D,
                ArrayFunction::EXPAND_DIMS,
                ArrayFunction::RESHAPE,
            ]
        );
        assert!(table.functions().into_iter().all(|f| table.has_override(f)));
        assert!(!table.has_override(IDENTITY));
    }

    #[test]
    fn test_builtin_builder_extends() {
        let table = DispatchTable::builtin_builder()
            .register(IDENTITY, identity)
            .build();
        assert!(table.has_override(IDENTITY));
        assert!(table.has_override(ArrayFunction::RESHAPE));
    }

    #[test]
    fn test_global_is_shared() {
        let a = DispatchTable::global();
        let b = DispatchTable::global();
        assert!(std::ptr::eq(a, b));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| {
                    let x = symbols("x", false, DType::I64).unwrap();
                    DispatchTable::global()
                        .dispatch(ArrayFunction::ATLEAST_3D, &FunctionArgs::new([x]))
                        .unwrap()
                        .into_poly()
                        .unwrap()
                        .shape()
                        .to_vec()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), [1, 1, 1]);
        }
    }
}
