//! Resolution of FMI entry points from a loaded shared library.

use std::{collections::HashMap, ffi::c_void, mem};

use crate::Error;

/// Something symbols can be looked up in, usually the FMU's shared library.
pub trait SymbolLookup {
    /// Address of the exported symbol `name`, or `None` if it is not exported.
    fn symbol(&self, name: &str) -> Option<*const c_void>;
}

impl SymbolLookup for libloading::Library {
    fn symbol(&self, name: &str) -> Option<*const c_void> {
        // Safety: the symbol is only read as an address here, it is never called as a
        // `*const c_void`.
        let symbol = unsafe { self.get::<*const c_void>(name.as_bytes()) };
        match symbol {
            Ok(symbol) => Some(*symbol),
            Err(err) => {
                log::trace!("Symbol {name} not found: {err}");
                None
            }
        }
    }
}

/// Symbol addresses registered by hand, for instance functions linked into the importing
/// executable.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    symbols: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `address` under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, address: *const c_void) -> &mut Self {
        self.symbols.insert(name.into(), address as usize);
        self
    }

    pub fn remove(&mut self, name: &str) -> &mut Self {
        self.symbols.remove(name);
        self
    }
}

impl SymbolLookup for SymbolTable {
    fn symbol(&self, name: &str) -> Option<*const c_void> {
        self.symbols.get(name).map(|address| *address as *const c_void)
    }
}

/// Resolve an entry point that may be missing from the library.
///
/// # Safety
/// `F` must be the function pointer type matching the C signature of `name`.
pub unsafe fn optional<F: Copy>(lookup: &dyn SymbolLookup, name: &str) -> Option<F> {
    assert_eq!(mem::size_of::<F>(), mem::size_of::<*const c_void>());
    let address = lookup.symbol(name).filter(|address| !address.is_null())?;
    log::trace!("Resolved {name} at {address:p}");
    Some(unsafe { mem::transmute_copy::<*const c_void, F>(&address) })
}

/// Resolve an entry point the FMU has to export.
///
/// # Safety
/// `F` must be the function pointer type matching the C signature of `name`.
pub unsafe fn required<F: Copy>(lookup: &dyn SymbolLookup, name: &str) -> Result<F, Error> {
    unsafe { optional(lookup, name) }.ok_or_else(|| Error::MissingSymbol {
        symbol: name.to_owned(),
    })
}

/// Resolve a function-table field named after its C symbol, e.g. `fmi2GetReal`.
///
/// `load_required!(lookup, fmi2GetReal)` resolves a mandatory entry and propagates
/// [`Error::MissingSymbol`], `load_optional!(lookup, fmi2GetFMUstate)` yields an `Option`. A
/// `prefix = ...` argument is prepended to the symbol name, as needed for FMI 1.0.
macro_rules! load_required {
    ($lookup:expr, $field:ident) => {
        unsafe { $crate::symbols::required($lookup, stringify!($field))? }
    };
    ($lookup:expr, $field:ident, prefix = $prefix:expr) => {
        unsafe {
            $crate::symbols::required($lookup, &format!("{}_{}", $prefix, stringify!($field)))?
        }
    };
}

macro_rules! load_optional {
    ($lookup:expr, $field:ident) => {
        unsafe { $crate::symbols::optional($lookup, stringify!($field)) }
    };
}

pub(crate) use {load_optional, load_required};
