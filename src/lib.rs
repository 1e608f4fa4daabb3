//! The `fmi-instance` crate is the instance layer of an FMI importer. It binds the entry points of
//! an FMU shared library into a per-version function table, routes every call through a single
//! instrumented dispatcher and keeps track of the FMI lifecycle state of each instance. FMI 1.0,
//! 2.0 and 3.0 are supported. See <http://www.fmi-standard.org/>
//!
//! ## Examples
//!
//! ### Driving an FMI 2.0 Co-Simulation FMU
//!
//! ```rust,no_run
//! use fmi_instance::{Instance, InterfaceType, State, logger};
//!
//! let mut instance = Instance::builder("inst1")
//!     .log_message(logger::forward_message)
//!     .log_function_call(logger::forward_function_call)
//!     .build()
//!     .unwrap();
//! instance.load_library("path/to/binaries/linux64/model.so").unwrap();
//!
//! let mut fmi2 = instance.fmi2();
//! let resources = "file:///path/to/resources";
//! fmi2.instantiate(InterfaceType::CoSimulation, "{guid}", resources, false, false)
//!     .unwrap()
//!     .ok()
//!     .unwrap();
//! fmi2.setup_experiment(None, 0.0, Some(10.0)).unwrap();
//! fmi2.enter_initialization_mode().unwrap();
//! fmi2.exit_initialization_mode().unwrap();
//! fmi2.do_step(0.0, 0.1, true).unwrap();
//!
//! assert_eq!(instance.state(), State::StepMode);
//! assert_eq!(instance.time(), 0.1);
//! ```
//!
//! ### Tracking the worst status of an FMI 3.0 instance
//!
//! ```rust,no_run
//! use fmi_instance::{Instance, Status};
//!
//! let mut instance = Instance::new("inst1", None, None).unwrap();
//! instance.load_library("path/to/binaries/x86_64-linux/model.so").unwrap();
//!
//! let mut fmi3 = instance.fmi3();
//! fmi3.instantiate_model_exchange("{token}", "/path/to/resources/", false, false).unwrap();
//! fmi3.enter_initialization_mode(None, 0.0, None).unwrap();
//! fmi3.exit_initialization_mode().unwrap();
//!
//! if instance.status() > Status::Warning {
//!     eprintln!("something went wrong since the last reset");
//! }
//! ```
#![doc = document_features::document_features!()]
#![deny(clippy::all)]

pub mod buffer;
mod dispatch;
mod event_flags;
#[cfg(feature = "fmi1")]
pub mod fmi1;
#[cfg(feature = "fmi2")]
pub mod fmi2;
#[cfg(feature = "fmi3")]
pub mod fmi3;
pub mod instance;
pub mod logger;
pub mod state;
pub mod status;
pub mod symbols;

pub use buffer::{MessageBuffer, Values, VariableType};
pub use event_flags::EventFlags;
pub use instance::{Instance, InstanceBuilder, LogFunctionCall, LogMessage, MemoryCallbacks};
pub use state::{State, Transition};
pub use status::{Status, StatusError, StatusRes};
pub use symbols::{SymbolLookup, SymbolTable};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Symbol {symbol} is missing in shared library")]
    MissingSymbol { symbol: String },

    #[error("No shared library has been loaded for instance '{instance}'")]
    LibraryNotLoaded { instance: String },

    #[error("Instance '{instance}' has not been instantiated")]
    NotInstantiated { instance: String },

    #[error("Instance was instantiated as {found:?}, not {expected:?}")]
    VersionMismatch { found: FmiVersion, expected: FmiVersion },

    #[error("Instance '{instance}' was not instantiated for {expected:?}")]
    InterfaceMismatch {
        instance: String,
        expected: InterfaceType,
    },

    #[error("Interface type {0:?} is not supported by FMI {1:?}")]
    UnsupportedInterface(InterfaceType, FmiVersion),

    #[error("Array length mismatch: expected {expected}, found {found}")]
    ArrayLength { expected: usize, found: usize },

    #[error("Out of memory")]
    Allocation(#[from] std::collections::TryReserveError),

    #[error(transparent)]
    InvalidString(#[from] std::ffi::NulError),

    #[error(transparent)]
    Status(#[from] StatusError),

    #[error(transparent)]
    LibLoading {
        #[from]
        source: libloading::Error,
    },
}

impl Error {
    /// Where this failure sits on the FMI status lattice. Missing symbols are unrecoverable for
    /// the instance and map to [`Status::Fatal`].
    pub fn status(&self) -> Status {
        match self {
            Error::MissingSymbol { .. } => Status::Fatal,
            Error::Status(StatusError::Discard) => Status::Discard,
            Error::Status(StatusError::Fatal) => Status::Fatal,
            _ => Status::Error,
        }
    }
}

/// Major version of the FMI standard an instance has been bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FmiVersion {
    Fmi1,
    Fmi2,
    Fmi3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterfaceType {
    ModelExchange,
    CoSimulation,
    ScheduledExecution,
}
