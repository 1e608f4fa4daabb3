//! The instance handle owned by the host.

use std::{
    ffi::{c_void, OsStr},
    fmt,
};

use crate::{
    buffer::MessageBuffer, dispatch::Functions, logger, symbols::SymbolLookup, Error, FmiVersion,
    InterfaceType, State, Status,
};

/// Host callback for messages logged by the FMU: `(instance name, status, category, message)`.
pub type LogMessage = Box<dyn Fn(&str, Status, &str, &str) + Send>;

/// Host callback for traced FMI calls: `(instance name, status, rendered call)`.
pub type LogFunctionCall = Box<dyn Fn(&str, Status, &str) + Send>;

/// Memory management functions handed to FMI 1.0 and 2.0 FMUs.
#[derive(Debug, Clone, Copy)]
pub struct MemoryCallbacks {
    pub allocate: unsafe extern "C" fn(nobj: usize, size: usize) -> *mut c_void,
    pub free: unsafe extern "C" fn(obj: *mut c_void),
}

impl Default for MemoryCallbacks {
    fn default() -> Self {
        Self {
            allocate: libc::calloc,
            free: libc::free,
        }
    }
}

/// Everything the FMU's logger callback needs to reach the host. Boxed by [`Instance`] so that
/// its address can be handed to the FMU as the component or instance environment.
pub(crate) struct HostCallbacks {
    pub(crate) instance_name: String,
    pub(crate) log_message: Option<LogMessage>,
    pub(crate) log_function_call: Option<LogFunctionCall>,
}

impl HostCallbacks {
    /// Deliver an FMU message, falling back to the `log` facade without a host logger.
    pub(crate) fn message(&self, status: Status, category: &str, message: &str) {
        match &self.log_message {
            Some(log_message) => log_message(&self.instance_name, status, category, message),
            None => logger::forward_message(&self.instance_name, status, category, message),
        }
    }

    pub(crate) fn as_environment(&self) -> *mut c_void {
        self as *const HostCallbacks as *mut c_void
    }
}

/// An FMU instance and the shared library it was loaded from.
///
/// An `Instance` starts out unbound in [`State::StartAndEnd`]. After a library has been set, one
/// of the version views ([`Instance::fmi1`], [`Instance::fmi2`], [`Instance::fmi3`]) instantiates
/// the FMU, which binds the function table of that version. Every call made through a view is
/// traced to the function-call logger and advances [`Instance::state`].
pub struct Instance {
    // Field order is drop order: the FMU component is freed in `Drop`, then the function
    // table, buffer and host callbacks go before the library is unloaded.
    pub(crate) functions: Functions,
    pub(crate) buffer: MessageBuffer,
    pub(crate) callbacks: Box<HostCallbacks>,
    library: Option<Box<dyn SymbolLookup + Send>>,

    pub(crate) component: *mut c_void,
    pub(crate) state: State,
    pub(crate) time: f64,
    pub(crate) status: Status,
    pub(crate) interface_type: Option<InterfaceType>,
    pub(crate) event_mode_used: bool,
    pub(crate) log_function_calls: bool,
    pub(crate) memory: MemoryCallbacks,
}

// The component is only ever touched through `&mut self`, so an instance may move to another
// thread as long as the FMU itself does not use thread-local storage.
unsafe impl Send for Instance {}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("name", &self.name())
            .field("version", &self.fmi_version())
            .field("interface_type", &self.interface_type)
            .field("state", &self.state)
            .field("time", &self.time)
            .field("status", &self.status)
            .field("component", &self.component)
            .finish()
    }
}

impl Instance {
    /// Create an instance named `name` with optional host loggers.
    ///
    /// Fails only if the name or the message buffer cannot be allocated.
    pub fn new(
        name: &str,
        log_message: Option<LogMessage>,
        log_function_call: Option<LogFunctionCall>,
    ) -> Result<Self, Error> {
        let mut builder = InstanceBuilder::new(name);
        builder.log_message = log_message;
        builder.log_function_call = log_function_call;
        builder.build()
    }

    pub fn builder(name: &str) -> InstanceBuilder {
        InstanceBuilder::new(name)
    }

    /// Load the FMU's shared library.
    pub fn load_library(&mut self, path: impl AsRef<OsStr>) -> Result<(), Error> {
        let path = path.as_ref();
        log::debug!("Loading shared library {path:?} for instance '{}'", self.name());
        let library = unsafe { libloading::Library::new(path) }?;
        self.set_library(library);
        Ok(())
    }

    /// Use `library` to resolve the FMI entry points, e.g. a [`crate::symbols::SymbolTable`] of
    /// functions linked into the executable.
    ///
    /// A component created from the previous library is freed first.
    pub fn set_library(&mut self, library: impl SymbolLookup + Send + 'static) {
        if let Err(err) = self.free_component() {
            log::warn!("Instance '{}': freeing the component failed: {err}", self.name());
        }
        self.library = Some(Box::new(library));
    }

    pub(crate) fn library(&self) -> Result<&dyn SymbolLookup, Error> {
        match &self.library {
            Some(library) => Ok(library.as_ref()),
            None => Err(Error::LibraryNotLoaded {
                instance: self.name().to_owned(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.callbacks.instance_name
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// The simulation time as last set by a time-advancing call.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// The worst status returned by an FMI 3.0 call since instantiation or the last reset.
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn fmi_version(&self) -> Option<FmiVersion> {
        self.functions.version()
    }

    pub fn interface_type(&self) -> Option<InterfaceType> {
        self.interface_type
    }

    /// `eventModeUsed` as requested when instantiating for FMI 3.0 Co-Simulation.
    pub fn event_mode_used(&self) -> bool {
        self.event_mode_used
    }

    pub fn log_function_calls(&self) -> bool {
        self.log_function_calls
    }

    /// Switch call tracing to the function-call logger on or off.
    pub fn set_log_function_calls(&mut self, enabled: bool) {
        self.log_function_calls = enabled;
    }

    /// The text of the last traced call.
    pub fn message_buffer(&self) -> &MessageBuffer {
        &self.buffer
    }

    pub fn memory_callbacks(&self) -> MemoryCallbacks {
        self.memory
    }

    /// Report a message to the host as if it came from the FMU.
    pub(crate) fn log_message(&self, status: Status, category: &str, message: &str) {
        self.callbacks.message(status, category, message);
    }

    /// Unbind the instance after resolving its function table failed. A missing symbol is
    /// reported to the host with category `fatal` and the text built by `describe`.
    pub(crate) fn binding_failed(
        &mut self,
        err: Error,
        describe: impl FnOnce(&str) -> String,
    ) -> Error {
        if let Error::MissingSymbol { symbol } = &err {
            log::error!("Instance '{}': {err}", self.name());
            self.log_message(Status::Fatal, "fatal", &describe(symbol));
        }
        self.unbind();
        err
    }

    pub(crate) fn interface_mismatch(&self, expected: InterfaceType) -> Error {
        Error::InterfaceMismatch {
            instance: self.name().to_owned(),
            expected,
        }
    }

    /// Drop the function table and go back to [`State::StartAndEnd`].
    pub(crate) fn unbind(&mut self) {
        self.functions = Functions::Unbound;
        self.component = std::ptr::null_mut();
        self.interface_type = None;
        self.event_mode_used = false;
        self.state = State::StartAndEnd;
    }

    /// Free the FMU component, if any, and release the instance.
    pub fn free(self) {
        drop(self)
    }

    pub(crate) fn free_component(&mut self) -> Result<(), Error> {
        match self.functions.version() {
            #[cfg(feature = "fmi1")]
            Some(FmiVersion::Fmi1) => self.fmi1().free_instance(),
            #[cfg(feature = "fmi2")]
            Some(FmiVersion::Fmi2) => self.fmi2().free_instance(),
            #[cfg(feature = "fmi3")]
            Some(FmiVersion::Fmi3) => self.fmi3().free_instance(),
            _ => Ok(()),
        }
    }
}

impl Drop for Instance {
    fn drop(&mut self) {
        if !self.component.is_null() {
            if let Err(err) = self.free_component() {
                log::warn!("Instance '{}': freeing the component failed: {err}", self.name());
            }
        }
        log::trace!("Freeing instance '{}'", self.name());
    }
}

/// Configures and creates an [`Instance`].
pub struct InstanceBuilder {
    name: String,
    log_message: Option<LogMessage>,
    log_function_call: Option<LogFunctionCall>,
    log_function_calls: bool,
    buffer_capacity: usize,
    memory: MemoryCallbacks,
}

impl InstanceBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            log_message: None,
            log_function_call: None,
            log_function_calls: true,
            buffer_capacity: MessageBuffer::DEFAULT_CAPACITY,
            memory: MemoryCallbacks::default(),
        }
    }

    /// Receive the messages the FMU logs. Without one, messages go to the `log` facade.
    pub fn log_message(mut self, f: impl Fn(&str, Status, &str, &str) + Send + 'static) -> Self {
        self.log_message = Some(Box::new(f));
        self
    }

    /// Receive a rendered trace of every FMI call.
    pub fn log_function_call(mut self, f: impl Fn(&str, Status, &str) + Send + 'static) -> Self {
        self.log_function_call = Some(Box::new(f));
        self
    }

    /// Whether calls are traced to the function-call logger. On by default.
    pub fn log_function_calls(mut self, enabled: bool) -> Self {
        self.log_function_calls = enabled;
        self
    }

    /// Initial capacity of the message buffer in bytes.
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    pub fn memory_callbacks(mut self, memory: MemoryCallbacks) -> Self {
        self.memory = memory;
        self
    }

    pub fn build(self) -> Result<Instance, Error> {
        let buffer = MessageBuffer::with_capacity(self.buffer_capacity)?;

        let mut instance_name = String::new();
        instance_name.try_reserve_exact(self.name.len())?;
        instance_name.push_str(&self.name);

        log::debug!("Creating instance '{instance_name}'");

        Ok(Instance {
            functions: Functions::Unbound,
            buffer,
            callbacks: Box::new(HostCallbacks {
                instance_name,
                log_message: self.log_message,
                log_function_call: self.log_function_call,
            }),
            library: None,
            component: std::ptr::null_mut(),
            state: State::StartAndEnd,
            time: 0.0,
            status: Status::OK,
            interface_type: None,
            event_mode_used: false,
            log_function_calls: self.log_function_calls,
            memory: self.memory,
        })
    }
}
