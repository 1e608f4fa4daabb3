//! FMI 1.0 API
//!
//! FMI 1.0 hands no environment pointer to its logger callback. While an FMI 1.0 call is running,
//! the callbacks of the calling instance are published in a thread-local slot instead, see
//! [`CurrentInstance`].

mod functions;
pub mod instance;

use std::cell::Cell;

pub use fmi_sys::fmi1 as binding;
pub(crate) use functions::Fmi1Functions;
pub use instance::{Fmi1Instance, StatusKind};

use crate::{
    dispatch::{Functions, VersionDescriptor},
    instance::HostCallbacks,
    logger::fmu_str,
    FmiVersion, Status,
};

thread_local! {
    static CURRENT: Cell<*const HostCallbacks> = const { Cell::new(std::ptr::null()) };
}

/// Publishes the callbacks of an instance to the FMI 1.0 logger of this thread until dropped.
pub(crate) struct CurrentInstance {
    previous: *const HostCallbacks,
}

impl CurrentInstance {
    fn enter(callbacks: &HostCallbacks) -> Self {
        let previous = CURRENT.with(|current| current.replace(callbacks));
        Self { previous }
    }
}

impl Drop for CurrentInstance {
    fn drop(&mut self) {
        CURRENT.with(|current| current.set(self.previous));
    }
}

/// Descriptor of FMI 1.0 for the dispatcher.
pub(crate) struct Fmi1;

impl VersionDescriptor for Fmi1 {
    const VERSION: FmiVersion = FmiVersion::Fmi1;
    const PREFIX: &'static str = "fmi";

    type Functions = Fmi1Functions;
    type RawStatus = binding::fmiStatus;
    type Context = CurrentInstance;

    fn status(raw: binding::fmiStatus) -> Status {
        Status::from_code(raw)
    }

    fn functions(functions: &Functions) -> Option<&Fmi1Functions> {
        match functions {
            Functions::Fmi1(functions) => Some(functions),
            _ => None,
        }
    }

    fn enter(callbacks: &HostCallbacks) -> CurrentInstance {
        CurrentInstance::enter(callbacks)
    }
}

extern "C" {
    /// Implemented in logger.c, formats the message and calls [`fmi1_forward_log_message`].
    pub(crate) fn fmi1_logger_handler(
        c: binding::fmiComponent,
        instanceName: binding::fmiString,
        status: binding::fmiStatus,
        category: binding::fmiString,
        message: binding::fmiString,
        ...
    );
}

/// Receives the formatted FMU messages from logger.c and delivers them to the instance whose
/// call is running on this thread.
#[no_mangle]
extern "C" fn fmi1_forward_log_message(
    _component: binding::fmiComponent,
    instance_name: binding::fmiString,
    status: binding::fmiStatus,
    category: binding::fmiString,
    message: binding::fmiString,
) {
    let status = Fmi1::status(status);
    let category = unsafe { fmu_str(category) };
    let message = unsafe { fmu_str(message) };

    let callbacks = CURRENT.with(Cell::get);
    if callbacks.is_null() {
        let instance_name = unsafe { fmu_str(instance_name) };
        crate::logger::forward_message(&instance_name, status, &category, &message);
    } else {
        // Safety: set by a live `CurrentInstance` guard, which borrows the callbacks.
        unsafe { &*callbacks }.message(status, &category, &message);
    }
}
