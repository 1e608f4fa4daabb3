//! FMI 2.0 API

mod functions;
pub mod instance;

pub use fmi_sys::fmi2 as binding;
pub(crate) use functions::Fmi2Functions;
pub use instance::{Fmi2Instance, StatusKind};

use crate::{
    dispatch::{Functions, VersionDescriptor},
    instance::HostCallbacks,
    logger::fmu_str,
    FmiVersion, Status,
};

/// Descriptor of FMI 2.0 for the dispatcher.
pub(crate) struct Fmi2;

impl VersionDescriptor for Fmi2 {
    const VERSION: FmiVersion = FmiVersion::Fmi2;
    const PREFIX: &'static str = "fmi2";

    type Functions = Fmi2Functions;
    type RawStatus = binding::fmi2Status;
    type Context = ();

    fn status(raw: binding::fmi2Status) -> Status {
        Status::from_code(raw)
    }

    fn functions(functions: &Functions) -> Option<&Fmi2Functions> {
        match functions {
            Functions::Fmi2(functions) => Some(functions),
            _ => None,
        }
    }

    fn enter(_callbacks: &HostCallbacks) {}
}

extern "C" {
    /// Implemented in logger.c, formats the message and calls [`fmi2_forward_log_message`].
    /// Note: This can be re-implemented in pure Rust once the `c_variadics` feature stabilizes.
    /// See: https://doc.rust-lang.org/beta/unstable-book/language-features/c-variadic.html
    pub(crate) fn fmi2_logger_handler(
        componentEnvironment: binding::fmi2ComponentEnvironment,
        instanceName: binding::fmi2String,
        status: binding::fmi2Status,
        category: binding::fmi2String,
        message: binding::fmi2String,
        ...
    );
}

/// Receives the formatted FMU messages from logger.c. The component environment is the
/// [`HostCallbacks`] of the instance.
#[no_mangle]
extern "C" fn fmi2_forward_log_message(
    component_environment: binding::fmi2ComponentEnvironment,
    instance_name: binding::fmi2String,
    status: binding::fmi2Status,
    category: binding::fmi2String,
    message: binding::fmi2String,
) {
    let status = Fmi2::status(status);
    let category = unsafe { fmu_str(category) };
    let message = unsafe { fmu_str(message) };

    let callbacks = component_environment as *const HostCallbacks;
    if callbacks.is_null() {
        let instance_name = unsafe { fmu_str(instance_name) };
        crate::logger::forward_message(&instance_name, status, &category, &message);
    } else {
        // Safety: the environment points into the boxed callbacks of an `Instance`, which
        // outlive its component.
        unsafe { &*callbacks }.message(status, &category, &message);
    }
}
