//! FMI 3.0 API

mod functions;
pub mod instance;

pub use fmi_sys::fmi3 as binding;
pub(crate) use functions::Fmi3Functions;
pub use instance::{Fmi3Instance, StepResult, VariableDependency};

use crate::{
    dispatch::{Functions, VersionDescriptor},
    instance::HostCallbacks,
    logger::fmu_str,
    FmiVersion, Status,
};

/// Descriptor of FMI 3.0 for the dispatcher.
pub(crate) struct Fmi3;

impl VersionDescriptor for Fmi3 {
    const VERSION: FmiVersion = FmiVersion::Fmi3;
    const PREFIX: &'static str = "fmi3";
    const TRACKS_WORST_STATUS: bool = true;

    type Functions = Fmi3Functions;
    type RawStatus = binding::fmi3Status;
    type Context = ();

    fn status(raw: binding::fmi3Status) -> Status {
        Status::from_code(raw)
    }

    fn functions(functions: &Functions) -> Option<&Fmi3Functions> {
        match functions {
            Functions::Fmi3(functions) => Some(functions),
            _ => None,
        }
    }

    fn enter(_callbacks: &HostCallbacks) {}
}

/// `logMessage` callback handed to the FMU. The instance environment is the [`HostCallbacks`]
/// of the instance.
pub(crate) unsafe extern "C" fn log_message(
    instance_environment: binding::fmi3InstanceEnvironment,
    status: binding::fmi3Status,
    category: binding::fmi3String,
    message: binding::fmi3String,
) {
    let status = Fmi3::status(status);
    let category = unsafe { fmu_str(category) };
    let message = unsafe { fmu_str(message) };

    let callbacks = instance_environment as *const HostCallbacks;
    if callbacks.is_null() {
        log::warn!("FMU message without instance environment: [{category}] {message}");
    } else {
        // Safety: the environment points into the boxed callbacks of an `Instance`, which
        // outlive its FMU instance.
        unsafe { &*callbacks }.message(status, &category, &message);
    }
}
