//! FMI 3.0 calls on an [`Instance`].

use std::{
    ffi::{c_void, CString},
    fmt,
};

use super::{binding, functions, Fmi3, Fmi3Functions};
use crate::{
    dispatch::{Functions, VersionDescriptor},
    Error, Instance, InterfaceType, Status, Transition,
};

mod co_simulation;
mod common;
mod model_exchange;
mod scheduled_execution;

pub use co_simulation::StepResult;
pub use common::VariableDependency;

/// The FMI 3.0 interface of an [`Instance`], see [`Instance::fmi3`].
pub struct Fmi3Instance<'a> {
    instance: &'a mut Instance,
}

impl Instance {
    /// Make FMI 3.0 calls on this instance.
    pub fn fmi3(&mut self) -> Fmi3Instance<'_> {
        Fmi3Instance { instance: self }
    }
}

fn pointer<F: Copy>(function: Option<F>) -> *const c_void {
    match function {
        // Safety: `F` is always an `extern "C" fn` type here
        Some(f) => unsafe { std::mem::transmute_copy::<F, *const c_void>(&f) },
        None => std::ptr::null(),
    }
}

/// Strings handed to every `fmi3Instantiate*` function.
struct Instantiation {
    name: CString,
    token: CString,
    resource_path: CString,
}

impl Instantiation {
    fn new(name: &str, token: &str, resource_path: &str) -> Result<Self, Error> {
        Ok(Self {
            name: CString::new(name)?,
            token: CString::new(token)?,
            resource_path: CString::new(resource_path)?,
        })
    }
}

impl fmt::Display for Instantiation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "instanceName=\"{}\", instantiationToken=\"{}\", resourcePath=\"{}\"",
            self.name.to_string_lossy(),
            self.token.to_string_lossy(),
            self.resource_path.to_string_lossy()
        )
    }
}

impl Fmi3Instance<'_> {
    /// Free any previous FMU instance and resolve the FMI 3.0 function table for
    /// `interface_type`.
    fn bind(&mut self, interface_type: InterfaceType) -> Result<(), Error> {
        self.instance.free_component()?;

        let functions = Fmi3Functions::load(self.instance.library()?, interface_type);
        let functions = functions.map_err(|err| {
            self.instance.binding_failed(err, |symbol| {
                format!("Symbol {symbol} is missing in shared library.")
            })
        })?;
        self.instance.functions = Functions::Fmi3(Box::new(functions));
        self.instance.interface_type = Some(interface_type);
        self.instance.status = Status::OK;
        self.instance.event_mode_used = false;
        Ok(())
    }

    /// Log the instantiation call and keep the new FMU instance, or unbind if there is none.
    fn instantiated(
        &mut self,
        fmu_instance: binding::fmi3Instance,
        name: &str,
        args: fmt::Arguments<'_>,
    ) -> Status {
        let status = if fmu_instance.is_null() {
            Status::Error
        } else {
            Status::OK
        };
        self.instance.log_call(Fmi3::PREFIX, name, status, args);

        if fmu_instance.is_null() {
            self.instance.unbind();
        } else {
            log::debug!(
                "Instantiated '{}' for {:?}",
                self.instance.name(),
                self.instance.interface_type
            );
            self.instance.component = fmu_instance;
            self.instance.transition(Transition::Instantiate);
        }
        status
    }

    /// Instantiate the FMU for Model Exchange.
    ///
    /// A missing required symbol is reported to the message logger and returned as
    /// [`Error::MissingSymbol`]. If the FMU does not return an instance, the table is dropped
    /// again and [`Status::Error`] is returned.
    pub fn instantiate_model_exchange(
        &mut self,
        instantiation_token: &str,
        resource_path: &str,
        visible: bool,
        logging_on: bool,
    ) -> Result<Status, Error> {
        let strings = Instantiation::new(self.instance.name(), instantiation_token, resource_path)?;
        self.bind(InterfaceType::ModelExchange)?;

        let environment = self.instance.callbacks.as_environment();
        let log_message: binding::fmi3LogMessageCallback = Some(super::log_message);
        let fmu_instance = self.instance.invoke::<Fmi3, _>(|f, _| unsafe {
            (f.common.fmi3InstantiateModelExchange)(
                strings.name.as_ptr(),
                strings.token.as_ptr(),
                strings.resource_path.as_ptr(),
                visible,
                logging_on,
                environment,
                log_message,
            )
        })?;

        Ok(self.instantiated(
            fmu_instance,
            "InstantiateModelExchange",
            format_args!(
                "{strings}, visible={}, loggingOn={}, instanceEnvironment={environment:p}, \
                 logMessage={:p}",
                visible as u8,
                logging_on as u8,
                pointer(log_message)
            ),
        ))
    }

    /// Instantiate the FMU for Co-Simulation. `event_mode_used` is kept for the transition out of
    /// Initialization Mode.
    #[allow(clippy::too_many_arguments)]
    pub fn instantiate_co_simulation(
        &mut self,
        instantiation_token: &str,
        resource_path: &str,
        visible: bool,
        logging_on: bool,
        event_mode_used: bool,
        early_return_allowed: bool,
        required_intermediate_variables: &[binding::fmi3ValueReference],
        intermediate_update: binding::fmi3IntermediateUpdateCallback,
    ) -> Result<Status, Error> {
        let strings = Instantiation::new(self.instance.name(), instantiation_token, resource_path)?;
        self.bind(InterfaceType::CoSimulation)?;

        let environment = self.instance.callbacks.as_environment();
        let log_message: binding::fmi3LogMessageCallback = Some(super::log_message);
        let fmu_instance = self.instance.invoke::<Fmi3, _>(|f, _| unsafe {
            (f.common.fmi3InstantiateCoSimulation)(
                strings.name.as_ptr(),
                strings.token.as_ptr(),
                strings.resource_path.as_ptr(),
                visible,
                logging_on,
                event_mode_used,
                early_return_allowed,
                required_intermediate_variables.as_ptr(),
                required_intermediate_variables.len(),
                environment,
                log_message,
                intermediate_update,
            )
        })?;
        if !fmu_instance.is_null() {
            self.instance.event_mode_used = event_mode_used;
        }

        Ok(self.instantiated(
            fmu_instance,
            "InstantiateCoSimulation",
            format_args!(
                "{strings}, visible={}, loggingOn={}, eventModeUsed={}, earlyReturnAllowed={}, \
                 requiredIntermediateVariables={:p}, nRequiredIntermediateVariables={}, \
                 instanceEnvironment={environment:p}, logMessage={:p}, intermediateUpdate={:p}",
                visible as u8,
                logging_on as u8,
                event_mode_used as u8,
                early_return_allowed as u8,
                required_intermediate_variables.as_ptr(),
                required_intermediate_variables.len(),
                pointer(log_message),
                pointer(intermediate_update)
            ),
        ))
    }

    /// Instantiate the FMU for Scheduled Execution.
    #[allow(clippy::too_many_arguments)]
    pub fn instantiate_scheduled_execution(
        &mut self,
        instantiation_token: &str,
        resource_path: &str,
        visible: bool,
        logging_on: bool,
        clock_update: binding::fmi3ClockUpdateCallback,
        lock_preemption: binding::fmi3LockPreemptionCallback,
        unlock_preemption: binding::fmi3UnlockPreemptionCallback,
    ) -> Result<Status, Error> {
        let strings = Instantiation::new(self.instance.name(), instantiation_token, resource_path)?;
        self.bind(InterfaceType::ScheduledExecution)?;

        let environment = self.instance.callbacks.as_environment();
        let log_message: binding::fmi3LogMessageCallback = Some(super::log_message);
        let fmu_instance = self.instance.invoke::<Fmi3, _>(|f, _| unsafe {
            (f.common.fmi3InstantiateScheduledExecution)(
                strings.name.as_ptr(),
                strings.token.as_ptr(),
                strings.resource_path.as_ptr(),
                visible,
                logging_on,
                environment,
                log_message,
                clock_update,
                lock_preemption,
                unlock_preemption,
            )
        })?;

        Ok(self.instantiated(
            fmu_instance,
            "InstantiateScheduledExecution",
            format_args!(
                "{strings}, visible={}, loggingOn={}, instanceEnvironment={environment:p}, \
                 logMessage={:p}, clockUpdate={:p}, lockPreemption={:p}, unlockPreemption={:p}",
                visible as u8,
                logging_on as u8,
                pointer(log_message),
                pointer(clock_update),
                pointer(lock_preemption),
                pointer(unlock_preemption)
            ),
        ))
    }

    /// Free the FMU instance and drop the function table.
    pub fn free_instance(&mut self) -> Result<(), Error> {
        self.instance.invoke::<Fmi3, _>(|f, c| {
            if !c.is_null() {
                unsafe { (f.common.fmi3FreeInstance)(c) }
            }
        })?;
        self.instance
            .log_call(Fmi3::PREFIX, "FreeInstance", Status::OK, format_args!(""));
        log::trace!("Freed FMU instance of '{}'", self.instance.name());
        self.instance.unbind();
        Ok(())
    }

    fn model_exchange<R>(
        &self,
        call: impl FnOnce(&functions::ModelExchange, binding::fmi3Instance) -> R,
    ) -> Result<R, Error> {
        self.instance
            .invoke::<Fmi3, _>(|f, c| f.model_exchange.as_ref().map(|me| call(me, c)))?
            .ok_or_else(|| self.instance.interface_mismatch(InterfaceType::ModelExchange))
    }

    fn co_simulation<R>(
        &self,
        call: impl FnOnce(&functions::CoSimulation, binding::fmi3Instance) -> R,
    ) -> Result<R, Error> {
        self.instance
            .invoke::<Fmi3, _>(|f, c| f.co_simulation.as_ref().map(|cs| call(cs, c)))?
            .ok_or_else(|| self.instance.interface_mismatch(InterfaceType::CoSimulation))
    }

    fn scheduled_execution<R>(
        &self,
        call: impl FnOnce(&functions::ScheduledExecution, binding::fmi3Instance) -> R,
    ) -> Result<R, Error> {
        self.instance
            .invoke::<Fmi3, _>(|f, c| f.scheduled_execution.as_ref().map(|se| call(se, c)))?
            .ok_or_else(|| {
                self.instance
                    .interface_mismatch(InterfaceType::ScheduledExecution)
            })
    }
}
