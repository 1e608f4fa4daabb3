//! FMI 2.0 calls on an [`Instance`].

use std::ffi::CString;

use super::{binding, functions, Fmi2, Fmi2Functions};
use crate::{
    dispatch::{Functions, VersionDescriptor},
    Error, FmiVersion, Instance, InterfaceType, Status, Transition,
};

mod co_simulation;
mod common;
mod model_exchange;

/// The FMI 2.0 interface of an [`Instance`], see [`Instance::fmi2`].
pub struct Fmi2Instance<'a> {
    instance: &'a mut Instance,
}

impl Instance {
    /// Make FMI 2.0 calls on this instance.
    pub fn fmi2(&mut self) -> Fmi2Instance<'_> {
        Fmi2Instance { instance: self }
    }
}

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Can be called when `do_step` returned [`Status::Pending`]. Delivers `Pending` while the
    /// computation is not finished, otherwise the result of the asynchronous step.
    DoStepStatus = binding::fmi2StatusKind_fmi2DoStepStatus,
    /// A string describing the progress of the running asynchronous step.
    PendingStatus = binding::fmi2StatusKind_fmi2PendingStatus,
    /// The end time of the last successfully completed communication step. Can be queried after
    /// `do_step` returned [`Status::Discard`].
    LastSuccessfulTime = binding::fmi2StatusKind_fmi2LastSuccessfulTime,
    /// Whether the slave wants to terminate the simulation, after `do_step` returned
    /// [`Status::Discard`].
    Terminated = binding::fmi2StatusKind_fmi2Terminated,
}

fn boolean(value: bool) -> binding::fmi2Boolean {
    if value {
        binding::fmi2True
    } else {
        binding::fmi2False
    }
}

fn check_len(expected: usize, found: usize) -> Result<(), Error> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::ArrayLength { expected, found })
    }
}

impl Fmi2Instance<'_> {
    /// Resolve the FMI 2.0 function table for `interface_type` and create the FMU component.
    ///
    /// A missing required symbol is reported to the message logger and returned as
    /// [`Error::MissingSymbol`]. If the FMU does not return a component, the table is dropped
    /// again and [`Status::Error`] is returned.
    pub fn instantiate(
        &mut self,
        interface_type: InterfaceType,
        guid: &str,
        resource_location: &str,
        visible: bool,
        logging_on: bool,
    ) -> Result<Status, Error> {
        let fmu_type = match interface_type {
            InterfaceType::ModelExchange => binding::fmi2Type_fmi2ModelExchange,
            InterfaceType::CoSimulation => binding::fmi2Type_fmi2CoSimulation,
            InterfaceType::ScheduledExecution => {
                return Err(Error::UnsupportedInterface(interface_type, FmiVersion::Fmi2))
            }
        };
        let instance_name = CString::new(self.instance.name())?;
        let fmu_guid = CString::new(guid)?;
        let fmu_resource_location = CString::new(resource_location)?;

        self.instance.free_component()?;

        let memory = self.instance.memory;
        let callbacks = binding::fmi2CallbackFunctions {
            logger: Some(super::fmi2_logger_handler),
            allocateMemory: Some(memory.allocate),
            freeMemory: Some(memory.free),
            stepFinished: None,
            componentEnvironment: self.instance.callbacks.as_environment(),
        };

        let functions = Fmi2Functions::load(self.instance.library()?, interface_type, callbacks);
        let functions = functions.map_err(|err| {
            self.instance.binding_failed(err, |symbol| {
                format!("Symbol {symbol} is missing in shared library.")
            })
        })?;
        self.instance.functions = Functions::Fmi2(Box::new(functions));
        self.instance.interface_type = Some(interface_type);

        let (component, callbacks) = self.instance.invoke::<Fmi2, _>(|f, _| {
            let component = unsafe {
                (f.common.fmi2Instantiate)(
                    instance_name.as_ptr(),
                    fmu_type,
                    fmu_guid.as_ptr(),
                    fmu_resource_location.as_ptr(),
                    &*f.callbacks,
                    boolean(visible),
                    boolean(logging_on),
                )
            };
            (component, *f.callbacks)
        })?;

        let status = if component.is_null() {
            Status::Error
        } else {
            Status::OK
        };
        self.instance.log_call(
            Fmi2::PREFIX,
            "Instantiate",
            status,
            format_args!(
                "instanceName=\"{}\", fmuType={fmu_type}, fmuGUID=\"{guid}\", \
                 fmuResourceLocation=\"{resource_location}\", functions={{logger={:p}, \
                 allocateMemory={:p}, freeMemory={:p}, stepFinished={:p}, \
                 componentEnvironment={:p}}}, visible={}, loggingOn={}",
                instance_name.to_string_lossy(),
                callbacks.logger.map_or(std::ptr::null(), |f| f as *const ()),
                callbacks
                    .allocateMemory
                    .map_or(std::ptr::null(), |f| f as *const ()),
                callbacks.freeMemory.map_or(std::ptr::null(), |f| f as *const ()),
                callbacks
                    .stepFinished
                    .map_or(std::ptr::null(), |f| f as *const ()),
                callbacks.componentEnvironment,
                boolean(visible),
                boolean(logging_on),
            ),
        );

        if component.is_null() {
            self.instance.unbind();
        } else {
            log::debug!(
                "Instantiated '{}' for {interface_type:?}",
                self.instance.name()
            );
            self.instance.component = component;
            self.instance.transition(Transition::Instantiate);
        }
        Ok(status)
    }

    /// Free the FMU component and drop the function table.
    pub fn free_instance(&mut self) -> Result<(), Error> {
        self.instance.invoke::<Fmi2, _>(|f, c| {
            if !c.is_null() {
                unsafe { (f.common.fmi2FreeInstance)(c) }
            }
        })?;
        self.instance
            .log_call(Fmi2::PREFIX, "FreeInstance", Status::OK, format_args!(""));
        log::trace!("Freed component of '{}'", self.instance.name());
        self.instance.unbind();
        Ok(())
    }

    fn model_exchange<R>(
        &self,
        call: impl FnOnce(&functions::ModelExchange, binding::fmi2Component) -> R,
    ) -> Result<R, Error> {
        self.instance
            .invoke::<Fmi2, _>(|f, c| f.model_exchange.as_ref().map(|me| call(me, c)))?
            .ok_or_else(|| self.instance.interface_mismatch(InterfaceType::ModelExchange))
    }

    fn co_simulation<R>(
        &self,
        call: impl FnOnce(&functions::CoSimulation, binding::fmi2Component) -> R,
    ) -> Result<R, Error> {
        self.instance
            .invoke::<Fmi2, _>(|f, c| f.co_simulation.as_ref().map(|cs| call(cs, c)))?
            .ok_or_else(|| self.instance.interface_mismatch(InterfaceType::CoSimulation))
    }
}
