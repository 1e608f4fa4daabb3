//! FMI 1.0 calls on an [`Instance`].

use std::ffi::CString;

use super::{binding, functions, Fmi1, Fmi1Functions};
use crate::{
    buffer::GFloat,
    dispatch::{Functions, VersionDescriptor},
    Error, Instance, InterfaceType, Status, Transition,
};

mod co_simulation;
mod common;
mod model_exchange;

/// The FMI 1.0 interface of an [`Instance`], see [`Instance::fmi1`].
pub struct Fmi1Instance<'a> {
    instance: &'a mut Instance,
}

impl Instance {
    /// Make FMI 1.0 calls on this instance.
    pub fn fmi1(&mut self) -> Fmi1Instance<'_> {
        Fmi1Instance { instance: self }
    }
}

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    DoStepStatus = binding::fmiStatusKind_fmiDoStepStatus,
    PendingStatus = binding::fmiStatusKind_fmiPendingStatus,
    LastSuccessfulTime = binding::fmiStatusKind_fmiLastSuccessfulTime,
}

fn boolean(value: bool) -> binding::fmiBoolean {
    if value {
        binding::fmiTrue
    } else {
        binding::fmiFalse
    }
}

fn check_len(expected: usize, found: usize) -> Result<(), Error> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::ArrayLength { expected, found })
    }
}

impl Fmi1Instance<'_> {
    /// Free any previous component and resolve the `<model_identifier>_fmi*` functions for
    /// `interface_type`.
    fn bind(&mut self, model_identifier: &str, interface_type: InterfaceType) -> Result<(), Error> {
        self.instance.free_component()?;

        let memory = self.instance.memory;
        let callbacks = binding::fmiCSCallbackFunctions {
            logger: Some(super::fmi1_logger_handler),
            allocateMemory: Some(memory.allocate),
            freeMemory: Some(memory.free),
            stepFinished: None,
        };
        let functions = Fmi1Functions::load(
            self.instance.library()?,
            model_identifier,
            interface_type,
            callbacks,
        );
        let functions = functions.map_err(|err| {
            self.instance.binding_failed(err, |symbol| {
                format!("Failed to load function \"{symbol}\".")
            })
        })?;
        self.instance.functions = Functions::Fmi1(Box::new(functions));
        self.instance.interface_type = Some(interface_type);
        Ok(())
    }

    /// Keep the new component, or unbind if the FMU did not create one.
    fn instantiated(&mut self, component: binding::fmiComponent) -> Status {
        if component.is_null() {
            self.instance.unbind();
            Status::Error
        } else {
            log::debug!(
                "Instantiated '{}' for {:?}",
                self.instance.name(),
                self.instance.interface_type
            );
            self.instance.component = component;
            self.instance.transition(Transition::Instantiate);
            Status::OK
        }
    }

    /// Resolve the Model Exchange functions exported with `model_identifier` as prefix and create
    /// the model instance.
    ///
    /// A missing symbol is reported to the message logger and returned as
    /// [`Error::MissingSymbol`].
    pub fn instantiate_model(
        &mut self,
        model_identifier: &str,
        guid: &str,
        logging_on: bool,
    ) -> Result<Status, Error> {
        let instance_name = CString::new(self.instance.name())?;
        let fmu_guid = CString::new(guid)?;
        self.bind(model_identifier, InterfaceType::ModelExchange)?;

        let (component, functions) = self.instance.invoke::<Fmi1, _>(|f, _| {
            let callbacks = binding::fmiMECallbackFunctions {
                logger: f.callbacks.logger,
                allocateMemory: f.callbacks.allocateMemory,
                freeMemory: f.callbacks.freeMemory,
            };
            let component = f.model_exchange.as_ref().map(|me| unsafe {
                (me.fmiInstantiateModel)(
                    instance_name.as_ptr(),
                    fmu_guid.as_ptr(),
                    callbacks,
                    boolean(logging_on),
                )
            });
            (component, &f.callbacks as *const binding::fmiCSCallbackFunctions)
        })?;
        let component = component
            .ok_or_else(|| self.instance.interface_mismatch(InterfaceType::ModelExchange))?;

        let status = if component.is_null() {
            Status::Error
        } else {
            Status::OK
        };
        self.instance.log_call(
            Fmi1::PREFIX,
            "InstantiateModel",
            status,
            format_args!(
                "instanceName=\"{}\", GUID=\"{guid}\", functions={functions:p}, loggingOn={}",
                instance_name.to_string_lossy(),
                boolean(logging_on)
            ),
        );
        Ok(self.instantiated(component))
    }

    /// Resolve the Co-Simulation functions exported with `model_identifier` as prefix and create
    /// the slave.
    #[allow(clippy::too_many_arguments)]
    pub fn instantiate_slave(
        &mut self,
        model_identifier: &str,
        guid: &str,
        fmu_location: &str,
        mime_type: &str,
        timeout: f64,
        visible: bool,
        interactive: bool,
        logging_on: bool,
    ) -> Result<Status, Error> {
        let instance_name = CString::new(self.instance.name())?;
        let fmu_guid = CString::new(guid)?;
        let location = CString::new(fmu_location)?;
        let mime = CString::new(mime_type)?;
        self.bind(model_identifier, InterfaceType::CoSimulation)?;

        let (component, functions) = self.instance.invoke::<Fmi1, _>(|f, _| {
            let component = f.co_simulation.as_ref().map(|cs| unsafe {
                (cs.fmiInstantiateSlave)(
                    instance_name.as_ptr(),
                    fmu_guid.as_ptr(),
                    location.as_ptr(),
                    mime.as_ptr(),
                    timeout,
                    boolean(visible),
                    boolean(interactive),
                    f.callbacks,
                    boolean(logging_on),
                )
            });
            (component, &f.callbacks as *const binding::fmiCSCallbackFunctions)
        })?;
        let component = component
            .ok_or_else(|| self.instance.interface_mismatch(InterfaceType::CoSimulation))?;

        let status = if component.is_null() {
            Status::Error
        } else {
            Status::OK
        };
        self.instance.log_call(
            Fmi1::PREFIX,
            "InstantiateSlave",
            status,
            format_args!(
                "instanceName=\"{}\", fmuGUID=\"{guid}\", fmuLocation=\"{fmu_location}\", \
                 mimeType=\"{mime_type}\", timeout={}, visible={}, interactive={}, \
                 functions={functions:p}, loggingOn={}",
                instance_name.to_string_lossy(),
                GFloat::f64(timeout),
                boolean(visible),
                boolean(interactive),
                boolean(logging_on)
            ),
        );
        Ok(self.instantiated(component))
    }

    /// The model identifier the function table was resolved with.
    pub fn model_identifier(&self) -> Result<String, Error> {
        self.instance
            .invoke::<Fmi1, _>(|f, _| f.model_identifier.clone())
    }

    /// Free the component with `fmiFreeModelInstance` or `fmiFreeSlaveInstance` and drop the
    /// function table.
    pub(crate) fn free_instance(&mut self) -> Result<(), Error> {
        match self.instance.interface_type {
            Some(InterfaceType::CoSimulation) => self.free_slave_instance(),
            _ => self.free_model_instance(),
        }
    }

    fn model_exchange<R>(
        &self,
        call: impl FnOnce(&functions::ModelExchange, binding::fmiComponent) -> R,
    ) -> Result<R, Error> {
        self.instance
            .invoke::<Fmi1, _>(|f, c| f.model_exchange.as_ref().map(|me| call(me, c)))?
            .ok_or_else(|| self.instance.interface_mismatch(InterfaceType::ModelExchange))
    }

    fn co_simulation<R>(
        &self,
        call: impl FnOnce(&functions::CoSimulation, binding::fmiComponent) -> R,
    ) -> Result<R, Error> {
        self.instance
            .invoke::<Fmi1, _>(|f, c| f.co_simulation.as_ref().map(|cs| call(cs, c)))?
            .ok_or_else(|| self.instance.interface_mismatch(InterfaceType::CoSimulation))
    }
}
