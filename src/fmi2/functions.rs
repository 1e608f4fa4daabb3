#![allow(non_snake_case)]

use super::binding;
use crate::{
    symbols::{load_optional, load_required, SymbolLookup},
    Error, InterfaceType,
};

/// The FMI 2.0 function table of an instance, resolved at instantiation.
pub(crate) struct Fmi2Functions {
    /// Handed to `fmi2Instantiate`, the FMU may keep the pointer until it is freed.
    pub(crate) callbacks: Box<binding::fmi2CallbackFunctions>,
    pub(crate) common: Common,
    pub(crate) model_exchange: Option<ModelExchange>,
    pub(crate) co_simulation: Option<CoSimulation>,
}

impl Fmi2Functions {
    pub(crate) fn load(
        lookup: &dyn SymbolLookup,
        interface_type: InterfaceType,
        callbacks: binding::fmi2CallbackFunctions,
    ) -> Result<Self, Error> {
        let common = Common::load(lookup)?;
        let (model_exchange, co_simulation) = match interface_type {
            InterfaceType::ModelExchange => (Some(ModelExchange::load(lookup)?), None),
            InterfaceType::CoSimulation => (None, Some(CoSimulation::load(lookup)?)),
            InterfaceType::ScheduledExecution => {
                return Err(Error::UnsupportedInterface(
                    interface_type,
                    crate::FmiVersion::Fmi2,
                ))
            }
        };
        Ok(Self {
            callbacks: Box::new(callbacks),
            common,
            model_exchange,
            co_simulation,
        })
    }
}

pub(crate) struct Common {
    pub(crate) fmi2GetTypesPlatform: binding::fmi2GetTypesPlatformTYPE,
    pub(crate) fmi2GetVersion: binding::fmi2GetVersionTYPE,
    pub(crate) fmi2SetDebugLogging: binding::fmi2SetDebugLoggingTYPE,
    pub(crate) fmi2Instantiate: binding::fmi2InstantiateTYPE,
    pub(crate) fmi2FreeInstance: binding::fmi2FreeInstanceTYPE,
    pub(crate) fmi2SetupExperiment: binding::fmi2SetupExperimentTYPE,
    pub(crate) fmi2EnterInitializationMode: binding::fmi2EnterInitializationModeTYPE,
    pub(crate) fmi2ExitInitializationMode: binding::fmi2ExitInitializationModeTYPE,
    pub(crate) fmi2Terminate: binding::fmi2TerminateTYPE,
    pub(crate) fmi2Reset: binding::fmi2ResetTYPE,
    pub(crate) fmi2GetReal: binding::fmi2GetRealTYPE,
    pub(crate) fmi2GetInteger: binding::fmi2GetIntegerTYPE,
    pub(crate) fmi2GetBoolean: binding::fmi2GetBooleanTYPE,
    pub(crate) fmi2GetString: binding::fmi2GetStringTYPE,
    pub(crate) fmi2SetReal: binding::fmi2SetRealTYPE,
    pub(crate) fmi2SetInteger: binding::fmi2SetIntegerTYPE,
    pub(crate) fmi2SetBoolean: binding::fmi2SetBooleanTYPE,
    pub(crate) fmi2SetString: binding::fmi2SetStringTYPE,

    // Optional capabilities
    pub(crate) fmi2GetFMUstate: Option<binding::fmi2GetFMUstateTYPE>,
    pub(crate) fmi2SetFMUstate: Option<binding::fmi2SetFMUstateTYPE>,
    pub(crate) fmi2FreeFMUstate: Option<binding::fmi2FreeFMUstateTYPE>,
    pub(crate) fmi2SerializedFMUstateSize: Option<binding::fmi2SerializedFMUstateSizeTYPE>,
    pub(crate) fmi2SerializeFMUstate: Option<binding::fmi2SerializeFMUstateTYPE>,
    pub(crate) fmi2DeSerializeFMUstate: Option<binding::fmi2DeSerializeFMUstateTYPE>,
    pub(crate) fmi2GetDirectionalDerivative: Option<binding::fmi2GetDirectionalDerivativeTYPE>,
}

impl Common {
    fn load(lookup: &dyn SymbolLookup) -> Result<Self, Error> {
        Ok(Self {
            fmi2GetTypesPlatform: load_required!(lookup, fmi2GetTypesPlatform),
            fmi2GetVersion: load_required!(lookup, fmi2GetVersion),
            fmi2SetDebugLogging: load_required!(lookup, fmi2SetDebugLogging),
            fmi2Instantiate: load_required!(lookup, fmi2Instantiate),
            fmi2FreeInstance: load_required!(lookup, fmi2FreeInstance),
            fmi2SetupExperiment: load_required!(lookup, fmi2SetupExperiment),
            fmi2EnterInitializationMode: load_required!(lookup, fmi2EnterInitializationMode),
            fmi2ExitInitializationMode: load_required!(lookup, fmi2ExitInitializationMode),
            fmi2Terminate: load_required!(lookup, fmi2Terminate),
            fmi2Reset: load_required!(lookup, fmi2Reset),
            fmi2GetReal: load_required!(lookup, fmi2GetReal),
            fmi2GetInteger: load_required!(lookup, fmi2GetInteger),
            fmi2GetBoolean: load_required!(lookup, fmi2GetBoolean),
            fmi2GetString: load_required!(lookup, fmi2GetString),
            fmi2SetReal: load_required!(lookup, fmi2SetReal),
            fmi2SetInteger: load_required!(lookup, fmi2SetInteger),
            fmi2SetBoolean: load_required!(lookup, fmi2SetBoolean),
            fmi2SetString: load_required!(lookup, fmi2SetString),
            fmi2GetFMUstate: load_optional!(lookup, fmi2GetFMUstate),
            fmi2SetFMUstate: load_optional!(lookup, fmi2SetFMUstate),
            fmi2FreeFMUstate: load_optional!(lookup, fmi2FreeFMUstate),
            fmi2SerializedFMUstateSize: load_optional!(lookup, fmi2SerializedFMUstateSize),
            fmi2SerializeFMUstate: load_optional!(lookup, fmi2SerializeFMUstate),
            fmi2DeSerializeFMUstate: load_optional!(lookup, fmi2DeSerializeFMUstate),
            fmi2GetDirectionalDerivative: load_optional!(lookup, fmi2GetDirectionalDerivative),
        })
    }
}

pub(crate) struct ModelExchange {
    pub(crate) fmi2EnterEventMode: binding::fmi2EnterEventModeTYPE,
    pub(crate) fmi2NewDiscreteStates: binding::fmi2NewDiscreteStatesTYPE,
    pub(crate) fmi2EnterContinuousTimeMode: binding::fmi2EnterContinuousTimeModeTYPE,
    pub(crate) fmi2CompletedIntegratorStep: binding::fmi2CompletedIntegratorStepTYPE,
    pub(crate) fmi2SetTime: binding::fmi2SetTimeTYPE,
    pub(crate) fmi2SetContinuousStates: binding::fmi2SetContinuousStatesTYPE,
    pub(crate) fmi2GetDerivatives: binding::fmi2GetDerivativesTYPE,
    pub(crate) fmi2GetEventIndicators: binding::fmi2GetEventIndicatorsTYPE,
    pub(crate) fmi2GetContinuousStates: binding::fmi2GetContinuousStatesTYPE,
    pub(crate) fmi2GetNominalsOfContinuousStates: binding::fmi2GetNominalsOfContinuousStatesTYPE,
}

impl ModelExchange {
    fn load(lookup: &dyn SymbolLookup) -> Result<Self, Error> {
        Ok(Self {
            fmi2EnterEventMode: load_required!(lookup, fmi2EnterEventMode),
            fmi2NewDiscreteStates: load_required!(lookup, fmi2NewDiscreteStates),
            fmi2EnterContinuousTimeMode: load_required!(lookup, fmi2EnterContinuousTimeMode),
            fmi2CompletedIntegratorStep: load_required!(lookup, fmi2CompletedIntegratorStep),
            fmi2SetTime: load_required!(lookup, fmi2SetTime),
            fmi2SetContinuousStates: load_required!(lookup, fmi2SetContinuousStates),
            fmi2GetDerivatives: load_required!(lookup, fmi2GetDerivatives),
            fmi2GetEventIndicators: load_required!(lookup, fmi2GetEventIndicators),
            fmi2GetContinuousStates: load_required!(lookup, fmi2GetContinuousStates),
            fmi2GetNominalsOfContinuousStates: load_required!(
                lookup,
                fmi2GetNominalsOfContinuousStates
            ),
        })
    }
}

pub(crate) struct CoSimulation {
    pub(crate) fmi2SetRealInputDerivatives: binding::fmi2SetRealInputDerivativesTYPE,
    pub(crate) fmi2GetRealOutputDerivatives: binding::fmi2GetRealOutputDerivativesTYPE,
    pub(crate) fmi2DoStep: binding::fmi2DoStepTYPE,
    pub(crate) fmi2CancelStep: binding::fmi2CancelStepTYPE,
    pub(crate) fmi2GetStatus: binding::fmi2GetStatusTYPE,
    pub(crate) fmi2GetRealStatus: binding::fmi2GetRealStatusTYPE,
    pub(crate) fmi2GetIntegerStatus: binding::fmi2GetIntegerStatusTYPE,
    pub(crate) fmi2GetBooleanStatus: binding::fmi2GetBooleanStatusTYPE,
    pub(crate) fmi2GetStringStatus: binding::fmi2GetStringStatusTYPE,
}

impl CoSimulation {
    fn load(lookup: &dyn SymbolLookup) -> Result<Self, Error> {
        Ok(Self {
            fmi2SetRealInputDerivatives: load_required!(lookup, fmi2SetRealInputDerivatives),
            fmi2GetRealOutputDerivatives: load_required!(lookup, fmi2GetRealOutputDerivatives),
            fmi2DoStep: load_required!(lookup, fmi2DoStep),
            fmi2CancelStep: load_required!(lookup, fmi2CancelStep),
            fmi2GetStatus: load_required!(lookup, fmi2GetStatus),
            fmi2GetRealStatus: load_required!(lookup, fmi2GetRealStatus),
            fmi2GetIntegerStatus: load_required!(lookup, fmi2GetIntegerStatus),
            fmi2GetBooleanStatus: load_required!(lookup, fmi2GetBooleanStatus),
            fmi2GetStringStatus: load_required!(lookup, fmi2GetStringStatus),
        })
    }
}
