#![allow(non_snake_case)]

use super::binding;
use crate::{
    symbols::{load_required, SymbolLookup},
    Error, FmiVersion, InterfaceType,
};

/// The FMI 1.0 function table of an instance, resolved at instantiation.
///
/// Every symbol is exported as `<modelIdentifier>_fmi<Name>`.
pub(crate) struct Fmi1Functions {
    pub(crate) model_identifier: String,
    /// Handed to the FMU by value, kept here so that its address can be logged.
    pub(crate) callbacks: binding::fmiCSCallbackFunctions,
    pub(crate) common: Common,
    pub(crate) model_exchange: Option<ModelExchange>,
    pub(crate) co_simulation: Option<CoSimulation>,
}

impl Fmi1Functions {
    pub(crate) fn load(
        lookup: &dyn SymbolLookup,
        model_identifier: &str,
        interface_type: InterfaceType,
        callbacks: binding::fmiCSCallbackFunctions,
    ) -> Result<Self, Error> {
        let common = Common::load(lookup, model_identifier)?;
        let (model_exchange, co_simulation) = match interface_type {
            InterfaceType::ModelExchange => {
                (Some(ModelExchange::load(lookup, model_identifier)?), None)
            }
            InterfaceType::CoSimulation => {
                (None, Some(CoSimulation::load(lookup, model_identifier)?))
            }
            InterfaceType::ScheduledExecution => {
                return Err(Error::UnsupportedInterface(
                    interface_type,
                    FmiVersion::Fmi1,
                ))
            }
        };
        Ok(Self {
            model_identifier: model_identifier.to_owned(),
            callbacks,
            common,
            model_exchange,
            co_simulation,
        })
    }
}

pub(crate) struct Common {
    pub(crate) fmiGetVersion: binding::fmiGetVersionTYPE,
    pub(crate) fmiSetDebugLogging: binding::fmiSetDebugLoggingTYPE,
    pub(crate) fmiSetReal: binding::fmiSetRealTYPE,
    pub(crate) fmiSetInteger: binding::fmiSetIntegerTYPE,
    pub(crate) fmiSetBoolean: binding::fmiSetBooleanTYPE,
    pub(crate) fmiSetString: binding::fmiSetStringTYPE,
    pub(crate) fmiGetReal: binding::fmiGetRealTYPE,
    pub(crate) fmiGetInteger: binding::fmiGetIntegerTYPE,
    pub(crate) fmiGetBoolean: binding::fmiGetBooleanTYPE,
    pub(crate) fmiGetString: binding::fmiGetStringTYPE,
}

impl Common {
    fn load(lookup: &dyn SymbolLookup, prefix: &str) -> Result<Self, Error> {
        Ok(Self {
            fmiGetVersion: load_required!(lookup, fmiGetVersion, prefix = prefix),
            fmiSetDebugLogging: load_required!(lookup, fmiSetDebugLogging, prefix = prefix),
            fmiSetReal: load_required!(lookup, fmiSetReal, prefix = prefix),
            fmiSetInteger: load_required!(lookup, fmiSetInteger, prefix = prefix),
            fmiSetBoolean: load_required!(lookup, fmiSetBoolean, prefix = prefix),
            fmiSetString: load_required!(lookup, fmiSetString, prefix = prefix),
            fmiGetReal: load_required!(lookup, fmiGetReal, prefix = prefix),
            fmiGetInteger: load_required!(lookup, fmiGetInteger, prefix = prefix),
            fmiGetBoolean: load_required!(lookup, fmiGetBoolean, prefix = prefix),
            fmiGetString: load_required!(lookup, fmiGetString, prefix = prefix),
        })
    }
}

pub(crate) struct ModelExchange {
    pub(crate) fmiGetModelTypesPlatform: binding::fmiGetModelTypesPlatformTYPE,
    pub(crate) fmiInstantiateModel: binding::fmiInstantiateModelTYPE,
    pub(crate) fmiFreeModelInstance: binding::fmiFreeModelInstanceTYPE,
    pub(crate) fmiSetTime: binding::fmiSetTimeTYPE,
    pub(crate) fmiSetContinuousStates: binding::fmiSetContinuousStatesTYPE,
    pub(crate) fmiCompletedIntegratorStep: binding::fmiCompletedIntegratorStepTYPE,
    pub(crate) fmiInitialize: binding::fmiInitializeTYPE,
    pub(crate) fmiGetDerivatives: binding::fmiGetDerivativesTYPE,
    pub(crate) fmiGetEventIndicators: binding::fmiGetEventIndicatorsTYPE,
    pub(crate) fmiEventUpdate: binding::fmiEventUpdateTYPE,
    pub(crate) fmiGetContinuousStates: binding::fmiGetContinuousStatesTYPE,
    pub(crate) fmiGetNominalContinuousStates: binding::fmiGetNominalContinuousStatesTYPE,
    pub(crate) fmiGetStateValueReferences: binding::fmiGetStateValueReferencesTYPE,
    pub(crate) fmiTerminate: binding::fmiTerminateTYPE,
}

impl ModelExchange {
    fn load(lookup: &dyn SymbolLookup, prefix: &str) -> Result<Self, Error> {
        Ok(Self {
            fmiGetModelTypesPlatform: load_required!(
                lookup,
                fmiGetModelTypesPlatform,
                prefix = prefix
            ),
            fmiInstantiateModel: load_required!(lookup, fmiInstantiateModel, prefix = prefix),
            fmiFreeModelInstance: load_required!(lookup, fmiFreeModelInstance, prefix = prefix),
            fmiSetTime: load_required!(lookup, fmiSetTime, prefix = prefix),
            fmiSetContinuousStates: load_required!(lookup, fmiSetContinuousStates, prefix = prefix),
            fmiCompletedIntegratorStep: load_required!(
                lookup,
                fmiCompletedIntegratorStep,
                prefix = prefix
            ),
            fmiInitialize: load_required!(lookup, fmiInitialize, prefix = prefix),
            fmiGetDerivatives: load_required!(lookup, fmiGetDerivatives, prefix = prefix),
            fmiGetEventIndicators: load_required!(lookup, fmiGetEventIndicators, prefix = prefix),
            fmiEventUpdate: load_required!(lookup, fmiEventUpdate, prefix = prefix),
            fmiGetContinuousStates: load_required!(lookup, fmiGetContinuousStates, prefix = prefix),
            fmiGetNominalContinuousStates: load_required!(
                lookup,
                fmiGetNominalContinuousStates,
                prefix = prefix
            ),
            fmiGetStateValueReferences: load_required!(
                lookup,
                fmiGetStateValueReferences,
                prefix = prefix
            ),
            fmiTerminate: load_required!(lookup, fmiTerminate, prefix = prefix),
        })
    }
}

pub(crate) struct CoSimulation {
    pub(crate) fmiGetTypesPlatform: binding::fmiGetTypesPlatformTYPE,
    pub(crate) fmiInstantiateSlave: binding::fmiInstantiateSlaveTYPE,
    pub(crate) fmiInitializeSlave: binding::fmiInitializeSlaveTYPE,
    pub(crate) fmiTerminateSlave: binding::fmiTerminateSlaveTYPE,
    pub(crate) fmiResetSlave: binding::fmiResetSlaveTYPE,
    pub(crate) fmiFreeSlaveInstance: binding::fmiFreeSlaveInstanceTYPE,
    pub(crate) fmiSetRealInputDerivatives: binding::fmiSetRealInputDerivativesTYPE,
    pub(crate) fmiGetRealOutputDerivatives: binding::fmiGetRealOutputDerivativesTYPE,
    pub(crate) fmiCancelStep: binding::fmiCancelStepTYPE,
    pub(crate) fmiDoStep: binding::fmiDoStepTYPE,
    pub(crate) fmiGetStatus: binding::fmiGetStatusTYPE,
    pub(crate) fmiGetRealStatus: binding::fmiGetRealStatusTYPE,
    pub(crate) fmiGetIntegerStatus: binding::fmiGetIntegerStatusTYPE,
    pub(crate) fmiGetBooleanStatus: binding::fmiGetBooleanStatusTYPE,
    pub(crate) fmiGetStringStatus: binding::fmiGetStringStatusTYPE,
}

impl CoSimulation {
    fn load(lookup: &dyn SymbolLookup, prefix: &str) -> Result<Self, Error> {
        Ok(Self {
            fmiGetTypesPlatform: load_required!(lookup, fmiGetTypesPlatform, prefix = prefix),
            fmiInstantiateSlave: load_required!(lookup, fmiInstantiateSlave, prefix = prefix),
            fmiInitializeSlave: load_required!(lookup, fmiInitializeSlave, prefix = prefix),
            fmiTerminateSlave: load_required!(lookup, fmiTerminateSlave, prefix = prefix),
            fmiResetSlave: load_required!(lookup, fmiResetSlave, prefix = prefix),
            fmiFreeSlaveInstance: load_required!(lookup, fmiFreeSlaveInstance, prefix = prefix),
            fmiSetRealInputDerivatives: load_required!(
                lookup,
                fmiSetRealInputDerivatives,
                prefix = prefix
            ),
            fmiGetRealOutputDerivatives: load_required!(
                lookup,
                fmiGetRealOutputDerivatives,
                prefix = prefix
            ),
            fmiCancelStep: load_required!(lookup, fmiCancelStep, prefix = prefix),
            fmiDoStep: load_required!(lookup, fmiDoStep, prefix = prefix),
            fmiGetStatus: load_required!(lookup, fmiGetStatus, prefix = prefix),
            fmiGetRealStatus: load_required!(lookup, fmiGetRealStatus, prefix = prefix),
            fmiGetIntegerStatus: load_required!(lookup, fmiGetIntegerStatus, prefix = prefix),
            fmiGetBooleanStatus: load_required!(lookup, fmiGetBooleanStatus, prefix = prefix),
            fmiGetStringStatus: load_required!(lookup, fmiGetStringStatus, prefix = prefix),
        })
    }
}
