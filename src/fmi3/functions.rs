#![allow(non_snake_case)]

use super::binding;
use crate::{
    symbols::{load_optional, load_required, SymbolLookup},
    Error, InterfaceType,
};

/// The FMI 3.0 function table of an instance, resolved at instantiation.
pub(crate) struct Fmi3Functions {
    pub(crate) common: Common,
    pub(crate) model_exchange: Option<ModelExchange>,
    pub(crate) co_simulation: Option<CoSimulation>,
    pub(crate) scheduled_execution: Option<ScheduledExecution>,
}

impl Fmi3Functions {
    pub(crate) fn load(
        lookup: &dyn SymbolLookup,
        interface_type: InterfaceType,
    ) -> Result<Self, Error> {
        let mut functions = Self {
            common: Common::load(lookup)?,
            model_exchange: None,
            co_simulation: None,
            scheduled_execution: None,
        };
        match interface_type {
            InterfaceType::ModelExchange => {
                functions.model_exchange = Some(ModelExchange::load(lookup)?)
            }
            InterfaceType::CoSimulation => {
                functions.co_simulation = Some(CoSimulation::load(lookup)?)
            }
            InterfaceType::ScheduledExecution => {
                functions.scheduled_execution = Some(ScheduledExecution::load(lookup)?)
            }
        }
        Ok(functions)
    }
}

pub(crate) struct Common {
    pub(crate) fmi3GetVersion: binding::fmi3GetVersionTYPE,
    pub(crate) fmi3SetDebugLogging: binding::fmi3SetDebugLoggingTYPE,
    pub(crate) fmi3InstantiateModelExchange: binding::fmi3InstantiateModelExchangeTYPE,
    pub(crate) fmi3InstantiateCoSimulation: binding::fmi3InstantiateCoSimulationTYPE,
    pub(crate) fmi3InstantiateScheduledExecution: binding::fmi3InstantiateScheduledExecutionTYPE,
    pub(crate) fmi3FreeInstance: binding::fmi3FreeInstanceTYPE,
    pub(crate) fmi3EnterInitializationMode: binding::fmi3EnterInitializationModeTYPE,
    pub(crate) fmi3ExitInitializationMode: binding::fmi3ExitInitializationModeTYPE,
    pub(crate) fmi3EnterEventMode: binding::fmi3EnterEventModeTYPE,
    pub(crate) fmi3Terminate: binding::fmi3TerminateTYPE,
    pub(crate) fmi3Reset: binding::fmi3ResetTYPE,
    pub(crate) fmi3GetFloat32: binding::fmi3GetFloat32TYPE,
    pub(crate) fmi3GetFloat64: binding::fmi3GetFloat64TYPE,
    pub(crate) fmi3GetInt8: binding::fmi3GetInt8TYPE,
    pub(crate) fmi3GetUInt8: binding::fmi3GetUInt8TYPE,
    pub(crate) fmi3GetInt16: binding::fmi3GetInt16TYPE,
    pub(crate) fmi3GetUInt16: binding::fmi3GetUInt16TYPE,
    pub(crate) fmi3GetInt32: binding::fmi3GetInt32TYPE,
    pub(crate) fmi3GetUInt32: binding::fmi3GetUInt32TYPE,
    pub(crate) fmi3GetInt64: binding::fmi3GetInt64TYPE,
    pub(crate) fmi3GetUInt64: binding::fmi3GetUInt64TYPE,
    pub(crate) fmi3GetBoolean: binding::fmi3GetBooleanTYPE,
    pub(crate) fmi3GetString: binding::fmi3GetStringTYPE,
    pub(crate) fmi3GetBinary: binding::fmi3GetBinaryTYPE,
    pub(crate) fmi3GetClock: binding::fmi3GetClockTYPE,
    pub(crate) fmi3SetFloat32: binding::fmi3SetFloat32TYPE,
    pub(crate) fmi3SetFloat64: binding::fmi3SetFloat64TYPE,
    pub(crate) fmi3SetInt8: binding::fmi3SetInt8TYPE,
    pub(crate) fmi3SetUInt8: binding::fmi3SetUInt8TYPE,
    pub(crate) fmi3SetInt16: binding::fmi3SetInt16TYPE,
    pub(crate) fmi3SetUInt16: binding::fmi3SetUInt16TYPE,
    pub(crate) fmi3SetInt32: binding::fmi3SetInt32TYPE,
    pub(crate) fmi3SetUInt32: binding::fmi3SetUInt32TYPE,
    pub(crate) fmi3SetInt64: binding::fmi3SetInt64TYPE,
    pub(crate) fmi3SetUInt64: binding::fmi3SetUInt64TYPE,
    pub(crate) fmi3SetBoolean: binding::fmi3SetBooleanTYPE,
    pub(crate) fmi3SetString: binding::fmi3SetStringTYPE,
    pub(crate) fmi3SetBinary: binding::fmi3SetBinaryTYPE,
    pub(crate) fmi3SetClock: binding::fmi3SetClockTYPE,
    pub(crate) fmi3GetNumberOfVariableDependencies:
        binding::fmi3GetNumberOfVariableDependenciesTYPE,
    pub(crate) fmi3GetVariableDependencies: binding::fmi3GetVariableDependenciesTYPE,
    pub(crate) fmi3EnterConfigurationMode: binding::fmi3EnterConfigurationModeTYPE,
    pub(crate) fmi3ExitConfigurationMode: binding::fmi3ExitConfigurationModeTYPE,
    pub(crate) fmi3GetIntervalDecimal: binding::fmi3GetIntervalDecimalTYPE,
    pub(crate) fmi3GetIntervalFraction: binding::fmi3GetIntervalFractionTYPE,
    pub(crate) fmi3GetShiftDecimal: binding::fmi3GetShiftDecimalTYPE,
    pub(crate) fmi3GetShiftFraction: binding::fmi3GetShiftFractionTYPE,
    pub(crate) fmi3SetIntervalDecimal: binding::fmi3SetIntervalDecimalTYPE,
    pub(crate) fmi3SetIntervalFraction: binding::fmi3SetIntervalFractionTYPE,
    pub(crate) fmi3EvaluateDiscreteStates: binding::fmi3EvaluateDiscreteStatesTYPE,
    pub(crate) fmi3UpdateDiscreteStates: binding::fmi3UpdateDiscreteStatesTYPE,

    // Optional capabilities
    pub(crate) fmi3GetFMUState: Option<binding::fmi3GetFMUStateTYPE>,
    pub(crate) fmi3SetFMUState: Option<binding::fmi3SetFMUStateTYPE>,
    pub(crate) fmi3FreeFMUState: Option<binding::fmi3FreeFMUStateTYPE>,
    pub(crate) fmi3SerializedFMUStateSize: Option<binding::fmi3SerializedFMUStateSizeTYPE>,
    pub(crate) fmi3SerializeFMUState: Option<binding::fmi3SerializeFMUStateTYPE>,
    pub(crate) fmi3DeserializeFMUState: Option<binding::fmi3DeserializeFMUStateTYPE>,
    pub(crate) fmi3GetDirectionalDerivative: Option<binding::fmi3GetDirectionalDerivativeTYPE>,
    pub(crate) fmi3GetAdjointDerivative: Option<binding::fmi3GetAdjointDerivativeTYPE>,
    pub(crate) fmi3SetShiftDecimal: Option<binding::fmi3SetShiftDecimalTYPE>,
    pub(crate) fmi3SetShiftFraction: Option<binding::fmi3SetShiftFractionTYPE>,
}

impl Common {
    fn load(lookup: &dyn SymbolLookup) -> Result<Self, Error> {
        Ok(Self {
            fmi3GetVersion: load_required!(lookup, fmi3GetVersion),
            fmi3SetDebugLogging: load_required!(lookup, fmi3SetDebugLogging),
            fmi3InstantiateModelExchange: load_required!(lookup, fmi3InstantiateModelExchange),
            fmi3InstantiateCoSimulation: load_required!(lookup, fmi3InstantiateCoSimulation),
            fmi3InstantiateScheduledExecution: load_required!(
                lookup,
                fmi3InstantiateScheduledExecution
            ),
            fmi3FreeInstance: load_required!(lookup, fmi3FreeInstance),
            fmi3EnterInitializationMode: load_required!(lookup, fmi3EnterInitializationMode),
            fmi3ExitInitializationMode: load_required!(lookup, fmi3ExitInitializationMode),
            fmi3EnterEventMode: load_required!(lookup, fmi3EnterEventMode),
            fmi3Terminate: load_required!(lookup, fmi3Terminate),
            fmi3Reset: load_required!(lookup, fmi3Reset),
            fmi3GetFloat32: load_required!(lookup, fmi3GetFloat32),
            fmi3GetFloat64: load_required!(lookup, fmi3GetFloat64),
            fmi3GetInt8: load_required!(lookup, fmi3GetInt8),
            fmi3GetUInt8: load_required!(lookup, fmi3GetUInt8),
            fmi3GetInt16: load_required!(lookup, fmi3GetInt16),
            fmi3GetUInt16: load_required!(lookup, fmi3GetUInt16),
            fmi3GetInt32: load_required!(lookup, fmi3GetInt32),
            fmi3GetUInt32: load_required!(lookup, fmi3GetUInt32),
            fmi3GetInt64: load_required!(lookup, fmi3GetInt64),
            fmi3GetUInt64: load_required!(lookup, fmi3GetUInt64),
            fmi3GetBoolean: load_required!(lookup, fmi3GetBoolean),
            fmi3GetString: load_required!(lookup, fmi3GetString),
            fmi3GetBinary: load_required!(lookup, fmi3GetBinary),
            fmi3GetClock: load_required!(lookup, fmi3GetClock),
            fmi3SetFloat32: load_required!(lookup, fmi3SetFloat32),
            fmi3SetFloat64: load_required!(lookup, fmi3SetFloat64),
            fmi3SetInt8: load_required!(lookup, fmi3SetInt8),
            fmi3SetUInt8: load_required!(lookup, fmi3SetUInt8),
            fmi3SetInt16: load_required!(lookup, fmi3SetInt16),
            fmi3SetUInt16: load_required!(lookup, fmi3SetUInt16),
            fmi3SetInt32: load_required!(lookup, fmi3SetInt32),
            fmi3SetUInt32: load_required!(lookup, fmi3SetUInt32),
            fmi3SetInt64: load_required!(lookup, fmi3SetInt64),
            fmi3SetUInt64: load_required!(lookup, fmi3SetUInt64),
            fmi3SetBoolean: load_required!(lookup, fmi3SetBoolean),
            fmi3SetString: load_required!(lookup, fmi3SetString),
            fmi3SetBinary: load_required!(lookup, fmi3SetBinary),
            fmi3SetClock: load_required!(lookup, fmi3SetClock),
            fmi3GetNumberOfVariableDependencies: load_required!(
                lookup,
                fmi3GetNumberOfVariableDependencies
            ),
            fmi3GetVariableDependencies: load_required!(lookup, fmi3GetVariableDependencies),
            fmi3EnterConfigurationMode: load_required!(lookup, fmi3EnterConfigurationMode),
            fmi3ExitConfigurationMode: load_required!(lookup, fmi3ExitConfigurationMode),
            fmi3GetIntervalDecimal: load_required!(lookup, fmi3GetIntervalDecimal),
            fmi3GetIntervalFraction: load_required!(lookup, fmi3GetIntervalFraction),
            fmi3GetShiftDecimal: load_required!(lookup, fmi3GetShiftDecimal),
            fmi3GetShiftFraction: load_required!(lookup, fmi3GetShiftFraction),
            fmi3SetIntervalDecimal: load_required!(lookup, fmi3SetIntervalDecimal),
            fmi3SetIntervalFraction: load_required!(lookup, fmi3SetIntervalFraction),
            fmi3EvaluateDiscreteStates: load_required!(lookup, fmi3EvaluateDiscreteStates),
            fmi3UpdateDiscreteStates: load_required!(lookup, fmi3UpdateDiscreteStates),
            fmi3GetFMUState: load_optional!(lookup, fmi3GetFMUState),
            fmi3SetFMUState: load_optional!(lookup, fmi3SetFMUState),
            fmi3FreeFMUState: load_optional!(lookup, fmi3FreeFMUState),
            fmi3SerializedFMUStateSize: load_optional!(lookup, fmi3SerializedFMUStateSize),
            fmi3SerializeFMUState: load_optional!(lookup, fmi3SerializeFMUState),
            fmi3DeserializeFMUState: load_optional!(lookup, fmi3DeserializeFMUState),
            fmi3GetDirectionalDerivative: load_optional!(lookup, fmi3GetDirectionalDerivative),
            fmi3GetAdjointDerivative: load_optional!(lookup, fmi3GetAdjointDerivative),
            fmi3SetShiftDecimal: load_optional!(lookup, fmi3SetShiftDecimal),
            fmi3SetShiftFraction: load_optional!(lookup, fmi3SetShiftFraction),
        })
    }
}

pub(crate) struct ModelExchange {
    pub(crate) fmi3EnterContinuousTimeMode: binding::fmi3EnterContinuousTimeModeTYPE,
    pub(crate) fmi3CompletedIntegratorStep: binding::fmi3CompletedIntegratorStepTYPE,
    pub(crate) fmi3SetTime: binding::fmi3SetTimeTYPE,
    pub(crate) fmi3SetContinuousStates: binding::fmi3SetContinuousStatesTYPE,
    pub(crate) fmi3GetContinuousStateDerivatives: binding::fmi3GetContinuousStateDerivativesTYPE,
    pub(crate) fmi3GetEventIndicators: binding::fmi3GetEventIndicatorsTYPE,
    pub(crate) fmi3GetContinuousStates: binding::fmi3GetContinuousStatesTYPE,
    pub(crate) fmi3GetNominalsOfContinuousStates: binding::fmi3GetNominalsOfContinuousStatesTYPE,
    pub(crate) fmi3GetNumberOfEventIndicators: binding::fmi3GetNumberOfEventIndicatorsTYPE,
    pub(crate) fmi3GetNumberOfContinuousStates: binding::fmi3GetNumberOfContinuousStatesTYPE,
}

impl ModelExchange {
    fn load(lookup: &dyn SymbolLookup) -> Result<Self, Error> {
        Ok(Self {
            fmi3EnterContinuousTimeMode: load_required!(lookup, fmi3EnterContinuousTimeMode),
            fmi3CompletedIntegratorStep: load_required!(lookup, fmi3CompletedIntegratorStep),
            fmi3SetTime: load_required!(lookup, fmi3SetTime),
            fmi3SetContinuousStates: load_required!(lookup, fmi3SetContinuousStates),
            fmi3GetContinuousStateDerivatives: load_required!(
                lookup,
                fmi3GetContinuousStateDerivatives
            ),
            fmi3GetEventIndicators: load_required!(lookup, fmi3GetEventIndicators),
            fmi3GetContinuousStates: load_required!(lookup, fmi3GetContinuousStates),
            fmi3GetNominalsOfContinuousStates: load_required!(
                lookup,
                fmi3GetNominalsOfContinuousStates
            ),
            fmi3GetNumberOfEventIndicators: load_required!(lookup, fmi3GetNumberOfEventIndicators),
            fmi3GetNumberOfContinuousStates: load_required!(
                lookup,
                fmi3GetNumberOfContinuousStates
            ),
        })
    }
}

pub(crate) struct CoSimulation {
    pub(crate) fmi3EnterStepMode: binding::fmi3EnterStepModeTYPE,
    pub(crate) fmi3GetOutputDerivatives: binding::fmi3GetOutputDerivativesTYPE,
    pub(crate) fmi3DoStep: binding::fmi3DoStepTYPE,
}

impl CoSimulation {
    fn load(lookup: &dyn SymbolLookup) -> Result<Self, Error> {
        Ok(Self {
            fmi3EnterStepMode: load_required!(lookup, fmi3EnterStepMode),
            fmi3GetOutputDerivatives: load_required!(lookup, fmi3GetOutputDerivatives),
            fmi3DoStep: load_required!(lookup, fmi3DoStep),
        })
    }
}

pub(crate) struct ScheduledExecution {
    pub(crate) fmi3ActivateModelPartition: binding::fmi3ActivateModelPartitionTYPE,
}

impl ScheduledExecution {
    fn load(lookup: &dyn SymbolLookup) -> Result<Self, Error> {
        Ok(Self {
            fmi3ActivateModelPartition: load_required!(lookup, fmi3ActivateModelPartition),
        })
    }
}
