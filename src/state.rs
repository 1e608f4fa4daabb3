//! Lifecycle state of an FMI instance.
//!
//! The state is advanced as a side effect of the dispatcher calls that the FMI standard defines
//! as transitions. Illegal call sequences are not rejected here, the state only has to stay
//! consistent so that the next transition can be chosen correctly.

use crate::InterfaceType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum State {
    #[default]
    StartAndEnd,
    Instantiated,
    InitializationMode,
    EventMode,
    ContinuousTimeMode,
    StepMode,
    ClockActivationMode,
    ConfigurationMode,
    ReconfigurationMode,
    Terminated,
}

/// The calls that move an instance from one state to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    Instantiate,
    EnterInitializationMode,
    /// `eventModeUsed` as negotiated when instantiating an FMI 3.0 Co-Simulation instance.
    ExitInitializationMode { event_mode_used: bool },
    EnterEventMode,
    EnterContinuousTimeMode,
    EnterStepMode,
    EnterConfigurationMode,
    ExitConfigurationMode,
    Terminate,
    Reset,
}

impl State {
    /// The state an instance settles in when it is running, i.e. after initialization or
    /// reconfiguration.
    pub fn running(interface_type: InterfaceType, event_mode_used: bool) -> State {
        match interface_type {
            InterfaceType::ModelExchange => State::EventMode,
            InterfaceType::CoSimulation if event_mode_used => State::EventMode,
            InterfaceType::CoSimulation => State::StepMode,
            InterfaceType::ScheduledExecution => State::ClockActivationMode,
        }
    }

    /// Apply `transition` to `self`.
    ///
    /// Returns `None` only for `ExitConfigurationMode` outside of Configuration or
    /// Reconfiguration Mode, where there is no state to return to.
    pub fn next(self, transition: Transition, interface_type: InterfaceType) -> Option<State> {
        let next = match transition {
            Transition::Instantiate | Transition::Reset => State::Instantiated,
            Transition::EnterInitializationMode => State::InitializationMode,
            Transition::ExitInitializationMode { event_mode_used } => {
                State::running(interface_type, event_mode_used)
            }
            Transition::EnterEventMode => State::EventMode,
            Transition::EnterContinuousTimeMode => State::ContinuousTimeMode,
            Transition::EnterStepMode => State::StepMode,
            Transition::EnterConfigurationMode => match self {
                State::Instantiated => State::ConfigurationMode,
                _ => State::ReconfigurationMode,
            },
            Transition::ExitConfigurationMode => match self {
                State::ConfigurationMode => State::Instantiated,
                State::ReconfigurationMode => State::running(interface_type, false),
                _ => return None,
            },
            Transition::Terminate => State::Terminated,
        };
        Some(next)
    }

    /// True while the FMU component exists, i.e. between instantiation and free.
    pub fn is_instantiated(self) -> bool {
        self != State::StartAndEnd
    }
}
