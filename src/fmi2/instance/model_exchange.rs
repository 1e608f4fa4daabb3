use super::{boolean, Fmi2Instance};
use crate::{
    buffer::{GFloat, Values},
    fmi2::{binding, Fmi2},
    EventFlags, Error, Status, Transition,
};

impl Fmi2Instance<'_> {
    pub fn enter_event_mode(&mut self) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe { (me.fmi2EnterEventMode)(c) })?;
        self.instance.transition(Transition::EnterEventMode);
        Ok(self.instance.finish::<Fmi2>(raw, "EnterEventMode", format_args!("")))
    }

    pub fn new_discrete_states(&mut self, event_flags: &mut EventFlags) -> Result<Status, Error> {
        let mut event_info = binding::fmi2EventInfo::default();
        let raw = self.model_exchange(|me, c| unsafe {
            (me.fmi2NewDiscreteStates)(c, &mut event_info)
        })?;
        event_flags.update_from_fmi2_event_info(&event_info);
        Ok(self.instance.finish::<Fmi2>(
            raw,
            "NewDiscreteStates",
            format_args!(
                "eventInfo={{newDiscreteStatesNeeded={}, terminateSimulation={}, \
                 nominalsOfContinuousStatesChanged={}, valuesOfContinuousStatesChanged={}, \
                 nextEventTimeDefined={}, nextEventTime={}}}",
                event_info.newDiscreteStatesNeeded,
                event_info.terminateSimulation,
                event_info.nominalsOfContinuousStatesChanged,
                event_info.valuesOfContinuousStatesChanged,
                event_info.nextEventTimeDefined,
                GFloat::f64(event_info.nextEventTime)
            ),
        ))
    }

    pub fn enter_continuous_time_mode(&mut self) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe { (me.fmi2EnterContinuousTimeMode)(c) })?;
        self.instance.transition(Transition::EnterContinuousTimeMode);
        Ok(self
            .instance
            .finish::<Fmi2>(raw, "EnterContinuousTimeMode", format_args!("")))
    }

    /// Signal that an integrator step is complete. The FMU answers whether event mode must be
    /// entered and whether the simulation should be terminated.
    pub fn completed_integrator_step(
        &mut self,
        no_set_fmu_state_prior: bool,
        enter_event_mode: &mut bool,
        terminate_simulation: &mut bool,
    ) -> Result<Status, Error> {
        let mut enter = binding::fmi2False;
        let mut terminate = binding::fmi2False;
        let raw = self.model_exchange(|me, c| unsafe {
            (me.fmi2CompletedIntegratorStep)(
                c,
                boolean(no_set_fmu_state_prior),
                &mut enter,
                &mut terminate,
            )
        })?;
        *enter_event_mode = enter != 0;
        *terminate_simulation = terminate != 0;
        Ok(self.instance.finish::<Fmi2>(
            raw,
            "CompletedIntegratorStep",
            format_args!(
                "noSetFMUStatePriorToCurrentPoint={}, enterEventMode={enter}, \
                 terminateSimulation={terminate}",
                boolean(no_set_fmu_state_prior)
            ),
        ))
    }

    /// Also sets the time of the instance.
    pub fn set_time(&mut self, time: f64) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe { (me.fmi2SetTime)(c, time) })?;
        self.instance.time = time;
        Ok(self
            .instance
            .finish::<Fmi2>(raw, "SetTime", format_args!("time={}", GFloat::f64(time))))
    }

    pub fn set_continuous_states(&mut self, states: &[f64]) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe {
            (me.fmi2SetContinuousStates)(c, states.as_ptr(), states.len())
        })?;
        Ok(self.instance.finish::<Fmi2>(
            raw,
            "SetContinuousStates",
            format_args!("x={{{}}}, nx={}", Values::Float64(states), states.len()),
        ))
    }

    pub fn get_derivatives(&mut self, derivatives: &mut [f64]) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe {
            (me.fmi2GetDerivatives)(c, derivatives.as_mut_ptr(), derivatives.len())
        })?;
        Ok(self.instance.finish::<Fmi2>(
            raw,
            "GetDerivatives",
            format_args!(
                "derivatives={{{}}}, nx={}",
                Values::Float64(derivatives),
                derivatives.len()
            ),
        ))
    }

    pub fn get_event_indicators(&mut self, event_indicators: &mut [f64]) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe {
            (me.fmi2GetEventIndicators)(c, event_indicators.as_mut_ptr(), event_indicators.len())
        })?;
        Ok(self.instance.finish::<Fmi2>(
            raw,
            "GetEventIndicators",
            format_args!(
                "eventIndicators={{{}}}, ni={}",
                Values::Float64(event_indicators),
                event_indicators.len()
            ),
        ))
    }

    pub fn get_continuous_states(&mut self, states: &mut [f64]) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe {
            (me.fmi2GetContinuousStates)(c, states.as_mut_ptr(), states.len())
        })?;
        Ok(self.instance.finish::<Fmi2>(
            raw,
            "GetContinuousStates",
            format_args!("x={{{}}}, nx={}", Values::Float64(states), states.len()),
        ))
    }

    pub fn get_nominals_of_continuous_states(
        &mut self,
        nominals: &mut [f64],
    ) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe {
            (me.fmi2GetNominalsOfContinuousStates)(c, nominals.as_mut_ptr(), nominals.len())
        })?;
        Ok(self.instance.finish::<Fmi2>(
            raw,
            "GetNominalsOfContinuousStates",
            format_args!(
                "x_nominal={{{}}}, nx={}",
                Values::Float64(nominals),
                nominals.len()
            ),
        ))
    }
}
