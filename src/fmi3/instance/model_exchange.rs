use super::Fmi3Instance;
use crate::{
    buffer::{GFloat, Values},
    fmi3::Fmi3,
    Error, Status, Transition,
};

impl Fmi3Instance<'_> {
    pub fn enter_continuous_time_mode(&mut self) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe { (me.fmi3EnterContinuousTimeMode)(c) })?;
        self.instance.transition(Transition::EnterContinuousTimeMode);
        Ok(self
            .instance
            .finish::<Fmi3>(raw, "EnterContinuousTimeMode", format_args!("")))
    }

    /// Signal that an integrator step is complete. The FMU answers whether event mode must be
    /// entered and whether the simulation should be terminated.
    pub fn completed_integrator_step(
        &mut self,
        no_set_fmu_state_prior: bool,
        enter_event_mode: &mut bool,
        terminate_simulation: &mut bool,
    ) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe {
            (me.fmi3CompletedIntegratorStep)(
                c,
                no_set_fmu_state_prior,
                &mut *enter_event_mode,
                &mut *terminate_simulation,
            )
        })?;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "CompletedIntegratorStep",
            format_args!(
                "noSetFMUStatePriorToCurrentPoint={}, enterEventMode={}, terminateSimulation={}",
                no_set_fmu_state_prior as u8,
                *enter_event_mode as u8,
                *terminate_simulation as u8
            ),
        ))
    }

    /// Also sets the time of the instance.
    pub fn set_time(&mut self, time: f64) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe { (me.fmi3SetTime)(c, time) })?;
        self.instance.time = time;
        Ok(self
            .instance
            .finish::<Fmi3>(raw, "SetTime", format_args!("time={}", GFloat::f64(time))))
    }

    pub fn set_continuous_states(&mut self, states: &[f64]) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe {
            (me.fmi3SetContinuousStates)(c, states.as_ptr(), states.len())
        })?;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "SetContinuousStates",
            format_args!(
                "continuousStates={{{}}}, nContinuousStates={}",
                Values::Float64(states),
                states.len()
            ),
        ))
    }

    pub fn get_continuous_state_derivatives(
        &mut self,
        derivatives: &mut [f64],
    ) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe {
            (me.fmi3GetContinuousStateDerivatives)(c, derivatives.as_mut_ptr(), derivatives.len())
        })?;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "GetContinuousStateDerivatives",
            format_args!(
                "derivatives={{{}}}, nContinuousStates={}",
                Values::Float64(derivatives),
                derivatives.len()
            ),
        ))
    }

    pub fn get_event_indicators(&mut self, event_indicators: &mut [f64]) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe {
            (me.fmi3GetEventIndicators)(c, event_indicators.as_mut_ptr(), event_indicators.len())
        })?;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "GetEventIndicators",
            format_args!(
                "eventIndicators={{{}}}, nEventIndicators={}",
                Values::Float64(event_indicators),
                event_indicators.len()
            ),
        ))
    }

    pub fn get_continuous_states(&mut self, states: &mut [f64]) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe {
            (me.fmi3GetContinuousStates)(c, states.as_mut_ptr(), states.len())
        })?;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "GetContinuousStates",
            format_args!(
                "continuousStates={{{}}}, nContinuousStates={}",
                Values::Float64(states),
                states.len()
            ),
        ))
    }

    pub fn get_nominals_of_continuous_states(
        &mut self,
        nominals: &mut [f64],
    ) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe {
            (me.fmi3GetNominalsOfContinuousStates)(c, nominals.as_mut_ptr(), nominals.len())
        })?;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "GetNominalsOfContinuousStates",
            format_args!(
                "nominals={{{}}}, nContinuousStates={}",
                Values::Float64(nominals),
                nominals.len()
            ),
        ))
    }

    pub fn get_number_of_event_indicators(
        &mut self,
        n_event_indicators: &mut usize,
    ) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe {
            (me.fmi3GetNumberOfEventIndicators)(c, &mut *n_event_indicators)
        })?;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "GetNumberOfEventIndicators",
            format_args!("nEventIndicators={n_event_indicators}"),
        ))
    }

    pub fn get_number_of_continuous_states(
        &mut self,
        n_continuous_states: &mut usize,
    ) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe {
            (me.fmi3GetNumberOfContinuousStates)(c, &mut *n_continuous_states)
        })?;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "GetNumberOfContinuousStates",
            format_args!("nContinuousStates={n_continuous_states}"),
        ))
    }
}
