use super::{boolean, Fmi1Instance};
use crate::{
    buffer::{GFloat, Values},
    dispatch::VersionDescriptor,
    fmi1::{binding, Fmi1},
    logger::fmu_str,
    Error, Status, Transition,
};

/// Renders an `fmiEventInfo` the way it appears in call logs.
struct EventInfo<'a>(&'a binding::fmiEventInfo);

impl std::fmt::Display for EventInfo<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{iterationConverged={}, stateValueReferencesChanged={}, stateValuesChanged={}, \
             terminateSimulation={}, upcomingTimeEvent={}, nextEventTime={}}}",
            self.0.iterationConverged,
            self.0.stateValueReferencesChanged,
            self.0.stateValuesChanged,
            self.0.terminateSimulation,
            self.0.upcomingTimeEvent,
            GFloat::f64(self.0.nextEventTime)
        )
    }
}

impl Fmi1Instance<'_> {
    pub fn get_model_types_platform(&mut self) -> Result<String, Error> {
        let platform = self.model_exchange(|me, _| {
            unsafe { fmu_str((me.fmiGetModelTypesPlatform)()) }.into_owned()
        })?;
        self.instance.log_call(
            Fmi1::PREFIX,
            "GetModelTypesPlatform",
            Status::OK,
            format_args!(""),
        );
        Ok(platform)
    }

    /// Free the model instance and drop the function table.
    pub fn free_model_instance(&mut self) -> Result<(), Error> {
        self.model_exchange(|me, c| {
            if !c.is_null() {
                unsafe { (me.fmiFreeModelInstance)(c) }
            }
        })?;
        self.instance
            .log_call(Fmi1::PREFIX, "FreeModelInstance", Status::OK, format_args!(""));
        log::trace!("Freed model instance of '{}'", self.instance.name());
        self.instance.unbind();
        Ok(())
    }

    /// Also sets the time of the instance.
    pub fn set_time(&mut self, time: f64) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe { (me.fmiSetTime)(c, time) })?;
        self.instance.time = time;
        Ok(self
            .instance
            .finish::<Fmi1>(raw, "SetTime", format_args!("time={}", GFloat::f64(time))))
    }

    pub fn set_continuous_states(&mut self, states: &[f64]) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe {
            (me.fmiSetContinuousStates)(c, states.as_ptr(), states.len())
        })?;
        Ok(self.instance.finish::<Fmi1>(
            raw,
            "SetContinuousStates",
            format_args!("x={{{}}}, nx={}", Values::Float64(states), states.len()),
        ))
    }

    pub fn completed_integrator_step(
        &mut self,
        call_event_update: &mut bool,
    ) -> Result<Status, Error> {
        let mut raw_value = binding::fmiFalse;
        let raw = self.model_exchange(|me, c| unsafe {
            (me.fmiCompletedIntegratorStep)(c, &mut raw_value)
        })?;
        *call_event_update = raw_value != 0;
        Ok(self.instance.finish::<Fmi1>(
            raw,
            "CompletedIntegratorStep",
            format_args!("callEventUpdate={raw_value}"),
        ))
    }

    /// Initialize the model and continue in Event Mode.
    pub fn initialize(
        &mut self,
        tolerance_controlled: bool,
        relative_tolerance: f64,
        event_info: &mut binding::fmiEventInfo,
    ) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe {
            (me.fmiInitialize)(
                c,
                boolean(tolerance_controlled),
                relative_tolerance,
                &mut *event_info,
            )
        })?;
        self.instance.transition(Transition::ExitInitializationMode {
            event_mode_used: false,
        });
        Ok(self.instance.finish::<Fmi1>(
            raw,
            "Initialize",
            format_args!(
                "toleranceControlled={}, relativeTolerance={}, eventInfo={}",
                boolean(tolerance_controlled),
                GFloat::f64(relative_tolerance),
                EventInfo(event_info)
            ),
        ))
    }

    pub fn get_derivatives(&mut self, derivatives: &mut [f64]) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe {
            (me.fmiGetDerivatives)(c, derivatives.as_mut_ptr(), derivatives.len())
        })?;
        Ok(self.instance.finish::<Fmi1>(
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
            (me.fmiGetEventIndicators)(c, event_indicators.as_mut_ptr(), event_indicators.len())
        })?;
        Ok(self.instance.finish::<Fmi1>(
            raw,
            "GetEventIndicators",
            format_args!(
                "eventIndicators={{{}}}, ni={}",
                Values::Float64(event_indicators),
                event_indicators.len()
            ),
        ))
    }

    pub fn event_update(
        &mut self,
        intermediate_results: bool,
        event_info: &mut binding::fmiEventInfo,
    ) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe {
            (me.fmiEventUpdate)(c, boolean(intermediate_results), &mut *event_info)
        })?;
        Ok(self.instance.finish::<Fmi1>(
            raw,
            "EventUpdate",
            format_args!(
                "intermediateResults={}, eventInfo={}",
                boolean(intermediate_results),
                EventInfo(event_info)
            ),
        ))
    }

    pub fn get_continuous_states(&mut self, states: &mut [f64]) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe {
            (me.fmiGetContinuousStates)(c, states.as_mut_ptr(), states.len())
        })?;
        Ok(self.instance.finish::<Fmi1>(
            raw,
            "GetContinuousStates",
            format_args!("states={{{}}}, nx={}", Values::Float64(states), states.len()),
        ))
    }

    pub fn get_nominal_continuous_states(
        &mut self,
        nominals: &mut [f64],
    ) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe {
            (me.fmiGetNominalContinuousStates)(c, nominals.as_mut_ptr(), nominals.len())
        })?;
        Ok(self.instance.finish::<Fmi1>(
            raw,
            "GetNominalContinuousStates",
            format_args!(
                "x_nominal={{{}}}, nx={}",
                Values::Float64(nominals),
                nominals.len()
            ),
        ))
    }

    pub fn get_state_value_references(
        &mut self,
        vrx: &mut [binding::fmiValueReference],
    ) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe {
            (me.fmiGetStateValueReferences)(c, vrx.as_mut_ptr(), vrx.len())
        })?;
        Ok(self.instance.finish::<Fmi1>(
            raw,
            "GetStateValueReferences",
            format_args!("vrx={{{}}}, nx={}", Values::ValueReference(vrx), vrx.len()),
        ))
    }

    pub fn terminate(&mut self) -> Result<Status, Error> {
        let raw = self.model_exchange(|me, c| unsafe { (me.fmiTerminate)(c) })?;
        self.instance.transition(Transition::Terminate);
        Ok(self.instance.finish::<Fmi1>(raw, "Terminate", format_args!("")))
    }
}
