use super::Fmi3Instance;
use crate::{
    buffer::{GFloat, Values},
    fmi3::{binding, Fmi3},
    Error, Status, Transition,
};

/// Results of [`Fmi3Instance::do_step`].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct StepResult {
    pub event_handling_needed: bool,
    pub terminate_simulation: bool,
    pub early_return: bool,
    pub last_successful_time: f64,
}

impl Fmi3Instance<'_> {
    pub fn enter_step_mode(&mut self) -> Result<Status, Error> {
        let raw = self.co_simulation(|cs, c| unsafe { (cs.fmi3EnterStepMode)(c) })?;
        self.instance.transition(Transition::EnterStepMode);
        Ok(self
            .instance
            .finish::<Fmi3>(raw, "EnterStepMode", format_args!("")))
    }

    pub fn get_output_derivatives(
        &mut self,
        vr: &[binding::fmi3ValueReference],
        orders: &[i32],
        values: &mut [f64],
    ) -> Result<Status, Error> {
        if orders.len() != vr.len() {
            return Err(Error::ArrayLength {
                expected: vr.len(),
                found: orders.len(),
            });
        }
        let raw = self.co_simulation(|cs, c| unsafe {
            (cs.fmi3GetOutputDerivatives)(
                c,
                vr.as_ptr(),
                vr.len(),
                orders.as_ptr(),
                values.as_mut_ptr(),
                values.len(),
            )
        })?;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "GetOutputDerivatives",
            format_args!(
                "valueReferences={{{}}}, nValueReferences={}, orders={{{}}}, values={{{}}}, \
                 nValues={}",
                Values::ValueReference(vr),
                vr.len(),
                Values::Int32(orders),
                Values::Float64(values),
                values.len()
            ),
        ))
    }

    /// Advance the FMU by one communication step. The time of the instance is set to the
    /// `lastSuccessfulTime` reported by the FMU.
    pub fn do_step(
        &mut self,
        current_communication_point: f64,
        communication_step_size: f64,
        no_set_fmu_state_prior: bool,
        result: &mut StepResult,
    ) -> Result<Status, Error> {
        let mut step = StepResult::default();
        let raw = self.co_simulation(|cs, c| unsafe {
            (cs.fmi3DoStep)(
                c,
                current_communication_point,
                communication_step_size,
                no_set_fmu_state_prior,
                &mut step.event_handling_needed,
                &mut step.terminate_simulation,
                &mut step.early_return,
                &mut step.last_successful_time,
            )
        })?;
        *result = step;
        self.instance.time = step.last_successful_time;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "DoStep",
            format_args!(
                "currentCommunicationPoint={}, communicationStepSize={}, \
                 noSetFMUStatePriorToCurrentPoint={}, eventHandlingNeeded={}, \
                 terminateSimulation={}, earlyReturn={}, lastSuccessfulTime={}",
                GFloat::f64(current_communication_point),
                GFloat::f64(communication_step_size),
                no_set_fmu_state_prior as u8,
                step.event_handling_needed as u8,
                step.terminate_simulation as u8,
                step.early_return as u8,
                GFloat::f64(step.last_successful_time)
            ),
        ))
    }
}
