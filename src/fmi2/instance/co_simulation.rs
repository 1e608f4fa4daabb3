use super::{boolean, check_len, Fmi2Instance, StatusKind};
use crate::{
    buffer::{GFloat, Values},
    dispatch::VersionDescriptor,
    fmi2::{binding, Fmi2},
    logger::fmu_str,
    Error, Status,
};

impl Fmi2Instance<'_> {
    pub fn set_real_input_derivatives(
        &mut self,
        vr: &[binding::fmi2ValueReference],
        order: &[binding::fmi2Integer],
        values: &[f64],
    ) -> Result<Status, Error> {
        check_len(vr.len(), order.len())?;
        check_len(vr.len(), values.len())?;
        let raw = self.co_simulation(|cs, c| unsafe {
            (cs.fmi2SetRealInputDerivatives)(
                c,
                vr.as_ptr(),
                vr.len(),
                order.as_ptr(),
                values.as_ptr(),
            )
        })?;
        Ok(self.instance.finish::<Fmi2>(
            raw,
            "SetRealInputDerivatives",
            format_args!(
                "vr={{{}}}, nvr={}, order={{{}}}, value={{{}}}",
                Values::ValueReference(vr),
                vr.len(),
                Values::Int32(order),
                Values::Float64(values)
            ),
        ))
    }

    pub fn get_real_output_derivatives(
        &mut self,
        vr: &[binding::fmi2ValueReference],
        order: &[binding::fmi2Integer],
        values: &mut [f64],
    ) -> Result<Status, Error> {
        check_len(vr.len(), order.len())?;
        check_len(vr.len(), values.len())?;
        let raw = self.co_simulation(|cs, c| unsafe {
            (cs.fmi2GetRealOutputDerivatives)(
                c,
                vr.as_ptr(),
                vr.len(),
                order.as_ptr(),
                values.as_mut_ptr(),
            )
        })?;
        Ok(self.instance.finish::<Fmi2>(
            raw,
            "GetRealOutputDerivatives",
            format_args!(
                "vr={{{}}}, nvr={}, order={{{}}}, value={{{}}}",
                Values::ValueReference(vr),
                vr.len(),
                Values::Int32(order),
                Values::Float64(values)
            ),
        ))
    }

    /// Advance the slave by one communication step. The time of the instance is set to the end
    /// of the step.
    pub fn do_step(
        &mut self,
        current_communication_point: f64,
        communication_step_size: f64,
        no_set_fmu_state_prior: bool,
    ) -> Result<Status, Error> {
        let raw = self.co_simulation(|cs, c| unsafe {
            (cs.fmi2DoStep)(
                c,
                current_communication_point,
                communication_step_size,
                boolean(no_set_fmu_state_prior),
            )
        })?;
        self.instance.time = current_communication_point + communication_step_size;
        Ok(self.instance.finish::<Fmi2>(
            raw,
            "DoStep",
            format_args!(
                "currentCommunicationPoint={}, communicationStepSize={}, \
                 noSetFMUStatePriorToCurrentPoint={}",
                GFloat::f64(current_communication_point),
                GFloat::f64(communication_step_size),
                boolean(no_set_fmu_state_prior)
            ),
        ))
    }

    pub fn cancel_step(&mut self) -> Result<Status, Error> {
        let raw = self.co_simulation(|cs, c| unsafe { (cs.fmi2CancelStep)(c) })?;
        Ok(self.instance.finish::<Fmi2>(raw, "CancelStep", format_args!("")))
    }

    pub fn get_status(&mut self, kind: StatusKind, value: &mut Status) -> Result<Status, Error> {
        let mut raw_value = binding::fmi2Status_fmi2OK;
        let raw = self.co_simulation(|cs, c| unsafe {
            (cs.fmi2GetStatus)(c, kind as binding::fmi2StatusKind, &mut raw_value)
        })?;
        *value = Fmi2::status(raw_value);
        Ok(self.instance.finish::<Fmi2>(
            raw,
            "GetStatus",
            format_args!("s={}, value={raw_value}", kind as binding::fmi2StatusKind),
        ))
    }

    pub fn get_real_status(&mut self, kind: StatusKind, value: &mut f64) -> Result<Status, Error> {
        let raw = self.co_simulation(|cs, c| unsafe {
            (cs.fmi2GetRealStatus)(c, kind as binding::fmi2StatusKind, &mut *value)
        })?;
        Ok(self.instance.finish::<Fmi2>(
            raw,
            "GetRealStatus",
            format_args!(
                "s={}, value={}",
                kind as binding::fmi2StatusKind,
                GFloat::f64(*value)
            ),
        ))
    }

    pub fn get_integer_status(
        &mut self,
        kind: StatusKind,
        value: &mut binding::fmi2Integer,
    ) -> Result<Status, Error> {
        let raw = self.co_simulation(|cs, c| unsafe {
            (cs.fmi2GetIntegerStatus)(c, kind as binding::fmi2StatusKind, &mut *value)
        })?;
        Ok(self.instance.finish::<Fmi2>(
            raw,
            "GetIntegerStatus",
            format_args!("s={}, value={}", kind as binding::fmi2StatusKind, *value),
        ))
    }

    pub fn get_boolean_status(
        &mut self,
        kind: StatusKind,
        value: &mut bool,
    ) -> Result<Status, Error> {
        let mut raw_value = binding::fmi2False;
        let raw = self.co_simulation(|cs, c| unsafe {
            (cs.fmi2GetBooleanStatus)(c, kind as binding::fmi2StatusKind, &mut raw_value)
        })?;
        *value = raw_value != 0;
        Ok(self.instance.finish::<Fmi2>(
            raw,
            "GetBooleanStatus",
            format_args!("s={}, value={raw_value}", kind as binding::fmi2StatusKind),
        ))
    }

    pub fn get_string_status(
        &mut self,
        kind: StatusKind,
        value: &mut String,
    ) -> Result<Status, Error> {
        let mut raw_value: binding::fmi2String = std::ptr::null();
        let raw = self.co_simulation(|cs, c| unsafe {
            (cs.fmi2GetStringStatus)(c, kind as binding::fmi2StatusKind, &mut raw_value)
        })?;
        *value = unsafe { fmu_str(raw_value) }.into_owned();
        Ok(self.instance.finish::<Fmi2>(
            raw,
            "GetStringStatus",
            format_args!("s={}, value=\"{value}\"", kind as binding::fmi2StatusKind),
        ))
    }
}
