use super::{boolean, check_len, Fmi1Instance, StatusKind};
use crate::{
    buffer::{GFloat, Values},
    dispatch::VersionDescriptor,
    fmi1::{binding, Fmi1},
    logger::fmu_str,
    Error, Status, Transition,
};

impl Fmi1Instance<'_> {
    pub fn get_types_platform(&mut self) -> Result<String, Error> {
        let platform = self.co_simulation(|cs, _| {
            unsafe { fmu_str((cs.fmiGetTypesPlatform)()) }.into_owned()
        })?;
        self.instance
            .log_call(Fmi1::PREFIX, "GetTypesPlatform", Status::OK, format_args!(""));
        Ok(platform)
    }

    /// Initialize the slave and continue in Step Mode. The time of the instance is set to
    /// `t_start`.
    pub fn initialize_slave(&mut self, t_start: f64, t_stop: Option<f64>) -> Result<Status, Error> {
        let stop_time_defined = boolean(t_stop.is_some());
        let t_stop = t_stop.unwrap_or_default();
        let raw = self.co_simulation(|cs, c| unsafe {
            (cs.fmiInitializeSlave)(c, t_start, stop_time_defined, t_stop)
        })?;
        self.instance.time = t_start;
        self.instance.transition(Transition::ExitInitializationMode {
            event_mode_used: false,
        });
        Ok(self.instance.finish::<Fmi1>(
            raw,
            "InitializeSlave",
            format_args!(
                "tStart={}, stopTimeDefined={stop_time_defined}, tStop={}",
                GFloat::f64(t_start),
                GFloat::f64(t_stop)
            ),
        ))
    }

    pub fn terminate_slave(&mut self) -> Result<Status, Error> {
        let raw = self.co_simulation(|cs, c| unsafe { (cs.fmiTerminateSlave)(c) })?;
        self.instance.transition(Transition::Terminate);
        Ok(self
            .instance
            .finish::<Fmi1>(raw, "TerminateSlave", format_args!("")))
    }

    pub fn reset_slave(&mut self) -> Result<Status, Error> {
        let raw = self.co_simulation(|cs, c| unsafe { (cs.fmiResetSlave)(c) })?;
        self.instance.transition(Transition::Reset);
        Ok(self.instance.finish::<Fmi1>(raw, "ResetSlave", format_args!("")))
    }

    /// Free the slave and drop the function table.
    pub fn free_slave_instance(&mut self) -> Result<(), Error> {
        self.co_simulation(|cs, c| {
            if !c.is_null() {
                unsafe { (cs.fmiFreeSlaveInstance)(c) }
            }
        })?;
        self.instance
            .log_call(Fmi1::PREFIX, "FreeSlaveInstance", Status::OK, format_args!(""));
        log::trace!("Freed slave of '{}'", self.instance.name());
        self.instance.unbind();
        Ok(())
    }

    pub fn set_real_input_derivatives(
        &mut self,
        vr: &[binding::fmiValueReference],
        order: &[binding::fmiInteger],
        values: &[f64],
    ) -> Result<Status, Error> {
        check_len(vr.len(), order.len())?;
        check_len(vr.len(), values.len())?;
        let raw = self.co_simulation(|cs, c| unsafe {
            (cs.fmiSetRealInputDerivatives)(
                c,
                vr.as_ptr(),
                vr.len(),
                order.as_ptr(),
                values.as_ptr(),
            )
        })?;
        Ok(self.instance.finish::<Fmi1>(
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
        vr: &[binding::fmiValueReference],
        order: &[binding::fmiInteger],
        values: &mut [f64],
    ) -> Result<Status, Error> {
        check_len(vr.len(), order.len())?;
        check_len(vr.len(), values.len())?;
        let raw = self.co_simulation(|cs, c| unsafe {
            (cs.fmiGetRealOutputDerivatives)(
                c,
                vr.as_ptr(),
                vr.len(),
                order.as_ptr(),
                values.as_mut_ptr(),
            )
        })?;
        Ok(self.instance.finish::<Fmi1>(
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

    pub fn cancel_step(&mut self) -> Result<Status, Error> {
        let raw = self.co_simulation(|cs, c| unsafe { (cs.fmiCancelStep)(c) })?;
        Ok(self.instance.finish::<Fmi1>(raw, "CancelStep", format_args!("")))
    }

    /// Advance the slave by one communication step. The time of the instance is set to the end
    /// of the step.
    pub fn do_step(
        &mut self,
        current_communication_point: f64,
        communication_step_size: f64,
        new_step: bool,
    ) -> Result<Status, Error> {
        let raw = self.co_simulation(|cs, c| unsafe {
            (cs.fmiDoStep)(
                c,
                current_communication_point,
                communication_step_size,
                boolean(new_step),
            )
        })?;
        self.instance.time = current_communication_point + communication_step_size;
        Ok(self.instance.finish::<Fmi1>(
            raw,
            "DoStep",
            format_args!(
                "currentCommunicationPoint={}, communicationStepSize={}, newStep={}",
                GFloat::f64(current_communication_point),
                GFloat::f64(communication_step_size),
                boolean(new_step)
            ),
        ))
    }

    pub fn get_status(&mut self, kind: StatusKind, value: &mut Status) -> Result<Status, Error> {
        let mut raw_value = binding::fmiStatus_fmiOK;
        let raw = self.co_simulation(|cs, c| unsafe {
            (cs.fmiGetStatus)(c, kind as binding::fmiStatusKind, &mut raw_value)
        })?;
        *value = Fmi1::status(raw_value);
        Ok(self.instance.finish::<Fmi1>(
            raw,
            "GetStatus",
            format_args!("s={}, value={raw_value}", kind as binding::fmiStatusKind),
        ))
    }

    pub fn get_real_status(&mut self, kind: StatusKind, value: &mut f64) -> Result<Status, Error> {
        let raw = self.co_simulation(|cs, c| unsafe {
            (cs.fmiGetRealStatus)(c, kind as binding::fmiStatusKind, &mut *value)
        })?;
        Ok(self.instance.finish::<Fmi1>(
            raw,
            "GetRealStatus",
            format_args!(
                "s={}, value={}",
                kind as binding::fmiStatusKind,
                GFloat::f64(*value)
            ),
        ))
    }

    pub fn get_integer_status(
        &mut self,
        kind: StatusKind,
        value: &mut binding::fmiInteger,
    ) -> Result<Status, Error> {
        let raw = self.co_simulation(|cs, c| unsafe {
            (cs.fmiGetIntegerStatus)(c, kind as binding::fmiStatusKind, &mut *value)
        })?;
        Ok(self.instance.finish::<Fmi1>(
            raw,
            "GetIntegerStatus",
            format_args!("s={}, value={}", kind as binding::fmiStatusKind, *value),
        ))
    }

    pub fn get_boolean_status(
        &mut self,
        kind: StatusKind,
        value: &mut bool,
    ) -> Result<Status, Error> {
        let mut raw_value = binding::fmiFalse;
        let raw = self.co_simulation(|cs, c| unsafe {
            (cs.fmiGetBooleanStatus)(c, kind as binding::fmiStatusKind, &mut raw_value)
        })?;
        *value = raw_value != 0;
        Ok(self.instance.finish::<Fmi1>(
            raw,
            "GetBooleanStatus",
            format_args!("s={}, value={raw_value}", kind as binding::fmiStatusKind),
        ))
    }

    pub fn get_string_status(
        &mut self,
        kind: StatusKind,
        value: &mut String,
    ) -> Result<Status, Error> {
        let mut raw_value: binding::fmiString = std::ptr::null();
        let raw = self.co_simulation(|cs, c| unsafe {
            (cs.fmiGetStringStatus)(c, kind as binding::fmiStatusKind, &mut raw_value)
        })?;
        *value = unsafe { fmu_str(raw_value) }.into_owned();
        Ok(self.instance.finish::<Fmi1>(
            raw,
            "GetStringStatus",
            format_args!("s={}, value=\"{value}\"", kind as binding::fmiStatusKind),
        ))
    }
}
