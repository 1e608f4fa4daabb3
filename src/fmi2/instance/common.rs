use super::{boolean, check_len, Fmi2Instance};
use crate::{
    buffer::{c_strings, try_collect, Booleans, GFloat, Strings, Values},
    dispatch::{resolved, VersionDescriptor},
    fmi2::{binding, Fmi2},
    logger::fmu_str,
    Error, Status, Transition,
};

fn booleans(values: &[binding::fmi2Boolean]) -> Values<'_> {
    Values::Boolean(Booleans::Fmi2(values))
}

macro_rules! impl_getter_setter {
    ($ty:ty, $values:expr, $get:ident, $set:ident, $fmi_get:ident, $fmi_set:ident) => {
        pub fn $get(
            &mut self,
            vr: &[binding::fmi2ValueReference],
            values: &mut [$ty],
        ) -> Result<Status, Error> {
            check_len(vr.len(), values.len())?;
            let raw = self.instance.invoke::<Fmi2, _>(|f, c| unsafe {
                (f.common.$fmi_get)(c, vr.as_ptr(), vr.len(), values.as_mut_ptr())
            })?;
            Ok(self.instance.finish::<Fmi2>(
                raw,
                &stringify!($fmi_get)[4..],
                format_args!(
                    "vr={{{}}}, nvr={}, value={{{}}}",
                    Values::ValueReference(vr),
                    vr.len(),
                    ($values)(&*values)
                ),
            ))
        }

        pub fn $set(
            &mut self,
            vr: &[binding::fmi2ValueReference],
            values: &[$ty],
        ) -> Result<Status, Error> {
            check_len(vr.len(), values.len())?;
            let raw = self.instance.invoke::<Fmi2, _>(|f, c| unsafe {
                (f.common.$fmi_set)(c, vr.as_ptr(), vr.len(), values.as_ptr())
            })?;
            Ok(self.instance.finish::<Fmi2>(
                raw,
                &stringify!($fmi_set)[4..],
                format_args!(
                    "vr={{{}}}, nvr={}, value={{{}}}",
                    Values::ValueReference(vr),
                    vr.len(),
                    ($values)(values)
                ),
            ))
        }
    };
}

impl Fmi2Instance<'_> {
    pub fn get_types_platform(&mut self) -> Result<String, Error> {
        let platform = self.instance.invoke::<Fmi2, _>(|f, _| {
            unsafe { fmu_str((f.common.fmi2GetTypesPlatform)()) }.into_owned()
        })?;
        self.instance
            .log_call(Fmi2::PREFIX, "GetTypesPlatform", Status::OK, format_args!(""));
        Ok(platform)
    }

    pub fn get_version(&mut self) -> Result<String, Error> {
        let version = self.instance.invoke::<Fmi2, _>(|f, _| {
            unsafe { fmu_str((f.common.fmi2GetVersion)()) }.into_owned()
        })?;
        self.instance
            .log_call(Fmi2::PREFIX, "GetVersion", Status::OK, format_args!(""));
        Ok(version)
    }

    pub fn set_debug_logging(
        &mut self,
        logging_on: bool,
        categories: &[&str],
    ) -> Result<Status, Error> {
        let categories = c_strings(categories)?;
        let category_ptrs = try_collect(categories.iter().map(|c| c.as_ptr()))?;

        let raw = self.instance.invoke::<Fmi2, _>(|f, c| unsafe {
            (f.common.fmi2SetDebugLogging)(
                c,
                boolean(logging_on),
                category_ptrs.len(),
                category_ptrs.as_ptr(),
            )
        })?;
        Ok(self.instance.finish::<Fmi2>(
            raw,
            "SetDebugLogging",
            format_args!(
                "loggingOn={}, nCategories={}, categories={{{}}}",
                boolean(logging_on),
                category_ptrs.len(),
                Values::String(unsafe { Strings::new(&category_ptrs) })
            ),
        ))
    }

    /// Also sets the time of the instance to `start_time`.
    pub fn setup_experiment(
        &mut self,
        tolerance: Option<f64>,
        start_time: f64,
        stop_time: Option<f64>,
    ) -> Result<Status, Error> {
        let tolerance_defined = boolean(tolerance.is_some());
        let tolerance = tolerance.unwrap_or_default();
        let stop_time_defined = boolean(stop_time.is_some());
        let stop_time = stop_time.unwrap_or_default();

        let raw = self.instance.invoke::<Fmi2, _>(|f, c| unsafe {
            (f.common.fmi2SetupExperiment)(
                c,
                tolerance_defined,
                tolerance,
                start_time,
                stop_time_defined,
                stop_time,
            )
        })?;
        self.instance.time = start_time;
        Ok(self.instance.finish::<Fmi2>(
            raw,
            "SetupExperiment",
            format_args!(
                "toleranceDefined={tolerance_defined}, tolerance={}, startTime={}, \
                 stopTimeDefined={stop_time_defined}, stopTime={}",
                GFloat::f64(tolerance),
                GFloat::f64(start_time),
                GFloat::f64(stop_time)
            ),
        ))
    }

    pub fn enter_initialization_mode(&mut self) -> Result<Status, Error> {
        let raw = self.instance.invoke::<Fmi2, _>(|f, c| unsafe {
            (f.common.fmi2EnterInitializationMode)(c)
        })?;
        self.instance.transition(Transition::EnterInitializationMode);
        Ok(self
            .instance
            .finish::<Fmi2>(raw, "EnterInitializationMode", format_args!("")))
    }

    pub fn exit_initialization_mode(&mut self) -> Result<Status, Error> {
        let raw = self.instance.invoke::<Fmi2, _>(|f, c| unsafe {
            (f.common.fmi2ExitInitializationMode)(c)
        })?;
        self.instance.transition(Transition::ExitInitializationMode {
            event_mode_used: false,
        });
        Ok(self
            .instance
            .finish::<Fmi2>(raw, "ExitInitializationMode", format_args!("")))
    }

    pub fn terminate(&mut self) -> Result<Status, Error> {
        let raw = self
            .instance
            .invoke::<Fmi2, _>(|f, c| unsafe { (f.common.fmi2Terminate)(c) })?;
        self.instance.transition(Transition::Terminate);
        Ok(self.instance.finish::<Fmi2>(raw, "Terminate", format_args!("")))
    }

    pub fn reset(&mut self) -> Result<Status, Error> {
        let raw = self
            .instance
            .invoke::<Fmi2, _>(|f, c| unsafe { (f.common.fmi2Reset)(c) })?;
        self.instance.transition(Transition::Reset);
        Ok(self.instance.finish::<Fmi2>(raw, "Reset", format_args!("")))
    }

    impl_getter_setter!(
        binding::fmi2Real,
        Values::Float64,
        get_real,
        set_real,
        fmi2GetReal,
        fmi2SetReal
    );
    impl_getter_setter!(
        binding::fmi2Integer,
        Values::Int32,
        get_integer,
        set_integer,
        fmi2GetInteger,
        fmi2SetInteger
    );
    impl_getter_setter!(
        binding::fmi2Boolean,
        booleans,
        get_boolean,
        set_boolean,
        fmi2GetBoolean,
        fmi2SetBoolean
    );

    /// Read string variables. The strings are copied out of the FMU before returning.
    pub fn get_string(
        &mut self,
        vr: &[binding::fmi2ValueReference],
        values: &mut [String],
    ) -> Result<Status, Error> {
        check_len(vr.len(), values.len())?;
        let mut ptrs: Vec<binding::fmi2String> = Vec::new();
        ptrs.try_reserve_exact(vr.len())?;
        ptrs.resize(vr.len(), std::ptr::null());

        let raw = self.instance.invoke::<Fmi2, _>(|f, c| unsafe {
            (f.common.fmi2GetString)(c, vr.as_ptr(), vr.len(), ptrs.as_mut_ptr())
        })?;
        let status = self.instance.finish::<Fmi2>(
            raw,
            "GetString",
            format_args!(
                "vr={{{}}}, nvr={}, value={{{}}}",
                Values::ValueReference(vr),
                vr.len(),
                Values::String(unsafe { Strings::new(&ptrs) })
            ),
        );

        if !status.is_error() {
            for (value, ptr) in values.iter_mut().zip(&ptrs) {
                *value = unsafe { fmu_str(*ptr) }.into_owned();
            }
        }
        Ok(status)
    }

    pub fn set_string(
        &mut self,
        vr: &[binding::fmi2ValueReference],
        values: &[&str],
    ) -> Result<Status, Error> {
        check_len(vr.len(), values.len())?;
        let values = c_strings(values)?;
        let ptrs = try_collect(values.iter().map(|v| v.as_ptr()))?;

        let raw = self.instance.invoke::<Fmi2, _>(|f, c| unsafe {
            (f.common.fmi2SetString)(c, vr.as_ptr(), vr.len(), ptrs.as_ptr())
        })?;
        Ok(self.instance.finish::<Fmi2>(
            raw,
            "SetString",
            format_args!(
                "vr={{{}}}, nvr={}, value={{{}}}",
                Values::ValueReference(vr),
                vr.len(),
                Values::String(unsafe { Strings::new(&ptrs) })
            ),
        ))
    }

    /// Store a copy of the FMU state in `state`. Pass a null state to allocate a new one.
    pub fn get_fmu_state(&mut self, state: &mut binding::fmi2FMUstate) -> Result<Status, Error> {
        let raw = self.instance.invoke::<Fmi2, _>(|f, c| {
            resolved(f.common.fmi2GetFMUstate, "fmi2GetFMUstate")
                .map(|get| unsafe { get(c, &mut *state) })
        })??;
        Ok(self
            .instance
            .finish::<Fmi2>(raw, "GetFMUstate", format_args!("FMUstate={:p}", *state)))
    }

    pub fn set_fmu_state(&mut self, state: binding::fmi2FMUstate) -> Result<Status, Error> {
        let raw = self.instance.invoke::<Fmi2, _>(|f, c| {
            resolved(f.common.fmi2SetFMUstate, "fmi2SetFMUstate")
                .map(|set| unsafe { set(c, state) })
        })??;
        Ok(self
            .instance
            .finish::<Fmi2>(raw, "SetFMUstate", format_args!("FMUstate={state:p}")))
    }

    pub fn free_fmu_state(&mut self, state: &mut binding::fmi2FMUstate) -> Result<Status, Error> {
        let freed = *state;
        let raw = self.instance.invoke::<Fmi2, _>(|f, c| {
            resolved(f.common.fmi2FreeFMUstate, "fmi2FreeFMUstate")
                .map(|free| unsafe { free(c, &mut *state) })
        })??;
        Ok(self
            .instance
            .finish::<Fmi2>(raw, "FreeFMUstate", format_args!("FMUstate={freed:p}")))
    }

    pub fn serialized_fmu_state_size(
        &mut self,
        state: binding::fmi2FMUstate,
        size: &mut usize,
    ) -> Result<Status, Error> {
        let raw = self.instance.invoke::<Fmi2, _>(|f, c| {
            resolved(
                f.common.fmi2SerializedFMUstateSize,
                "fmi2SerializedFMUstateSize",
            )
            .map(|get| unsafe { get(c, state, &mut *size) })
        })??;
        Ok(self.instance.finish::<Fmi2>(
            raw,
            "SerializedFMUstateSize",
            format_args!("FMUstate={state:p}, size={size}"),
        ))
    }

    pub fn serialize_fmu_state(
        &mut self,
        state: binding::fmi2FMUstate,
        serialized_state: &mut [u8],
    ) -> Result<Status, Error> {
        let size = serialized_state.len();
        let ptr = serialized_state.as_mut_ptr();
        let raw = self.instance.invoke::<Fmi2, _>(|f, c| {
            resolved(f.common.fmi2SerializeFMUstate, "fmi2SerializeFMUstate")
                .map(|serialize| unsafe { serialize(c, state, ptr.cast(), size) })
        })??;
        Ok(self.instance.finish::<Fmi2>(
            raw,
            "SerializeFMUstate",
            format_args!("FMUstate={state:p}, serializedState={ptr:p}, size={size}"),
        ))
    }

    pub fn deserialize_fmu_state(
        &mut self,
        serialized_state: &[u8],
        state: &mut binding::fmi2FMUstate,
    ) -> Result<Status, Error> {
        let size = serialized_state.len();
        let ptr = serialized_state.as_ptr();
        let raw = self.instance.invoke::<Fmi2, _>(|f, c| {
            resolved(f.common.fmi2DeSerializeFMUstate, "fmi2DeSerializeFMUstate")
                .map(|deserialize| unsafe { deserialize(c, ptr.cast(), size, &mut *state) })
        })??;
        Ok(self.instance.finish::<Fmi2>(
            raw,
            "DeSerializeFMUstate",
            format_args!("serializedState={ptr:p}, size={size}, FMUstate={:p}", *state),
        ))
    }

    pub fn get_directional_derivative(
        &mut self,
        unknown_refs: &[binding::fmi2ValueReference],
        known_refs: &[binding::fmi2ValueReference],
        dv_known: &[f64],
        dv_unknown: &mut [f64],
    ) -> Result<Status, Error> {
        check_len(known_refs.len(), dv_known.len())?;
        check_len(unknown_refs.len(), dv_unknown.len())?;
        let raw = self.instance.invoke::<Fmi2, _>(|f, c| {
            resolved(
                f.common.fmi2GetDirectionalDerivative,
                "fmi2GetDirectionalDerivative",
            )
            .map(|get| unsafe {
                get(
                    c,
                    unknown_refs.as_ptr(),
                    unknown_refs.len(),
                    known_refs.as_ptr(),
                    known_refs.len(),
                    dv_known.as_ptr(),
                    dv_unknown.as_mut_ptr(),
                )
            })
        })??;
        Ok(self.instance.finish::<Fmi2>(
            raw,
            "GetDirectionalDerivative",
            format_args!(
                "vUnknown_ref={{{}}}, nUnknown={}, vKnown_ref={{{}}}, nKnown={}, \
                 dvKnown={{{}}}, dvUnknown={{{}}}",
                Values::ValueReference(unknown_refs),
                unknown_refs.len(),
                Values::ValueReference(known_refs),
                known_refs.len(),
                Values::Float64(dv_known),
                Values::Float64(dv_unknown)
            ),
        ))
    }
}
