use super::Fmi3Instance;
use crate::{
    buffer::{c_strings, filled, try_collect, Binaries, Booleans, GFloat, Strings, Values},
    dispatch::{resolved, VersionDescriptor},
    fmi3::{binding, Fmi3},
    logger::fmu_str,
    EventFlags, Error, State, Status, Transition,
};

/// One entry of the dependency information returned by
/// [`Fmi3Instance::get_variable_dependencies`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VariableDependency {
    /// Element index of the dependent variable, 0 for all elements.
    pub dependent_element_index: usize,
    /// Value reference of the independent variable.
    pub independent: binding::fmi3ValueReference,
    /// Element index of the independent variable, 0 for all elements.
    pub independent_element_index: usize,
    pub dependency_kind: binding::fmi3DependencyKind,
}

fn booleans(values: &[bool]) -> Values<'_> {
    Values::Boolean(Booleans::Fmi3(values))
}

fn check_len(expected: usize, found: usize) -> Result<(), Error> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::ArrayLength { expected, found })
    }
}

/// `get_<name>`/`set_<name>` for the numeric and boolean types, which all share the
/// `(valueReferences, nValueReferences, values, nValues)` signature.
macro_rules! impl_getter_setter {
    ($($name:ident: $ty:ty => $values:expr),* $(,)?) => {
        paste::paste! {
            $(
                pub fn [<get_ $name:lower>](
                    &mut self,
                    vr: &[binding::fmi3ValueReference],
                    values: &mut [$ty],
                ) -> Result<Status, Error> {
                    let raw = self.instance.invoke::<Fmi3, _>(|f, c| unsafe {
                        (f.common.[<fmi3Get $name>])(
                            c,
                            vr.as_ptr(),
                            vr.len(),
                            values.as_mut_ptr(),
                            values.len(),
                        )
                    })?;
                    Ok(self.instance.finish::<Fmi3>(
                        raw,
                        concat!("Get", stringify!($name)),
                        format_args!(
                            "valueReferences={{{}}}, nValueReferences={}, values={{{}}}, \
                             nValues={}",
                            Values::ValueReference(vr),
                            vr.len(),
                            ($values)(&*values),
                            values.len()
                        ),
                    ))
                }

                pub fn [<set_ $name:lower>](
                    &mut self,
                    vr: &[binding::fmi3ValueReference],
                    values: &[$ty],
                ) -> Result<Status, Error> {
                    let raw = self.instance.invoke::<Fmi3, _>(|f, c| unsafe {
                        (f.common.[<fmi3Set $name>])(
                            c,
                            vr.as_ptr(),
                            vr.len(),
                            values.as_ptr(),
                            values.len(),
                        )
                    })?;
                    Ok(self.instance.finish::<Fmi3>(
                        raw,
                        concat!("Set", stringify!($name)),
                        format_args!(
                            "valueReferences={{{}}}, nValueReferences={}, values={{{}}}, \
                             nValues={}",
                            Values::ValueReference(vr),
                            vr.len(),
                            ($values)(values),
                            values.len()
                        ),
                    ))
                }
            )*
        }
    };
}

impl Fmi3Instance<'_> {
    pub fn get_version(&mut self) -> Result<String, Error> {
        let version = self.instance.invoke::<Fmi3, _>(|f, _| {
            unsafe { fmu_str((f.common.fmi3GetVersion)()) }.into_owned()
        })?;
        self.instance
            .log_call(Fmi3::PREFIX, "GetVersion", Status::OK, format_args!(""));
        Ok(version)
    }

    pub fn set_debug_logging(
        &mut self,
        logging_on: bool,
        categories: &[&str],
    ) -> Result<Status, Error> {
        let categories = c_strings(categories)?;
        let category_ptrs = try_collect(categories.iter().map(|c| c.as_ptr()))?;

        let raw = self.instance.invoke::<Fmi3, _>(|f, c| unsafe {
            (f.common.fmi3SetDebugLogging)(
                c,
                logging_on,
                category_ptrs.len(),
                category_ptrs.as_ptr(),
            )
        })?;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "SetDebugLogging",
            format_args!(
                "loggingOn={}, nCategories={}, categories={{{}}}",
                logging_on as u8,
                category_ptrs.len(),
                Values::String(unsafe { Strings::new(&category_ptrs) })
            ),
        ))
    }

    /// Also sets the time of the instance to `start_time`.
    pub fn enter_initialization_mode(
        &mut self,
        tolerance: Option<f64>,
        start_time: f64,
        stop_time: Option<f64>,
    ) -> Result<Status, Error> {
        let raw = self.instance.invoke::<Fmi3, _>(|f, c| unsafe {
            (f.common.fmi3EnterInitializationMode)(
                c,
                tolerance.is_some(),
                tolerance.unwrap_or_default(),
                start_time,
                stop_time.is_some(),
                stop_time.unwrap_or_default(),
            )
        })?;
        self.instance.time = start_time;
        self.instance.transition(Transition::EnterInitializationMode);
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "EnterInitializationMode",
            format_args!(
                "toleranceDefined={}, tolerance={}, startTime={}, stopTimeDefined={}, \
                 stopTime={}",
                tolerance.is_some() as u8,
                GFloat::f64(tolerance.unwrap_or_default()),
                GFloat::f64(start_time),
                stop_time.is_some() as u8,
                GFloat::f64(stop_time.unwrap_or_default())
            ),
        ))
    }

    /// Leave Initialization Mode. Co-Simulation instances continue in Event Mode if they were
    /// instantiated with `event_mode_used`, otherwise in Step Mode.
    pub fn exit_initialization_mode(&mut self) -> Result<Status, Error> {
        let raw = self.instance.invoke::<Fmi3, _>(|f, c| unsafe {
            (f.common.fmi3ExitInitializationMode)(c)
        })?;
        self.instance.transition(Transition::ExitInitializationMode {
            event_mode_used: self.instance.event_mode_used,
        });
        Ok(self
            .instance
            .finish::<Fmi3>(raw, "ExitInitializationMode", format_args!("")))
    }

    pub fn enter_event_mode(&mut self) -> Result<Status, Error> {
        let raw = self
            .instance
            .invoke::<Fmi3, _>(|f, c| unsafe { (f.common.fmi3EnterEventMode)(c) })?;
        self.instance.transition(Transition::EnterEventMode);
        Ok(self
            .instance
            .finish::<Fmi3>(raw, "EnterEventMode", format_args!("")))
    }

    pub fn terminate(&mut self) -> Result<Status, Error> {
        let raw = self
            .instance
            .invoke::<Fmi3, _>(|f, c| unsafe { (f.common.fmi3Terminate)(c) })?;
        self.instance.transition(Transition::Terminate);
        Ok(self.instance.finish::<Fmi3>(raw, "Terminate", format_args!("")))
    }

    /// Reset the FMU to the state after instantiation. Also clears the worst status of the
    /// instance.
    pub fn reset(&mut self) -> Result<Status, Error> {
        self.instance.status = Status::OK;
        let raw = self
            .instance
            .invoke::<Fmi3, _>(|f, c| unsafe { (f.common.fmi3Reset)(c) })?;
        self.instance.transition(Transition::Reset);
        Ok(self.instance.finish::<Fmi3>(raw, "Reset", format_args!("")))
    }

    impl_getter_setter! {
        Float32: f32 => Values::Float32,
        Float64: f64 => Values::Float64,
        Int8: i8 => Values::Int8,
        UInt8: u8 => Values::UInt8,
        Int16: i16 => Values::Int16,
        UInt16: u16 => Values::UInt16,
        Int32: i32 => Values::Int32,
        UInt32: u32 => Values::UInt32,
        Int64: i64 => Values::Int64,
        UInt64: u64 => Values::UInt64,
        Boolean: bool => booleans,
    }

    /// Read string variables. The strings are copied out of the FMU before returning.
    pub fn get_string(
        &mut self,
        vr: &[binding::fmi3ValueReference],
        values: &mut [String],
    ) -> Result<Status, Error> {
        let mut ptrs: Vec<binding::fmi3String> = Vec::new();
        ptrs.try_reserve_exact(values.len())?;
        ptrs.resize(values.len(), std::ptr::null());

        let raw = self.instance.invoke::<Fmi3, _>(|f, c| unsafe {
            (f.common.fmi3GetString)(c, vr.as_ptr(), vr.len(), ptrs.as_mut_ptr(), ptrs.len())
        })?;
        let status = self.instance.finish::<Fmi3>(
            raw,
            "GetString",
            format_args!(
                "valueReferences={{{}}}, nValueReferences={}, values={{{}}}, nValues={}",
                Values::ValueReference(vr),
                vr.len(),
                Values::String(unsafe { Strings::new(&ptrs) }),
                ptrs.len()
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
        vr: &[binding::fmi3ValueReference],
        values: &[&str],
    ) -> Result<Status, Error> {
        let values = c_strings(values)?;
        let ptrs = try_collect(values.iter().map(|v| v.as_ptr()))?;

        let raw = self.instance.invoke::<Fmi3, _>(|f, c| unsafe {
            (f.common.fmi3SetString)(c, vr.as_ptr(), vr.len(), ptrs.as_ptr(), ptrs.len())
        })?;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "SetString",
            format_args!(
                "valueReferences={{{}}}, nValueReferences={}, values={{{}}}, nValues={}",
                Values::ValueReference(vr),
                vr.len(),
                Values::String(unsafe { Strings::new(&ptrs) }),
                ptrs.len()
            ),
        ))
    }

    /// Read binary variables. The bytes are copied out of the FMU before returning.
    pub fn get_binary(
        &mut self,
        vr: &[binding::fmi3ValueReference],
        values: &mut [Vec<u8>],
    ) -> Result<Status, Error> {
        let mut sizes: Vec<usize> = Vec::new();
        sizes.try_reserve_exact(values.len())?;
        sizes.resize(values.len(), 0);
        let mut ptrs: Vec<binding::fmi3Binary> = Vec::new();
        ptrs.try_reserve_exact(values.len())?;
        ptrs.resize(values.len(), std::ptr::null());

        let raw = self.instance.invoke::<Fmi3, _>(|f, c| unsafe {
            (f.common.fmi3GetBinary)(
                c,
                vr.as_ptr(),
                vr.len(),
                sizes.as_mut_ptr(),
                ptrs.as_mut_ptr(),
                ptrs.len(),
            )
        })?;
        let status = self.instance.finish::<Fmi3>(
            raw,
            "GetBinary",
            format_args!(
                "valueReferences={{{}}}, nValueReferences={}, sizes={{{}}}, values={{{}}}, \
                 nValues={}",
                Values::ValueReference(vr),
                vr.len(),
                Values::SizeT(&sizes),
                Values::Binary(unsafe { Binaries::new(&sizes, &ptrs) }),
                ptrs.len()
            ),
        );

        if !status.is_error() {
            for ((value, ptr), size) in values.iter_mut().zip(&ptrs).zip(&sizes) {
                value.clear();
                if !ptr.is_null() {
                    value.try_reserve_exact(*size)?;
                    value.extend_from_slice(unsafe { std::slice::from_raw_parts(*ptr, *size) });
                }
            }
        }
        Ok(status)
    }

    pub fn set_binary(
        &mut self,
        vr: &[binding::fmi3ValueReference],
        values: &[&[u8]],
    ) -> Result<Status, Error> {
        let sizes = try_collect(values.iter().map(|v| v.len()))?;
        let ptrs = try_collect(values.iter().map(|v| v.as_ptr()))?;

        let raw = self.instance.invoke::<Fmi3, _>(|f, c| unsafe {
            (f.common.fmi3SetBinary)(
                c,
                vr.as_ptr(),
                vr.len(),
                sizes.as_ptr(),
                ptrs.as_ptr(),
                ptrs.len(),
            )
        })?;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "SetBinary",
            format_args!(
                "valueReferences={{{}}}, nValueReferences={}, sizes={{{}}}, values={{{}}}, \
                 nValues={}",
                Values::ValueReference(vr),
                vr.len(),
                Values::SizeT(&sizes),
                Values::Binary(unsafe { Binaries::new(&sizes, &ptrs) }),
                ptrs.len()
            ),
        ))
    }

    /// Clocks have exactly one value per value reference.
    pub fn get_clock(
        &mut self,
        vr: &[binding::fmi3ValueReference],
        values: &mut [binding::fmi3Clock],
    ) -> Result<Status, Error> {
        check_len(vr.len(), values.len())?;
        let raw = self.instance.invoke::<Fmi3, _>(|f, c| unsafe {
            (f.common.fmi3GetClock)(c, vr.as_ptr(), vr.len(), values.as_mut_ptr())
        })?;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "GetClock",
            format_args!(
                "valueReferences={{{}}}, nValueReferences={}, values={{{}}}",
                Values::ValueReference(vr),
                vr.len(),
                Values::Clock(values)
            ),
        ))
    }

    pub fn set_clock(
        &mut self,
        vr: &[binding::fmi3ValueReference],
        values: &[binding::fmi3Clock],
    ) -> Result<Status, Error> {
        check_len(vr.len(), values.len())?;
        let raw = self.instance.invoke::<Fmi3, _>(|f, c| unsafe {
            (f.common.fmi3SetClock)(c, vr.as_ptr(), vr.len(), values.as_ptr())
        })?;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "SetClock",
            format_args!(
                "valueReferences={{{}}}, nValueReferences={}, values={{{}}}",
                Values::ValueReference(vr),
                vr.len(),
                Values::Clock(values)
            ),
        ))
    }

    pub fn get_number_of_variable_dependencies(
        &mut self,
        vr: binding::fmi3ValueReference,
        n_dependencies: &mut usize,
    ) -> Result<Status, Error> {
        let raw = self.instance.invoke::<Fmi3, _>(|f, c| unsafe {
            (f.common.fmi3GetNumberOfVariableDependencies)(c, vr, &mut *n_dependencies)
        })?;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "GetNumberOfVariableDependencies",
            format_args!("valueReference={vr}, nDependencies={n_dependencies}"),
        ))
    }

    /// Fill `dependencies` with the dependencies of `dependent`. The slice should have the length
    /// reported by [`Self::get_number_of_variable_dependencies`].
    pub fn get_variable_dependencies(
        &mut self,
        dependent: binding::fmi3ValueReference,
        dependencies: &mut [VariableDependency],
    ) -> Result<Status, Error> {
        let n = dependencies.len();
        let mut element_indices_of_dependent = filled(n, 0usize)?;
        let mut independents = filled(n, 0)?;
        let mut element_indices_of_independents = filled(n, 0usize)?;
        let mut dependency_kinds = filled(n, binding::fmi3DependencyKind_fmi3Dependent)?;

        let raw = self.instance.invoke::<Fmi3, _>(|f, c| unsafe {
            (f.common.fmi3GetVariableDependencies)(
                c,
                dependent,
                element_indices_of_dependent.as_mut_ptr(),
                independents.as_mut_ptr(),
                element_indices_of_independents.as_mut_ptr(),
                dependency_kinds.as_mut_ptr(),
                n,
            )
        })?;
        let status = self.instance.finish::<Fmi3>(
            raw,
            "GetVariableDependencies",
            format_args!(
                "dependent={dependent}, elementIndicesOfDependent={{{}}}, independents={{{}}}, \
                 elementIndicesOfIndependents={{{}}}, dependencyKinds={{{}}}, nDependencies={n}",
                Values::SizeT(&element_indices_of_dependent),
                Values::ValueReference(&independents),
                Values::SizeT(&element_indices_of_independents),
                Values::UInt32(&dependency_kinds)
            ),
        );

        for (i, dependency) in dependencies.iter_mut().enumerate() {
            *dependency = VariableDependency {
                dependent_element_index: element_indices_of_dependent[i],
                independent: independents[i],
                independent_element_index: element_indices_of_independents[i],
                dependency_kind: dependency_kinds[i],
            };
        }
        Ok(status)
    }

    pub fn get_fmu_state(&mut self, state: &mut binding::fmi3FMUState) -> Result<Status, Error> {
        let raw = self.instance.invoke::<Fmi3, _>(|f, c| {
            resolved(f.common.fmi3GetFMUState, "fmi3GetFMUState")
                .map(|get| unsafe { get(c, &mut *state) })
        })??;
        Ok(self
            .instance
            .finish::<Fmi3>(raw, "GetFMUState", format_args!("FMUState={:p}", *state)))
    }

    pub fn set_fmu_state(&mut self, state: binding::fmi3FMUState) -> Result<Status, Error> {
        let raw = self.instance.invoke::<Fmi3, _>(|f, c| {
            resolved(f.common.fmi3SetFMUState, "fmi3SetFMUState")
                .map(|set| unsafe { set(c, state) })
        })??;
        Ok(self
            .instance
            .finish::<Fmi3>(raw, "SetFMUState", format_args!("FMUState={state:p}")))
    }

    pub fn free_fmu_state(&mut self, state: &mut binding::fmi3FMUState) -> Result<Status, Error> {
        let freed = *state;
        let raw = self.instance.invoke::<Fmi3, _>(|f, c| {
            resolved(f.common.fmi3FreeFMUState, "fmi3FreeFMUState")
                .map(|free| unsafe { free(c, &mut *state) })
        })??;
        Ok(self
            .instance
            .finish::<Fmi3>(raw, "FreeFMUState", format_args!("FMUState={freed:p}")))
    }

    pub fn serialized_fmu_state_size(
        &mut self,
        state: binding::fmi3FMUState,
        size: &mut usize,
    ) -> Result<Status, Error> {
        let raw = self.instance.invoke::<Fmi3, _>(|f, c| {
            resolved(
                f.common.fmi3SerializedFMUStateSize,
                "fmi3SerializedFMUStateSize",
            )
            .map(|get| unsafe { get(c, state, &mut *size) })
        })??;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "SerializedFMUStateSize",
            format_args!("FMUState={state:p}, size={size}"),
        ))
    }

    pub fn serialize_fmu_state(
        &mut self,
        state: binding::fmi3FMUState,
        serialized_state: &mut [u8],
    ) -> Result<Status, Error> {
        let size = serialized_state.len();
        let ptr = serialized_state.as_mut_ptr();
        let raw = self.instance.invoke::<Fmi3, _>(|f, c| {
            resolved(f.common.fmi3SerializeFMUState, "fmi3SerializeFMUState")
                .map(|serialize| unsafe { serialize(c, state, ptr, size) })
        })??;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "SerializeFMUState",
            format_args!("FMUState={state:p}, serializedState={ptr:p}, size={size}"),
        ))
    }

    pub fn deserialize_fmu_state(
        &mut self,
        serialized_state: &[u8],
        state: &mut binding::fmi3FMUState,
    ) -> Result<Status, Error> {
        let size = serialized_state.len();
        let ptr = serialized_state.as_ptr();
        let raw = self.instance.invoke::<Fmi3, _>(|f, c| {
            resolved(f.common.fmi3DeserializeFMUState, "fmi3DeserializeFMUState")
                .map(|deserialize| unsafe { deserialize(c, ptr, size, &mut *state) })
        })??;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "DeserializeFMUState",
            format_args!("serializedState={ptr:p}, size={size}, FMUState={:p}", *state),
        ))
    }

    pub fn get_directional_derivative(
        &mut self,
        unknowns: &[binding::fmi3ValueReference],
        knowns: &[binding::fmi3ValueReference],
        seed: &[f64],
        sensitivity: &mut [f64],
    ) -> Result<Status, Error> {
        let raw = self.instance.invoke::<Fmi3, _>(|f, c| {
            resolved(
                f.common.fmi3GetDirectionalDerivative,
                "fmi3GetDirectionalDerivative",
            )
            .map(|get| unsafe {
                get(
                    c,
                    unknowns.as_ptr(),
                    unknowns.len(),
                    knowns.as_ptr(),
                    knowns.len(),
                    seed.as_ptr(),
                    seed.len(),
                    sensitivity.as_mut_ptr(),
                    sensitivity.len(),
                )
            })
        })??;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "GetDirectionalDerivative",
            format_args!(
                "unknowns={{{}}}, nUnknowns={}, knowns={{{}}}, nKnowns={}, seed={{{}}}, \
                 nSeed={}, sensitivity={{{}}}, nSensitivity={}",
                Values::ValueReference(unknowns),
                unknowns.len(),
                Values::ValueReference(knowns),
                knowns.len(),
                Values::Float64(seed),
                seed.len(),
                Values::Float64(sensitivity),
                sensitivity.len()
            ),
        ))
    }

    pub fn get_adjoint_derivative(
        &mut self,
        unknowns: &[binding::fmi3ValueReference],
        knowns: &[binding::fmi3ValueReference],
        seed: &[f64],
        sensitivity: &mut [f64],
    ) -> Result<Status, Error> {
        let raw = self.instance.invoke::<Fmi3, _>(|f, c| {
            resolved(
                f.common.fmi3GetAdjointDerivative,
                "fmi3GetAdjointDerivative",
            )
            .map(|get| unsafe {
                get(
                    c,
                    unknowns.as_ptr(),
                    unknowns.len(),
                    knowns.as_ptr(),
                    knowns.len(),
                    seed.as_ptr(),
                    seed.len(),
                    sensitivity.as_mut_ptr(),
                    sensitivity.len(),
                )
            })
        })??;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "GetAdjointDerivative",
            format_args!(
                "unknowns={{{}}}, nUnknowns={}, knowns={{{}}}, nKnowns={}, seed={{{}}}, \
                 nSeed={}, sensitivity={{{}}}, nSensitivity={}",
                Values::ValueReference(unknowns),
                unknowns.len(),
                Values::ValueReference(knowns),
                knowns.len(),
                Values::Float64(seed),
                seed.len(),
                Values::Float64(sensitivity),
                sensitivity.len()
            ),
        ))
    }

    /// Enter Configuration Mode from Instantiated, or Reconfiguration Mode from any other state.
    pub fn enter_configuration_mode(&mut self) -> Result<Status, Error> {
        let raw = self.instance.invoke::<Fmi3, _>(|f, c| unsafe {
            (f.common.fmi3EnterConfigurationMode)(c)
        })?;
        self.instance.transition(Transition::EnterConfigurationMode);
        Ok(self
            .instance
            .finish::<Fmi3>(raw, "EnterConfigurationMode", format_args!("")))
    }

    /// Leave (Re)configuration Mode.
    ///
    /// Outside of Configuration or Reconfiguration Mode the FMU is not called and
    /// [`Status::Error`] is returned.
    pub fn exit_configuration_mode(&mut self) -> Result<Status, Error> {
        if !matches!(
            self.instance.state,
            State::ConfigurationMode | State::ReconfigurationMode
        ) {
            log::error!(
                "Instance '{}': fmi3ExitConfigurationMode called in {:?}",
                self.instance.name(),
                self.instance.state
            );
            return Ok(Status::Error);
        }
        let raw = self.instance.invoke::<Fmi3, _>(|f, c| unsafe {
            (f.common.fmi3ExitConfigurationMode)(c)
        })?;
        self.instance.transition(Transition::ExitConfigurationMode);
        Ok(self
            .instance
            .finish::<Fmi3>(raw, "ExitConfigurationMode", format_args!("")))
    }

    pub fn get_interval_decimal(
        &mut self,
        vr: &[binding::fmi3ValueReference],
        intervals: &mut [f64],
        qualifiers: &mut [binding::fmi3IntervalQualifier],
    ) -> Result<Status, Error> {
        check_len(vr.len(), intervals.len())?;
        check_len(vr.len(), qualifiers.len())?;
        let raw = self.instance.invoke::<Fmi3, _>(|f, c| unsafe {
            (f.common.fmi3GetIntervalDecimal)(
                c,
                vr.as_ptr(),
                vr.len(),
                intervals.as_mut_ptr(),
                qualifiers.as_mut_ptr(),
            )
        })?;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "GetIntervalDecimal",
            format_args!(
                "valueReferences={{{}}}, nValueReferences={}, intervals={{{}}}, \
                 qualifiers={{{}}}",
                Values::ValueReference(vr),
                vr.len(),
                Values::Float64(intervals),
                Values::UInt32(qualifiers)
            ),
        ))
    }

    pub fn get_interval_fraction(
        &mut self,
        vr: &[binding::fmi3ValueReference],
        counters: &mut [u64],
        resolutions: &mut [u64],
        qualifiers: &mut [binding::fmi3IntervalQualifier],
    ) -> Result<Status, Error> {
        check_len(vr.len(), counters.len())?;
        check_len(vr.len(), resolutions.len())?;
        check_len(vr.len(), qualifiers.len())?;
        let raw = self.instance.invoke::<Fmi3, _>(|f, c| unsafe {
            (f.common.fmi3GetIntervalFraction)(
                c,
                vr.as_ptr(),
                vr.len(),
                counters.as_mut_ptr(),
                resolutions.as_mut_ptr(),
                qualifiers.as_mut_ptr(),
            )
        })?;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "GetIntervalFraction",
            format_args!(
                "valueReferences={{{}}}, nValueReferences={}, intervalCounters={{{}}}, \
                 resolutions={{{}}}, qualifiers={{{}}}",
                Values::ValueReference(vr),
                vr.len(),
                Values::UInt64(counters),
                Values::UInt64(resolutions),
                Values::UInt32(qualifiers)
            ),
        ))
    }

    pub fn get_shift_decimal(
        &mut self,
        vr: &[binding::fmi3ValueReference],
        shifts: &mut [f64],
    ) -> Result<Status, Error> {
        check_len(vr.len(), shifts.len())?;
        let raw = self.instance.invoke::<Fmi3, _>(|f, c| unsafe {
            (f.common.fmi3GetShiftDecimal)(c, vr.as_ptr(), vr.len(), shifts.as_mut_ptr())
        })?;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "GetShiftDecimal",
            format_args!(
                "valueReferences={{{}}}, nValueReferences={}, shifts={{{}}}",
                Values::ValueReference(vr),
                vr.len(),
                Values::Float64(shifts)
            ),
        ))
    }

    pub fn get_shift_fraction(
        &mut self,
        vr: &[binding::fmi3ValueReference],
        counters: &mut [u64],
        resolutions: &mut [u64],
    ) -> Result<Status, Error> {
        check_len(vr.len(), counters.len())?;
        check_len(vr.len(), resolutions.len())?;
        let raw = self.instance.invoke::<Fmi3, _>(|f, c| unsafe {
            (f.common.fmi3GetShiftFraction)(
                c,
                vr.as_ptr(),
                vr.len(),
                counters.as_mut_ptr(),
                resolutions.as_mut_ptr(),
            )
        })?;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "GetShiftFraction",
            format_args!(
                "valueReferences={{{}}}, nValueReferences={}, shiftCounters={{{}}}, \
                 resolutions={{{}}}",
                Values::ValueReference(vr),
                vr.len(),
                Values::UInt64(counters),
                Values::UInt64(resolutions)
            ),
        ))
    }

    pub fn set_interval_decimal(
        &mut self,
        vr: &[binding::fmi3ValueReference],
        intervals: &[f64],
    ) -> Result<Status, Error> {
        check_len(vr.len(), intervals.len())?;
        let raw = self.instance.invoke::<Fmi3, _>(|f, c| unsafe {
            (f.common.fmi3SetIntervalDecimal)(c, vr.as_ptr(), vr.len(), intervals.as_ptr())
        })?;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "SetIntervalDecimal",
            format_args!(
                "valueReferences={{{}}}, nValueReferences={}, intervals={{{}}}",
                Values::ValueReference(vr),
                vr.len(),
                Values::Float64(intervals)
            ),
        ))
    }

    pub fn set_interval_fraction(
        &mut self,
        vr: &[binding::fmi3ValueReference],
        counters: &[u64],
        resolutions: &[u64],
    ) -> Result<Status, Error> {
        check_len(vr.len(), counters.len())?;
        check_len(vr.len(), resolutions.len())?;
        let raw = self.instance.invoke::<Fmi3, _>(|f, c| unsafe {
            (f.common.fmi3SetIntervalFraction)(
                c,
                vr.as_ptr(),
                vr.len(),
                counters.as_ptr(),
                resolutions.as_ptr(),
            )
        })?;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "SetIntervalFraction",
            format_args!(
                "valueReferences={{{}}}, nValueReferences={}, intervalCounters={{{}}}, \
                 resolutions={{{}}}",
                Values::ValueReference(vr),
                vr.len(),
                Values::UInt64(counters),
                Values::UInt64(resolutions)
            ),
        ))
    }

    pub fn set_shift_decimal(
        &mut self,
        vr: &[binding::fmi3ValueReference],
        shifts: &[f64],
    ) -> Result<Status, Error> {
        check_len(vr.len(), shifts.len())?;
        let raw = self.instance.invoke::<Fmi3, _>(|f, c| {
            resolved(f.common.fmi3SetShiftDecimal, "fmi3SetShiftDecimal")
                .map(|set| unsafe { set(c, vr.as_ptr(), vr.len(), shifts.as_ptr()) })
        })??;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "SetShiftDecimal",
            format_args!(
                "valueReferences={{{}}}, nValueReferences={}, shifts={{{}}}",
                Values::ValueReference(vr),
                vr.len(),
                Values::Float64(shifts)
            ),
        ))
    }

    pub fn set_shift_fraction(
        &mut self,
        vr: &[binding::fmi3ValueReference],
        counters: &[u64],
        resolutions: &[u64],
    ) -> Result<Status, Error> {
        check_len(vr.len(), counters.len())?;
        check_len(vr.len(), resolutions.len())?;
        let raw = self.instance.invoke::<Fmi3, _>(|f, c| {
            resolved(f.common.fmi3SetShiftFraction, "fmi3SetShiftFraction").map(|set| unsafe {
                set(
                    c,
                    vr.as_ptr(),
                    vr.len(),
                    counters.as_ptr(),
                    resolutions.as_ptr(),
                )
            })
        })??;
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "SetShiftFraction",
            format_args!(
                "valueReferences={{{}}}, nValueReferences={}, shiftCounters={{{}}}, \
                 resolutions={{{}}}",
                Values::ValueReference(vr),
                vr.len(),
                Values::UInt64(counters),
                Values::UInt64(resolutions)
            ),
        ))
    }

    pub fn evaluate_discrete_states(&mut self) -> Result<Status, Error> {
        let raw = self.instance.invoke::<Fmi3, _>(|f, c| unsafe {
            (f.common.fmi3EvaluateDiscreteStates)(c)
        })?;
        Ok(self
            .instance
            .finish::<Fmi3>(raw, "EvaluateDiscreteStates", format_args!("")))
    }

    /// Run one event iteration and store its outcome in `event_flags`.
    pub fn update_discrete_states(
        &mut self,
        event_flags: &mut EventFlags,
    ) -> Result<Status, Error> {
        let mut discrete_states_need_update = false;
        let mut terminate_simulation = false;
        let mut nominals_changed = false;
        let mut values_changed = false;
        let mut next_event_time_defined = false;
        let mut next_event_time = 0.0;

        let raw = self.instance.invoke::<Fmi3, _>(|f, c| unsafe {
            (f.common.fmi3UpdateDiscreteStates)(
                c,
                &mut discrete_states_need_update,
                &mut terminate_simulation,
                &mut nominals_changed,
                &mut values_changed,
                &mut next_event_time_defined,
                &mut next_event_time,
            )
        })?;
        *event_flags = EventFlags {
            discrete_states_need_update,
            terminate_simulation,
            nominals_of_continuous_states_changed: nominals_changed,
            values_of_continuous_states_changed: values_changed,
            next_event_time: next_event_time_defined.then_some(next_event_time),
        };
        Ok(self.instance.finish::<Fmi3>(
            raw,
            "UpdateDiscreteStates",
            format_args!(
                "discreteStatesNeedUpdate={}, terminateSimulation={}, \
                 nominalsOfContinuousStatesChanged={}, valuesOfContinuousStatesChanged={}, \
                 nextEventTimeDefined={}, nextEventTime={}",
                discrete_states_need_update as u8,
                terminate_simulation as u8,
                nominals_changed as u8,
                values_changed as u8,
                next_event_time_defined as u8,
                GFloat::f64(next_event_time)
            ),
        ))
    }
}
