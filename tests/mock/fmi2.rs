//! A small FMI 2.0 model with eight variables of each type. Real variables 0 and 1 are the
//! continuous states of `der(x) = -x`.

use std::{
    ffi::{c_char, c_int, CStr, CString},
    slice,
};

use fmi_instance::{fmi2::binding, SymbolTable};

use super::symbols;

pub const GUID: &str = "{1AE5E10D-9521-4DE3-80B9-D0EAAA7D5AF1}";
pub const N: usize = 8;
pub const N_STATES: usize = 2;

struct Model {
    callbacks: binding::fmi2CallbackFunctions,
    name: CString,
    time: f64,
    reals: [f64; N],
    integers: [binding::fmi2Integer; N],
    booleans: [binding::fmi2Boolean; N],
    strings: Vec<CString>,
}

impl Model {
    fn new(name: CString, callbacks: binding::fmi2CallbackFunctions) -> Self {
        Self {
            callbacks,
            name,
            time: 0.0,
            reals: [1.0; N],
            integers: [0; N],
            booleans: [binding::fmi2False; N],
            strings: vec![CString::default(); N],
        }
    }

    unsafe fn get<'a>(c: binding::fmi2Component) -> &'a mut Model {
        unsafe { &mut *(c as *mut Model) }
    }

    fn log(&self, status: binding::fmi2Status, category: &CStr, message: &CStr) {
        if let Some(logger) = self.callbacks.logger {
            unsafe {
                logger(
                    self.callbacks.componentEnvironment,
                    self.name.as_ptr(),
                    status,
                    category.as_ptr(),
                    c"%s".as_ptr(),
                    message.as_ptr(),
                )
            }
        }
    }

    fn unknown_variable(&self) -> binding::fmi2Status {
        self.log(
            binding::fmi2Status_fmi2Error,
            c"logStatusError",
            c"Unknown value reference",
        );
        binding::fmi2Status_fmi2Error
    }
}

unsafe fn get_values<T: Copy>(
    c: binding::fmi2Component,
    vr: *const binding::fmi2ValueReference,
    nvr: usize,
    value: *mut T,
    variables: fn(&Model) -> &[T; N],
) -> binding::fmi2Status {
    let model = unsafe { Model::get(c) };
    let vr = unsafe { slice::from_raw_parts(vr, nvr) };
    let value = unsafe { slice::from_raw_parts_mut(value, nvr) };
    for (vr, value) in vr.iter().zip(value) {
        match variables(model).get(*vr as usize) {
            Some(v) => *value = *v,
            None => return model.unknown_variable(),
        }
    }
    binding::fmi2Status_fmi2OK
}

unsafe fn set_values<T: Copy>(
    c: binding::fmi2Component,
    vr: *const binding::fmi2ValueReference,
    nvr: usize,
    value: *const T,
    variables: fn(&mut Model) -> &mut [T; N],
) -> binding::fmi2Status {
    let model = unsafe { Model::get(c) };
    let vr = unsafe { slice::from_raw_parts(vr, nvr) };
    let value = unsafe { slice::from_raw_parts(value, nvr) };
    for (vr, value) in vr.iter().zip(value) {
        match variables(model).get_mut(*vr as usize) {
            Some(v) => *v = *value,
            None => return model.unknown_variable(),
        }
    }
    binding::fmi2Status_fmi2OK
}

unsafe extern "C" fn ok(_c: binding::fmi2Component) -> binding::fmi2Status {
    binding::fmi2Status_fmi2OK
}

unsafe extern "C" fn error(_c: binding::fmi2Component) -> binding::fmi2Status {
    binding::fmi2Status_fmi2Error
}

unsafe extern "C" fn get_types_platform() -> *const c_char {
    binding::fmi2TypesPlatform.as_ptr() as *const c_char
}

unsafe extern "C" fn get_version() -> *const c_char {
    binding::fmi2Version.as_ptr() as *const c_char
}

unsafe extern "C" fn set_debug_logging(
    _c: binding::fmi2Component,
    _logging_on: binding::fmi2Boolean,
    _n_categories: usize,
    _categories: *const binding::fmi2String,
) -> binding::fmi2Status {
    binding::fmi2Status_fmi2OK
}

unsafe extern "C" fn instantiate(
    instance_name: binding::fmi2String,
    _fmu_type: binding::fmi2Type,
    fmu_guid: binding::fmi2String,
    _fmu_resource_location: binding::fmi2String,
    functions: *const binding::fmi2CallbackFunctions,
    _visible: binding::fmi2Boolean,
    _logging_on: binding::fmi2Boolean,
) -> binding::fmi2Component {
    let name = unsafe { CStr::from_ptr(instance_name) }.to_owned();
    let callbacks = unsafe { *functions };
    let model = Model::new(name, callbacks);

    if unsafe { CStr::from_ptr(fmu_guid) }.to_bytes() != GUID.as_bytes() {
        model.log(
            binding::fmi2Status_fmi2Error,
            c"logStatusError",
            c"Wrong GUID",
        );
        return std::ptr::null_mut();
    }

    if let Some(logger) = callbacks.logger {
        unsafe {
            logger(
                callbacks.componentEnvironment,
                model.name.as_ptr(),
                binding::fmi2Status_fmi2OK,
                c"logEvents".as_ptr(),
                c"%s instantiated with %d variables".as_ptr(),
                model.name.as_ptr(),
                N as c_int,
            )
        }
    }
    Box::into_raw(Box::new(model)) as binding::fmi2Component
}

unsafe extern "C" fn free_instance(c: binding::fmi2Component) {
    drop(unsafe { Box::from_raw(c as *mut Model) });
}

unsafe extern "C" fn setup_experiment(
    c: binding::fmi2Component,
    _tolerance_defined: binding::fmi2Boolean,
    _tolerance: f64,
    start_time: f64,
    _stop_time_defined: binding::fmi2Boolean,
    _stop_time: f64,
) -> binding::fmi2Status {
    unsafe { Model::get(c) }.time = start_time;
    binding::fmi2Status_fmi2OK
}

unsafe extern "C" fn reset(c: binding::fmi2Component) -> binding::fmi2Status {
    let model = unsafe { Model::get(c) };
    *model = Model::new(model.name.clone(), model.callbacks);
    binding::fmi2Status_fmi2OK
}

unsafe extern "C" fn get_real(
    c: binding::fmi2Component,
    vr: *const binding::fmi2ValueReference,
    nvr: usize,
    value: *mut f64,
) -> binding::fmi2Status {
    unsafe { get_values(c, vr, nvr, value, |m| &m.reals) }
}

unsafe extern "C" fn get_integer(
    c: binding::fmi2Component,
    vr: *const binding::fmi2ValueReference,
    nvr: usize,
    value: *mut binding::fmi2Integer,
) -> binding::fmi2Status {
    unsafe { get_values(c, vr, nvr, value, |m| &m.integers) }
}

unsafe extern "C" fn get_boolean(
    c: binding::fmi2Component,
    vr: *const binding::fmi2ValueReference,
    nvr: usize,
    value: *mut binding::fmi2Boolean,
) -> binding::fmi2Status {
    unsafe { get_values(c, vr, nvr, value, |m| &m.booleans) }
}

unsafe extern "C" fn get_string(
    c: binding::fmi2Component,
    vr: *const binding::fmi2ValueReference,
    nvr: usize,
    value: *mut binding::fmi2String,
) -> binding::fmi2Status {
    let model = unsafe { Model::get(c) };
    let vr = unsafe { slice::from_raw_parts(vr, nvr) };
    let value = unsafe { slice::from_raw_parts_mut(value, nvr) };
    for (vr, value) in vr.iter().zip(value) {
        match model.strings.get(*vr as usize) {
            Some(s) => *value = s.as_ptr(),
            None => return model.unknown_variable(),
        }
    }
    binding::fmi2Status_fmi2OK
}

unsafe extern "C" fn set_real(
    c: binding::fmi2Component,
    vr: *const binding::fmi2ValueReference,
    nvr: usize,
    value: *const f64,
) -> binding::fmi2Status {
    unsafe { set_values(c, vr, nvr, value, |m| &mut m.reals) }
}

unsafe extern "C" fn set_integer(
    c: binding::fmi2Component,
    vr: *const binding::fmi2ValueReference,
    nvr: usize,
    value: *const binding::fmi2Integer,
) -> binding::fmi2Status {
    unsafe { set_values(c, vr, nvr, value, |m| &mut m.integers) }
}

unsafe extern "C" fn set_boolean(
    c: binding::fmi2Component,
    vr: *const binding::fmi2ValueReference,
    nvr: usize,
    value: *const binding::fmi2Boolean,
) -> binding::fmi2Status {
    unsafe { set_values(c, vr, nvr, value, |m| &mut m.booleans) }
}

unsafe extern "C" fn set_string(
    c: binding::fmi2Component,
    vr: *const binding::fmi2ValueReference,
    nvr: usize,
    value: *const binding::fmi2String,
) -> binding::fmi2Status {
    let model = unsafe { Model::get(c) };
    let vr = unsafe { slice::from_raw_parts(vr, nvr) };
    let value = unsafe { slice::from_raw_parts(value, nvr) };
    for (vr, value) in vr.iter().zip(value) {
        let s = unsafe { CStr::from_ptr(*value) }.to_owned();
        match model.strings.get_mut(*vr as usize) {
            Some(slot) => *slot = s,
            None => return model.unknown_variable(),
        }
    }
    binding::fmi2Status_fmi2OK
}

unsafe extern "C" fn get_fmu_state(
    c: binding::fmi2Component,
    state: *mut binding::fmi2FMUstate,
) -> binding::fmi2Status {
    let model = unsafe { Model::get(c) };
    let state = unsafe { &mut *state };
    if state.is_null() {
        *state = Box::into_raw(Box::new(model.reals)) as binding::fmi2FMUstate;
    } else {
        unsafe { *(*state as *mut [f64; N]) = model.reals };
    }
    binding::fmi2Status_fmi2OK
}

unsafe extern "C" fn set_fmu_state(
    c: binding::fmi2Component,
    state: binding::fmi2FMUstate,
) -> binding::fmi2Status {
    unsafe { Model::get(c) }.reals = unsafe { *(state as *const [f64; N]) };
    binding::fmi2Status_fmi2OK
}

unsafe extern "C" fn free_fmu_state(
    _c: binding::fmi2Component,
    state: *mut binding::fmi2FMUstate,
) -> binding::fmi2Status {
    let state = unsafe { &mut *state };
    if !state.is_null() {
        drop(unsafe { Box::from_raw(*state as *mut [f64; N]) });
        *state = std::ptr::null_mut();
    }
    binding::fmi2Status_fmi2OK
}

unsafe extern "C" fn get_directional_derivative(
    _c: binding::fmi2Component,
    _v_unknown_ref: *const binding::fmi2ValueReference,
    n_unknown: usize,
    _v_known_ref: *const binding::fmi2ValueReference,
    n_known: usize,
    dv_known: *const f64,
    dv_unknown: *mut f64,
) -> binding::fmi2Status {
    let dv_known = unsafe { slice::from_raw_parts(dv_known, n_known) };
    let dv_unknown = unsafe { slice::from_raw_parts_mut(dv_unknown, n_unknown) };
    for (i, dv) in dv_unknown.iter_mut().enumerate() {
        *dv = -dv_known.get(i).copied().unwrap_or_default();
    }
    binding::fmi2Status_fmi2OK
}

unsafe extern "C" fn new_discrete_states(
    c: binding::fmi2Component,
    event_info: *mut binding::fmi2EventInfo,
) -> binding::fmi2Status {
    let model = unsafe { Model::get(c) };
    unsafe {
        *event_info = binding::fmi2EventInfo {
            newDiscreteStatesNeeded: binding::fmi2False,
            terminateSimulation: binding::fmi2False,
            nominalsOfContinuousStatesChanged: binding::fmi2False,
            valuesOfContinuousStatesChanged: binding::fmi2True,
            nextEventTimeDefined: binding::fmi2True,
            nextEventTime: model.time + 1.0,
        }
    };
    binding::fmi2Status_fmi2OK
}

unsafe extern "C" fn completed_integrator_step(
    _c: binding::fmi2Component,
    _no_set_fmu_state_prior: binding::fmi2Boolean,
    enter_event_mode: *mut binding::fmi2Boolean,
    terminate_simulation: *mut binding::fmi2Boolean,
) -> binding::fmi2Status {
    unsafe {
        *enter_event_mode = binding::fmi2False;
        *terminate_simulation = binding::fmi2False;
    }
    binding::fmi2Status_fmi2OK
}

unsafe extern "C" fn set_time(c: binding::fmi2Component, time: f64) -> binding::fmi2Status {
    unsafe { Model::get(c) }.time = time;
    binding::fmi2Status_fmi2OK
}

unsafe extern "C" fn set_continuous_states(
    c: binding::fmi2Component,
    x: *const f64,
    nx: usize,
) -> binding::fmi2Status {
    let model = unsafe { Model::get(c) };
    if nx != N_STATES {
        return model.unknown_variable();
    }
    model.reals[..nx].copy_from_slice(unsafe { slice::from_raw_parts(x, nx) });
    binding::fmi2Status_fmi2OK
}

unsafe extern "C" fn get_derivatives(
    c: binding::fmi2Component,
    derivatives: *mut f64,
    nx: usize,
) -> binding::fmi2Status {
    let model = unsafe { Model::get(c) };
    let derivatives = unsafe { slice::from_raw_parts_mut(derivatives, nx) };
    for (der, x) in derivatives.iter_mut().zip(&model.reals[..N_STATES]) {
        *der = -x;
    }
    binding::fmi2Status_fmi2OK
}

unsafe extern "C" fn get_event_indicators(
    c: binding::fmi2Component,
    event_indicators: *mut f64,
    ni: usize,
) -> binding::fmi2Status {
    let model = unsafe { Model::get(c) };
    for indicator in unsafe { slice::from_raw_parts_mut(event_indicators, ni) } {
        *indicator = model.reals[0];
    }
    binding::fmi2Status_fmi2OK
}

unsafe extern "C" fn get_continuous_states(
    c: binding::fmi2Component,
    x: *mut f64,
    nx: usize,
) -> binding::fmi2Status {
    let model = unsafe { Model::get(c) };
    if nx != N_STATES {
        return model.unknown_variable();
    }
    unsafe { slice::from_raw_parts_mut(x, nx) }.copy_from_slice(&model.reals[..nx]);
    binding::fmi2Status_fmi2OK
}

unsafe extern "C" fn get_nominals_of_continuous_states(
    _c: binding::fmi2Component,
    x_nominal: *mut f64,
    nx: usize,
) -> binding::fmi2Status {
    unsafe { slice::from_raw_parts_mut(x_nominal, nx) }.fill(1.0);
    binding::fmi2Status_fmi2OK
}

unsafe extern "C" fn set_real_input_derivatives(
    _c: binding::fmi2Component,
    _vr: *const binding::fmi2ValueReference,
    _nvr: usize,
    _order: *const binding::fmi2Integer,
    _value: *const f64,
) -> binding::fmi2Status {
    binding::fmi2Status_fmi2OK
}

unsafe extern "C" fn get_real_output_derivatives(
    _c: binding::fmi2Component,
    _vr: *const binding::fmi2ValueReference,
    nvr: usize,
    order: *const binding::fmi2Integer,
    value: *mut f64,
) -> binding::fmi2Status {
    let order = unsafe { slice::from_raw_parts(order, nvr) };
    let value = unsafe { slice::from_raw_parts_mut(value, nvr) };
    for (value, order) in value.iter_mut().zip(order) {
        *value = *order as f64 * 0.5;
    }
    binding::fmi2Status_fmi2OK
}

/// Advances the states by one explicit Euler step. Negative step sizes are discarded.
unsafe extern "C" fn do_step(
    c: binding::fmi2Component,
    current_communication_point: f64,
    communication_step_size: f64,
    _no_set_fmu_state_prior: binding::fmi2Boolean,
) -> binding::fmi2Status {
    let model = unsafe { Model::get(c) };
    if communication_step_size < 0.0 {
        model.log(
            binding::fmi2Status_fmi2Discard,
            c"logStatusDiscard",
            c"Negative step size",
        );
        return binding::fmi2Status_fmi2Discard;
    }
    for x in &mut model.reals[..N_STATES] {
        *x -= *x * communication_step_size;
    }
    model.time = current_communication_point + communication_step_size;
    binding::fmi2Status_fmi2OK
}

unsafe extern "C" fn get_status(
    _c: binding::fmi2Component,
    _s: binding::fmi2StatusKind,
    value: *mut binding::fmi2Status,
) -> binding::fmi2Status {
    unsafe { *value = binding::fmi2Status_fmi2OK };
    binding::fmi2Status_fmi2OK
}

unsafe extern "C" fn get_real_status(
    c: binding::fmi2Component,
    s: binding::fmi2StatusKind,
    value: *mut f64,
) -> binding::fmi2Status {
    if s != binding::fmi2StatusKind_fmi2LastSuccessfulTime {
        return binding::fmi2Status_fmi2Discard;
    }
    unsafe { *value = Model::get(c).time };
    binding::fmi2Status_fmi2OK
}

unsafe extern "C" fn get_integer_status(
    _c: binding::fmi2Component,
    _s: binding::fmi2StatusKind,
    _value: *mut binding::fmi2Integer,
) -> binding::fmi2Status {
    binding::fmi2Status_fmi2Discard
}

unsafe extern "C" fn get_boolean_status(
    _c: binding::fmi2Component,
    _s: binding::fmi2StatusKind,
    value: *mut binding::fmi2Boolean,
) -> binding::fmi2Status {
    unsafe { *value = binding::fmi2False };
    binding::fmi2Status_fmi2OK
}

unsafe extern "C" fn get_string_status(
    _c: binding::fmi2Component,
    _s: binding::fmi2StatusKind,
    value: *mut binding::fmi2String,
) -> binding::fmi2Status {
    unsafe { *value = c"idle".as_ptr() };
    binding::fmi2Status_fmi2OK
}

/// The required common functions plus the FMU state and directional derivative functions.
fn common() -> SymbolTable {
    let mut table = SymbolTable::new();
    symbols!(table, binding, {
        fmi2GetTypesPlatform => get_types_platform,
        fmi2GetVersion => get_version,
        fmi2SetDebugLogging => set_debug_logging,
        fmi2Instantiate => instantiate,
        fmi2FreeInstance => free_instance,
        fmi2SetupExperiment => setup_experiment,
        fmi2EnterInitializationMode => ok,
        fmi2ExitInitializationMode => ok,
        fmi2Terminate => ok,
        fmi2Reset => reset,
        fmi2GetReal => get_real,
        fmi2GetInteger => get_integer,
        fmi2GetBoolean => get_boolean,
        fmi2GetString => get_string,
        fmi2SetReal => set_real,
        fmi2SetInteger => set_integer,
        fmi2SetBoolean => set_boolean,
        fmi2SetString => set_string,
        fmi2GetFMUstate => get_fmu_state,
        fmi2SetFMUstate => set_fmu_state,
        fmi2FreeFMUstate => free_fmu_state,
        fmi2GetDirectionalDerivative => get_directional_derivative,
    });
    table
}

pub fn model_exchange() -> SymbolTable {
    let mut table = common();
    symbols!(table, binding, {
        fmi2EnterEventMode => ok,
        fmi2NewDiscreteStates => new_discrete_states,
        fmi2EnterContinuousTimeMode => ok,
        fmi2CompletedIntegratorStep => completed_integrator_step,
        fmi2SetTime => set_time,
        fmi2SetContinuousStates => set_continuous_states,
        fmi2GetDerivatives => get_derivatives,
        fmi2GetEventIndicators => get_event_indicators,
        fmi2GetContinuousStates => get_continuous_states,
        fmi2GetNominalsOfContinuousStates => get_nominals_of_continuous_states,
    });
    table
}

pub fn co_simulation() -> SymbolTable {
    let mut table = common();
    symbols!(table, binding, {
        fmi2SetRealInputDerivatives => set_real_input_derivatives,
        fmi2GetRealOutputDerivatives => get_real_output_derivatives,
        fmi2DoStep => do_step,
        fmi2CancelStep => error,
        fmi2GetStatus => get_status,
        fmi2GetRealStatus => get_real_status,
        fmi2GetIntegerStatus => get_integer_status,
        fmi2GetBooleanStatus => get_boolean_status,
        fmi2GetStringStatus => get_string_status,
    });
    table
}

/// Co-Simulation without any of the optional functions.
pub fn co_simulation_without_fmu_state() -> SymbolTable {
    let mut table = co_simulation();
    table
        .remove("fmi2GetFMUstate")
        .remove("fmi2SetFMUstate")
        .remove("fmi2FreeFMUstate")
        .remove("fmi2GetDirectionalDerivative");
    table
}
