//! A small FMI 3.0 model with eight variables of each type.
//!
//! Int32 variable [`STATUS_VR`] holds the status code every value access returns, which lets the
//! tests choose the status of a call. Float64 variables 0 and 1 are the continuous states of
//! `der(x) = -x`.

use std::{
    ffi::{c_char, CStr, CString},
    slice,
};

use fmi_instance::{fmi3::binding, SymbolTable};

use super::symbols;

pub const TOKEN: &str = "{5A1E3EAC-7D7B-4A4D-A6B3-1D6A8C5F0E21}";
pub const N: usize = 8;
pub const N_STATES: usize = 2;
pub const STATUS_VR: binding::fmi3ValueReference = 7;

struct Model {
    name: CString,
    environment: binding::fmi3InstanceEnvironment,
    log_message: binding::fmi3LogMessageCallback,
    time: f64,
    float32: [f32; N],
    float64: [f64; N],
    int8: [i8; N],
    uint8: [u8; N],
    int16: [i16; N],
    uint16: [u16; N],
    int32: [i32; N],
    uint32: [u32; N],
    int64: [i64; N],
    uint64: [u64; N],
    boolean: [bool; N],
    clock: [bool; N],
    strings: Vec<CString>,
    binaries: Vec<Vec<u8>>,
}

impl Model {
    fn new(
        name: CString,
        environment: binding::fmi3InstanceEnvironment,
        log_message: binding::fmi3LogMessageCallback,
    ) -> Self {
        Self {
            name,
            environment,
            log_message,
            time: 0.0,
            float32: [0.0; N],
            float64: [1.0; N],
            int8: [0; N],
            uint8: [0; N],
            int16: [0; N],
            uint16: [0; N],
            int32: [0; N],
            uint32: [0; N],
            int64: [0; N],
            uint64: [0; N],
            boolean: [false; N],
            clock: [false; N],
            strings: vec![CString::default(); N],
            binaries: vec![Vec::new(); N],
        }
    }

    unsafe fn get<'a>(instance: binding::fmi3Instance) -> &'a mut Model {
        unsafe { &mut *(instance as *mut Model) }
    }

    fn log(&self, status: binding::fmi3Status, category: &CStr, message: &CStr) {
        if let Some(log_message) = self.log_message {
            unsafe { log_message(self.environment, status, category.as_ptr(), message.as_ptr()) }
        }
    }

    fn error(&self, message: &CStr) -> binding::fmi3Status {
        self.log(binding::fmi3Status_fmi3Error, c"logStatusError", message);
        binding::fmi3Status_fmi3Error
    }

    /// The status chosen through [`STATUS_VR`].
    fn status(&self) -> binding::fmi3Status {
        self.int32[STATUS_VR as usize] as binding::fmi3Status
    }

    fn reset(&mut self) {
        *self = Model::new(self.name.clone(), self.environment, self.log_message);
    }
}

/// `fmi3Get<Type>`/`fmi3Set<Type>` over one array of the model.
macro_rules! getter_setter {
    ($($get:ident, $set:ident: $ty:ty => $field:ident;)*) => {
        $(
            unsafe extern "C" fn $get(
                instance: binding::fmi3Instance,
                vr: *const binding::fmi3ValueReference,
                nvr: usize,
                values: *mut $ty,
                n_values: usize,
            ) -> binding::fmi3Status {
                let model = unsafe { Model::get(instance) };
                if nvr != n_values {
                    return model.error(c"nValues does not match nValueReferences");
                }
                let vr = unsafe { slice::from_raw_parts(vr, nvr) };
                let values = unsafe { slice::from_raw_parts_mut(values, n_values) };
                for (vr, value) in vr.iter().zip(values) {
                    match model.$field.get(*vr as usize) {
                        Some(v) => *value = *v,
                        None => return model.error(c"Unknown value reference"),
                    }
                }
                model.status()
            }

            unsafe extern "C" fn $set(
                instance: binding::fmi3Instance,
                vr: *const binding::fmi3ValueReference,
                nvr: usize,
                values: *const $ty,
                n_values: usize,
            ) -> binding::fmi3Status {
                let model = unsafe { Model::get(instance) };
                if nvr != n_values {
                    return model.error(c"nValues does not match nValueReferences");
                }
                let vr = unsafe { slice::from_raw_parts(vr, nvr) };
                let values = unsafe { slice::from_raw_parts(values, n_values) };
                for (vr, value) in vr.iter().zip(values) {
                    match model.$field.get_mut(*vr as usize) {
                        Some(v) => *v = *value,
                        None => return model.error(c"Unknown value reference"),
                    }
                }
                model.status()
            }
        )*
    };
}

getter_setter! {
    get_float32, set_float32: f32 => float32;
    get_float64, set_float64: f64 => float64;
    get_int8, set_int8: i8 => int8;
    get_uint8, set_uint8: u8 => uint8;
    get_int16, set_int16: i16 => int16;
    get_uint16, set_uint16: u16 => uint16;
    get_int32, set_int32: i32 => int32;
    get_uint32, set_uint32: u32 => uint32;
    get_int64, set_int64: i64 => int64;
    get_uint64, set_uint64: u64 => uint64;
    get_boolean, set_boolean: bool => boolean;
}

unsafe extern "C" fn ok(_instance: binding::fmi3Instance) -> binding::fmi3Status {
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn get_version() -> *const c_char {
    binding::fmi3Version.as_ptr() as *const c_char
}

unsafe extern "C" fn set_debug_logging(
    _instance: binding::fmi3Instance,
    _logging_on: bool,
    _n_categories: usize,
    _categories: *const binding::fmi3String,
) -> binding::fmi3Status {
    binding::fmi3Status_fmi3OK
}

fn instantiate(
    instance_name: binding::fmi3String,
    instantiation_token: binding::fmi3String,
    logging_on: bool,
    environment: binding::fmi3InstanceEnvironment,
    log_message: binding::fmi3LogMessageCallback,
) -> binding::fmi3Instance {
    let name = unsafe { CStr::from_ptr(instance_name) }.to_owned();
    let model = Model::new(name, environment, log_message);
    if unsafe { CStr::from_ptr(instantiation_token) }.to_bytes() != TOKEN.as_bytes() {
        model.error(c"Wrong instantiation token");
        return std::ptr::null_mut();
    }
    if logging_on {
        model.log(binding::fmi3Status_fmi3OK, c"logEvents", c"Instantiated");
    }
    Box::into_raw(Box::new(model)) as binding::fmi3Instance
}

unsafe extern "C" fn instantiate_model_exchange(
    instance_name: binding::fmi3String,
    instantiation_token: binding::fmi3String,
    _resource_path: binding::fmi3String,
    _visible: bool,
    logging_on: bool,
    instance_environment: binding::fmi3InstanceEnvironment,
    log_message: binding::fmi3LogMessageCallback,
) -> binding::fmi3Instance {
    instantiate(
        instance_name,
        instantiation_token,
        logging_on,
        instance_environment,
        log_message,
    )
}

unsafe extern "C" fn instantiate_co_simulation(
    instance_name: binding::fmi3String,
    instantiation_token: binding::fmi3String,
    _resource_path: binding::fmi3String,
    _visible: bool,
    logging_on: bool,
    _event_mode_used: bool,
    _early_return_allowed: bool,
    _required_intermediate_variables: *const binding::fmi3ValueReference,
    _n_required_intermediate_variables: usize,
    instance_environment: binding::fmi3InstanceEnvironment,
    log_message: binding::fmi3LogMessageCallback,
    _intermediate_update: binding::fmi3IntermediateUpdateCallback,
) -> binding::fmi3Instance {
    instantiate(
        instance_name,
        instantiation_token,
        logging_on,
        instance_environment,
        log_message,
    )
}

unsafe extern "C" fn instantiate_scheduled_execution(
    instance_name: binding::fmi3String,
    instantiation_token: binding::fmi3String,
    _resource_path: binding::fmi3String,
    _visible: bool,
    logging_on: bool,
    instance_environment: binding::fmi3InstanceEnvironment,
    log_message: binding::fmi3LogMessageCallback,
    _clock_update: binding::fmi3ClockUpdateCallback,
    _lock_preemption: binding::fmi3LockPreemptionCallback,
    _unlock_preemption: binding::fmi3UnlockPreemptionCallback,
) -> binding::fmi3Instance {
    instantiate(
        instance_name,
        instantiation_token,
        logging_on,
        instance_environment,
        log_message,
    )
}

unsafe extern "C" fn free_instance(instance: binding::fmi3Instance) {
    drop(unsafe { Box::from_raw(instance as *mut Model) });
}

unsafe extern "C" fn enter_initialization_mode(
    instance: binding::fmi3Instance,
    _tolerance_defined: bool,
    _tolerance: f64,
    start_time: f64,
    _stop_time_defined: bool,
    _stop_time: f64,
) -> binding::fmi3Status {
    unsafe { Model::get(instance) }.time = start_time;
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn reset(instance: binding::fmi3Instance) -> binding::fmi3Status {
    unsafe { Model::get(instance) }.reset();
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn get_string(
    instance: binding::fmi3Instance,
    vr: *const binding::fmi3ValueReference,
    nvr: usize,
    values: *mut binding::fmi3String,
    n_values: usize,
) -> binding::fmi3Status {
    let model = unsafe { Model::get(instance) };
    let vr = unsafe { slice::from_raw_parts(vr, nvr) };
    let values = unsafe { slice::from_raw_parts_mut(values, n_values) };
    for (vr, value) in vr.iter().zip(values) {
        match model.strings.get(*vr as usize) {
            Some(s) => *value = s.as_ptr(),
            None => return model.error(c"Unknown value reference"),
        }
    }
    model.status()
}

unsafe extern "C" fn set_string(
    instance: binding::fmi3Instance,
    vr: *const binding::fmi3ValueReference,
    nvr: usize,
    values: *const binding::fmi3String,
    n_values: usize,
) -> binding::fmi3Status {
    let model = unsafe { Model::get(instance) };
    let vr = unsafe { slice::from_raw_parts(vr, nvr) };
    let values = unsafe { slice::from_raw_parts(values, n_values) };
    for (vr, value) in vr.iter().zip(values) {
        let s = unsafe { CStr::from_ptr(*value) }.to_owned();
        match model.strings.get_mut(*vr as usize) {
            Some(slot) => *slot = s,
            None => return model.error(c"Unknown value reference"),
        }
    }
    model.status()
}

unsafe extern "C" fn get_binary(
    instance: binding::fmi3Instance,
    vr: *const binding::fmi3ValueReference,
    nvr: usize,
    value_sizes: *mut usize,
    values: *mut binding::fmi3Binary,
    n_values: usize,
) -> binding::fmi3Status {
    let model = unsafe { Model::get(instance) };
    let vr = unsafe { slice::from_raw_parts(vr, nvr) };
    let sizes = unsafe { slice::from_raw_parts_mut(value_sizes, n_values) };
    let values = unsafe { slice::from_raw_parts_mut(values, n_values) };
    for ((vr, size), value) in vr.iter().zip(sizes).zip(values) {
        match model.binaries.get(*vr as usize) {
            Some(bytes) => {
                *size = bytes.len();
                *value = bytes.as_ptr();
            }
            None => return model.error(c"Unknown value reference"),
        }
    }
    model.status()
}

unsafe extern "C" fn set_binary(
    instance: binding::fmi3Instance,
    vr: *const binding::fmi3ValueReference,
    nvr: usize,
    value_sizes: *const usize,
    values: *const binding::fmi3Binary,
    n_values: usize,
) -> binding::fmi3Status {
    let model = unsafe { Model::get(instance) };
    let vr = unsafe { slice::from_raw_parts(vr, nvr) };
    let sizes = unsafe { slice::from_raw_parts(value_sizes, n_values) };
    let values = unsafe { slice::from_raw_parts(values, n_values) };
    for ((vr, size), value) in vr.iter().zip(sizes).zip(values) {
        let bytes = unsafe { slice::from_raw_parts(*value, *size) }.to_vec();
        match model.binaries.get_mut(*vr as usize) {
            Some(slot) => *slot = bytes,
            None => return model.error(c"Unknown value reference"),
        }
    }
    model.status()
}

unsafe extern "C" fn get_clock(
    instance: binding::fmi3Instance,
    vr: *const binding::fmi3ValueReference,
    nvr: usize,
    values: *mut binding::fmi3Clock,
) -> binding::fmi3Status {
    let model = unsafe { Model::get(instance) };
    let vr = unsafe { slice::from_raw_parts(vr, nvr) };
    let values = unsafe { slice::from_raw_parts_mut(values, nvr) };
    for (vr, value) in vr.iter().zip(values) {
        match model.clock.get(*vr as usize) {
            Some(v) => *value = *v,
            None => return model.error(c"Unknown value reference"),
        }
    }
    model.status()
}

unsafe extern "C" fn set_clock(
    instance: binding::fmi3Instance,
    vr: *const binding::fmi3ValueReference,
    nvr: usize,
    values: *const binding::fmi3Clock,
) -> binding::fmi3Status {
    let model = unsafe { Model::get(instance) };
    let vr = unsafe { slice::from_raw_parts(vr, nvr) };
    let values = unsafe { slice::from_raw_parts(values, nvr) };
    for (vr, value) in vr.iter().zip(values) {
        match model.clock.get_mut(*vr as usize) {
            Some(v) => *v = *value,
            None => return model.error(c"Unknown value reference"),
        }
    }
    model.status()
}

/// Float64 variable 2 depends on the two states.
unsafe extern "C" fn get_number_of_variable_dependencies(
    _instance: binding::fmi3Instance,
    value_reference: binding::fmi3ValueReference,
    n_dependencies: *mut usize,
) -> binding::fmi3Status {
    unsafe { *n_dependencies = if value_reference == 2 { N_STATES } else { 0 } };
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn get_variable_dependencies(
    _instance: binding::fmi3Instance,
    _dependent: binding::fmi3ValueReference,
    element_indices_of_dependent: *mut usize,
    independents: *mut binding::fmi3ValueReference,
    element_indices_of_independents: *mut usize,
    dependency_kinds: *mut binding::fmi3DependencyKind,
    n_dependencies: usize,
) -> binding::fmi3Status {
    let n = n_dependencies.min(N_STATES);
    unsafe {
        slice::from_raw_parts_mut(element_indices_of_dependent, n).fill(0);
        slice::from_raw_parts_mut(element_indices_of_independents, n).fill(0);
        slice::from_raw_parts_mut(dependency_kinds, n)
            .fill(binding::fmi3DependencyKind_fmi3Dependent);
        for (i, independent) in slice::from_raw_parts_mut(independents, n)
            .iter_mut()
            .enumerate()
        {
            *independent = i as binding::fmi3ValueReference;
        }
    }
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn get_fmu_state(
    instance: binding::fmi3Instance,
    state: *mut binding::fmi3FMUState,
) -> binding::fmi3Status {
    let model = unsafe { Model::get(instance) };
    let state = unsafe { &mut *state };
    if state.is_null() {
        *state = Box::into_raw(Box::new(model.float64)) as binding::fmi3FMUState;
    } else {
        unsafe { *(*state as *mut [f64; N]) = model.float64 };
    }
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn set_fmu_state(
    instance: binding::fmi3Instance,
    state: binding::fmi3FMUState,
) -> binding::fmi3Status {
    unsafe { Model::get(instance) }.float64 = unsafe { *(state as *const [f64; N]) };
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn free_fmu_state(
    _instance: binding::fmi3Instance,
    state: *mut binding::fmi3FMUState,
) -> binding::fmi3Status {
    let state = unsafe { &mut *state };
    if !state.is_null() {
        drop(unsafe { Box::from_raw(*state as *mut [f64; N]) });
        *state = std::ptr::null_mut();
    }
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn get_directional_derivative(
    _instance: binding::fmi3Instance,
    _unknowns: *const binding::fmi3ValueReference,
    _n_unknowns: usize,
    _knowns: *const binding::fmi3ValueReference,
    _n_knowns: usize,
    seed: *const f64,
    n_seed: usize,
    sensitivity: *mut f64,
    n_sensitivity: usize,
) -> binding::fmi3Status {
    let seed = unsafe { slice::from_raw_parts(seed, n_seed) };
    let sensitivity = unsafe { slice::from_raw_parts_mut(sensitivity, n_sensitivity) };
    for (i, s) in sensitivity.iter_mut().enumerate() {
        *s = -seed.get(i).copied().unwrap_or_default();
    }
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn get_interval_decimal(
    _instance: binding::fmi3Instance,
    _vr: *const binding::fmi3ValueReference,
    nvr: usize,
    intervals: *mut f64,
    qualifiers: *mut binding::fmi3IntervalQualifier,
) -> binding::fmi3Status {
    unsafe {
        slice::from_raw_parts_mut(intervals, nvr).fill(0.5);
        slice::from_raw_parts_mut(qualifiers, nvr)
            .fill(binding::fmi3IntervalQualifier_fmi3IntervalChanged);
    }
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn get_interval_fraction(
    _instance: binding::fmi3Instance,
    _vr: *const binding::fmi3ValueReference,
    nvr: usize,
    counters: *mut u64,
    resolutions: *mut u64,
    qualifiers: *mut binding::fmi3IntervalQualifier,
) -> binding::fmi3Status {
    unsafe {
        slice::from_raw_parts_mut(counters, nvr).fill(1);
        slice::from_raw_parts_mut(resolutions, nvr).fill(2);
        slice::from_raw_parts_mut(qualifiers, nvr)
            .fill(binding::fmi3IntervalQualifier_fmi3IntervalUnchanged);
    }
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn get_shift_decimal(
    _instance: binding::fmi3Instance,
    _vr: *const binding::fmi3ValueReference,
    nvr: usize,
    shifts: *mut f64,
) -> binding::fmi3Status {
    unsafe { slice::from_raw_parts_mut(shifts, nvr).fill(0.25) };
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn get_shift_fraction(
    _instance: binding::fmi3Instance,
    _vr: *const binding::fmi3ValueReference,
    nvr: usize,
    counters: *mut u64,
    resolutions: *mut u64,
) -> binding::fmi3Status {
    unsafe {
        slice::from_raw_parts_mut(counters, nvr).fill(1);
        slice::from_raw_parts_mut(resolutions, nvr).fill(4);
    }
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn set_interval_decimal(
    _instance: binding::fmi3Instance,
    _vr: *const binding::fmi3ValueReference,
    _nvr: usize,
    _intervals: *const f64,
) -> binding::fmi3Status {
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn set_interval_fraction(
    _instance: binding::fmi3Instance,
    _vr: *const binding::fmi3ValueReference,
    _nvr: usize,
    _counters: *const u64,
    _resolutions: *const u64,
) -> binding::fmi3Status {
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn update_discrete_states(
    instance: binding::fmi3Instance,
    discrete_states_need_update: *mut bool,
    terminate_simulation: *mut bool,
    nominals_of_continuous_states_changed: *mut bool,
    values_of_continuous_states_changed: *mut bool,
    next_event_time_defined: *mut bool,
    next_event_time: *mut f64,
) -> binding::fmi3Status {
    let model = unsafe { Model::get(instance) };
    unsafe {
        *discrete_states_need_update = false;
        *terminate_simulation = false;
        *nominals_of_continuous_states_changed = false;
        *values_of_continuous_states_changed = true;
        *next_event_time_defined = true;
        *next_event_time = model.time + 1.0;
    }
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn completed_integrator_step(
    _instance: binding::fmi3Instance,
    _no_set_fmu_state_prior: bool,
    enter_event_mode: *mut bool,
    terminate_simulation: *mut bool,
) -> binding::fmi3Status {
    unsafe {
        *enter_event_mode = false;
        *terminate_simulation = false;
    }
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn set_time(instance: binding::fmi3Instance, time: f64) -> binding::fmi3Status {
    unsafe { Model::get(instance) }.time = time;
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn set_continuous_states(
    instance: binding::fmi3Instance,
    continuous_states: *const f64,
    n_continuous_states: usize,
) -> binding::fmi3Status {
    let model = unsafe { Model::get(instance) };
    if n_continuous_states != N_STATES {
        return model.error(c"Wrong number of continuous states");
    }
    model.float64[..N_STATES]
        .copy_from_slice(unsafe { slice::from_raw_parts(continuous_states, N_STATES) });
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn get_continuous_state_derivatives(
    instance: binding::fmi3Instance,
    derivatives: *mut f64,
    n_continuous_states: usize,
) -> binding::fmi3Status {
    let model = unsafe { Model::get(instance) };
    let derivatives = unsafe { slice::from_raw_parts_mut(derivatives, n_continuous_states) };
    for (der, x) in derivatives.iter_mut().zip(&model.float64[..N_STATES]) {
        *der = -x;
    }
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn get_event_indicators(
    instance: binding::fmi3Instance,
    event_indicators: *mut f64,
    n_event_indicators: usize,
) -> binding::fmi3Status {
    let model = unsafe { Model::get(instance) };
    unsafe { slice::from_raw_parts_mut(event_indicators, n_event_indicators) }
        .fill(model.float64[0]);
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn get_continuous_states(
    instance: binding::fmi3Instance,
    continuous_states: *mut f64,
    n_continuous_states: usize,
) -> binding::fmi3Status {
    let model = unsafe { Model::get(instance) };
    if n_continuous_states != N_STATES {
        return model.error(c"Wrong number of continuous states");
    }
    unsafe { slice::from_raw_parts_mut(continuous_states, N_STATES) }
        .copy_from_slice(&model.float64[..N_STATES]);
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn get_nominals_of_continuous_states(
    _instance: binding::fmi3Instance,
    nominals: *mut f64,
    n_continuous_states: usize,
) -> binding::fmi3Status {
    unsafe { slice::from_raw_parts_mut(nominals, n_continuous_states) }.fill(1.0);
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn get_number_of_event_indicators(
    _instance: binding::fmi3Instance,
    n_event_indicators: *mut usize,
) -> binding::fmi3Status {
    unsafe { *n_event_indicators = 1 };
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn get_number_of_continuous_states(
    _instance: binding::fmi3Instance,
    n_continuous_states: *mut usize,
) -> binding::fmi3Status {
    unsafe { *n_continuous_states = N_STATES };
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn get_output_derivatives(
    _instance: binding::fmi3Instance,
    _vr: *const binding::fmi3ValueReference,
    nvr: usize,
    orders: *const i32,
    values: *mut f64,
    n_values: usize,
) -> binding::fmi3Status {
    let orders = unsafe { slice::from_raw_parts(orders, nvr) };
    let values = unsafe { slice::from_raw_parts_mut(values, n_values) };
    for (value, order) in values.iter_mut().zip(orders) {
        *value = *order as f64 * 0.5;
    }
    binding::fmi3Status_fmi3OK
}

/// Advances the states by one explicit Euler step. Negative step sizes are discarded.
#[allow(clippy::too_many_arguments)]
unsafe extern "C" fn do_step(
    instance: binding::fmi3Instance,
    current_communication_point: f64,
    communication_step_size: f64,
    _no_set_fmu_state_prior: bool,
    event_handling_needed: *mut bool,
    terminate_simulation: *mut bool,
    early_return: *mut bool,
    last_successful_time: *mut f64,
) -> binding::fmi3Status {
    let model = unsafe { Model::get(instance) };
    unsafe {
        *event_handling_needed = false;
        *terminate_simulation = false;
        *early_return = false;
    }
    if communication_step_size < 0.0 {
        unsafe { *last_successful_time = current_communication_point };
        model.log(
            binding::fmi3Status_fmi3Discard,
            c"logStatusDiscard",
            c"Negative step size",
        );
        return binding::fmi3Status_fmi3Discard;
    }
    for x in &mut model.float64[..N_STATES] {
        *x -= *x * communication_step_size;
    }
    model.time = current_communication_point + communication_step_size;
    unsafe { *last_successful_time = model.time };
    binding::fmi3Status_fmi3OK
}

unsafe extern "C" fn activate_model_partition(
    instance: binding::fmi3Instance,
    clock_reference: binding::fmi3ValueReference,
    activation_time: f64,
) -> binding::fmi3Status {
    let model = unsafe { Model::get(instance) };
    match model.clock.get_mut(clock_reference as usize) {
        Some(clock) => *clock = true,
        None => return model.error(c"Unknown clock"),
    }
    model.time = activation_time;
    binding::fmi3Status_fmi3OK
}

/// The common functions, including every optional one except `fmi3GetAdjointDerivative` and the
/// shift setters.
fn common() -> SymbolTable {
    let mut table = SymbolTable::new();
    symbols!(table, binding, {
        fmi3GetVersion => get_version,
        fmi3SetDebugLogging => set_debug_logging,
        fmi3InstantiateModelExchange => instantiate_model_exchange,
        fmi3InstantiateCoSimulation => instantiate_co_simulation,
        fmi3InstantiateScheduledExecution => instantiate_scheduled_execution,
        fmi3FreeInstance => free_instance,
        fmi3EnterInitializationMode => enter_initialization_mode,
        fmi3ExitInitializationMode => ok,
        fmi3EnterEventMode => ok,
        fmi3Terminate => ok,
        fmi3Reset => reset,
        fmi3GetFloat32 => get_float32,
        fmi3GetFloat64 => get_float64,
        fmi3GetInt8 => get_int8,
        fmi3GetUInt8 => get_uint8,
        fmi3GetInt16 => get_int16,
        fmi3GetUInt16 => get_uint16,
        fmi3GetInt32 => get_int32,
        fmi3GetUInt32 => get_uint32,
        fmi3GetInt64 => get_int64,
        fmi3GetUInt64 => get_uint64,
        fmi3GetBoolean => get_boolean,
        fmi3GetString => get_string,
        fmi3GetBinary => get_binary,
        fmi3GetClock => get_clock,
        fmi3SetFloat32 => set_float32,
        fmi3SetFloat64 => set_float64,
        fmi3SetInt8 => set_int8,
        fmi3SetUInt8 => set_uint8,
        fmi3SetInt16 => set_int16,
        fmi3SetUInt16 => set_uint16,
        fmi3SetInt32 => set_int32,
        fmi3SetUInt32 => set_uint32,
        fmi3SetInt64 => set_int64,
        fmi3SetUInt64 => set_uint64,
        fmi3SetBoolean => set_boolean,
        fmi3SetString => set_string,
        fmi3SetBinary => set_binary,
        fmi3SetClock => set_clock,
        fmi3GetNumberOfVariableDependencies => get_number_of_variable_dependencies,
        fmi3GetVariableDependencies => get_variable_dependencies,
        fmi3GetFMUState => get_fmu_state,
        fmi3SetFMUState => set_fmu_state,
        fmi3FreeFMUState => free_fmu_state,
        fmi3GetDirectionalDerivative => get_directional_derivative,
        fmi3EnterConfigurationMode => ok,
        fmi3ExitConfigurationMode => ok,
        fmi3GetIntervalDecimal => get_interval_decimal,
        fmi3GetIntervalFraction => get_interval_fraction,
        fmi3GetShiftDecimal => get_shift_decimal,
        fmi3GetShiftFraction => get_shift_fraction,
        fmi3SetIntervalDecimal => set_interval_decimal,
        fmi3SetIntervalFraction => set_interval_fraction,
        fmi3EvaluateDiscreteStates => ok,
        fmi3UpdateDiscreteStates => update_discrete_states,
    });
    table
}

pub fn model_exchange() -> SymbolTable {
    let mut table = common();
    symbols!(table, binding, {
        fmi3EnterContinuousTimeMode => ok,
        fmi3CompletedIntegratorStep => completed_integrator_step,
        fmi3SetTime => set_time,
        fmi3SetContinuousStates => set_continuous_states,
        fmi3GetContinuousStateDerivatives => get_continuous_state_derivatives,
        fmi3GetEventIndicators => get_event_indicators,
        fmi3GetContinuousStates => get_continuous_states,
        fmi3GetNominalsOfContinuousStates => get_nominals_of_continuous_states,
        fmi3GetNumberOfEventIndicators => get_number_of_event_indicators,
        fmi3GetNumberOfContinuousStates => get_number_of_continuous_states,
    });
    table
}

pub fn co_simulation() -> SymbolTable {
    let mut table = common();
    symbols!(table, binding, {
        fmi3EnterStepMode => ok,
        fmi3GetOutputDerivatives => get_output_derivatives,
        fmi3DoStep => do_step,
    });
    table
}

pub fn scheduled_execution() -> SymbolTable {
    let mut table = common();
    symbols!(table, binding, {
        fmi3ActivateModelPartition => activate_model_partition,
    });
    table
}
