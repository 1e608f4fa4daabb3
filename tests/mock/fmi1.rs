//! A two-state FMI 1.0 model, `der(x) = -x`, exported as `Dahlquist_fmi*`.
//!
//! Real variables 0 and 1 are the states. Every variable array has [`N`] entries.

use std::{
    ffi::{c_char, CStr, CString},
    slice,
};

use fmi_instance::{fmi1::binding, SymbolTable};

use super::symbols;

pub const MODEL: &str = "Dahlquist";
pub const GUID: &str = "{8C4E810F-3DF3-4A00-8276-176FA3C9F000}";
pub const N: usize = 4;
pub const N_STATES: usize = 2;

struct Model {
    name: CString,
    logger: binding::fmiCallbackLogger,
    time: f64,
    reals: [f64; N],
    integers: [i32; N],
    booleans: [binding::fmiBoolean; N],
    strings: Vec<CString>,
}

impl Model {
    fn new(name: CString, logger: binding::fmiCallbackLogger) -> Self {
        Self {
            name,
            logger,
            time: 0.0,
            reals: [1.0; N],
            integers: [0; N],
            booleans: [binding::fmiFalse; N],
            strings: vec![CString::default(); N],
        }
    }

    unsafe fn get<'a>(c: binding::fmiComponent) -> &'a mut Model {
        unsafe { &mut *(c as *mut Model) }
    }

    fn log(&self, status: binding::fmiStatus, category: &CStr, message: &CStr) {
        if let Some(logger) = self.logger {
            unsafe {
                logger(
                    std::ptr::null_mut(),
                    self.name.as_ptr(),
                    status,
                    category.as_ptr(),
                    c"%s".as_ptr(),
                    message.as_ptr(),
                )
            }
        }
    }

    fn unknown_variable(&self) -> binding::fmiStatus {
        self.log(binding::fmiStatus_fmiError, c"error", c"Unknown value reference");
        binding::fmiStatus_fmiError
    }
}

fn get_values<T: Copy>(model: &Model, values: &[T], vr: &[u32], out: &mut [T]) -> u32 {
    for (vr, out) in vr.iter().zip(out) {
        match values.get(*vr as usize) {
            Some(v) => *out = *v,
            None => return model.unknown_variable(),
        }
    }
    binding::fmiStatus_fmiOK
}

fn set_values<T: Copy>(values: &mut [T], vr: &[u32], input: &[T]) -> bool {
    for (vr, input) in vr.iter().zip(input) {
        match values.get_mut(*vr as usize) {
            Some(v) => *v = *input,
            None => return false,
        }
    }
    true
}

unsafe extern "C" fn get_version() -> *const c_char {
    binding::fmiVersion.as_ptr() as *const c_char
}

unsafe extern "C" fn get_platform() -> *const c_char {
    binding::fmiPlatform.as_ptr() as *const c_char
}

unsafe extern "C" fn set_debug_logging(
    _c: binding::fmiComponent,
    _logging_on: binding::fmiBoolean,
) -> binding::fmiStatus {
    binding::fmiStatus_fmiOK
}

macro_rules! accessors {
    ($($get:ident, $set:ident: $ty:ty => $field:ident;)*) => {
        $(
            unsafe extern "C" fn $get(
                c: binding::fmiComponent,
                vr: *const binding::fmiValueReference,
                nvr: usize,
                value: *mut $ty,
            ) -> binding::fmiStatus {
                let model = unsafe { Model::get(c) };
                let vr = unsafe { slice::from_raw_parts(vr, nvr) };
                let value = unsafe { slice::from_raw_parts_mut(value, nvr) };
                get_values(model, &model.$field, vr, value)
            }

            unsafe extern "C" fn $set(
                c: binding::fmiComponent,
                vr: *const binding::fmiValueReference,
                nvr: usize,
                value: *const $ty,
            ) -> binding::fmiStatus {
                let model = unsafe { Model::get(c) };
                let vr = unsafe { slice::from_raw_parts(vr, nvr) };
                let value = unsafe { slice::from_raw_parts(value, nvr) };
                if set_values(&mut model.$field, vr, value) {
                    binding::fmiStatus_fmiOK
                } else {
                    model.unknown_variable()
                }
            }
        )*
    };
}

accessors! {
    get_real, set_real: f64 => reals;
    get_integer, set_integer: i32 => integers;
    get_boolean, set_boolean: binding::fmiBoolean => booleans;
}

unsafe extern "C" fn get_string(
    c: binding::fmiComponent,
    vr: *const binding::fmiValueReference,
    nvr: usize,
    value: *mut binding::fmiString,
) -> binding::fmiStatus {
    let model = unsafe { Model::get(c) };
    let vr = unsafe { slice::from_raw_parts(vr, nvr) };
    let value = unsafe { slice::from_raw_parts_mut(value, nvr) };
    for (vr, value) in vr.iter().zip(value) {
        match model.strings.get(*vr as usize) {
            Some(s) => *value = s.as_ptr(),
            None => return model.unknown_variable(),
        }
    }
    binding::fmiStatus_fmiOK
}

unsafe extern "C" fn set_string(
    c: binding::fmiComponent,
    vr: *const binding::fmiValueReference,
    nvr: usize,
    value: *const binding::fmiString,
) -> binding::fmiStatus {
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
    binding::fmiStatus_fmiOK
}

fn instantiate(
    instance_name: binding::fmiString,
    guid: binding::fmiString,
    logger: binding::fmiCallbackLogger,
    logging_on: binding::fmiBoolean,
) -> binding::fmiComponent {
    let name = unsafe { CStr::from_ptr(instance_name) }.to_owned();
    let model = Model::new(name, logger);
    if unsafe { CStr::from_ptr(guid) }.to_bytes() != GUID.as_bytes() {
        model.log(binding::fmiStatus_fmiError, c"error", c"Wrong GUID");
        return std::ptr::null_mut();
    }
    if logging_on != binding::fmiFalse {
        model.log(binding::fmiStatus_fmiOK, c"log", c"Instantiated");
    }
    Box::into_raw(Box::new(model)) as binding::fmiComponent
}

unsafe extern "C" fn free_instance(c: binding::fmiComponent) {
    drop(unsafe { Box::from_raw(c as *mut Model) });
}

unsafe extern "C" fn ok(_c: binding::fmiComponent) -> binding::fmiStatus {
    binding::fmiStatus_fmiOK
}

unsafe extern "C" fn instantiate_model(
    instance_name: binding::fmiString,
    guid: binding::fmiString,
    functions: binding::fmiMECallbackFunctions,
    logging_on: binding::fmiBoolean,
) -> binding::fmiComponent {
    instantiate(instance_name, guid, functions.logger, logging_on)
}

unsafe extern "C" fn set_time(c: binding::fmiComponent, time: f64) -> binding::fmiStatus {
    unsafe { Model::get(c) }.time = time;
    binding::fmiStatus_fmiOK
}

unsafe extern "C" fn set_continuous_states(
    c: binding::fmiComponent,
    x: *const f64,
    nx: usize,
) -> binding::fmiStatus {
    let model = unsafe { Model::get(c) };
    if nx != N_STATES {
        model.log(binding::fmiStatus_fmiError, c"error", c"Wrong number of states");
        return binding::fmiStatus_fmiError;
    }
    model.reals[..N_STATES].copy_from_slice(unsafe { slice::from_raw_parts(x, nx) });
    binding::fmiStatus_fmiOK
}

unsafe extern "C" fn completed_integrator_step(
    _c: binding::fmiComponent,
    call_event_update: *mut binding::fmiBoolean,
) -> binding::fmiStatus {
    unsafe { *call_event_update = binding::fmiFalse };
    binding::fmiStatus_fmiOK
}

fn next_time_event(model: &Model, event_info: *mut binding::fmiEventInfo) {
    let event_info = unsafe { &mut *event_info };
    *event_info = binding::fmiEventInfo {
        iterationConverged: binding::fmiTrue,
        stateValueReferencesChanged: binding::fmiFalse,
        stateValuesChanged: binding::fmiFalse,
        terminateSimulation: binding::fmiFalse,
        upcomingTimeEvent: binding::fmiTrue,
        nextEventTime: model.time + 1.0,
    };
}

unsafe extern "C" fn initialize(
    c: binding::fmiComponent,
    _tolerance_controlled: binding::fmiBoolean,
    _relative_tolerance: f64,
    event_info: *mut binding::fmiEventInfo,
) -> binding::fmiStatus {
    next_time_event(unsafe { Model::get(c) }, event_info);
    binding::fmiStatus_fmiOK
}

unsafe extern "C" fn event_update(
    c: binding::fmiComponent,
    _intermediate_results: binding::fmiBoolean,
    event_info: *mut binding::fmiEventInfo,
) -> binding::fmiStatus {
    next_time_event(unsafe { Model::get(c) }, event_info);
    binding::fmiStatus_fmiOK
}

unsafe extern "C" fn get_derivatives(
    c: binding::fmiComponent,
    derivatives: *mut f64,
    nx: usize,
) -> binding::fmiStatus {
    let model = unsafe { Model::get(c) };
    let derivatives = unsafe { slice::from_raw_parts_mut(derivatives, nx) };
    for (der, x) in derivatives.iter_mut().zip(&model.reals[..N_STATES]) {
        *der = -x;
    }
    binding::fmiStatus_fmiOK
}

unsafe extern "C" fn get_event_indicators(
    c: binding::fmiComponent,
    event_indicators: *mut f64,
    ni: usize,
) -> binding::fmiStatus {
    let model = unsafe { Model::get(c) };
    unsafe { slice::from_raw_parts_mut(event_indicators, ni) }.fill(model.reals[0]);
    binding::fmiStatus_fmiOK
}

unsafe extern "C" fn get_continuous_states(
    c: binding::fmiComponent,
    states: *mut f64,
    nx: usize,
) -> binding::fmiStatus {
    let model = unsafe { Model::get(c) };
    let states = unsafe { slice::from_raw_parts_mut(states, nx) };
    for (state, x) in states.iter_mut().zip(&model.reals[..N_STATES]) {
        *state = *x;
    }
    binding::fmiStatus_fmiOK
}

unsafe extern "C" fn get_nominal_continuous_states(
    _c: binding::fmiComponent,
    x_nominal: *mut f64,
    nx: usize,
) -> binding::fmiStatus {
    unsafe { slice::from_raw_parts_mut(x_nominal, nx) }.fill(1.0);
    binding::fmiStatus_fmiOK
}

unsafe extern "C" fn get_state_value_references(
    _c: binding::fmiComponent,
    vrx: *mut binding::fmiValueReference,
    nx: usize,
) -> binding::fmiStatus {
    let vrx = unsafe { slice::from_raw_parts_mut(vrx, nx) };
    for (i, vr) in vrx.iter_mut().enumerate() {
        *vr = i as binding::fmiValueReference;
    }
    binding::fmiStatus_fmiOK
}

#[allow(clippy::too_many_arguments)]
unsafe extern "C" fn instantiate_slave(
    instance_name: binding::fmiString,
    guid: binding::fmiString,
    _fmu_location: binding::fmiString,
    _mime_type: binding::fmiString,
    _timeout: f64,
    _visible: binding::fmiBoolean,
    _interactive: binding::fmiBoolean,
    functions: binding::fmiCSCallbackFunctions,
    logging_on: binding::fmiBoolean,
) -> binding::fmiComponent {
    instantiate(instance_name, guid, functions.logger, logging_on)
}

unsafe extern "C" fn initialize_slave(
    c: binding::fmiComponent,
    t_start: f64,
    _stop_time_defined: binding::fmiBoolean,
    _t_stop: f64,
) -> binding::fmiStatus {
    unsafe { Model::get(c) }.time = t_start;
    binding::fmiStatus_fmiOK
}

unsafe extern "C" fn reset_slave(c: binding::fmiComponent) -> binding::fmiStatus {
    let model = unsafe { Model::get(c) };
    *model = Model::new(model.name.clone(), model.logger);
    binding::fmiStatus_fmiOK
}

unsafe extern "C" fn set_real_input_derivatives(
    _c: binding::fmiComponent,
    _vr: *const binding::fmiValueReference,
    _nvr: usize,
    _order: *const i32,
    _value: *const f64,
) -> binding::fmiStatus {
    binding::fmiStatus_fmiOK
}

unsafe extern "C" fn get_real_output_derivatives(
    _c: binding::fmiComponent,
    _vr: *const binding::fmiValueReference,
    nvr: usize,
    order: *const i32,
    value: *mut f64,
) -> binding::fmiStatus {
    let order = unsafe { slice::from_raw_parts(order, nvr) };
    let value = unsafe { slice::from_raw_parts_mut(value, nvr) };
    for (value, order) in value.iter_mut().zip(order) {
        *value = *order as f64 * 0.5;
    }
    binding::fmiStatus_fmiOK
}

unsafe extern "C" fn do_step(
    c: binding::fmiComponent,
    current_communication_point: f64,
    communication_step_size: f64,
    _new_step: binding::fmiBoolean,
) -> binding::fmiStatus {
    let model = unsafe { Model::get(c) };
    if communication_step_size < 0.0 {
        model.log(binding::fmiStatus_fmiDiscard, c"warning", c"Negative step size");
        return binding::fmiStatus_fmiDiscard;
    }
    for x in &mut model.reals[..N_STATES] {
        *x -= *x * communication_step_size;
    }
    model.time = current_communication_point + communication_step_size;
    binding::fmiStatus_fmiOK
}

unsafe extern "C" fn get_status(
    _c: binding::fmiComponent,
    _s: binding::fmiStatusKind,
    value: *mut binding::fmiStatus,
) -> binding::fmiStatus {
    unsafe { *value = binding::fmiStatus_fmiOK };
    binding::fmiStatus_fmiOK
}

unsafe extern "C" fn get_real_status(
    c: binding::fmiComponent,
    s: binding::fmiStatusKind,
    value: *mut f64,
) -> binding::fmiStatus {
    if s != binding::fmiStatusKind_fmiLastSuccessfulTime {
        return binding::fmiStatus_fmiDiscard;
    }
    unsafe { *value = Model::get(c).time };
    binding::fmiStatus_fmiOK
}

unsafe extern "C" fn get_integer_status(
    _c: binding::fmiComponent,
    _s: binding::fmiStatusKind,
    _value: *mut i32,
) -> binding::fmiStatus {
    binding::fmiStatus_fmiDiscard
}

unsafe extern "C" fn get_boolean_status(
    _c: binding::fmiComponent,
    _s: binding::fmiStatusKind,
    value: *mut binding::fmiBoolean,
) -> binding::fmiStatus {
    unsafe { *value = binding::fmiFalse };
    binding::fmiStatus_fmiOK
}

unsafe extern "C" fn get_string_status(
    _c: binding::fmiComponent,
    _s: binding::fmiStatusKind,
    value: *mut binding::fmiString,
) -> binding::fmiStatus {
    unsafe { *value = c"idle".as_ptr() };
    binding::fmiStatus_fmiOK
}

fn common() -> SymbolTable {
    let mut table = SymbolTable::new();
    symbols!(table, binding, prefix = MODEL, {
        fmiGetVersion => get_version,
        fmiSetDebugLogging => set_debug_logging,
        fmiSetReal => set_real,
        fmiSetInteger => set_integer,
        fmiSetBoolean => set_boolean,
        fmiSetString => set_string,
        fmiGetReal => get_real,
        fmiGetInteger => get_integer,
        fmiGetBoolean => get_boolean,
        fmiGetString => get_string,
    });
    table
}

pub fn model_exchange() -> SymbolTable {
    let mut table = common();
    symbols!(table, binding, prefix = MODEL, {
        fmiGetModelTypesPlatform => get_platform,
        fmiInstantiateModel => instantiate_model,
        fmiFreeModelInstance => free_instance,
        fmiSetTime => set_time,
        fmiSetContinuousStates => set_continuous_states,
        fmiCompletedIntegratorStep => completed_integrator_step,
        fmiInitialize => initialize,
        fmiGetDerivatives => get_derivatives,
        fmiGetEventIndicators => get_event_indicators,
        fmiEventUpdate => event_update,
        fmiGetContinuousStates => get_continuous_states,
        fmiGetNominalContinuousStates => get_nominal_continuous_states,
        fmiGetStateValueReferences => get_state_value_references,
        fmiTerminate => ok,
    });
    table
}

pub fn co_simulation() -> SymbolTable {
    let mut table = common();
    symbols!(table, binding, prefix = MODEL, {
        fmiGetTypesPlatform => get_platform,
        fmiInstantiateSlave => instantiate_slave,
        fmiInitializeSlave => initialize_slave,
        fmiTerminateSlave => ok,
        fmiResetSlave => reset_slave,
        fmiFreeSlaveInstance => free_instance,
        fmiSetRealInputDerivatives => set_real_input_derivatives,
        fmiGetRealOutputDerivatives => get_real_output_derivatives,
        fmiCancelStep => ok,
        fmiDoStep => do_step,
        fmiGetStatus => get_status,
        fmiGetRealStatus => get_real_status,
        fmiGetIntegerStatus => get_integer_status,
        fmiGetBooleanStatus => get_boolean_status,
        fmiGetStringStatus => get_string_status,
    });
    table
}
