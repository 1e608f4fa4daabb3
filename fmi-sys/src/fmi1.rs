//! FMI 1.0 types for Model Exchange (`fmiModelFunctions.h`) and Co-Simulation
//! (`fmiFunctions.h`).
//!
//! FMI 1.0 entry points are exported with the model identifier as prefix, e.g.
//! `BouncingBall_fmiSetReal`. The typedefs below describe the unprefixed signatures.
#![allow(non_upper_case_globals, non_camel_case_types, non_snake_case, clippy::all)]

use std::os::raw::{c_char, c_int, c_uint, c_void};

pub const fmiVersion: &[u8; 4] = b"1.0\0";
pub const fmiModelTypesPlatform: &[u8; 11] = b"standard32\0";
pub const fmiPlatform: &[u8; 11] = b"standard32\0";

pub type fmiComponent = *mut c_void;
pub type fmiValueReference = c_uint;
pub type fmiReal = f64;
pub type fmiInteger = c_int;
pub type fmiBoolean = c_char;
pub type fmiString = *const c_char;

pub const fmiTrue: fmiBoolean = 1;
pub const fmiFalse: fmiBoolean = 0;
pub const fmiUndefinedValueReference: fmiValueReference = c_uint::MAX;

pub type fmiStatus = c_uint;
pub const fmiStatus_fmiOK: fmiStatus = 0;
pub const fmiStatus_fmiWarning: fmiStatus = 1;
pub const fmiStatus_fmiDiscard: fmiStatus = 2;
pub const fmiStatus_fmiError: fmiStatus = 3;
pub const fmiStatus_fmiFatal: fmiStatus = 4;
/// Co-Simulation only.
pub const fmiStatus_fmiPending: fmiStatus = 5;

pub type fmiStatusKind = c_uint;
pub const fmiStatusKind_fmiDoStepStatus: fmiStatusKind = 0;
pub const fmiStatusKind_fmiPendingStatus: fmiStatusKind = 1;
pub const fmiStatusKind_fmiLastSuccessfulTime: fmiStatusKind = 2;

pub type fmiCallbackLogger = Option<
    unsafe extern "C" fn(
        c: fmiComponent,
        instanceName: fmiString,
        status: fmiStatus,
        category: fmiString,
        message: fmiString,
        ...
    ),
>;
pub type fmiCallbackAllocateMemory =
    Option<unsafe extern "C" fn(nobj: usize, size: usize) -> *mut c_void>;
pub type fmiCallbackFreeMemory = Option<unsafe extern "C" fn(obj: *mut c_void)>;
pub type fmiStepFinished = Option<unsafe extern "C" fn(c: fmiComponent, status: fmiStatus)>;

/// `fmiCallbackFunctions` as declared in `fmiModelFunctions.h`.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct fmiMECallbackFunctions {
    pub logger: fmiCallbackLogger,
    pub allocateMemory: fmiCallbackAllocateMemory,
    pub freeMemory: fmiCallbackFreeMemory,
}

/// `fmiCallbackFunctions` as declared in `fmiFunctions.h`.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct fmiCSCallbackFunctions {
    pub logger: fmiCallbackLogger,
    pub allocateMemory: fmiCallbackAllocateMemory,
    pub freeMemory: fmiCallbackFreeMemory,
    pub stepFinished: fmiStepFinished,
}

#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct fmiEventInfo {
    pub iterationConverged: fmiBoolean,
    pub stateValueReferencesChanged: fmiBoolean,
    pub stateValuesChanged: fmiBoolean,
    pub terminateSimulation: fmiBoolean,
    pub upcomingTimeEvent: fmiBoolean,
    pub nextEventTime: fmiReal,
}

// Common

pub type fmiGetVersionTYPE = unsafe extern "C" fn() -> *const c_char;
pub type fmiSetDebugLoggingTYPE =
    unsafe extern "C" fn(c: fmiComponent, loggingOn: fmiBoolean) -> fmiStatus;

pub type fmiSetRealTYPE = unsafe extern "C" fn(
    c: fmiComponent,
    vr: *const fmiValueReference,
    nvr: usize,
    value: *const fmiReal,
) -> fmiStatus;
pub type fmiSetIntegerTYPE = unsafe extern "C" fn(
    c: fmiComponent,
    vr: *const fmiValueReference,
    nvr: usize,
    value: *const fmiInteger,
) -> fmiStatus;
pub type fmiSetBooleanTYPE = unsafe extern "C" fn(
    c: fmiComponent,
    vr: *const fmiValueReference,
    nvr: usize,
    value: *const fmiBoolean,
) -> fmiStatus;
pub type fmiSetStringTYPE = unsafe extern "C" fn(
    c: fmiComponent,
    vr: *const fmiValueReference,
    nvr: usize,
    value: *const fmiString,
) -> fmiStatus;

pub type fmiGetRealTYPE = unsafe extern "C" fn(
    c: fmiComponent,
    vr: *const fmiValueReference,
    nvr: usize,
    value: *mut fmiReal,
) -> fmiStatus;
pub type fmiGetIntegerTYPE = unsafe extern "C" fn(
    c: fmiComponent,
    vr: *const fmiValueReference,
    nvr: usize,
    value: *mut fmiInteger,
) -> fmiStatus;
pub type fmiGetBooleanTYPE = unsafe extern "C" fn(
    c: fmiComponent,
    vr: *const fmiValueReference,
    nvr: usize,
    value: *mut fmiBoolean,
) -> fmiStatus;
pub type fmiGetStringTYPE = unsafe extern "C" fn(
    c: fmiComponent,
    vr: *const fmiValueReference,
    nvr: usize,
    value: *mut fmiString,
) -> fmiStatus;

// Model Exchange

pub type fmiGetModelTypesPlatformTYPE = unsafe extern "C" fn() -> *const c_char;
pub type fmiInstantiateModelTYPE = unsafe extern "C" fn(
    instanceName: fmiString,
    GUID: fmiString,
    functions: fmiMECallbackFunctions,
    loggingOn: fmiBoolean,
) -> fmiComponent;
pub type fmiFreeModelInstanceTYPE = unsafe extern "C" fn(c: fmiComponent);
pub type fmiSetTimeTYPE = unsafe extern "C" fn(c: fmiComponent, time: fmiReal) -> fmiStatus;
pub type fmiSetContinuousStatesTYPE =
    unsafe extern "C" fn(c: fmiComponent, x: *const fmiReal, nx: usize) -> fmiStatus;
pub type fmiCompletedIntegratorStepTYPE =
    unsafe extern "C" fn(c: fmiComponent, callEventUpdate: *mut fmiBoolean) -> fmiStatus;
pub type fmiInitializeTYPE = unsafe extern "C" fn(
    c: fmiComponent,
    toleranceControlled: fmiBoolean,
    relativeTolerance: fmiReal,
    eventInfo: *mut fmiEventInfo,
) -> fmiStatus;
pub type fmiGetDerivativesTYPE =
    unsafe extern "C" fn(c: fmiComponent, derivatives: *mut fmiReal, nx: usize) -> fmiStatus;
pub type fmiGetEventIndicatorsTYPE =
    unsafe extern "C" fn(c: fmiComponent, eventIndicators: *mut fmiReal, ni: usize) -> fmiStatus;
pub type fmiEventUpdateTYPE = unsafe extern "C" fn(
    c: fmiComponent,
    intermediateResults: fmiBoolean,
    eventInfo: *mut fmiEventInfo,
) -> fmiStatus;
pub type fmiGetContinuousStatesTYPE =
    unsafe extern "C" fn(c: fmiComponent, states: *mut fmiReal, nx: usize) -> fmiStatus;
pub type fmiGetNominalContinuousStatesTYPE =
    unsafe extern "C" fn(c: fmiComponent, x_nominal: *mut fmiReal, nx: usize) -> fmiStatus;
pub type fmiGetStateValueReferencesTYPE =
    unsafe extern "C" fn(c: fmiComponent, vrx: *mut fmiValueReference, nx: usize) -> fmiStatus;
pub type fmiTerminateTYPE = unsafe extern "C" fn(c: fmiComponent) -> fmiStatus;

// Co-Simulation

pub type fmiGetTypesPlatformTYPE = unsafe extern "C" fn() -> *const c_char;
pub type fmiInstantiateSlaveTYPE = unsafe extern "C" fn(
    instanceName: fmiString,
    fmuGUID: fmiString,
    fmuLocation: fmiString,
    mimeType: fmiString,
    timeout: fmiReal,
    visible: fmiBoolean,
    interactive: fmiBoolean,
    functions: fmiCSCallbackFunctions,
    loggingOn: fmiBoolean,
) -> fmiComponent;
pub type fmiInitializeSlaveTYPE = unsafe extern "C" fn(
    c: fmiComponent,
    tStart: fmiReal,
    StopTimeDefined: fmiBoolean,
    tStop: fmiReal,
) -> fmiStatus;
pub type fmiTerminateSlaveTYPE = unsafe extern "C" fn(c: fmiComponent) -> fmiStatus;
pub type fmiResetSlaveTYPE = unsafe extern "C" fn(c: fmiComponent) -> fmiStatus;
pub type fmiFreeSlaveInstanceTYPE = unsafe extern "C" fn(c: fmiComponent);
pub type fmiSetRealInputDerivativesTYPE = unsafe extern "C" fn(
    c: fmiComponent,
    vr: *const fmiValueReference,
    nvr: usize,
    order: *const fmiInteger,
    value: *const fmiReal,
) -> fmiStatus;
pub type fmiGetRealOutputDerivativesTYPE = unsafe extern "C" fn(
    c: fmiComponent,
    vr: *const fmiValueReference,
    nvr: usize,
    order: *const fmiInteger,
    value: *mut fmiReal,
) -> fmiStatus;
pub type fmiCancelStepTYPE = unsafe extern "C" fn(c: fmiComponent) -> fmiStatus;
pub type fmiDoStepTYPE = unsafe extern "C" fn(
    c: fmiComponent,
    currentCommunicationPoint: fmiReal,
    communicationStepSize: fmiReal,
    newStep: fmiBoolean,
) -> fmiStatus;
pub type fmiGetStatusTYPE =
    unsafe extern "C" fn(c: fmiComponent, s: fmiStatusKind, value: *mut fmiStatus) -> fmiStatus;
pub type fmiGetRealStatusTYPE =
    unsafe extern "C" fn(c: fmiComponent, s: fmiStatusKind, value: *mut fmiReal) -> fmiStatus;
pub type fmiGetIntegerStatusTYPE =
    unsafe extern "C" fn(c: fmiComponent, s: fmiStatusKind, value: *mut fmiInteger) -> fmiStatus;
pub type fmiGetBooleanStatusTYPE =
    unsafe extern "C" fn(c: fmiComponent, s: fmiStatusKind, value: *mut fmiBoolean) -> fmiStatus;
pub type fmiGetStringStatusTYPE =
    unsafe extern "C" fn(c: fmiComponent, s: fmiStatusKind, value: *mut fmiString) -> fmiStatus;

#[allow(clippy::unnecessary_operation, clippy::identity_op)]
const _: () = {
    const P: usize = ::std::mem::size_of::<*const c_void>();
    ["Size of fmiBoolean"][::std::mem::size_of::<fmiBoolean>() - 1usize];
    ["Size of fmiValueReference"][::std::mem::size_of::<fmiValueReference>() - 4usize];
    ["Size of fmiStatus"][::std::mem::size_of::<fmiStatus>() - 4usize];
    ["Size of fmiMECallbackFunctions"][::std::mem::size_of::<fmiMECallbackFunctions>() - 3 * P];
    ["Alignment of fmiMECallbackFunctions"]
        [::std::mem::align_of::<fmiMECallbackFunctions>() - P];
    ["Offset of field: fmiMECallbackFunctions::freeMemory"]
        [::std::mem::offset_of!(fmiMECallbackFunctions, freeMemory) - 2 * P];
    ["Size of fmiCSCallbackFunctions"][::std::mem::size_of::<fmiCSCallbackFunctions>() - 4 * P];
    ["Offset of field: fmiCSCallbackFunctions::stepFinished"]
        [::std::mem::offset_of!(fmiCSCallbackFunctions, stepFinished) - 3 * P];
    ["Offset of field: fmiEventInfo::upcomingTimeEvent"]
        [::std::mem::offset_of!(fmiEventInfo, upcomingTimeEvent) - 4usize];
};

#[cfg(target_pointer_width = "64")]
#[allow(clippy::unnecessary_operation, clippy::identity_op)]
const _: () = {
    ["Size of fmiEventInfo"][::std::mem::size_of::<fmiEventInfo>() - 16usize];
    ["Alignment of fmiEventInfo"][::std::mem::align_of::<fmiEventInfo>() - 8usize];
    ["Offset of field: fmiEventInfo::nextEventTime"]
        [::std::mem::offset_of!(fmiEventInfo, nextEventTime) - 8usize];
};
