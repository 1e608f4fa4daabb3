//! Host callbacks that forward FMU messages and call traces to the [`log`] facade.
//!
//! Both functions can be passed to [`crate::InstanceBuilder`] directly:
//!
//! ```rust,no_run
//! use fmi_instance::{logger, Instance};
//!
//! let instance = Instance::builder("inst1")
//!     .log_message(logger::forward_message)
//!     .log_function_call(logger::forward_function_call)
//!     .build()
//!     .unwrap();
//! ```

use std::ffi::{c_char, CStr};

use crate::Status;

/// The log level FMU messages with `status` are emitted at.
pub fn level(status: Status) -> log::Level {
    match status {
        Status::OK => log::Level::Info,
        Status::Warning | Status::Discard => log::Level::Warn,
        Status::Error | Status::Fatal => log::Level::Error,
        Status::Pending => log::Level::Debug,
    }
}

/// Emit a message logged by the FMU, with the instance name as the target.
pub fn forward_message(instance_name: &str, status: Status, category: &str, message: &str) {
    log::logger().log(
        &log::Record::builder()
            .args(format_args!("[{category}] {message}"))
            .level(level(status))
            .module_path(Some("fmu"))
            .target(instance_name)
            .build(),
    );
}

/// Emit a traced FMI call. Successful calls are logged at trace level.
pub fn forward_function_call(instance_name: &str, status: Status, message: &str) {
    let level = match status {
        Status::OK => log::Level::Trace,
        _ => level(status),
    };
    log::logger().log(
        &log::Record::builder()
            .args(format_args!("{message} -> {status}"))
            .level(level)
            .module_path(Some("fmi"))
            .target(instance_name)
            .build(),
    );
}

/// Borrow a string passed in by the FMU. Null pointers read as the empty string.
///
/// # Safety
/// A non-null `s` must point to a null-terminated string that outlives the returned borrow.
pub(crate) unsafe fn fmu_str<'a>(s: *const c_char) -> std::borrow::Cow<'a, str> {
    if s.is_null() {
        "".into()
    } else {
        unsafe { CStr::from_ptr(s) }.to_string_lossy()
    }
}
