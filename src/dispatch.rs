//! The call path shared by all FMI versions.
//!
//! Every FMU call goes through [`Instance::invoke`], which binds the function table of the
//! expected version, and [`Instance::finish`], which converts the returned status, folds it into
//! the worst status (FMI 3.0 only) and renders the call for the function-call logger.

use std::{ffi::c_void, fmt};

use crate::{instance::HostCallbacks, Error, FmiVersion, Instance, Status};

/// The function tables an instance can be bound to.
#[derive(Default)]
pub(crate) enum Functions {
    #[default]
    Unbound,
    #[cfg(feature = "fmi1")]
    Fmi1(Box<crate::fmi1::Fmi1Functions>),
    #[cfg(feature = "fmi2")]
    Fmi2(Box<crate::fmi2::Fmi2Functions>),
    #[cfg(feature = "fmi3")]
    Fmi3(Box<crate::fmi3::Fmi3Functions>),
}

impl Functions {
    pub(crate) fn version(&self) -> Option<FmiVersion> {
        match self {
            Functions::Unbound => None,
            #[cfg(feature = "fmi1")]
            Functions::Fmi1(_) => Some(FmiVersion::Fmi1),
            #[cfg(feature = "fmi2")]
            Functions::Fmi2(_) => Some(FmiVersion::Fmi2),
            #[cfg(feature = "fmi3")]
            Functions::Fmi3(_) => Some(FmiVersion::Fmi3),
        }
    }
}

/// What the dispatcher needs to know about an FMI version.
pub(crate) trait VersionDescriptor {
    const VERSION: FmiVersion;
    /// Prepended to the function name in call logs, e.g. `fmi2` for `fmi2DoStep(...)`.
    const PREFIX: &'static str;
    /// Whether the worst status since the last reset is tracked.
    const TRACKS_WORST_STATUS: bool = false;

    type Functions;
    type RawStatus: Copy;
    /// Held for the duration of each FMU call.
    type Context;

    fn status(raw: Self::RawStatus) -> Status;
    fn functions(functions: &Functions) -> Option<&Self::Functions>;
    fn enter(callbacks: &HostCallbacks) -> Self::Context;
}

/// Unwrap an optional entry of a function table.
pub(crate) fn resolved<F>(function: Option<F>, symbol: &str) -> Result<F, Error> {
    function.ok_or_else(|| {
        log::error!("{symbol} is not provided by the FMU");
        Error::MissingSymbol {
            symbol: symbol.to_owned(),
        }
    })
}

impl Instance {
    /// The function table and component for a call through version `V`.
    pub(crate) fn bind<V: VersionDescriptor>(&self) -> Result<(&V::Functions, *mut c_void), Error> {
        match V::functions(&self.functions) {
            Some(functions) => Ok((functions, self.component)),
            None => Err(match self.functions.version() {
                Some(found) => Error::VersionMismatch {
                    found,
                    expected: V::VERSION,
                },
                None => Error::NotInstantiated {
                    instance: self.name().to_owned(),
                },
            }),
        }
    }

    /// Run `call` against the bound function table of version `V`.
    pub(crate) fn invoke<V: VersionDescriptor, R>(
        &self,
        call: impl FnOnce(&V::Functions, *mut c_void) -> R,
    ) -> Result<R, Error> {
        let _context = V::enter(&self.callbacks);
        let (functions, component) = self.bind::<V>()?;
        Ok(call(functions, component))
    }

    /// Complete a call to `{PREFIX}{name}`: convert the raw status, track it and log the call
    /// with `args` as its rendered argument list.
    pub(crate) fn finish<V: VersionDescriptor>(
        &mut self,
        raw: V::RawStatus,
        name: &str,
        args: fmt::Arguments<'_>,
    ) -> Status {
        let status = V::status(raw);
        if V::TRACKS_WORST_STATUS {
            self.status = self.status.escalate(status);
        }
        self.log_call(V::PREFIX, name, status, args);
        status
    }

    /// Report a call to the function-call logger, if one is installed and enabled.
    pub(crate) fn log_call(
        &mut self,
        prefix: &str,
        name: &str,
        status: Status,
        args: fmt::Arguments<'_>,
    ) {
        if !self.log_function_calls {
            return;
        }
        let Some(log_function_call) = &self.callbacks.log_function_call else {
            return;
        };

        self.buffer.clear();
        if let Err(err) = self
            .buffer
            .append_fmt(format_args!("{prefix}{name}({args})"))
        {
            log::warn!("Could not render call to {prefix}{name}: {err}");
            return;
        }
        log_function_call(&self.callbacks.instance_name, status, self.buffer.as_str());
    }

    /// Move the state machine along after a successful transition call.
    pub(crate) fn transition(&mut self, transition: crate::Transition) -> Option<crate::State> {
        let interface_type = self.interface_type?;
        let next = self.state.next(transition, interface_type)?;
        log::trace!(
            "Instance '{}': {:?} -> {next:?} on {transition:?}",
            self.name(),
            self.state
        );
        self.state = next;
        Some(next)
    }
}
