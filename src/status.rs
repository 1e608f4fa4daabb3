//! The FMI status lattice shared by all versions.

use std::{cmp::Ordering, fmt::Display};

/// Status returned by every FMI function that returns a status.
///
/// Statuses are ordered by severity: `OK < Warning < Discard < Error < Fatal`. [`Status::Pending`]
/// signals an outstanding asynchronous Co-Simulation step rather than a failure and is not
/// comparable to any other status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// All well
    #[default]
    OK,
    /// Things are not quite right, but the computation can continue.
    Warning,
    /// The FMU could not carry out the request, e.g. a step was rejected. The importer decides
    /// whether the simulation can continue.
    Discard,
    /// The FMU encountered an error. The instance can only be reset or freed, or restored from a
    /// previously stored FMU state.
    Error,
    /// The model computations are irreparably corrupted for all FMU instances.
    Fatal,
    /// Only returned by the Co-Simulation interface of FMI 1.0 and 2.0 when a step is computed
    /// asynchronously.
    Pending,
}

impl Status {
    /// Convert the status code returned by an FMU. The codes are the same in all FMI versions,
    /// codes outside of the lattice are treated as [`Status::Error`].
    pub fn from_code(code: std::os::raw::c_uint) -> Status {
        match code {
            0 => Status::OK,
            1 => Status::Warning,
            2 => Status::Discard,
            3 => Status::Error,
            4 => Status::Fatal,
            5 => Status::Pending,
            _ => {
                log::warn!("Unknown FMI status code {code}");
                Status::Error
            }
        }
    }

    fn severity(self) -> Option<u8> {
        match self {
            Status::OK => Some(0),
            Status::Warning => Some(1),
            Status::Discard => Some(2),
            Status::Error => Some(3),
            Status::Fatal => Some(4),
            Status::Pending => None,
        }
    }

    /// Convert to [`Result<StatusRes, StatusError>`]
    #[inline]
    pub fn ok(self) -> Result<StatusRes, StatusError> {
        self.into()
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error | Status::Fatal)
    }

    /// The more severe of `self` and `other`. Ties and incomparable pairs keep `self`.
    #[must_use]
    pub fn escalate(self, other: Status) -> Status {
        if other > self {
            other
        } else {
            self
        }
    }
}

impl PartialOrd for Status {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        Some(self.severity()?.cmp(&other.severity()?))
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Status::OK => "OK",
            Status::Warning => "Warning",
            Status::Discard => "Discard",
            Status::Error => "Error",
            Status::Fatal => "Fatal",
            Status::Pending => "Pending",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusRes {
    OK,
    Warning,
    /// The Co-Simulation step runs asynchronously, query its progress with `get_status`.
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StatusError {
    /// For Model Exchange: a smaller step size is recommended. For Co-Simulation: the slave could
    /// not complete the step or return the requested status information.
    #[error("Discard")]
    Discard,
    /// The simulation cannot be continued with this FMU instance.
    #[error("Error")]
    Error,
    /// The model computations are irreparably corrupted for all FMU instances.
    #[error("Fatal")]
    Fatal,
}

impl From<Status> for Result<StatusRes, StatusError> {
    fn from(status: Status) -> Self {
        match status {
            Status::OK => Ok(StatusRes::OK),
            Status::Warning => Ok(StatusRes::Warning),
            Status::Pending => Ok(StatusRes::Pending),
            Status::Discard => Err(StatusError::Discard),
            Status::Error => Err(StatusError::Error),
            Status::Fatal => Err(StatusError::Fatal),
        }
    }
}

impl From<StatusRes> for Status {
    fn from(res: StatusRes) -> Self {
        match res {
            StatusRes::OK => Status::OK,
            StatusRes::Warning => Status::Warning,
            StatusRes::Pending => Status::Pending,
        }
    }
}
