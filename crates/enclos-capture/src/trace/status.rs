use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

use thiserror::Error;

/// How the traced command terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceeStatus {
    Exited(i32),
    Signaled(i32),
}

/// The traced command did not succeed. Reported alongside the collected
/// dependencies, never in place of them.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceeFailure {
    #[error("traced command exited with status {0}")]
    Exited(i32),

    #[error("traced command was killed by signal {0}")]
    Signaled(i32),
}

impl TraceeStatus {
    pub fn success(&self) -> bool {
        matches!(self, Self::Exited(0))
    }

    pub fn failure(&self) -> Option<TraceeFailure> {
        match *self {
            Self::Exited(0) => None,
            Self::Exited(code) => Some(TraceeFailure::Exited(code)),
            Self::Signaled(signal) => Some(TraceeFailure::Signaled(signal)),
        }
    }

    /// Process exit code that mirrors this status: the tracee's own code,
    /// or `128 + signal` the way shells report signal deaths. Codes a
    /// process cannot exit with collapse to 1.
    pub fn exit_code(&self) -> u8 {
        match *self {
            Self::Exited(code) => u8::try_from(code).unwrap_or(1),
            Self::Signaled(signal) => u8::try_from(signal.saturating_add(128)).unwrap_or(255),
        }
    }
}

impl std::fmt::Display for TraceeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exited(code) => write!(f, "exit {code}"),
            Self::Signaled(signal) => write!(f, "signal {signal}"),
        }
    }
}

impl From<ExitStatus> for TraceeStatus {
    fn from(status: ExitStatus) -> Self {
        match (status.code(), status.signal()) {
            (Some(code), _) => Self::Exited(code),
            (None, Some(signal)) => Self::Signaled(signal),
            (None, None) => Self::Exited(1),
        }
    }
}
