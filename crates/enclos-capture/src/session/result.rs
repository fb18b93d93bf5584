use chrono::{DateTime, Duration, Utc};

use enclos_core::DependencySet;

use crate::trace::{TraceeFailure, TraceeStatus};

/// How the traced command ended. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceResult {
    pub status: TraceeStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl TraceResult {
    pub fn tracee_failure(&self) -> Option<TraceeFailure> {
        self.status.failure()
    }

    pub fn duration(&self) -> Duration {
        self.finished_at - self.started_at
    }

    /// Exit code for the process that ran the trace, once the manifest has
    /// been written: the tracee's own status decides. Launch and manifest
    /// failures never reach this point; they exit 1 through the error path.
    pub fn exit_code(&self) -> u8 {
        self.status.exit_code()
    }
}

/// Dependencies of one finished trace run, plus how the tracee ended.
#[derive(Debug, Clone)]
pub struct TraceOutcome {
    pub dependencies: DependencySet,
    pub result: TraceResult,
}
