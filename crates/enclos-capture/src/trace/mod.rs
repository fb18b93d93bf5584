mod process_group;
mod status;
mod strace;

use chrono::{DateTime, Utc};

use crate::error::CaptureError;

pub use status::{TraceeFailure, TraceeStatus};
pub use strace::StraceTracer;

/// The command to run under a tracer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRequest {
    pub command: String,
    pub args: Vec<String>,
}

impl TraceRequest {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    /// Split `argv` into command and arguments. `None` if `argv` is empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (command, args) = argv.split_first()?;
        Some(Self::new(command.clone(), args.to_vec()))
    }

    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.command.clone()
        } else {
            format!("{} {}", self.command, self.args.join(" "))
        }
    }
}

/// Everything a tracer hands back once the traced process tree has exited.
#[derive(Debug, Clone)]
pub struct RawTrace {
    /// The tracer's event stream, separate from the tracee's own output.
    pub diagnostics: String,
    pub status: TraceeStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// A syscall-tracing engine that runs a command and captures its
/// process-creation events for the whole process tree.
pub trait ProcessTracer {
    /// Run `request` to completion. Returns `CaptureError::Launch` only when
    /// the tracer or the command could not be started; a command that runs
    /// and fails is reported through `RawTrace::status`.
    fn run(&self, request: &TraceRequest) -> Result<RawTrace, CaptureError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_argv() {
        let argv = vec!["ls".to_string(), "-l".to_string(), "--color=never".to_string()];
        let request = TraceRequest::from_argv(&argv).unwrap();
        assert_eq!(request.command, "ls");
        assert_eq!(request.args, vec!["-l", "--color=never"]);
        assert_eq!(request.display(), "ls -l --color=never");

        assert!(TraceRequest::from_argv(&[]).is_none());
        assert_eq!(TraceRequest::new("true", vec![]).display(), "true");
    }
}
