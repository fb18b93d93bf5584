//! Runs a command under a syscall tracer and turns the tracer's event
//! stream into the set of executables the command's process tree ran.

pub mod error;
pub mod events;
pub mod session;
pub mod trace;

pub use error::CaptureError;
pub use events::{collect, parse_events, parse_line, Collector, PROCESS_CREATION_MARKER};
pub use session::{record, run_trace, TraceOutcome, TraceResult};
pub use trace::{ProcessTracer, RawTrace, StraceTracer, TraceRequest, TraceeFailure, TraceeStatus};
