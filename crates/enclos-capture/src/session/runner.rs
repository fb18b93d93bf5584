use std::path::Path;

use enclos_core::write_manifest;

use super::result::{TraceOutcome, TraceResult};
use crate::error::CaptureError;
use crate::events::{collect, parse_events};
use crate::trace::{ProcessTracer, TraceRequest};

/// Run `request` under `tracer` and collect the executables its process
/// tree ran.
///
/// A traced command that fails still yields everything it exec'd before
/// failing; the failure is carried in [`TraceResult`]. Only a launch failure
/// returns `Err`.
pub fn run_trace(
    tracer: &dyn ProcessTracer,
    request: &TraceRequest,
) -> Result<TraceOutcome, CaptureError> {
    tracing::info!(command = %request.command, args = ?request.args, "starting trace");

    let raw = tracer.run(request)?;
    let dependencies = collect(parse_events(&raw.diagnostics));

    let result = TraceResult {
        status: raw.status,
        started_at: raw.started_at,
        finished_at: raw.finished_at,
    };
    if let Some(failure) = result.tracee_failure() {
        tracing::warn!("{failure}; keeping the {} dependencies seen so far", dependencies.len());
    }

    Ok(TraceOutcome {
        dependencies,
        result,
    })
}

/// Trace `request` and write its dependencies to the manifest at
/// `manifest`, whether or not the traced command succeeded.
pub fn record(
    tracer: &dyn ProcessTracer,
    request: &TraceRequest,
    manifest: &Path,
) -> Result<TraceOutcome, CaptureError> {
    let outcome = run_trace(tracer, request)?;
    write_manifest(&outcome.dependencies, manifest)?;
    Ok(outcome)
}
