use std::ffi::OsString;
use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use chrono::Utc;
use nix::sys::signal::Signal;
use tokio::signal::unix::{signal, SignalKind};

use enclos_core::config::DEFAULT_TRACER;

use super::process_group::{escalate, ProcessGroup};
use super::{ProcessTracer, RawTrace, TraceRequest, TraceeStatus};
use crate::error::CaptureError;
use crate::events::parse_events;

/// Syscalls strace is asked to record: program image loads only, which keeps
/// the event volume bounded however busy the traced tree is.
const TRACED_SYSCALLS: &str = "trace=execve";

/// Runs commands under `strace -f`, following every fork of the tree.
///
/// The traced command keeps the caller's stdout and stderr; strace writes its
/// event stream to a private temporary file (`-o`), so nothing the command
/// prints can be mistaken for an event.
#[derive(Debug, Clone)]
pub struct StraceTracer {
    program: String,
}

impl Default for StraceTracer {
    fn default() -> Self {
        Self::new(DEFAULT_TRACER)
    }
}

impl StraceTracer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// strace argument vector for `request`, writing events to `output`.
    pub fn arguments(request: &TraceRequest, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-f".into(),
            "-e".into(),
            TRACED_SYSCALLS.into(),
            "-o".into(),
            output.as_os_str().to_owned(),
            "--".into(),
            request.command.clone().into(),
        ];
        args.extend(request.args.iter().map(OsString::from));
        args
    }

    fn resolve(&self, request: &TraceRequest) -> Result<PathBuf, CaptureError> {
        if request.command.is_empty() {
            return Err(CaptureError::launch("<empty>", "no command given"));
        }
        let tracer = which::which(&self.program).map_err(|e| {
            CaptureError::launch(&self.program, format!("tracing engine not found: {e}"))
        })?;
        which::which(&request.command).map_err(|e| {
            CaptureError::launch(&request.command, format!("command not found: {e}"))
        })?;
        Ok(tracer)
    }
}

impl ProcessTracer for StraceTracer {
    fn run(&self, request: &TraceRequest) -> Result<RawTrace, CaptureError> {
        let tracer = self.resolve(request)?;

        let output = tempfile::Builder::new()
            .prefix("enclos-trace-")
            .suffix(".log")
            .tempfile()?;
        let args = Self::arguments(request, output.path());
        tracing::debug!("Running {} {:?}", tracer.display(), args);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let started_at = Utc::now();
        let status: TraceeStatus = runtime.block_on(supervise(&tracer, &args))?.into();
        let finished_at = Utc::now();
        tracing::info!(%status, "tracer exited");

        let bytes = std::fs::read(output.path())?;
        let diagnostics = String::from_utf8_lossy(&bytes).into_owned();
        tracing::debug!("Captured {} bytes of trace output", bytes.len());

        // A tracer that fails without recording a single exec never got the
        // command running (ptrace denied, bad flags, interrupted at startup).
        if !status.success() && !parse_events(&diagnostics).any(|e| e.is_process_creation()) {
            return Err(CaptureError::launch(
                &self.program,
                format!("tracer failed with {status} before `{}` started", request.command),
            ));
        }

        Ok(RawTrace {
            diagnostics,
            status,
            started_at,
            finished_at,
        })
    }
}

/// Spawn the tracer in its own process group and wait for it, forwarding
/// interrupts to the whole group so no traced process outlives us.
///
/// The group is not made the terminal's foreground group, so a traced
/// command that changes terminal settings is stopped by `SIGTTOU`. Once a
/// signal kind is registered here tokio keeps its handler installed for the
/// rest of the process: a Ctrl-C after the tracer exits, while the manifest
/// is written, is swallowed.
async fn supervise(tracer: &Path, args: &[OsString]) -> Result<ExitStatus, CaptureError> {
    // Registered before spawning so an early Ctrl-C is forwarded rather than
    // killing us and orphaning the group.
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    let mut hangup = signal(SignalKind::hangup())?;

    let mut command = std::process::Command::new(tracer);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .process_group(0);
    let mut child = tokio::process::Command::from(command)
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| CaptureError::launch(tracer.display().to_string(), e))?;

    let group = child.id().and_then(ProcessGroup::led_by).ok_or_else(|| {
        CaptureError::launch(tracer.display().to_string(), "tracer exited before supervision")
    })?;
    let mut guard = group.guard();
    let mut forwarded = 0;

    let status = loop {
        let received = tokio::select! {
            status = child.wait() => break status?,
            _ = interrupt.recv() => Signal::SIGINT,
            _ = terminate.recv() => Signal::SIGTERM,
            _ = hangup.recv() => Signal::SIGHUP,
        };
        forwarded += 1;
        let outgoing = escalate(received, forwarded);
        tracing::info!("Received {received}, forwarding {outgoing} to traced processes");
        group.signal(outgoing);
    };

    guard.disarm();
    Ok(status)
}
