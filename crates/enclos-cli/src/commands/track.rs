use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use enclos_capture::{record, StraceTracer, TraceRequest};
use enclos_core::EnclosConfig;

use crate::output::format::format_trace_summary;

#[derive(Args)]
#[command(disable_help_flag = true)]
pub struct TrackArgs {
    /// Command to trace, followed by its arguments
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        required = true,
        value_name = "COMMAND"
    )]
    pub command: Vec<String>,
}

pub fn run(args: &TrackArgs, config: &EnclosConfig) -> Result<ExitCode> {
    let request = TraceRequest::from_argv(&args.command)
        .context("No command specified. Usage: enclos track <command> [args...]")?;

    eprintln!("Tracking: {}", request.display());
    eprintln!("{}", "-".repeat(60));

    let tracer = StraceTracer::new(&config.tracer);
    let outcome = record(&tracer, &request, &config.manifest)
        .with_context(|| format!("Failed to track `{}`", request.display()))?;

    eprintln!("{}", "-".repeat(60));
    eprint!("{}", format_trace_summary(&outcome, &config.manifest));

    Ok(ExitCode::from(outcome.result.exit_code()))
}
