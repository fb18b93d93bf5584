use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use enclos_core::EnclosConfig;

mod commands;
mod output;

/// Options go before the subcommand: everything after `track` belongs to the
/// traced command.
#[derive(Parser)]
#[command(
    name = "enclos",
    version,
    about = "Trace the executables a command depends on and lock them into a manifest"
)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format
    #[arg(long, default_value = "text")]
    format: output::OutputFormat,

    /// Manifest path (default: enclos.manifest from git config, else enclave.lock)
    #[arg(long, value_name = "PATH")]
    manifest: Option<PathBuf>,

    /// Tracing engine to run (default: enclos.tracer from git config, else strace)
    #[arg(long, value_name = "PROGRAM")]
    tracer: Option<String>,

    #[command(subcommand)]
    command: commands::Commands,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = EnclosConfig::discover().context("Failed to read enclos config")?;
    if let Some(manifest) = cli.manifest {
        config.manifest = manifest;
    }
    if let Some(tracer) = cli.tracer {
        config.tracer = tracer;
    }
    tracing::debug!(?config, "resolved config");

    match &cli.command {
        commands::Commands::Track(args) => commands::track::run(args, &config),
        commands::Commands::Show => {
            commands::show::run(&config, cli.format).map(|()| ExitCode::SUCCESS)
        }
        commands::Commands::Export(args) => {
            commands::export::run(args, &config).map(|()| ExitCode::SUCCESS)
        }
    }
}
