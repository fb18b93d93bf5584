use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use enclos_core::EnclosConfig;
use enclos_export::{export_docker, DockerOptions};

#[derive(Args)]
pub struct ExportArgs {
    #[command(subcommand)]
    pub target: ExportTarget,
}

#[derive(Subcommand)]
pub enum ExportTarget {
    /// Generate a Dockerfile that checks every recorded executable is present
    Docker(DockerArgs),
}

#[derive(Args)]
pub struct DockerArgs {
    /// Base image (default: enclos.dockerBase from git config, else debian:stable-slim)
    #[arg(long)]
    pub base: Option<String>,

    /// Write the Dockerfile here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &ExportArgs, config: &EnclosConfig) -> Result<()> {
    match &args.target {
        ExportTarget::Docker(docker) => run_docker(docker, config),
    }
}

fn run_docker(args: &DockerArgs, config: &EnclosConfig) -> Result<()> {
    let options = DockerOptions {
        base_image: args
            .base
            .clone()
            .unwrap_or_else(|| config.docker_base.clone()),
        source: config.manifest.display().to_string(),
    };
    let dockerfile = export_docker(&config.manifest, &options)
        .with_context(|| format!("Failed to export {}", config.manifest.display()))?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, dockerfile)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Dockerfile written to {}", path.display());
        }
        None => print!("{dockerfile}"),
    }
    Ok(())
}
