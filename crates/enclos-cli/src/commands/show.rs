use anyhow::{Context, Result};

use enclos_core::{read_manifest, EnclosConfig};

use crate::output::format::format_dependency_list;
use crate::output::OutputFormat;

pub fn run(config: &EnclosConfig, format: OutputFormat) -> Result<()> {
    let manifest = read_manifest(&config.manifest)
        .with_context(|| format!("Failed to read {}", config.manifest.display()))?;

    if manifest.dependencies.is_empty() && matches!(format, OutputFormat::Text) {
        eprintln!("No dependencies recorded in {}", config.manifest.display());
        return Ok(());
    }

    print!("{}", format_dependency_list(&config.manifest, &manifest, format)?);
    Ok(())
}
