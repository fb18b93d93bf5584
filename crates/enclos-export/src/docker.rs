use std::collections::BTreeMap;
use std::path::Path;

use enclos_core::config::DEFAULT_DOCKER_BASE;
use enclos_core::{load_manifest, DependencySet};

use crate::error::ExportError;

/// Options for Dockerfile generation.
#[derive(Debug, Clone)]
pub struct DockerOptions {
    pub base_image: String,
    /// Manifest name mentioned in the generated header comment.
    pub source: String,
}

impl Default for DockerOptions {
    fn default() -> Self {
        Self {
            base_image: DEFAULT_DOCKER_BASE.to_string(),
            source: enclos_core::DEFAULT_MANIFEST_PATH.to_string(),
        }
    }
}

/// Load the manifest at `manifest` and render a Dockerfile for it.
pub fn export_docker(manifest: &Path, options: &DockerOptions) -> Result<String, ExportError> {
    let dependencies = load_manifest(manifest)?;
    tracing::info!(
        manifest = %manifest.display(),
        dependencies = dependencies.len(),
        "exporting Dockerfile"
    );
    render_dockerfile(&dependencies, options)
}

/// Render a Dockerfile that starts from `options.base_image` and fails the
/// build unless every recorded executable name resolves in the image.
///
/// A trace keeps failed exec attempts, so a `PATH` search leaves misses like
/// `/usr/local/bin/cc` next to the `/usr/bin/cc` that ran. Paths are grouped
/// by file name and a name passes when any of its recorded paths exists and
/// is executable.
pub fn render_dockerfile(
    dependencies: &DependencySet,
    options: &DockerOptions,
) -> Result<String, ExportError> {
    let base = options.base_image.trim();
    if base.is_empty() || base.chars().any(char::is_whitespace) {
        return Err(ExportError::InvalidBaseImage(options.base_image.clone()));
    }

    let mut out = String::new();
    out.push_str(&format!(
        "# Generated by enclos {} from {}. Regenerate with `enclos export docker`.\n",
        env!("CARGO_PKG_VERSION"),
        options.source
    ));
    out.push_str(&format!("FROM {base}\n"));

    match presence_check(dependencies) {
        None => out.push_str("# No executables were recorded.\n"),
        Some(script) => {
            out.push('\n');
            out.push_str("# Executables the traced command ran.\n");
            out.push_str("RUN ");
            out.push_str(&script);
        }
    }
    Ok(out)
}

/// Shell script that exits non-zero, naming each missing executable, unless
/// every file name in `dependencies` has at least one executable candidate.
fn presence_check(dependencies: &DependencySet) -> Option<String> {
    let mut by_name: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for path in dependencies.iter() {
        let name = path.rsplit('/').next().unwrap_or(path);
        by_name.entry(name).or_default().push(path);
    }
    if by_name.is_empty() {
        return None;
    }

    let mut script = String::from("set -eu; missing=0; \\\n");
    script.push_str("    need() { name=$1; shift; \\\n");
    script.push_str("        for bin in \"$@\"; do [ -x \"$bin\" ] && return 0; done; \\\n");
    script.push_str(
        "        echo \"enclos: missing dependency $name (tried: $*)\" >&2; return 1; }; \\\n",
    );
    for (name, candidates) in &by_name {
        script.push_str("    need ");
        script.push_str(&shell_quote(name));
        for candidate in candidates {
            script.push(' ');
            script.push_str(&shell_quote(candidate));
        }
        script.push_str(" || missing=1; \\\n");
    }
    script.push_str("    exit \"$missing\"\n");
    Some(script)
}

/// Single-quote `s` for POSIX sh.
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
