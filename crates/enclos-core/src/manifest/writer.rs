use std::fs;
use std::io::Write as _;
use std::path::Path;

use crate::error::CoreError;
use crate::model::DependencySet;

use super::{generator_marker, render};

/// Write `dependencies` as a manifest at `path`, replacing any previous file.
///
/// The file is truncated and rewritten in place under an exclusive advisory
/// lock. This is not atomic: if a write fails partway the error is returned
/// and a partial file may be left behind.
pub fn write_manifest(dependencies: &DependencySet, path: &Path) -> Result<(), CoreError> {
    let wrap = |source: std::io::Error| CoreError::ManifestWrite {
        path: path.to_path_buf(),
        source,
    };

    let text = render(Some(&generator_marker()), dependencies);

    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(wrap)?;
    fs2::FileExt::lock_exclusive(&file).map_err(wrap)?;
    (&file).write_all(text.as_bytes()).map_err(wrap)?;
    file.sync_all().map_err(wrap)?;
    fs2::FileExt::unlock(&file).map_err(wrap)?;

    tracing::info!(
        path = %path.display(),
        dependencies = dependencies.len(),
        "manifest written"
    );
    Ok(())
}
