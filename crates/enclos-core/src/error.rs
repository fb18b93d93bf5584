use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to write manifest {path}: {source}")]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Manifest not found: {0} (run `enclos track <command>` first)")]
    ManifestNotFound(PathBuf),

    #[error("Invalid manifest {path} at line {line}: {reason}")]
    ManifestParse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Git config error: {0}")]
    Git(#[from] git2::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
