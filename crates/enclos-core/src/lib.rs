//! Core types for enclos: the dependency model, the `enclave.lock` manifest
//! format and the `[enclos]` configuration section.

pub mod config;
pub mod error;
pub mod manifest;
pub mod model;

pub use config::EnclosConfig;
pub use error::CoreError;
pub use manifest::{load_manifest, read_manifest, write_manifest, Manifest, DEFAULT_MANIFEST_PATH};
pub use model::{DependencySet, EventKind, TraceEvent};
