//! Turns a loaded `enclave.lock` into deployment artifacts.

pub mod docker;
pub mod error;

pub use docker::{export_docker, render_dockerfile, DockerOptions};
pub use error::ExportError;
