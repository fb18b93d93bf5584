mod settings;

pub use settings::{EnclosConfig, DEFAULT_DOCKER_BASE, DEFAULT_TRACER};
