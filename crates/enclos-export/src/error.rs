use enclos_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("Invalid base image {0:?}")]
    InvalidBaseImage(String),
}
