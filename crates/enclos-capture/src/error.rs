use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Failed to launch {program}: {reason}")]
    Launch { program: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Core error: {0}")]
    Core(#[from] enclos_core::CoreError),
}

impl CaptureError {
    pub(crate) fn launch(program: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Launch {
            program: program.into(),
            reason: reason.to_string(),
        }
    }
}
