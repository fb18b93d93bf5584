/// Kind of a single tracer output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The line records an exec of a new program image.
    ProcessCreation,
    Other,
}

/// One line of tracer output, classified.
///
/// `path` is only ever set for `ProcessCreation` lines whose framing matched;
/// a process-creation line with a truncated or garbled quote layout keeps
/// `path: None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    pub raw: String,
    pub kind: EventKind,
    pub path: Option<String>,
}

impl TraceEvent {
    pub fn other(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            kind: EventKind::Other,
            path: None,
        }
    }

    pub fn process_creation(raw: impl Into<String>, path: Option<String>) -> Self {
        Self {
            raw: raw.into(),
            kind: EventKind::ProcessCreation,
            path,
        }
    }

    pub fn is_process_creation(&self) -> bool {
        self.kind == EventKind::ProcessCreation
    }

    /// The extracted executable path, if it is present and non-empty.
    pub fn executable(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }
}
