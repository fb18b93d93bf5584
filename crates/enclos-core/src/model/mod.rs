pub mod dependency;
pub mod event;

pub use dependency::DependencySet;
pub use event::{EventKind, TraceEvent};
