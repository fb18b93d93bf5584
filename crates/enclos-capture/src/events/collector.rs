use enclos_core::{DependencySet, TraceEvent};

/// Folds trace events into a [`DependencySet`].
///
/// Single-owner and single-threaded: events are fed in after the tracee has
/// exited and the set is handed back by value.
#[derive(Debug, Default)]
pub struct Collector {
    dependencies: DependencySet,
    exec_events: usize,
    unframed: usize,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, event: &TraceEvent) {
        if !event.is_process_creation() {
            return;
        }
        self.exec_events += 1;
        match event.executable() {
            Some(path) => {
                if self.dependencies.insert(path) {
                    tracing::debug!("New dependency: {path}");
                }
            }
            None => self.unframed += 1,
        }
    }

    pub fn finish(self) -> DependencySet {
        tracing::debug!(
            exec_events = self.exec_events,
            unframed = self.unframed,
            distinct = self.dependencies.len(),
            "collected dependencies"
        );
        self.dependencies
    }
}

/// Collect the distinct, non-empty executable paths from `events`.
pub fn collect<I>(events: I) -> DependencySet
where
    I: IntoIterator<Item = TraceEvent>,
{
    let mut collector = Collector::new();
    for event in events {
        collector.observe(&event);
    }
    collector.finish()
}
