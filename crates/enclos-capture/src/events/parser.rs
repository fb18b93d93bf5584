use std::str::Lines;

use enclos_core::TraceEvent;

/// Token strace prints for every exec of a new program image.
///
/// Lines from traced children carry a pid prefix (`1234  execve(` in `-o`
/// files, `[pid  1234] execve(` on a terminal), so the marker is matched
/// anywhere in the line.
pub const PROCESS_CREATION_MARKER: &str = "execve(";

/// Lazily classify each line of a tracer capture.
pub fn parse_events(diagnostics: &str) -> Events<'_> {
    Events {
        lines: diagnostics.lines(),
    }
}

/// Iterator over the events of one capture buffer.
pub struct Events<'a> {
    lines: Lines<'a>,
}

impl Iterator for Events<'_> {
    type Item = TraceEvent;

    fn next(&mut self) -> Option<TraceEvent> {
        self.lines.next().map(parse_line)
    }
}

/// Classify one tracer line and extract the exec'd path.
///
/// The path is the first double-quoted field. A process-creation line that
/// does not split into at least three fields on `"` (the tracer truncated it,
/// or interleaved output garbled it) keeps no path and is otherwise ignored.
pub fn parse_line(line: &str) -> TraceEvent {
    if !line.contains(PROCESS_CREATION_MARKER) {
        return TraceEvent::other(line);
    }

    let mut fields = line.split('"');
    let _opening = fields.next();
    let path = match (fields.next(), fields.next()) {
        (Some(path), Some(_trailing)) => Some(path.to_string()),
        _ => {
            tracing::trace!("Skipping unframed exec line: {line}");
            None
        }
    };

    TraceEvent::process_creation(line, path)
}
