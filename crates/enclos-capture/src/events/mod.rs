mod collector;
mod parser;

pub use collector::{collect, Collector};
pub use parser::{parse_events, parse_line, Events, PROCESS_CREATION_MARKER};
