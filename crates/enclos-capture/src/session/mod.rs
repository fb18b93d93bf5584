mod result;
mod runner;

pub use result::{TraceOutcome, TraceResult};
pub use runner::{record, run_trace};
