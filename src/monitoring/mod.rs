/*!
 * Monitoring
 * Simulator event log, its sinks, and diagnostic tracing
 */

mod event_log;
mod sinks;
mod tracer;

pub use event_log::{EventLog, LogEntry};
pub use sinks::{open_sinks, ConsoleSink, FileSink, LogSink, MemorySink};
pub use tracer::{generate_run_id, init_tracing, simulation_span};
