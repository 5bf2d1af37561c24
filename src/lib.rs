/*!
 * Scheduling Simulator Library
 * Single-CPU process scheduling simulation under six policies
 */

pub mod core;
pub mod loader;
pub mod monitoring;
pub mod process;
pub mod scheduler;
pub mod simulation;

// Re-exports
pub use crate::core::errors::{ConfigError, MetadataError, SimulatorError};
pub use crate::core::types::{CostMillis, Cycles, Pid, SimResult};
pub use loader::{load_config, load_metadata, parse_config, parse_metadata};
pub use monitoring::{
    init_tracing, open_sinks, ConsoleSink, FileSink, LogEntry, LogSink, MemorySink,
};
pub use process::{Action, ActionKind, Pcb, ProcessState, Resource};
pub use scheduler::{Scheduler, SchedulerStats, SchedulingPolicy, TimeQuantum};
pub use simulation::{
    Clock, CostModel, LogTarget, Pacing, SchedulerConfig, Simulation, SimulationBuilder,
    SimulationReport, SimulatorConfig,
};
