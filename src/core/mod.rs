/*!
 * Core Module
 * Shared types and error taxonomy
 */

pub mod errors;
pub mod types;

pub use errors::{ConfigError, MetadataError, SimulatorError};
pub use types::{CostMillis, Cycles, Pid, SimResult, NANOS_PER_MILLI};
