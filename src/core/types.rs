/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type (1-based, assigned in workload order)
pub type Pid = u32;

/// Abstract unit of work on an action
pub type Cycles = u64;

/// Cost of one cycle, in milliseconds
pub type CostMillis = f64;

/// Common result type for simulator operations
pub type SimResult<T> = Result<T, super::errors::SimulatorError>;

/// Milliseconds to nanoseconds, used when converting cycle costs to delays
pub const NANOS_PER_MILLI: f64 = 1_000_000.0;
