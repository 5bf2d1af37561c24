/*!
 * Process Module
 * Process control blocks, the process table, and action execution
 */

pub mod executor;
pub mod pcb;
pub mod table;
pub mod types;

// Re-export for convenience
pub use executor::{ActionExecutor, ExecutionOutcome, ExecutionStatus};
pub use pcb::{Pcb, PcbBuilder};
pub use table::ProcessTable;
pub use types::{Action, ActionKind, ProcessState, Resource};
