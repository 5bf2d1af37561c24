/*!
 * Simulation Report
 * Final process states and scheduler counters for one run
 */

use crate::core::types::Pid;
use crate::process::{Pcb, ProcessState};
use crate::scheduler::{SchedulerStats, SchedulingPolicy};
use serde::Serialize;

/// Per-process outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessSummary {
    pub pid: Pid,
    pub state: ProcessState,
    pub grants: u32,
    pub preemptions: u32,
    pub initial_estimate: f64,
    pub estimated_remaining_cost: f64,
}

impl From<&Pcb> for ProcessSummary {
    fn from(pcb: &Pcb) -> Self {
        Self {
            pid: pcb.pid(),
            state: pcb.state(),
            grants: pcb.grants(),
            preemptions: pcb.preemptions(),
            initial_estimate: pcb.initial_estimate(),
            estimated_remaining_cost: pcb.estimated_remaining_cost(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub run_id: String,
    pub policy: SchedulingPolicy,
    pub elapsed_secs: f64,
    pub lines_emitted: u64,
    pub processes: Vec<ProcessSummary>,
    pub stats: SchedulerStats,
}

impl SimulationReport {
    pub fn process(&self, pid: Pid) -> Option<&ProcessSummary> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    /// Every process reached Exit
    pub fn all_exited(&self) -> bool {
        self.processes.iter().all(|p| p.state.is_terminal())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
