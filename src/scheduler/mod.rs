/*!
 * CPU Scheduler
 * Single-processor scheduling of simulated processes under six policies
 */

use crate::core::types::Pid;
use crate::process::{Pcb, ProcessTable};
use crate::simulation::{ExecutionMode, SimulationContext};
use std::collections::VecDeque;
use tracing::{info, warn};

mod operations;
mod policy;
mod stats;
pub mod types;

pub use stats::SchedulerStats;
pub use types::{Reinsertion, SchedulingPolicy, Selection, TimeQuantum};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Pending,
    Running,
    Finished,
}

/// Final state of a scheduler run
pub struct SchedulerOutcome {
    /// Processes in arrival order
    pub processes: Vec<Pcb>,
    pub stats: SchedulerStats,
    pub context: SimulationContext,
}

/// CPU Scheduler
///
/// Owns the process table and moves pids between the Ready queue, the
/// Running slot and the Blocked queue. Only one process is Running at a time.
pub struct Scheduler {
    ctx: SimulationContext,
    table: ProcessTable,
    ready: VecDeque<Pid>,
    running: Option<Pid>,
    blocked: VecDeque<Pid>,
    stats: SchedulerStats,
    phase: Phase,
}

impl Scheduler {
    /// Create a scheduler over a workload of processes in the Enter state
    pub fn new(ctx: SimulationContext, workload: impl IntoIterator<Item = Pcb>) -> Self {
        let mut table = ProcessTable::new();
        for pcb in workload {
            let pid = pcb.pid();
            if !table.insert(pcb) {
                warn!(pid, "duplicate pid in workload, keeping the first");
            }
        }

        let policy = ctx.config().policy();
        let quantum = match ctx.config().mode() {
            ExecutionMode::Quantum(quantum) => Some(quantum),
            ExecutionMode::RunToCompletion => None,
        };

        info!(
            "Scheduler initialized: policy={}, quantum={:?}, processes={}",
            policy,
            quantum.map(|q| q.cycles()),
            table.len()
        );

        Self {
            ctx,
            table,
            ready: VecDeque::new(),
            running: None,
            blocked: VecDeque::new(),
            stats: SchedulerStats::new(policy, quantum),
            phase: Phase::Pending,
        }
    }

    pub fn policy(&self) -> SchedulingPolicy {
        self.ctx.config().policy()
    }

    pub fn context(&self) -> &SimulationContext {
        &self.ctx
    }

    pub fn process(&self, pid: Pid) -> Option<&Pcb> {
        self.table.get(pid)
    }

    /// Ready queue, front first
    pub fn ready_queue(&self) -> Vec<Pid> {
        self.ready.iter().copied().collect()
    }

    pub fn running(&self) -> Option<Pid> {
        self.running
    }

    pub fn blocked_queue(&self) -> Vec<Pid> {
        self.blocked.iter().copied().collect()
    }

    /// Nothing Ready, Running or Blocked
    pub fn is_idle(&self) -> bool {
        self.ready.is_empty() && self.running.is_none() && self.blocked.is_empty()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
