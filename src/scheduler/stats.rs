/*!
 * Scheduler Statistics
 * Track and report scheduling activity for a run
 */

use super::types::{SchedulingPolicy, TimeQuantum};
use super::Scheduler;
use crate::core::types::{Cycles, Pid};
use crate::process::ExecutionOutcome;
use serde::Serialize;

/// Counters for one simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchedulerStats {
    pub policy: SchedulingPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantum_cycles: Option<Cycles>,
    /// Ready -> Running transitions
    pub dispatches: u64,
    /// Executor calls made under a quantum
    pub quantum_grants: u64,
    /// Quantum expiries with work left on the action
    pub preemptions: u64,
    /// Dispatches of a different process than the previous one
    pub context_switches: u64,
    pub completed_actions: u64,
    pub cycles_executed: Cycles,
    pub exited_processes: u64,
    #[serde(skip)]
    last_dispatched: Option<Pid>,
}

impl SchedulerStats {
    pub fn new(policy: SchedulingPolicy, quantum: Option<TimeQuantum>) -> Self {
        Self {
            policy,
            quantum_cycles: quantum.map(|q| q.cycles()),
            dispatches: 0,
            quantum_grants: 0,
            preemptions: 0,
            context_switches: 0,
            completed_actions: 0,
            cycles_executed: 0,
            exited_processes: 0,
            last_dispatched: None,
        }
    }

    pub(super) fn record_dispatch(&mut self, pid: Pid) {
        self.dispatches += 1;
        if self.last_dispatched.is_some_and(|last| last != pid) {
            self.context_switches += 1;
        }
        self.last_dispatched = Some(pid);
    }

    pub(super) fn record_execution(&mut self, outcome: &ExecutionOutcome, bookkeeping: bool) {
        self.cycles_executed += outcome.cycles;
        if !bookkeeping && outcome.status == crate::process::ExecutionStatus::Completed {
            self.completed_actions += 1;
        }
    }

    pub(super) fn record_grant(&mut self) {
        self.quantum_grants += 1;
    }

    pub(super) fn record_preemption(&mut self) {
        self.preemptions += 1;
    }

    pub(super) fn record_exit(&mut self) {
        self.exited_processes += 1;
    }
}

impl Scheduler {
    /// Get scheduler statistics
    pub fn stats(&self) -> &SchedulerStats {
        &self.stats
    }
}
