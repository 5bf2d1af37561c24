/*!
 * Scheduler Core Operations
 * Admission, dispatch, quantum grants, preemption and retirement
 */

use super::types::TimeQuantum;
use super::{Phase, Scheduler, SchedulerOutcome};
use crate::core::types::Pid;
use crate::process::{ActionExecutor, ActionKind, ExecutionStatus, ProcessState};
use crate::simulation::ExecutionMode;
use tracing::{debug, info, trace, warn};

/// What a single quantum grant left behind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GrantResult {
    /// Action queue is empty
    Drained,
    /// Quantum expired mid-action
    Preempted,
    /// Grant ended on an action boundary with actions remaining
    Yielded,
}

impl Scheduler {
    /// Run every process to Exit and hand back the final state
    pub fn run(mut self) -> SchedulerOutcome {
        while self.step() {}
        self.finish()
    }

    /// Advance to the next scheduling point
    ///
    /// Non-preemptive policies run one whole process per step; preemptive
    /// policies grant one quantum. Returns false once nothing is left to run.
    pub fn step(&mut self) -> bool {
        if self.phase == Phase::Pending {
            self.begin();
        }
        if self.phase == Phase::Finished || self.ready.is_empty() {
            return false;
        }

        self.ctx.emit("OS: selecting next process");
        let Some(pid) = self.select_next() else {
            return false;
        };
        if !self.dispatch(pid) {
            return !self.ready.is_empty();
        }

        match self.ctx.config().mode() {
            ExecutionMode::RunToCompletion => {
                self.drain(pid);
                self.retire(pid);
            }
            ExecutionMode::Quantum(quantum) => match self.grant_quantum(pid, quantum) {
                GrantResult::Drained => self.retire(pid),
                GrantResult::Preempted => self.preempt(pid),
                GrantResult::Yielded => self.yield_running(pid),
            },
        }

        !self.ready.is_empty()
    }

    /// Emit the closing line and release the process table
    pub fn finish(mut self) -> SchedulerOutcome {
        if self.phase == Phase::Pending {
            self.begin();
        }
        while self.step() {}

        self.ctx.emit("Simulator program ending");
        self.phase = Phase::Finished;

        info!(
            policy = %self.ctx.config().policy(),
            exited = self.stats.exited_processes,
            preemptions = self.stats.preemptions,
            elapsed_secs = self.ctx.clock().now().as_secs_f64(),
            "Simulation complete"
        );

        SchedulerOutcome {
            processes: self.table.into_vec(),
            stats: self.stats,
            context: self.ctx,
        }
    }

    fn begin(&mut self) {
        self.phase = Phase::Running;
        self.ctx.emit("Simulator program starting");
        self.ctx.emit("OS: preparing all processes");
        self.admit_all();
        self.order_ready_queue();
    }

    /// Enter -> Ready for the whole workload, in arrival order
    fn admit_all(&mut self) {
        let costs = self.ctx.config().cost_model();
        for pcb in self.table.iter_mut() {
            if pcb.state() != ProcessState::Enter {
                warn!(pid = pcb.pid(), state = %pcb.state(), "skipping process not in Enter state");
                continue;
            }
            pcb.admit(costs);
            self.ready.push_back(pcb.pid());
            trace!(
                pid = pcb.pid(),
                estimate = pcb.initial_estimate(),
                "process admitted"
            );
        }
    }

    /// Ready -> Running
    fn dispatch(&mut self, pid: Pid) -> bool {
        let Some(pcb) = self.table.get_mut(pid) else {
            warn!(pid, "selected pid missing from process table");
            return false;
        };
        pcb.transition(ProcessState::Running);
        pcb.record_grant();
        self.running = Some(pid);
        self.stats.record_dispatch(pid);

        debug!(
            pid,
            policy = %self.ctx.config().policy(),
            estimate = pcb.estimated_remaining_cost(),
            "dispatching process"
        );
        true
    }

    /// Run every remaining action of the process to completion, in order
    fn drain(&mut self, pid: Pid) {
        let Some(pcb) = self.table.get_mut(pid) else {
            return;
        };
        let mut executor = ActionExecutor::new(&mut self.ctx);

        while let Some(action) = pcb.head_mut() {
            let bookkeeping = action.kind.is_bookkeeping();
            let outcome = executor.run_to_completion(action);
            self.stats.record_execution(&outcome, bookkeeping);
            pcb.pop_head();
            pcb.refresh_estimate(executor.cost_model());
        }
    }

    /// Grant one quantum to the head work action
    ///
    /// A leading ProcessStart and a trailing ProcessEnd run inline with the
    /// grant that reaches them; they never consume a quantum of their own.
    fn grant_quantum(&mut self, pid: Pid, quantum: TimeQuantum) -> GrantResult {
        let Some(pcb) = self.table.get_mut(pid) else {
            return GrantResult::Drained;
        };
        let mut executor = ActionExecutor::new(&mut self.ctx);
        self.stats.record_grant();

        if let Some(action) = pcb
            .head_mut()
            .filter(|a| a.kind == ActionKind::ProcessStart)
        {
            let outcome = executor.run_to_completion(action);
            self.stats.record_execution(&outcome, true);
            pcb.pop_head();
        }

        if let Some(action) = pcb.head_mut().filter(|a| !a.kind.is_bookkeeping()) {
            let outcome = executor.run_for_quantum(action, quantum);
            self.stats.record_execution(&outcome, false);
            if outcome.status == ExecutionStatus::Blocked {
                pcb.refresh_estimate(executor.cost_model());
                return GrantResult::Preempted;
            }
            pcb.pop_head();
        }

        if let Some(action) = pcb.head_mut().filter(|a| a.kind == ActionKind::ProcessEnd) {
            let outcome = executor.run_to_completion(action);
            self.stats.record_execution(&outcome, true);
            pcb.pop_head();
        }

        pcb.refresh_estimate(executor.cost_model());
        if pcb.is_drained() {
            GrantResult::Drained
        } else {
            GrantResult::Yielded
        }
    }

    /// Running -> Blocked -> Ready at the policy's insertion point
    fn preempt(&mut self, pid: Pid) {
        if let Some(pcb) = self.table.get_mut(pid) {
            pcb.transition(ProcessState::Blocked);
            pcb.record_preemption();
            trace!(
                pid,
                estimate = pcb.estimated_remaining_cost(),
                "quantum expired, process blocked"
            );
        }
        self.running = None;
        self.blocked.push_back(pid);
        self.stats.record_preemption();
        self.release_blocked();
    }

    /// Blocked processes re-enter Ready immediately
    fn release_blocked(&mut self) {
        while let Some(pid) = self.blocked.pop_front() {
            if let Some(pcb) = self.table.get_mut(pid) {
                pcb.transition(ProcessState::Ready);
            }
            self.requeue(pid);
        }
    }

    /// Running -> Ready after a grant that ended on an action boundary
    fn yield_running(&mut self, pid: Pid) {
        if let Some(pcb) = self.table.get_mut(pid) {
            pcb.transition(ProcessState::Ready);
        }
        self.running = None;
        self.requeue(pid);
    }

    /// Running -> Exit
    fn retire(&mut self, pid: Pid) {
        if let Some(pcb) = self.table.get_mut(pid) {
            pcb.transition(ProcessState::Exit);
            debug!(pid, grants = pcb.grants(), "process exited");
        }
        self.running = None;
        self.stats.record_exit();
    }
}
