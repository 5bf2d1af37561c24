/*!
 * Action Executor
 * Runs the head action of a process to completion or for one quantum
 *
 * Exactly one action is in flight at a time: every call advances the
 * simulated clock by the action's computed delay and emits its log events
 * before returning.
 */

use super::types::Action;
use crate::core::types::Cycles;
use crate::scheduler::TimeQuantum;
use crate::simulation::{CostModel, SimulationContext};
use std::time::Duration;
use tracing::trace;

/// Status of an action after an executor call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    /// No cycles remain on the action
    Completed,
    /// The quantum expired while cycles remain
    Blocked,
}

impl ExecutionStatus {
    /// Verb used in the closing log event
    #[inline(always)]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::Completed => "end",
            Self::Blocked => "block",
        }
    }
}

/// Result of one executor call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub status: ExecutionStatus,
    pub cycles: Cycles,
    pub delay: Duration,
}

/// Executes actions against a simulation context
pub struct ActionExecutor<'ctx> {
    ctx: &'ctx mut SimulationContext,
}

impl<'ctx> ActionExecutor<'ctx> {
    pub fn new(ctx: &'ctx mut SimulationContext) -> Self {
        Self { ctx }
    }

    pub fn cost_model(&self) -> &CostModel {
        self.ctx.config().cost_model()
    }

    /// Run the action until no cycles remain
    pub fn run_to_completion(&mut self, action: &mut Action) -> ExecutionOutcome {
        let cycles = action.remaining_cycles;
        self.execute(action, cycles, ExecutionStatus::Completed)
    }

    /// Run the action for at most one quantum
    ///
    /// Completes (and runs only the remaining cycles) when the remaining work
    /// fits in the quantum; otherwise consumes the full quantum and blocks.
    pub fn run_for_quantum(&mut self, action: &mut Action, quantum: TimeQuantum) -> ExecutionOutcome {
        let remaining = action.remaining_cycles;
        if remaining <= quantum.cycles() {
            self.execute(action, remaining, ExecutionStatus::Completed)
        } else {
            self.execute(action, quantum.cycles(), ExecutionStatus::Blocked)
        }
    }

    fn execute(
        &mut self,
        action: &mut Action,
        cycles: Cycles,
        status: ExecutionStatus,
    ) -> ExecutionOutcome {
        let delay = self.cost_model().delay(&action.kind, cycles);

        self.ctx.emit(action.begin_message());
        self.ctx.clock_mut().advance(delay);
        action.remaining_cycles -= cycles;
        if let Some(message) = action.finish_message(status.verb()) {
            self.ctx.emit(message);
        }

        trace!(
            pid = action.owner,
            kind = ?action.kind,
            cycles,
            remaining = action.remaining_cycles,
            status = ?status,
            "action executed"
        );

        ExecutionOutcome {
            status,
            cycles,
            delay,
        }
    }
}
