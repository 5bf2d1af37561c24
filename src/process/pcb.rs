/*!
 * Process Control Block
 * Ordered action queue, lifecycle state and remaining-cost estimate
 */

use super::types::{Action, ActionKind, ProcessState, Resource};
use crate::core::types::{Cycles, Pid};
use crate::simulation::CostModel;
use std::collections::VecDeque;
use tracing::error;

/// Process Control Block
#[derive(Debug, Clone)]
pub struct Pcb {
    pid: Pid,
    state: ProcessState,
    actions: VecDeque<Action>,
    estimated_remaining_cost: f64,
    initial_estimate: f64,
    grants: u32,
    preemptions: u32,
}

impl Pcb {
    /// Create an empty process in the Enter state
    pub fn new(pid: Pid) -> Self {
        Self {
            pid,
            state: ProcessState::Enter,
            actions: VecDeque::new(),
            estimated_remaining_cost: 0.0,
            initial_estimate: 0.0,
            grants: 0,
            preemptions: 0,
        }
    }

    /// Start building a well-formed process (Start ... End)
    pub fn builder(pid: Pid) -> PcbBuilder {
        PcbBuilder::new(pid)
    }

    pub fn push_action(&mut self, action: Action) {
        self.actions.push_back(action);
    }

    #[inline]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[inline]
    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn actions(&self) -> &VecDeque<Action> {
        &self.actions
    }

    pub fn head(&self) -> Option<&Action> {
        self.actions.front()
    }

    pub fn head_mut(&mut self) -> Option<&mut Action> {
        self.actions.front_mut()
    }

    /// Dequeue the head action once it has finished
    pub fn pop_head(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }

    /// No actions left (including the synthetic end action)
    #[inline]
    pub fn is_drained(&self) -> bool {
        self.actions.is_empty()
    }

    /// Number of Compute/Input/Output actions still queued
    pub fn work_actions(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| !a.kind.is_bookkeeping())
            .count()
    }

    /// Sum of remaining cycles over queued work actions
    pub fn remaining_cycles(&self) -> Cycles {
        self.actions.iter().map(|a| a.remaining_cycles).sum()
    }

    #[inline]
    pub fn estimated_remaining_cost(&self) -> f64 {
        self.estimated_remaining_cost
    }

    /// Estimate computed when the process was admitted
    #[inline]
    pub fn initial_estimate(&self) -> f64 {
        self.initial_estimate
    }

    /// Quantum grants (preemptive) or dispatches (non-preemptive) received
    #[inline]
    pub fn grants(&self) -> u32 {
        self.grants
    }

    #[inline]
    pub fn preemptions(&self) -> u32 {
        self.preemptions
    }

    /// Recompute `sum(remaining_cycles * cost)` over the queued actions
    pub fn refresh_estimate(&mut self, costs: &CostModel) -> f64 {
        self.estimated_remaining_cost = self
            .actions
            .iter()
            .fold(0.0, |acc, a| acc + costs.action_cost(&a.kind, a.remaining_cycles));
        self.estimated_remaining_cost
    }

    /// Enter -> Ready, fixing the initial estimate
    pub(crate) fn admit(&mut self, costs: &CostModel) {
        self.initial_estimate = self.refresh_estimate(costs);
        self.transition(ProcessState::Ready);
    }

    pub(crate) fn transition(&mut self, next: ProcessState) {
        if !self.state.can_transition_to(next) {
            error!(
                pid = self.pid,
                from = %self.state,
                to = %next,
                "invalid process state transition"
            );
            debug_assert!(false, "invalid transition {} -> {}", self.state, next);
        }
        self.state = next;
    }

    pub(crate) fn record_grant(&mut self) {
        self.grants += 1;
    }

    pub(crate) fn record_preemption(&mut self) {
        self.preemptions += 1;
    }
}

/// Builder producing a process that starts with ProcessStart and ends with ProcessEnd
#[derive(Debug, Clone)]
pub struct PcbBuilder {
    pid: Pid,
    body: Vec<Action>,
}

impl PcbBuilder {
    pub fn new(pid: Pid) -> Self {
        Self {
            pid,
            body: Vec::new(),
        }
    }

    /// Append a compute action on the processor
    pub fn compute(self, cycles: Cycles) -> Self {
        self.action(ActionKind::Compute(Resource::Run), cycles)
    }

    pub fn input(self, resource: Resource, cycles: Cycles) -> Self {
        self.action(ActionKind::Input(resource), cycles)
    }

    pub fn output(self, resource: Resource, cycles: Cycles) -> Self {
        self.action(ActionKind::Output(resource), cycles)
    }

    pub fn action(mut self, kind: ActionKind, cycles: Cycles) -> Self {
        self.body.push(Action::new(self.pid, kind, cycles));
        self
    }

    pub fn build(self) -> Pcb {
        let mut pcb = Pcb::new(self.pid);
        pcb.push_action(Action::process_start(self.pid));
        for action in self.body {
            pcb.push_action(action);
        }
        pcb.push_action(Action::process_end(self.pid));
        pcb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn costs() -> CostModel {
        CostModel::from_costs([
            (Resource::Run, 10.0),
            (Resource::Monitor, 20.0),
            (Resource::HardDrive, 15.0),
            (Resource::Printer, 25.0),
            (Resource::Keyboard, 50.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_builder_brackets_actions() {
        let pcb = Pcb::builder(4)
            .compute(3)
            .input(Resource::Keyboard, 2)
            .build();

        assert_eq!(pcb.pid(), 4);
        assert_eq!(pcb.state(), ProcessState::Enter);
        assert_eq!(pcb.actions().len(), 4);
        assert_eq!(pcb.head().map(|a| a.kind), Some(ActionKind::ProcessStart));
        assert_eq!(
            pcb.actions().back().map(|a| a.kind),
            Some(ActionKind::ProcessEnd)
        );
        assert!(pcb.actions().iter().all(|a| a.owner == 4));
        assert_eq!(pcb.work_actions(), 2);
    }

    #[test]
    fn test_estimate_on_admission() {
        let mut pcb = Pcb::builder(1)
            .compute(3)
            .input(Resource::Keyboard, 2)
            .output(Resource::Printer, 1)
            .build();

        pcb.admit(&costs());

        // 3*10 + 2*50 + 1*25
        assert_eq!(pcb.initial_estimate(), 155.0);
        assert_eq!(pcb.estimated_remaining_cost(), 155.0);
        assert_eq!(pcb.state(), ProcessState::Ready);
    }

    #[test]
    fn test_estimate_tracks_progress() {
        let costs = costs();
        let mut pcb = Pcb::builder(1).compute(5).build();
        pcb.admit(&costs);

        pcb.pop_head();
        if let Some(action) = pcb.head_mut() {
            action.remaining_cycles -= 2;
        }
        assert_eq!(pcb.refresh_estimate(&costs), 30.0);
        assert_eq!(pcb.initial_estimate(), 50.0);

        pcb.pop_head();
        pcb.pop_head();
        assert_eq!(pcb.refresh_estimate(&costs), 0.0);
        assert!(pcb.is_drained());
    }
}
