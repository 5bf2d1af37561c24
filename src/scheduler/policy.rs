/*!
 * Scheduler Policy
 * Ready-queue ordering, selection and re-insertion per policy
 */

use super::types::{Reinsertion, Selection};
use super::Scheduler;
use crate::core::types::Pid;
use crate::process::Pcb;
use std::cmp::Ordering;
use tracing::debug;

impl Scheduler {
    /// One-time ordering of the Ready queue before the first dispatch
    ///
    /// SJF sorts by the admission estimate; the sort is stable, so equal
    /// estimates keep arrival order.
    pub(super) fn order_ready_queue(&mut self) {
        let policy = self.ctx.config().policy();
        if !policy.sorts_on_admission() {
            return;
        }

        let table = &self.table;
        self.ready.make_contiguous().sort_by(|a, b| {
            let cost = |pid: &Pid| table.get(*pid).map_or(0.0, Pcb::initial_estimate);
            cost(a).total_cmp(&cost(b))
        });

        debug!(order = ?self.ready, "ready queue ordered by estimated cost");
    }

    /// Remove and return the next process to run
    pub(super) fn select_next(&mut self) -> Option<Pid> {
        match self.ctx.config().policy().selection() {
            Selection::Head => self.ready.pop_front(),
            Selection::ShortestRemaining => {
                let position = self.shortest_remaining_position()?;
                self.ready.remove(position)
            }
        }
    }

    /// Position of the minimum `(estimated_remaining_cost, pid)` in the Ready queue
    fn shortest_remaining_position(&self) -> Option<usize> {
        let key = |pid: Pid| {
            let cost = self
                .table
                .get(pid)
                .map_or(f64::INFINITY, Pcb::estimated_remaining_cost);
            (cost, pid)
        };

        self.ready
            .iter()
            .enumerate()
            .min_by(|a, b| {
                let (cost_a, pid_a) = key(*a.1);
                let (cost_b, pid_b) = key(*b.1);
                match cost_a.total_cmp(&cost_b) {
                    Ordering::Equal => pid_a.cmp(&pid_b),
                    other => other,
                }
            })
            .map(|(position, _)| position)
    }

    /// Put a preempted or yielding process back in line
    pub(super) fn requeue(&mut self, pid: Pid) {
        match self.ctx.config().policy().reinsertion() {
            Reinsertion::Front => self.ready.push_front(pid),
            Reinsertion::Back => self.ready.push_back(pid),
        }
    }
}
