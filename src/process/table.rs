/*!
 * Process Table
 * Arena of PCBs addressed by pid; queues hold pids, never PCB copies
 */

use super::pcb::Pcb;
use crate::core::types::Pid;
use ahash::AHashMap;

#[derive(Debug, Default)]
pub struct ProcessTable {
    slots: Vec<Pcb>,
    index: AHashMap<Pid, usize>,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a process, keeping workload order. Returns false on a duplicate pid.
    pub fn insert(&mut self, pcb: Pcb) -> bool {
        let pid = pcb.pid();
        if self.index.contains_key(&pid) {
            return false;
        }
        self.index.insert(pid, self.slots.len());
        self.slots.push(pcb);
        true
    }

    pub fn get(&self, pid: Pid) -> Option<&Pcb> {
        self.index.get(&pid).and_then(|&slot| self.slots.get(slot))
    }

    pub fn get_mut(&mut self, pid: Pid) -> Option<&mut Pcb> {
        match self.index.get(&pid) {
            Some(&slot) => self.slots.get_mut(slot),
            None => None,
        }
    }

    /// Pids in insertion (arrival) order
    pub fn pids(&self) -> impl Iterator<Item = Pid> + '_ {
        self.slots.iter().map(Pcb::pid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pcb> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Pcb> {
        self.slots.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn into_vec(self) -> Vec<Pcb> {
        self.slots
    }
}

impl FromIterator<Pcb> for ProcessTable {
    fn from_iter<I: IntoIterator<Item = Pcb>>(iter: I) -> Self {
        let mut table = Self::new();
        for pcb in iter {
            table.insert(pcb);
        }
        table
    }
}
