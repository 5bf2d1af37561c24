/*!
 * Simulation Context
 * Configuration, clock and event log shared by the scheduler and executor
 */

use super::clock::Clock;
use super::config::SchedulerConfig;
use crate::monitoring::{EventLog, LogSink};

pub struct SimulationContext {
    config: SchedulerConfig,
    clock: Clock,
    log: EventLog,
}

impl SimulationContext {
    pub fn new(config: SchedulerConfig, clock: Clock, sinks: Vec<Box<dyn LogSink>>) -> Self {
        Self {
            config,
            clock,
            log: EventLog::new(sinks),
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub(crate) fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub(crate) fn log_mut(&mut self) -> &mut EventLog {
        &mut self.log
    }

    /// Timestamp `message` with the current simulated time and relay it
    pub fn emit(&mut self, message: impl Into<String>) {
        let at = self.clock.now();
        self.log.emit(at, message);
    }
}
