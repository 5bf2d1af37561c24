/*!
 * Simulation Builder
 * Builder pattern for Simulation construction
 */

use super::clock::Clock;
use super::config::SchedulerConfig;
use super::context::SimulationContext;
use super::Simulation;
use crate::core::errors::ConfigError;
use crate::monitoring::LogSink;
use crate::process::Pcb;

/// Builder for Simulation
#[derive(Default)]
pub struct SimulationBuilder {
    config: Option<SchedulerConfig>,
    workload: Vec<Pcb>,
    sinks: Vec<Box<dyn LogSink>>,
    clock: Clock,
}

impl SimulationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scheduling configuration (required)
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Processes to schedule, in arrival order
    pub fn with_workload(mut self, workload: Vec<Pcb>) -> Self {
        self.workload = workload;
        self
    }

    pub fn with_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn with_sinks(mut self, sinks: Vec<Box<dyn LogSink>>) -> Self {
        self.sinks.extend(sinks);
        self
    }

    /// Defaults to a virtual clock
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn build(self) -> Result<Simulation, ConfigError> {
        let config = self
            .config
            .ok_or(ConfigError::MissingField("scheduler configuration"))?;

        Ok(Simulation {
            context: SimulationContext::new(config, self.clock, self.sinks),
            workload: self.workload,
        })
    }
}
