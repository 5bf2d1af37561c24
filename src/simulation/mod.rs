/*!
 * Simulation
 * Wires configuration, clock, event log and workload into a scheduler run
 */

mod builder;
mod clock;
mod config;
mod context;
mod report;

pub use builder::SimulationBuilder;
pub use clock::{Clock, Pacing};
pub use config::{CostModel, ExecutionMode, LogTarget, SchedulerConfig, SimulatorConfig};
pub use context::SimulationContext;
pub use report::{ProcessSummary, SimulationReport};

use crate::core::errors::SimulatorError;
use crate::monitoring::{generate_run_id, simulation_span};
use crate::process::Pcb;
use crate::scheduler::{Scheduler, SchedulerOutcome};

/// A configured, not yet started, simulation run
pub struct Simulation {
    context: SimulationContext,
    workload: Vec<Pcb>,
}

impl Simulation {
    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::new()
    }

    pub fn config(&self) -> &SchedulerConfig {
        self.context.config()
    }

    pub fn workload(&self) -> &[Pcb] {
        &self.workload
    }

    /// Schedule every process to Exit, then flush the sinks
    pub fn run(self) -> Result<SimulationReport, SimulatorError> {
        let run_id = generate_run_id();
        let policy = self.context.config().policy();
        let span = simulation_span(&run_id, policy, self.workload.len());
        let _entered = span.enter();

        let SchedulerOutcome {
            processes,
            stats,
            mut context,
        } = Scheduler::new(self.context, self.workload).run();

        context.log_mut().finish()?;

        Ok(SimulationReport {
            run_id,
            policy,
            elapsed_secs: context.clock().now().as_secs_f64(),
            lines_emitted: context.log().emitted(),
            processes: processes.iter().map(Into::into).collect(),
            stats,
        })
    }
}
