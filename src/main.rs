/*!
 * Scheduling Simulator - Main Entry Point
 *
 * Loads a configuration file and the program meta-data it names, then runs
 * every process to completion under the configured CPU scheduling policy.
 */

use miette::{IntoDiagnostic, Result};
use std::env;
use tracing::info;

use sched_sim::{
    init_tracing, load_config, load_metadata, open_sinks, Clock, Simulation, SimulatorError,
};

fn main() -> Result<()> {
    init_tracing();

    let mut args = env::args().skip(1);
    let (Some(config_path), None) = (args.next(), args.next()) else {
        miette::bail!(
            code = "simulator::usage",
            help = "Pass exactly one configuration file",
            "usage: sched-sim <config-file>"
        );
    };

    let config = load_config(&config_path).map_err(SimulatorError::from)?;
    let workload = load_metadata(&config.metadata_path).map_err(SimulatorError::from)?;
    let sinks = open_sinks(&config.log).map_err(SimulatorError::Sink)?;

    let clock = match env::var("SIM_REALTIME").as_deref() {
        Ok("1") | Ok("true") => Clock::paced(),
        _ => Clock::virtual_time(),
    };

    let simulation = Simulation::builder()
        .with_config(config.scheduler)
        .with_workload(workload)
        .with_sinks(sinks)
        .with_clock(clock)
        .build()
        .map_err(SimulatorError::from)?;

    let report = simulation.run()?;
    info!(
        run_id = %report.run_id,
        elapsed_secs = report.elapsed_secs,
        lines = report.lines_emitted,
        "Simulation complete"
    );

    if let Ok(report_path) = env::var("SIM_REPORT_PATH") {
        let json = report.to_json().into_diagnostic()?;
        std::fs::write(&report_path, json).into_diagnostic()?;
        info!(path = %report_path, "Wrote simulation report");
    }

    Ok(())
}
