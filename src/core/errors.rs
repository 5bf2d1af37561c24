/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use miette::Diagnostic;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors, surfaced before scheduling begins
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path:?}")]
    #[diagnostic(
        code(config::io),
        help("Check that the configuration file exists and is readable.")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration file is missing its {0} marker")]
    #[diagnostic(
        code(config::missing_marker),
        help("The file must begin with 'Start Simulator Configuration File' and end with 'End Simulator Configuration File'.")
    )]
    MissingMarker(&'static str),

    #[error("Configuration field '{0}' is missing")]
    #[diagnostic(code(config::missing_field))]
    MissingField(&'static str),

    #[error("Invalid version/phase: {0}")]
    #[diagnostic(code(config::invalid_version), help("Version must be a number >= 0."))]
    InvalidVersion(String),

    #[error("Invalid scheduling policy: {0}")]
    #[diagnostic(
        code(config::invalid_policy),
        help("Use one of FIFO, SJF, SRTF, FIFO-P, RR or SRTF-P.")
    )]
    InvalidPolicy(String),

    #[error("Invalid time quantum: {0}")]
    #[diagnostic(
        code(config::invalid_quantum),
        help("The quantum must be a positive whole number of cycles.")
    )]
    InvalidQuantum(String),

    #[error("Policy {0} is preemptive and requires a time quantum")]
    #[diagnostic(code(config::missing_quantum))]
    MissingQuantum(&'static str),

    #[error("Invalid cycle cost for {resource}: {value}")]
    #[diagnostic(
        code(config::invalid_cost),
        help("Cycle times are milliseconds per cycle and must be finite and >= 0.")
    )]
    InvalidCost { resource: String, value: String },

    #[error("No cycle cost configured for {0}")]
    #[diagnostic(
        code(config::missing_cost),
        help("Every resource (run, monitor, hard drive, printer, keyboard) needs a cycle time.")
    )]
    MissingCost(&'static str),

    #[error("Unrecognized log target: {0}")]
    #[diagnostic(
        code(config::invalid_log_target),
        help("Use 'Log to Monitor', 'Log to File' or 'Log to Both'.")
    )]
    InvalidLogTarget(String),

    #[error("Log target writes to a file but no log file path was given")]
    #[diagnostic(code(config::missing_log_path))]
    MissingLogPath,
}

/// Meta-data (workload) errors
#[derive(Error, Debug, Diagnostic)]
pub enum MetadataError {
    #[error("Failed to read meta-data file {path:?}")]
    #[diagnostic(code(metadata::io), help("Check the 'File Path' entry of the configuration."))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Meta-data file is missing its {0} marker")]
    #[diagnostic(code(metadata::missing_marker))]
    MissingMarker(&'static str),

    #[error("Meta-data must begin with the simulator start action S(start)0")]
    #[diagnostic(code(metadata::os_start))]
    MissingSimulatorStart,

    #[error("Meta-data must end with the simulator end action S(end)0")]
    #[diagnostic(code(metadata::os_end))]
    MissingSimulatorEnd,

    #[error("Malformed action '{0}'")]
    #[diagnostic(
        code(metadata::malformed_action),
        help("Actions look like P(run)12 and are separated by ';'.")
    )]
    MalformedAction(String),

    #[error("Unrecognized action code '{0}'")]
    #[diagnostic(code(metadata::unknown_code), help("Valid codes are S, A, P, I and O."))]
    UnknownActionCode(char),

    #[error("Unrecognized action descriptor '{0}'")]
    #[diagnostic(
        code(metadata::unknown_descriptor),
        help("Valid descriptors are run, monitor, hard drive, printer and keyboard.")
    )]
    UnknownDescriptor(String),

    #[error("Invalid cycle count in action '{0}'")]
    #[diagnostic(code(metadata::invalid_cycles))]
    InvalidCycles(String),

    #[error("Action '{0}' appears outside of a process")]
    #[diagnostic(code(metadata::orphan_action))]
    OrphanAction(String),

    #[error("Process {0} has mismatched start/end actions")]
    #[diagnostic(code(metadata::process_bounds))]
    ProcessBounds(u32),

    #[error("Meta-data describes no processes")]
    #[diagnostic(code(metadata::empty))]
    Empty,
}

/// Unified simulator error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum SimulatorError {
    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Meta-data error: {0}")]
    #[diagnostic(transparent)]
    Metadata(#[from] MetadataError),

    #[error("Log sink error: {0}")]
    #[diagnostic(
        code(simulator::sink),
        help("The log file could not be written. Check the 'Log File Path' entry.")
    )]
    Sink(#[from] io::Error),
}
