/*!
 * Loader
 * Reads configuration and meta-data files from disk
 */

mod config;
mod metadata;

pub use config::parse_config;
pub use metadata::parse_metadata;

use crate::core::errors::{ConfigError, MetadataError};
use crate::process::Pcb;
use crate::simulation::{LogTarget, SimulatorConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Relative paths inside a configuration file resolve against its directory
fn resolve(base: Option<&Path>, path: PathBuf) -> PathBuf {
    match base {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path,
    }
}

/// Load and parse a configuration file
pub fn load_config(path: impl AsRef<Path>) -> Result<SimulatorConfig, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut config = parse_config(&text)?;
    let base = path.parent().filter(|p| !p.as_os_str().is_empty());
    config.metadata_path = resolve(base, config.metadata_path);
    config.log = match config.log {
        LogTarget::Monitor => LogTarget::Monitor,
        LogTarget::File(file) => LogTarget::File(resolve(base, file)),
        LogTarget::Both(file) => LogTarget::Both(resolve(base, file)),
    };

    info!(
        path = %path.display(),
        policy = %config.scheduler.policy(),
        metadata = %config.metadata_path.display(),
        "Loaded simulator configuration"
    );
    Ok(config)
}

/// Load and parse a meta-data file
pub fn load_metadata(path: impl AsRef<Path>) -> Result<Vec<Pcb>, MetadataError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| MetadataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let workload = parse_metadata(&text)?;
    debug!(
        path = %path.display(),
        processes = workload.len(),
        "Loaded program meta-data"
    );
    Ok(workload)
}
