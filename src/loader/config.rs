/*!
 * Configuration File Parser
 * Line-oriented `Key: value` simulator configuration
 */

use crate::core::errors::ConfigError;
use crate::process::Resource;
use crate::scheduler::{SchedulingPolicy, TimeQuantum};
use crate::simulation::{CostModel, LogTarget, SchedulerConfig, SimulatorConfig};
use std::path::PathBuf;
use tracing::debug;

const START_MARKER: &str = "Start Simulator Configuration File";
const END_MARKER: &str = "End Simulator Configuration File";

/// Recognized configuration keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigKey {
    Version,
    MetadataPath,
    Policy,
    Quantum,
    Cost(Resource),
    Log,
    LogFilePath,
}

impl ConfigKey {
    /// Match a key by its leading words, ignoring case and units
    fn classify(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        let key = key.as_str();

        if key.starts_with("version") {
            Some(Self::Version)
        } else if key.starts_with("log file path") {
            Some(Self::LogFilePath)
        } else if key.starts_with("file path") {
            Some(Self::MetadataPath)
        } else if key.contains("scheduling") {
            Some(Self::Policy)
        } else if key.starts_with("quantum") {
            Some(Self::Quantum)
        } else if key.starts_with("processor") {
            Some(Self::Cost(Resource::Run))
        } else if key.starts_with("monitor") {
            Some(Self::Cost(Resource::Monitor))
        } else if key.starts_with("hard drive") {
            Some(Self::Cost(Resource::HardDrive))
        } else if key.starts_with("printer") {
            Some(Self::Cost(Resource::Printer))
        } else if key.starts_with("keyboard") {
            Some(Self::Cost(Resource::Keyboard))
        } else if key == "log" {
            Some(Self::Log)
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
struct RawConfig<'a> {
    version: Option<&'a str>,
    metadata_path: Option<&'a str>,
    policy: Option<&'a str>,
    quantum: Option<&'a str>,
    costs: Vec<(Resource, &'a str)>,
    log: Option<&'a str>,
    log_file_path: Option<&'a str>,
}

impl<'a> RawConfig<'a> {
    fn set(&mut self, key: ConfigKey, value: &'a str) {
        match key {
            ConfigKey::Version => self.version = Some(value),
            ConfigKey::MetadataPath => self.metadata_path = Some(value),
            ConfigKey::Policy => self.policy = Some(value),
            ConfigKey::Quantum => self.quantum = Some(value),
            ConfigKey::Cost(resource) => self.costs.push((resource, value)),
            ConfigKey::Log => self.log = Some(value),
            ConfigKey::LogFilePath => self.log_file_path = Some(value),
        }
    }

    fn finish(self) -> Result<SimulatorConfig, ConfigError> {
        let version_text = self.version.ok_or(ConfigError::MissingField("Version/Phase"))?;
        let version: f64 = version_text
            .parse()
            .map_err(|_| ConfigError::InvalidVersion(version_text.to_string()))?;
        if !version.is_finite() || version < 0.0 {
            return Err(ConfigError::InvalidVersion(version_text.to_string()));
        }

        let metadata_path = self
            .metadata_path
            .filter(|p| !p.is_empty())
            .ok_or(ConfigError::MissingField("File Path"))?;

        let policy: SchedulingPolicy = self
            .policy
            .ok_or(ConfigError::MissingField("CPU Scheduling Code"))?
            .parse()?;

        let quantum = self.quantum.map(TimeQuantum::parse).transpose()?;

        let costs = self
            .costs
            .into_iter()
            .map(|(resource, value)| {
                value
                    .parse::<f64>()
                    .map(|cost| (resource, cost))
                    .map_err(|_| ConfigError::InvalidCost {
                        resource: resource.to_string(),
                        value: value.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let cost_model = CostModel::from_costs(costs)?;

        let log = parse_log_target(
            self.log.ok_or(ConfigError::MissingField("Log"))?,
            self.log_file_path,
        )?;

        Ok(SimulatorConfig {
            version,
            metadata_path: PathBuf::from(metadata_path),
            scheduler: SchedulerConfig::new(policy, quantum, cost_model)?,
            log,
        })
    }
}

/// `Log to Monitor`, `Log to File` or `Log to Both`
fn parse_log_target(value: &str, path: Option<&str>) -> Result<LogTarget, ConfigError> {
    let lowered = value.trim().to_ascii_lowercase();
    let target = lowered.strip_prefix("log to").unwrap_or(&lowered).trim();
    let file = || {
        path.filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingLogPath)
    };

    match target {
        "monitor" => Ok(LogTarget::Monitor),
        "file" => Ok(LogTarget::File(file()?)),
        "both" => Ok(LogTarget::Both(file()?)),
        _ => Err(ConfigError::InvalidLogTarget(value.trim().to_string())),
    }
}

/// Parse configuration text
pub fn parse_config(text: &str) -> Result<SimulatorConfig, ConfigError> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

    match lines.next() {
        Some(line) if line.eq_ignore_ascii_case(START_MARKER) => {}
        _ => return Err(ConfigError::MissingMarker("start")),
    }

    let mut raw = RawConfig::default();
    let mut ended = false;
    for line in lines {
        if line.eq_ignore_ascii_case(END_MARKER) {
            ended = true;
            break;
        }
        let Some((key, value)) = line.split_once(':') else {
            debug!(line, "ignoring configuration line without a key");
            continue;
        };
        match ConfigKey::classify(key) {
            Some(key) => raw.set(key, value.trim()),
            None => debug!(key, "ignoring unknown configuration key"),
        }
    }

    if !ended {
        return Err(ConfigError::MissingMarker("end"));
    }
    raw.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::ExecutionMode;

    const SAMPLE: &str = "\
Start Simulator Configuration File
Version/Phase: 3.0
File Path: Test_3.mdf
CPU Scheduling Code: RR
Quantum Time (cycles): 3
Processor cycle time (msec): 10
Monitor display time (msec): 20
Hard drive cycle time (msec): 15
Printer cycle time (msec): 25
Keyboard cycle time (msec): 50
Log: Log to Both
Log File Path: logfile_1.lgf
End Simulator Configuration File
";

    #[test]
    fn test_parse_sample() {
        let config = parse_config(SAMPLE).unwrap();

        assert_eq!(config.version, 3.0);
        assert_eq!(config.metadata_path, PathBuf::from("Test_3.mdf"));
        assert_eq!(config.scheduler.policy(), SchedulingPolicy::RoundRobin);
        assert_eq!(
            config.scheduler.mode(),
            ExecutionMode::Quantum(TimeQuantum::new(3).unwrap())
        );
        let costs = config.scheduler.cost_model();
        assert_eq!(costs.cost(Resource::Run), 10.0);
        assert_eq!(costs.cost(Resource::Monitor), 20.0);
        assert_eq!(costs.cost(Resource::HardDrive), 15.0);
        assert_eq!(costs.cost(Resource::Printer), 25.0);
        assert_eq!(costs.cost(Resource::Keyboard), 50.0);
        assert_eq!(config.log, LogTarget::Both(PathBuf::from("logfile_1.lgf")));
    }

    #[test]
    fn test_key_classification() {
        assert_eq!(ConfigKey::classify("Log File Path"), Some(ConfigKey::LogFilePath));
        assert_eq!(ConfigKey::classify("File Path"), Some(ConfigKey::MetadataPath));
        assert_eq!(ConfigKey::classify("CPU Scheduling Code"), Some(ConfigKey::Policy));
        assert_eq!(
            ConfigKey::classify("Hard drive cycle time (msec)"),
            Some(ConfigKey::Cost(Resource::HardDrive))
        );
        assert_eq!(ConfigKey::classify("Log"), Some(ConfigKey::Log));
        assert_eq!(ConfigKey::classify("Author"), None);
    }

    #[test]
    fn test_log_targets() {
        assert_eq!(parse_log_target("Log to Monitor", None).unwrap(), LogTarget::Monitor);
        assert_eq!(
            parse_log_target("Log to File", Some("out.lgf")).unwrap(),
            LogTarget::File(PathBuf::from("out.lgf"))
        );
        assert!(matches!(
            parse_log_target("Log to File", None),
            Err(ConfigError::MissingLogPath)
        ));
        assert!(matches!(
            parse_log_target("Log to Printer", None),
            Err(ConfigError::InvalidLogTarget(_))
        ));
    }

    #[test]
    fn test_missing_markers() {
        assert!(matches!(
            parse_config("Version/Phase: 1.0"),
            Err(ConfigError::MissingMarker("start"))
        ));
        let truncated = SAMPLE.replace("End Simulator Configuration File", "");
        assert!(matches!(
            parse_config(&truncated),
            Err(ConfigError::MissingMarker("end"))
        ));
    }
}
