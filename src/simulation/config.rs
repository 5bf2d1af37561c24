/*!
 * Simulation Configuration
 * Cost model, scheduler configuration and log routing
 */

use crate::core::errors::ConfigError;
use crate::core::types::{CostMillis, Cycles, NANOS_PER_MILLI};
use crate::process::{ActionKind, Resource};
use crate::scheduler::{SchedulingPolicy, TimeQuantum};
use ahash::AHashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Per-resource cycle cost in milliseconds
#[derive(Debug, Clone, PartialEq)]
pub struct CostModel {
    costs: AHashMap<Resource, CostMillis>,
}

impl CostModel {
    /// Build from (resource, cost) pairs; every resource must be covered
    pub fn from_costs<I>(costs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (Resource, CostMillis)>,
    {
        let mut table = AHashMap::with_capacity(Resource::ALL.len());
        for (resource, cost) in costs {
            if !cost.is_finite() || cost < 0.0 {
                return Err(ConfigError::InvalidCost {
                    resource: resource.to_string(),
                    value: cost.to_string(),
                });
            }
            table.insert(resource, cost);
        }

        if let Some(missing) = Resource::ALL.iter().find(|r| !table.contains_key(*r)) {
            return Err(ConfigError::MissingCost(missing.as_str()));
        }

        Ok(Self { costs: table })
    }

    /// Same cost for every resource
    pub fn uniform(cost: CostMillis) -> Self {
        Self {
            costs: Resource::ALL.iter().map(|&r| (r, cost.max(0.0))).collect(),
        }
    }

    #[inline]
    pub fn cost(&self, resource: Resource) -> CostMillis {
        self.costs.get(&resource).copied().unwrap_or(0.0)
    }

    /// Cost in milliseconds of running `cycles` of an action; bookkeeping actions are free
    #[inline]
    pub fn action_cost(&self, kind: &ActionKind, cycles: Cycles) -> CostMillis {
        kind.resource()
            .map_or(0.0, |resource| cycles as f64 * self.cost(resource))
    }

    /// Simulated delay for running `cycles` of an action
    pub fn delay(&self, kind: &ActionKind, cycles: Cycles) -> Duration {
        let nanos = (self.action_cost(kind, cycles) * NANOS_PER_MILLI).round();
        Duration::from_nanos(nanos as u64)
    }
}

/// How the executor is driven under a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    RunToCompletion,
    Quantum(TimeQuantum),
}

/// Immutable scheduling configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
    policy: SchedulingPolicy,
    quantum: Option<TimeQuantum>,
    cost_model: CostModel,
    mode: ExecutionMode,
}

impl SchedulerConfig {
    /// Preemptive policies require a quantum; it is ignored otherwise
    pub fn new(
        policy: SchedulingPolicy,
        quantum: Option<TimeQuantum>,
        cost_model: CostModel,
    ) -> Result<Self, ConfigError> {
        let mode = match (policy.is_preemptive(), quantum) {
            (true, Some(quantum)) => ExecutionMode::Quantum(quantum),
            (true, None) => return Err(ConfigError::MissingQuantum(policy.as_str())),
            (false, _) => ExecutionMode::RunToCompletion,
        };

        Ok(Self {
            policy,
            quantum,
            cost_model,
            mode,
        })
    }

    #[inline]
    pub fn policy(&self) -> SchedulingPolicy {
        self.policy
    }

    pub fn quantum(&self) -> Option<TimeQuantum> {
        self.quantum
    }

    pub fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    #[inline]
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }
}

/// Where simulator log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Monitor,
    File(PathBuf),
    Both(PathBuf),
}

impl LogTarget {
    pub fn to_monitor(&self) -> bool {
        matches!(self, Self::Monitor | Self::Both(_))
    }

    pub fn file(&self) -> Option<&PathBuf> {
        match self {
            Self::File(path) | Self::Both(path) => Some(path),
            Self::Monitor => None,
        }
    }
}

/// Everything the configuration file describes
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    pub version: f64,
    pub metadata_path: PathBuf,
    pub scheduler: SchedulerConfig,
    pub log: LogTarget,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_model_requires_every_resource() {
        let err = CostModel::from_costs([(Resource::Run, 10.0)]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCost("monitor")));
    }

    #[test]
    fn test_cost_model_rejects_negative_cost() {
        let err = CostModel::from_costs(Resource::ALL.map(|r| (r, -1.0))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCost { .. }));
    }

    #[test]
    fn test_delay_conversion() {
        let costs = CostModel::uniform(10.0);

        assert_eq!(
            costs.delay(&ActionKind::Compute(Resource::Run), 5),
            Duration::from_millis(50)
        );
        assert_eq!(costs.delay(&ActionKind::ProcessStart, 5), Duration::ZERO);
        assert_eq!(costs.action_cost(&ActionKind::Input(Resource::Keyboard), 3), 30.0);
    }

    #[test]
    fn test_preemptive_policy_requires_quantum() {
        let err = SchedulerConfig::new(SchedulingPolicy::RoundRobin, None, CostModel::uniform(1.0))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingQuantum("RR")));

        let config =
            SchedulerConfig::new(SchedulingPolicy::Sjf, None, CostModel::uniform(1.0)).unwrap();
        assert_eq!(config.mode(), ExecutionMode::RunToCompletion);
    }

    #[test]
    fn test_quantum_ignored_when_not_preemptive() {
        let quantum = TimeQuantum::new(4).unwrap();
        let config =
            SchedulerConfig::new(SchedulingPolicy::Fifo, Some(quantum), CostModel::uniform(1.0))
                .unwrap();
        assert_eq!(config.mode(), ExecutionMode::RunToCompletion);

        let config = SchedulerConfig::new(
            SchedulingPolicy::SrtfPreemptive,
            Some(quantum),
            CostModel::uniform(1.0),
        )
        .unwrap();
        assert_eq!(config.mode(), ExecutionMode::Quantum(quantum));
    }
}
