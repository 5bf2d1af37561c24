/*!
 * Scheduler Types
 * Policy and quantum configuration
 */

use crate::core::errors::ConfigError;
use crate::core::types::Cycles;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Scheduling policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedulingPolicy {
    /// First in, first out; each process runs to exhaustion
    Fifo,
    /// Shortest job first, ordered once before scheduling begins
    Sjf,
    /// Shortest remaining time first, re-evaluated between processes
    Srtf,
    /// FIFO with quantum preemption; preempted processes keep the head of the line
    FifoPreemptive,
    /// Round-robin with fixed time quantum
    RoundRobin,
    /// Shortest remaining time first with quantum preemption
    SrtfPreemptive,
}

/// How a policy picks the next Ready process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Head of the Ready queue
    Head,
    /// Minimum estimated remaining cost; lower pid wins ties
    ShortestRemaining,
}

/// Where a preempted or yielding process re-enters the Ready queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reinsertion {
    Front,
    Back,
}

impl SchedulingPolicy {
    pub const ALL: [SchedulingPolicy; 6] = [
        Self::Fifo,
        Self::Sjf,
        Self::Srtf,
        Self::FifoPreemptive,
        Self::RoundRobin,
        Self::SrtfPreemptive,
    ];

    /// Configuration code for this policy
    ///
    /// # Performance
    /// Hot path - frequently called for logging and serialization
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fifo => "FIFO",
            Self::Sjf => "SJF",
            Self::Srtf => "SRTF",
            Self::FifoPreemptive => "FIFO-P",
            Self::RoundRobin => "RR",
            Self::SrtfPreemptive => "SRTF-P",
        }
    }

    #[inline(always)]
    pub const fn is_preemptive(&self) -> bool {
        matches!(
            self,
            Self::FifoPreemptive | Self::RoundRobin | Self::SrtfPreemptive
        )
    }

    pub const fn selection(&self) -> Selection {
        match self {
            Self::Srtf | Self::SrtfPreemptive => Selection::ShortestRemaining,
            Self::Fifo | Self::Sjf | Self::FifoPreemptive | Self::RoundRobin => Selection::Head,
        }
    }

    /// FIFO-P puts a preempted process back at the front of the line,
    /// so it keeps the processor until it exits.
    pub const fn reinsertion(&self) -> Reinsertion {
        match self {
            Self::FifoPreemptive => Reinsertion::Front,
            _ => Reinsertion::Back,
        }
    }

    /// SJF orders the Ready queue once, before the first dispatch
    pub const fn sorts_on_admission(&self) -> bool {
        matches!(self, Self::Sjf)
    }
}

impl FromStr for SchedulingPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FIFO" => Ok(Self::Fifo),
            "SJF" => Ok(Self::Sjf),
            "SRTF" => Ok(Self::Srtf),
            "FIFO-P" => Ok(Self::FifoPreemptive),
            "RR" => Ok(Self::RoundRobin),
            "SRTF-P" => Ok(Self::SrtfPreemptive),
            _ => Err(ConfigError::InvalidPolicy(s.trim().to_string())),
        }
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SchedulingPolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SchedulingPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Time quantum, in cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeQuantum {
    cycles: Cycles,
}

impl TimeQuantum {
    /// Create new time quantum; zero is rejected
    pub fn new(cycles: Cycles) -> Result<Self, ConfigError> {
        if cycles == 0 {
            return Err(ConfigError::InvalidQuantum(
                "quantum must be at least one cycle".to_string(),
            ));
        }
        Ok(Self { cycles })
    }

    /// Parse a quantum written as a whole number, e.g. `3` or `3.0`
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let value = value.trim();
        let invalid = || ConfigError::InvalidQuantum(value.to_string());

        if let Ok(cycles) = value.parse::<Cycles>() {
            return Self::new(cycles).map_err(|_| invalid());
        }
        let float: f64 = value.parse().map_err(|_| invalid())?;
        if !float.is_finite() || float <= 0.0 || float.fract() != 0.0 || float > Cycles::MAX as f64 {
            return Err(invalid());
        }
        Self::new(float as Cycles)
    }

    /// Hot path - called on every quantum grant
    #[inline(always)]
    pub const fn cycles(&self) -> Cycles {
        self.cycles
    }
}

impl<'de> Deserialize<'de> for TimeQuantum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Inner {
            cycles: Cycles,
        }

        let inner = Inner::deserialize(deserializer)?;
        Self::new(inner.cycles).map_err(serde::de::Error::custom)
    }
}
