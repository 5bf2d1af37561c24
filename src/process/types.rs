/*!
 * Process Types
 * Actions, resources and lifecycle states for simulated processes
 */

use crate::core::types::{Cycles, Pid};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resource an action consumes cycles on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    #[serde(rename = "run")]
    Run,
    #[serde(rename = "monitor")]
    Monitor,
    #[serde(rename = "hard drive")]
    HardDrive,
    #[serde(rename = "printer")]
    Printer,
    #[serde(rename = "keyboard")]
    Keyboard,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Run,
        Resource::Monitor,
        Resource::HardDrive,
        Resource::Printer,
        Resource::Keyboard,
    ];

    /// Descriptor as written in meta-data and log lines
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Monitor => "monitor",
            Self::HardDrive => "hard drive",
            Self::Printer => "printer",
            Self::Keyboard => "keyboard",
        }
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "run" => Ok(Self::Run),
            "monitor" => Ok(Self::Monitor),
            "hard drive" => Ok(Self::HardDrive),
            "printer" => Ok(Self::Printer),
            "keyboard" => Ok(Self::Keyboard),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an action does
///
/// ProcessStart/ProcessEnd bracket every process and carry no resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "resource", rename_all = "snake_case")]
pub enum ActionKind {
    ProcessStart,
    ProcessEnd,
    Compute(Resource),
    Input(Resource),
    Output(Resource),
}

impl ActionKind {
    /// Resource whose cycle cost applies, if any
    #[inline]
    pub const fn resource(&self) -> Option<Resource> {
        match self {
            Self::Compute(r) | Self::Input(r) | Self::Output(r) => Some(*r),
            Self::ProcessStart | Self::ProcessEnd => None,
        }
    }

    /// Start/End actions are OS bookkeeping, not schedulable work
    #[inline]
    pub const fn is_bookkeeping(&self) -> bool {
        matches!(self, Self::ProcessStart | Self::ProcessEnd)
    }
}

/// One unit of work within a process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub remaining_cycles: Cycles,
    pub owner: Pid,
}

impl Action {
    pub fn new(owner: Pid, kind: ActionKind, cycles: Cycles) -> Self {
        Self {
            kind,
            remaining_cycles: cycles,
            owner,
        }
    }

    pub fn process_start(owner: Pid) -> Self {
        Self::new(owner, ActionKind::ProcessStart, 0)
    }

    pub fn process_end(owner: Pid) -> Self {
        Self::new(owner, ActionKind::ProcessEnd, 0)
    }

    #[inline]
    pub const fn is_complete(&self) -> bool {
        self.remaining_cycles == 0
    }

    /// Log message emitted when the action begins
    pub fn begin_message(&self) -> String {
        match self.kind {
            ActionKind::ProcessStart => format!("OS: starting process {}", self.owner),
            ActionKind::ProcessEnd => format!("OS: removing process {}", self.owner),
            _ => format!("Process {}: start {}", self.owner, self.subject()),
        }
    }

    /// Log message emitted when the action stops running
    ///
    /// Bookkeeping actions log a single line, so they have no finish message.
    pub fn finish_message(&self, verb: &str) -> Option<String> {
        if self.kind.is_bookkeeping() {
            return None;
        }
        Some(format!("Process {}: {} {}", self.owner, verb, self.subject()))
    }

    fn subject(&self) -> String {
        match self.kind {
            ActionKind::Input(resource) => format!("{} input", resource),
            ActionKind::Output(resource) => format!("{} output", resource),
            _ => "processing action".to_string(),
        }
    }
}

/// Process lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Created, action queue not yet admitted
    Enter,
    /// Eligible for selection
    Ready,
    /// Subject of the current executor call
    Running,
    /// Quantum expired with work left on the current action
    Blocked,
    /// Action queue drained (terminal)
    Exit,
}

impl ProcessState {
    /// Whether `self -> next` is an edge of the lifecycle graph
    ///
    /// Running -> Ready covers a quantum that ends exactly on an action
    /// boundary while further actions remain.
    pub const fn can_transition_to(self, next: ProcessState) -> bool {
        matches!(
            (self, next),
            (Self::Enter, Self::Ready)
                | (Self::Ready, Self::Running)
                | (Self::Running, Self::Blocked)
                | (Self::Running, Self::Ready)
                | (Self::Running, Self::Exit)
                | (Self::Blocked, Self::Ready)
        )
    }

    #[inline(always)]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Exit)
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Enter => "Enter",
            Self::Ready => "Ready",
            Self::Running => "Running",
            Self::Blocked => "Blocked",
            Self::Exit => "Exit",
        };
        f.write_str(name)
    }
}
