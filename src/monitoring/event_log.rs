/*!
 * Event Log
 * Timestamps simulator events and relays them to the configured sinks
 */

use super::sinks::LogSink;
use serde::Serialize;
use std::fmt;
use std::io;
use std::time::Duration;
use tracing::warn;

/// One timestamped simulator event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub at: Duration,
    pub message: String,
}

impl fmt::Display for LogEntry {
    /// `<elapsed seconds, 6 decimals> - <message>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} - {}", self.at.as_secs_f64(), self.message)
    }
}

/// Ordered relay of log entries
///
/// Sink failures do not interrupt a run: the first error is kept and
/// returned by [`EventLog::finish`].
pub struct EventLog {
    sinks: Vec<Box<dyn LogSink>>,
    emitted: u64,
    first_error: Option<io::Error>,
}

impl EventLog {
    pub fn new(sinks: Vec<Box<dyn LogSink>>) -> Self {
        Self {
            sinks,
            emitted: 0,
            first_error: None,
        }
    }

    pub fn emit(&mut self, at: Duration, message: impl Into<String>) {
        let entry = LogEntry {
            at,
            message: message.into(),
        };

        for sink in &mut self.sinks {
            if let Err(e) = sink.record(&entry) {
                warn!(error = %e, "log sink write failed");
                self.first_error.get_or_insert(e);
            }
        }
        self.emitted += 1;
    }

    /// Entries emitted so far
    #[inline]
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Flush every sink and report the first failure of the run
    pub fn finish(&mut self) -> io::Result<()> {
        for sink in &mut self.sinks {
            if let Err(e) = sink.flush() {
                self.first_error.get_or_insert(e);
            }
        }
        match self.first_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
