/*!
 * Log Sinks
 * Destinations for simulator log lines: console, file, memory
 */

use super::event_log::LogEntry;
use crate::simulation::LogTarget;
use parking_lot::Mutex;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

/// Destination for formatted log entries
pub trait LogSink: Send {
    fn record(&mut self, entry: &LogEntry) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes entries to stdout
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for ConsoleSink {
    fn record(&mut self, entry: &LogEntry) -> io::Result<()> {
        writeln!(io::stdout().lock(), "{}", entry)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().lock().flush()
    }
}

/// Writes entries to a truncated file
#[derive(Debug)]
pub struct FileSink {
    writer: BufWriter<File>,
}

impl FileSink {
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl LogSink for FileSink {
    fn record(&mut self, entry: &LogEntry) -> io::Result<()> {
        writeln!(self.writer, "{}", entry)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Collects entries in memory; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Formatted lines, exactly as a file sink would write them
    pub fn lines(&self) -> Vec<String> {
        self.entries.lock().iter().map(ToString::to_string).collect()
    }

    /// Messages without timestamps
    pub fn messages(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .map(|entry| entry.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl LogSink for MemorySink {
    fn record(&mut self, entry: &LogEntry) -> io::Result<()> {
        self.entries.lock().push(entry.clone());
        Ok(())
    }
}

/// Open the sinks a log target calls for
pub fn open_sinks(target: &LogTarget) -> io::Result<Vec<Box<dyn LogSink>>> {
    let mut sinks: Vec<Box<dyn LogSink>> = Vec::with_capacity(2);
    if target.to_monitor() {
        sinks.push(Box::new(ConsoleSink::new()));
    }
    if let Some(path) = target.file() {
        sinks.push(Box::new(FileSink::create(path)?));
    }
    Ok(sinks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_file_sink_writes_lines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("run.lgf");

        let mut sink = FileSink::create(&path).unwrap();
        sink.record(&LogEntry {
            at: Duration::from_millis(250),
            message: "OS: starting process 1".to_string(),
        })
        .unwrap();
        sink.flush().unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "0.250000 - OS: starting process 1\n");
    }

    #[test]
    fn test_open_sinks_per_target() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("both.lgf");

        assert_eq!(open_sinks(&LogTarget::Monitor).unwrap().len(), 1);
        assert_eq!(open_sinks(&LogTarget::File(path.clone())).unwrap().len(), 1);
        assert_eq!(open_sinks(&LogTarget::Both(path.clone())).unwrap().len(), 2);
        assert!(path.exists());
    }

    #[test]
    fn test_open_sinks_reports_bad_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("out.lgf");
        assert!(open_sinks(&LogTarget::File(path)).is_err());
    }
}
