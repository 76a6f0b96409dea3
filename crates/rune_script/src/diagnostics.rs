//! Diagnostics sink
//!
//! Script output goes to whatever sink the host injects. There is no
//! process-wide console: a sink is handed to the engine once and reaches
//! scripts and native glue through their contexts.

use std::cell::RefCell;

pub use tracing::Level;

/// Destination for script and glue diagnostics.
pub trait DiagnosticsSink {
    /// `source` names the emitter, e.g. a script class or a native call.
    fn record(&self, level: Level, source: &str, message: &str);
}

/// Forwards records to `tracing` under the `rune::script` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn record(&self, level: Level, source: &str, message: &str) {
        match level {
            Level::ERROR => tracing::error!(target: "rune::script", source, "{message}"),
            Level::WARN => tracing::warn!(target: "rune::script", source, "{message}"),
            Level::INFO => tracing::info!(target: "rune::script", source, "{message}"),
            Level::DEBUG => tracing::debug!(target: "rune::script", source, "{message}"),
            _ => tracing::trace!(target: "rune::script", source, "{message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticRecord {
    pub level: Level,
    pub source: String,
    pub message: String,
}

/// Buffers records in memory (tests, in-editor consoles).
#[derive(Debug, Default)]
pub struct MemorySink {
    records: RefCell<Vec<DiagnosticRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<DiagnosticRecord> {
        self.records.borrow().clone()
    }

    pub fn take(&self) -> Vec<DiagnosticRecord> {
        self.records.take()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records.borrow().iter().map(|r| r.message.clone()).collect()
    }
}

impl DiagnosticsSink for MemorySink {
    fn record(&self, level: Level, source: &str, message: &str) {
        self.records.borrow_mut().push(DiagnosticRecord {
            level,
            source: source.to_string(),
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_keeps_order() {
        let sink = MemorySink::new();
        sink.record(Level::INFO, "Player", "first");
        sink.record(Level::WARN, "NativeLog", "second");
        assert_eq!(sink.messages(), vec!["first", "second"]);
        let taken = sink.take();
        assert_eq!(taken[1].level, Level::WARN);
        assert_eq!(taken[1].source, "NativeLog");
        assert!(sink.records().is_empty());
    }
}
