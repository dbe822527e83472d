// crates/infra/src/diagnostics.rs
use std::sync::{Mutex, PoisonError};

use year_range_filter_ports::diagnostics::{DiagnosticLevel, DiagnosticsSink};

/// `log` target every message from [`LogDiagnostics`] is written under.
pub const LOG_TARGET: &str = "year_range_filter";

/// Forwards diagnostics to the `log` facade; the binary decides where they go.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl DiagnosticsSink for LogDiagnostics {
    fn emit(&self, level: DiagnosticLevel, message: &str) {
        match level {
            DiagnosticLevel::Debug => log::debug!(target: LOG_TARGET, "{message}"),
            DiagnosticLevel::Info => log::info!(target: LOG_TARGET, "{message}"),
            DiagnosticLevel::Warning => log::warn!(target: LOG_TARGET, "{message}"),
            DiagnosticLevel::Error => log::error!(target: LOG_TARGET, "{message}"),
        }
    }
}

/// Keeps every `(level, message)` pair in memory.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    entries: Mutex<Vec<(DiagnosticLevel, String)>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(DiagnosticLevel, String)> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn messages_at(&self, level: DiagnosticLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }
}

impl DiagnosticsSink for MemoryDiagnostics {
    fn emit(&self, level: DiagnosticLevel, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_records_in_order() {
        let sink = MemoryDiagnostics::new();
        sink.info("opened");
        sink.warn("inverted");
        sink.debug("expr");

        assert_eq!(sink.entries().len(), 3);
        assert_eq!(sink.messages_at(DiagnosticLevel::Warning), vec!["inverted".to_string()]);
    }

    #[test]
    fn log_sink_accepts_every_level() {
        let sink = LogDiagnostics;
        for level in [
            DiagnosticLevel::Debug,
            DiagnosticLevel::Info,
            DiagnosticLevel::Warning,
            DiagnosticLevel::Error,
        ] {
            sink.emit(level, "message");
        }
    }
}
