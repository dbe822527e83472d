// crates/ports/src/diagnostics.rs
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        })
    }
}

/// Receives `(level, message)` pairs from the session and host adapters.
pub trait DiagnosticsSink: Send + Sync {
    fn emit(&self, level: DiagnosticLevel, message: &str);

    fn debug(&self, message: &str) {
        self.emit(DiagnosticLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.emit(DiagnosticLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.emit(DiagnosticLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.emit(DiagnosticLevel::Error, message);
    }
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDiagnostics;

impl DiagnosticsSink for NullDiagnostics {
    fn emit(&self, _level: DiagnosticLevel, _message: &str) {}
}
