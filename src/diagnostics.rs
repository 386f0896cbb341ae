use crate::error::MappingError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Recorded, aborts nothing.
    Warning,
    /// Aborts generation for the owning directive only.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A generation problem tied to the type it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub related_type: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", self.severity, self.message, self.related_type)
    }
}

/// Host-side consumer of diagnostics.
pub trait DiagnosticSink {
    fn emit(&mut self, severity: Severity, message: &str, related_type: &str);
}

/// Append-only diagnostic log for one generation round.
///
/// Every diagnostic is also forwarded to `tracing`.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl DiagnosticSink for Diagnostics {
    fn emit(&mut self, severity: Severity, message: &str, related_type: &str) {
        match severity {
            Severity::Warning => tracing::warn!(related_type, "{}", message),
            Severity::Error => tracing::error!(related_type, "{}", message),
        }
        self.entries.push(Diagnostic {
            severity,
            message: message.to_string(),
            related_type: related_type.to_string(),
        });
    }
}

/// Holds the diagnostics of one directive until it is known to succeed, so an
/// aborted directive leaves only its error behind.
#[derive(Debug, Default)]
pub(crate) struct PendingDiagnostics {
    pending: Vec<Diagnostic>,
}

impl PendingDiagnostics {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Forwards everything held to `sink`, in emission order.
    pub(crate) fn commit(self, sink: &mut dyn DiagnosticSink) {
        for diagnostic in self.pending {
            sink.emit(
                diagnostic.severity,
                &diagnostic.message,
                &diagnostic.related_type,
            );
        }
    }
}

impl DiagnosticSink for PendingDiagnostics {
    fn emit(&mut self, severity: Severity, message: &str, related_type: &str) {
        self.pending.push(Diagnostic {
            severity,
            message: message.to_string(),
            related_type: related_type.to_string(),
        });
    }
}

/// Reports a directive-aborting error against the directive's source type.
pub fn report_mapping_error(sink: &mut dyn DiagnosticSink, error: &MappingError) {
    let related_type = match error {
        MappingError::ValidationError { source_type, .. }
        | MappingError::StructuralMismatch { source_type, .. } => source_type.as_str(),
    };
    sink.emit(Severity::Error, &error.to_string(), related_type);
}
