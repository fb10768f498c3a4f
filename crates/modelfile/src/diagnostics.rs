//! Advisory diagnostics reported alongside a successful parse.

use std::fmt;

use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line the offending token starts on.
    pub line: usize,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A keyword that is neither reserved nor a `#` comment.
    UnknownDirective { keyword: String },
}

impl Diagnostic {
    pub fn unknown_directive(line: usize, keyword: impl Into<String>) -> Self {
        Self {
            line,
            kind: DiagnosticKind::UnknownDirective {
                keyword: keyword.into(),
            },
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::UnknownDirective { keyword } => {
                write!(f, "line {}: unknown command: {keyword}", self.line)
            }
        }
    }
}

/// Receives advisory diagnostics during a parse.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics for the caller to inspect.
impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Logs each diagnostic as a `tracing` warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match &diagnostic.kind {
            DiagnosticKind::UnknownDirective { keyword } => {
                warn!(line = diagnostic.line, keyword = %keyword, "unknown command");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let d = Diagnostic::unknown_directive(3, "FOO");
        assert_eq!(d.to_string(), "line 3: unknown command: FOO");
    }

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        sink.report(Diagnostic::unknown_directive(1, "A"));
        sink.report(Diagnostic::unknown_directive(2, "B"));
        assert_eq!(
            sink,
            vec![
                Diagnostic::unknown_directive(1, "A"),
                Diagnostic::unknown_directive(2, "B"),
            ]
        );
    }
}
