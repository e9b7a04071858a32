use std::fmt::Write as _;

use crate::{Diagnostic, ErrorCode};

/// Terminal generation failure carrying every collected diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("codec generation failed with {} error(s)", self.error_count())]
pub struct GenerationFailed {
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationFailed {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        GenerationFailed { diagnostics }
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Whether any diagnostic has this code.
    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }

    /// Every diagnostic followed by the summary line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for diag in &self.diagnostics {
            let _ = writeln!(out, "{diag}\n");
        }
        let _ = write!(out, "{self}");
        out
    }
}
