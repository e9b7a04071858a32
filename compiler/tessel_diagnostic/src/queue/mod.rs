//! Diagnostic queue for collecting and deduplicating diagnostics.
//!
//! Features:
//! - Error limits to prevent overwhelming output
//! - Deduplication of the same problem reached along the same walk path
//! - `ErrorGuaranteed` proof that errors were emitted
//!
//! Diagnostics keep insertion order. The walker visits types in a
//! deterministic order, so the report is stable across runs.

use rustc_hash::FxHashSet;

use crate::{ContextFrame, Diagnostic, ErrorCode, ErrorGuaranteed};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors before further ones are dropped
    /// (0 = unlimited).
    pub error_limit: usize,
    /// Drop diagnostics identical in code, message and full context.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 50,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// Create a config with no limits (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

/// Identity used for deduplication.
///
/// The whole context chain takes part: the same bad type under two fields
/// is two problems, even when the innermost frames agree.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
struct DedupKey {
    code: ErrorCode,
    message: String,
    context: Vec<ContextFrame>,
}

impl DedupKey {
    fn of(diag: &Diagnostic) -> Self {
        DedupKey {
            code: diag.code,
            message: diag.message.clone(),
            context: diag.context.clone(),
        }
    }
}

/// Queue for collecting diagnostics.
///
/// # Example
///
/// ```text
/// let mut queue = DiagnosticQueue::new();
/// queue.add(diagnostic);
/// // ... add more diagnostics
/// let all = queue.flush();
/// ```
#[derive(Clone, Debug)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    /// Count of errors (not warnings/notes).
    error_count: usize,
    /// Errors dropped because the limit was reached.
    suppressed: usize,
    seen: FxHashSet<DedupKey>,
    config: DiagnosticConfig,
}

impl Default for DiagnosticQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticQueue {
    /// Create a new diagnostic queue with default configuration.
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    /// Create a diagnostic queue with custom configuration.
    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            error_count: 0,
            suppressed: 0,
            seen: FxHashSet::default(),
            config,
        }
    }

    /// Add a diagnostic to the queue.
    ///
    /// Returns `true` if the diagnostic was added, `false` if it was filtered.
    pub fn add(&mut self, diag: Diagnostic) -> bool {
        let is_error = diag.is_error();

        if is_error && self.limit_reached() {
            self.suppressed += 1;
            return false;
        }

        if self.config.deduplicate && !self.seen.insert(DedupKey::of(&diag)) {
            return false;
        }

        self.diagnostics.push(diag);
        if is_error {
            self.error_count += 1;
        }
        true
    }

    /// Emit an error diagnostic and get proof it was emitted.
    ///
    /// A filtered duplicate still yields a guarantee: the same error is
    /// already in the queue.
    pub fn emit_error(&mut self, diag: Diagnostic) -> ErrorGuaranteed {
        self.add(diag);
        ErrorGuaranteed::new()
    }

    /// Check if the error limit has been reached.
    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    /// Get the number of errors collected.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Check if any errors were emitted and get proof if so.
    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count)
    }

    /// Return collected diagnostics in insertion order.
    ///
    /// If errors were dropped because of the limit, a trailing `E9002`
    /// diagnostic says how many. Clears the queue.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let mut result: Vec<Diagnostic> = self.diagnostics.drain(..).collect();
        if self.suppressed > 0 {
            result.push(
                Diagnostic::error(ErrorCode::E9002).with_message(format!(
                    "aborting after {} errors; {} more not shown",
                    self.error_count, self.suppressed
                )),
            );
        }

        self.error_count = 0;
        self.suppressed = 0;
        self.seen.clear();

        result
    }
}

#[cfg(test)]
mod tests;
