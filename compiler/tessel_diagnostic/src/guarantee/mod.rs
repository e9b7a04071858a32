use std::fmt;

/// Proof that at least one error was emitted.
///
/// Only [`DiagnosticQueue`](crate::DiagnosticQueue) can construct one, so a
/// function returning `Result<T, ErrorGuaranteed>` cannot fail silently.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    pub(crate) fn new() -> Self {
        ErrorGuaranteed(())
    }

    /// Proof from an error count, if it is non-zero.
    pub fn from_error_count(count: usize) -> Option<Self> {
        (count > 0).then(Self::new)
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("error(s) emitted")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap known-nonzero counts")]
mod tests;
