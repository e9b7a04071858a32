//! Diagnostics for codec generation.
//!
//! Generation never stops at the first problem: the walker records every
//! independently discoverable diagnostic in a [`DiagnosticQueue`] and the
//! session aborts afterwards with [`GenerationFailed`] carrying all of them.
//!
//! # Error Guarantees
//!
//! [`ErrorGuaranteed`] is type-level proof that at least one error was
//! emitted. It can only be obtained from the queue.
//!
//! ```text
//! let guarantee = queue.emit_error(diagnostic);
//! fn walk() -> Result<Plan, ErrorGuaranteed> { ... }
//! ```

mod diagnostic;
mod error_code;
mod failed;
mod guarantee;
pub mod queue;

pub use diagnostic::{
    abstract_not_allowed, missing_type_arguments, unknown_root, unsupported_type, ContextFrame,
    Diagnostic, Severity,
};
pub use error_code::ErrorCode;
pub use failed::GenerationFailed;
pub use guarantee::ErrorGuaranteed;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
