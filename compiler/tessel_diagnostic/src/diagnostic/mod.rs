//! Core diagnostic type.
//!
//! Generation has no source spans. A diagnostic instead carries the chain
//! of types and fields the walker was in when the problem was found,
//! outermost first.

use std::fmt;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// One step of the walk that led to a diagnostic.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ContextFrame {
    /// Generation was requested for this root type.
    Root(String),
    /// Walking the type with this qualified name.
    Type(String),
    /// Walking a field of the enclosing type.
    Field { owner: String, field: String },
    /// Walking a type argument or array component.
    Argument(String),
}

impl fmt::Display for ContextFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextFrame::Root(name) => write!(f, "requested as root `{name}`"),
            ContextFrame::Type(name) => write!(f, "in type `{name}`"),
            ContextFrame::Field { owner, field } => write!(f, "in field `{owner}.{field}`"),
            ContextFrame::Argument(name) => write!(f, "in type argument `{name}`"),
        }
    }
}

/// A generation diagnostic.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    pub severity: Severity,
    /// Main error message.
    pub message: String,
    /// Walk context, outermost first.
    pub context: Vec<ContextFrame>,
    /// Additional notes.
    pub notes: Vec<String>,
}

impl Diagnostic {
    fn new_with_severity(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            context: Vec::new(),
            notes: Vec::new(),
        }
    }

    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Error)
    }

    #[cold]
    pub fn warning(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Warning)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Replace the context chain.
    pub fn with_context(mut self, context: impl IntoIterator<Item = ContextFrame>) -> Self {
        self.context = context.into_iter().collect();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    /// The innermost frame, where the problem sits.
    pub fn innermost(&self) -> Option<&ContextFrame> {
        self.context.last()
    }
}

// Constructors for the generation failure classes.

/// `void`, a library type without a codec, or a multi-dimensional primitive
/// array.
pub fn unsupported_type(type_name: &str, reason: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1001)
        .with_message(format!("unsupported type `{type_name}`: {reason}"))
}

pub fn missing_type_arguments(type_name: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1002)
        .with_message(format!("container `{type_name}` is used without type arguments"))
        .with_note("element, key and value codecs are chosen from the type arguments")
}

pub fn abstract_not_allowed(type_name: &str, role: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1003)
        .with_message(format!(
            "`{type_name}` cannot be used as a {role}: it is abstract and has no concrete subtype"
        ))
}

pub fn unknown_root(type_name: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E0001).with_message(format!(
        "`{type_name}` cannot be a generation root: expected a class, enum or container"
    ))
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        for frame in self.context.iter().rev() {
            write!(f, "\n  {frame}")?;
        }
        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
