use std::fmt;

/// Error codes for all generation diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Request errors (roots)
/// - E1xxx: Type classification errors
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum ErrorCode {
    // Request Errors (E0xxx)
    /// Root is not a class, enum or container
    E0001,

    // Classification Errors (E1xxx)
    /// Unsupported type (`void`, library type without a codec,
    /// multi-dimensional primitive array)
    E1001,
    /// Container used without type arguments
    E1002,
    /// Abstract or interface type with no concrete subtype where an
    /// instance is required
    E1003,

    // Internal Errors (E9xxx)
    /// Internal generator error
    E9001,
    /// Too many errors
    E9002,
}

impl ErrorCode {
    /// Get the numeric code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
        }
    }

    /// Short name of the failure class.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "UnknownRoot",
            ErrorCode::E1001 => "UnsupportedType",
            ErrorCode::E1002 => "MissingTypeArguments",
            ErrorCode::E1003 => "AbstractNotAllowedHere",
            ErrorCode::E9001 => "InternalError",
            ErrorCode::E9002 => "TooManyErrors",
        }
    }

    pub fn is_internal(&self) -> bool {
        self.as_str().starts_with("E9")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E1001.to_string(), "E1001");
        assert_eq!(ErrorCode::E1003.name(), "AbstractNotAllowedHere");
    }

    #[test]
    fn test_internal_range() {
        assert!(ErrorCode::E9001.is_internal());
        assert!(!ErrorCode::E0001.is_internal());
    }
}
