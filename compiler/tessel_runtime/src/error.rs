//! Runtime codec errors.

/// Failure while encoding or decoding a value.
///
/// Decode failures are never defaulted away: a malformed member fails the
/// whole decode.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("malformed {kind} `{text}`")]
    MalformedNumber { kind: &'static str, text: String },
    #[error("malformed date `{text}`: {reason}")]
    MalformedDate { text: String, reason: String },
    #[error("duplicate map key {0}")]
    DuplicateKey(String),
    #[error("map has {keys} keys but {values} values")]
    MismatchedMapArrays { keys: usize, values: usize },
    #[error("expected {expected}, found JSON {found}")]
    UnexpectedJson {
        expected: &'static str,
        found: &'static str,
    },
    #[error("expected {expected} value, found {found}")]
    UnexpectedValue {
        expected: &'static str,
        found: &'static str,
    },
    #[error("`{name}` is not a variant of `{type_name}`")]
    UnknownVariant { type_name: String, name: String },
    #[error("no codec registered for `{0}`")]
    UnknownCodec(String),
    #[error("cannot encode non-finite {0} as JSON")]
    NonFiniteNumber(&'static str),
    #[error("invalid JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::Json(err.to_string())
    }
}

/// Failure from [`parse_timestamp`](crate::parse_timestamp).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    #[error("expected date and optional time: `{0}`")]
    ExpectedDateAndTime(String),
    #[error("invalid date format: `{0}`")]
    InvalidDate(String),
    #[error("invalid time format: `{0}`")]
    InvalidTime(String),
}

impl From<TimestampError> for CodecError {
    fn from(err: TimestampError) -> Self {
        let text = match &err {
            TimestampError::ExpectedDateAndTime(s)
            | TimestampError::InvalidDate(s)
            | TimestampError::InvalidTime(s) => s.clone(),
        };
        CodecError::MalformedDate {
            text,
            reason: err.to_string(),
        }
    }
}
