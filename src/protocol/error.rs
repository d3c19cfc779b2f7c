use std::fmt;
use thiserror::Error;

/// Why a byte sequence could not be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    Empty,
    Unterminated { len: usize },
    Overflow,
    TrailingBytes { consumed: usize, len: usize },
}

impl fmt::Display for Malformed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Malformed::Empty =>
                write!(f, "empty input"),
            Malformed::Unterminated { len } =>
                write!(f, "continuation bit never clears in {} byte(s)", len),
            Malformed::Overflow =>
                write!(f, "value does not fit in 64 bits"),
            Malformed::TrailingBytes { consumed, len } =>
                write!(f, "{} trailing byte(s) after varint of {} byte(s)", len - consumed, consumed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VarintError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("malformed encoding: {0}")]
    MalformedEncoding(Malformed),
}

impl From<Malformed> for VarintError {
    fn from(reason: Malformed) -> Self {
        VarintError::MalformedEncoding(reason)
    }
}

pub type Result<T> = std::result::Result<T, VarintError>;
