//! Errors for the I/O-facing layers (tuning files, high score files)
//!
//! The simulation itself never returns errors: bad state there is a
//! programming error and is caught by assertions.

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum LoadError {
    /// File could not be read or written
    Io(io::Error),
    /// File contents were not valid JSON for the expected shape
    Parse(serde_json::Error),
    /// JSON parsed but a value is out of range
    Invalid { field: &'static str, reason: String },
}

impl LoadError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "i/o error: {err}"),
            Self::Parse(err) => write!(f, "invalid json: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid value for `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
