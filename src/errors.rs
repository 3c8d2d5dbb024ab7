//! Error types returned by functions in this crate.

use std::fmt;

/// Error returned when parsing or resolving time zone data fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TzError {
    /// The TZif byte buffer is malformed or uses an unsupported version.
    InvalidTzif(&'static str),
    /// The POSIX TZ string is malformed or has an out-of-range field.
    InvalidPosixTz(&'static str),
    /// The region loader could not find data for the requested name.
    RegionNotFound(String),
    /// The region loader failed to read the underlying bytes.
    IoError(String),
}

impl fmt::Display for TzError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTzif(msg) => write!(f, "invalid TZif data: {msg}"),
            Self::InvalidPosixTz(msg) => write!(f, "invalid POSIX TZ string: {msg}"),
            Self::RegionNotFound(name) => write!(f, "time zone region not found: {name}"),
            Self::IoError(msg) => write!(f, "failed to read time zone data: {msg}"),
        }
    }
}

impl std::error::Error for TzError {}

impl From<std::str::Utf8Error> for TzError {
    fn from(_: std::str::Utf8Error) -> Self {
        TzError::InvalidTzif("footer is not valid UTF-8")
    }
}

impl From<std::num::ParseIntError> for TzError {
    fn from(_: std::num::ParseIntError) -> Self {
        TzError::InvalidPosixTz("expected an integer")
    }
}

pub(crate) const BUG_MSG: &str =
    "meridian: internal invariant violated, please report this at the issue tracker";
