#![forbid(unsafe_code)]

//! Error type shared by every wbind crate.
//!
//! Validation never recovers: a rejected value is reported to the caller of
//! the validating or mutating operation and nothing is retried. Every variant
//! carries enough context (the offending value, and where applicable the set
//! of acceptable values) to render an actionable message.

use std::convert::Infallible;
use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A value was rejected by a trait type.
    Validation,
    /// A value searched for in a sequence was not present.
    NotFound,
    /// A key or index did not address an existing element.
    Lookup,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("expected {info}, not {value}")]
    Invalid { info: &'static str, value: String },

    #[error(
        "the type specifier of a number format must be one of {allowed:?}, \
         but a value of '{found}' was specified"
    )]
    UnsupportedFormatType {
        allowed: Vec<&'static str>,
        found: String,
    },

    #[error("expected an instance of {expected}, not {found}")]
    WrongType {
        expected: &'static str,
        found: String,
    },

    #[error("could not construct {target}: {reason}")]
    Construct { target: &'static str, reason: String },

    #[error("field '{name}' has no value and no default")]
    NoDefault { name: String },

    #[error("{value} is not in the sequence")]
    NotFound { value: String },

    #[error("key {key} is not present")]
    KeyNotFound { key: String },

    #[error("index {index} out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

impl Error {
    /// A value rejected by a trait type described by `info`.
    #[must_use]
    pub fn invalid(info: &'static str, value: &dyn fmt::Debug) -> Self {
        Self::Invalid {
            info,
            value: format!("{value:?}"),
        }
    }

    #[must_use]
    pub fn not_found(value: &dyn fmt::Debug) -> Self {
        Self::NotFound {
            value: format!("{value:?}"),
        }
    }

    #[must_use]
    pub fn key_not_found(key: &dyn fmt::Debug) -> Self {
        Self::KeyNotFound {
            key: format!("{key:?}"),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::KeyNotFound { .. } | Self::IndexOutOfRange { .. } => ErrorKind::Lookup,
            _ => ErrorKind::Validation,
        }
    }

    /// Whether the error is a rejected value (as opposed to a failed lookup).
    #[must_use]
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

impl From<Infallible> for Error {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
