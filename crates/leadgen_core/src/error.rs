use std::fmt;

use thiserror::Error;

/// A raw record could not be turned into a [`crate::Lead`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    #[error("missing or non-string field `{field}`")]
    MissingField { field: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    HttpStatus(u16),
    InvalidShape,
    NetworkFailure,
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            FetchErrorKind::InvalidShape => write!(f, "invalid payload shape"),
            FetchErrorKind::NetworkFailure => write!(f, "network failure"),
        }
    }
}

/// Failure of the lead list fetch or of a pilot-status tick.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_shape(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::InvalidShape, message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    #[error("discovery submit failed: {message}")]
    SubmitFailed { message: String },
}

impl DiscoveryError {
    pub fn submit_failed(message: impl Into<String>) -> Self {
        DiscoveryError::SubmitFailed {
            message: message.into(),
        }
    }
}
