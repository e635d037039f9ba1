use std::fmt;

use serde::Serialize;
use serde_json::Value;

pub type TimerId = u64;

/// Body of `POST /api/discover`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveryRequest {
    pub niche: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Parsed JSON body of `/api/leads`.
    LeadsFetched(Result<Value, ApiError>),
    /// Outcome of `/api/discover`; the body is `None` when it was not JSON.
    DiscoveryCompleted(Result<Option<Value>, ApiError>),
    /// One poll tick of `/api/pilot-status`; an unparseable body is `Value::Null`.
    PilotStatusPolled(Result<Value, ApiError>),
    TimerFired { timer_id: TimerId },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    InvalidBody,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::InvalidBody => write!(f, "invalid response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
