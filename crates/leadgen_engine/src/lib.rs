//! Lead dashboard engine: HTTP access to the lead API and effect execution.
mod client;
mod engine;
mod types;

pub use client::{
    ApiSettings, LeadApi, ReqwestLeadApi, DISCOVER_PATH, LEADS_PATH, PILOT_STATUS_PATH,
};
pub use engine::{EngineError, EngineHandle};
pub use types::{ApiError, DiscoveryRequest, EngineEvent, FailureKind, TimerId};
