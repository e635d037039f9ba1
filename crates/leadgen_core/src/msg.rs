use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Dashboard became visible: start the initial load and the pilot poll.
    Mounted,
    /// Operator edited the niche input.
    NicheChanged(String),
    /// Operator edited the location input.
    LocationChanged(String),
    /// Operator asked for a manual reload of the lead list.
    RefreshClicked,
    /// `/api/leads` answered with a JSON body (not yet normalized).
    LoadSucceeded { payload: Value },
    /// `/api/leads` failed before a usable body arrived.
    LoadFailed(crate::FetchError),
    /// Operator submitted the discovery form.
    DiscoverySubmitted,
    /// `/api/discover` succeeded; the body, if any, is only an optimistic hint.
    DiscoverySucceeded { payload: Option<Value> },
    DiscoveryFailed(crate::DiscoveryError),
    /// The error banner timer for discovery attempt `epoch` ran out.
    DiscoveryErrorExpired { epoch: u64 },
    PollTicked(crate::PilotStatus),
    /// A pilot-status tick failed. Never surfaced to the operator.
    PollFailed(crate::FetchError),
    /// Operator activated a row.
    LeadSelected { company_name: String },
    SelectionCleared,
    /// Dashboard is going away; release the poll task.
    TornDown,
}

impl Msg {
    pub fn name(&self) -> &'static str {
        match self {
            Msg::Mounted => "Mounted",
            Msg::NicheChanged(_) => "NicheChanged",
            Msg::LocationChanged(_) => "LocationChanged",
            Msg::RefreshClicked => "RefreshClicked",
            Msg::LoadSucceeded { .. } => "LoadSucceeded",
            Msg::LoadFailed(_) => "LoadFailed",
            Msg::DiscoverySubmitted => "DiscoverySubmitted",
            Msg::DiscoverySucceeded { .. } => "DiscoverySucceeded",
            Msg::DiscoveryFailed(_) => "DiscoveryFailed",
            Msg::DiscoveryErrorExpired { .. } => "DiscoveryErrorExpired",
            Msg::PollTicked(_) => "PollTicked",
            Msg::PollFailed(_) => "PollFailed",
            Msg::LeadSelected { .. } => "LeadSelected",
            Msg::SelectionCleared => "SelectionCleared",
            Msg::TornDown => "TornDown",
        }
    }
}
