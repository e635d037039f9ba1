use crate::{
    Classification, DiscoveryState, FetchError, Lead, LoadState, OutreachDraft, PilotStatus,
    Priority, SearchCriteria, Stats,
};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub leads: Vec<LeadRowView>,
    pub stats: Stats,
    pub detail: Option<LeadDetailView>,
    pub load: LoadState,
    pub is_loading: bool,
    pub fetch_error: Option<FetchError>,
    pub discovery: DiscoveryState,
    pub discovery_message: Option<String>,
    pub can_submit_discovery: bool,
    pub pilot: PilotStatus,
    pub search: SearchCriteria,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeadRowView {
    pub company_name: String,
    pub url: String,
    pub category: Option<String>,
    pub performance_score: Option<u8>,
    pub lcp_value: Option<f64>,
    pub tier: Priority,
    pub email_eligible: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeadDetailView {
    pub lead: Lead,
    pub classification: Classification,
    pub outreach: Option<OutreachDraft>,
}
