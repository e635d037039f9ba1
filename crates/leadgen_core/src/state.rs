use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::view_model::{DashboardView, LeadDetailView, LeadRowView};
use crate::{
    aggregate, classify, draft_outreach, resolve, Classification, DiscoveryError, FetchError,
    Lead, LeadSet, Stats,
};

/// Fixed delays driving the poll task and the discovery error banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub poll_interval: Duration,
    pub discovery_error_display: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(3),
            discovery_error_display: Duration::from_secs(3),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Unmounted,
    Mounted,
    TornDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    NotStarted,
    Loading,
    Loaded,
    LoadFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscoveryState {
    #[default]
    Idle,
    Searching,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchCriteria {
    pub niche: String,
    pub location: String,
}

/// Optional progress details reported by a running pilot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PilotProgress {
    pub message: Option<String>,
    pub percent: Option<u8>,
    pub step: Option<u64>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PilotStatus {
    #[default]
    Idle,
    Active {
        label: String,
        progress: PilotProgress,
    },
}

impl PilotStatus {
    /// Interpret a `/api/pilot-status` body.
    ///
    /// `"idle"`, a missing `status` or anything that is not an object maps to
    /// `Idle`; any other status string is passed through as `Active`.
    pub fn from_payload(payload: &Value) -> Self {
        let Some(label) = payload.get("status").and_then(Value::as_str) else {
            return PilotStatus::Idle;
        };
        if label.eq_ignore_ascii_case("idle") {
            return PilotStatus::Idle;
        }

        let percent = payload
            .get("progress")
            .and_then(Value::as_f64)
            .filter(|p| p.is_finite() && (0.0..=100.0).contains(p))
            .map(|p| p.round() as u8);

        PilotStatus::Active {
            label: label.to_owned(),
            progress: PilotProgress {
                message: payload
                    .get("message")
                    .and_then(Value::as_str)
                    .map(ToOwned::to_owned),
                percent,
                step: payload.get("step").and_then(Value::as_u64),
                total: payload.get("total").and_then(Value::as_u64),
            },
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, PilotStatus::Active { .. })
    }
}

/// Stats and per-lead classifications for one LeadSet, computed together.
#[derive(Debug, Clone, PartialEq)]
struct Derived {
    stats: Stats,
    classifications: Arc<[Classification]>,
}

impl Derived {
    fn compute(leads: &LeadSet) -> Self {
        Self {
            stats: aggregate(leads.as_slice()),
            classifications: leads.iter().map(classify).collect(),
        }
    }
}

impl Default for Derived {
    fn default() -> Self {
        Self::compute(&LeadSet::empty())
    }
}

/// Single owner of everything the dashboard shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    timings: Timings,
    lifecycle: Lifecycle,
    leads: LeadSet,
    derived: Derived,
    load: LoadState,
    pending_loads: usize,
    fetch_error: Option<FetchError>,
    discovery: DiscoveryState,
    discovery_message: Option<String>,
    discovery_epoch: u64,
    pilot: PilotStatus,
    search: SearchCriteria,
    selection: Option<String>,
    provisional: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timings(timings: Timings) -> Self {
        Self {
            timings,
            ..Self::default()
        }
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_torn_down(&self) -> bool {
        self.lifecycle == Lifecycle::TornDown
    }

    pub fn leads(&self) -> &LeadSet {
        &self.leads
    }

    pub fn stats(&self) -> Stats {
        self.derived.stats
    }

    /// Classifications in the same order as [`AppState::leads`].
    pub fn classifications(&self) -> &[Classification] {
        &self.derived.classifications
    }

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    pub fn is_loading(&self) -> bool {
        self.pending_loads > 0
    }

    pub fn fetch_error(&self) -> Option<&FetchError> {
        self.fetch_error.as_ref()
    }

    pub fn discovery(&self) -> DiscoveryState {
        self.discovery
    }

    pub fn discovery_message(&self) -> Option<&str> {
        self.discovery_message.as_deref()
    }

    pub fn pilot(&self) -> &PilotStatus {
        &self.pilot
    }

    pub fn search(&self) -> &SearchCriteria {
        &self.search
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// True while a provisional discovery set is shown and its reload is pending.
    pub fn is_provisional(&self) -> bool {
        self.provisional
    }

    pub fn selected_lead(&self) -> Option<&Lead> {
        self.selection
            .as_deref()
            .and_then(|name| self.leads.find(name))
    }

    pub fn view(&self) -> DashboardView {
        let selection = self.selection.as_deref();
        let leads = self
            .leads
            .iter()
            .zip(self.derived.classifications.iter())
            .map(|(lead, classification)| LeadRowView {
                company_name: lead.company_name.clone(),
                url: lead.url.clone(),
                category: lead.category.clone(),
                performance_score: lead.performance_score,
                lcp_value: lead.lcp_value,
                tier: classification.tier,
                email_eligible: classification.email_eligible,
                selected: selection == Some(lead.company_name.as_str()),
            })
            .collect();

        let detail = self.selected_lead().map(|lead| LeadDetailView {
            lead: lead.clone(),
            classification: classify(lead),
            outreach: draft_outreach(lead),
        });

        DashboardView {
            leads,
            stats: self.derived.stats,
            detail,
            load: self.load,
            is_loading: self.is_loading(),
            fetch_error: self.fetch_error.clone(),
            discovery: self.discovery,
            discovery_message: self.discovery_message.clone(),
            can_submit_discovery: self.discovery != DiscoveryState::Searching,
            pilot: self.pilot.clone(),
            search: self.search.clone(),
            dirty: self.dirty,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn mount(&mut self) {
        self.lifecycle = Lifecycle::Mounted;
        self.mark_dirty();
    }

    pub(crate) fn tear_down(&mut self) {
        self.lifecycle = Lifecycle::TornDown;
        self.mark_dirty();
    }

    pub(crate) fn set_niche(&mut self, niche: String) {
        if self.search.niche != niche {
            self.search.niche = niche;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_location(&mut self, location: String) {
        if self.search.location != location {
            self.search.location = location;
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_load(&mut self) {
        self.pending_loads += 1;
        self.load = LoadState::Loading;
        self.mark_dirty();
    }

    /// Swap in a fresh LeadSet with its derived views and re-resolved selection in one step.
    pub(crate) fn replace_leads(&mut self, leads: LeadSet) {
        self.derived = Derived::compute(&leads);
        self.selection = resolve(self.selection.as_deref(), &leads);
        self.leads = leads;
        self.provisional = false;
        self.mark_dirty();
    }

    /// Show a discovery result ahead of the reload it triggers.
    ///
    /// The selection key is held even when the provisional set lacks it; the
    /// next load outcome settles it.
    pub(crate) fn show_provisional_leads(&mut self, leads: LeadSet) {
        self.derived = Derived::compute(&leads);
        self.leads = leads;
        self.provisional = true;
        self.mark_dirty();
    }

    pub(crate) fn apply_load_success(&mut self, leads: LeadSet) {
        self.finish_load();
        self.replace_leads(leads);
        self.fetch_error = None;
        if !self.is_loading() {
            self.load = LoadState::Loaded;
        }
    }

    pub(crate) fn apply_load_failure(&mut self, error: FetchError) {
        self.finish_load();
        self.fetch_error = Some(error);
        if !self.is_loading() {
            self.load = LoadState::LoadFailed;
            if self.provisional {
                self.selection = resolve(self.selection.as_deref(), &self.leads);
                self.provisional = false;
            }
        }
        self.mark_dirty();
    }

    /// A well-formed response that was not a list empties the table and raises the banner.
    pub(crate) fn apply_invalid_shape(&mut self, error: FetchError) {
        self.finish_load();
        self.replace_leads(LeadSet::empty());
        self.fetch_error = Some(error);
        if !self.is_loading() {
            self.load = LoadState::LoadFailed;
        }
    }

    fn finish_load(&mut self) {
        self.pending_loads = self.pending_loads.saturating_sub(1);
    }

    /// Enter `Searching` and return the criteria to submit.
    pub(crate) fn begin_discovery(&mut self) -> SearchCriteria {
        self.discovery = DiscoveryState::Searching;
        self.discovery_epoch += 1;
        self.discovery_message = Some("Searching...".to_string());
        self.mark_dirty();
        self.search.clone()
    }

    pub(crate) fn finish_discovery(&mut self) {
        self.discovery = DiscoveryState::Idle;
        self.discovery_message = None;
        self.mark_dirty();
    }

    /// Enter `Error` and return the epoch the auto-clear timer must carry.
    pub(crate) fn fail_discovery(&mut self, error: &DiscoveryError) -> u64 {
        self.discovery = DiscoveryState::Error;
        self.discovery_message = Some(format!("Error searching: {error}"));
        self.mark_dirty();
        self.discovery_epoch
    }

    /// Returns false when the timer belongs to an earlier attempt.
    pub(crate) fn expire_discovery_error(&mut self, epoch: u64) -> bool {
        if self.discovery != DiscoveryState::Error || epoch != self.discovery_epoch {
            return false;
        }
        self.finish_discovery();
        true
    }

    pub(crate) fn set_pilot(&mut self, pilot: PilotStatus) {
        if self.pilot != pilot {
            self.pilot = pilot;
            self.mark_dirty();
        }
    }

    /// Returns false when no lead with that name is currently shown.
    pub(crate) fn select(&mut self, company_name: String) -> bool {
        if !self.leads.contains(&company_name) {
            return false;
        }
        if self.selection.as_deref() != Some(company_name.as_str()) {
            self.selection = Some(company_name);
            self.mark_dirty();
        }
        true
    }

    pub(crate) fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.mark_dirty();
        }
    }
}
