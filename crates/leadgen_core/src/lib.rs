//! Lead dashboard core: pure state machine, derived metrics and view-model helpers.
mod classify;
mod effect;
mod error;
mod lead;
mod metrics;
mod msg;
mod normalize;
mod outreach;
mod selection;
mod state;
mod update;
mod view_model;

pub use classify::{
    classify, is_email_eligible, priority_tier, Classification, Priority, CRITICAL_BELOW,
    HEALTHY_ABOVE, OUTREACH_BELOW,
};
pub use effect::Effect;
pub use error::{DiscoveryError, FetchError, FetchErrorKind, NormalizationError};
pub use lead::{Lead, LeadSet};
pub use metrics::{aggregate, Stats};
pub use msg::Msg;
pub use normalize::{normalize, normalize_payload};
pub use outreach::{draft_outreach, OutreachDraft, OutreachLanguage};
pub use selection::resolve;
pub use state::{
    AppState, DiscoveryState, Lifecycle, LoadState, PilotProgress, PilotStatus, SearchCriteria,
    Timings,
};
pub use update::update;
pub use view_model::{DashboardView, LeadDetailView, LeadRowView};
