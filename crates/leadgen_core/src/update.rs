use leadgen_logging::{leadgen_debug, leadgen_info, leadgen_warn};

use crate::{normalize_payload, AppState, DiscoveryState, Effect, Lifecycle, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if state.is_torn_down() {
        leadgen_debug!("Ignoring {} after teardown", msg.name());
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::Mounted => {
            if state.lifecycle() != Lifecycle::Unmounted {
                leadgen_debug!("Ignoring repeated mount");
                return (state, Vec::new());
            }
            state.mount();
            state.begin_load();
            vec![
                Effect::FetchLeads,
                Effect::StartPolling {
                    interval: state.timings().poll_interval,
                },
            ]
        }
        Msg::NicheChanged(niche) => {
            state.set_niche(niche);
            Vec::new()
        }
        Msg::LocationChanged(location) => {
            state.set_location(location);
            Vec::new()
        }
        Msg::RefreshClicked => {
            if state.lifecycle() != Lifecycle::Mounted {
                leadgen_debug!("Ignoring refresh before mount");
                return (state, Vec::new());
            }
            state.begin_load();
            vec![Effect::FetchLeads]
        }
        Msg::LoadSucceeded { payload } => {
            match normalize_payload(&payload) {
                Ok(leads) => {
                    leadgen_debug!("Loaded {} leads", leads.len());
                    state.apply_load_success(leads);
                }
                Err(err) => {
                    leadgen_warn!("Lead list rejected: {}", err);
                    state.apply_invalid_shape(err);
                }
            }
            Vec::new()
        }
        Msg::LoadFailed(err) => {
            leadgen_warn!("Lead list fetch failed, keeping current leads: {}", err);
            state.apply_load_failure(err);
            Vec::new()
        }
        Msg::DiscoverySubmitted => {
            if state.lifecycle() != Lifecycle::Mounted {
                leadgen_debug!("Ignoring discovery submit before mount");
                return (state, Vec::new());
            }
            if state.discovery() == DiscoveryState::Searching {
                leadgen_debug!("Discovery already in flight; submit ignored");
                return (state, Vec::new());
            }
            let criteria = state.begin_discovery();
            leadgen_info!(
                "Discovery submitted niche={:?} location={:?}",
                criteria.niche,
                criteria.location
            );
            vec![Effect::SubmitDiscovery { criteria }]
        }
        Msg::DiscoverySucceeded { payload } => {
            if state.discovery() != DiscoveryState::Searching {
                leadgen_debug!("Discovery result arrived with no search in flight");
                return (state, Vec::new());
            }
            state.finish_discovery();
            if let Some(leads) = payload
                .as_ref()
                .and_then(|payload| normalize_payload(payload).ok())
                .filter(|leads| !leads.is_empty())
            {
                state.show_provisional_leads(leads);
            }
            state.begin_load();
            vec![Effect::FetchLeads]
        }
        Msg::DiscoveryFailed(err) => {
            if state.discovery() != DiscoveryState::Searching {
                leadgen_debug!("Discovery failure arrived with no search in flight");
                return (state, Vec::new());
            }
            leadgen_warn!("{}", err);
            let epoch = state.fail_discovery(&err);
            vec![Effect::ScheduleDiscoveryReset {
                epoch,
                after: state.timings().discovery_error_display,
            }]
        }
        Msg::DiscoveryErrorExpired { epoch } => {
            if !state.expire_discovery_error(epoch) {
                leadgen_debug!("Stale discovery reset for epoch {}", epoch);
            }
            Vec::new()
        }
        Msg::PollTicked(pilot) => {
            state.set_pilot(pilot);
            Vec::new()
        }
        Msg::PollFailed(err) => {
            leadgen_debug!("Pilot status tick failed: {}", err);
            Vec::new()
        }
        Msg::LeadSelected { company_name } => {
            if !state.select(company_name) {
                leadgen_debug!("Ignoring selection of a lead that is not shown");
            }
            Vec::new()
        }
        Msg::SelectionCleared => {
            state.clear_selection();
            Vec::new()
        }
        Msg::TornDown => {
            let was_mounted = state.lifecycle() == Lifecycle::Mounted;
            state.tear_down();
            leadgen_info!("Dashboard torn down");
            if was_mounted {
                vec![Effect::StopPolling]
            } else {
                Vec::new()
            }
        }
    };

    (state, effects)
}
