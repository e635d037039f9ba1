use std::time::Duration;

use leadgen_core::{
    update, AppState, DiscoveryError, DiscoveryState, Effect, FetchError, FetchErrorKind, Msg,
    SearchCriteria, Timings,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn init_logging() {
    leadgen_logging::initialize_for_tests();
}

fn mounted_with_criteria() -> AppState {
    let (state, _) = update(AppState::new(), Msg::Mounted);
    let (state, _) = update(state, Msg::NicheChanged("zubaři".to_string()));
    let (state, _) = update(state, Msg::LocationChanged("Praha".to_string()));
    state
}

fn submit_failure(state: AppState) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::DiscoveryFailed(DiscoveryError::submit_failed("http status 500")),
    )
}

#[test]
fn submit_sends_current_criteria() {
    init_logging();
    let (state, effects) = update(mounted_with_criteria(), Msg::DiscoverySubmitted);

    assert_eq!(state.discovery(), DiscoveryState::Searching);
    assert!(!state.view().can_submit_discovery);
    assert_eq!(
        effects,
        vec![Effect::SubmitDiscovery {
            criteria: SearchCriteria {
                niche: "zubaři".to_string(),
                location: "Praha".to_string(),
            },
        }]
    );
}

#[test]
fn second_submit_while_searching_is_noop() {
    init_logging();
    let (state, _) = update(mounted_with_criteria(), Msg::DiscoverySubmitted);
    let before = state.view();

    let (state, effects) = update(state, Msg::DiscoverySubmitted);

    assert!(effects.is_empty());
    assert_eq!(state.view(), before);
}

#[test]
fn success_returns_to_idle_and_reloads() {
    init_logging();
    let (state, _) = update(mounted_with_criteria(), Msg::DiscoverySubmitted);
    let (state, effects) = update(state, Msg::DiscoverySucceeded { payload: None });

    assert_eq!(state.discovery(), DiscoveryState::Idle);
    assert_eq!(state.discovery_message(), None);
    assert_eq!(effects, vec![Effect::FetchLeads]);
    assert!(state.is_loading());
}

#[test]
fn success_body_is_applied_optimistically() {
    init_logging();
    let (state, _) = update(mounted_with_criteria(), Msg::DiscoverySubmitted);
    let (state, _) = update(
        state,
        Msg::DiscoverySucceeded {
            payload: Some(json!([{ "company_name": "Fresh", "url": "f.com", "performance_score": 20 }])),
        },
    );
    assert_eq!(state.leads().len(), 1);
    assert_eq!(state.stats().critical_count, 1);

    let (state, _) = update(
        state,
        Msg::LoadSucceeded {
            payload: json!([
                { "company_name": "Fresh", "url": "f.com", "performance_score": 20 },
                { "company_name": "Older", "url": "o.com", "performance_score": 90 }
            ]),
        },
    );
    assert_eq!(state.leads().len(), 2);
}

fn selected_acme_then_discovered_only_new() -> AppState {
    let (state, _) = update(
        mounted_with_criteria(),
        Msg::LoadSucceeded {
            payload: json!([{ "company_name": "Acme", "url": "acme.cz", "performance_score": 38 }]),
        },
    );
    let (state, _) = update(
        state,
        Msg::LeadSelected {
            company_name: "Acme".to_string(),
        },
    );
    let (state, _) = update(state, Msg::DiscoverySubmitted);
    let (state, _) = update(
        state,
        Msg::DiscoverySucceeded {
            payload: Some(json!([{ "company_name": "New", "url": "new.cz" }])),
        },
    );
    state
}

#[test]
fn provisional_set_holds_selection_until_reload() {
    init_logging();
    let state = selected_acme_then_discovered_only_new();
    assert!(state.is_provisional());
    assert_eq!(state.selection(), Some("Acme"));
    assert!(state.view().detail.is_none());

    let (state, _) = update(
        state,
        Msg::LoadSucceeded {
            payload: json!([
                { "company_name": "Acme", "url": "acme.cz", "performance_score": 38 },
                { "company_name": "New", "url": "new.cz" }
            ]),
        },
    );

    assert!(!state.is_provisional());
    assert_eq!(state.selection(), Some("Acme"));
    assert_eq!(
        state.selected_lead().map(|lead| lead.url.as_str()),
        Some("acme.cz")
    );
}

#[test]
fn failed_reload_settles_selection_against_provisional_set() {
    init_logging();
    let state = selected_acme_then_discovered_only_new();

    let (state, _) = update(
        state,
        Msg::LoadFailed(FetchError::new(FetchErrorKind::NetworkFailure, "offline")),
    );

    assert!(!state.is_provisional());
    assert_eq!(state.leads().len(), 1);
    assert_eq!(state.selection(), None);
}

#[test]
fn submit_before_mount_is_ignored() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::DiscoverySubmitted);
    assert!(effects.is_empty());
    assert_eq!(state.discovery(), DiscoveryState::Idle);
}

#[test]
fn non_list_success_body_is_ignored() {
    init_logging();
    let (state, _) = update(mounted_with_criteria(), Msg::LoadSucceeded {
        payload: json!([{ "company_name": "Kept", "url": "k.com" }]),
    });
    let (state, _) = update(state, Msg::DiscoverySubmitted);
    let (state, _) = update(
        state,
        Msg::DiscoverySucceeded {
            payload: Some(json!({ "detail": "ok" })),
        },
    );

    assert_eq!(state.leads().len(), 1);
    assert_eq!(state.fetch_error(), None);
}

#[test]
fn failure_shows_error_then_auto_clears() {
    init_logging();
    let (state, _) = update(mounted_with_criteria(), Msg::DiscoverySubmitted);
    let (state, effects) = submit_failure(state);

    assert_eq!(state.discovery(), DiscoveryState::Error);
    assert!(state
        .discovery_message()
        .is_some_and(|m| m.starts_with("Error searching")));
    let epoch = match effects.as_slice() {
        [Effect::ScheduleDiscoveryReset { epoch, after }] => {
            assert_eq!(*after, Timings::default().discovery_error_display);
            *epoch
        }
        other => panic!("unexpected effects {other:?}"),
    };

    let (state, effects) = update(state, Msg::DiscoveryErrorExpired { epoch });
    assert!(effects.is_empty());
    assert_eq!(state.discovery(), DiscoveryState::Idle);
    assert_eq!(state.discovery_message(), None);
}

#[test]
fn stale_reset_does_not_cancel_newer_search() {
    init_logging();
    let (state, _) = update(mounted_with_criteria(), Msg::DiscoverySubmitted);
    let (state, effects) = submit_failure(state);
    let Some(Effect::ScheduleDiscoveryReset { epoch: stale, .. }) = effects.first().cloned() else {
        panic!("expected reset effect");
    };

    // Operator resubmits while the error is still shown.
    let (state, effects) = update(state, Msg::DiscoverySubmitted);
    assert_eq!(effects.len(), 1);

    let (state, _) = update(state, Msg::DiscoveryErrorExpired { epoch: stale });
    assert_eq!(state.discovery(), DiscoveryState::Searching);
}

#[test]
fn custom_timings_flow_into_effects() {
    init_logging();
    let timings = Timings {
        poll_interval: Duration::from_millis(250),
        discovery_error_display: Duration::from_millis(40),
    };
    let (state, effects) = update(AppState::with_timings(timings), Msg::Mounted);
    assert!(effects.contains(&Effect::StartPolling {
        interval: Duration::from_millis(250)
    }));

    let (state, _) = update(state, Msg::DiscoverySubmitted);
    let (_state, effects) = submit_failure(state);
    assert!(matches!(
        effects.as_slice(),
        [Effect::ScheduleDiscoveryReset { after, .. }] if *after == Duration::from_millis(40)
    ));
}
