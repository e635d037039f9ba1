use std::collections::HashMap;
use std::time::Duration;

use leadgen_core::{DiscoveryError, Effect, FetchError, FetchErrorKind, Msg, PilotStatus};
use leadgen_engine::{ApiError, DiscoveryRequest, EngineEvent, EngineHandle, FailureKind, TimerId};
use leadgen_logging::{leadgen_debug, leadgen_info, leadgen_warn};

/// Executes core effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    next_timer: TimerId,
    discovery_resets: HashMap<TimerId, u64>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            engine,
            next_timer: 1,
            discovery_resets: HashMap::new(),
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchLeads => {
                    leadgen_debug!("FetchLeads");
                    self.engine.fetch_leads();
                }
                Effect::SubmitDiscovery { criteria } => {
                    leadgen_info!(
                        "SubmitDiscovery niche={:?} location={:?}",
                        criteria.niche,
                        criteria.location
                    );
                    self.engine.discover(DiscoveryRequest {
                        niche: criteria.niche,
                        location: criteria.location,
                    });
                }
                Effect::StartPolling { interval } => self.engine.start_polling(interval),
                Effect::StopPolling => self.engine.stop_polling(),
                Effect::ScheduleDiscoveryReset { epoch, after } => {
                    let timer_id = self.next_timer;
                    self.next_timer += 1;
                    self.discovery_resets.insert(timer_id, epoch);
                    self.engine.start_timer(timer_id, after);
                }
            }
        }
    }

    pub fn try_next_msg(&mut self) -> Option<Msg> {
        while let Some(event) = self.engine.try_recv() {
            if let Some(msg) = self.translate(event) {
                return Some(msg);
            }
        }
        None
    }

    /// Wait up to `timeout` for the next engine event that maps to a message.
    pub fn next_msg(&mut self, timeout: Duration) -> Option<Msg> {
        let event = self.engine.recv_timeout(timeout)?;
        self.translate(event).or_else(|| self.try_next_msg())
    }

    fn translate(&mut self, event: EngineEvent) -> Option<Msg> {
        let msg = match event {
            EngineEvent::LeadsFetched(Ok(payload)) => Msg::LoadSucceeded { payload },
            EngineEvent::LeadsFetched(Err(err)) => Msg::LoadFailed(to_fetch_error(&err)),
            EngineEvent::DiscoveryCompleted(Ok(payload)) => Msg::DiscoverySucceeded { payload },
            EngineEvent::DiscoveryCompleted(Err(err)) => {
                Msg::DiscoveryFailed(DiscoveryError::submit_failed(err.to_string()))
            }
            EngineEvent::PilotStatusPolled(Ok(body)) => {
                Msg::PollTicked(PilotStatus::from_payload(&body))
            }
            EngineEvent::PilotStatusPolled(Err(err)) => Msg::PollFailed(to_fetch_error(&err)),
            EngineEvent::TimerFired { timer_id } => match self.discovery_resets.remove(&timer_id) {
                Some(epoch) => Msg::DiscoveryErrorExpired { epoch },
                None => {
                    leadgen_warn!("Timer {} fired with no owner", timer_id);
                    return None;
                }
            },
        };
        Some(msg)
    }
}

pub(crate) fn to_fetch_error(err: &ApiError) -> FetchError {
    let kind = match err.kind {
        FailureKind::HttpStatus(code) => FetchErrorKind::HttpStatus(code),
        FailureKind::InvalidBody => FetchErrorKind::InvalidShape,
        FailureKind::InvalidUrl
        | FailureKind::Timeout
        | FailureKind::TooLarge { .. }
        | FailureKind::Network => FetchErrorKind::NetworkFailure,
    };
    FetchError::new(kind, err.to_string())
}
