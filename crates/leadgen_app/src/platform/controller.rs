use std::time::Duration;

use leadgen_core::{update, AppState, DashboardView, Msg, Timings};
use leadgen_engine::{ApiSettings, EngineError, EngineHandle};
use leadgen_logging::leadgen_debug;

use super::effects::EffectRunner;

/// Single owner of the dashboard state.
///
/// Every message, whether from the operator or the engine, is folded through
/// [`update`] on the caller's thread, so derived views always see one whole
/// LeadSet.
pub struct SyncController {
    state: AppState,
    effects: EffectRunner,
}

impl SyncController {
    pub fn new(settings: ApiSettings, timings: Timings) -> Result<Self, EngineError> {
        Ok(Self::with_engine(EngineHandle::new(settings)?, timings))
    }

    pub fn with_engine(engine: EngineHandle, timings: Timings) -> Self {
        Self {
            state: AppState::with_timings(timings),
            effects: EffectRunner::new(engine),
        }
    }

    pub fn mount(&mut self) {
        self.dispatch(Msg::Mounted);
    }

    /// Release the poll task. Safe to call more than once.
    pub fn teardown(&mut self) {
        self.dispatch(Msg::TornDown);
    }

    pub fn dispatch(&mut self, msg: Msg) {
        leadgen_debug!("dispatch {}", msg.name());
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.effects.run(effects);
    }

    /// Apply every engine result that is already waiting. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(msg) = self.effects.try_next_msg() {
            self.dispatch(msg);
            applied += 1;
        }
        applied
    }

    /// Block up to `timeout` for the next engine result, then drain the rest.
    pub fn pump_timeout(&mut self, timeout: Duration) -> usize {
        match self.effects.next_msg(timeout) {
            Some(msg) => {
                self.dispatch(msg);
                1 + self.pump()
            }
            None => 0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> DashboardView {
        self.state.view()
    }

    /// The current view if anything changed since the last call.
    pub fn take_dirty_view(&mut self) -> Option<DashboardView> {
        if !self.state.is_dirty() {
            return None;
        }
        let view = self.state.view();
        self.state.consume_dirty();
        Some(view)
    }
}

impl Drop for SyncController {
    fn drop(&mut self) {
        if !self.state.is_torn_down() {
            self.teardown();
        }
    }
}
