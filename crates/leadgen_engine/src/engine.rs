use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use leadgen_logging::{leadgen_debug, leadgen_info, leadgen_warn};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::client::{ApiSettings, LeadApi, ReqwestLeadApi};
use crate::{ApiError, DiscoveryRequest, EngineEvent, TimerId};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] ApiError),
    #[error("failed to start engine runtime: {0}")]
    Runtime(std::io::Error),
    #[error("failed to spawn engine thread: {0}")]
    Thread(std::io::Error),
}

enum EngineCommand {
    FetchLeads,
    Discover(DiscoveryRequest),
    StartPolling { interval: Duration },
    StopPolling,
    StartTimer { timer_id: TimerId, after: Duration },
}

/// Handle to the background IO runtime.
///
/// Commands go in over a channel, [`EngineEvent`]s come back over another.
/// Dropping the handle stops the poll task and shuts the runtime down.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, EngineError> {
        let api = ReqwestLeadApi::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    pub fn with_api(api: Arc<dyn LeadApi>) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("leadgen-io")
            .enable_all()
            .build()
            .map_err(EngineError::Runtime)?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::Builder::new()
            .name("leadgen-engine".to_string())
            .spawn(move || run_commands(runtime, api, cmd_rx, event_tx))
            .map_err(EngineError::Thread)?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch_leads(&self) {
        self.send(EngineCommand::FetchLeads);
    }

    pub fn discover(&self, request: DiscoveryRequest) {
        self.send(EngineCommand::Discover(request));
    }

    /// Start polling pilot status. Ignored if a poll task is already running.
    pub fn start_polling(&self, interval: Duration) {
        self.send(EngineCommand::StartPolling { interval });
    }

    pub fn stop_polling(&self) {
        self.send(EngineCommand::StopPolling);
    }

    /// Emit [`EngineEvent::TimerFired`] once after `after`.
    pub fn start_timer(&self, timer_id: TimerId, after: Duration) {
        self.send(EngineCommand::StartTimer { timer_id, after });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            leadgen_warn!("Engine thread is gone; command dropped");
        }
    }
}

fn run_commands(
    runtime: Runtime,
    api: Arc<dyn LeadApi>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let mut poll: Option<PollTask> = None;

    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::StartPolling { interval } => {
                if poll.is_some() {
                    leadgen_warn!("Pilot poll already running; start ignored");
                    continue;
                }
                leadgen_info!("Starting pilot poll every {:?}", interval);
                poll = Some(PollTask::spawn(
                    &runtime,
                    api.clone(),
                    interval,
                    event_tx.clone(),
                ));
            }
            EngineCommand::StopPolling => match poll.take() {
                Some(task) => task.cancel(&runtime),
                None => leadgen_debug!("No pilot poll to stop"),
            },
            EngineCommand::FetchLeads => {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let result = api.fetch_leads().await;
                    let _ = event_tx.send(EngineEvent::LeadsFetched(result));
                });
            }
            EngineCommand::Discover(request) => {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let result = api.discover(&request).await;
                    let _ = event_tx.send(EngineEvent::DiscoveryCompleted(result));
                });
            }
            EngineCommand::StartTimer { timer_id, after } => {
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = event_tx.send(EngineEvent::TimerFired { timer_id });
                });
            }
        }
    }

    if let Some(task) = poll.take() {
        task.cancel(&runtime);
    }
    runtime.shutdown_timeout(Duration::from_secs(1));
    leadgen_debug!("Engine runtime shut down");
}

/// Periodic pilot-status fetch, released through its cancellation token.
struct PollTask {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl PollTask {
    fn spawn(
        runtime: &Runtime,
        api: Arc<dyn LeadApi>,
        interval: Duration,
        event_tx: mpsc::Sender<EngineEvent>,
    ) -> Self {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let handle = runtime.spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {}
                }
                let result = tokio::select! {
                    _ = cancelled.cancelled() => break,
                    result = api.pilot_status() => result,
                };
                if let Err(err) = &result {
                    leadgen_debug!("Pilot status tick failed: {}", err);
                }
                if event_tx.send(EngineEvent::PilotStatusPolled(result)).is_err() {
                    break;
                }
            }
        });

        Self { token, handle }
    }

    /// Consumes the task, so it can only be released once. Returns after the
    /// task has actually stopped.
    fn cancel(self, runtime: &Runtime) {
        self.token.cancel();
        if let Err(err) = runtime.block_on(self.handle) {
            leadgen_warn!("Pilot poll ended abnormally: {}", err);
        }
        leadgen_info!("Pilot poll cancelled");
    }
}
