use std::time::Duration;

use crate::SearchCriteria;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// GET `/api/leads`; answer with `LoadSucceeded` or `LoadFailed`.
    FetchLeads,
    /// POST `/api/discover`; answer with `DiscoverySucceeded` or `DiscoveryFailed`.
    SubmitDiscovery { criteria: SearchCriteria },
    /// Start the pilot-status poll task; each tick answers with `PollTicked` or `PollFailed`.
    StartPolling { interval: Duration },
    /// Cancel the poll task. Emitted at most once.
    StopPolling,
    /// Answer with `DiscoveryErrorExpired { epoch }` after `after`.
    ScheduleDiscoveryReset { epoch: u64, after: Duration },
}
