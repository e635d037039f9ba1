use crate::Lead;

/// Scores strictly above this are healthy.
pub const HEALTHY_ABOVE: u8 = 60;
/// Scores strictly below this are critical.
pub const CRITICAL_BELOW: u8 = 40;
/// Scores strictly below this get an outreach draft.
pub const OUTREACH_BELOW: u8 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    Critical,
    Watch,
    Healthy,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::Critical => "Critical",
            Priority::Watch => "Watch",
            Priority::Healthy => "Healthy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub tier: Priority,
    pub email_eligible: bool,
}

pub fn classify(lead: &Lead) -> Classification {
    Classification {
        tier: priority_tier(lead.performance_score),
        email_eligible: is_email_eligible(lead.performance_score),
    }
}

/// A missing score lands in `Watch`: it is never reported as healthy.
pub fn priority_tier(score: Option<u8>) -> Priority {
    match score {
        Some(score) if score > HEALTHY_ABOVE => Priority::Healthy,
        Some(score) if score < CRITICAL_BELOW => Priority::Critical,
        _ => Priority::Watch,
    }
}

/// Outreach needs a number to pitch against, so a missing score is never eligible.
pub fn is_email_eligible(score: Option<u8>) -> bool {
    matches!(score, Some(score) if score < OUTREACH_BELOW)
}
