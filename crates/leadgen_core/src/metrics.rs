use crate::{priority_tier, Lead, Priority};

/// Dashboard-wide counters shown in the stat cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    pub healthy_count: usize,
    pub critical_count: usize,
    pub average_score: u32,
}

/// Recompute all counters from scratch.
///
/// Leads without a score add 0 to the sum but still count towards the
/// denominator. The mean is rounded half up; an empty set averages 0.
pub fn aggregate(leads: &[Lead]) -> Stats {
    let mut stats = Stats {
        total: leads.len(),
        ..Stats::default()
    };
    let mut score_sum: u64 = 0;

    for lead in leads {
        if let Some(score) = lead.performance_score {
            score_sum += u64::from(score);
            match priority_tier(Some(score)) {
                Priority::Healthy => stats.healthy_count += 1,
                Priority::Critical => stats.critical_count += 1,
                Priority::Watch => {}
            }
        }
    }

    let denominator = leads.len().max(1) as u64;
    stats.average_score = ((2 * score_sum + denominator) / (2 * denominator)) as u32;
    stats
}
