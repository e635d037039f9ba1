use leadgen_core::{aggregate, classify, Classification, Lead, Priority, Stats};
use pretty_assertions::assert_eq;

fn scored(name: &str, score: Option<u8>) -> Lead {
    let lead = Lead::new(name, format!("{}.example", name.to_lowercase()));
    match score {
        Some(score) => lead.with_score(score),
        None => lead,
    }
}

#[test]
fn empty_set_has_zero_stats() {
    assert_eq!(
        aggregate(&[]),
        Stats {
            total: 0,
            healthy_count: 0,
            critical_count: 0,
            average_score: 0,
        }
    );
}

#[test]
fn single_critical_lead() {
    let leads = vec![Lead::new("Acme", "a.com").with_score(35).with_lcp(4.2)];

    assert_eq!(
        aggregate(&leads),
        Stats {
            total: 1,
            healthy_count: 0,
            critical_count: 1,
            average_score: 35,
        }
    );
    assert_eq!(
        classify(&leads[0]),
        Classification {
            tier: Priority::Critical,
            email_eligible: true,
        }
    );
}

#[test]
fn healthy_lead_gets_no_email() {
    let zen = Lead::new("Zen", "z.com").with_score(75);
    assert_eq!(
        classify(&zen),
        Classification {
            tier: Priority::Healthy,
            email_eligible: false,
        }
    );
}

#[test]
fn absent_score_counts_as_zero_in_average() {
    let leads = vec![scored("A", Some(80)), scored("B", None), scored("C", Some(41))];
    let stats = aggregate(&leads);

    assert_eq!(stats.total, 3);
    assert_eq!(stats.healthy_count, 1);
    assert_eq!(stats.critical_count, 0);
    // (80 + 0 + 41) / 3 = 40.33
    assert_eq!(stats.average_score, 40);
}

#[test]
fn average_rounds_half_up() {
    let leads = vec![scored("A", Some(50)), scored("B", Some(51))];
    assert_eq!(aggregate(&leads).average_score, 51);
}

#[test]
fn tier_boundaries() {
    let cases = [
        (Some(0), Priority::Critical, true),
        (Some(39), Priority::Critical, true),
        (Some(40), Priority::Watch, true),
        (Some(59), Priority::Watch, true),
        (Some(60), Priority::Watch, false),
        (Some(61), Priority::Healthy, false),
        (Some(100), Priority::Healthy, false),
        (None, Priority::Watch, false),
    ];
    for (score, tier, email_eligible) in cases {
        let classification = classify(&scored("X", score));
        assert_eq!(classification.tier, tier, "tier for {score:?}");
        assert_eq!(
            classification.email_eligible, email_eligible,
            "eligibility for {score:?}"
        );
    }
}

#[test]
fn buckets_never_exceed_total() {
    let leads: Vec<_> = (0..=100u8)
        .step_by(7)
        .map(|s| scored(&format!("L{s}"), Some(s)))
        .chain([scored("None", None)])
        .collect();
    let stats = aggregate(&leads);

    assert_eq!(stats.total, leads.len());
    assert!(stats.healthy_count + stats.critical_count <= stats.total);
    let watch = leads
        .iter()
        .filter(|l| classify(l).tier == Priority::Watch)
        .count();
    assert_eq!(stats.healthy_count + stats.critical_count + watch, stats.total);
}
