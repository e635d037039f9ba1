use leadgen_core::{draft_outreach, Lead, OutreachLanguage};

#[test]
fn eligible_czech_lead_gets_czech_draft() {
    let lead = Lead::new("Acme", "https://acme.cz")
        .with_score(35)
        .with_lcp(4.2)
        .with_location("Brno");

    let draft = draft_outreach(&lead).expect("eligible lead");
    assert_eq!(draft.language, OutreachLanguage::Czech);
    assert!(draft.subject.contains("Acme"));
    assert!(draft.body.contains("https://acme.cz"));
    assert!(draft.body.contains("4.2 s"));
    assert!(draft.body.contains("35/100"));
}

#[test]
fn us_lead_gets_english_draft() {
    let lead = Lead::new("Zen Roofing", "https://zen.example")
        .with_score(52)
        .with_location("usa");

    let draft = draft_outreach(&lead).expect("eligible lead");
    assert_eq!(draft.language, OutreachLanguage::English);
    assert!(draft.body.contains("52/100"));
    // No LCP measured, so no LCP sentence.
    assert!(!draft.body.contains("to appear"));
}

#[test]
fn ineligible_leads_get_no_draft() {
    assert!(draft_outreach(&Lead::new("Fast", "f.com").with_score(60)).is_none());
    assert!(draft_outreach(&Lead::new("Unknown", "u.com")).is_none());
}
