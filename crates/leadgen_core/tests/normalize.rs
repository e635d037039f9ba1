use leadgen_core::{normalize, normalize_payload, FetchErrorKind, Lead, NormalizationError};
use pretty_assertions::assert_eq;
use serde_json::json;

fn init_logging() {
    leadgen_logging::initialize_for_tests();
}

#[test]
fn snake_case_record_is_normalized() {
    init_logging();
    let lead = normalize(&json!({
        "company_name": "Acme",
        "url": "a.com",
        "category": "Dentist",
        "performance_score": 35,
        "lcp_value": 4.2,
        "location": "Praha",
        "phone_number": "+420 123",
        "uses_ads": true
    }))
    .expect("valid record");

    let mut expected = Lead::new("Acme", "a.com")
        .with_score(35)
        .with_lcp(4.2)
        .with_category("Dentist")
        .with_location("Praha");
    expected.phone_number = Some("+420 123".to_string());
    expected.uses_ads = Some(true);
    assert_eq!(lead, expected);
}

#[test]
fn camel_case_aliases_are_accepted() {
    init_logging();
    let lead = normalize(&json!({
        "companyName": "Zen",
        "url": "z.com",
        "performanceScore": 75,
        "lcpValue": 1.1
    }))
    .expect("valid record");

    assert_eq!(lead.company_name, "Zen");
    assert_eq!(lead.performance_score, Some(75));
    assert_eq!(lead.lcp_value, Some(1.1));
}

#[test]
fn missing_identity_fields_are_errors() {
    init_logging();
    assert_eq!(
        normalize(&json!({ "url": "a.com" })),
        Err(NormalizationError::MissingField {
            field: "company_name"
        })
    );
    assert_eq!(
        normalize(&json!({ "company_name": "  ", "url": "a.com" })),
        Err(NormalizationError::MissingField {
            field: "company_name"
        })
    );
    assert_eq!(
        normalize(&json!({ "company_name": "Acme", "url": 42 })),
        Err(NormalizationError::MissingField { field: "url" })
    );
    assert_eq!(
        normalize(&json!("Acme")),
        Err(NormalizationError::MissingField {
            field: "company_name"
        })
    );
}

#[test]
fn bad_optional_fields_degrade_to_absent() {
    init_logging();
    let lead = normalize(&json!({
        "company_name": "Acme",
        "url": "a.com",
        "category": 7,
        "performance_score": 250,
        "lcp_value": "slow",
        "uses_ads": "yes"
    }))
    .expect("identity fields are present");

    assert_eq!(lead, Lead::new("Acme", "a.com"));
}

#[test]
fn payload_drops_only_broken_records() {
    init_logging();
    let leads = normalize_payload(&json!([
        { "company_name": "Acme", "url": "a.com", "performance_score": 35 },
        { "url": "nameless.com" },
        { "company_name": "Zen", "url": "z.com" }
    ]))
    .expect("array payload");

    let names: Vec<_> = leads.iter().map(|l| l.company_name.as_str()).collect();
    assert_eq!(names, vec!["Acme", "Zen"]);
}

#[test]
fn non_array_payload_is_invalid_shape() {
    init_logging();
    for payload in [json!({}), json!(null), json!("leads"), json!(3)] {
        let err = normalize_payload(&payload).unwrap_err();
        assert_eq!(err.kind, FetchErrorKind::InvalidShape);
    }
    assert!(normalize_payload(&json!([])).unwrap().is_empty());
}
