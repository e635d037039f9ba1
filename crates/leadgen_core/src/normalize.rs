use leadgen_logging::leadgen_warn;
use serde_json::{Map, Value};

use crate::{FetchError, Lead, LeadSet, NormalizationError};

/// Coerce one raw record into a [`Lead`].
///
/// Only the identity fields are mandatory. Optional fields of the wrong type
/// or out of range are dropped individually so a partially-audited lead still
/// reaches the table.
pub fn normalize(raw: &Value) -> Result<Lead, NormalizationError> {
    let empty = Map::new();
    let record = raw.as_object().unwrap_or(&empty);

    let company_name = required_string(record, "company_name", "companyName")?;
    if company_name.trim().is_empty() {
        return Err(NormalizationError::MissingField {
            field: "company_name",
        });
    }
    let url = required_string(record, "url", "url")?;

    Ok(Lead {
        company_name,
        url,
        category: optional_string(record, "category", "category"),
        performance_score: field(record, "performance_score", "performanceScore")
            .and_then(coerce_score),
        lcp_value: field(record, "lcp_value", "lcpValue").and_then(coerce_lcp),
        location: optional_string(record, "location", "location"),
        phone_number: optional_string(record, "phone_number", "phoneNumber"),
        owner_email: optional_string(record, "owner_email", "ownerEmail"),
        uses_ads: field(record, "uses_ads", "usesAds").and_then(Value::as_bool),
    })
}

/// Normalize a whole list payload.
///
/// A payload that is not an array is an [`FetchError`] of kind
/// `InvalidShape`; individual bad records are logged and skipped.
pub fn normalize_payload(payload: &Value) -> Result<LeadSet, FetchError> {
    let Some(records) = payload.as_array() else {
        return Err(FetchError::invalid_shape(format!(
            "expected a JSON array of leads, got {}",
            json_kind(payload)
        )));
    };

    let mut dropped = 0usize;
    let leads = records
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match normalize(raw) {
            Ok(lead) => Some(lead),
            Err(err) => {
                dropped += 1;
                leadgen_warn!("Dropping lead record #{}: {}", index, err);
                None
            }
        })
        .collect::<LeadSet>();

    if dropped > 0 {
        leadgen_warn!(
            "Normalized {} of {} lead records ({} dropped)",
            leads.len(),
            records.len(),
            dropped
        );
    }
    Ok(leads)
}

fn field<'a>(record: &'a Map<String, Value>, key: &str, alias: &str) -> Option<&'a Value> {
    record
        .get(key)
        .or_else(|| record.get(alias))
        .filter(|value| !value.is_null())
}

fn required_string(
    record: &Map<String, Value>,
    key: &'static str,
    alias: &str,
) -> Result<String, NormalizationError> {
    field(record, key, alias)
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or(NormalizationError::MissingField { field: key })
}

fn optional_string(record: &Map<String, Value>, key: &str, alias: &str) -> Option<String> {
    field(record, key, alias)
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}

fn coerce_score(value: &Value) -> Option<u8> {
    let score = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !score.is_finite() || !(0.0..=100.0).contains(&score) {
        return None;
    }
    Some(score.round() as u8)
}

fn coerce_lcp(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn score_rounds_and_rejects_out_of_range() {
        assert_eq!(coerce_score(&json!(59.6)), Some(60));
        assert_eq!(coerce_score(&json!("42")), Some(42));
        assert_eq!(coerce_score(&json!(101)), None);
        assert_eq!(coerce_score(&json!(-1)), None);
        assert_eq!(coerce_score(&json!("fast")), None);
        assert_eq!(coerce_score(&json!(true)), None);
    }

    #[test]
    fn lcp_must_be_non_negative() {
        assert_eq!(coerce_lcp(&json!(4.2)), Some(4.2));
        assert_eq!(coerce_lcp(&json!(-0.5)), None);
        assert_eq!(coerce_lcp(&json!("4.2")), None);
    }
}
