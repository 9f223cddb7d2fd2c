//! Field coercion and validation.
//!
//! The original clients of this API send everything as strings — numbers,
//! booleans, dates, even JSON objects. Instead of guessing per call site,
//! each resource declares its field types once and the coercion runs here,
//! at the facade boundary, before the engine or store sees the value.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::error::{RestError, RestResult};

use super::ResourceSpec;

/// Declared type of a resource field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain string; no coercion.
    String,
    /// Integer; string input is parsed.
    Integer,
    /// Boolean; `"true"`/`"false"` input is parsed.
    Boolean,
    /// RFC 3339 datetime (bare `YYYY-MM-DD` is accepted and normalized).
    DateTime,
    /// Object or array; a JSON-encoded string input is parsed.
    Object,
    /// Array of strings; a comma-separated string input is split.
    StringList,
}

/// Coerces string inputs in a request body to their declared types.
///
/// Unknown fields pass through untouched. A string that does not parse as
/// its declared type is a 400 — silently keeping the string would push the
/// type error into the store.
pub fn coerce_body(spec: &ResourceSpec, body: &mut Value) -> RestResult<()> {
    let Some(object) = body.as_object_mut() else {
        return Err(RestError::bad_request("Request body must be a JSON object"));
    };

    for (field, kind) in spec.fields {
        let Some(value) = object.get(*field) else {
            continue;
        };
        let Some(raw) = value.as_str() else {
            continue; // already typed
        };

        let coerced = coerce_str(raw, *kind).ok_or_else(|| RestError::BadRequest {
            message: format!("Invalid value for field '{}'", field),
            details: Some(Value::String(raw.to_string())),
        })?;
        object.insert((*field).to_string(), coerced);
    }

    Ok(())
}

fn coerce_str(raw: &str, kind: FieldKind) -> Option<Value> {
    let trimmed = raw.trim();
    match kind {
        FieldKind::String => Some(Value::String(raw.to_string())),
        FieldKind::Integer => trimmed.parse::<i64>().ok().map(Value::from),
        FieldKind::Boolean => match trimmed {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        FieldKind::DateTime => parse_datetime(trimmed).map(|dt| Value::String(dt.to_rfc3339())),
        FieldKind::Object => {
            if trimmed.starts_with('{') || trimmed.starts_with('[') {
                serde_json::from_str(trimmed).ok()
            } else {
                // Not JSON: leave the string in place and let the store
                // keep it as-is, matching the lenient original behavior.
                Some(Value::String(raw.to_string()))
            }
        }
        FieldKind::StringList => Some(Value::Array(
            trimmed
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| Value::String(part.to_string()))
                .collect(),
        )),
    }
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // Bare dates are common from form inputs.
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Validates a create body: required fields present and non-empty, plus the
/// per-resource invariants that survived from the original system.
pub fn validate_create(spec: &ResourceSpec, body: &Value) -> RestResult<()> {
    let missing: Vec<&str> = spec
        .required
        .iter()
        .copied()
        .filter(|field| is_missing(body.get(*field)))
        .collect();

    if !missing.is_empty() {
        return Err(RestError::BadRequest {
            message: format!("Missing required fields: {}", missing.join(", ")),
            details: Some(Value::Array(
                missing
                    .into_iter()
                    .map(|f| Value::String(f.to_string()))
                    .collect(),
            )),
        });
    }

    validate_domain(spec, body)
}

/// Per-resource invariants checked on both create and update (after the
/// update merge, so partial bodies are checked against the full document).
pub fn validate_domain(spec: &ResourceSpec, body: &Value) -> RestResult<()> {
    if spec.name == "events" {
        let start = body.get("startDate").and_then(Value::as_str);
        let end = body.get("endDate").and_then(Value::as_str);
        if let (Some(start), Some(end)) = (start, end) {
            let start = parse_datetime(start)
                .ok_or_else(|| RestError::bad_request("Invalid start date format"))?;
            let end = parse_datetime(end)
                .ok_or_else(|| RestError::bad_request("Invalid end date format"))?;
            if start >= end {
                return Err(RestError::bad_request("Start date must be before end date"));
            }
        }
    }
    Ok(())
}

/// Fills in the schema defaults the original models declared, so a minimal
/// create body still produces a fully-shaped document.
pub fn apply_defaults(spec: &ResourceSpec, body: &mut Value) {
    use serde_json::json;

    let defaults: Vec<(&str, Value)> = match spec.name {
        "events" => vec![
            ("status", json!("upcoming")),
            ("type", json!("other")),
            ("isFeatured", json!(false)),
            ("registrationRequired", json!(false)),
            ("registeredCount", json!(0)),
            ("tags", json!([])),
        ],
        "opportunities" => vec![
            ("status", json!("active")),
            ("category", json!("full-time")),
            ("isRemote", json!(false)),
            ("openings", json!(1)),
        ],
        "publications" => vec![("language", json!("English")), ("downloadCount", json!(0))],
        "newsletters" => vec![("status", json!("draft"))],
        "media" => vec![("isPublic", json!(true))],
        _ => Vec::new(),
    };

    let Some(object) = body.as_object_mut() else {
        return;
    };
    for (field, value) in defaults {
        object.entry(field.to_string()).or_insert(value);
    }
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Shallow-merges an update body over the existing content. Top-level
/// fields are replaced wholesale; `null` removes a field. Identity and
/// timestamp fields are never taken from the body.
pub fn merge_content(existing: &Value, patch: &Value) -> Value {
    let mut merged = existing.clone();
    let (Some(target), Some(changes)) = (merged.as_object_mut(), patch.as_object()) else {
        return merged;
    };

    for (key, value) in changes {
        if matches!(key.as_str(), "id" | "createdAt" | "updatedAt") {
            continue;
        }
        if value.is_null() {
            target.remove(key);
        } else {
            target.insert(key.clone(), value.clone());
        }
    }

    merged
}

/// Retypes filter values for fields the schema declares, so `isFeatured=true`
/// compares against a stored boolean rather than the string `"true"`.
pub fn coerce_filters(
    spec: &ResourceSpec,
    mut filter: acacia_persistence::query::FilterSpec,
) -> acacia_persistence::query::FilterSpec {
    for (field, kind) in spec.fields {
        match kind {
            FieldKind::Integer | FieldKind::Boolean => {
                filter.map_values(field, |value| {
                    value
                        .as_str()
                        .and_then(|raw| coerce_str(raw, *kind))
                        .unwrap_or_else(|| value.clone())
                });
            }
            _ => {}
        }
    }
    filter
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::lookup;
    use acacia_persistence::query::parse_filters;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_coerce_integer_and_boolean() {
        let spec = lookup("events").unwrap();
        let mut body = json!({"title": "Gala", "capacity": "150", "isFeatured": "true"});
        coerce_body(spec, &mut body).unwrap();
        assert_eq!(body["capacity"], 150);
        assert_eq!(body["isFeatured"], true);
    }

    #[test]
    fn test_coerce_leaves_typed_values() {
        let spec = lookup("events").unwrap();
        let mut body = json!({"capacity": 80, "isFeatured": false});
        coerce_body(spec, &mut body).unwrap();
        assert_eq!(body["capacity"], 80);
        assert_eq!(body["isFeatured"], false);
    }

    #[test]
    fn test_coerce_bad_integer_rejected() {
        let spec = lookup("events").unwrap();
        let mut body = json!({"capacity": "lots"});
        assert!(coerce_body(spec, &mut body).is_err());
    }

    #[test]
    fn test_coerce_datetime_normalizes_bare_date() {
        let spec = lookup("events").unwrap();
        let mut body = json!({"startDate": "2026-09-01"});
        coerce_body(spec, &mut body).unwrap();
        let raw = body["startDate"].as_str().unwrap();
        assert!(raw.starts_with("2026-09-01T00:00:00"));
    }

    #[test]
    fn test_coerce_json_encoded_object() {
        let spec = lookup("events").unwrap();
        let mut body = json!({"location": r#"{"city": "Nairobi", "isOnline": false}"#});
        coerce_body(spec, &mut body).unwrap();
        assert_eq!(body["location"]["city"], "Nairobi");
    }

    #[test]
    fn test_coerce_plain_string_object_kept() {
        let spec = lookup("events").unwrap();
        let mut body = json!({"location": "Community Hall"});
        coerce_body(spec, &mut body).unwrap();
        assert_eq!(body["location"], "Community Hall");
    }

    #[test]
    fn test_coerce_comma_list() {
        let spec = lookup("events").unwrap();
        let mut body = json!({"tags": "health, water , sanitation"});
        coerce_body(spec, &mut body).unwrap();
        assert_eq!(body["tags"], json!(["health", "water", "sanitation"]));
    }

    #[test]
    fn test_validate_missing_fields_listed() {
        let spec = lookup("events").unwrap();
        let err = validate_create(spec, &json!({"title": "Gala"})).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("description"));
        assert!(text.contains("startDate"));
    }

    #[test]
    fn test_validate_blank_string_counts_as_missing() {
        let spec = lookup("reports").unwrap();
        let err =
            validate_create(spec, &json!({"title": "  ", "type": "annual", "year": 2026, "description": "d"}))
                .unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_validate_event_date_ordering() {
        let spec = lookup("events").unwrap();
        let body = json!({
            "title": "Gala",
            "description": "d",
            "startDate": "2026-09-02T00:00:00Z",
            "endDate": "2026-09-01T00:00:00Z",
        });
        let err = validate_create(spec, &body).unwrap_err();
        assert!(err.to_string().contains("before end date"));
    }

    #[test]
    fn test_defaults_fill_gaps_only() {
        let spec = lookup("events").unwrap();
        let mut body = json!({"title": "Gala", "status": "ongoing"});
        apply_defaults(spec, &mut body);
        assert_eq!(body["status"], "ongoing");
        assert_eq!(body["type"], "other");
        assert_eq!(body["registeredCount"], 0);
        assert_eq!(body["isFeatured"], false);
    }

    #[test]
    fn test_merge_replaces_and_removes() {
        let existing = json!({
            "id": "abc",
            "title": "Old",
            "capacity": 10,
            "createdAt": "2026-01-01T00:00:00Z",
        });
        let merged = merge_content(
            &existing,
            &json!({"title": "New", "capacity": null, "id": "evil"}),
        );
        assert_eq!(merged["title"], "New");
        assert!(merged.get("capacity").is_none());
        assert_eq!(merged["id"], "abc");
        assert_eq!(merged["createdAt"], "2026-01-01T00:00:00Z");
    }

    #[test]
    fn test_coerce_filters_retypes_booleans() {
        let spec = lookup("events").unwrap();
        let raw: HashMap<String, String> = [("isFeatured".to_string(), "true".to_string())].into();
        let filter = coerce_filters(spec, parse_filters(&raw, spec.filterable));
        assert!(filter.matches(&json!({"isFeatured": true})));
        assert!(!filter.matches(&json!({"isFeatured": "true"})));
    }

    #[test]
    fn test_coerce_filters_retypes_integers() {
        let spec = lookup("reports").unwrap();
        let raw: HashMap<String, String> = [("year".to_string(), "2025".to_string())].into();
        let filter = coerce_filters(spec, parse_filters(&raw, spec.filterable));
        assert!(filter.matches(&json!({"year": 2025})));
    }
}
