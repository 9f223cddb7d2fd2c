//! Event-specific handlers: upcoming, featured, and registration.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use acacia_persistence::core::DocumentStore;
use acacia_persistence::query::{FilterSpec, ListQuery, parse_sort};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::responses::ApiResponse;
use crate::state::AppState;

const COLLECTION: &str = "events";

/// `GET /api/events/upcoming` — the next ten upcoming events.
///
/// The engine has no range predicates, so the date cut-off is applied here
/// after an ascending-by-start-date fetch.
pub async fn upcoming_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: DocumentStore + Send + Sync,
{
    let query = ListQuery {
        filter: FilterSpec::new().with_eq("status", json!("upcoming")),
        search: None,
        sort: parse_sort(Some("startDate")),
        page: 1,
        limit: 50,
    };

    let now = Utc::now();
    let events: Vec<Value> = state
        .store()
        .list(COLLECTION, &query)
        .await?
        .items
        .into_iter()
        .map(|doc| doc.into_content())
        .filter(|event| starts_at(event).map(|start| start >= now).unwrap_or(false))
        .take(10)
        .collect();

    Ok(Json(ApiResponse::success(
        "Upcoming events retrieved successfully",
        Value::Array(events),
    ))
    .into_response())
}

/// `GET /api/events/featured` — up to five featured upcoming events.
pub async fn featured_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: DocumentStore + Send + Sync,
{
    let query = ListQuery {
        filter: FilterSpec::new()
            .with_eq("isFeatured", json!(true))
            .with_eq("status", json!("upcoming")),
        search: None,
        sort: parse_sort(Some("startDate")),
        page: 1,
        limit: 5,
    };

    let events: Vec<Value> = state
        .store()
        .list(COLLECTION, &query)
        .await?
        .items
        .into_iter()
        .map(|doc| doc.into_content())
        .collect();

    Ok(Json(ApiResponse::success(
        "Featured events retrieved successfully",
        Value::Array(events),
    ))
    .into_response())
}

/// `POST /api/events/{id}/register` — register an attendee.
///
/// Guards: the event must be upcoming, its registration deadline (if any)
/// must not have passed, and its capacity (if any) must not be reached.
/// When the event requires registration details, `name` and `email` must be
/// present in the body.
pub async fn register_handler<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    body: Option<Json<Value>>,
) -> RestResult<Response>
where
    S: DocumentStore + Send + Sync,
{
    let event = state
        .store()
        .find_one(COLLECTION, &id)
        .await?
        .ok_or_else(|| RestError::not_found("Event", &id))?;
    let content = event.content();

    if content.get("status").and_then(Value::as_str) != Some("upcoming") {
        return Err(RestError::bad_request(
            "Event is not available for registration",
        ));
    }

    if let Some(deadline) = content
        .get("registrationDeadline")
        .and_then(Value::as_str)
        .and_then(parse_rfc3339)
    {
        if Utc::now() > deadline {
            return Err(RestError::bad_request("Registration deadline has passed"));
        }
    }

    let registered = content
        .get("registeredCount")
        .and_then(Value::as_i64)
        .unwrap_or(0);
    if let Some(capacity) = content.get("capacity").and_then(Value::as_i64) {
        if registered >= capacity {
            return Err(RestError::bad_request("Event is full"));
        }
    }

    if content
        .get("registrationRequired")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        let body = body.as_ref().map(|Json(b)| b);
        let missing: Vec<&str> = ["name", "email"]
            .into_iter()
            .filter(|field| {
                body.and_then(|b| b.get(*field))
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .is_none()
            })
            .collect();
        if !missing.is_empty() {
            return Err(RestError::BadRequest {
                message: format!("Missing required fields: {}", missing.join(", ")),
                details: None,
            });
        }
    }

    let mut updated = content.clone();
    updated["registeredCount"] = json!(registered + 1);
    let saved = state
        .store()
        .update(COLLECTION, event.id(), updated)
        .await?;

    debug!(id = event.id(), count = registered + 1, "event registration");

    Ok(Json(ApiResponse::success(
        "Registration successful",
        json!({
            "registeredCount": saved.content()["registeredCount"],
            "eventId": saved.id(),
            "eventTitle": saved.content()["title"],
        }),
    ))
    .into_response())
}

fn starts_at(event: &Value) -> Option<DateTime<Utc>> {
    event
        .get("startDate")
        .and_then(Value::as_str)
        .and_then(parse_rfc3339)
}

fn parse_rfc3339(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
