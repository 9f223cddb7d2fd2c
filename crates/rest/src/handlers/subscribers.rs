//! Subscriber lifecycle handlers.
//!
//! Subscribers are keyed by email rather than slug: subscribe deduplicates
//! against the normalized address, unsubscribe deactivates instead of
//! deleting so re-subscription keeps history. Email delivery is out of
//! scope; these endpoints only manage the records.

use std::sync::LazyLock;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use acacia_persistence::core::DocumentStore;
use acacia_persistence::query::{FilterSpec, ListQuery};
use acacia_persistence::types::StoredDocument;
use chrono::Utc;
use regex::Regex;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::ListParams;
use crate::responses::ApiResponse;
use crate::state::AppState;

use super::execute_list;

const COLLECTION: &str = "subscribers";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// `GET /api/subscribers` — admin listing.
///
/// Goes through the generic list path; the subscribers spec has an empty
/// allow-list, so any non-reserved query key filters.
pub async fn list_handler<S>(
    State(state): State<AppState<S>>,
    params: ListParams,
) -> RestResult<Response>
where
    S: DocumentStore + Send + Sync,
{
    execute_list(&state, COLLECTION, &params).await
}

/// `POST /api/subscribers` — subscribe.
///
/// An active duplicate is a conflict; an inactive one is reactivated in
/// place, keeping its original `subscribedAt`.
pub async fn subscribe_handler<S>(
    State(state): State<AppState<S>>,
    Json(body): Json<Value>,
) -> RestResult<Response>
where
    S: DocumentStore + Send + Sync,
{
    let email = body
        .get("email")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| RestError::bad_request("Email is required"))?
        .to_lowercase();

    if !EMAIL_RE.is_match(&email) {
        return Err(RestError::bad_request("Invalid email address"));
    }

    if let Some(existing) = find_by_email(state.store(), &email).await? {
        let active = existing
            .content()
            .get("isActive")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        if active {
            return Err(RestError::Conflict {
                message: "Email is already subscribed".to_string(),
            });
        }

        let mut content = existing.content().clone();
        content["isActive"] = json!(true);
        if let Some(preferences) = body.get("preferences") {
            content["preferences"] = preferences.clone();
        }
        if let Some(object) = content.as_object_mut() {
            object.remove("unsubscribedAt");
        }
        let saved = state
            .store()
            .update(COLLECTION, existing.id(), content)
            .await?;

        debug!(email = %email, "subscription reactivated");
        return Ok(Json(ApiResponse::success(
            "Subscription reactivated successfully",
            saved.into_content(),
        ))
        .into_response());
    }

    let subscriber = json!({
        "email": email,
        "name": body.get("name").cloned().unwrap_or(Value::Null),
        "preferences": body.get("preferences").cloned().unwrap_or(json!({
            "frequency": "monthly",
            "categories": [],
        })),
        "source": body.get("source").cloned().unwrap_or(Value::Null),
        "isActive": true,
        "subscribedAt": Utc::now().to_rfc3339(),
    });

    let saved = state.store().insert(COLLECTION, subscriber).await?;
    debug!(email = %email, "subscriber created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Subscribed successfully",
            saved.into_content(),
        )),
    )
        .into_response())
}

/// `POST /api/subscribers/unsubscribe` — deactivate by email.
pub async fn unsubscribe_handler<S>(
    State(state): State<AppState<S>>,
    Json(body): Json<Value>,
) -> RestResult<Response>
where
    S: DocumentStore + Send + Sync,
{
    let email = body
        .get("email")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| RestError::bad_request("Email is required"))?
        .to_lowercase();

    let existing = find_by_email(state.store(), &email)
        .await?
        .ok_or_else(|| RestError::not_found("Subscriber", &email))?;

    let mut content = existing.content().clone();
    content["isActive"] = json!(false);
    content["unsubscribedAt"] = json!(Utc::now().to_rfc3339());
    state
        .store()
        .update(COLLECTION, existing.id(), content)
        .await?;

    debug!(email = %email, "subscriber deactivated");

    Ok(
        Json(ApiResponse::<Value>::success_empty(
            "Unsubscribed successfully",
        ))
        .into_response(),
    )
}

async fn find_by_email<S>(store: &S, email: &str) -> RestResult<Option<StoredDocument>>
where
    S: DocumentStore + Send + Sync,
{
    let query = ListQuery {
        filter: FilterSpec::new().with_eq("email", json!(email)),
        search: None,
        sort: Default::default(),
        page: 1,
        limit: 1,
    };
    let mut page = store.list(COLLECTION, &query).await?;
    Ok(if page.items.is_empty() {
        None
    } else {
        Some(page.items.remove(0))
    })
}
