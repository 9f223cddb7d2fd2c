//! Dashboard aggregation.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use acacia_persistence::core::DocumentStore;
use acacia_persistence::query::{FilterSpec, ListQuery, parse_sort};
use serde_json::{Value, json};

use crate::error::RestResult;
use crate::responses::ApiResponse;
use crate::state::AppState;

/// `GET /api/dashboard/stats` — per-collection counts plus a merged
/// recent-activity feed.
pub async fn stats_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: DocumentStore + Send + Sync,
{
    let store = state.store();
    let all = FilterSpec::new();

    let counts = json!({
        "events": store.count("events", &all).await?,
        "upcomingEvents": store
            .count("events", &FilterSpec::new().with_eq("status", json!("upcoming")))
            .await?,
        "opportunities": store.count("opportunities", &all).await?,
        "activeOpportunities": store
            .count(
                "opportunities",
                &FilterSpec::new().with_eq("status", json!("active")),
            )
            .await?,
        "publications": store.count("publications", &all).await?,
        "reports": store.count("reports", &all).await?,
        "newsletters": store.count("newsletters", &all).await?,
        "media": store.count("media", &all).await?,
        "subscribers": store
            .count(
                "subscribers",
                &FilterSpec::new().with_eq("isActive", json!(true)),
            )
            .await?,
    });

    let mut activity: Vec<Value> = Vec::new();
    for (collection, model) in [
        ("events", "Event"),
        ("opportunities", "Opportunity"),
        ("publications", "Publication"),
        ("media", "Media"),
    ] {
        let query = ListQuery {
            filter: FilterSpec::new(),
            search: None,
            sort: parse_sort(Some("-createdAt")),
            page: 1,
            limit: 5,
        };
        for doc in store.list(collection, &query).await?.items {
            let content = doc.content();
            activity.push(json!({
                "model": model,
                "title": content.get("title").cloned().unwrap_or(Value::Null),
                "type": content.get("type").cloned().unwrap_or(Value::Null),
                "createdAt": content.get("createdAt").cloned().unwrap_or(Value::Null),
            }));
        }
    }

    // Newest first across all collections; RFC 3339 strings compare
    // chronologically.
    activity.sort_by(|a, b| {
        let left = a["createdAt"].as_str().unwrap_or_default();
        let right = b["createdAt"].as_str().unwrap_or_default();
        right.cmp(left)
    });
    activity.truncate(10);

    Ok(Json(ApiResponse::success(
        "Dashboard stats retrieved successfully",
        json!({
            "counts": counts,
            "recentActivity": activity,
        }),
    ))
    .into_response())
}
