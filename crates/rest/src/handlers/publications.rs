//! Publication-specific handlers.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use acacia_persistence::core::DocumentStore;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::responses::ApiResponse;
use crate::state::AppState;

const COLLECTION: &str = "publications";

/// `POST /api/publications/{idOrSlug}/download` — record a download.
///
/// Increments the publication's download counter and returns the stored
/// file descriptor so the client can fetch the asset. Binary delivery
/// itself is not this server's business.
pub async fn download_handler<S>(
    State(state): State<AppState<S>>,
    Path(key): Path<String>,
) -> RestResult<Response>
where
    S: DocumentStore + Send + Sync,
{
    let publication = state
        .store()
        .find_one(COLLECTION, &key)
        .await?
        .ok_or_else(|| RestError::not_found("Publication", &key))?;

    let count = publication
        .content()
        .get("downloadCount")
        .and_then(Value::as_i64)
        .unwrap_or(0)
        + 1;

    let mut updated = publication.content().clone();
    updated["downloadCount"] = json!(count);
    let saved = state
        .store()
        .update(COLLECTION, publication.id(), updated)
        .await?;

    debug!(id = saved.id(), count, "publication download recorded");

    Ok(Json(ApiResponse::success(
        "Download recorded successfully",
        json!({
            "downloadCount": count,
            "file": saved.content().get("file").cloned().unwrap_or(Value::Null),
        }),
    ))
    .into_response())
}
