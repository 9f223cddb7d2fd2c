//! Get handler.
//!
//! `GET /api/{resource}/{idOrSlug}`

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use acacia_persistence::core::DocumentStore;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::responses::ApiResponse;
use crate::state::AppState;

use super::spec_for;

/// Handler for reading a single document by ID or slug.
///
/// IDs are authoritative: the slug lookup only runs when no document has
/// the given ID.
pub async fn get_handler<S>(
    State(state): State<AppState<S>>,
    Path((resource, key)): Path<(String, String)>,
) -> RestResult<Response>
where
    S: DocumentStore + Send + Sync,
{
    let spec = spec_for(&resource)?;

    debug!(resource = spec.name, key = %key, "reading document");

    match state.store().find_one(spec.name, &key).await? {
        Some(document) => Ok(Json(ApiResponse::success(
            format!("{} retrieved successfully", spec.label),
            document.into_content(),
        ))
        .into_response()),
        None => Err(RestError::not_found(spec.label, key)),
    }
}
