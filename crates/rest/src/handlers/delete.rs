//! Delete handler.
//!
//! `DELETE /api/{resource}/{id}`

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use acacia_persistence::core::DocumentStore;
use acacia_persistence::error::{DocumentError, StorageError};
use serde_json::Value;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::responses::ApiResponse;
use crate::state::AppState;

use super::spec_for;

/// Handler for deleting a document by ID.
pub async fn delete_handler<S>(
    State(state): State<AppState<S>>,
    Path((resource, id)): Path<(String, String)>,
) -> RestResult<Response>
where
    S: DocumentStore + Send + Sync,
{
    let spec = spec_for(&resource)?;

    match state.store().delete(spec.name, &id).await {
        Ok(()) => {
            debug!(resource = spec.name, id = %id, "document deleted");
            Ok(Json(ApiResponse::<Value>::success_empty(format!(
                "{} deleted successfully",
                spec.label
            )))
            .into_response())
        }
        Err(StorageError::Document(DocumentError::NotFound { .. })) => {
            Err(RestError::not_found(spec.label, id))
        }
        Err(other) => Err(other.into()),
    }
}
