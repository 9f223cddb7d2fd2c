//! Update handler.
//!
//! `PUT /api/{resource}/{id}`

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use acacia_persistence::core::DocumentStore;
use acacia_persistence::error::{DocumentError, StorageError};
use acacia_persistence::slug::{SlugOptions, SlugScope, unique_slug};
use serde_json::Value;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::resources::{coerce_body, merge_content, validate_domain};
use crate::responses::ApiResponse;
use crate::state::AppState;

use super::spec_for;

/// Handler for updating a document.
///
/// The body is a partial field map merged shallowly over the existing
/// content (`null` removes a field). The slug is server-owned: a client
/// cannot set it directly, but changing the resource's title field
/// regenerates it, excluding the document itself from the collision probe.
pub async fn update_handler<S>(
    State(state): State<AppState<S>>,
    Path((resource, id)): Path<(String, String)>,
    Json(mut patch): Json<Value>,
) -> RestResult<Response>
where
    S: DocumentStore + Send + Sync,
{
    let spec = spec_for(&resource)?;

    let existing = state
        .store()
        .find_by_id(spec.name, &id)
        .await?
        .ok_or_else(|| RestError::not_found(spec.label, &id))?;

    coerce_body(spec, &mut patch)?;
    if let Some(object) = patch.as_object_mut() {
        object.remove("slug");
    }

    let mut merged = merge_content(existing.content(), &patch);
    validate_domain(spec, &merged)?;

    let mut new_slug = None;
    if let Some(field) = spec.slug_from {
        let old_title = existing.content().get(field).and_then(Value::as_str);
        let patch_title = patch.get(field).and_then(Value::as_str);
        if let Some(title) = patch_title {
            if Some(title) != old_title {
                let scope = SlugScope::for_update(state.store(), spec.name, existing.id());
                let slug = unique_slug(title, &scope, &SlugOptions::default()).await?;
                merged["slug"] = Value::String(slug.clone());
                new_slug = Some(slug);
            }
        }
    }

    let updated = match state.store().update(spec.name, &id, merged.clone()).await {
        Err(StorageError::Document(DocumentError::SlugTaken { .. })) if new_slug.is_some() => {
            let suffixed = format!(
                "{}-{}",
                new_slug.unwrap_or_default(),
                chrono::Utc::now().timestamp_millis()
            );
            debug!(resource = spec.name, slug = %suffixed, "slug race lost, retrying");
            merged["slug"] = Value::String(suffixed);
            state.store().update(spec.name, &id, merged).await?
        }
        other => other?,
    };

    debug!(resource = spec.name, id = %id, "document updated");

    Ok(Json(ApiResponse::success(
        format!("{} updated successfully", spec.label),
        updated.into_content(),
    ))
    .into_response())
}
