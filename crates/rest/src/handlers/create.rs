//! Create handler.
//!
//! `POST /api/{resource}`

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use acacia_persistence::core::DocumentStore;
use acacia_persistence::error::{DocumentError, StorageError};
use acacia_persistence::slug::{SlugOptions, SlugScope, unique_slug};
use acacia_persistence::types::StoredDocument;
use serde_json::Value;
use tracing::debug;

use crate::error::RestResult;
use crate::resources::{ResourceSpec, apply_defaults, coerce_body, validate_create};
use crate::responses::ApiResponse;
use crate::state::AppState;

use super::spec_for;

/// Handler for creating a document.
///
/// Coerces and validates the body against the resource schema, resolves a
/// collection-unique slug from the resource's title field, and inserts.
/// A slug race lost at commit time is retried once with a millis-suffixed
/// slug before surfacing as a conflict.
pub async fn create_handler<S>(
    State(state): State<AppState<S>>,
    Path(resource): Path<String>,
    Json(mut body): Json<Value>,
) -> RestResult<Response>
where
    S: DocumentStore + Send + Sync,
{
    let spec = spec_for(&resource)?;

    coerce_body(spec, &mut body)?;
    validate_create(spec, &body)?;
    apply_defaults(spec, &mut body);

    let slug = match spec.slug_from {
        Some(field) => {
            // The slug source is a required field, so it is present here.
            let title = body.get(field).and_then(Value::as_str).unwrap_or_default();
            let scope = SlugScope::for_create(state.store(), spec.name);
            let slug = unique_slug(title, &scope, &SlugOptions::default()).await?;
            body["slug"] = Value::String(slug.clone());
            Some(slug)
        }
        None => None,
    };

    let document = insert_with_slug_retry(state.store(), spec, body, slug).await?;

    debug!(resource = spec.name, id = document.id(), "document created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            format!("{} created successfully", spec.label),
            document.into_content(),
        )),
    )
        .into_response())
}

/// Inserts the document, absorbing one lost slug race.
///
/// Two writers can resolve the same slug before either commits; the store's
/// uniqueness constraint rejects the loser, which retries once with a
/// unix-millis suffix. A second rejection propagates as 409.
pub(crate) async fn insert_with_slug_retry<S>(
    store: &S,
    spec: &ResourceSpec,
    mut body: Value,
    slug: Option<String>,
) -> RestResult<StoredDocument>
where
    S: DocumentStore + Send + Sync,
{
    match store.insert(spec.name, body.clone()).await {
        Err(StorageError::Document(DocumentError::SlugTaken { .. })) if slug.is_some() => {
            let suffixed = format!(
                "{}-{}",
                slug.unwrap_or_default(),
                chrono::Utc::now().timestamp_millis()
            );
            debug!(resource = spec.name, slug = %suffixed, "slug race lost, retrying");
            body["slug"] = Value::String(suffixed);
            Ok(store.insert(spec.name, body).await?)
        }
        other => Ok(other?),
    }
}
