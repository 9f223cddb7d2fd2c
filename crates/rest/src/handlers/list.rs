//! List handler.
//!
//! `GET /api/{resource}?page&limit&sort&search&<filterable fields>`

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use acacia_persistence::core::DocumentStore;
use acacia_persistence::query::{ListQuery, parse_filters, parse_search, parse_sort};
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::ListParams;
use crate::resources::coerce_filters;
use crate::responses::ApiResponse;
use crate::state::AppState;

use super::spec_for;

/// Handler for the list endpoint.
///
/// Filters are restricted to the resource's allow-list, retyped by its
/// schema, and combined with the optional search term and sort order into
/// one store query. The response wraps the page in the standard envelope.
pub async fn list_handler<S>(
    State(state): State<AppState<S>>,
    Path(resource): Path<String>,
    params: ListParams,
) -> RestResult<Response>
where
    S: DocumentStore + Send + Sync,
{
    execute_list(&state, &resource, &params).await
}

/// Shared list execution, also used by the fixed-path listings
/// (e.g. `GET /api/subscribers`).
pub async fn execute_list<S>(
    state: &AppState<S>,
    resource: &str,
    params: &ListParams,
) -> RestResult<Response>
where
    S: DocumentStore + Send + Sync,
{
    let spec = spec_for(resource)?;

    let filter = coerce_filters(spec, parse_filters(params.raw(), spec.filterable));
    let search = if spec.searchable {
        parse_search(params.search())
    } else {
        None
    };

    let query = ListQuery {
        filter,
        search,
        sort: parse_sort(params.sort()),
        page: params.page(),
        limit: params.limit_or(state.default_page_size(), state.max_page_size()),
    };

    debug!(
        resource = spec.name,
        page = query.page,
        limit = query.limit,
        filters = query.filter.len(),
        "listing documents"
    );

    let page = state.store().list(spec.name, &query).await?;
    let page = page.map(|doc| doc.into_content());

    Ok(Json(ApiResponse::success(
        format!("{} list retrieved successfully", spec.label),
        serde_json::to_value(page).map_err(crate::error::RestError::from)?,
    ))
    .into_response())
}
