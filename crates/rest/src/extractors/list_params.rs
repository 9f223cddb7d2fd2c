//! List parameters extractor.
//!
//! Extracts the raw query map plus the reserved list parameters (page,
//! limit, sort, search) from a request. Filter parsing stays in the engine:
//! handlers pass [`ListParams::raw`] through
//! [`parse_filters`](acacia_persistence::query::parse_filters) with their
//! resource's allow-list.

use axum::{
    extract::{FromRequestParts, Query},
    http::{StatusCode, request::Parts},
};
use std::collections::HashMap;

/// Default page size when the request does not specify one.
pub const DEFAULT_LIMIT: u32 = 10;

/// Hard ceiling on the page size regardless of what the request asks for.
pub const MAX_LIMIT: u32 = 100;

/// Axum extractor for list query parameters.
///
/// # Example
///
/// ```rust,ignore
/// use acacia_rest::extractors::ListParams;
///
/// async fn list_handler(params: ListParams) {
///     let page = params.page();
///     let limit = params.limit();
///     let sort = params.sort();
/// }
/// ```
#[derive(Debug, Default)]
pub struct ListParams {
    /// Raw query parameters (reserved keys included).
    params: HashMap<String, String>,
}

impl ListParams {
    /// Creates list params from a raw map.
    pub fn from_map(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    /// The 1-based page number. Unparseable or non-positive input falls
    /// back to 1.
    pub fn page(&self) -> u32 {
        self.params
            .get("page")
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(1)
    }

    /// The page size, clamped to [`MAX_LIMIT`]. Unparseable or
    /// non-positive input falls back to [`DEFAULT_LIMIT`].
    pub fn limit(&self) -> u32 {
        self.limit_or(DEFAULT_LIMIT, MAX_LIMIT)
    }

    /// The page size with caller-supplied default and ceiling (the server
    /// configuration's values, when a handler has them).
    pub fn limit_or(&self, default: u32, max: u32) -> u32 {
        self.params
            .get("limit")
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|limit| *limit >= 1)
            .unwrap_or(default)
            .min(max)
    }

    /// The raw sort parameter, if present.
    pub fn sort(&self) -> Option<&str> {
        self.params.get("sort").map(String::as_str)
    }

    /// The raw search term, if present.
    pub fn search(&self) -> Option<&str> {
        self.params.get("search").map(String::as_str)
    }

    /// The full raw parameter map, for filter parsing.
    pub fn raw(&self) -> &HashMap<String, String> {
        &self.params
    }
}

impl<S> FromRequestParts<S> for ListParams
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid query parameters"))?;

        Ok(ListParams::from_map(params))
    }
}
