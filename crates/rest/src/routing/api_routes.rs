//! API route configuration.
//!
//! Defines all routes for the REST API.

use axum::{
    Router,
    routing::{get, post},
};
use acacia_persistence::core::DocumentStore;

use crate::handlers;
use crate::state::AppState;

/// Creates all API routes.
///
/// # Routes
///
/// ## System
/// - `GET /health` - Health check
/// - `GET /api/dashboard/stats` - Aggregated counts + recent activity
///
/// ## Generic (every registered resource)
/// - `GET    /api/{resource}` - Filtered, searchable, paginated list
/// - `POST   /api/{resource}` - Create (slug assigned from title)
/// - `GET    /api/{resource}/{idOrSlug}` - Read
/// - `PUT    /api/{resource}/{id}` - Update
/// - `DELETE /api/{resource}/{id}` - Delete
///
/// ## Resource-specific
/// - `GET  /api/events/upcoming` / `GET /api/events/featured`
/// - `POST /api/events/{id}/register`
/// - `POST /api/publications/{idOrSlug}/download`
/// - `POST /api/subscribers` / `POST /api/subscribers/unsubscribe`
///
/// Fixed paths are registered alongside the `{resource}` captures; the
/// router prefers the static segment, so `/api/subscribers` resolves to the
/// subscriber handlers and everything else falls through to the generic
/// CRUD set.
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: DocumentStore + Send + Sync + 'static,
{
    Router::new()
        // System routes
        .route("/health", get(handlers::health::health_handler))
        .route(
            "/api/dashboard/stats",
            get(handlers::dashboard::stats_handler::<S>),
        )
        // Resource-specific routes
        .route(
            "/api/events/upcoming",
            get(handlers::events::upcoming_handler::<S>),
        )
        .route(
            "/api/events/featured",
            get(handlers::events::featured_handler::<S>),
        )
        .route(
            "/api/events/{id}/register",
            post(handlers::events::register_handler::<S>),
        )
        .route(
            "/api/publications/{key}/download",
            post(handlers::publications::download_handler::<S>),
        )
        .route(
            "/api/subscribers",
            get(handlers::subscribers::list_handler::<S>)
                .post(handlers::subscribers::subscribe_handler::<S>),
        )
        .route(
            "/api/subscribers/unsubscribe",
            post(handlers::subscribers::unsubscribe_handler::<S>),
        )
        // Generic resource routes
        .route(
            "/api/{resource}",
            get(handlers::list_handler::<S>).post(handlers::create_handler::<S>),
        )
        .route(
            "/api/{resource}/{key}",
            get(handlers::get_handler::<S>)
                .put(handlers::update_handler::<S>)
                .delete(handlers::delete_handler::<S>),
        )
        // State
        .with_state(state)
}
