//! # acacia-rest - Content platform REST API
//!
//! This crate implements the HTTP layer of the Acacia content platform:
//! a uniform CRUD + list API over every registered resource type (events,
//! opportunities, publications, reports, newsletters, media, subscribers),
//! backed by any [`DocumentStore`](acacia_persistence::core::DocumentStore).
//!
//! ## Endpoints
//!
//! | Operation | HTTP Method | URL Pattern |
//! |-----------|-------------|-------------|
//! | list | GET | `/api/{resource}?page&limit&sort&search&<filters>` |
//! | create | POST | `/api/{resource}` |
//! | read | GET | `/api/{resource}/{idOrSlug}` |
//! | update | PUT | `/api/{resource}/{id}` |
//! | delete | DELETE | `/api/{resource}/{id}` |
//! | upcoming events | GET | `/api/events/upcoming` |
//! | featured events | GET | `/api/events/featured` |
//! | event registration | POST | `/api/events/{id}/register` |
//! | publication download | POST | `/api/publications/{idOrSlug}/download` |
//! | subscribe | POST | `/api/subscribers` |
//! | unsubscribe | POST | `/api/subscribers/unsubscribe` |
//! | dashboard | GET | `/api/dashboard/stats` |
//! | health | GET | `/health` |
//!
//! Every response, success or failure, uses the same envelope:
//!
//! ```json
//! { "success": true, "message": "Event created successfully", "data": { } }
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use acacia_rest::{ServerConfig, create_app_with_config};
//! use acacia_persistence::backends::sqlite::SqliteStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = SqliteStore::open("acacia.db")?;
//!     store.init_schema()?;
//!
//!     let config = ServerConfig::from_env();
//!     let app = create_app_with_config(store, config);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod resources;
pub mod responses;
pub mod routing;
pub mod state;

pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use responses::ApiResponse;
pub use state::AppState;

use acacia_persistence::core::DocumentStore;

/// Creates the Axum application with default configuration.
pub fn create_app<S>(store: S) -> Router
where
    S: DocumentStore + Send + Sync + 'static,
{
    create_app_with_config(store, ServerConfig::default())
}

/// Creates the Axum application with the given configuration.
pub fn create_app_with_config<S>(store: S, config: ServerConfig) -> Router
where
    S: DocumentStore + Send + Sync + 'static,
{
    info!(backend = store.backend_name(), "creating REST API server");

    let state = AppState::new(Arc::new(store), config.clone());
    let router = routing::create_routes(state);

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ))
        .layer(DefaultBodyLimit::max(config.max_body_size));

    let router = if config.enable_cors {
        let cors = build_cors_layer(&config);
        router.layer(cors)
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "acacia_rest={level},acacia_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
