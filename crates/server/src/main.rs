//! Acacia content platform server.
//!
//! REST backend for events, opportunities, publications, reports,
//! newsletters, media, and subscribers.

use clap::Parser;
use acacia_rest::{ServerConfig, create_app_with_config, init_logging};
use tracing::info;

#[cfg(feature = "sqlite")]
use acacia_persistence::backends::sqlite::SqliteStore;

#[cfg(not(feature = "sqlite"))]
use acacia_persistence::backends::memory::MemoryStore;

/// Creates and initializes a SQLite store from the server configuration.
#[cfg(feature = "sqlite")]
fn create_sqlite_store(config: &ServerConfig) -> anyhow::Result<SqliteStore> {
    let db_path = config.database_url.as_deref().unwrap_or("acacia.db");
    info!(database = %db_path, "Initializing SQLite store");

    let store = if db_path == ":memory:" {
        SqliteStore::in_memory()?
    } else {
        SqliteStore::open(db_path)?
    };
    store.init_schema()?;

    Ok(store)
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        "Starting Acacia server"
    );

    #[cfg(feature = "sqlite")]
    {
        let store = create_sqlite_store(&config)?;
        let app = create_app_with_config(store, config.clone());
        serve(app, &config).await?;
    }

    #[cfg(not(feature = "sqlite"))]
    {
        info!("No database backend enabled; using in-memory store");
        let store = MemoryStore::new();
        let app = create_app_with_config(store, config.clone());
        serve(app, &config).await?;
    }

    Ok(())
}
