//! # acacia-persistence - Document store and query engine
//!
//! This crate provides the storage layer of the Acacia content platform:
//! a [`DocumentStore`](core::DocumentStore) abstraction over named
//! collections of JSON documents, plus the generic engine every resource
//! endpoint shares:
//!
//! - **Slug generation** ([`slug`]) - URL-safe identifiers derived from
//!   titles, with collection-unique resolution against an injected
//!   existence probe.
//! - **Query parsing** ([`query`]) - allow-listed filters, free-text
//!   search, and sign-prefixed sort parameters parsed from raw query
//!   strings.
//! - **Pagination** ([`types::paginate`]) - the page/limit/total contract
//!   shared by every list endpoint.
//!
//! ## Backends
//!
//! - `memory` - [`backends::memory::MemoryStore`], used by tests and local
//!   development.
//! - `sqlite` - [`backends::sqlite::SqliteStore`] (default feature), JSON
//!   documents in a single table with `json_extract`-based querying and a
//!   unique index backing slug resolution.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use acacia_persistence::backends::sqlite::SqliteStore;
//! use acacia_persistence::core::DocumentStore;
//! use acacia_persistence::query::ListQuery;
//!
//! let store = SqliteStore::open("acacia.db")?;
//! store.init_schema()?;
//!
//! let doc = store
//!     .insert("events", serde_json::json!({"title": "Gala", "slug": "gala"}))
//!     .await?;
//! let page = store.list("events", &ListQuery::all(10)).await?;
//! ```

pub mod backends;
pub mod core;
pub mod error;
pub mod query;
pub mod slug;
pub mod types;
