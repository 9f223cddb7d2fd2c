//! SQLite storage backend.
//!
//! Stores every collection in a single `documents` table with the content as
//! serialized JSON; filtering and sorting go through `json_extract`. Slug
//! uniqueness is enforced by a partial unique index over
//! `(collection, slug)`, which is what makes the read-then-write slug
//! resolution safe under concurrent writers.

mod schema;
mod storage;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;

use crate::error::{BackendError, StorageResult};

/// Pooled SQLite document store.
pub struct SqliteStore {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteStore {
    /// Opens (or creates) a database file.
    pub fn open(path: &str) -> StorageResult<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder()
            .build(manager)
            .map_err(|e| BackendError::internal("sqlite", format!("failed to open pool: {}", e)))?;
        Ok(Self { pool })
    }

    /// Opens a private in-memory database.
    ///
    /// The pool is capped at one connection: each SQLite `:memory:`
    /// connection is its own database, so a larger pool would hand out
    /// empty databases.
    pub fn in_memory() -> StorageResult<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e| BackendError::internal("sqlite", format!("failed to open pool: {}", e)))?;
        Ok(Self { pool })
    }

    /// Creates the schema if it does not exist yet.
    pub fn init_schema(&self) -> StorageResult<()> {
        let conn = self.get_connection()?;
        schema::initialize_schema(&conn)
    }

    pub(crate) fn get_connection(
        &self,
    ) -> StorageResult<PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| BackendError::internal("sqlite", format!("connection pool: {}", e)).into())
    }
}
