//! SQLite schema definitions.

use rusqlite::Connection;

use crate::error::{BackendError, StorageResult};

/// Initialize the database schema.
pub fn initialize_schema(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS documents (
            collection  TEXT NOT NULL,
            id          TEXT NOT NULL,
            slug        TEXT,
            data        TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL,
            PRIMARY KEY (collection, id)
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_documents_slug
            ON documents (collection, slug)
            WHERE slug IS NOT NULL;

        CREATE INDEX IF NOT EXISTS idx_documents_created
            ON documents (collection, created_at);",
    )
    .map_err(|e| {
        BackendError::internal("sqlite", format!("failed to create schema: {}", e)).into()
    })
}
