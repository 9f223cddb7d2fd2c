//! DocumentStore implementation for SQLite.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Null;
use rusqlite::{OptionalExtension, Row, ToSql, params, params_from_iter};
use serde_json::Value;
use tracing::debug;

use crate::core::DocumentStore;
use crate::error::{BackendError, DocumentError, QueryError, StorageError, StorageResult};
use crate::query::{FilterSpec, FilterValue, ListQuery, SortDirection};
use crate::types::{Page, StoredDocument, paginate};

use super::SqliteStore;

fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::internal("sqlite", message))
}

/// Maps a rusqlite error on a slug-bearing write to the domain error the
/// facade retry policy keys on. Only the slug index can raise a constraint
/// violation here: document IDs are fresh UUIDs.
fn map_write_error(err: rusqlite::Error, collection: &str, slug: Option<&str>) -> StorageError {
    if let rusqlite::Error::SqliteFailure(code, _) = &err {
        if code.code == rusqlite::ErrorCode::ConstraintViolation {
            if let Some(slug) = slug {
                return DocumentError::SlugTaken {
                    collection: collection.to_string(),
                    slug: slug.to_string(),
                }
                .into();
            }
        }
    }
    internal_error(format!("write failed: {}", err))
}

/// Fields addressed inside `json_extract` paths are restricted to plain
/// identifiers so a query parameter can never break out of the path literal.
fn checked_field(field: &str) -> StorageResult<&str> {
    let valid = !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(field)
    } else {
        Err(QueryError::InvalidField {
            field: field.to_string(),
        }
        .into())
    }
}

/// `createdAt`/`updatedAt` sort against their indexed columns; everything
/// else goes through the JSON document.
fn sort_expr(field: &str) -> StorageResult<String> {
    Ok(match field {
        "createdAt" => "created_at".to_string(),
        "updatedAt" => "updated_at".to_string(),
        other => format!("json_extract(data, '$.{}')", checked_field(other)?),
    })
}

fn bind_value(value: &Value) -> Box<dyn ToSql> {
    match value {
        Value::String(s) => Box::new(s.clone()),
        Value::Bool(b) => Box::new(*b as i64),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Box::new(i)
            } else {
                Box::new(n.as_f64().unwrap_or(0.0))
            }
        }
        Value::Null => Box::new(Null),
        other => Box::new(other.to_string()),
    }
}

/// Builds the WHERE fragment (beyond `collection = ?`) and its bound values
/// for a filter + optional search term.
fn build_where(
    filter: &FilterSpec,
    search_term: Option<&str>,
) -> StorageResult<(String, Vec<Box<dyn ToSql>>)> {
    let mut clauses = String::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();

    for (field, predicate) in filter.iter() {
        let field = checked_field(field)?;
        let path = format!("json_extract(data, '$.{}')", field);
        // Scalar equality, or membership when the document field is an
        // array (tags and the like).
        let contains = format!(
            "(json_type(data, '$.{field}') = 'array' AND EXISTS \
             (SELECT 1 FROM json_each(data, '$.{field}') WHERE json_each.value = ?))"
        );

        match predicate {
            FilterValue::Eq(expected) => {
                clauses.push_str(&format!(" AND ({} = ? OR {})", path, contains));
                values.push(bind_value(expected));
                values.push(bind_value(expected));
            }
            FilterValue::In(options) => {
                let mut parts: Vec<String> = Vec::with_capacity(options.len());
                for option in options {
                    parts.push(format!("{} = ? OR {}", path, contains));
                    values.push(bind_value(option));
                    values.push(bind_value(option));
                }
                clauses.push_str(&format!(" AND ({})", parts.join(" OR ")));
            }
        }
    }

    if let Some(term) = search_term {
        clauses.push_str(" AND instr(lower(data), lower(?)) > 0");
        values.push(Box::new(term.to_string()));
    }

    Ok((clauses, values))
}

fn row_to_document(collection: &str, row: &Row<'_>) -> rusqlite::Result<StoredDocument> {
    let id: String = row.get(0)?;
    let slug: Option<String> = row.get(1)?;
    let data: String = row.get(2)?;
    let created_at: String = row.get(3)?;
    let updated_at: String = row.get(4)?;

    let content: Value = serde_json::from_str(&data).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(StoredDocument::from_storage(
        collection,
        id,
        slug,
        content,
        parse_timestamp(&created_at, 3)?,
        parse_timestamp(&updated_at, 4)?,
    ))
}

fn parse_timestamp(raw: &str, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

const SELECT_COLUMNS: &str = "id, slug, data, created_at, updated_at";

#[async_trait]
impl DocumentStore for SqliteStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn insert(&self, collection: &str, content: Value) -> StorageResult<StoredDocument> {
        if !content.is_object() {
            return Err(DocumentError::NotAnObject {
                found: json_type_name(&content),
            }
            .into());
        }

        let conn = self.get_connection()?;
        let id = uuid::Uuid::new_v4().to_string();
        let document = StoredDocument::new(collection, id, content);

        let data = serde_json::to_string(document.content()).map_err(|e| {
            StorageError::Backend(BackendError::Serialization {
                message: e.to_string(),
            })
        })?;

        conn.execute(
            "INSERT INTO documents (collection, id, slug, data, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                collection,
                document.id(),
                document.slug(),
                data,
                document.created_at().to_rfc3339(),
                document.updated_at().to_rfc3339(),
            ],
        )
        .map_err(|e| map_write_error(e, collection, document.slug()))?;

        debug!(collection, id = document.id(), "document inserted");
        Ok(document)
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> StorageResult<Option<StoredDocument>> {
        let conn = self.get_connection()?;
        conn.query_row(
            &format!(
                "SELECT {} FROM documents WHERE collection = ?1 AND id = ?2",
                SELECT_COLUMNS
            ),
            params![collection, id],
            |row| row_to_document(collection, row),
        )
        .optional()
        .map_err(|e| internal_error(format!("read failed: {}", e)))
    }

    async fn find_by_slug(
        &self,
        collection: &str,
        slug: &str,
    ) -> StorageResult<Option<StoredDocument>> {
        let conn = self.get_connection()?;
        conn.query_row(
            &format!(
                "SELECT {} FROM documents WHERE collection = ?1 AND slug = ?2",
                SELECT_COLUMNS
            ),
            params![collection, slug],
            |row| row_to_document(collection, row),
        )
        .optional()
        .map_err(|e| internal_error(format!("read failed: {}", e)))
    }

    async fn list(
        &self,
        collection: &str,
        query: &ListQuery,
    ) -> StorageResult<Page<StoredDocument>> {
        let conn = self.get_connection()?;
        let (clauses, values) =
            build_where(&query.filter, query.search.as_ref().map(|s| s.term()))?;

        // One bound-parameter list serves both queries: the WHERE clause is
        // identical and the collection always binds first.
        let mut bound: Vec<Box<dyn ToSql>> = vec![Box::new(collection.to_string())];
        bound.extend(values);

        let count_sql = format!(
            "SELECT COUNT(*) FROM documents WHERE collection = ?{}",
            clauses
        );
        let total: u64 = conn
            .query_row(
                &count_sql,
                params_from_iter(bound.iter().map(|v| v.as_ref())),
                |row| row.get::<_, i64>(0),
            )
            .map_err(|e| internal_error(format!("count failed: {}", e)))? as u64;

        let mut order_by: Vec<String> = Vec::new();
        for (field, direction) in query.sort.keys() {
            let dir = match direction {
                SortDirection::Ascending => "ASC",
                SortDirection::Descending => "DESC",
            };
            order_by.push(format!("{} {}", sort_expr(field)?, dir));
        }
        order_by.push("id ASC".to_string());

        let limit = query.limit.max(1);
        let select_sql = format!(
            "SELECT {} FROM documents WHERE collection = ?{} ORDER BY {} LIMIT {} OFFSET {}",
            SELECT_COLUMNS,
            clauses,
            order_by.join(", "),
            limit,
            query.offset(),
        );

        let mut stmt = conn
            .prepare(&select_sql)
            .map_err(|e| internal_error(format!("prepare failed: {}", e)))?;
        let rows = stmt
            .query_map(params_from_iter(bound.iter().map(|v| v.as_ref())), |row| {
                row_to_document(collection, row)
            })
            .map_err(|e| internal_error(format!("list failed: {}", e)))?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row.map_err(|e| internal_error(format!("row failed: {}", e)))?);
        }

        Ok(paginate(items, query.page, query.limit, total))
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        content: Value,
    ) -> StorageResult<StoredDocument> {
        if !content.is_object() {
            return Err(DocumentError::NotAnObject {
                found: json_type_name(&content),
            }
            .into());
        }

        let current = self
            .find_by_id(collection, id)
            .await?
            .ok_or_else(|| DocumentError::NotFound {
                collection: collection.to_string(),
                key: id.to_string(),
            })?;
        let updated = current.with_content(content);

        let data = serde_json::to_string(updated.content()).map_err(|e| {
            StorageError::Backend(BackendError::Serialization {
                message: e.to_string(),
            })
        })?;

        let conn = self.get_connection()?;
        conn.execute(
            "UPDATE documents SET slug = ?3, data = ?4, updated_at = ?5
             WHERE collection = ?1 AND id = ?2",
            params![
                collection,
                id,
                updated.slug(),
                data,
                updated.updated_at().to_rfc3339(),
            ],
        )
        .map_err(|e| map_write_error(e, collection, updated.slug()))?;

        debug!(collection, id, "document updated");
        Ok(updated)
    }

    async fn delete(&self, collection: &str, id: &str) -> StorageResult<()> {
        let conn = self.get_connection()?;
        let affected = conn
            .execute(
                "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection, id],
            )
            .map_err(|e| internal_error(format!("delete failed: {}", e)))?;

        if affected == 0 {
            return Err(DocumentError::NotFound {
                collection: collection.to_string(),
                key: id.to_string(),
            }
            .into());
        }
        debug!(collection, id, "document deleted");
        Ok(())
    }

    async fn count(&self, collection: &str, filter: &FilterSpec) -> StorageResult<u64> {
        let conn = self.get_connection()?;
        let (clauses, values) = build_where(filter, None)?;

        let sql = format!(
            "SELECT COUNT(*) FROM documents WHERE collection = ?{}",
            clauses
        );
        let mut bound: Vec<Box<dyn ToSql>> = vec![Box::new(collection.to_string())];
        bound.extend(values);

        conn.query_row(
            &sql,
            params_from_iter(bound.iter().map(|v| v.as_ref())),
            |row| row.get::<_, i64>(0),
        )
        .map(|n| n as u64)
        .map_err(|e| internal_error(format!("count failed: {}", e)))
    }

    async fn slug_exists(
        &self,
        collection: &str,
        slug: &str,
        exclude_id: Option<&str>,
    ) -> StorageResult<bool> {
        let conn = self.get_connection()?;
        let found: Option<i64> = match exclude_id {
            Some(exclude) => conn
                .query_row(
                    "SELECT 1 FROM documents
                     WHERE collection = ?1 AND slug = ?2 AND id <> ?3 LIMIT 1",
                    params![collection, slug, exclude],
                    |row| row.get(0),
                )
                .optional(),
            None => conn
                .query_row(
                    "SELECT 1 FROM documents WHERE collection = ?1 AND slug = ?2 LIMIT 1",
                    params![collection, slug],
                    |row| row.get(0),
                )
                .optional(),
        }
        .map_err(|e| internal_error(format!("slug probe failed: {}", e)))?;

        Ok(found.is_some())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
