//! In-memory storage backend.
//!
//! Keeps every collection in a map behind a [`parking_lot::RwLock`]. Used by
//! tests and local development; list evaluation (filter, search, sort,
//! paginate) runs in-process over the document JSON.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::core::DocumentStore;
use crate::error::{DocumentError, StorageResult};
use crate::query::{FilterSpec, ListQuery, SortDirection, SortSpec};
use crate::types::{Page, StoredDocument, paginate};

/// In-memory document store.
#[derive(Default)]
pub struct MemoryStore {
    // collection name -> id -> document; BTreeMap keeps iteration stable.
    collections: RwLock<HashMap<String, BTreeMap<String, StoredDocument>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn slug_collision(
        documents: &BTreeMap<String, StoredDocument>,
        slug: &str,
        exclude_id: Option<&str>,
    ) -> bool {
        documents
            .values()
            .any(|doc| doc.slug() == Some(slug) && Some(doc.id()) != exclude_id)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, collection: &str, content: Value) -> StorageResult<StoredDocument> {
        if !content.is_object() {
            return Err(DocumentError::NotAnObject {
                found: json_type_name(&content),
            }
            .into());
        }

        let id = uuid::Uuid::new_v4().to_string();
        let document = StoredDocument::new(collection, id, content);

        let mut collections = self.collections.write();
        let documents = collections.entry(collection.to_string()).or_default();

        if let Some(slug) = document.slug() {
            if Self::slug_collision(documents, slug, None) {
                return Err(DocumentError::SlugTaken {
                    collection: collection.to_string(),
                    slug: slug.to_string(),
                }
                .into());
            }
        }

        debug!(collection, id = document.id(), "document inserted");
        documents.insert(document.id().to_string(), document.clone());
        Ok(document)
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> StorageResult<Option<StoredDocument>> {
        let collections = self.collections.read();
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.get(id))
            .cloned())
    }

    async fn find_by_slug(
        &self,
        collection: &str,
        slug: &str,
    ) -> StorageResult<Option<StoredDocument>> {
        let collections = self.collections.read();
        Ok(collections.get(collection).and_then(|documents| {
            documents
                .values()
                .find(|doc| doc.slug() == Some(slug))
                .cloned()
        }))
    }

    async fn list(
        &self,
        collection: &str,
        query: &ListQuery,
    ) -> StorageResult<Page<StoredDocument>> {
        let collections = self.collections.read();
        let Some(documents) = collections.get(collection) else {
            return Ok(Page::empty(query.limit));
        };

        let mut matches: Vec<&StoredDocument> = documents
            .values()
            .filter(|doc| query.filter.matches(doc.content()))
            .filter(|doc| {
                query
                    .search
                    .as_ref()
                    .is_none_or(|clause| clause.matches(doc.content()))
            })
            .collect();

        sort_documents(&mut matches, &query.sort);

        let total = matches.len() as u64;
        let offset = query.offset() as usize;
        let limit = query.limit.max(1) as usize;
        let items: Vec<StoredDocument> = matches
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

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

        let mut collections = self.collections.write();
        let documents = collections
            .get_mut(collection)
            .ok_or_else(|| not_found(collection, id))?;

        let current = documents
            .get(id)
            .ok_or_else(|| not_found(collection, id))?
            .clone();
        let updated = current.with_content(content);

        if let Some(slug) = updated.slug() {
            if Self::slug_collision(documents, slug, Some(id)) {
                return Err(DocumentError::SlugTaken {
                    collection: collection.to_string(),
                    slug: slug.to_string(),
                }
                .into());
            }
        }

        debug!(collection, id, "document updated");
        documents.insert(id.to_string(), updated.clone());
        Ok(updated)
    }

    async fn delete(&self, collection: &str, id: &str) -> StorageResult<()> {
        let mut collections = self.collections.write();
        let removed = collections
            .get_mut(collection)
            .and_then(|documents| documents.remove(id));
        match removed {
            Some(_) => {
                debug!(collection, id, "document deleted");
                Ok(())
            }
            None => Err(not_found(collection, id)),
        }
    }

    async fn count(&self, collection: &str, filter: &FilterSpec) -> StorageResult<u64> {
        let collections = self.collections.read();
        Ok(collections
            .get(collection)
            .map(|documents| {
                documents
                    .values()
                    .filter(|doc| filter.matches(doc.content()))
                    .count() as u64
            })
            .unwrap_or(0))
    }

    async fn slug_exists(
        &self,
        collection: &str,
        slug: &str,
        exclude_id: Option<&str>,
    ) -> StorageResult<bool> {
        let collections = self.collections.read();
        Ok(collections
            .get(collection)
            .map(|documents| Self::slug_collision(documents, slug, exclude_id))
            .unwrap_or(false))
    }
}

fn not_found(collection: &str, key: &str) -> crate::error::StorageError {
    DocumentError::NotFound {
        collection: collection.to_string(),
        key: key.to_string(),
    }
    .into()
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

fn sort_documents(documents: &mut [&StoredDocument], sort: &SortSpec) {
    documents.sort_by(|a, b| {
        for (field, direction) in sort.keys() {
            let left = a.content().get(field).unwrap_or(&Value::Null);
            let right = b.content().get(field).unwrap_or(&Value::Null);
            let ordering = compare_values(left, right);
            let ordering = match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        // Stable tie-break so pagination never shuffles equal keys.
        a.id().cmp(b.id())
    });
}

/// Total order over JSON values: null < bool < number < string < array < object.
/// Strings compare lexicographically, which orders RFC 3339 timestamps
/// chronologically.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(value: &Value) -> u8 {
        match value {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}
