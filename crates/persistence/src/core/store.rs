//! Core document storage trait.
//!
//! This module defines the [`DocumentStore`] trait, which provides CRUD,
//! slug lookup, and list operations over named collections of JSON
//! documents. Resource facades depend only on this trait; backends live
//! under [`crate::backends`].

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StorageResult;
use crate::query::{FilterSpec, ListQuery};
use crate::types::{Page, StoredDocument};

/// Storage for JSON documents grouped into collections.
///
/// # Slug uniqueness
///
/// A backend must reject an insert or update whose content carries a `slug`
/// already bound to a *different* document in the same collection, surfacing
/// [`DocumentError::SlugTaken`](crate::error::DocumentError::SlugTaken).
/// This is the commit-time guarantee behind the read-then-write slug
/// resolution in [`crate::slug::unique_slug`]: two racing writers can both
/// see a candidate as free, but only one write wins.
///
/// # Example
///
/// ```ignore
/// use acacia_persistence::core::DocumentStore;
/// use acacia_persistence::query::ListQuery;
///
/// async fn example<S: DocumentStore>(store: &S) -> acacia_persistence::error::StorageResult<()> {
///     let doc = store
///         .insert("events", serde_json::json!({"title": "Gala", "slug": "gala"}))
///         .await?;
///
///     let found = store.find_one("events", "gala").await?;
///     assert!(found.is_some());
///
///     let page = store.list("events", &ListQuery::all(10)).await?;
///     assert_eq!(page.total, 1);
///
///     store.delete("events", doc.id()).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Inserts a new document, assigning it an ID.
    ///
    /// The content must be a JSON object. `id`, `createdAt` and `updatedAt`
    /// are stamped by the store.
    ///
    /// # Errors
    ///
    /// * `DocumentError::NotAnObject` - content is not a JSON object
    /// * `DocumentError::SlugTaken` - content carries a slug already in use
    async fn insert(&self, collection: &str, content: Value) -> StorageResult<StoredDocument>;

    /// Reads a document by ID.
    async fn find_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> StorageResult<Option<StoredDocument>>;

    /// Reads a document by slug.
    async fn find_by_slug(
        &self,
        collection: &str,
        slug: &str,
    ) -> StorageResult<Option<StoredDocument>>;

    /// Reads a document by ID or, failing that, by slug.
    ///
    /// The lookup order makes IDs authoritative: a slug can never shadow
    /// another document's ID.
    async fn find_one(
        &self,
        collection: &str,
        key: &str,
    ) -> StorageResult<Option<StoredDocument>> {
        if let Some(doc) = self.find_by_id(collection, key).await? {
            return Ok(Some(doc));
        }
        self.find_by_slug(collection, key).await
    }

    /// Lists documents matching a query, with pagination metadata.
    ///
    /// The returned page reflects the query's filter + search predicates,
    /// its sort order, and its page window; `total` counts all matches, not
    /// just the returned slice.
    async fn list(&self, collection: &str, query: &ListQuery)
    -> StorageResult<Page<StoredDocument>>;

    /// Replaces a document's content, keeping its identity and creation
    /// time and stamping a fresh `updatedAt`.
    ///
    /// # Errors
    ///
    /// * `DocumentError::NotFound` - no document with this ID
    /// * `DocumentError::SlugTaken` - new content carries a slug bound to a
    ///   different document
    async fn update(
        &self,
        collection: &str,
        id: &str,
        content: Value,
    ) -> StorageResult<StoredDocument>;

    /// Deletes a document by ID.
    ///
    /// # Errors
    ///
    /// * `DocumentError::NotFound` - no document with this ID
    async fn delete(&self, collection: &str, id: &str) -> StorageResult<()>;

    /// Counts documents matching a filter.
    async fn count(&self, collection: &str, filter: &FilterSpec) -> StorageResult<u64>;

    /// Checks whether a slug is bound to any document in the collection,
    /// optionally excluding one document (the record being renamed).
    async fn slug_exists(
        &self,
        collection: &str,
        slug: &str,
        exclude_id: Option<&str>,
    ) -> StorageResult<bool>;
}
