//! Stored document types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A document with persistence metadata.
///
/// Wraps the JSON content of one record along with its collection, ID, and
/// timestamps. The metadata fields are mirrored into the content object
/// (`id`, `slug`, `createdAt`, `updatedAt`) so filters, sorts, and API
/// responses all see a single shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    /// The collection this document belongs to (e.g. "events").
    collection: String,

    /// The document's ID (UUID v4, assigned at insert).
    id: String,

    /// The document's slug, for collections that carry one.
    slug: Option<String>,

    /// The document content as a JSON object.
    content: Value,

    /// When the document was first created.
    created_at: DateTime<Utc>,

    /// When the document was last modified.
    updated_at: DateTime<Utc>,
}

impl StoredDocument {
    /// Creates a new stored document, stamping `id`, `createdAt` and
    /// `updatedAt` into the content. The `slug` field is read back from the
    /// content if the caller put one there.
    pub fn new(collection: impl Into<String>, id: impl Into<String>, mut content: Value) -> Self {
        let id = id.into();
        let now = Utc::now();

        if let Some(object) = content.as_object_mut() {
            object.insert("id".to_string(), Value::String(id.clone()));
            object.insert("createdAt".to_string(), Value::String(now.to_rfc3339()));
            object.insert("updatedAt".to_string(), Value::String(now.to_rfc3339()));
        }
        let slug = content
            .get("slug")
            .and_then(Value::as_str)
            .map(String::from);

        Self {
            collection: collection.into(),
            id,
            slug,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rehydrates a document loaded from a backend.
    pub fn from_storage(
        collection: impl Into<String>,
        id: impl Into<String>,
        slug: Option<String>,
        content: Value,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
            slug,
            content,
            created_at,
            updated_at,
        }
    }

    /// Replaces the content, stamping a fresh `updatedAt` and preserving the
    /// identity fields. Returns the new document.
    pub fn with_content(&self, mut content: Value) -> Self {
        let now = Utc::now();
        if let Some(object) = content.as_object_mut() {
            object.insert("id".to_string(), Value::String(self.id.clone()));
            object.insert(
                "createdAt".to_string(),
                Value::String(self.created_at.to_rfc3339()),
            );
            object.insert("updatedAt".to_string(), Value::String(now.to_rfc3339()));
        }
        let slug = content
            .get("slug")
            .and_then(Value::as_str)
            .map(String::from);

        Self {
            collection: self.collection.clone(),
            id: self.id.clone(),
            slug,
            content,
            created_at: self.created_at,
            updated_at: now,
        }
    }

    /// The collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// The document ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The document slug, if the collection carries one.
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    /// The content as JSON.
    pub fn content(&self) -> &Value {
        &self.content
    }

    /// Consumes the document, returning its content.
    pub fn into_content(self) -> Value {
        self.content
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last-modified timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
