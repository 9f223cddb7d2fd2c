//! Error types for the persistence layer.
//!
//! This module defines all error types used throughout the persistence layer,
//! split into document errors (state of an individual record), query errors
//! (malformed list requests), and backend errors (the store itself failed).

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Document state errors
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Query construction errors
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors related to the state of an individual document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The requested document was not found.
    #[error("document not found: {collection}/{key}")]
    NotFound { collection: String, key: String },

    /// A document with the given ID already exists.
    #[error("document already exists: {collection}/{id}")]
    AlreadyExists { collection: String, id: String },

    /// The requested slug is already bound to another document in the
    /// collection. Surfaced by the store at write time; callers are expected
    /// to regenerate with a suffix and retry once before giving up.
    #[error("slug already in use: {collection}/{slug}")]
    SlugTaken { collection: String, slug: String },

    /// The document content is not a JSON object.
    #[error("document content must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },
}

/// Errors related to list/query construction.
#[derive(Error, Debug)]
pub enum QueryError {
    /// A field name contains characters the backend cannot address safely.
    #[error("invalid field name in query: {field}")]
    InvalidField { field: String },

    /// The requested page size exceeds what the backend permits.
    #[error("page size {limit} exceeds maximum {max}")]
    LimitTooLarge { limit: u32, max: u32 },
}

/// Errors originating from a specific storage backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// An internal backend failure (I/O, pool exhaustion, corrupt row).
    #[error("{backend_name} backend error: {message}")]
    Internal {
        backend_name: &'static str,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A document could not be serialized or deserialized.
    #[error("serialization error: {message}")]
    Serialization { message: String },
}

impl BackendError {
    /// Convenience constructor for an internal backend failure without a
    /// source error.
    pub fn internal(backend_name: &'static str, message: impl Into<String>) -> Self {
        BackendError::Internal {
            backend_name,
            message: message.into(),
            source: None,
        }
    }
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
