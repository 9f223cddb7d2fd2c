//! Error types for the REST API.
//!
//! This module defines the error type used throughout the REST layer, with
//! automatic conversion to the uniform response envelope.
//!
//! # Error Mapping
//!
//! Storage errors from the persistence layer are mapped to HTTP status
//! codes:
//!
//! | Storage Error | HTTP Status |
//! |--------------|-------------|
//! | Document(NotFound) | 404 |
//! | Document(SlugTaken) | 409 |
//! | Document(AlreadyExists) | 409 |
//! | Document(NotAnObject) | 400 |
//! | Query(...) | 400 |
//! | Backend(...) | 500 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use acacia_persistence::error::{DocumentError, StorageError};
use serde_json::Value;
use std::fmt;
use tracing::error;

use crate::responses::ApiResponse;

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// Resource not found (HTTP 404).
    NotFound {
        /// The resource label (e.g. "Event").
        resource: String,
        /// The ID or slug that was looked up.
        key: String,
    },

    /// Bad request - validation error (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
        /// Optional structured details (e.g. the offending fields).
        details: Option<Value>,
    },

    /// Conflict - duplicate slug or duplicate unique field (HTTP 409).
    Conflict {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    InternalError {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// Convenience constructor for a bad request without details.
    pub fn bad_request(message: impl Into<String>) -> Self {
        RestError::BadRequest {
            message: message.into(),
            details: None,
        }
    }

    /// Convenience constructor for a not-found error.
    pub fn not_found(resource: impl Into<String>, key: impl Into<String>) -> Self {
        RestError::NotFound {
            resource: resource.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::NotFound { resource, key } => {
                write!(f, "{} not found: {}", resource, key)
            }
            RestError::BadRequest { message, .. } => {
                write!(f, "Bad request: {}", message)
            }
            RestError::Conflict { message } => {
                write!(f, "Conflict: {}", message)
            }
            RestError::InternalError { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            RestError::NotFound { resource, key } => (
                StatusCode::NOT_FOUND,
                format!("{} not found", resource),
                Some(Value::String(key)),
            ),
            RestError::BadRequest { message, details } => {
                (StatusCode::BAD_REQUEST, message, details)
            }
            RestError::Conflict { message } => (StatusCode::CONFLICT, message, None),
            RestError::InternalError { message } => {
                // Operational detail stays in the log; the client gets a
                // generic message.
                error!(message = %message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        (status, Json(ApiResponse::<Value>::failure(message, details))).into_response()
    }
}

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Document(DocumentError::NotFound { collection, key }) => {
                RestError::NotFound {
                    resource: collection,
                    key,
                }
            }
            StorageError::Document(DocumentError::SlugTaken { slug, .. }) => RestError::Conflict {
                message: format!("Slug '{}' is already in use", slug),
            },
            StorageError::Document(DocumentError::AlreadyExists { collection, id }) => {
                RestError::Conflict {
                    message: format!("{}/{} already exists", collection, id),
                }
            }
            StorageError::Document(DocumentError::NotAnObject { found }) => RestError::BadRequest {
                message: format!("Request body must be a JSON object, got {}", found),
                details: None,
            },
            StorageError::Query(e) => RestError::BadRequest {
                message: e.to_string(),
                details: None,
            },
            StorageError::Backend(e) => RestError::InternalError {
                message: e.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        RestError::BadRequest {
            message: format!("Invalid JSON: {}", err),
            details: None,
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;
