//! The uniform response envelope.
//!
//! Every endpoint, success or failure, answers with
//! `{ success, message, data, details? }`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The response body shared by all endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub success: bool,

    /// Human-readable outcome description.
    pub message: String,

    /// The payload; `null` on failures and on data-less successes.
    pub data: Option<T>,

    /// Optional structured error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl<T> ApiResponse<T> {
    /// A successful response with a payload.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            details: None,
        }
    }

    /// A successful response without a payload (e.g. after a delete).
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            details: None,
        }
    }

    /// A failure response.
    pub fn failure(message: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            details,
        }
    }
}
