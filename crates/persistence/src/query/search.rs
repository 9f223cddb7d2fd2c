//! Free-text search clause.
//!
//! The engine only decides whether a search predicate is present; matching,
//! tokenizing and ranking belong to the backend.

use serde_json::Value;

/// A full-text search predicate carrying the raw term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchClause {
    term: String,
}

impl SearchClause {
    /// The trimmed search term.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Case-insensitive substring evaluation over a document's string
    /// values, one level deep into arrays. Used by the in-memory backend;
    /// the SQLite backend matches against the serialized document instead.
    pub fn matches(&self, document: &Value) -> bool {
        let needle = self.term.to_lowercase();
        let Some(object) = document.as_object() else {
            return false;
        };
        object.values().any(|value| match value {
            Value::String(s) => s.to_lowercase().contains(&needle),
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .any(|s| s.to_lowercase().contains(&needle)),
            _ => false,
        })
    }
}

/// Parses a free-text term into an optional search clause.
///
/// Null, empty and whitespace-only terms produce `None`.
pub fn parse_search(term: Option<&str>) -> Option<SearchClause> {
    let term = term?.trim();
    if term.is_empty() {
        return None;
    }
    Some(SearchClause {
        term: term.to_string(),
    })
}
