//! Filter parsing.
//!
//! Turns a raw query-parameter map into a structured filter restricted to a
//! per-endpoint allow-list. The parser never coerces values: every predicate
//! carries the raw string, and the facade retypes fields its schema knows
//! about before the spec reaches a backend.

use std::collections::BTreeMap;
use std::collections::HashMap;

use serde_json::Value;

/// Query keys that belong to the list machinery, never to filtering.
pub const RESERVED_PARAMS: &[&str] = &["page", "limit", "sort", "fields", "search"];

/// A single filter predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Field equals value. For array-valued document fields this means
    /// array-contains, matching the original store semantics.
    Eq(Value),

    /// Field equals (or contains) any of the values.
    In(Vec<Value>),
}

/// A structured filter: field name → predicate.
///
/// An empty spec matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    fields: BTreeMap<String, FilterValue>,
}

impl FilterSpec {
    /// Creates an empty spec (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no predicates are present.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of predicates.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Adds or replaces a predicate.
    pub fn insert(&mut self, field: impl Into<String>, value: FilterValue) {
        self.fields.insert(field.into(), value);
    }

    /// Builder-style equality predicate.
    pub fn with_eq(mut self, field: impl Into<String>, value: Value) -> Self {
        self.insert(field, FilterValue::Eq(value));
        self
    }

    /// Looks up the predicate for a field.
    pub fn get(&self, field: &str) -> Option<&FilterValue> {
        self.fields.get(field)
    }

    /// Iterates over (field, predicate) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.fields.iter()
    }

    /// Rewrites a predicate's values in place. Used by facades to retype
    /// string values for fields their schema declares (e.g. `"true"` → bool).
    pub fn map_values<F>(&mut self, field: &str, mut f: F)
    where
        F: FnMut(&Value) -> Value,
    {
        if let Some(predicate) = self.fields.get_mut(field) {
            match predicate {
                FilterValue::Eq(v) => *v = f(v),
                FilterValue::In(vs) => {
                    for v in vs.iter_mut() {
                        *v = f(v);
                    }
                }
            }
        }
    }

    /// Evaluates the spec against a document.
    ///
    /// Equality against an array-valued field means membership, so
    /// `tags=rust` matches `{"tags": ["rust", "web"]}`.
    pub fn matches(&self, document: &Value) -> bool {
        self.fields.iter().all(|(field, predicate)| {
            let actual = document.get(field).unwrap_or(&Value::Null);
            match predicate {
                FilterValue::Eq(expected) => value_matches(actual, expected),
                FilterValue::In(options) => {
                    options.iter().any(|expected| value_matches(actual, expected))
                }
            }
        })
    }
}

fn value_matches(actual: &Value, expected: &Value) -> bool {
    match actual {
        Value::Array(items) => items.iter().any(|item| item == expected),
        other => other == expected,
    }
}

/// Parses raw query parameters into a [`FilterSpec`].
///
/// Reserved keys ([`RESERVED_PARAMS`]) are skipped. When `allowed` is
/// non-empty, keys outside it are dropped; an empty allow-list accepts every
/// non-reserved key (admin listings). A value containing `,` splits into a
/// set-membership predicate; anything else becomes an equality predicate with
/// the raw string.
pub fn parse_filters(raw: &HashMap<String, String>, allowed: &[&str]) -> FilterSpec {
    let mut spec = FilterSpec::new();

    for (key, value) in raw {
        if RESERVED_PARAMS.contains(&key.as_str()) {
            continue;
        }
        if !allowed.is_empty() && !allowed.contains(&key.as_str()) {
            continue;
        }

        if value.contains(',') {
            let members = value
                .split(',')
                .map(|part| Value::String(part.to_string()))
                .collect();
            spec.insert(key.clone(), FilterValue::In(members));
        } else {
            spec.insert(key.clone(), FilterValue::Eq(Value::String(value.clone())));
        }
    }

    spec
}
