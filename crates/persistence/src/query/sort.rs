//! Sort parsing.

/// Sort direction for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending (the default, no prefix).
    Ascending,
    /// Descending (`-` prefix).
    Descending,
}

/// An ordered sort specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    keys: Vec<(String, SortDirection)>,
}

impl SortSpec {
    /// The default ordering: newest first.
    pub fn created_desc() -> Self {
        Self {
            keys: vec![("createdAt".to_string(), SortDirection::Descending)],
        }
    }

    /// The (field, direction) pairs in order of significance.
    pub fn keys(&self) -> &[(String, SortDirection)] {
        &self.keys
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::created_desc()
    }
}

/// Parses a comma-separated, sign-prefixed sort parameter.
///
/// `-createdAt,name` sorts by creation time descending, then name ascending.
/// Absent or empty input yields [`SortSpec::created_desc`]. A field repeated
/// later in the list keeps its original position but takes the later
/// direction (mapping-overwrite semantics).
pub fn parse_sort(param: Option<&str>) -> SortSpec {
    let Some(param) = param else {
        return SortSpec::created_desc();
    };
    let param = param.trim();
    if param.is_empty() {
        return SortSpec::created_desc();
    }

    let mut keys: Vec<(String, SortDirection)> = Vec::new();
    for token in param.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let (field, direction) = match token.strip_prefix('-') {
            Some(field) => (field, SortDirection::Descending),
            None => (token, SortDirection::Ascending),
        };
        if field.is_empty() {
            continue;
        }
        if let Some(existing) = keys.iter_mut().find(|(name, _)| name == field) {
            existing.1 = direction;
        } else {
            keys.push((field.to_string(), direction));
        }
    }

    if keys.is_empty() {
        return SortSpec::created_desc();
    }
    SortSpec { keys }
}
