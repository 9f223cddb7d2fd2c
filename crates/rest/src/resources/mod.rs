//! Resource registry.
//!
//! One static [`ResourceSpec`] per collection. The generic handlers look the
//! spec up from the `{resource}` route segment and hand its allow-list and
//! field schema to the query engine; nothing else in the crate knows one
//! resource type from another.

mod schema;

pub use schema::{
    FieldKind, apply_defaults, coerce_body, coerce_filters, merge_content, validate_create,
    validate_domain,
};

/// Describes one resource type: its collection, slug behavior, validation
/// rules, and query allow-list.
#[derive(Debug)]
pub struct ResourceSpec {
    /// Collection name; also the route segment under `/api`.
    pub name: &'static str,

    /// Human-readable singular label for messages ("Event").
    pub label: &'static str,

    /// Field the slug is derived from, for collections that carry one.
    pub slug_from: Option<&'static str>,

    /// Fields that must be present and non-empty on create.
    pub required: &'static [&'static str],

    /// Filter allow-list for the list endpoint. An empty list accepts every
    /// non-reserved query key (admin listings).
    pub filterable: &'static [&'static str],

    /// Declared field types. String inputs for these fields are coerced
    /// once at this boundary; the engine and store only see typed values.
    pub fields: &'static [(&'static str, FieldKind)],

    /// Whether the list endpoint honors the `search` parameter.
    pub searchable: bool,
}

impl ResourceSpec {
    /// Looks up the declared kind of a field.
    pub fn field_kind(&self, field: &str) -> Option<FieldKind> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, kind)| *kind)
    }
}

/// All resource types served by the API.
pub static RESOURCES: &[ResourceSpec] = &[
    ResourceSpec {
        name: "events",
        label: "Event",
        slug_from: Some("title"),
        required: &["title", "description", "startDate", "endDate"],
        filterable: &["status", "type", "isFeatured"],
        fields: &[
            ("startDate", FieldKind::DateTime),
            ("endDate", FieldKind::DateTime),
            ("registrationDeadline", FieldKind::DateTime),
            ("capacity", FieldKind::Integer),
            ("registeredCount", FieldKind::Integer),
            ("isFeatured", FieldKind::Boolean),
            ("registrationRequired", FieldKind::Boolean),
            ("location", FieldKind::Object),
            ("organizer", FieldKind::Object),
            ("coverImage", FieldKind::Object),
            ("tags", FieldKind::StringList),
        ],
        searchable: true,
    },
    ResourceSpec {
        name: "opportunities",
        label: "Opportunity",
        slug_from: Some("title"),
        required: &[
            "title",
            "type",
            "description",
            "location",
            "applicationDeadline",
            "howToApply",
        ],
        filterable: &["type", "category", "status", "isRemote"],
        fields: &[
            ("applicationDeadline", FieldKind::DateTime),
            ("startDate", FieldKind::DateTime),
            ("openings", FieldKind::Integer),
            ("isRemote", FieldKind::Boolean),
            ("qualifications", FieldKind::Object),
            ("salary", FieldKind::Object),
            ("organization", FieldKind::Object),
            ("responsibilities", FieldKind::StringList),
            ("requirements", FieldKind::StringList),
        ],
        searchable: true,
    },
    ResourceSpec {
        name: "publications",
        label: "Publication",
        slug_from: Some("title"),
        required: &["title", "type", "description"],
        filterable: &["type", "language", "categories"],
        fields: &[
            ("pages", FieldKind::Integer),
            ("downloadCount", FieldKind::Integer),
            ("publisher", FieldKind::Object),
            ("coverImage", FieldKind::Object),
            ("file", FieldKind::Object),
            ("authors", FieldKind::Object),
            ("categories", FieldKind::StringList),
            ("tags", FieldKind::StringList),
        ],
        searchable: true,
    },
    ResourceSpec {
        name: "reports",
        label: "Report",
        slug_from: Some("title"),
        required: &["title", "type", "year", "description"],
        filterable: &["type", "year", "quarter"],
        fields: &[
            ("year", FieldKind::Integer),
            ("publishDate", FieldKind::DateTime),
            ("coverImage", FieldKind::Object),
            ("file", FieldKind::Object),
            ("statistics", FieldKind::Object),
            ("highlights", FieldKind::StringList),
        ],
        searchable: true,
    },
    ResourceSpec {
        name: "newsletters",
        label: "Newsletter",
        slug_from: Some("title"),
        required: &["title", "subject", "content"],
        filterable: &["status"],
        fields: &[
            ("issue", FieldKind::Object),
            ("featuredImage", FieldKind::Object),
            ("articles", FieldKind::Object),
            ("sentAt", FieldKind::DateTime),
        ],
        searchable: true,
    },
    ResourceSpec {
        name: "media",
        label: "Media",
        slug_from: None,
        required: &["title", "type", "category", "file"],
        filterable: &["type", "category"],
        fields: &[
            ("file", FieldKind::Object),
            ("thumbnail", FieldKind::Object),
            ("metadata", FieldKind::Object),
            ("tags", FieldKind::StringList),
            ("isPublic", FieldKind::Boolean),
        ],
        searchable: true,
    },
    ResourceSpec {
        name: "subscribers",
        label: "Subscriber",
        slug_from: None,
        required: &["email"],
        // Admin listing: every non-reserved query key is accepted.
        filterable: &[],
        fields: &[
            ("isActive", FieldKind::Boolean),
            ("preferences", FieldKind::Object),
            ("subscribedAt", FieldKind::DateTime),
            ("unsubscribedAt", FieldKind::DateTime),
            ("metadata", FieldKind::Object),
        ],
        searchable: true,
    },
];

/// Finds the spec for a route segment.
pub fn lookup(name: &str) -> Option<&'static ResourceSpec> {
    RESOURCES.iter().find(|spec| spec.name == name)
}
