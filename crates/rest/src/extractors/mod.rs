//! Request extractors.

mod list_params;

pub use list_params::{DEFAULT_LIMIT, ListParams, MAX_LIMIT};
