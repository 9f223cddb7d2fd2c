//! Request handlers.
//!
//! The CRUD handlers are generic over the resource: they look up the
//! [`ResourceSpec`](crate::resources::ResourceSpec) for the `{resource}`
//! route segment and drive the query/slug engine with it. Resource-specific
//! handlers (event registration, subscriber lifecycle, dashboard) live in
//! their own modules.

mod create;
pub mod dashboard;
mod delete;
pub mod events;
pub mod health;
mod list;
pub mod publications;
mod read;
pub mod subscribers;
mod update;

pub use create::create_handler;
pub use delete::delete_handler;
pub use list::{execute_list, list_handler};
pub use read::get_handler;
pub use update::update_handler;

use crate::error::{RestError, RestResult};
use crate::resources::{ResourceSpec, lookup};

/// Resolves the `{resource}` route segment to its spec.
pub(crate) fn spec_for(resource: &str) -> RestResult<&'static ResourceSpec> {
    lookup(resource).ok_or_else(|| RestError::not_found("Resource", resource))
}
