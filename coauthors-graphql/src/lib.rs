//! Co-author support for GraphQL schemas.
//!
//! Exposes the author taxonomy as a `coAuthor` object type, resolves its
//! string fields from the author lookup service (falling back to user
//! metadata for platform users), and keeps author connections in the order
//! the owning post assigned.

pub mod author;
pub mod config;
pub mod connection;
pub mod error;
pub mod field_map;
pub mod hooks;
pub mod memory;
pub mod plugin;
pub mod resolver;
pub mod schema;
pub mod taxonomy;

pub use async_graphql;

pub use author::{AuthorKind, AuthorLookup, AuthorRecord, Term, UserMetaStore};
pub use config::CoAuthorsConfig;
pub use connection::{ConnectionOrderAdapter, ConnectionQueryArgs};
pub use error::{CoAuthorsError, Result};
pub use field_map::{DEFAULT_FIELDS, FieldMap, FieldMapBuilder};
pub use hooks::{DEFAULT_PRIORITY, HookRegistry, ObjectFields};
pub use memory::{InMemoryAuthorLookup, InMemoryUserMeta};
pub use plugin::CoAuthorsPlugin;
pub use resolver::AuthorFieldResolver;
pub use schema::co_author_object;
pub use taxonomy::{TaxonomyArgs, TaxonomyRegistrationAdapter};
