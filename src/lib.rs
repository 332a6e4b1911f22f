// Co-authors - GraphQL integration for co-author taxonomies
//
// Re-exports the member crates so embedders depend on a single package.

pub use coauthors_log as log;

#[cfg(feature = "graphql")]
pub use coauthors_graphql::*;

#[cfg(feature = "graphql")]
pub use coauthors_graphql;
