//! Default ordering for author connections.

use crate::config::CoAuthorsConfig;
use coauthors_log::debug;
use serde_json::{Map, Value};

/// Term query arguments built for one connection request.
pub type ConnectionQueryArgs = Map<String, Value>;

pub const TAXONOMY_ARG: &str = "taxonomy";
pub const ORDERBY_ARG: &str = "orderby";
/// Namespace of the caller's filter arguments on a connection field.
pub const WHERE_ARG: &str = "where";

/// Keeps author connections in the order the owning entity assigned to its
/// authors, unless the caller asked for a different order.
#[derive(Debug, Clone)]
pub struct ConnectionOrderAdapter {
    taxonomy: String,
    orderby: String,
}

impl ConnectionOrderAdapter {
    pub fn new(config: &CoAuthorsConfig) -> Self {
        Self {
            taxonomy: config.taxonomy.clone(),
            orderby: config.default_orderby.clone(),
        }
    }

    /// The `orderby` value injected into author queries.
    pub fn orderby(&self) -> &str {
        &self.orderby
    }

    /// Adjust `query_args` before the term query executes.
    pub fn adjust(
        &self,
        mut query_args: ConnectionQueryArgs,
        caller_args: &Map<String, Value>,
    ) -> ConnectionQueryArgs {
        if !self.targets_author_taxonomy(&query_args) || caller_requested_order(caller_args) {
            return query_args;
        }

        debug!(
            "Ordering '{}' connection by {}",
            self.taxonomy, self.orderby
        );
        query_args.insert(ORDERBY_ARG.to_string(), Value::String(self.orderby.clone()));
        query_args
    }

    fn targets_author_taxonomy(&self, query_args: &ConnectionQueryArgs) -> bool {
        match query_args.get(TAXONOMY_ARG) {
            Some(Value::String(taxonomy)) => *taxonomy == self.taxonomy,
            // A single-element taxonomy list is the same query.
            Some(Value::Array(taxonomies)) => {
                matches!(taxonomies.as_slice(), [Value::String(taxonomy)] if *taxonomy == self.taxonomy)
            }
            _ => false,
        }
    }
}

fn caller_requested_order(caller_args: &Map<String, Value>) -> bool {
    caller_args
        .get(WHERE_ARG)
        .and_then(|filters| filters.get(ORDERBY_ARG))
        .is_some_and(|orderby| !orderby.is_null())
}
