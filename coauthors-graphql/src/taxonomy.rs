//! Taxonomy registration adjustments.

use crate::config::CoAuthorsConfig;
use coauthors_log::debug;
use serde_json::{Map, Value};

/// Registration options of a taxonomy, keyed by option name.
pub type TaxonomyArgs = Map<String, Value>;

pub const SHOW_IN_GRAPHQL: &str = "show_in_graphql";
pub const GRAPHQL_SINGLE_NAME: &str = "graphql_single_name";
pub const GRAPHQL_PLURAL_NAME: &str = "graphql_plural_name";

/// Flags the author taxonomy as visible in the schema under the configured
/// type names. Every other taxonomy passes through untouched.
#[derive(Debug, Clone)]
pub struct TaxonomyRegistrationAdapter {
    taxonomy: String,
    single_name: String,
    plural_name: String,
}

impl TaxonomyRegistrationAdapter {
    pub fn new(config: &CoAuthorsConfig) -> Self {
        Self {
            taxonomy: config.taxonomy.clone(),
            single_name: config.graphql_single_name.clone(),
            plural_name: config.graphql_plural_name.clone(),
        }
    }

    /// Adjust the options of `taxonomy` before it is registered.
    ///
    /// # Example
    ///
    /// ```
    /// use coauthors_graphql::{CoAuthorsConfig, TaxonomyArgs, TaxonomyRegistrationAdapter};
    ///
    /// let adapter = TaxonomyRegistrationAdapter::new(&CoAuthorsConfig::default());
    /// let args = adapter.adjust(TaxonomyArgs::new(), "author");
    /// assert_eq!(args["graphql_single_name"], "coAuthor");
    /// ```
    pub fn adjust(&self, mut args: TaxonomyArgs, taxonomy: &str) -> TaxonomyArgs {
        if taxonomy != self.taxonomy {
            return args;
        }

        debug!("Exposing taxonomy '{}' as {}", taxonomy, self.single_name);
        args.insert(SHOW_IN_GRAPHQL.to_string(), Value::Bool(true));
        args.insert(
            GRAPHQL_SINGLE_NAME.to_string(),
            Value::String(self.single_name.clone()),
        );
        args.insert(
            GRAPHQL_PLURAL_NAME.to_string(),
            Value::String(self.plural_name.clone()),
        );
        args
    }
}
