//! Wires the co-author adapters into the host's extension points.

use crate::author::{AuthorLookup, UserMetaStore};
use crate::config::CoAuthorsConfig;
use crate::connection::ConnectionOrderAdapter;
use crate::error::Result;
use crate::field_map::FieldMap;
use crate::hooks::{DEFAULT_PRIORITY, HookRegistry};
use crate::resolver::AuthorFieldResolver;
use crate::taxonomy::TaxonomyRegistrationAdapter;
use coauthors_log::info;
use std::sync::Arc;

/// Co-author integration with its collaborators injected.
///
/// # Example
///
/// ```
/// use coauthors_graphql::*;
/// use std::sync::Arc;
///
/// let plugin = CoAuthorsPlugin::new(
///     CoAuthorsConfig::default(),
///     Arc::new(InMemoryAuthorLookup::new()),
///     Arc::new(InMemoryUserMeta::new()),
/// )
/// .unwrap();
///
/// let mut hooks = HookRegistry::new();
/// plugin.register(&mut hooks);
/// hooks.run_init();
///
/// let args = hooks.apply_taxonomy_args(TaxonomyArgs::new(), "author");
/// assert_eq!(args["show_in_graphql"], true);
/// ```
pub struct CoAuthorsPlugin {
    config: CoAuthorsConfig,
    resolver: Arc<AuthorFieldResolver>,
    taxonomy: Arc<TaxonomyRegistrationAdapter>,
    ordering: Arc<ConnectionOrderAdapter>,
}

impl CoAuthorsPlugin {
    /// Create the plugin with the default field mapping.
    pub fn new(
        config: CoAuthorsConfig,
        lookup: Arc<dyn AuthorLookup>,
        metadata: Arc<dyn UserMetaStore>,
    ) -> Result<Self> {
        Self::with_fields(config, FieldMap::default(), lookup, metadata)
    }

    pub fn with_fields(
        config: CoAuthorsConfig,
        fields: FieldMap,
        lookup: Arc<dyn AuthorLookup>,
        metadata: Arc<dyn UserMetaStore>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            resolver: Arc::new(AuthorFieldResolver::new(fields, lookup, metadata)),
            taxonomy: Arc::new(TaxonomyRegistrationAdapter::new(&config)),
            ordering: Arc::new(ConnectionOrderAdapter::new(&config)),
            config,
        })
    }

    pub fn config(&self) -> &CoAuthorsConfig {
        &self.config
    }

    pub fn resolver(&self) -> &Arc<AuthorFieldResolver> {
        &self.resolver
    }

    /// Install the taxonomy and connection filters now, and the field filter
    /// once the host initializes its schema.
    pub fn register(&self, hooks: &mut HookRegistry) {
        let taxonomy = Arc::clone(&self.taxonomy);
        hooks.add_taxonomy_args_filter(DEFAULT_PRIORITY, move |args, name| {
            taxonomy.adjust(args, name)
        });

        let ordering = Arc::clone(&self.ordering);
        hooks.add_connection_args_filter(DEFAULT_PRIORITY, move |query_args, _source, caller_args| {
            ordering.adjust(query_args, caller_args)
        });

        let resolver = Arc::clone(&self.resolver);
        let type_name = self.config.graphql_single_name.clone();
        hooks.add_init_action(move |hooks| {
            hooks.add_object_fields_filter(&type_name, DEFAULT_PRIORITY, move |fields| {
                resolver.add_fields(fields)
            });
        });

        info!(
            "Registered co-author hooks for taxonomy '{}' ({} fields on {})",
            self.config.taxonomy,
            self.resolver.field_map().len(),
            self.config.graphql_single_name
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::ConnectionQueryArgs;
    use crate::error::CoAuthorsError;
    use crate::hooks::ObjectFields;
    use crate::memory::{InMemoryAuthorLookup, InMemoryUserMeta};
    use serde_json::{Map, json};

    fn plugin(config: CoAuthorsConfig) -> Result<CoAuthorsPlugin> {
        CoAuthorsPlugin::new(
            config,
            Arc::new(InMemoryAuthorLookup::new()),
            Arc::new(InMemoryUserMeta::new()),
        )
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = plugin(CoAuthorsConfig::new(""));
        assert!(matches!(result, Err(CoAuthorsError::Config(_))));
    }

    #[test]
    fn test_fields_wait_for_init() {
        let plugin = plugin(CoAuthorsConfig::default()).unwrap();
        let mut hooks = HookRegistry::new();
        plugin.register(&mut hooks);

        assert!(hooks.apply_object_fields("coAuthor", ObjectFields::new()).is_empty());

        hooks.run_init();
        let fields = hooks.apply_object_fields("coAuthor", ObjectFields::new());
        assert_eq!(fields.len(), plugin.resolver().field_map().len());
    }

    #[test]
    fn test_fields_follow_configured_type_name() {
        let config = CoAuthorsConfig::default().with_type_names("byline", "bylines");
        let plugin = plugin(config).unwrap();
        let mut hooks = HookRegistry::new();
        plugin.register(&mut hooks);
        hooks.run_init();

        assert!(hooks.apply_object_fields("coAuthor", ObjectFields::new()).is_empty());
        assert_eq!(hooks.apply_object_fields("byline", ObjectFields::new()).len(), 9);
    }

    #[test]
    fn test_connection_filter_is_registered() {
        let plugin = plugin(CoAuthorsConfig::default()).unwrap();
        let mut hooks = HookRegistry::new();
        plugin.register(&mut hooks);

        let mut query_args = ConnectionQueryArgs::new();
        query_args.insert("taxonomy".to_string(), json!("author"));

        let adjusted = hooks.apply_connection_args(query_args, &json!({"ID": 1}), &Map::new());
        assert_eq!(adjusted["orderby"], json!("term_order"));
    }
}
