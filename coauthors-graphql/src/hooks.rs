//! Extension points of the host schema engine.
//!
//! The host runs registered filters in priority order (lower first, ties in
//! registration order) at three points: taxonomy registration, object field
//! definition, and connection query building. Init actions run once, when the
//! host starts building its schema.

use crate::connection::ConnectionQueryArgs;
use crate::taxonomy::TaxonomyArgs;
use async_graphql::dynamic::Field;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Priority used when a caller has no ordering preference.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Field definitions of one object type, keyed by field name.
pub type ObjectFields = IndexMap<String, Field>;

type TaxonomyArgsFilter = Box<dyn Fn(TaxonomyArgs, &str) -> TaxonomyArgs + Send + Sync>;
type ObjectFieldsFilter = Box<dyn Fn(ObjectFields) -> ObjectFields + Send + Sync>;
type ConnectionArgsFilter = Box<
    dyn Fn(ConnectionQueryArgs, &Value, &Map<String, Value>) -> ConnectionQueryArgs + Send + Sync,
>;
type InitAction = Box<dyn FnOnce(&mut HookRegistry) + Send>;

struct Prioritized<F> {
    priority: i32,
    filter: F,
}

fn insert_sorted<F>(filters: &mut Vec<Prioritized<F>>, priority: i32, filter: F) {
    let index = filters.partition_point(|existing| existing.priority <= priority);
    filters.insert(index, Prioritized { priority, filter });
}

/// Filter chains for every extension point the co-author integration uses.
#[derive(Default)]
pub struct HookRegistry {
    taxonomy_args: Vec<Prioritized<TaxonomyArgsFilter>>,
    object_fields: HashMap<String, Vec<Prioritized<ObjectFieldsFilter>>>,
    connection_args: Vec<Prioritized<ConnectionArgsFilter>>,
    init_actions: Vec<InitAction>,
    initialized: bool,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_taxonomy_args_filter<F>(&mut self, priority: i32, filter: F)
    where
        F: Fn(TaxonomyArgs, &str) -> TaxonomyArgs + Send + Sync + 'static,
    {
        let filter: TaxonomyArgsFilter = Box::new(filter);
        insert_sorted(&mut self.taxonomy_args, priority, filter);
    }

    /// Filter the field list of the object type named `type_name`.
    pub fn add_object_fields_filter<F>(&mut self, type_name: &str, priority: i32, filter: F)
    where
        F: Fn(ObjectFields) -> ObjectFields + Send + Sync + 'static,
    {
        let filter: ObjectFieldsFilter = Box::new(filter);
        let filters = self.object_fields.entry(type_name.to_string()).or_default();
        insert_sorted(filters, priority, filter);
    }

    /// The filter receives `(query args, source entity, caller args)`.
    pub fn add_connection_args_filter<F>(&mut self, priority: i32, filter: F)
    where
        F: Fn(ConnectionQueryArgs, &Value, &Map<String, Value>) -> ConnectionQueryArgs
            + Send
            + Sync
            + 'static,
    {
        let filter: ConnectionArgsFilter = Box::new(filter);
        insert_sorted(&mut self.connection_args, priority, filter);
    }

    /// Run `action` when the schema is initialized, or right away if
    /// initialization already happened.
    pub fn add_init_action<F>(&mut self, action: F)
    where
        F: FnOnce(&mut HookRegistry) + Send + 'static,
    {
        if self.initialized {
            action(self);
        } else {
            self.init_actions.push(Box::new(action));
        }
    }

    /// Fire the init actions. Subsequent calls do nothing.
    pub fn run_init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        for action in std::mem::take(&mut self.init_actions) {
            action(self);
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn apply_taxonomy_args(&self, args: TaxonomyArgs, taxonomy: &str) -> TaxonomyArgs {
        self.taxonomy_args
            .iter()
            .fold(args, |args, entry| (entry.filter)(args, taxonomy))
    }

    pub fn apply_object_fields(&self, type_name: &str, fields: ObjectFields) -> ObjectFields {
        match self.object_fields.get(type_name) {
            Some(filters) => filters
                .iter()
                .fold(fields, |fields, entry| (entry.filter)(fields)),
            None => fields,
        }
    }

    pub fn apply_connection_args(
        &self,
        query_args: ConnectionQueryArgs,
        source: &Value,
        caller_args: &Map<String, Value>,
    ) -> ConnectionQueryArgs {
        self.connection_args
            .iter()
            .fold(query_args, |query_args, entry| {
                (entry.filter)(query_args, source, caller_args)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_taxonomy_filters_run_by_priority() {
        let mut hooks = HookRegistry::new();
        hooks.add_taxonomy_args_filter(20, |mut args, _| {
            args.insert("label".to_string(), json!("late"));
            args
        });
        hooks.add_taxonomy_args_filter(5, |mut args, _| {
            args.insert("label".to_string(), json!("early"));
            args
        });

        let args = hooks.apply_taxonomy_args(TaxonomyArgs::new(), "author");
        assert_eq!(args["label"], json!("late"));
    }

    #[test]
    fn test_equal_priorities_keep_registration_order() {
        let mut hooks = HookRegistry::new();
        for label in ["first", "second"] {
            hooks.add_taxonomy_args_filter(DEFAULT_PRIORITY, move |mut args, _| {
                args.insert("label".to_string(), json!(label));
                args
            });
        }

        let args = hooks.apply_taxonomy_args(TaxonomyArgs::new(), "author");
        assert_eq!(args["label"], json!("second"));
    }

    #[test]
    fn test_object_filters_are_scoped_by_type() {
        let mut hooks = HookRegistry::new();
        hooks.add_object_fields_filter("coAuthor", DEFAULT_PRIORITY, |fields| {
            assert!(fields.is_empty());
            fields
        });

        assert!(hooks.apply_object_fields("post", ObjectFields::new()).is_empty());
        assert!(hooks.apply_object_fields("coAuthor", ObjectFields::new()).is_empty());
    }

    #[test]
    fn test_connection_filters_receive_source() {
        let mut hooks = HookRegistry::new();
        hooks.add_connection_args_filter(DEFAULT_PRIORITY, |mut args, source, caller| {
            args.insert("source".to_string(), source.clone());
            args.insert("caller".to_string(), Value::Object(caller.clone()));
            args
        });

        let caller = Map::new();
        let args = hooks.apply_connection_args(
            ConnectionQueryArgs::new(),
            &json!({"post_id": 7}),
            &caller,
        );
        assert_eq!(args["source"], json!({"post_id": 7}));
        assert_eq!(args["caller"], json!({}));
    }

    #[test]
    fn test_init_actions_run_once() {
        let mut hooks = HookRegistry::new();
        hooks.add_init_action(|hooks| {
            hooks.add_taxonomy_args_filter(DEFAULT_PRIORITY, |mut args, _| {
                let count = args.get("count").and_then(Value::as_u64).unwrap_or(0);
                args.insert("count".to_string(), json!(count + 1));
                args
            });
        });

        assert!(hooks.apply_taxonomy_args(TaxonomyArgs::new(), "author").is_empty());

        hooks.run_init();
        hooks.run_init();
        assert!(hooks.is_initialized());

        let args = hooks.apply_taxonomy_args(TaxonomyArgs::new(), "author");
        assert_eq!(args["count"], json!(1));
    }

    #[test]
    fn test_late_init_action_runs_immediately() {
        let mut hooks = HookRegistry::new();
        hooks.run_init();
        hooks.add_init_action(|hooks| {
            hooks.add_taxonomy_args_filter(DEFAULT_PRIORITY, |mut args, _| {
                args.insert("late".to_string(), json!(true));
                args
            });
        });

        let args = hooks.apply_taxonomy_args(TaxonomyArgs::new(), "author");
        assert_eq!(args["late"], json!(true));
    }
}
