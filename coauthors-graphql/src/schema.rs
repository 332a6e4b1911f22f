// Schema objects built from the registered hooks

use crate::config::CoAuthorsConfig;
use crate::hooks::{HookRegistry, ObjectFields};
use async_graphql::dynamic::Object;

/// Build the co-author object type from whatever the field filters for
/// `config.graphql_single_name` produce.
pub fn co_author_object(hooks: &HookRegistry, config: &CoAuthorsConfig) -> Object {
    let type_name = &config.graphql_single_name;
    let fields = hooks.apply_object_fields(type_name, ObjectFields::new());

    fields.into_values().fold(
        Object::new(type_name).description("A co-author of a post"),
        |object, field| object.field(field),
    )
}
