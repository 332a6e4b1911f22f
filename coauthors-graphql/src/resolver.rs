// Field resolution for the co-author object type

use crate::author::{AuthorLookup, Term, UserMetaStore};
use crate::error::{CoAuthorsError, Result};
use crate::field_map::FieldMap;
use crate::hooks::ObjectFields;
use async_graphql::Value;
use async_graphql::dynamic::{Field, FieldFuture, TypeRef};
use coauthors_log::{debug, error, warn};
use std::sync::Arc;

/// Resolves the string fields of a co-author term.
///
/// Each field is looked up in two stages: first as an attribute stored on
/// the author record, then, for platform users only, in the user's profile
/// metadata. Anything unresolved comes back as an empty string.
pub struct AuthorFieldResolver {
    fields: FieldMap,
    lookup: Arc<dyn AuthorLookup>,
    metadata: Arc<dyn UserMetaStore>,
}

impl AuthorFieldResolver {
    pub fn new(
        fields: FieldMap,
        lookup: Arc<dyn AuthorLookup>,
        metadata: Arc<dyn UserMetaStore>,
    ) -> Self {
        Self {
            fields,
            lookup,
            metadata,
        }
    }

    pub fn field_map(&self) -> &FieldMap {
        &self.fields
    }

    /// Resolve `field_name` for the author behind `term`.
    ///
    /// Misses resolve to `""`. Only collaborator failures are returned as
    /// errors.
    ///
    /// # Example
    ///
    /// ```
    /// use coauthors_graphql::*;
    /// use std::sync::Arc;
    ///
    /// let lookup = InMemoryAuthorLookup::new()
    ///     .with_author("jane-doe", AuthorRecord::platform_user(42));
    /// let metadata = InMemoryUserMeta::new().with_meta(42, "first_name", "Jane");
    /// let resolver =
    ///     AuthorFieldResolver::new(FieldMap::default(), Arc::new(lookup), Arc::new(metadata));
    ///
    /// # tokio_test::block_on(async {
    /// let term = Term::new("jane-doe");
    /// assert_eq!(resolver.resolve(&term, "firstName").await.unwrap(), "Jane");
    /// assert_eq!(resolver.resolve(&term, "lastName").await.unwrap(), "");
    /// # });
    /// ```
    pub async fn resolve(&self, term: &Term, field_name: &str) -> Result<String> {
        let Some(backing_key) = self.fields.get(field_name) else {
            error!("{}", CoAuthorsError::UnmappedField(field_name.to_string()));
            return Ok(String::new());
        };

        let author = match self.lookup.get_by_slug(&term.slug).await {
            Ok(Some(author)) => author,
            Ok(None) => {
                debug!("No author found for slug '{}'", term.slug);
                return Ok(String::new());
            }
            Err(e) => {
                warn!("Author lookup for '{}' failed: {}", term.slug, e);
                return Err(e);
            }
        };

        if let Some(value) = author.attribute(backing_key) {
            return Ok(value);
        }

        if !author.is_platform_user() {
            return Ok(String::new());
        }

        let Some(user_id) = author.id else {
            debug!("Platform user '{}' has no ID, skipping metadata", term.slug);
            return Ok(String::new());
        };

        debug!("Reading '{}' from metadata of user {}", backing_key, user_id);
        match self.metadata.get(user_id, backing_key).await {
            Ok(value) => Ok(value.unwrap_or_default()),
            Err(e) => {
                warn!("Metadata lookup for user {} failed: {}", user_id, e);
                Err(e)
            }
        }
    }

    /// Add one `String!` field per mapping to `fields`, replacing any field
    /// of the same name.
    pub fn add_fields(self: &Arc<Self>, mut fields: ObjectFields) -> ObjectFields {
        for (name, backing_key) in self.fields.iter() {
            fields.insert(name.to_string(), self.field(name, backing_key));
        }
        fields
    }

    fn field(self: &Arc<Self>, name: &str, backing_key: &str) -> Field {
        let resolver = Arc::clone(self);
        let field_name = name.to_string();

        Field::new(name, TypeRef::named_nn(TypeRef::STRING), move |ctx| {
            let resolver = Arc::clone(&resolver);
            let field_name = field_name.clone();

            FieldFuture::new(async move {
                let term = ctx.parent_value.try_downcast_ref::<Term>()?;
                let value = resolver.resolve(term, &field_name).await?;
                Ok(Some(Value::from(value)))
            })
        })
        .description(format!("The {} of the author", backing_key))
    }
}
