//! GraphQL field name to author attribute mapping.

use crate::error::{CoAuthorsError, Result};
use indexmap::IndexMap;

/// Fields exposed on the co-author type by default, lined up with the names
/// the GraphQL `User` type already uses. Every value is resolved as a string.
pub const DEFAULT_FIELDS: &[(&str, &str)] = &[
    ("email", "user_email"),
    ("firstName", "first_name"),
    ("lastName", "last_name"),
    ("name", "display_name"),
    ("registeredDate", "user_registered"),
    ("slug", "user_nicename"),
    ("type", "type"),
    ("url", "user_url"),
    ("username", "user_login"),
];

/// Immutable, insertion-ordered table of `exposed name -> backing key`.
///
/// Order only decides the order fields are added to the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    entries: IndexMap<String, String>,
}

impl FieldMap {
    /// Start an empty map.
    pub fn builder() -> FieldMapBuilder {
        FieldMapBuilder::default()
    }

    /// Build a map from pairs, rejecting repeated exposed names.
    ///
    /// # Example
    ///
    /// ```
    /// use coauthors_graphql::FieldMap;
    ///
    /// let map = FieldMap::from_pairs([("slug", "user_nicename")]).unwrap();
    /// assert_eq!(map.get("slug"), Some("user_nicename"));
    /// assert!(FieldMap::from_pairs([("slug", "a"), ("slug", "b")]).is_err());
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .fold(Self::builder(), |builder, (exposed, backing)| {
                builder.field(exposed, backing)
            })
            .build()
    }

    /// Backing key for an exposed field name.
    pub fn get(&self, exposed_name: &str) -> Option<&str> {
        self.entries.get(exposed_name).map(String::as_str)
    }

    pub fn contains(&self, exposed_name: &str) -> bool {
        self.entries.contains_key(exposed_name)
    }

    /// `(exposed name, backing key)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            entries: DEFAULT_FIELDS
                .iter()
                .map(|(exposed, backing)| (exposed.to_string(), backing.to_string()))
                .collect(),
        }
    }
}

/// Builder for [`FieldMap`]. The first duplicate is reported by `build`.
#[derive(Debug, Default)]
pub struct FieldMapBuilder {
    entries: IndexMap<String, String>,
    duplicate: Option<String>,
}

impl FieldMapBuilder {
    /// Add every entry of [`DEFAULT_FIELDS`].
    pub fn defaults(self) -> Self {
        DEFAULT_FIELDS
            .iter()
            .fold(self, |builder, (exposed, backing)| builder.field(*exposed, *backing))
    }

    /// Map an exposed GraphQL field name to a backing key.
    pub fn field(mut self, exposed_name: impl Into<String>, backing_key: impl Into<String>) -> Self {
        let exposed_name = exposed_name.into();
        if self.entries.contains_key(&exposed_name) {
            self.duplicate.get_or_insert(exposed_name);
        } else {
            self.entries.insert(exposed_name, backing_key.into());
        }
        self
    }

    pub fn build(self) -> Result<FieldMap> {
        match self.duplicate {
            Some(name) => Err(CoAuthorsError::DuplicateField(name)),
            None => Ok(FieldMap {
                entries: self.entries,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fields() {
        let map = FieldMap::default();
        assert_eq!(map.len(), 9);
        assert_eq!(map.get("email"), Some("user_email"));
        assert_eq!(map.get("firstName"), Some("first_name"));
        assert_eq!(map.get("lastName"), Some("last_name"));
        assert_eq!(map.get("name"), Some("display_name"));
        assert_eq!(map.get("registeredDate"), Some("user_registered"));
        assert_eq!(map.get("slug"), Some("user_nicename"));
        assert_eq!(map.get("type"), Some("type"));
        assert_eq!(map.get("url"), Some("user_url"));
        assert_eq!(map.get("username"), Some("user_login"));
        assert_eq!(map.get("password"), None);
    }

    #[test]
    fn test_default_table_has_unique_names() {
        let built = FieldMap::builder().defaults().build().unwrap();
        assert_eq!(built, FieldMap::default());
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let map = FieldMap::builder()
            .field("url", "user_url")
            .field("email", "user_email")
            .build()
            .unwrap();

        let names: Vec<&str> = map.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["url", "email"]);
    }

    #[test]
    fn test_duplicate_field_fails_to_build() {
        let err = FieldMap::builder()
            .defaults()
            .field("email", "secondary_email")
            .build()
            .unwrap_err();

        assert!(matches!(err, CoAuthorsError::DuplicateField(ref name) if name == "email"));
    }

    #[test]
    fn test_custom_fields_extend_defaults() {
        let map = FieldMap::builder()
            .defaults()
            .field("twitter", "twitter_handle")
            .build()
            .unwrap();

        assert_eq!(map.len(), 10);
        assert!(map.contains("twitter"));
        assert_eq!(map.get("twitter"), Some("twitter_handle"));
    }

    #[test]
    fn test_empty_map() {
        let map = FieldMap::builder().build().unwrap();
        assert!(map.is_empty());
    }
}
