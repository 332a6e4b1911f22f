//! Author records, taxonomy terms, and the services that look them up.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A term in the author taxonomy. Only `slug` is used to find the author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub term_id: u64,
    pub name: String,
    pub slug: String,
    pub taxonomy: String,
}

impl Term {
    /// Create a term in the `author` taxonomy whose name is its slug.
    pub fn new(slug: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            term_id: 0,
            name: slug.clone(),
            slug,
            taxonomy: "author".to_string(),
        }
    }

    pub fn with_id(mut self, term_id: u64) -> Self {
        self.term_id = term_id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_taxonomy(mut self, taxonomy: impl Into<String>) -> Self {
        self.taxonomy = taxonomy.into();
        self
    }
}

/// What kind of entity backs an author record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorKind {
    /// A real user account; profile metadata is available by user ID.
    PlatformUser,
    /// A guest author stored without a user account.
    GuestAuthor,
    Other(String),
}

impl AuthorKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "wpuser" | "platform-user" => AuthorKind::PlatformUser,
            "guest-author" => AuthorKind::GuestAuthor,
            other => AuthorKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AuthorKind::PlatformUser => "wpuser",
            AuthorKind::GuestAuthor => "guest-author",
            AuthorKind::Other(raw) => raw,
        }
    }
}

/// The record a lookup service returns for an author slug.
///
/// Attributes are whatever the service denormalized onto the record; a
/// platform user usually carries only a few and keeps the rest in metadata.
/// `kind` holds the discriminator exactly as the lookup service reported it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl AuthorRecord {
    pub fn new(kind: AuthorKind) -> Self {
        Self::with_raw_kind(kind.as_str())
    }

    /// Create a record with the discriminator kept verbatim.
    pub fn with_raw_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: None,
            attributes: Map::new(),
        }
    }

    pub fn platform_user(id: u64) -> Self {
        Self::new(AuthorKind::PlatformUser).with_id(id)
    }

    pub fn guest_author() -> Self {
        Self::new(AuthorKind::GuestAuthor)
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn author_kind(&self) -> AuthorKind {
        AuthorKind::parse(&self.kind)
    }

    pub fn is_platform_user(&self) -> bool {
        self.author_kind() == AuthorKind::PlatformUser
    }

    /// Direct attribute at `key`, coerced to a string.
    ///
    /// `null` counts as absent. The `type` key falls back to the raw kind.
    pub fn attribute(&self, key: &str) -> Option<String> {
        match self.attributes.get(key) {
            Some(value) => coerce(value),
            None if key == "type" => Some(self.kind.clone()),
            None => None,
        }
    }
}

fn coerce(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// Finds author records by slug.
///
/// Implementations are expected to memoize per request; the resolver calls
/// this once per requested field.
#[async_trait]
pub trait AuthorLookup: Send + Sync {
    /// `Ok(None)` when no author has this slug. `Err` only when the
    /// service itself fails.
    async fn get_by_slug(&self, slug: &str) -> Result<Option<AuthorRecord>>;
}

/// Per-user key/value profile metadata.
#[async_trait]
pub trait UserMetaStore: Send + Sync {
    async fn get(&self, user_id: u64, key: &str) -> Result<Option<String>>;
}
