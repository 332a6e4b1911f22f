//! In-memory author lookup and user metadata.

use crate::author::{AuthorLookup, AuthorRecord, UserMetaStore};
use crate::error::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Author records keyed by slug. Counts lookups so callers can observe how
/// often the backing service would be hit.
#[derive(Debug, Default)]
pub struct InMemoryAuthorLookup {
    authors: RwLock<HashMap<String, AuthorRecord>>,
    lookups: AtomicUsize,
}

impl InMemoryAuthorLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_author(self, slug: impl Into<String>, author: AuthorRecord) -> Self {
        self.insert(slug, author);
        self
    }

    pub fn insert(&self, slug: impl Into<String>, author: AuthorRecord) {
        self.authors.write().insert(slug.into(), author);
    }

    /// Number of `get_by_slug` calls so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl AuthorLookup for InMemoryAuthorLookup {
    async fn get_by_slug(&self, slug: &str) -> Result<Option<AuthorRecord>> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        Ok(self.authors.read().get(slug).cloned())
    }
}

/// User metadata keyed by `(user id, key)`.
#[derive(Debug, Default)]
pub struct InMemoryUserMeta {
    entries: RwLock<HashMap<(u64, String), String>>,
}

impl InMemoryUserMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_meta(self, user_id: u64, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(user_id, key, value);
        self
    }

    pub fn set(&self, user_id: u64, key: impl Into<String>, value: impl Into<String>) {
        self.entries.write().insert((user_id, key.into()), value.into());
    }
}

#[async_trait]
impl UserMetaStore for InMemoryUserMeta {
    async fn get(&self, user_id: u64, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(&(user_id, key.to_string())).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_hit_and_miss() {
        let lookup = InMemoryAuthorLookup::new()
            .with_author("jane-doe", AuthorRecord::platform_user(1));

        assert!(lookup.get_by_slug("jane-doe").await.unwrap().is_some());
        assert!(lookup.get_by_slug("john-roe").await.unwrap().is_none());
        assert_eq!(lookup.lookup_count(), 2);
    }

    #[tokio::test]
    async fn test_meta_is_scoped_by_user() {
        let meta = InMemoryUserMeta::new()
            .with_meta(1, "first_name", "Jane")
            .with_meta(2, "first_name", "John");

        assert_eq!(meta.get(1, "first_name").await.unwrap().as_deref(), Some("Jane"));
        assert_eq!(meta.get(2, "first_name").await.unwrap().as_deref(), Some("John"));
        assert_eq!(meta.get(3, "first_name").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_meta_overwrite() {
        let meta = InMemoryUserMeta::new();
        meta.set(1, "last_name", "Doe");
        meta.set(1, "last_name", "Roe");
        assert_eq!(meta.get(1, "last_name").await.unwrap().as_deref(), Some("Roe"));
    }
}
