// Co-authors schema configuration

use crate::error::{CoAuthorsError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// How the author taxonomy is exposed to the schema.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoAuthorsConfig {
    /// Name of the taxonomy whose terms stand in for authors
    pub taxonomy: String,

    /// GraphQL type name of one author
    pub graphql_single_name: String,

    /// GraphQL name of an author list
    pub graphql_plural_name: String,

    /// `orderby` injected into author connections so they keep the order
    /// the owning post assigned
    pub default_orderby: String,
}

impl CoAuthorsConfig {
    /// Defaults with a custom taxonomy name.
    ///
    /// # Example
    ///
    /// ```
    /// use coauthors_graphql::CoAuthorsConfig;
    ///
    /// let config = CoAuthorsConfig::new("byline");
    /// assert_eq!(config.taxonomy, "byline");
    /// assert_eq!(config.graphql_single_name, "coAuthor");
    /// ```
    pub fn new(taxonomy: impl Into<String>) -> Self {
        Self {
            taxonomy: taxonomy.into(),
            ..Self::default()
        }
    }

    /// Read `COAUTHORS_*` variables, loading a `.env` file first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Build from `(name, value)` pairs; unknown names are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::default();
        for (key, value) in vars {
            match key.as_ref() {
                "COAUTHORS_TAXONOMY" => config.taxonomy = value.into(),
                "COAUTHORS_GRAPHQL_SINGLE_NAME" => config.graphql_single_name = value.into(),
                "COAUTHORS_GRAPHQL_PLURAL_NAME" => config.graphql_plural_name = value.into(),
                "COAUTHORS_DEFAULT_ORDERBY" => config.default_orderby = value.into(),
                _ => {}
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.toml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml_str(&content),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&content),
            Some(ext) => Err(CoAuthorsError::Config(format!(
                "Unsupported configuration format: {}",
                ext
            ))),
            None => Err(CoAuthorsError::Config(
                "No file extension found".to_string(),
            )),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| CoAuthorsError::Parse(format!("TOML parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| CoAuthorsError::Parse(format!("JSON parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_taxonomy(mut self, taxonomy: impl Into<String>) -> Self {
        self.taxonomy = taxonomy.into();
        self
    }

    pub fn with_type_names(mut self, single: impl Into<String>, plural: impl Into<String>) -> Self {
        self.graphql_single_name = single.into();
        self.graphql_plural_name = plural.into();
        self
    }

    pub fn with_default_orderby(mut self, orderby: impl Into<String>) -> Self {
        self.default_orderby = orderby.into();
        self
    }

    /// Reject empty names and a plural name equal to the single one.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("taxonomy", &self.taxonomy),
            ("graphql_single_name", &self.graphql_single_name),
            ("graphql_plural_name", &self.graphql_plural_name),
            ("default_orderby", &self.default_orderby),
        ];
        if let Some((key, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(CoAuthorsError::Config(format!("{} must not be empty", key)));
        }

        if self.graphql_single_name == self.graphql_plural_name {
            return Err(CoAuthorsError::Config(format!(
                "graphql_single_name and graphql_plural_name are both '{}'",
                self.graphql_single_name
            )));
        }

        Ok(())
    }
}

impl Default for CoAuthorsConfig {
    fn default() -> Self {
        Self {
            taxonomy: "author".to_string(),
            graphql_single_name: "coAuthor".to_string(),
            graphql_plural_name: "coAuthors".to_string(),
            default_orderby: "term_order".to_string(),
        }
    }
}
