//! Compiler configuration.

use serde::{Deserialize, Serialize};

use crate::bind::{validate_prefix, Binder, DEFAULT_PLACEHOLDER_PREFIX};
use crate::dialect::Dialect;
use crate::error::{CompileError, Result};
use crate::query::Query;

fn default_prefix() -> String {
    String::from(DEFAULT_PLACEHOLDER_PREFIX)
}

/// Settings shared by a [`Builder`](crate::Builder) and the queries it
/// compiles.
///
/// ```rust
/// use score_sql_core::{CompilerConfig, Dialect};
///
/// let config = CompilerConfig::from_json(r#"{ "dialect": "postgres" }"#).unwrap();
/// assert_eq!(config.dialect, Dialect::PgSql);
/// assert_eq!(config.placeholder_prefix, "db_prep_");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Target dialect.
    #[serde(default)]
    pub dialect: Dialect,
    /// Placeholder name prefix; tokens read `:<prefix><n>`.
    #[serde(default = "default_prefix")]
    pub placeholder_prefix: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::Generic,
            placeholder_prefix: default_prefix(),
        }
    }
}

impl CompilerConfig {
    /// Starts a configuration builder.
    #[must_use]
    pub fn builder() -> CompilerConfigBuilder {
        CompilerConfigBuilder::default()
    }

    /// Reads a configuration from JSON. Missing fields take their
    /// defaults.
    ///
    /// # Errors
    ///
    /// [`CompileError::InvalidConfig`] when the text is not a valid
    /// configuration object or the placeholder prefix is rejected by
    /// [`validate_prefix`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CompileError::InvalidConfig(e.to_string()))?;
        validate_prefix(&config.placeholder_prefix)?;
        Ok(config)
    }

    /// Creates an empty query whose binder uses the configured prefix.
    ///
    /// # Errors
    ///
    /// [`CompileError::InvalidConfig`] when the prefix was changed to
    /// one [`validate_prefix`] rejects.
    pub fn new_query(&self) -> Result<Query> {
        Ok(Query::with_binder(Binder::with_prefix(
            self.placeholder_prefix.as_str(),
        )?))
    }
}

/// Builder for [`CompilerConfig`].
#[derive(Debug, Default)]
pub struct CompilerConfigBuilder {
    config: CompilerConfig,
}

impl CompilerConfigBuilder {
    /// Sets the dialect.
    #[must_use]
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.config.dialect = dialect;
        self
    }

    /// Sets the placeholder prefix.
    #[must_use]
    pub fn placeholder_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.placeholder_prefix = prefix.into();
        self
    }

    /// Finishes the configuration.
    ///
    /// # Errors
    ///
    /// [`CompileError::InvalidConfig`] when the prefix is empty or holds
    /// characters other than ASCII letters, digits and `_`.
    pub fn build(self) -> Result<CompilerConfig> {
        validate_prefix(&self.config.placeholder_prefix)?;
        Ok(self.config)
    }
}
