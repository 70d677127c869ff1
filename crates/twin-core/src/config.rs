//! Runtime configuration
//!
//! A TOML document such as:
//!
//! ```toml
//! strict = true
//! log_filter = "twin_core=debug"
//!
//! [catalog]
//! parts = "data/parts.json"
//! graph = "data/dependency_graph.json"
//! ```
//!
//! Every field is optional. Catalog paths left unset fall back to the
//! bundled sample.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Twin configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwinConfig {
    /// Where to load catalogs from
    pub catalog: CatalogPaths,
    /// Fail catalog loading on any integrity issue
    pub strict: bool,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

/// Catalog document locations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogPaths {
    /// Parts JSON array
    pub parts: Option<PathBuf>,
    /// Dependency graph `{ "edges": [...] }` document
    pub graph: Option<PathBuf>,
    /// Materials JSON array
    pub materials: Option<PathBuf>,
}

impl TwinConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a TOML config file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Toml`] if it does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), strict = config.strict, "config loaded");
        Ok(config)
    }

    /// Parse a TOML string
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] on malformed input or unknown types.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// With strict integrity checking
    #[inline]
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// With parts catalog path
    #[inline]
    #[must_use]
    pub fn with_parts_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog.parts = Some(path.into());
        self
    }

    /// With dependency graph path
    #[inline]
    #[must_use]
    pub fn with_graph_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog.graph = Some(path.into());
        self
    }

    /// With materials catalog path
    #[inline]
    #[must_use]
    pub fn with_materials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog.materials = Some(path.into());
        self
    }

    /// With log filter directive
    #[inline]
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }
}

impl Default for TwinConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogPaths::default(),
            strict: false,
            log_filter: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = TwinConfig::from_toml_str("").unwrap();
        assert_eq!(config, TwinConfig::default());
        assert_eq!(config.log_filter, "info");
        assert!(!config.strict);
    }

    #[test]
    fn partial_document() {
        let config = TwinConfig::from_toml_str(
            r#"
            strict = true

            [catalog]
            parts = "robot/parts.json"
            "#,
        )
        .unwrap();

        assert!(config.strict);
        assert_eq!(config.catalog.parts, Some(PathBuf::from("robot/parts.json")));
        assert!(config.catalog.graph.is_none());
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn wrong_type_is_rejected() {
        let err = TwinConfig::from_toml_str("strict = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn builders() {
        let config = TwinConfig::new()
            .with_strict(true)
            .with_graph_path("g.json")
            .with_log_filter("debug");
        assert!(config.strict);
        assert_eq!(config.catalog.graph, Some(PathBuf::from("g.json")));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = TwinConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
