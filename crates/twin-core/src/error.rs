//! Error types for the robot twin core
//!
//! Only I/O, decoding and lookup failures are errors. Business denials
//! from the assembly validator are values ([`crate::Permission`]), and
//! state inconsistencies are reported as [`crate::StateIssue`] lists.

use crate::catalog::IntegrityIssue;
use std::path::PathBuf;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Result type for top-level twin operations
pub type TwinResult<T> = Result<T, TwinError>;

/// Main error type
#[derive(Debug, thiserror::Error)]
pub enum TwinError {
    /// Catalog loading or lookup failed
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration could not be read
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Part id is not in the catalog
    #[error("part not found: {0}")]
    PartNotFound(String),
}

/// Catalog loading and lookup errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("I/O error at '{path}': {source}")]
    Io {
        /// The path being read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Catalog document is not valid JSON for its schema
    #[error("invalid {what} document: {source}")]
    Decode {
        /// Which catalog was being decoded
        what: &'static str,
        /// The underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// Two parts share an id
    #[error("duplicate part id '{0}'")]
    DuplicatePart(String),

    /// Two materials share an id
    #[error("duplicate material id '{0}'")]
    DuplicateMaterial(String),

    /// Part id is not in the catalog
    #[error("part '{0}' not found in catalog")]
    PartNotFound(String),

    /// Strict loading found reference problems
    #[error("{} integrity issue(s), first: {}", .0.len(), first_issue(.0))]
    Integrity(Vec<IntegrityIssue>),
}

fn first_issue(issues: &[IntegrityIssue]) -> String {
    issues
        .first()
        .map_or_else(|| "none".to_string(), ToString::to_string)
}

impl CatalogError {
    /// Build an I/O error for a path
    #[inline]
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("I/O error at '{path}': {source}")]
    Io {
        /// The config path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the schema
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twin_error_display() {
        let err = TwinError::PartNotFound("gripper".to_string());
        assert!(err.to_string().contains("gripper"));
    }

    #[test]
    fn catalog_error_converts_into_twin_error() {
        let err: TwinError = CatalogError::DuplicatePart("chassis".to_string()).into();
        assert!(matches!(err, TwinError::Catalog(CatalogError::DuplicatePart(_))));
    }

    #[test]
    fn integrity_error_reports_count_and_first_issue() {
        let err = CatalogError::Integrity(vec![
            IntegrityIssue::UnknownMaterial {
                part_id: "chassis".to_string(),
                material_id: "mat-x".to_string(),
            },
            IntegrityIssue::MissingStructuralRoot,
        ]);
        let text = err.to_string();
        assert!(text.starts_with("2 integrity issue(s)"));
        assert!(text.contains("mat-x"));
    }
}
