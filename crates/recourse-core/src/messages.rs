//! User-facing message catalog keyed by error kind
//!
//! A catalog file is a JSON object mapping error-kind identifiers to
//! `{"message", "description"}` pairs, with a `"default"` entry consulted
//! when no key matches. Catalog files are produced by an external generator
//! tool; this module only loads and applies them.

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::Diagnostic;
use crate::maybe::Maybe;

/// Catalog key consulted when an error kind has no entry of its own
pub const FALLBACK_KEY: &str = "default";

static BUILTIN_FALLBACK: Lazy<MessageEntry> = Lazy::new(|| MessageEntry {
    message: "An unexpected error occurred".to_string(),
    description: "No catalog entry matched this error kind".to_string(),
});

/// Human-readable message and description for one error kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntry {
    /// Short user-facing summary
    pub message: String,
    /// Longer explanation shown alongside the summary
    pub description: String,
}

/// Failure to load or parse a catalog file
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The file could not be read
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    /// The contents were not a valid catalog object
    #[error("malformed catalog: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },
}

impl Diagnostic for CatalogError {
    fn kind(&self) -> &str {
        match self {
            Self::Io { .. } => "catalog.io",
            Self::Parse { .. } => "catalog.parse",
        }
    }
}

/// Lookup-on-error-kind formatter with a default fallback entry.
///
/// ```
/// use recourse_core::MessageCatalog;
///
/// let catalog: MessageCatalog = r#"{
///     "io": {"message": "Storage problem", "description": "Check disk and permissions"},
///     "default": {"message": "Something went wrong", "description": "Try again"}
/// }"#.parse().unwrap();
///
/// assert_eq!(catalog.resolve("io").message, "Storage problem");
/// assert_eq!(catalog.resolve("unmapped.kind").message, "Something went wrong");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    entries: HashMap<String, MessageEntry>,
}

impl MessageCatalog {
    /// Empty catalog; every lookup resolves to the built-in fallback
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog: Self = raw.parse()?;
        debug!(
            path = %path.display(),
            entries = catalog.len(),
            "loaded message catalog"
        );
        Ok(catalog)
    }

    /// Load a catalog from any reader producing catalog JSON
    pub fn from_reader(reader: impl io::Read) -> Result<Self, CatalogError> {
        let entries =
            serde_json::from_reader(reader).map_err(|source| CatalogError::Parse { source })?;
        Ok(Self { entries })
    }

    /// Add or replace the entry for a kind
    pub fn insert(&mut self, kind: impl Into<String>, entry: MessageEntry) -> &mut Self {
        self.entries.insert(kind.into(), entry);
        self
    }

    /// Number of entries, counting the default entry if present
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry for exactly this kind, absent when unmapped
    pub fn entry(&self, kind: &str) -> Maybe<&MessageEntry> {
        match self.entries.get(kind) {
            Some(entry) => Maybe::Present(entry),
            None => Maybe::Absent,
        }
    }

    /// The entry for this kind, falling back to the catalog's default entry
    /// and finally to a built-in placeholder. Lookup never fails.
    pub fn resolve(&self, kind: &str) -> &MessageEntry {
        self.entries
            .get(kind)
            .or_else(|| self.entries.get(FALLBACK_KEY))
            .unwrap_or(&BUILTIN_FALLBACK)
    }

    /// Format a caught error using its resolved catalog entry
    pub fn describe(&self, error: &dyn Diagnostic) -> String {
        let entry = self.resolve(error.kind());
        format!("{}: {}\n{}", entry.message, error, entry.description)
    }
}

impl FromStr for MessageCatalog {
    type Err = CatalogError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let entries = serde_json::from_str(raw).map_err(|source| CatalogError::Parse { source })?;
        Ok(Self { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CATALOG: &str = r#"{
        "io": {"message": "Storage problem", "description": "Check disk and permissions"},
        "retry.exhausted": {"message": "Service kept failing", "description": "Try again later"},
        "default": {"message": "Something went wrong", "description": "Contact support"}
    }"#;

    #[test]
    fn exact_kind_wins_over_fallback() {
        let catalog: MessageCatalog = CATALOG.parse().unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.entry("io").unwrap().message, "Storage problem");
        assert_eq!(catalog.resolve("io").message, "Storage problem");
    }

    #[test]
    fn unmapped_kind_falls_back_to_default_entry() {
        let catalog: MessageCatalog = CATALOG.parse().unwrap();
        assert!(catalog.entry("unmapped.kind").is_absent());
        assert_eq!(catalog.resolve("unmapped.kind").message, "Something went wrong");
    }

    #[test]
    fn missing_default_uses_builtin_placeholder() {
        let catalog: MessageCatalog =
            r#"{"io": {"message": "Storage problem", "description": "d"}}"#
                .parse()
                .unwrap();
        assert_eq!(
            catalog.resolve("unmapped.kind").message,
            "An unexpected error occurred"
        );
        assert_eq!(MessageCatalog::new().resolve("anything").message, BUILTIN_FALLBACK.message);
    }

    #[test]
    fn loads_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG.as_bytes()).unwrap();

        let catalog = MessageCatalog::from_path(file.path()).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn missing_file_reports_io_variant() {
        let error = MessageCatalog::from_path("/nonexistent/catalog.json").unwrap_err();
        assert!(matches!(error, CatalogError::Io { .. }));
        assert_eq!(error.kind(), "catalog.io");
        assert!(error.to_string().contains("/nonexistent/catalog.json"));
    }

    #[test]
    fn malformed_json_reports_parse_variant() {
        let error = "{not json".parse::<MessageCatalog>().unwrap_err();
        assert!(matches!(error, CatalogError::Parse { .. }));
        assert_eq!(error.kind(), "catalog.parse");
    }

    #[test]
    fn from_reader_parses_the_same_format() {
        let catalog = MessageCatalog::from_reader(CATALOG.as_bytes()).unwrap();
        assert_eq!(catalog.resolve("retry.exhausted").message, "Service kept failing");
    }

    #[test]
    fn describe_combines_entry_and_error() {
        let catalog: MessageCatalog = CATALOG.parse().unwrap();
        let error = std::io::Error::other("disk gone");

        let description = catalog.describe(&error);
        assert!(description.contains("Storage problem"));
        assert!(description.contains("disk gone"));
        assert!(description.contains("Check disk and permissions"));
    }

    #[test]
    fn insert_builds_catalogs_programmatically() {
        let mut catalog = MessageCatalog::new();
        catalog.insert(
            "test.kind",
            MessageEntry {
                message: "m".into(),
                description: "d".into(),
            },
        );
        assert!(catalog.entry("test.kind").is_present());
    }
}
