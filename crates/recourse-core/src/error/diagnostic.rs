//! Stable kind identifiers for errors

use std::error::Error;

/// Trait for errors that expose a stable kind identifier.
///
/// History filtering on [`EnrichedError`](super::EnrichedError) matches on
/// this identifier rather than downcasting to concrete types, so errors of
/// any origin can share one history as long as they name their kind.
///
/// Identifiers are dot-separated lowercase tags (`"io"`,
/// `"retry.exhausted"`). They are part of a type's public contract and must
/// stay stable across versions.
pub trait Diagnostic: Error + Send + Sync {
    /// Stable identifier for this error kind
    fn kind(&self) -> &str;
}
