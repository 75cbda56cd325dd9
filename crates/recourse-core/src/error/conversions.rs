//! Diagnostic implementations and conversions for foreign error types

use std::sync::Arc;

use super::diagnostic::Diagnostic;
use super::enriched::EnrichedError;
use crate::maybe::EmptyUnwrapError;
use crate::recovery::RetriesExhaustedError;

impl Diagnostic for std::io::Error {
    fn kind(&self) -> &str {
        "io"
    }
}

impl Diagnostic for serde_json::Error {
    fn kind(&self) -> &str {
        "json"
    }
}

impl Diagnostic for EmptyUnwrapError {
    fn kind(&self) -> &str {
        "maybe.empty"
    }
}

/// Exhaustion keeps its full causal chain when handed to enrichment-aware
/// layers: the exhaustion error becomes both the cause and the first history
/// entry. The code defaults to 0; transport-specific codes are assigned
/// downstream.
impl From<RetriesExhaustedError> for EnrichedError {
    fn from(error: RetriesExhaustedError) -> Self {
        let message = error.to_string();
        EnrichedError::caused_by(message, 0, Arc::new(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_errors_report_stable_kinds() {
        // io::Error has an inherent kind(); go through the trait.
        let io_error = std::io::Error::other("disk gone");
        assert_eq!(Diagnostic::kind(&io_error), "io");

        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(Diagnostic::kind(&json_error), "json");

        assert_eq!(EmptyUnwrapError.kind(), "maybe.empty");
    }

    #[test]
    fn exhaustion_converts_into_enrichment() {
        let policy = crate::recovery::RetryPolicy::new(2, std::time::Duration::ZERO);
        let retrier = crate::recovery::Retrier::with_sleeper(policy, crate::recovery::InstantSleeper);
        let exhausted = retrier
            .run(|| Err::<(), _>(std::io::Error::other("flaky")))
            .unwrap_err();

        let enriched: EnrichedError = exhausted.into();
        assert_eq!(enriched.code(), 0);
        assert_eq!(enriched.history().len(), 1);
        assert!(enriched.has_error_of_kind("retry.exhausted"));
        assert!(enriched.message().contains('2'));
    }
}
